use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chatdock_options::{
    ComponentKind, ConfigError, HandoffPayload, Locale, Options, ValidationMode, bootstrap,
    bootstrap_with,
};
use serde_json::json;
use tracing_test::traced_test;

fn sample_options() -> Options {
    Options::new(
        "abc",
        "Hi",
        "#chat-btn",
        "https://api.example.com",
        "wss://ws.example.com",
    )
}

#[test]
fn minimal_config_mounts_with_defaults() {
    let widget = bootstrap(&sample_options()).expect("minimal config to validate");
    let config = widget.config();
    assert!(!config.default_open);
    assert!(!config.debug);
    assert!(!config.warn_before_close);
    assert_eq!(config.language, Locale::En);
    assert!(config.components.is_empty());
}

#[test]
fn bootstrap_refuses_incomplete_configs() {
    let mut opts = sample_options();
    opts.token.clear();
    assert!(matches!(
        bootstrap(&opts),
        Err(ConfigError::MissingField("token"))
    ));

    let mut opts = sample_options();
    opts.socket_url = "not a url".into();
    assert!(matches!(
        bootstrap(&opts),
        Err(ConfigError::InvalidUrl { field: "socketUrl", .. })
    ));
}

#[test]
fn embed_json_flows_through_to_a_mounted_widget() {
    let opts: Options = serde_json::from_value(json!({
        "token": "abc",
        "initialMessage": "Hi",
        "triggerSelector": "#chat-btn",
        "apiUrl": "https://api.example.com",
        "socketUrl": "wss://ws.example.com",
        "language": "de",
        "components": ["chat", "quick_replies"],
        "containerProps": {"id": "chatdock-root", "data-theme": "dark"},
        "bot": {"name": "Dock"}
    }))
    .expect("embed JSON to deserialize");

    let widget = bootstrap(&opts).expect("embed config to validate");
    let config = widget.config();
    assert_eq!(config.language, Locale::De);
    assert_eq!(
        config.components,
        vec![ComponentKind::Chat, ComponentKind::QuickReplies]
    );
    assert_eq!(
        config.container_props.get("id"),
        Some(&json!("chatdock-root"))
    );
    assert_eq!(
        config.bot.as_ref().and_then(|b| b.name.as_deref()),
        Some("Dock")
    );
}

#[test]
fn widget_snapshot_ignores_later_host_mutation() {
    let mut opts = sample_options().with_components(["chat"]);
    let widget = bootstrap(&opts).expect("config to validate");

    opts.initial_message = "changed".into();
    opts.components.push("form".into());

    assert_eq!(widget.config().initial_message, "Hi");
    assert_eq!(widget.config().components, vec![ComponentKind::Chat]);
}

#[traced_test]
#[test]
fn unknown_component_degrades_with_a_diagnostic() {
    let opts = sample_options().with_components(["chat", "bogus-widget"]);
    let widget = bootstrap(&opts).expect("unknown components must not fail the embed");
    assert_eq!(widget.config().components, vec![ComponentKind::Chat]);
    assert!(logs_contain("ignoring unknown component variant"));
}

#[test]
fn strict_mode_surfaces_unsupported_language() {
    let opts = sample_options().with_language("tlh");
    assert!(matches!(
        bootstrap_with(&opts, ValidationMode::Strict),
        Err(ConfigError::UnsupportedLanguage(_))
    ));
    // Lenient mode mounts the same config with the fallback locale.
    let widget = bootstrap(&opts).expect("lenient mode to fall back");
    assert_eq!(widget.config().language, Locale::En);
}

#[test]
fn close_and_handoff_reach_the_host() {
    let closes = Arc::new(AtomicUsize::new(0));
    let handoffs = Arc::new(AtomicUsize::new(0));
    let close_seen = Arc::clone(&closes);
    let handoff_seen = Arc::clone(&handoffs);

    let opts = sample_options()
        .on_close(move || {
            close_seen.fetch_add(1, Ordering::SeqCst);
        })
        .on_handoff(move |payload| {
            assert_eq!(payload.sentiment.as_deref(), Some("angry"));
            handoff_seen.fetch_add(1, Ordering::SeqCst);
        });

    let widget = bootstrap(&opts).expect("config to validate");
    widget.close();
    widget.handoff(HandoffPayload {
        sentiment: Some("angry".into()),
        ..HandoffPayload::default()
    });

    assert_eq!(closes.load(Ordering::SeqCst), 1);
    assert_eq!(handoffs.load(Ordering::SeqCst), 1);
}

#[traced_test]
#[test]
fn panicking_host_callback_never_escapes_the_widget() {
    let opts = sample_options().on_close(|| panic!("host bug"));
    let widget = bootstrap(&opts).expect("config to validate");
    widget.close();
    assert!(logs_contain("host callback panicked"));
}

#[test]
fn request_plumbing_reflects_headers_and_query_params() {
    let opts = sample_options()
        .with_header("X-Embed-Version", "3")
        .with_query_param("tenant", "acme");
    let widget = bootstrap(&opts).expect("config to validate");
    let config = widget.config();

    assert_eq!(
        config.request_headers().get("X-Embed-Version").map(String::as_str),
        Some("3")
    );
    let endpoint = config.api_endpoint("conversations").unwrap();
    assert_eq!(
        endpoint.as_str(),
        "https://api.example.com/conversations?tenant=acme"
    );
    assert_eq!(
        config.socket_endpoint().as_str(),
        "wss://ws.example.com/?tenant=acme"
    );
}
