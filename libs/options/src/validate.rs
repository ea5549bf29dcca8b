use std::collections::BTreeMap;

use metrics::counter;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::components::{ComponentKind, resolve_components};
use crate::error::ConfigError;
use crate::locale::Locale;
use crate::options::{Options, Persona};

/// Controls how unrecognized locale tags are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Unknown tags fall back to the default locale with a warning.
    #[default]
    Lenient,
    /// Unknown tags reject the configuration.
    Strict,
}

/// Normalized, immutable snapshot of a host configuration.
///
/// Every optional field carries its resolved default, so downstream widget
/// code never re-checks for absence. The snapshot is owned: once produced,
/// later mutation of the host's [`Options`] value has no effect on it.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedConfig {
    pub token: String,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub initial_message: String,
    pub trigger_selector: String,
    pub api_url: Url,
    pub socket_url: Url,
    pub default_open: bool,
    pub debug: bool,
    pub language: Locale,
    pub warn_before_close: bool,
    pub container_props: BTreeMap<String, Value>,
    pub components: Vec<ComponentKind>,
    pub user: Option<Persona>,
    pub bot: Option<Persona>,
}

impl ValidatedConfig {
    /// Joins a relative path onto the API base and applies the host's extra
    /// query parameters.
    pub fn api_endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let mut url = self
            .api_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ConfigError::InvalidUrl {
                field: "apiUrl",
                value: path.to_string(),
                source,
            })?;
        self.apply_query(&mut url);
        Ok(url)
    }

    /// Realtime endpoint with the host's extra query parameters applied; the
    /// transport layers its own auth material on top.
    pub fn socket_endpoint(&self) -> Url {
        let mut url = self.socket_url.clone();
        self.apply_query(&mut url);
        url
    }

    /// Extra headers for outbound HTTP requests.
    pub fn request_headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn apply_query(&self, url: &mut Url) {
        if self.query_params.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &self.query_params {
            pairs.append_pair(name, value);
        }
    }
}

// Same redaction posture as `Options`: the token stays out of logs.
impl std::fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("token", &"<redacted>")
            .field("headers", &self.headers)
            .field("query_params", &self.query_params)
            .field("initial_message", &self.initial_message)
            .field("trigger_selector", &self.trigger_selector)
            .field("api_url", &self.api_url.as_str())
            .field("socket_url", &self.socket_url.as_str())
            .field("default_open", &self.default_open)
            .field("debug", &self.debug)
            .field("language", &self.language)
            .field("warn_before_close", &self.warn_before_close)
            .field("container_props", &self.container_props)
            .field("components", &self.components)
            .field("user", &self.user)
            .field("bot", &self.bot)
            .finish()
    }
}

// Lets a normalized snapshot be fed back through validation, which must be a
// fixpoint. Callbacks are not part of the snapshot and come back empty.
impl From<ValidatedConfig> for Options {
    fn from(config: ValidatedConfig) -> Self {
        Options {
            token: config.token,
            headers: config.headers,
            query_params: config.query_params,
            initial_message: config.initial_message,
            trigger_selector: config.trigger_selector,
            api_url: config.api_url.to_string(),
            socket_url: config.socket_url.to_string(),
            default_open: config.default_open,
            debug: config.debug,
            language: Some(config.language.tag().to_string()),
            warn_before_close: config.warn_before_close,
            on_close: None,
            on_handoff: None,
            container_props: config.container_props,
            components: config
                .components
                .iter()
                .map(|kind| kind.key().to_string())
                .collect(),
            user: config.user,
            bot: config.bot,
        }
    }
}

/// Validates a host configuration and applies defaults.
///
/// Absent booleans normalize to `false`, an absent or unknown language to the
/// default locale, and unknown component variants are dropped with a warning.
///
/// ```
/// use chatdock_options::{Options, validate};
///
/// let opts = Options::new(
///     "abc",
///     "Hi",
///     "#chat-btn",
///     "https://api.example.com",
///     "wss://ws.example.com",
/// );
/// let config = validate(&opts).unwrap();
/// assert!(!config.default_open);
/// assert!(config.components.is_empty());
/// ```
pub fn validate(options: &Options) -> Result<ValidatedConfig, ConfigError> {
    validate_with(options, ValidationMode::Lenient)
}

/// Like [`validate`], but an unsupported language tag becomes a hard error
/// instead of falling back to the default locale.
///
/// ```
/// use chatdock_options::{ConfigError, Options, validate_strict};
///
/// let opts = Options::new("abc", "Hi", "#chat", "https://a.example", "wss://b.example")
///     .with_language("tlh");
/// assert!(matches!(
///     validate_strict(&opts),
///     Err(ConfigError::UnsupportedLanguage(_))
/// ));
/// ```
pub fn validate_strict(options: &Options) -> Result<ValidatedConfig, ConfigError> {
    validate_with(options, ValidationMode::Strict)
}

/// Validation entry point with an explicit mode.
pub fn validate_with(
    options: &Options,
    mode: ValidationMode,
) -> Result<ValidatedConfig, ConfigError> {
    let token = required("token", &options.token)?;
    let initial_message = required("initialMessage", &options.initial_message)?;
    let trigger_selector = required("triggerSelector", &options.trigger_selector)?;
    let api_url = parse_base_url("apiUrl", &options.api_url)?;
    let socket_url = parse_base_url("socketUrl", &options.socket_url)?;
    let language = resolve_language(options.language.as_deref(), mode)?;
    let components = resolve_components(&options.components);

    Ok(ValidatedConfig {
        token,
        headers: options.headers.clone(),
        query_params: options.query_params.clone(),
        initial_message,
        trigger_selector,
        api_url,
        socket_url,
        default_open: options.default_open,
        debug: options.debug,
        language,
        warn_before_close: options.warn_before_close,
        container_props: options.container_props.clone(),
        components,
        user: options.user.clone(),
        bot: options.bot.clone(),
    })
}

fn required(field: &'static str, value: &str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Ok(value.to_string())
}

fn parse_base_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    let mut url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    // Directory-style base so endpoint joins keep the configured path.
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

fn resolve_language(tag: Option<&str>, mode: ValidationMode) -> Result<Locale, ConfigError> {
    let Some(tag) = tag else {
        return Ok(Locale::default());
    };
    match Locale::from_tag(tag) {
        Some(locale) => Ok(locale),
        None if mode == ValidationMode::Strict => {
            Err(ConfigError::UnsupportedLanguage(tag.to_string()))
        }
        None => {
            counter!("widget_config_warnings_total", "kind" => "unsupported_language")
                .increment(1);
            tracing::warn!(
                language = %tag,
                fallback = Locale::default().tag(),
                "unsupported language tag, using fallback locale"
            );
            Ok(Locale::default())
        }
    }
}
