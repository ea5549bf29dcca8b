use metrics::counter;
use serde::{Deserialize, Serialize};

/// Optional UI building blocks the widget can render.
///
/// Hosts select variants by key, in display order. The set is closed so the
/// renderer never sees a variant it does not know how to mount; unknown keys
/// coming from hosts built against a different widget version are dropped
/// during resolution rather than failing the embed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Main conversation surface.
    Chat,
    /// Plain text message bubbles.
    Text,
    /// Tappable quick-reply buttons under a bot message.
    QuickReplies,
    /// Inline data-collection forms.
    Form,
    /// Typing / loading indicator bubble.
    Loading,
    /// Fallback bubble shown when a message fails to deliver.
    Fault,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Chat,
        ComponentKind::Text,
        ComponentKind::QuickReplies,
        ComponentKind::Form,
        ComponentKind::Loading,
        ComponentKind::Fault,
    ];

    /// Key used in host configs; matches the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            ComponentKind::Chat => "chat",
            ComponentKind::Text => "text",
            ComponentKind::QuickReplies => "quick_replies",
            ComponentKind::Form => "form",
            ComponentKind::Loading => "loading",
            ComponentKind::Fault => "fault",
        }
    }

    /// Looks a key up in the registry of known variants.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.key() == key)
    }
}

/// Filters requested component keys against the registry of known variants.
///
/// Order is preserved and repeats collapse into their first occurrence, so
/// the resolved list is exactly the display order the host asked for. Each
/// unknown key emits one warning diagnostic and is skipped.
pub fn resolve_components(requested: &[String]) -> Vec<ComponentKind> {
    let mut resolved = Vec::with_capacity(requested.len());
    for key in requested {
        match ComponentKind::from_key(key) {
            Some(kind) => {
                if !resolved.contains(&kind) {
                    resolved.push(kind);
                }
            }
            None => {
                counter!("widget_config_warnings_total", "kind" => "unknown_component")
                    .increment(1);
                tracing::warn!(component = %key, "ignoring unknown component variant");
            }
        }
    }
    resolved
}
