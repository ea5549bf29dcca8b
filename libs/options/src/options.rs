use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zero-argument host callback fired when the widget is dismissed.
pub type CloseCallback = Arc<dyn Fn() + Send + Sync>;

/// Host callback fired when a conversation is handed off to a human agent.
pub type HandoffCallback = Arc<dyn Fn(HandoffPayload) + Send + Sync>;

/// Conversation handoff notification forwarded to the host.
///
/// The payload shape is owned by the messaging subsystem; beyond the summary
/// fields everything rides along untouched in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct HandoffPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Display identity for one side of the conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Embed-time widget configuration supplied by the host page.
///
/// Field names mirror the JSON embed contract (`camelCase`). Required string
/// fields carry `#[serde(default)]` so a missing key deserializes to an empty
/// value and surfaces as [`ConfigError::MissingField`] during validation,
/// with the field named, instead of an opaque serde error.
///
/// [`ConfigError::MissingField`]: crate::error::ConfigError::MissingField
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Authentication credential for the backend session.
    #[serde(default)]
    pub token: String,
    /// Extra HTTP headers attached to outbound requests.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Extra query parameters attached to outbound requests.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: BTreeMap<String, String>,
    /// First message shown when a conversation starts.
    #[serde(default)]
    pub initial_message: String,
    /// Selector of the host-page element that opens the widget.
    #[serde(default)]
    pub trigger_selector: String,
    /// Base endpoint for request/response HTTP calls.
    #[serde(default)]
    pub api_url: String,
    /// Base endpoint for the realtime transport connection.
    #[serde(default)]
    pub socket_url: String,
    /// Whether the widget starts open on load.
    #[serde(default)]
    pub default_open: bool,
    /// Enables verbose diagnostic output.
    #[serde(default)]
    pub debug: bool,
    /// UI locale tag; unknown tags fall back to the default locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Prompts for confirmation before the widget is dismissed.
    #[serde(default)]
    pub warn_before_close: bool,
    /// Invoked when the widget closes.
    #[serde(skip)]
    pub on_close: Option<CloseCallback>,
    /// Invoked when the conversation is handed off to a human agent.
    #[serde(skip)]
    pub on_handoff: Option<HandoffCallback>,
    /// Attributes forwarded verbatim to the widget's root container element.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub container_props: BTreeMap<String, Value>,
    /// Optional UI component variants to enable, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    /// Display identity of the end user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Persona>,
    /// Display identity of the automated agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<Persona>,
}

impl Options {
    /// Creates a configuration from the five required fields.
    pub fn new(
        token: impl Into<String>,
        initial_message: impl Into<String>,
        trigger_selector: impl Into<String>,
        api_url: impl Into<String>,
        socket_url: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            initial_message: initial_message.into(),
            trigger_selector: trigger_selector.into(),
            api_url: api_url.into(),
            socket_url: socket_url.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn with_default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.language = Some(tag.into());
        self
    }

    pub fn with_warn_before_close(mut self, warn: bool) -> Self {
        self.warn_before_close = warn;
        self
    }

    pub fn with_container_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.container_props.insert(name.into(), value);
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_user(mut self, user: Persona) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_bot(mut self, bot: Persona) -> Self {
        self.bot = Some(bot);
        self
    }

    /// Registers the callback fired when the widget closes.
    pub fn on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(callback));
        self
    }

    /// Registers the callback fired on conversation handoff.
    pub fn on_handoff(
        mut self,
        callback: impl Fn(HandoffPayload) + Send + Sync + 'static,
    ) -> Self {
        self.on_handoff = Some(Arc::new(callback));
        self
    }
}

// Hand-rolled so the token never lands in logs and the callbacks render as
// presence flags rather than opaque pointers.
impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("token", &"<redacted>")
            .field("headers", &self.headers)
            .field("query_params", &self.query_params)
            .field("initial_message", &self.initial_message)
            .field("trigger_selector", &self.trigger_selector)
            .field("api_url", &self.api_url)
            .field("socket_url", &self.socket_url)
            .field("default_open", &self.default_open)
            .field("debug", &self.debug)
            .field("language", &self.language)
            .field("warn_before_close", &self.warn_before_close)
            .field("on_close", &self.on_close.is_some())
            .field("on_handoff", &self.on_handoff.is_some())
            .field("container_props", &self.container_props)
            .field("components", &self.components)
            .field("user", &self.user)
            .field("bot", &self.bot)
            .finish()
    }
}
