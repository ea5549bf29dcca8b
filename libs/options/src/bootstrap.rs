use crate::callbacks::{CallbackHandles, bind_callbacks};
use crate::error::ConfigError;
use crate::options::{HandoffPayload, Options};
use crate::validate::{ValidatedConfig, ValidationMode, validate_with};

/// A widget instance's view of its host configuration: the immutable
/// normalized snapshot plus the bound lifecycle callbacks.
#[derive(Clone, Debug)]
pub struct WidgetBootstrap {
    config: ValidatedConfig,
    callbacks: CallbackHandles,
}

/// Initialization entry point for the embedding host.
///
/// Validates the configuration, resolves the component list, and binds the
/// lifecycle callbacks. The returned handle owns its snapshot; later changes
/// to the host's [`Options`] value are not observed by the widget.
///
/// ```
/// use chatdock_options::{Options, bootstrap};
///
/// let opts = Options::new(
///     "abc",
///     "Hi",
///     "#chat-btn",
///     "https://api.example.com",
///     "wss://ws.example.com",
/// );
/// let widget = bootstrap(&opts).unwrap();
/// assert_eq!(widget.config().trigger_selector, "#chat-btn");
/// ```
pub fn bootstrap(options: &Options) -> Result<WidgetBootstrap, ConfigError> {
    bootstrap_with(options, ValidationMode::default())
}

/// [`bootstrap`] with an explicit validation mode.
pub fn bootstrap_with(
    options: &Options,
    mode: ValidationMode,
) -> Result<WidgetBootstrap, ConfigError> {
    let config = validate_with(options, mode)?;
    let callbacks = bind_callbacks(options);
    if config.debug {
        match serde_json::to_value(&config) {
            Ok(mut snapshot) => {
                snapshot["token"] = serde_json::Value::String("<redacted>".into());
                tracing::debug!(snapshot = %snapshot, "widget configuration accepted");
            }
            Err(err) => tracing::debug!(error = %err, "widget configuration accepted"),
        }
    }
    Ok(WidgetBootstrap { config, callbacks })
}

impl WidgetBootstrap {
    /// Normalized configuration snapshot.
    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Bound lifecycle callbacks.
    pub fn callbacks(&self) -> &CallbackHandles {
        &self.callbacks
    }

    /// Dismisses the widget and fires the host `onClose` callback.
    pub fn close(&self) {
        self.callbacks.close();
    }

    /// Hands the conversation off to a human agent and notifies the host.
    pub fn handoff(&self, payload: HandoffPayload) {
        self.callbacks.handoff(payload);
    }
}
