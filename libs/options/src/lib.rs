//! Chatdock embed configuration contract.
//!
//! This crate defines the options a host page supplies when mounting the
//! Chatdock chat widget, together with the validation, normalization, and
//! callback-binding steps the widget bootstrap performs before any rendering
//! or networking starts. Rendering, the realtime transport, and component
//! behavior live elsewhere and consume the [`ValidatedConfig`] snapshot
//! produced here.
//!
//! Hard configuration problems (missing required options, malformed URLs)
//! reject initialization with a [`ConfigError`]; recoverable ones (unknown
//! component variants, unsupported locale tags) degrade with a warning on the
//! diagnostic channel.

pub mod bootstrap;
pub mod callbacks;
pub mod components;
pub mod error;
pub mod locale;
pub mod options;
pub mod validate;

pub use bootstrap::{WidgetBootstrap, bootstrap, bootstrap_with};
pub use callbacks::{CallbackHandles, bind_callbacks};
pub use components::{ComponentKind, resolve_components};
pub use error::ConfigError;
pub use locale::Locale;
pub use options::{CloseCallback, HandoffCallback, HandoffPayload, Options, Persona};
pub use validate::{ValidatedConfig, ValidationMode, validate, validate_strict, validate_with};
