use thiserror::Error;

/// Hard configuration failures that reject widget initialization.
///
/// Only structural problems end up here; recoverable conditions (unknown
/// component variants, unsupported locale tags outside strict mode) degrade
/// gracefully and surface through the diagnostic channel instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required option was absent or blank. The name matches the JSON key
    /// the host supplies.
    #[error("missing required option `{0}`")]
    MissingField(&'static str),

    /// `apiUrl` or `socketUrl` did not parse as an absolute URL.
    #[error("option `{field}` is not a valid absolute URL (`{value}`): {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Strict validation rejected a locale tag outside the supported set.
    #[error("unsupported language tag `{0}`")]
    UnsupportedLanguage(String),
}
