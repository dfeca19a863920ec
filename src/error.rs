/// Error returned by [`Log::log`](crate::logger::Log::log) when a call
/// breaks the key/value contract. Nothing is emitted and the logger's
/// context is left as it was.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    #[error("invalid argument: odd number of keyvals ({0})")]
    OddKeyvals(usize),

    #[error("invalid argument: key at position {index} is a {found}, expected a string")]
    NonStringKey { index: usize, found: &'static str },

    #[error("invalid argument: \"ts\" expects a time value, got {found}")]
    InvalidTimestamp { found: &'static str },

    #[error("invalid argument: \"level\" expects a string value, got {found}")]
    InvalidLevel { found: &'static str },
}

/// Error type returned when building a [`Config`](crate::config::Config).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("schema url must be an absolute http(s) url: {0}")]
    InvalidSchemaUrl(String),
}
