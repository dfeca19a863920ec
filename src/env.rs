//! Variables read by [`Config::from_env`]. Nothing else in the crate
//! touches the process environment.
//!
//! [`Config::from_env`]: crate::config::Config::from_env

/// Instrumentation version attached to emitted records' scope.
pub const KVLOG_OTEL_VERSION_ENV: &str = "KVLOG_OTEL_VERSION";

/// Semantic-conventions schema URL attached to emitted records' scope.
pub const KVLOG_OTEL_SCHEMA_URL_ENV: &str = "KVLOG_OTEL_SCHEMA_URL";

/// Value of `key`, or `default` when it is unset or not valid unicode.
pub fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) => value,
        Err(_) => default.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(env_or("KVLOG_OTEL_SURELY_UNSET_FOR_TESTS", "fallback"), "fallback");
    }
}
