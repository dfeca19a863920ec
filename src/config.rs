use opentelemetry::logs::LoggerProvider;
use opentelemetry::InstrumentationScope;

use crate::env::{env_or, KVLOG_OTEL_SCHEMA_URL_ENV, KVLOG_OTEL_VERSION_ENV};
use crate::error::ConfigError;
use crate::global::GlobalLoggerProvider;

/// Construction options for an [`OtelLogger`](crate::logger::OtelLogger).
///
/// **Fields**
/// - `version`: instrumentation version, normally the version of the
///   package doing the logging.
/// - `schema_url`: semantic-conventions schema URL of the attributes used.
/// - `provider`: set through [`Config::with_logger_provider`]; defaults to
///   [`GlobalLoggerProvider`].
///
/// Empty strings are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct Config<P = GlobalLoggerProvider> {
    pub version: Option<String>,
    pub schema_url: Option<String>,
    provider: P,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `KVLOG_OTEL_VERSION` and `KVLOG_OTEL_SCHEMA_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new().with_version(env_or(KVLOG_OTEL_VERSION_ENV, ""));
        let schema_url = env_or(KVLOG_OTEL_SCHEMA_URL_ENV, "");
        if schema_url.is_empty() {
            Ok(config)
        } else {
            config.try_with_schema_url(schema_url)
        }
    }
}

impl<P> Config<P> {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(version.into());
        self
    }

    pub fn with_schema_url(mut self, schema_url: impl Into<String>) -> Self {
        self.schema_url = non_empty(schema_url.into());
        self
    }

    /// Like [`Config::with_schema_url`] but rejects anything that is not an
    /// absolute `http://` or `https://` URL.
    pub fn try_with_schema_url(self, schema_url: impl Into<String>) -> Result<Self, ConfigError> {
        let schema_url = schema_url.into();
        let valid = ["http://", "https://"]
            .iter()
            .any(|scheme| schema_url.len() > scheme.len() && schema_url.starts_with(scheme));
        if !valid {
            return Err(ConfigError::InvalidSchemaUrl(schema_url));
        }
        Ok(self.with_schema_url(schema_url))
    }

    pub fn with_logger_provider<Q: LoggerProvider>(self, provider: Q) -> Config<Q> {
        Config {
            version: self.version,
            schema_url: self.schema_url,
            provider,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn scope(&self, name: impl Into<String>) -> InstrumentationScope {
        let mut builder = InstrumentationScope::builder(name.into());
        if let Some(version) = &self.version {
            builder = builder.with_version(version.clone());
        }
        if let Some(schema_url) = &self.schema_url {
            builder = builder.with_schema_url(schema_url.clone());
        }
        builder.build()
    }
}

impl<P: LoggerProvider> Config<P> {
    /// Ask the provider for a logger scoped to `name`.
    pub(crate) fn logger(&self, name: impl Into<String>) -> P::Logger {
        self.provider.logger_with_scope(self.scope(name))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::logs::SdkLoggerProvider;

    use super::*;

    #[test]
    fn scope_carries_metadata() {
        let scope = Config::new()
            .with_version("1.2.3")
            .with_schema_url("https://opentelemetry.io/schemas/1.21.0")
            .scope("my/module");

        assert_eq!(scope.name(), "my/module");
        assert_eq!(scope.version(), Some("1.2.3"));
        assert_eq!(scope.schema_url(), Some("https://opentelemetry.io/schemas/1.21.0"));
    }

    #[test]
    fn empty_strings_are_unset() {
        let config = Config::new().with_version("").with_schema_url("");
        assert_eq!(config.version, None);
        assert_eq!(config.schema_url, None);

        let scope = config.scope("x");
        assert_eq!(scope.version(), None);
        assert_eq!(scope.schema_url(), None);
    }

    #[test]
    fn schema_url_validation() {
        assert!(Config::new().try_with_schema_url("https://example.com/s").is_ok());
        assert_eq!(
            Config::new().try_with_schema_url("ftp://x").unwrap_err(),
            ConfigError::InvalidSchemaUrl("ftp://x".to_string())
        );
        assert!(Config::new().try_with_schema_url("https://").is_err());
    }

    #[test]
    fn provider_swap_keeps_metadata() {
        let config = Config::new()
            .with_version("2.0.0")
            .with_logger_provider(SdkLoggerProvider::builder().build());
        assert_eq!(config.version.as_deref(), Some("2.0.0"));
        assert_eq!(config.scope("x").version(), Some("2.0.0"));
    }
}
