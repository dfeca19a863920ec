//! Bridge from key-value logging calls to OpenTelemetry log records.
//!
//! Callers log a flat sequence of alternating keys and values. Each call is
//! assembled into one record through the `opentelemetry` logs API: the `ts`
//! key sets the timestamp, the `level` key sets the severity, an
//! [`opentelemetry::Context`] value under any key becomes the ambient
//! context, and every other pair becomes a typed attribute.
//!
//! ```
//! use kvlog_otel::{keyvals, Config, Log, OtelLogger};
//! use opentelemetry_sdk::logs::SdkLoggerProvider;
//!
//! let provider = SdkLoggerProvider::builder().build();
//! let logger = OtelLogger::new("my/module", Config::new().with_logger_provider(provider));
//!
//! logger.log(&keyvals!["level", "info", "user", "alice"]).unwrap();
//! assert!(logger.log(&keyvals!["dangling"]).is_err());
//! ```

pub mod config;
pub mod convert;
pub mod env;
pub mod error;
pub mod global;
pub mod logger;
pub mod severity;
pub mod tracing_bridge;
pub mod value;

#[cfg(feature = "console")]
pub mod init;

pub use config::Config;
pub use convert::convert_value;
pub use error::{ConfigError, LogError};
pub use global::GlobalLoggerProvider;
pub use logger::{assemble, with, Log, OtelLogger, With};
pub use tracing_bridge::TracingLogProcessor;
pub use value::{timestamp_utc, StructValue, Value, Valuer};
