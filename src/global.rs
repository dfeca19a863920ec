//! Process-wide default logger provider.
//!
//! `opentelemetry::global` only carries tracer and meter providers, so the
//! logs side keeps its own slot here. Loggers configured with
//! [`GlobalLoggerProvider`] resolve it when they are constructed. Until
//! [`set_logger_provider`] is called the slot holds an SDK provider with no
//! processors, which drops every record.

use std::sync::OnceLock;

use opentelemetry::logs::LoggerProvider;
use opentelemetry::InstrumentationScope;
use opentelemetry_sdk::logs::{SdkLogger, SdkLoggerProvider};
use parking_lot::RwLock;

static GLOBAL_PROVIDER: OnceLock<RwLock<SdkLoggerProvider>> = OnceLock::new();

fn global() -> &'static RwLock<SdkLoggerProvider> {
    GLOBAL_PROVIDER.get_or_init(|| RwLock::new(SdkLoggerProvider::builder().build()))
}

/// Current global provider.
pub fn logger_provider() -> SdkLoggerProvider {
    global().read().clone()
}

/// Replace the global provider and return the previous one. Loggers that
/// already resolved the previous provider keep using it.
pub fn set_logger_provider(provider: SdkLoggerProvider) -> SdkLoggerProvider {
    std::mem::replace(&mut *global().write(), provider)
}

/// [`LoggerProvider`] that defers to whatever provider is global when a
/// logger is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLoggerProvider;

impl LoggerProvider for GlobalLoggerProvider {
    type Logger = SdkLogger;

    fn logger_with_scope(&self, scope: InstrumentationScope) -> Self::Logger {
        logger_provider().logger_with_scope(scope)
    }
}
