use opentelemetry_sdk::logs::SdkLoggerProvider;

use crate::global;
use crate::tracing_bridge::TracingLogProcessor;

/// Console output configuration for [`init_console_with_config`].
///
/// **Fields**
/// - `ansi`: colorize output when the terminal supports it.
/// - `with_target`: print the event target next to each line.
/// - `install_global_provider`: also install a global provider whose only
///   processor is [`TracingLogProcessor`], so loggers built without an
///   explicit provider print to the console.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub ansi: bool,
    pub with_target: bool,
    pub install_global_provider: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            ansi: true,
            with_target: false,
            install_global_provider: true,
        }
    }
}

/// Install a `tracing_subscriber` fmt subscriber as the global default.
///
/// **Returns**
/// - `Err(..)` if a global subscriber was already set.
pub fn init_console_with_config(
    config: ConsoleConfig,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.install_global_provider {
        let provider = SdkLoggerProvider::builder()
            .with_log_processor(TracingLogProcessor)
            .build();
        global::set_logger_provider(provider);
    }
    Ok(())
}

/// Equivalent to [`init_console_with_config`] with
/// [`ConsoleConfig::default`].
pub fn init_console() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    init_console_with_config(ConsoleConfig::default())
}
