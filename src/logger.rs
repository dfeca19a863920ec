use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;
use opentelemetry::logs::{LogRecord, Logger, LoggerProvider};
use opentelemetry::trace::TraceContextExt;
use opentelemetry::{Context, Key};
use opentelemetry_sdk::logs::SdkLogger;
use tracing::{trace, warn};

use crate::config::Config;
use crate::convert::convert_value;
use crate::error::LogError;
use crate::severity::{from_level, severity_text};
use crate::value::Value;

/// Reserved key whose value becomes the record timestamp.
pub const TIMESTAMP_KEY: &str = "ts";

/// Reserved key whose value becomes the record severity.
pub const LEVEL_KEY: &str = "level";

/// Placeholder appended by [`with`] when given an odd number of keyvals.
pub const MISSING_VALUE: &str = "(MISSING)";

/// Key/value logging interface: `keyvals` alternates keys and values.
pub trait Log {
    fn log(&self, keyvals: &[Value]) -> Result<(), LogError>;
}

impl<L: Log + ?Sized> Log for &L {
    fn log(&self, keyvals: &[Value]) -> Result<(), LogError> {
        (**self).log(keyvals)
    }
}

impl<L: Log + ?Sized> Log for Arc<L> {
    fn log(&self, keyvals: &[Value]) -> Result<(), LogError> {
        (**self).log(keyvals)
    }
}

/// [`Log`] implementation that turns every call into one OpenTelemetry log
/// record and emits it through a provider-supplied [`Logger`].
///
/// The logger remembers the last [`Context`] passed as a value in any call
/// and uses it for every following record until another context replaces
/// it. A call that carries a context always emits with that context, even
/// when other threads swap in their own concurrently. The context is
/// attached for the duration of the emit and a valid span in it sets the
/// record's trace context.
pub struct OtelLogger<L = SdkLogger> {
    logger: L,
    cx: ArcSwap<Context>,
}

impl<L: Logger> OtelLogger<L> {
    /// Create a logger for the component `name`, which should be a stable
    /// identifier such as the module path doing the logging.
    pub fn new<P>(name: impl Into<String>, config: Config<P>) -> Self
    where
        P: LoggerProvider<Logger = L>,
    {
        Self {
            logger: config.logger(name),
            cx: ArcSwap::from_pointee(Context::new()),
        }
    }

    /// Context that will be used for the next record without its own.
    pub fn context(&self) -> Context {
        Context::clone(&self.cx.load())
    }
}

impl<L: Logger> Log for OtelLogger<L> {
    fn log(&self, keyvals: &[Value]) -> Result<(), LogError> {
        let mut record = self.logger.create_log_record();
        let cx = assemble(keyvals, &mut record).map_err(|err| {
            warn!(error = %err, "rejected log call");
            err
        })?;

        let cx = match cx {
            Some(cx) => {
                let cx = Arc::new(cx);
                self.cx.store(Arc::clone(&cx));
                cx
            }
            None => self.cx.load_full(),
        };

        let span = cx.span();
        let span_context = span.span_context();
        if span_context.is_valid() {
            record.set_trace_context(
                span_context.trace_id(),
                span_context.span_id(),
                Some(span_context.trace_flags()),
            );
        }

        trace!(pairs = keyvals.len() / 2, "emitting log record");
        let _guard = Context::clone(&cx).attach();
        self.logger.emit(record);
        Ok(())
    }
}

/// Fill `record` from `keyvals`.
///
/// Returns the last context value found, if any. Fails on the first
/// contract violation; the caller then drops the partly filled record, so
/// a call is either fully emitted or not at all. Lazy values are resolved
/// here, once per call.
pub fn assemble<R: LogRecord>(
    keyvals: &[Value],
    record: &mut R,
) -> Result<Option<Context>, LogError> {
    if keyvals.len() % 2 != 0 {
        return Err(LogError::OddKeyvals(keyvals.len()));
    }

    let mut cx = None;

    for (i, pair) in keyvals.chunks_exact(2).enumerate() {
        let k = pair[0].resolved();
        let key = k.as_str().ok_or(LogError::NonStringKey {
            index: i * 2,
            found: k.type_name(),
        })?;
        let v = pair[1].resolved();

        if key == TIMESTAMP_KEY {
            match &*v {
                Value::Time(ts) => record.set_timestamp(SystemTime::from(*ts)),
                other => {
                    return Err(LogError::InvalidTimestamp {
                        found: other.type_name(),
                    })
                }
            }
            continue;
        }

        if let Value::Context(value) = &*v {
            cx = Some(value.clone());
            continue;
        }

        if key == LEVEL_KEY {
            match &*v {
                Value::Str(level) => {
                    if let Some(severity) = from_level(level) {
                        record.set_severity_number(severity);
                    }
                    record.set_severity_text(severity_text(level));
                }
                other => {
                    return Err(LogError::InvalidLevel {
                        found: other.type_name(),
                    })
                }
            }
            continue;
        }

        if let Some(value) = convert_value(&v) {
            record.add_attribute(Key::new(key.to_owned()), value);
        }
    }

    Ok(cx)
}

/// A [`Log`] that prepends a fixed set of keyvals to every call.
pub struct With<L> {
    inner: L,
    prefix: Vec<Value>,
}

/// Wrap `inner` so every call also carries `keyvals`. An odd-length prefix
/// is padded with [`MISSING_VALUE`].
pub fn with<L: Log>(inner: L, keyvals: Vec<Value>) -> With<L> {
    With {
        inner,
        prefix: pad_missing(keyvals),
    }
}

fn pad_missing(mut keyvals: Vec<Value>) -> Vec<Value> {
    if keyvals.len() % 2 != 0 {
        keyvals.push(Value::from(MISSING_VALUE));
    }
    keyvals
}

impl<L: Log> With<L> {
    /// Add more keyvals to an already contextual logger.
    pub fn with(self, keyvals: Vec<Value>) -> With<L> {
        let mut prefix = self.prefix;
        prefix.extend(pad_missing(keyvals));
        With {
            inner: self.inner,
            prefix,
        }
    }
}

impl<L: Log> Log for With<L> {
    fn log(&self, keyvals: &[Value]) -> Result<(), LogError> {
        let mut all = Vec::with_capacity(self.prefix.len() + keyvals.len());
        all.extend_from_slice(&self.prefix);
        all.extend_from_slice(keyvals);
        self.inner.log(&all)
    }
}
