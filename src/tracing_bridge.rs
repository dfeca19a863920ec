use chrono::{DateTime, Utc};
use opentelemetry::logs::{AnyValue, Severity};
use opentelemetry::InstrumentationScope;
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::logs::{LogProcessor, SdkLogRecord};

/// Log processor that re-emits every record as a `tracing` event.
///
/// Severity maps onto the nearest `tracing` level (`Trace*`/`Debug*` to
/// `DEBUG`, `Error*` and `Fatal*` to `ERROR`, no severity to `INFO`).
/// Attributes are attached as a JSON string, so whatever subscriber is
/// installed (see [`init_console`](crate::init::init_console)) decides the
/// final format.
#[derive(Clone, Debug, Default)]
pub struct TracingLogProcessor;

impl LogProcessor for TracingLogProcessor {
    fn emit(&self, record: &mut SdkLogRecord, scope: &InstrumentationScope) {
        let attributes = attributes_json(record);
        let scope = scope.name();
        let severity_text = record.severity_text().unwrap_or_default();
        let timestamp = record
            .timestamp()
            .map(|t| DateTime::<Utc>::from(t).to_rfc3339())
            .unwrap_or_default();
        let trace_id = record
            .trace_context()
            .map(|tc| tc.trace_id.to_string())
            .unwrap_or_default();

        macro_rules! forward {
            ($level:ident) => {
                tracing::$level!(
                    scope,
                    severity_text,
                    timestamp = timestamp.as_str(),
                    trace_id = trace_id.as_str(),
                    attributes = attributes.as_str(),
                    "log record"
                )
            };
        }

        match record.severity_number().map(|s| s as i32) {
            Some(n) if n >= Severity::Error as i32 => forward!(error),
            Some(n) if n >= Severity::Warn as i32 => forward!(warn),
            Some(n) if n >= Severity::Info as i32 => forward!(info),
            Some(_) => forward!(debug),
            None => forward!(info),
        }
    }

    fn force_flush(&self) -> OTelSdkResult {
        Ok(())
    }

    fn shutdown(&self) -> OTelSdkResult {
        Ok(())
    }
}

fn attributes_json(record: &SdkLogRecord) -> String {
    let object: serde_json::Map<String, serde_json::Value> = record
        .attributes_iter()
        .map(|(k, v)| (k.as_str().to_string(), any_value_json(v)))
        .collect();
    serde_json::Value::Object(object).to_string()
}

fn any_value_json(value: &AnyValue) -> serde_json::Value {
    match value {
        AnyValue::Boolean(b) => serde_json::Value::from(*b),
        AnyValue::Int(i) => serde_json::Value::from(*i),
        AnyValue::Double(d) => serde_json::Value::from(*d),
        AnyValue::String(s) => serde_json::Value::from(s.as_str()),
        AnyValue::Bytes(b) => serde_json::Value::from(b.as_slice()),
        AnyValue::ListAny(items) => items.iter().map(any_value_json).collect(),
        AnyValue::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.as_str().to_string(), any_value_json(v)))
                .collect(),
        ),
        _ => serde_json::Value::Null,
    }
}
