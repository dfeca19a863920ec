use std::collections::HashMap;

use opentelemetry::logs::AnyValue;
use opentelemetry::Key;
use tracing::debug;

use crate::value::Value;

/// Convert a dynamically-typed [`Value`] into an OpenTelemetry [`AnyValue`].
///
/// Never fails. `None` is the empty value: `Nil` and a null pointer. Empty
/// list elements and map entries are dropped, and callers skip an empty
/// top-level attribute.
///
/// Shapes without a typed counterpart degrade to a string: structs and
/// times render as text, and anything unrecognized becomes a diagnostic
/// `unhandled attribute type` message. Unsigned 64-bit integers (`u64`,
/// `usize`) always take the diagnostic path, whatever their magnitude.
pub fn convert_value(value: &Value) -> Option<AnyValue> {
    let converted = match value {
        Value::Bool(v) => AnyValue::Boolean(*v),
        Value::Bytes(v) => AnyValue::Bytes(Box::new(v.clone())),
        Value::F64(v) => AnyValue::Double(*v),
        Value::Int(v) => AnyValue::Int(*v as i64),
        Value::I64(v) => AnyValue::Int(*v),
        Value::Str(v) => AnyValue::from(v.clone()),

        Value::Nil | Value::Ptr(None) => return None,

        Value::Struct(s) => AnyValue::from(s.to_string()),
        Value::Time(_) | Value::Context(_) => AnyValue::from(value.to_string()),

        Value::Seq(items) => {
            AnyValue::ListAny(Box::new(items.iter().filter_map(convert_value).collect()))
        }

        Value::Map(entries) => {
            let map: HashMap<Key, AnyValue> = entries
                .iter()
                .filter_map(|(k, v)| Some((Key::new(render_key(k)), convert_value(v)?)))
                .collect();
            AnyValue::Map(Box::new(map))
        }

        Value::Ptr(Some(inner)) => return convert_value(inner),
        Value::Lazy(valuer) => return convert_value(&valuer.resolve()),

        Value::U64(_) | Value::Unhandled { .. } => {
            debug!(value_type = value.type_name(), "falling back to string rendering");
            AnyValue::from(format!(
                "unhandled attribute type: ({}) {}",
                value.type_name(),
                value
            ))
        }
    };
    Some(converted)
}

/// Render a map key. Structs use their field dump, everything else its
/// default text form.
fn render_key(key: &Value) -> String {
    match key {
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    }
}
