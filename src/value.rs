//! Dynamically-typed input values accepted by a [`Log`](crate::logger::Log)
//! call.
//!
//! [`Value`] is the closed set of shapes the converter knows how to walk:
//! primitives, sequences, maps, single-level indirection and records.
//! Everything else is captured up front as [`Value::Unhandled`] with its
//! type name and `Debug` rendering, so a caller can always pass something.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::Context;

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Bytes(Vec<u8>),
    F64(f64),
    /// Native pointer-width integer.
    Int(isize),
    I64(i64),
    U64(u64),
    Str(String),
    Time(DateTime<Utc>),
    Context(Context),
    Struct(StructValue),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
    /// One level of optional indirection; `None` is a null pointer.
    Ptr(Option<Box<Value>>),
    /// Computed when the call is logged, not when it is built.
    Lazy(Valuer),
    Unhandled {
        type_name: &'static str,
        repr: String,
    },
}

/// A record whose fields are rendered, not recursed into, when it becomes
/// an attribute.
#[derive(Debug, Clone)]
pub struct StructValue {
    pub fields: Vec<(String, Value)>,
}

/// Deferred value, resolved once per log call. A `with` prefix holding a
/// valuer yields a fresh value on every call.
#[derive(Clone)]
pub struct Valuer(Arc<dyn Fn() -> Value + Send + Sync>);

impl Valuer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Valuer(Arc::new(f))
    }

    pub fn resolve(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Valuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Valuer")
    }
}

/// Current UTC time, read at log time. Meant for a `ts` prefix on a
/// contextual logger.
pub fn timestamp_utc() -> Value {
    Value::lazy(|| Value::Time(Utc::now()))
}

impl Value {
    pub fn structure<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Struct(StructValue {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn ptr(inner: impl Into<Value>) -> Self {
        Value::Ptr(Some(Box::new(inner.into())))
    }

    pub fn null_ptr() -> Self {
        Value::Ptr(None)
    }

    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Lazy(Valuer::new(f))
    }

    /// Resolve a [`Value::Lazy`]; any other value is returned as is.
    pub fn resolved(&self) -> std::borrow::Cow<'_, Value> {
        match self {
            Value::Lazy(valuer) => std::borrow::Cow::Owned(valuer.resolve()),
            other => std::borrow::Cow::Borrowed(other),
        }
    }

    /// Capture a value of any other type by name and `Debug` output.
    pub fn unhandled<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Unhandled {
            type_name: std::any::type_name::<T>(),
            repr: format!("{:?}", value),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::F64(_) => "f64",
            Value::Int(_) => "isize",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            Value::Str(_) => "string",
            Value::Time(_) => "time",
            Value::Context(_) => "context",
            Value::Struct(_) => "struct",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
            Value::Ptr(_) => "pointer",
            Value::Lazy(_) => "valuer",
            Value::Unhandled { type_name, .. } => *type_name,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for StructValue {
    /// Field dump: `{field:value other:value}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", name, value)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil | Value::Ptr(None) => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bytes(b) => {
                f.write_str("[")?;
                for (i, byte) in b.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", byte)?;
                }
                f.write_str("]")
            }
            Value::F64(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Context(cx) => write!(f, "{:?}", cx),
            Value::Struct(s) => write!(f, "{}", s),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                f.write_str("]")
            }
            Value::Ptr(Some(inner)) => write!(f, "{}", inner),
            Value::Lazy(valuer) => write!(f, "{}", valuer.resolve()),
            Value::Unhandled { repr, .. } => f.write_str(repr),
        }
    }
}

macro_rules! impl_from_lossless {
    ($variant:ident, $target:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_lossless!(I64, i64, i8, i16, i32, i64, u8, u16, u32);
impl_from_lossless!(F64, f64, f32, f64);
impl_from_lossless!(U64, u64, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::U64(value as u64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(value)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        Value::seq(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value)
    }
}

impl From<Context> for Value {
    fn from(value: Context) -> Self {
        Value::Context(value)
    }
}

impl From<Valuer> for Value {
    fn from(value: Valuer) -> Self {
        Value::Lazy(value)
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Value::Struct(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Ptr(value.map(|v| Box::new(v.into())))
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(value: HashMap<K, V, S>) -> Self {
        Value::map(value)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Value::map(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::seq(items),
            serde_json::Value::Object(map) => Value::map(map),
        }
    }
}

/// Build a `Vec<Value>` of alternating keys and values.
///
/// ```
/// use kvlog_otel::keyvals;
///
/// let kv = keyvals!["level", "info", "user", "alice", "attempt", 3];
/// assert_eq!(kv.len(), 6);
/// ```
#[macro_export]
macro_rules! keyvals {
    () => {
        ::std::vec::Vec::<$crate::value::Value>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::Value::from($item)),+]
    };
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;

    #[test]
    fn integers_widen() {
        assert!(matches!(Value::from(7i32), Value::I64(7)));
        assert!(matches!(Value::from(7u8), Value::I64(7)));
        assert!(matches!(Value::from(7isize), Value::Int(7)));
        assert!(matches!(Value::from(u64::MAX), Value::U64(u64::MAX)));
    }

    #[test]
    fn option_becomes_pointer() {
        assert!(matches!(Value::from(None::<i64>), Value::Ptr(None)));
        let Value::Ptr(Some(inner)) = Value::from(Some("x")) else {
            panic!("expected pointer");
        };
        assert_eq!(inner.as_str(), Some("x"));
    }

    #[test]
    fn struct_field_dump() {
        let v = Value::structure([("name", Value::from("alice")), ("age", Value::from(3))]);
        assert_eq!(v.to_string(), "{name:alice age:3}");
    }

    #[test]
    fn bytes_render_as_decimal_list() {
        assert_eq!(Value::from(vec![1u8, 2]).to_string(), "[1 2]");
        assert_eq!(Value::from(Vec::<u8>::new()).to_string(), "[]");
    }

    #[test]
    fn unhandled_captures_type_name() {
        let v = Value::unhandled(&std::time::Duration::from_secs(1));
        match v {
            Value::Unhandled { type_name, repr } => {
                assert!(type_name.ends_with("Duration"));
                assert_eq!(repr, "1s");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn json_objects_become_maps() {
        let v = Value::from(serde_json::json!({"a": [1, "two"], "b": null}));
        let Value::Map(entries) = v else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 2);
        let rendered: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        assert!(rendered.contains(&"a=[1 two]".to_string()));
        assert!(rendered.contains(&"b=null".to_string()));
    }

    #[test]
    fn macro_builds_pairs() {
        let kv = keyvals!["level", "info", "n", 1];
        assert_eq!(kv[0].as_str(), Some("level"));
        assert!(matches!(kv[3], Value::I64(1)));
        assert!(keyvals![].is_empty());
    }

    #[test]
    fn lazy_values_resolve_on_each_read() {
        let counter = Arc::new(AtomicI64::new(0));
        let source = Arc::clone(&counter);
        let v = Value::lazy(move || Value::I64(source.fetch_add(1, Ordering::SeqCst)));

        assert!(matches!(*v.resolved(), Value::I64(0)));
        assert!(matches!(*v.resolved(), Value::I64(1)));
        assert_eq!(v.type_name(), "valuer");
        assert_eq!(format!("{:?}", v), "Lazy(Valuer)");
    }

    #[test]
    fn timestamp_utc_is_read_at_resolve_time() {
        let v = timestamp_utc();
        let before = Utc::now();
        let Value::Time(ts) = v.resolved().into_owned() else {
            panic!("expected time");
        };
        assert!(ts >= before);
    }
}
