//! Interchange values.
//!
//! [`Value`] is the tagged union used to move terms and diff results across process and
//! language boundaries: numbers, booleans, strings, arrays, string-keyed dictionaries and null.
//!
//! Conversions with the host side are asymmetric:
//! - narrowing ([`Value::try_from_host`]) is best-effort and fails on the first element of a
//!   type it does not know;
//! - widening ([`Value::into_host`]) always succeeds.
//!
//! [`Value`] is itself a term (arrays are indexed, dictionaries keyed, everything else a leaf),
//! so it can be measured, compared and folded with the rest of the crate.
//!
//! Example
//! ```
//! use hyterm::prelude::*;
//! use hyterm::value::{HostValue, Value};
//!
//! let host: HostValue = Box::new(vec![
//!     Box::new(1.5f64) as HostValue,
//!     Box::new(String::from("x")) as HostValue,
//! ]);
//! let value = Value::try_from_host(host.as_ref()).unwrap();
//! assert_eq!(value, Value::Array(vec![Value::Number(1.5), Value::from("x")]));
//! assert_eq!(value.size(), 2);
//! ```
pub mod prism;

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use strum::{EnumDiscriminants, EnumIs};
use thiserror::Error;

use crate::syntax::{Key, Syntax};
use crate::term::TermType;

pub use prism::{Prism, ValueConvertible};

/// Type-erased value on the host side of the boundary.
pub type HostValue = Box<dyn Any + Send + Sync>;

pub type Array = Vec<Value>;
pub type Dictionary = BTreeMap<String, Value>;

/// An interchange value.
#[derive(Debug, Clone, PartialEq, Default, EnumIs, EnumDiscriminants)]
#[strum_discriminants(derive(PartialOrd, Ord, Hash))]
#[strum_discriminants(name(ValueKind))]
#[strum_discriminants(vis(pub))]
#[cfg_attr(
    feature = "serde",
    strum_discriminants(derive(serde::Serialize, serde::Deserialize))
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Number(f64),
    Boolean(bool),
    String(String),
    Array(Array),
    Dictionary(Dictionary),
    #[default]
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Unsupported host value at '{path}'")]
    UnsupportedHostValue { path: String },

    #[error("Expected a {expected:?} value, found {found:?}")]
    KindMismatch { expected: ValueKind, found: ValueKind },
}

pub type ValueResult<T> = Result<T, ValueError>;

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        ValueKind::from(self)
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Narrow a host value, or `None` if any part of it has no interchange counterpart.
    #[inline]
    pub fn from_host(host: &(dyn Any + Send + Sync)) -> Option<Value> {
        Self::try_from_host(host).ok()
    }

    /// Narrow a host value.
    ///
    /// Recognized host types: `f64`, `f32`, `i32`, `i64`, `u32`, `u64` (as numbers), `bool`,
    /// `String` and `&'static str`, `Vec<HostValue>`, `BTreeMap<String, HostValue>` and
    /// `HashMap<String, HostValue>`, and `()` as null. Containers are narrowed element by
    /// element, dictionaries in ascending key order; the error names the path of the first
    /// element that could not be narrowed. A [`HostValue`] passed by reference (`&host`) is
    /// looked through to the value it boxes.
    pub fn try_from_host(host: &(dyn Any + Send + Sync)) -> ValueResult<Value> {
        narrow(host, &mut String::from("$"))
    }

    /// Widen into a host value. Numbers become `f64`, strings `String`, arrays
    /// `Vec<HostValue>`, dictionaries `BTreeMap<String, HostValue>` and null `()`.
    pub fn into_host(self) -> HostValue {
        match self {
            Value::Number(n) => Box::new(n),
            Value::Boolean(b) => Box::new(b),
            Value::String(s) => Box::new(s),
            Value::Array(a) => Box::new(a.into_iter().map(Value::into_host).collect::<Vec<_>>()),
            Value::Dictionary(d) => Box::new(
                d.into_iter()
                    .map(|(k, v)| (k, v.into_host()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            Value::Null => Box::new(()),
        }
    }
}

fn narrow(host: &(dyn Any + Send + Sync), path: &mut String) -> ValueResult<Value> {
    if let Some(boxed) = host.downcast_ref::<HostValue>() {
        return narrow(boxed.as_ref(), path);
    }

    macro_rules! number {
        ($($t:ty),*) => {
            $(
                if let Some(n) = host.downcast_ref::<$t>() {
                    return Ok(Value::Number(*n as f64));
                }
            )*
        };
    }
    number!(f64, f32, i32, i64, u32, u64);

    if let Some(b) = host.downcast_ref::<bool>() {
        return Ok(Value::Boolean(*b));
    }
    if let Some(s) = host.downcast_ref::<String>() {
        return Ok(Value::String(s.clone()));
    }
    if let Some(s) = host.downcast_ref::<&'static str>() {
        return Ok(Value::String((*s).to_owned()));
    }
    if host.is::<()>() {
        return Ok(Value::Null);
    }
    if let Some(items) = host.downcast_ref::<Vec<HostValue>>() {
        let mut array = Array::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let len = path.len();
            path.push_str(&format!("[{i}]"));
            array.push(narrow(item.as_ref(), path)?);
            path.truncate(len);
        }
        return Ok(Value::Array(array));
    }
    if let Some(entries) = host.downcast_ref::<BTreeMap<String, HostValue>>() {
        return narrow_entries(entries.iter(), path);
    }
    if let Some(entries) = host.downcast_ref::<HashMap<String, HostValue>>() {
        let mut sorted: Vec<_> = entries.iter().collect();
        sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        return narrow_entries(sorted.into_iter(), path);
    }

    log::debug!("cannot narrow host value at '{path}': unsupported type");
    Err(ValueError::UnsupportedHostValue { path: path.clone() })
}

fn narrow_entries<'a>(
    entries: impl Iterator<Item = (&'a String, &'a HostValue)>,
    path: &mut String,
) -> ValueResult<Value> {
    let mut dictionary = Dictionary::new();
    for (key, item) in entries {
        let len = path.len();
        path.push('.');
        path.push_str(key);
        dictionary.insert(key.clone(), narrow(item.as_ref(), path)?);
        path.truncate(len);
    }
    Ok(Value::Dictionary(dictionary))
}

impl TermType for Value {
    /// Scalars are their own leaf payload.
    type Leaf = Value;

    fn unwrap(&self) -> Syntax<&Value, &Value> {
        match self {
            Value::Array(items) => Syntax::Indexed(items.iter().collect()),
            Value::Dictionary(entries) => Syntax::Keyed(
                entries
                    .iter()
                    .map(|(k, v)| (Key::from(k.as_str()), v))
                    .collect(),
            ),
            scalar => Syntax::Leaf(scalar),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Null => f.write_str("null"),
            Value::Array(_) | Value::Dictionary(_) => crate::pretty::fmt_term(self, f),
        }
    }
}

macro_rules! impl_value_conversions {
    ($t:ty, $variant:ident) => {
        impl From<$t> for Value {
            #[inline]
            fn from(v: $t) -> Self {
                Value::$variant(v)
            }
        }

        impl TryFrom<Value> for $t {
            type Error = ValueError;

            fn try_from(value: Value) -> ValueResult<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ValueError::KindMismatch {
                        expected: ValueKind::$variant,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_value_conversions!(f64, Number);
impl_value_conversions!(bool, Boolean);
impl_value_conversions!(String, String);
impl_value_conversions!(Array, Array);
impl_value_conversions!(Dictionary, Dictionary);

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Value::Null
    }
}
