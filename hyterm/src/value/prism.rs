//! Partial conversions between representations.
//!
//! A [`Prism<S, T>`] focuses an `S` on a `T` that may or may not be there: the forward
//! direction is partial (`&S -> Option<T>`), the backward direction total (`T -> S`). Prisms
//! compose with `>>`, failing forward as soon as any step fails.
//!
//! ```
//! use hyterm::value::{prism, Value};
//!
//! let title = prism::dictionary() >> prism::entry("title") >> prism::string();
//! let doc = Value::Dictionary([("title".to_owned(), Value::from("Doubt"))].into());
//! assert_eq!(title.forward(&doc), Some("Doubt".to_owned()));
//! assert_eq!(title.forward(&Value::Null), None);
//! ```
use std::ops::Shr;
use std::sync::Arc;

use crate::value::{Array, Dictionary, HostValue, Value};

type Forward<S, T> = dyn Fn(&S) -> Option<T> + Send + Sync;
type Backward<S, T> = dyn Fn(T) -> S + Send + Sync;

/// A partial forward and total backward conversion between `S` and `T`.
pub struct Prism<S, T> {
    forward: Arc<Forward<S, T>>,
    backward: Arc<Backward<S, T>>,
}

impl<S, T> Clone for Prism<S, T> {
    fn clone(&self) -> Self {
        Self {
            forward: Arc::clone(&self.forward),
            backward: Arc::clone(&self.backward),
        }
    }
}

impl<S: 'static, T: 'static> Prism<S, T> {
    pub fn new(
        forward: impl Fn(&S) -> Option<T> + Send + Sync + 'static,
        backward: impl Fn(T) -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            forward: Arc::new(forward),
            backward: Arc::new(backward),
        }
    }

    #[inline]
    pub fn forward(&self, source: &S) -> Option<T> {
        (self.forward)(source)
    }

    #[inline]
    pub fn backward(&self, target: T) -> S {
        (self.backward)(target)
    }

    /// Compose with `next`: forward runs `self` then `next`, backward runs `next` then `self`.
    pub fn then<U: 'static>(&self, next: &Prism<T, U>) -> Prism<S, U> {
        let (first, second) = (self.clone(), next.clone());
        let (first_back, second_back) = (self.clone(), next.clone());
        Prism::new(
            move |s| first.forward(s).and_then(|t| second.forward(&t)),
            move |u| first_back.backward(second_back.backward(u)),
        )
    }
}

impl<S: 'static, T: 'static, U: 'static> Shr<Prism<T, U>> for Prism<S, T> {
    type Output = Prism<S, U>;

    #[inline]
    fn shr(self, next: Prism<T, U>) -> Prism<S, U> {
        self.then(&next)
    }
}

/// Types with a total mapping to and from [`Value`].
pub trait ValueConvertible: Sized + 'static {
    fn from_value(value: Value) -> Self;

    fn to_value(&self) -> Value;

    /// The conversion as a prism. Forward always succeeds.
    fn converter() -> Prism<Self, Value> {
        Prism::new(|s: &Self| Some(s.to_value()), Self::from_value)
    }
}

impl ValueConvertible for Value {
    #[inline]
    fn from_value(value: Value) -> Self {
        value
    }

    #[inline]
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<S: 'static, T: ValueConvertible> Prism<S, T> {
    pub fn number(&self) -> Prism<S, f64> {
        self.then(&T::converter()).then(&number())
    }

    pub fn boolean(&self) -> Prism<S, bool> {
        self.then(&T::converter()).then(&boolean())
    }

    pub fn string(&self) -> Prism<S, String> {
        self.then(&T::converter()).then(&string())
    }

    pub fn array(&self) -> Prism<S, Array> {
        self.then(&T::converter()).then(&array())
    }

    pub fn dictionary(&self) -> Prism<S, Dictionary> {
        self.then(&T::converter()).then(&dictionary())
    }
}

/// Host values to interchange values. Forward narrows, backward widens.
pub fn host() -> Prism<HostValue, Value> {
    Prism::new(|h: &HostValue| Value::from_host(h.as_ref()), Value::into_host)
}

pub fn number() -> Prism<Value, f64> {
    Prism::new(Value::as_number, Value::Number)
}

pub fn boolean() -> Prism<Value, bool> {
    Prism::new(Value::as_boolean, Value::Boolean)
}

pub fn string() -> Prism<Value, String> {
    Prism::new(|v: &Value| v.as_str().map(str::to_owned), Value::String)
}

pub fn array() -> Prism<Value, Array> {
    Prism::new(|v: &Value| v.as_array().cloned(), Value::Array)
}

pub fn dictionary() -> Prism<Value, Dictionary> {
    Prism::new(|v: &Value| v.as_dictionary().cloned(), Value::Dictionary)
}

/// Focus on one entry of a dictionary. Backward builds a single-entry dictionary.
pub fn entry(key: impl Into<String>) -> Prism<Dictionary, Value> {
    let key = key.into();
    let back = key.clone();
    Prism::new(
        move |d: &Dictionary| d.get(&key).cloned(),
        move |v| Dictionary::from([(back.clone(), v)]),
    )
}
