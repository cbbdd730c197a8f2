//! The JSON document tree.
//!
//! This module provides the [`Value`] enum, the node type of an in-memory JSON
//! document, together with the construction primitives and the append
//! operations used to grow a document bottom-up.
//!
//! ## Core Types
//!
//! - [`Value`]: null, boolean, number, string, array or object
//! - [`Number`]: the single numeric kind, an `f64`
//! - [`Kind`]: the tag of a value, used in error reporting
//!
//! ## Building a Document
//!
//! Leaves are created first and moved into their containers:
//!
//! ```rust
//! use json_data::Value;
//!
//! let mut schools = Value::object();
//! schools.append_member("Conjurations", Value::bool(true)).unwrap();
//!
//! let mut spell = Value::object();
//! spell.append_member("name", Value::string("Magic Dart")).unwrap();
//! spell.append_member("level", Value::number(1.0)).unwrap();
//! spell.append_member("schools", schools).unwrap();
//!
//! assert_eq!(
//!     json_data::to_string(&spell).unwrap(),
//!     r#"{"name":"Magic Dart","level":1,"schools":{"Conjurations":true}}"#
//! );
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use json_data::{Kind, Value};
//!
//! let value = Value::from(42);
//! assert!(value.is_number());
//! assert_eq!(value.kind(), Kind::Number);
//! ```

use crate::error::Rejected;
use crate::{Map, Text};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A node of a JSON document.
///
/// The tag of a value is fixed once it is constructed. Containers only grow
/// through [`Value::append_element`] and [`Value::append_member`], which move
/// the child in, so a subtree always has exactly one parent.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Text),
    Array(Vec<Value>),
    Object(Map),
}

/// The tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON number.
///
/// There is a single numeric kind backed by `f64`. Any value can be stored,
/// including NaN and the infinities; those have no JSON representation and
/// are dealt with by the serializer according to [`crate::NonFinitePolicy`].
///
/// # Examples
///
/// ```rust
/// use json_data::Number;
///
/// assert_eq!(Number::from(3.0).to_string(), "3");
/// assert_eq!(Number::from(0.1).to_string(), "0.1");
/// assert_eq!(Number::from(1e21).to_string(), "1e21");
/// assert_eq!(Number::from(3.0).as_i64(), Some(3));
/// assert!(!Number::from(f64::NAN).is_finite());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Number(f64);

impl Number {
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Number(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Returns `true` unless the number is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Returns `true` for finite numbers with no fractional part.
    #[inline]
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    /// Converts to `i64` when the number is integral and within range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::Number;
    ///
    /// assert_eq!(Number::from(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::from(42.5).as_i64(), None);
    /// assert_eq!(Number::from(f64::INFINITY).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integral() && self.0 >= i64::MIN as f64 && self.0 < i64::MAX as f64 {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

/// Formats the shortest decimal that reads back as the same `f64`.
///
/// Integral values carry no fractional part. Very large and very small
/// magnitudes switch to exponent form, the same thresholds ECMAScript uses.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            return f.write_str("NaN");
        }
        if x.is_infinite() {
            return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
        }
        let magnitude = x.abs();
        if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
            write!(f, "{:e}", x)
        } else {
            write!(f, "{}", x)
        }
    }
}

macro_rules! impl_number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(value as f64)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number(value as f64))
                }
            }
        )*
    };
}

// i64/u64 beyond 2^53 lose precision, same as any f64-backed JSON number.
impl_number_from!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl Value {
    /// Creates a null value.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Value::Null
    }

    #[inline]
    #[must_use]
    pub const fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    /// Creates a number. NaN and the infinities are accepted here and
    /// rejected (or mapped) by the serializer.
    #[inline]
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Value::Number(Number(value))
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(Text::from(value.into()))
    }

    /// Creates a string from raw bytes without validating them.
    ///
    /// Ill-formed UTF-8 is reported when the document is serialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::{to_string, Error, Value};
    ///
    /// let value = Value::string_from_bytes(vec![0xFF, 0xFE]);
    /// assert!(matches!(to_string(&value), Err(Error::InvalidEncoding { .. })));
    /// ```
    #[must_use]
    pub fn string_from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::String(Text::from_bytes(bytes))
    }

    /// Creates an empty array.
    #[inline]
    #[must_use]
    pub const fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Creates an empty object.
    #[must_use]
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// Appends `value` at the end of this array.
    ///
    /// # Errors
    ///
    /// Fails when `self` is not an array. The returned [`Rejected`] hands
    /// `value` back, and `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::Value;
    ///
    /// let mut spells = Value::array();
    /// spells.append_element(Value::from("Magic Dart")).unwrap();
    /// spells.append_element(Value::from("Freeze")).unwrap();
    /// assert_eq!(json_data::to_string(&spells).unwrap(), r#"["Magic Dart","Freeze"]"#);
    /// ```
    pub fn append_element(&mut self, value: Value) -> Result<(), Rejected> {
        match self {
            Value::Array(elements) => {
                elements.push(value);
                Ok(())
            }
            other => Err(Rejected::new(Kind::Array, other.kind(), value)),
        }
    }

    /// Appends the member `key: value` at the end of this object.
    ///
    /// The member is appended even when `key` is already present; how
    /// duplicates are written out is decided by [`crate::DuplicateKeys`].
    ///
    /// # Errors
    ///
    /// Fails when `self` is not an object, handing `value` back.
    pub fn append_member(&mut self, key: impl Into<String>, value: Value) -> Result<(), Rejected> {
        match self {
            Value::Object(members) => {
                members.append(key.into(), value);
                Ok(())
            }
            other => Err(Rejected::new(Kind::Object, other.kind(), value)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is an integral number that fits in `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a well-formed UTF-8 string, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::string_from_bytes(vec![0xFF]).as_str(), None);
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.as_str(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a member of an object (the last one appended under `key`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl fmt::Display for Value {
    /// Renders compact JSON. Values the serializer would reject are rendered
    /// lossily here (ill-formed text replaced, non-finite numbers as `null`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = crate::WriteOptions::new()
            .with_utf8_policy(crate::Utf8Policy::Replace)
            .with_non_finite_policy(crate::NonFinitePolicy::Null);
        let rendered = crate::to_string_with_options(self, options).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(n.as_f64()),
            Value::String(s) => match s.to_str() {
                Ok(s) => serializer.serialize_str(s),
                Err(e) => Err(serde::ser::Error::custom(format!(
                    "invalid UTF-8 in string: valid up to byte {}",
                    e.valid_up_to()
                ))),
            },
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::string(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::string(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::string_from_bytes(value))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Value::string_from_bytes(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut members = Map::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    members.append(key, value);
                }
                Ok(Value::Object(members))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", n))),
            other => Err(crate::Error::type_mismatch(Kind::Number, other.kind())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(crate::Error::type_mismatch(Kind::Number, other.kind())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(crate::Error::type_mismatch(Kind::Bool, other.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => s.into_string().map_err(|e| {
                crate::Error::invalid_encoding("", e.utf8_error().valid_up_to())
            }),
            other => Err(crate::Error::type_mismatch(Kind::String, other.kind())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Text::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Text::from(value))
    }
}

impl From<Text> for Value {
    fn from(value: Text) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}
