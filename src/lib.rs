//! # json_data
//!
//! An order-preserving JSON document builder and serializer, and the
//! `json-data` utility that uses it to dump a roguelike's static game data
//! (spells, spellbooks and unique artefacts) as a single JSON document.
//!
//! ## Key Features
//!
//! - **Order preserving**: array elements and object members are written in
//!   the order they were appended
//! - **Single ownership**: appends move the child into its parent, so a
//!   subtree can never be attached twice
//! - **Strict by default**: ill-formed UTF-8 and non-finite numbers fail the
//!   whole serialization instead of producing invalid JSON, with the JSON
//!   Pointer of the offending value in the error
//! - **Compact output**: no whitespace, integral numbers without a fractional
//!   part, non-ASCII text passed through unescaped
//!
//! ## Quick Start
//!
//! ```rust
//! use json_data::{to_string, Value};
//!
//! let mut spells = Value::array();
//! spells.append_element(Value::string("Magic Dart")).unwrap();
//! spells.append_element(Value::string("Summon Small Mammal")).unwrap();
//!
//! let mut book = Value::object();
//! book.append_member("name", Value::string("Book of Minor Magic")).unwrap();
//! book.append_member("spells", spells).unwrap();
//! book.append_member("value", Value::number(150.0)).unwrap();
//!
//! assert_eq!(
//!     to_string(&book).unwrap(),
//!     r#"{"name":"Book of Minor Magic","spells":["Magic Dart","Summon Small Mammal"],"value":150}"#
//! );
//! ```
//!
//! ### Dumping Game Data
//!
//! Game facts come from a [`GameDataSource`]; [`dump::build_document`] walks
//! it and assembles the document through the builder API:
//!
//! ```rust,no_run
//! use json_data::{dump, to_string, DumpOptions, TomlSource};
//!
//! let source = TomlSource::load("data/gamedata.toml").unwrap();
//! let document = dump::build_document(&source, &DumpOptions::default()).unwrap();
//! println!("{}", to_string(&document).unwrap());
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - A failed serialization produces no output at all
//! - No panics in public API

pub mod dump;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod source;
pub mod text;
pub mod value;

pub use dump::DumpOptions;
pub use error::{Error, Rejected, Result};
pub use map::Map;
pub use options::{DuplicateKeys, NonFinitePolicy, Utf8Policy, WriteOptions};
pub use ser::{Serializer, ValueSerializer};
pub use source::{BookFacts, GameDataSource, SpellFacts, TomlSource, UnrandFacts};
pub use text::Text;
pub use value::{Kind, Number, Value};

use serde::Serialize;
use std::io;

/// Serialize a [`Value`] to a compact JSON string.
///
/// # Examples
///
/// ```rust
/// use json_data::{to_string, Value};
///
/// assert_eq!(to_string(&Value::array()).unwrap(), "[]");
/// assert_eq!(to_string(&Value::object()).unwrap(), "{}");
/// ```
///
/// # Errors
///
/// Returns an error if a string is not valid UTF-8 or a number is not finite.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, WriteOptions::default())
}

/// Serialize a [`Value`] to an indented JSON string.
///
/// # Examples
///
/// ```rust
/// use json_data::{json, to_string_pretty};
///
/// let value = json!({"name": "Fire Storm", "level": 9});
/// assert_eq!(
///     to_string_pretty(&value).unwrap(),
///     "{\n  \"name\": \"Fire Storm\",\n  \"level\": 9\n}"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(value: &Value) -> Result<String> {
    to_string_with_options(value, WriteOptions::pretty())
}

/// Serialize a [`Value`] to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use json_data::{to_string_with_options, Utf8Policy, Value, WriteOptions};
///
/// let value = Value::string_from_bytes(b"caf\xE9".to_vec());
/// let options = WriteOptions::new().with_utf8_policy(Utf8Policy::Replace);
/// assert_eq!(to_string_with_options(&value, options).unwrap(), "\"caf\u{FFFD}\"");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: WriteOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize(value)?;
    Ok(serializer.into_inner())
}

/// Serialize a [`Value`] to a compact JSON byte vector.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_string(value).map(String::into_bytes)
}

/// Serialize a [`Value`] to a writer as compact JSON.
///
/// The document is rendered in memory first; nothing is written if
/// serialization fails.
///
/// # Examples
///
/// ```rust
/// use json_data::{to_writer, Value};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Value::from(true)).unwrap();
/// assert_eq!(buffer, b"true");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, value, WriteOptions::default())
}

/// Serialize a [`Value`] to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, value: &Value, options: WriteOptions) -> Result<()>
where
    W: io::Write,
{
    let json = to_string_with_options(value, options)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Struct fields and map entries become object members in serialization order.
///
/// # Examples
///
/// ```rust
/// use json_data::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Range { min: i32, max: i32 }
///
/// let value: Value = to_value(&Range { min: 1, max: 6 }).unwrap();
/// assert_eq!(json_data::to_string(&value).unwrap(), r#"{"min":1,"max":6}"#);
/// ```
///
/// # Errors
///
/// Returns an error if `T` contains something with no JSON counterpart,
/// such as a tuple variant or a map with non-string keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_string(&Value::array()).unwrap(), "[]");
        assert_eq!(to_string(&Value::object()).unwrap(), "{}");
        assert_eq!(to_string_pretty(&Value::object()).unwrap(), "{}");
    }

    #[test]
    fn test_escaping_quote_backslash_newline() {
        let value = Value::string("he said \"hi\"\\\n");
        assert_eq!(to_string(&value).unwrap(), r#""he said \"hi\"\\\n""#);
    }

    #[test]
    fn test_empty_object_is_stable() {
        let value = Value::object();
        let first = to_string(&value).unwrap();
        let second = to_string(&value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_infinity_is_rejected() {
        let value = Value::number(f64::INFINITY);
        assert_eq!(
            to_string(&value).unwrap_err(),
            Error::non_finite("", f64::INFINITY)
        );
    }

    #[test]
    fn test_non_finite_null_policy() {
        let value: Value = vec![Value::number(f64::NEG_INFINITY)].into();
        let options = WriteOptions::new().with_non_finite_policy(NonFinitePolicy::Null);
        assert_eq!(to_string_with_options(&value, options).unwrap(), "[null]");
    }

    #[test]
    fn test_writer_gets_nothing_on_failure() {
        let mut buffer = Vec::new();
        let mut value = Value::object();
        value.append_member("ok", Value::from(1)).unwrap();
        value
            .append_member("bad", Value::string_from_bytes(vec![0xFF]))
            .unwrap();
        assert!(to_writer(&mut buffer, &value).is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_to_vec() {
        assert_eq!(to_vec(&crate::json!([1, 2])).unwrap(), b"[1,2]".to_vec());
    }

    #[test]
    fn test_to_value_keeps_field_order() {
        #[derive(Serialize)]
        struct Noise {
            casting: u8,
            effect: u8,
        }

        let value = to_value(&Noise {
            casting: 2,
            effect: 8,
        })
        .unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["casting", "effect"]);
    }
}
