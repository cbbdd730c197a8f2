//! Error types for building and serializing JSON documents.
//!
//! ## Error Categories
//!
//! - **Type Mismatches**: an append targeted a value that is not the expected container
//! - **Invalid Encoding**: a string payload is not well-formed UTF-8 at serialization time
//! - **Non-finite Numbers**: NaN or infinity reached the serializer
//! - **Duplicate Keys**: only raised when duplicates are configured to be rejected
//! - **I/O Errors**: the output sink failed
//!
//! Serialization errors carry the location of the offending value as a
//! JSON Pointer, so a failed dump can name the exact member that broke it.
//!
//! ## Examples
//!
//! ```rust
//! use json_data::{to_string, Error, Value};
//!
//! let mut doc = Value::object();
//! doc.append_member("speed", Value::number(f64::INFINITY)).unwrap();
//!
//! match to_string(&doc) {
//!     Err(Error::NonFiniteNumber { path, .. }) => assert_eq!(path, "/speed"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use crate::value::{Kind, Value};
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the builder and the serializer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An append targeted a value of the wrong kind.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A string payload is not well-formed UTF-8.
    #[error("Invalid UTF-8 in string at {}: valid up to byte {valid_up_to}", display_path(.path))]
    InvalidEncoding { path: String, valid_up_to: usize },

    /// A number has no JSON representation.
    #[error("Non-finite number {value} at {}", display_path(.path))]
    NonFiniteNumber { path: String, value: f64 },

    /// An object repeats a key and duplicates are configured to be rejected.
    #[error("Duplicate key \"{key}\" at {}", display_path(.path))]
    DuplicateKey { path: String, key: String },

    /// IO error while writing the rendered document
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::{Error, Kind};
    ///
    /// let err = Error::type_mismatch(Kind::Array, Kind::Object);
    /// assert_eq!(err.to_string(), "Type mismatch: expected array, found object");
    /// ```
    pub fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub fn invalid_encoding(path: &str, valid_up_to: usize) -> Self {
        Error::InvalidEncoding {
            path: path.to_string(),
            valid_up_to,
        }
    }

    pub fn non_finite(path: &str, value: f64) -> Self {
        Error::NonFiniteNumber {
            path: path.to_string(),
            value,
        }
    }

    pub fn duplicate_key(path: &str, key: &str) -> Self {
        Error::DuplicateKey {
            path: path.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// JSON Pointer of the offending value, for errors raised while serializing.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::InvalidEncoding { path, .. }
            | Error::NonFiniteNumber { path, .. }
            | Error::DuplicateKey { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// A failed append.
///
/// Appends take the child by value. When the target is not the right kind of
/// container, the child comes back inside this error untouched, so neither
/// operand is lost or modified.
///
/// # Examples
///
/// ```rust
/// use json_data::{Kind, Value};
///
/// let mut target = Value::object();
/// let rejected = target.append_element(Value::from("orphan")).unwrap_err();
///
/// assert_eq!(rejected.found(), Kind::Object);
/// assert_eq!(rejected.into_value(), Value::from("orphan"));
/// assert_eq!(target, Value::object());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot append to {found}: expected {expected}")]
pub struct Rejected {
    expected: Kind,
    found: Kind,
    value: Value,
}

impl Rejected {
    pub(crate) fn new(expected: Kind, found: Kind, value: Value) -> Self {
        Rejected {
            expected,
            found,
            value,
        }
    }

    /// The container kind the append required.
    #[must_use]
    pub fn expected(&self) -> Kind {
        self.expected
    }

    /// The kind of the value the append was attempted on.
    #[must_use]
    pub fn found(&self) -> Kind {
        self.found
    }

    /// Returns the value that was not appended.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl From<Rejected> for Error {
    fn from(rejected: Rejected) -> Self {
        Error::TypeMismatch {
            expected: rejected.expected,
            found: rejected.found,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
