//! Configuration options for JSON output.
//!
//! This module provides types to customize how a document is written:
//!
//! - [`WriteOptions`]: main configuration struct
//! - [`Utf8Policy`]: what to do with string payloads that are not valid UTF-8
//! - [`NonFinitePolicy`]: what to do with NaN and the infinities
//! - [`DuplicateKeys`]: what to do with object keys appended more than once
//!
//! The defaults produce compact output and refuse to emit anything that is
//! not valid JSON.
//!
//! ## Examples
//!
//! ```rust
//! use json_data::{to_string_with_options, NonFinitePolicy, Value, WriteOptions};
//!
//! let value: Value = vec![Value::from(1), Value::number(f64::NAN)].into();
//!
//! let options = WriteOptions::new().with_non_finite_policy(NonFinitePolicy::Null);
//! assert_eq!(to_string_with_options(&value, options).unwrap(), "[1,null]");
//! ```

/// Handling of string payloads that are not well-formed UTF-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    /// Fail the whole serialization with [`crate::Error::InvalidEncoding`].
    #[default]
    Reject,
    /// Replace each ill-formed sequence with U+FFFD.
    Replace,
}

/// Handling of numbers that have no JSON representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Fail the whole serialization with [`crate::Error::NonFiniteNumber`].
    #[default]
    Reject,
    /// Write `null` in place of the number.
    Null,
}

/// Handling of object keys that were appended more than once.
///
/// The builder always keeps every appended member; this decides what the
/// output contains. `FirstWins` and `LastWins` place the surviving member at
/// the position where its key first appeared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Write every member as appended.
    #[default]
    Keep,
    FirstWins,
    LastWins,
    /// Fail with [`crate::Error::DuplicateKey`].
    Reject,
}

/// Configuration options for writing JSON.
///
/// # Examples
///
/// ```rust
/// use json_data::{DuplicateKeys, Utf8Policy, WriteOptions};
///
/// // Compact, strict output
/// let options = WriteOptions::new();
///
/// // Indented with 2 spaces
/// let options = WriteOptions::pretty();
///
/// // Custom configuration
/// let options = WriteOptions::pretty()
///     .with_indent(4)
///     .with_utf8_policy(Utf8Policy::Replace)
///     .with_duplicate_keys(DuplicateKeys::LastWins);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub pretty: bool,
    pub indent: usize,
    pub utf8: Utf8Policy,
    pub non_finite: NonFinitePolicy,
    pub duplicate_keys: DuplicateKeys,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            pretty: false,
            indent: 2,
            utf8: Utf8Policy::default(),
            non_finite: NonFinitePolicy::default(),
            duplicate_keys: DuplicateKeys::default(),
        }
    }
}

impl WriteOptions {
    /// Creates default options (compact, strict).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::WriteOptions;
    ///
    /// let options = WriteOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level. Only affects pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_utf8_policy(mut self, policy: Utf8Policy) -> Self {
        self.utf8 = policy;
        self
    }

    #[must_use]
    pub fn with_non_finite_policy(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }
}
