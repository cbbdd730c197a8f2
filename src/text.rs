//! String payloads whose UTF-8 validity is checked at serialization time.
//!
//! Text handed over by a data source is not always trustworthy: a description
//! table may carry bytes in a legacy encoding. [`Text`] stores the raw bytes
//! so a document can be assembled without failing early, and the serializer
//! decides what to do with ill-formed input (see [`crate::Utf8Policy`]).

use std::borrow::Cow;
use std::fmt;
use std::str::Utf8Error;

/// Byte-backed text payload of a JSON string value.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Text(Vec<u8>);

impl Text {
    #[must_use]
    pub fn new() -> Self {
        Text(Vec::new())
    }

    /// Wraps raw bytes without validating them.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Text(bytes.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the payload as `&str` if it is well-formed UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// Returns the decoder error describing where the first ill-formed sequence starts.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// Decodes the payload, replacing ill-formed sequences with U+FFFD.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    #[must_use]
    pub fn is_valid_utf8(&self) -> bool {
        self.as_str().is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Converts into a `String`, handing the bytes back on failure.
    ///
    /// # Errors
    ///
    /// Fails when the payload is not well-formed UTF-8.
    pub fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.0)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => write!(f, "Text({:?})", self.0),
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text(value.into_bytes())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Text {
    fn from(value: Vec<u8>) -> Self {
        Text(value)
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_text() {
        let text = Text::from("Fulminant Prism");
        assert_eq!(text.as_str(), Some("Fulminant Prism"));
        assert!(text.is_valid_utf8());
        assert_eq!(text, "Fulminant Prism");
    }

    #[test]
    fn test_invalid_bytes_are_kept() {
        let text = Text::from_bytes(vec![b'o', b'k', 0xC3, 0x28]);
        assert_eq!(text.as_str(), None);
        assert_eq!(text.len(), 4);
        assert_eq!(text.to_str().unwrap_err().valid_up_to(), 2);
        assert_eq!(text.to_str_lossy(), "ok\u{FFFD}(");
    }

    #[test]
    fn test_debug_of_invalid_text() {
        let text = Text::from_bytes(vec![0xFF]);
        assert_eq!(format!("{:?}", text), "Text([255])");
    }
}
