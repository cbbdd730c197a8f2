//! JSON serialization.
//!
//! This module provides two serializers:
//!
//! - [`Serializer`] renders a [`Value`] tree to JSON text
//! - [`ValueSerializer`] is a `serde` serializer that turns any `T: Serialize`
//!   into a [`Value`] tree (see [`crate::to_value`])
//!
//! ## Output Format
//!
//! The tree is walked depth-first. Array elements and object members are
//! written in the order they were appended, with nothing reordered or
//! deduplicated unless [`WriteOptions::duplicate_keys`] says otherwise.
//!
//! Compact output contains no whitespace at all. Pretty output puts each
//! element and member on its own line; empty containers stay `[]` and `{}`.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use json_data::{Serializer, Value, WriteOptions};
//!
//! let mut serializer = Serializer::new(WriteOptions::new());
//!
//! let value: Value = vec![Value::from(1), Value::from(2), Value::from(3)].into();
//! serializer.serialize(&value).unwrap();
//!
//! assert_eq!(serializer.into_inner(), "[1,2,3]");
//! ```
//!
//! A failed call leaves the output exactly as it was before the call.

use crate::{Error, Map, NonFinitePolicy, Number, Result, Text, Utf8Policy, Value, WriteOptions};
use log::warn;
use serde::{ser, Serialize};

/// One step from the document root towards the value being written.
#[derive(Clone, Copy, Debug)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Renders a path as a JSON Pointer (RFC 6901).
fn pointer(path: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('/');
        match segment {
            Segment::Key(key) => {
                for ch in key.chars() {
                    match ch {
                        '~' => out.push_str("~0"),
                        '/' => out.push_str("~1"),
                        _ => out.push(ch),
                    }
                }
            }
            Segment::Index(index) => out.push_str(&index.to_string()),
        }
    }
    out
}

/// The JSON text serializer.
///
/// Created via [`Serializer::new`]; each call to [`Serializer::serialize`]
/// appends one rendered document to the internal buffer.
pub struct Serializer {
    output: String,
    options: WriteOptions,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    /// Renders `value` onto the end of the buffer.
    ///
    /// # Errors
    ///
    /// Fails on ill-formed UTF-8, non-finite numbers or duplicate keys,
    /// depending on the configured policies. Nothing is appended on failure.
    pub fn serialize(&mut self, value: &Value) -> Result<()> {
        let start = self.output.len();
        let mut path = Vec::new();
        let result = self.write_value(value, &mut path, 0);
        if result.is_err() {
            self.output.truncate(start);
        }
        result
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_value<'v>(
        &mut self,
        value: &'v Value,
        path: &mut Vec<Segment<'v>>,
        depth: usize,
    ) -> Result<()> {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_number(*n, path)?,
            Value::String(text) => self.write_text(text, path)?,
            Value::Array(elements) => self.write_array(elements, path, depth)?,
            Value::Object(members) => self.write_object(members, path, depth)?,
        }
        Ok(())
    }

    fn write_number(&mut self, number: Number, path: &[Segment<'_>]) -> Result<()> {
        if number.is_finite() {
            self.output.push_str(&number.to_string());
            return Ok(());
        }
        match self.options.non_finite {
            NonFinitePolicy::Reject => Err(Error::non_finite(&pointer(path), number.as_f64())),
            NonFinitePolicy::Null => {
                warn!("writing null for non-finite number {} at {}", number, pointer(path));
                self.output.push_str("null");
                Ok(())
            }
        }
    }

    fn write_text(&mut self, text: &Text, path: &[Segment<'_>]) -> Result<()> {
        match text.to_str() {
            Ok(s) => write_escaped(&mut self.output, s),
            Err(e) => match self.options.utf8 {
                Utf8Policy::Reject => {
                    return Err(Error::invalid_encoding(&pointer(path), e.valid_up_to()))
                }
                Utf8Policy::Replace => {
                    warn!(
                        "replacing ill-formed UTF-8 after byte {} at {}",
                        e.valid_up_to(),
                        pointer(path)
                    );
                    write_escaped(&mut self.output, &text.to_str_lossy());
                }
            },
        }
        Ok(())
    }

    fn write_array<'v>(
        &mut self,
        elements: &'v [Value],
        path: &mut Vec<Segment<'v>>,
        depth: usize,
    ) -> Result<()> {
        if elements.is_empty() {
            self.output.push_str("[]");
            return Ok(());
        }

        self.output.push('[');
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_indent(depth + 1);
            path.push(Segment::Index(i));
            self.write_value(element, path, depth + 1)?;
            path.pop();
        }
        self.write_indent(depth);
        self.output.push(']');
        Ok(())
    }

    fn write_object<'v>(
        &mut self,
        members: &'v Map,
        path: &mut Vec<Segment<'v>>,
        depth: usize,
    ) -> Result<()> {
        if members.is_empty() {
            self.output.push_str("{}");
            return Ok(());
        }

        let resolved = members
            .resolved(self.options.duplicate_keys)
            .map_err(|key| Error::duplicate_key(&pointer(path), key))?;

        self.output.push('{');
        for (i, (key, value)) in resolved.into_iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_indent(depth + 1);
            write_escaped(&mut self.output, key);
            self.output.push(':');
            if self.options.pretty {
                self.output.push(' ');
            }
            path.push(Segment::Key(key));
            self.write_value(value, path, depth + 1)?;
            path.pop();
        }
        self.write_indent(depth);
        self.output.push('}');
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) {
        if self.options.pretty {
            self.output.push('\n');
            for _ in 0..depth * self.options.indent {
                self.output.push(' ');
            }
        }
    }
}

/// Writes `s` as a quoted JSON string.
///
/// Only `"`, `\` and the C0 control characters are escaped; every other
/// character is copied through as UTF-8.
fn write_escaped(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\u{0020}' => output.push_str(&format!("\\u{:04x}", c as u32)),
            c => output.push(c),
        }
    }
    output.push('"');
}

/// A `serde` serializer producing [`Value`] trees.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

/// `{variant: value}` wrapping used for newtype variants.
fn tagged(variant: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.append(variant.to_string(), value);
    Value::Object(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::string(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::string(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(v.iter().map(|&b| Value::from(b)).collect())
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::string(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_json_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::custom(format!(
            "tuple variant `{}` cannot be converted to a JSON value",
            variant
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::custom(format!(
            "struct variant `{}` cannot be converted to a JSON value",
            variant
        )))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_json_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_json_value(key)? {
            Value::String(text) => {
                let key = text
                    .into_string()
                    .map_err(|_| Error::custom("map key is not valid UTF-8"))?;
                self.current_key = Some(key);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "map keys must be strings, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.append(key, to_json_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.append(key.to_string(), to_json_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DuplicateKeys;

    fn render(value: &Value, options: WriteOptions) -> Result<String> {
        let mut serializer = Serializer::new(options);
        serializer.serialize(value)?;
        Ok(serializer.into_inner())
    }

    fn obj(members: Vec<(&str, Value)>) -> Value {
        let mut value = Value::object();
        for (k, v) in members {
            value.append_member(k, v).unwrap();
        }
        value
    }

    #[test]
    fn test_scalars() {
        let compact = WriteOptions::new();
        assert_eq!(render(&Value::Null, compact.clone()).unwrap(), "null");
        assert_eq!(render(&Value::bool(true), compact.clone()).unwrap(), "true");
        assert_eq!(render(&Value::bool(false), compact.clone()).unwrap(), "false");
        assert_eq!(render(&Value::number(3.0), compact.clone()).unwrap(), "3");
        assert_eq!(render(&Value::number(-0.5), compact).unwrap(), "-0.5");
    }

    #[test]
    fn test_control_characters() {
        let value = Value::string("\u{0}\u{1f}\u{8}\u{c}\r\t");
        assert_eq!(
            render(&value, WriteOptions::new()).unwrap(),
            r#""\u0000\u001f\b\f\r\t""#
        );
    }

    #[test]
    fn test_non_ascii_passes_through() {
        let value = Value::string("Ölgrün 🗡 \u{2028}");
        assert_eq!(
            render(&value, WriteOptions::new()).unwrap(),
            "\"Ölgrün 🗡 \u{2028}\""
        );
    }

    #[test]
    fn test_pointer_escaping() {
        let path = [Segment::Key("a/b"), Segment::Index(2), Segment::Key("m~n")];
        assert_eq!(pointer(&path), "/a~1b/2/m~0n");
        assert_eq!(pointer(&[]), "");
    }

    #[test]
    fn test_error_path_points_at_offender() {
        let mut list = Value::array();
        list.append_element(Value::from("ok")).unwrap();
        list.append_element(Value::string_from_bytes(vec![b'x', 0xC0])).unwrap();
        let doc = obj(vec![("spells", obj(vec![("Fire/Ice", list)]))]);

        let err = render(&doc, WriteOptions::new()).unwrap_err();
        assert_eq!(err, Error::invalid_encoding("/spells/Fire~1Ice/1", 1));
    }

    #[test]
    fn test_failed_call_leaves_buffer_untouched() {
        let mut serializer = Serializer::new(WriteOptions::new());
        serializer.serialize(&Value::from(1)).unwrap();
        let bad = obj(vec![("x", Value::number(f64::NAN))]);
        assert!(serializer.serialize(&bad).is_err());
        assert_eq!(serializer.into_inner(), "1");
    }

    #[test]
    fn test_pretty_layout() {
        let doc = obj(vec![
            ("name", Value::from("Orb of Dispater")),
            ("flags", obj(vec![("EVIL", Value::bool(true))])),
            ("tags", Value::array()),
            ("list", vec![Value::from(1), Value::from(2)].into()),
        ]);
        let expected = "{\n  \"name\": \"Orb of Dispater\",\n  \"flags\": {\n    \"EVIL\": true\n  },\n  \"tags\": [],\n  \"list\": [\n    1,\n    2\n  ]\n}";
        assert_eq!(render(&doc, WriteOptions::pretty()).unwrap(), expected);
    }

    #[test]
    fn test_pretty_custom_indent() {
        let doc: Value = vec![Value::Null].into();
        assert_eq!(
            render(&doc, WriteOptions::pretty().with_indent(4)).unwrap(),
            "[\n    null\n]"
        );
    }

    #[test]
    fn test_duplicate_key_policies() {
        let doc = obj(vec![
            ("a", Value::from(1)),
            ("b", Value::from(2)),
            ("a", Value::from(3)),
        ]);
        let with = |policy| render(&doc, WriteOptions::new().with_duplicate_keys(policy));
        assert_eq!(with(DuplicateKeys::Keep).unwrap(), r#"{"a":1,"b":2,"a":3}"#);
        assert_eq!(with(DuplicateKeys::FirstWins).unwrap(), r#"{"a":1,"b":2}"#);
        assert_eq!(with(DuplicateKeys::LastWins).unwrap(), r#"{"a":3,"b":2}"#);
        assert_eq!(
            with(DuplicateKeys::Reject).unwrap_err(),
            Error::duplicate_key("", "a")
        );
    }

    #[derive(Serialize)]
    enum Brand {
        Plain,
        Charged(u8),
        Pair(u8, u8),
    }

    #[derive(Serialize)]
    struct Artefact {
        name: &'static str,
        charges: Option<u32>,
        brand: Brand,
        weight: f32,
    }

    #[test]
    fn test_value_serializer_struct() {
        let value = Artefact {
            name: "Wrath of Trog",
            charges: None,
            brand: Brand::Plain,
            weight: 1.5,
        }
        .serialize(ValueSerializer)
        .unwrap();
        assert_eq!(
            render(&value, WriteOptions::new()).unwrap(),
            r#"{"name":"Wrath of Trog","charges":null,"brand":"Plain","weight":1.5}"#
        );
    }

    #[test]
    fn test_value_serializer_variants() {
        let value = Brand::Charged(3).serialize(ValueSerializer).unwrap();
        assert_eq!(render(&value, WriteOptions::new()).unwrap(), r#"{"Charged":3}"#);
        assert!(Brand::Pair(1, 2).serialize(ValueSerializer).is_err());
    }
}
