use serde::ser::Serializer as _;
use serde_json::ser::Serializer;

use crate::errors::WriteResult;
use crate::value::OrderedValue;

/// Compact JSON writer.
///
/// Strings - object keys included - are escaped by delegating to serde_json's serializer;
/// numbers are emitted as their raw text.
pub(crate) struct JsonWriter {
    vec: Vec<u8>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self {
            vec: Vec::with_capacity(128),
        }
    }

    pub fn write_value(&mut self, value: &OrderedValue<'_>) -> WriteResult<()> {
        match value {
            OrderedValue::Null => self.vec.extend_from_slice(b"null"),
            OrderedValue::Bool(true) => self.vec.extend_from_slice(b"true"),
            OrderedValue::Bool(false) => self.vec.extend_from_slice(b"false"),
            OrderedValue::Number(n) => self.vec.extend_from_slice(n.as_str().as_bytes()),
            OrderedValue::Str(s) => self.write_str(s)?,
            OrderedValue::Array(array) => {
                self.vec.push(b'[');
                let mut first = true;
                for value in array.iter() {
                    if first {
                        first = false;
                    } else {
                        self.vec.push(b',');
                    }
                    self.write_value(value)?;
                }
                self.vec.push(b']');
            }
            OrderedValue::Object(object) => {
                self.vec.push(b'{');
                let mut first = true;
                for (key, value) in object {
                    if first {
                        first = false;
                    } else {
                        self.vec.push(b',');
                    }
                    self.write_key(key)?;
                    self.write_value(value)?;
                }
                self.vec.push(b'}');
            }
        }
        Ok(())
    }

    fn write_key(&mut self, key: &str) -> WriteResult<()> {
        self.write_str(key)?;
        self.vec.push(b':');
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> WriteResult<()> {
        let mut ser = Serializer::new(&mut self.vec);
        ser.serialize_str(s).map_err(Into::into)
    }
}

impl From<JsonWriter> for Vec<u8> {
    fn from(writer: JsonWriter) -> Self {
        writer.vec
    }
}
