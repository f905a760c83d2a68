use serde::de::{self, DeserializeOwned};
use serde_json::{Deserializer, Value};

use crate::error::FsError;

/// Materializes an operation's argument structure from the raw request body.
pub struct Decoder<'a> {
    body: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Decoder { body }
    }

    /// Bodies that are not JSON at all fail with `FsError::Malformed`.
    /// JSON that does not fit `T` fails with `FsError::Decode`. Only the first
    /// value is read; anything after it is ignored.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FsError> {
        let value = match Deserializer::from_slice(self.body).into_iter::<Value>().next() {
            Some(value) => value.map_err(FsError::Malformed)?,
            None => {
                return Err(FsError::Malformed(de::Error::custom("EOF while parsing a value")));
            }
        };
        if !value.is_object() {
            return Err(FsError::Decode(format!(
                "invalid type: {}, expected an object",
                kind_of(&value)
            )));
        }
        serde_json::from_value(value).map_err(|err| FsError::Decode(err.to_string()))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
