use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use crate::error::FsError;

/// Return values of a successful operation, in order.
pub type Values = Vec<Value>;

/// The `[error, ...values]` array answered for every dispatched operation.
///
/// The error slot is `null` exactly when the operation succeeded, and values
/// only follow a `null` error slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTuple {
    error: Option<String>,
    values: Values,
}

impl ResultTuple {
    pub fn success(values: Values) -> Self {
        ResultTuple {
            error: None,
            values,
        }
    }

    pub fn failure(err: &FsError) -> Self {
        ResultTuple {
            error: Some(err.to_string()),
            values: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl Serialize for ResultTuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1 + self.values.len()))?;
        seq.serialize_element(&self.error)?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
