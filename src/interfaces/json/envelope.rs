use crate::error::{PayrollError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// `{ "success": bool, "message": string, ...payload }`
#[derive(Debug, Serialize, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    #[serde(skip)]
    status: u16,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Map::new(),
            status: 200,
        }
    }

    pub fn failure(error: &PayrollError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            payload: Map::new(),
            status: error.status_code(),
        }
    }

    /// Adds a payload entry next to `success` and `message`.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| PayrollError::storage("encoding response", e))?;
        self.payload.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}
