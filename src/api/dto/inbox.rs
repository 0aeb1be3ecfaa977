use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::repos::inbox_repo::{STATUS_CLOSED, STATUS_OPEN};

use super::FieldError;

/// Public form submission. `data` is free-form; absent or null stores `{}`.
#[derive(Debug, Deserialize)]
pub struct CreateInboxRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

impl CreateInboxRequest {
    pub fn into_data(self) -> Result<Value, FieldError> {
        match self.data {
            None | Some(Value::Null) => Ok(Value::Object(Map::new())),
            Some(v @ Value::Object(_)) => Ok(v),
            Some(_) => Err(FieldError::new("INVALID_DATA", "data must be an object")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedInboxResponse {
    pub id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    pub fn status(&self) -> Result<&'static str, FieldError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Err(FieldError::new("STATUS_REQUIRED", "status is required")),
            Some(STATUS_OPEN) => Ok(STATUS_OPEN),
            Some(STATUS_CLOSED) => Ok(STATUS_CLOSED),
            Some(_) => Err(FieldError::new(
                "INVALID_STATUS",
                "status must be one of: open, closed",
            )),
        }
    }
}
