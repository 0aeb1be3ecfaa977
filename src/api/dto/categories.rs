use serde::Deserialize;
use uuid::Uuid;

use super::FieldError;

/// Create and update share one shape.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
    pub parent_id: Option<Uuid>,
}

impl CategoryRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.name.trim().is_empty() {
            return Err(FieldError::new("NAME_REQUIRED", "name is required"));
        }
        Ok(())
    }
}
