use serde::{Deserialize, Serialize};

use crate::repos::user_repo::Role;

use super::FieldError;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

impl UpdateRoleRequest {
    pub fn role(&self) -> Result<Role, FieldError> {
        let raw = self.role.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(FieldError::new("ROLE_REQUIRED", "role is required"));
        }
        raw.parse().map_err(|_| {
            FieldError::new(
                "INVALID_ROLE",
                "invalid role. must be one of: admin, sales, client",
            )
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub is_active: Option<bool>,
}

impl UpdateUserStatusRequest {
    pub fn is_active(&self) -> Result<bool, FieldError> {
        self.is_active
            .ok_or(FieldError::new("IS_ACTIVE_REQUIRED", "is_active is required"))
    }
}

/// `GET /admin/me`
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct RoleUpdatedResponse {
    pub uid: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdatedResponse {
    pub uid: String,
    pub is_active: bool,
}
