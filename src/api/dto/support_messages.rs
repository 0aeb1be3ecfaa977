use serde::Deserialize;

use crate::repos::support_message_repo::SenderType;

use super::FieldError;

/// `POST /supports/{id}/messages`. `sender_type` defaults to `client`.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub message: Option<String>,
    pub sender_type: Option<String>,
}

impl CreateMessageRequest {
    pub fn message(&self) -> Result<&str, FieldError> {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => Ok(m),
            _ => Err(FieldError::new("MESSAGE_REQUIRED", "message is required")),
        }
    }

    pub fn sender_type(&self) -> Result<SenderType, FieldError> {
        match self.sender_type.as_deref().map(str::trim) {
            None | Some("") => Ok(SenderType::Client),
            Some(raw) => raw.parse().map_err(|_| {
                FieldError::new(
                    "INVALID_SENDER_TYPE",
                    "invalid sender_type. must be one of: client, admin",
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(message: Option<&str>, sender_type: Option<&str>) -> CreateMessageRequest {
        CreateMessageRequest {
            message: message.map(str::to_string),
            sender_type: sender_type.map(str::to_string),
        }
    }

    #[test]
    fn blank_message_is_required() {
        assert_eq!(req(None, None).message().unwrap_err().code, "MESSAGE_REQUIRED");
        assert_eq!(
            req(Some("  "), None).message().unwrap_err().code,
            "MESSAGE_REQUIRED"
        );
        assert_eq!(req(Some("hi"), None).message(), Ok("hi"));
    }

    #[test]
    fn sender_type_defaults_to_client() {
        assert_eq!(req(Some("hi"), None).sender_type(), Ok(SenderType::Client));
        assert_eq!(req(Some("hi"), Some("")).sender_type(), Ok(SenderType::Client));
        assert_eq!(
            req(Some("hi"), Some("admin")).sender_type(),
            Ok(SenderType::Admin)
        );
        assert_eq!(
            req(Some("hi"), Some("sales")).sender_type().unwrap_err().code,
            "INVALID_SENDER_TYPE"
        );
    }
}
