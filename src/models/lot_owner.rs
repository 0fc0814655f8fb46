//! Lot owner profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Column width of `lot_owners.name`, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Stored form of a lot owner name: trimmed and upper-cased.
pub fn normalize_owner_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Checks the stored form, which can be longer than the input ("ß" -> "SS").
pub fn validate_owner_name(name: &str) -> Result<(), ValidationError> {
    let normalized = normalize_owner_name(name);
    if normalized.is_empty() {
        return Err(ValidationError::new("name_blank"));
    }
    if normalized.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::new("name_too_long"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct LotOwnerProfile {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    pub phone_no: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Full overwrite of the editable profile fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateProfile {
    #[validate(custom(function = "validate_owner_name"))]
    pub name: String,
    #[validate(length(min = 7, max = 20))]
    pub phone_no: String,
}

impl UpdateProfile {
    /// Names are stored upper-cased.
    pub fn normalized_name(&self) -> String {
        normalize_owner_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_pascal_case_body() {
        let body: UpdateProfile =
            serde_json::from_str(r#"{"Name":"ada lovelace","PhoneNo":"03001234567"}"#).unwrap();
        assert_eq!(body.phone_no, "03001234567");
        assert_eq!(body.normalized_name(), "ADA LOVELACE");
        assert!(body.validate().is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let body = UpdateProfile {
            name: String::new(),
            phone_no: "03001234567".to_string(),
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn rejects_blank_name() {
        let body = UpdateProfile {
            name: "   ".to_string(),
            phone_no: "03001234567".to_string(),
        };
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn name_length_checked_after_upper_casing() {
        // 60 characters in, 120 once upper-cased.
        let body = UpdateProfile {
            name: "ß".repeat(60),
            phone_no: "03001234567".to_string(),
        };
        assert_eq!(body.normalized_name().chars().count(), 120);
        assert!(body.validate().is_err());

        let body = UpdateProfile {
            name: format!("  {}  ", "a".repeat(MAX_NAME_CHARS)),
            phone_no: "03001234567".to_string(),
        };
        assert!(body.validate().is_ok());
    }

    #[test]
    fn profile_uses_column_style_keys() {
        let json = serde_json::to_value(LotOwnerProfile {
            id: 7,
            name: "ADA".to_string(),
            phone_no: None,
            email: "ada@parklot.test".to_string(),
            created_at: Utc::now(),
        })
        .unwrap();
        assert_eq!(json["ID"], 7);
        assert_eq!(json["Name"], "ADA");
        assert!(json["PhoneNo"].is_null());
    }
}
