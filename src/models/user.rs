//! Login accounts and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::lot_owner::validate_owner_name;

/// Column width of `car_owners.first_name` and `last_name`, in characters.
const MAX_CAR_OWNER_NAME_PART: usize = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Admin,
    #[sqlx(rename = "Lot_Owner")]
    LotOwner,
    #[sqlx(rename = "Car_Owner")]
    CarOwner,
}

impl UserRole {
    /// Name carried in the JWT `role` claim.
    pub fn as_claim(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::LotOwner => "LotOwner",
            Self::CarOwner => "CarOwner",
        }
    }

    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "Admin" => Some(Self::Admin),
            "LotOwner" => Some(Self::LotOwner),
            "CarOwner" => Some(Self::CarOwner),
            _ => None,
        }
    }
}

/// Full account row (includes password_hash, never serialized).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account DTO without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
            last_login: u.last_login,
            created_at: u.created_at,
        }
    }
}

/// Admin request to open an account. Lot and car owners also get their
/// profile row from `name` and `phone_no`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_profile_name", skip_on_field_errors = false))]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 20))]
    pub phone_no: Option<String>,
}

impl CreateUser {
    /// Split the full name into first and last name for car owner profiles.
    pub fn first_and_last_name(&self) -> (&str, &str) {
        let name = self.name.trim();
        match name.split_once(char::is_whitespace) {
            Some((first, last)) => (first, last.trim()),
            None => (name, ""),
        }
    }
}

/// The name must still fit its profile columns once it is stored: upper-cased
/// for lot owners, split in two for car owners.
fn validate_profile_name(input: &CreateUser) -> Result<(), ValidationError> {
    match input.role {
        UserRole::LotOwner => validate_owner_name(&input.name),
        UserRole::CarOwner => {
            let (first, last) = input.first_and_last_name();
            if first.is_empty() {
                return Err(ValidationError::new("name_blank"));
            }
            if first.chars().count() > MAX_CAR_OWNER_NAME_PART
                || last.chars().count() > MAX_CAR_OWNER_NAME_PART
            {
                return Err(ValidationError::new("name_too_long"));
            }
            Ok(())
        }
        UserRole::Admin => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_user(name: &str) -> CreateUser {
        CreateUser {
            email: "owner@parklot.test".to_string(),
            password: "Password123!".to_string(),
            role: UserRole::CarOwner,
            name: name.to_string(),
            phone_no: None,
        }
    }

    #[test]
    fn user_role_serialization() {
        let json = serde_json::to_string(&UserRole::LotOwner).unwrap();
        assert_eq!(json, "\"LotOwner\"");
    }

    #[test]
    fn role_claim_round_trip() {
        for role in [UserRole::Admin, UserRole::LotOwner, UserRole::CarOwner] {
            assert_eq!(UserRole::from_claim(role.as_claim()), Some(role));
        }
        assert_eq!(UserRole::from_claim("Root"), None);
    }

    #[test]
    fn user_response_excludes_password() {
        let json = serde_json::to_string(&UserResponse {
            id: 1,
            email: "admin@parklot.test".to_string(),
            role: UserRole::Admin,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn splits_full_name() {
        assert_eq!(create_user("Ada Lovelace").first_and_last_name(), ("Ada", "Lovelace"));
        assert_eq!(
            create_user("  Jean Paul Sartre ").first_and_last_name(),
            ("Jean", "Paul Sartre")
        );
        assert_eq!(create_user("Plato").first_and_last_name(), ("Plato", ""));
    }

    #[test]
    fn create_user_validation() {
        assert!(create_user("Ada Lovelace").validate().is_ok());

        let mut bad = create_user("Ada");
        bad.email = "not-an-email".to_string();
        bad.password = "short".to_string();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn create_user_checks_stored_name() {
        let mut owner = create_user(&"ß".repeat(60));
        owner.role = UserRole::LotOwner;
        let errors = owner.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("__all__"));

        owner.name = "   ".to_string();
        assert!(owner.validate().is_err());

        owner.name = "Ada Parking".to_string();
        assert!(owner.validate().is_ok());

        assert!(create_user("  ").validate().is_err());
        assert!(create_user(&format!("{} Smith", "a".repeat(51))).validate().is_err());
    }
}
