//! Car owner profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct CarOwnerProfile {
    #[serde(rename = "ID")]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    #[serde(rename = "DOB")]
    pub dob: Option<NaiveDate>,
    pub phone_no: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "AvatarID")]
    pub avatar_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCarProfile {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub last_name: String,
    #[validate(length(max = 10))]
    pub gender: Option<String>,
    #[serde(rename = "DOB")]
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub phone_no: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[serde(rename = "AvatarID")]
    #[validate(range(min = 1))]
    pub avatar_id: Option<i32>,
}
