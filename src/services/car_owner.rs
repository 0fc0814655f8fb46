//! Car owner profile queries.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::car_owner::{CarOwnerProfile, UpdateCarProfile};

pub async fn get_profile(pool: &PgPool, owner_id: i32) -> Result<CarOwnerProfile, AppError> {
    sqlx::query_as::<_, CarOwnerProfile>(
        r#"
        SELECT id, first_name, last_name, gender, dob, phone_no, city, country, avatar_id
        FROM car_owners
        WHERE id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Car owner {owner_id} not found")))
}

/// Overwrite every editable field and return the stored profile.
pub async fn update_profile(
    pool: &PgPool,
    owner_id: i32,
    input: &UpdateCarProfile,
) -> Result<CarOwnerProfile, AppError> {
    let profile = sqlx::query_as::<_, CarOwnerProfile>(
        r#"
        UPDATE car_owners
        SET first_name = $2,
            last_name  = $3,
            gender     = $4,
            dob        = $5,
            phone_no   = $6,
            city       = $7,
            country    = $8,
            avatar_id  = $9
        WHERE id = $1
        RETURNING id, first_name, last_name, gender, dob, phone_no, city, country, avatar_id
        "#,
    )
    .bind(owner_id)
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(&input.gender)
    .bind(input.dob)
    .bind(&input.phone_no)
    .bind(&input.city)
    .bind(&input.country)
    .bind(input.avatar_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Car owner {owner_id} not found")))?;

    tracing::debug!(owner_id, "Car owner profile updated");
    Ok(profile)
}
