//! Lot owner profile queries.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::lot::UpdateOutcome;
use crate::models::lot_owner::{LotOwnerProfile, UpdateProfile};

pub async fn get_profile(pool: &PgPool, owner_id: i32) -> Result<LotOwnerProfile, AppError> {
    sqlx::query_as::<_, LotOwnerProfile>(
        r#"
        SELECT o.id, o.name, o.phone_no, u.email, o.created_at
        FROM lot_owners o
        JOIN users u ON u.id = o.id
        WHERE o.id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Lot owner {owner_id} not found")))
}

/// Overwrite name (upper-cased) and phone number. The statement answers 1
/// when the row existed and 0 otherwise.
pub async fn update_profile(
    pool: &PgPool,
    owner_id: i32,
    input: &UpdateProfile,
) -> Result<UpdateOutcome, AppError> {
    let sentinel = sqlx::query_scalar::<_, i32>(
        r#"
        WITH updated AS (
            UPDATE lot_owners
            SET name = $2, phone_no = $3
            WHERE id = $1
            RETURNING 1
        )
        SELECT COUNT(*)::INT FROM updated
        "#,
    )
    .bind(owner_id)
    .bind(input.normalized_name())
    .bind(&input.phone_no)
    .fetch_one(pool)
    .await?;

    let outcome = UpdateOutcome::from_sentinel(sentinel)?;
    tracing::debug!(owner_id, ?outcome, "Lot owner profile update");
    Ok(outcome)
}
