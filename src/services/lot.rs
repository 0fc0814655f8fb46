//! Lot service: owner dashboard, lot creation with zones, and status updates.
//!
//! The lot routines (`view_my_lots`, `add_lot`, `add_lot_zone`,
//! `update_lot_status`) live in the database; this module only binds their
//! parameters and interprets their sentinels.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::lot::{
    zone_plan, LotCreation, LotRef, LotSummary, NewLot, UpdateLotStatus, UpdateOutcome,
};
use crate::models::pagination::{PagedResult, Pagination};

/// One page of the owner's lots with the "Showing X of Y results" line.
pub async fn dashboard(
    pool: &PgPool,
    owner_id: i32,
    pagination: &Pagination,
) -> Result<PagedResult<LotSummary>, AppError> {
    let (total, items) = tokio::try_join!(
        count_lots(pool, owner_id),
        view_my_lots(pool, owner_id, pagination),
    )?;

    Ok(PagedResult::new(items, total, pagination))
}

async fn count_lots(pool: &PgPool, owner_id: i32) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lots WHERE lot_owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

async fn view_my_lots(
    pool: &PgPool,
    owner_id: i32,
    pagination: &Pagination,
) -> Result<Vec<LotSummary>, AppError> {
    let rows = sqlx::query_as::<_, LotSummary>(
        r#"
        SELECT lot_id, lot_name, total_zones, total_capacity, space_available, status, city, country
        FROM view_my_lots($1, $2, $3)
        "#,
    )
    .bind(owner_id)
    .bind(pagination.offset())
    .bind(pagination.limit())
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every lot the owner holds, for the analytics lot picker.
pub async fn get_lots(pool: &PgPool, owner_id: i32) -> Result<Vec<LotRef>, AppError> {
    let rows = sqlx::query_as::<_, LotRef>(
        "SELECT lot_id, lot_name FROM lots WHERE lot_owner_id = $1 ORDER BY lot_id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a lot and then its zones, one `add_lot_zone` call per zone in list
/// order. Both steps share a transaction, so a failing zone leaves no lot
/// behind. A lot id of 0 from `add_lot` means the database refused the lot;
/// no zones are written in that case. A concurrent create of the same name
/// can slip past the routine's duplicate check and hit the unique key; that
/// is a refusal too.
pub async fn add_lot(pool: &PgPool, owner_id: i32, input: &NewLot) -> Result<LotCreation, AppError> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query_scalar::<_, i32>(
        "SELECT add_lot($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(owner_id)
    .bind(input.total_zones())
    .bind(&input.postal_code)
    .bind(&input.address_l1)
    .bind(&input.address_l2)
    .bind(&input.city)
    .bind(&input.country)
    .bind(&input.lot_name)
    .bind(input.total_capacity)
    .fetch_one(&mut *tx)
    .await;

    let lot_id = match inserted {
        Ok(lot_id) => lot_id,
        Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => 0,
        Err(e) => return Err(AppError::Database(e)),
    };

    if lot_id == 0 {
        tracing::info!(owner_id, lot_name = %input.lot_name, "Lot creation rejected");
        return Ok(LotCreation::Rejected);
    }

    let zones = zone_plan(&input.zones);
    for zone in &zones {
        sqlx::query("CALL add_lot_zone($1, $2, $3)")
            .bind(lot_id)
            .bind(zone.zone_id)
            .bind(zone.capacity)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(owner_id, lot_id, zones = zones.len(), "Lot created");
    Ok(LotCreation::Created { lot_id, zones })
}

pub async fn update_lot_status(
    pool: &PgPool,
    owner_id: i32,
    input: &UpdateLotStatus,
) -> Result<UpdateOutcome, AppError> {
    let sentinel = sqlx::query_scalar::<_, i32>("SELECT update_lot_status($1, $2, $3)")
        .bind(owner_id)
        .bind(input.lot_id)
        .bind(input.status)
        .fetch_one(pool)
        .await?;

    let outcome = UpdateOutcome::from_sentinel(sentinel)?;
    tracing::debug!(owner_id, lot_id = input.lot_id, status = ?input.status, ?outcome, "Lot status update");
    Ok(outcome)
}
