//! Lot owner routes: profile, lot dashboard, lot creation, status, analytics.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireLotOwner;
use crate::models::analytics::LotAnalytics;
use crate::models::lot::{
    CreatedLot, LotCreation, LotRef, LotSummary, NewLot, UpdateLotStatus, UpdateOutcome,
};
use crate::models::lot_owner::{LotOwnerProfile, UpdateProfile};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::{analytics as analytics_service, lot as lot_service, lot_owner};
use crate::AppState;

/// GET /lot/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
) -> Result<Json<ApiResponse<LotOwnerProfile>>, AppError> {
    let profile = lot_owner::get_profile(&state.db, owner.id).await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /lot/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
    Json(body): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    body.validate()?;
    match lot_owner::update_profile(&state.db, owner.id, &body).await? {
        UpdateOutcome::Updated => Ok(ApiResponse::success("Profile updated")),
        UpdateOutcome::NotFound => Err(AppError::NotFound(format!(
            "Lot owner {} not found",
            owner.id
        ))),
    }
}

/// GET /lot/dashboard — paginated list of the owner's lots.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<LotSummary>>>, AppError> {
    let page = lot_service::dashboard(&state.db, owner.id, &pagination).await?;
    Ok(ApiResponse::success(page))
}

/// GET /lot/lots — lot picker for the analytics page.
pub async fn lots(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
) -> Result<Json<ApiResponse<Vec<LotRef>>>, AppError> {
    let lots = lot_service::get_lots(&state.db, owner.id).await?;
    Ok(ApiResponse::success(lots))
}

/// POST /lot — create a lot and its zones.
pub async fn add_lot(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
    Json(body): Json<NewLot>,
) -> Result<Json<ApiResponse<CreatedLot>>, AppError> {
    body.validate()?;
    match lot_service::add_lot(&state.db, owner.id, &body).await? {
        LotCreation::Created { lot_id, zones } => {
            Ok(ApiResponse::success(CreatedLot { lot_id, zones }))
        }
        LotCreation::Rejected => Err(AppError::Conflict(format!(
            "Lot '{}' could not be created",
            body.lot_name
        ))),
    }
}

/// PATCH /lot/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
    Json(body): Json<UpdateLotStatus>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    body.validate()?;
    match lot_service::update_lot_status(&state.db, owner.id, &body).await? {
        UpdateOutcome::Updated => Ok(ApiResponse::success("Lot status updated")),
        UpdateOutcome::NotFound => Err(AppError::NotFound(format!(
            "Lot {} not found",
            body.lot_id
        ))),
    }
}

/// GET /lot/analytics/{lot_id}
pub async fn analytics(
    State(state): State<AppState>,
    RequireLotOwner(owner): RequireLotOwner,
    Path(lot_id): Path<i32>,
) -> Result<Json<ApiResponse<LotAnalytics>>, AppError> {
    let analytics = analytics_service::get_analytics(&state.db, lot_id, owner.id).await?;
    Ok(ApiResponse::success(analytics))
}
