//! Car owner routes.

use axum::{extract::State, Json};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireCarOwner;
use crate::models::car_owner::{CarOwnerProfile, UpdateCarProfile};
use crate::services::car_owner;
use crate::AppState;

/// GET /car/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireCarOwner(owner): RequireCarOwner,
) -> Result<Json<ApiResponse<CarOwnerProfile>>, AppError> {
    let profile = car_owner::get_profile(&state.db, owner.id).await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /car/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireCarOwner(owner): RequireCarOwner,
    Json(body): Json<UpdateCarProfile>,
) -> Result<Json<ApiResponse<CarOwnerProfile>>, AppError> {
    body.validate()?;
    let profile = car_owner::update_profile(&state.db, owner.id, &body).await?;
    Ok(ApiResponse::success(profile))
}
