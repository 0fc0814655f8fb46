//! Role extractors. Each one authenticates first, then checks the role.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: UserRole,
    message: &str,
) -> Result<CurrentUser, AppError> {
    let user = CurrentUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(user)
}

/// Platform administrator.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::Admin, "Admin access required")
            .await
            .map(RequireAdmin)
    }
}

/// Owner of parking lots; `.0.id` is the LotOwner id.
#[derive(Debug, Clone)]
pub struct RequireLotOwner(pub CurrentUser);

impl FromRequestParts<AppState> for RequireLotOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::LotOwner, "Lot owner access required")
            .await
            .map(RequireLotOwner)
    }
}

/// Owner of cars; `.0.id` is the CarOwner id.
#[derive(Debug, Clone)]
pub struct RequireCarOwner(pub CurrentUser);

impl FromRequestParts<AppState> for RequireCarOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::CarOwner, "Car owner access required")
            .await
            .map(RequireCarOwner)
    }
}
