//! Account endpoints under `/auth`.

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::models::user::{CreateUser, UserResponse};
use crate::services::auth::{self as auth_service, TokenPair};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

type TokenResponse = Result<Json<ApiResponse<TokenPair>>, AppError>;

pub async fn login(State(state): State<AppState>, Json(body): Json<Credentials>) -> TokenResponse {
    let settings = state.config.token_settings();
    let tokens = auth_service::login(&state.db, &body.email, &body.password, settings).await?;
    Ok(ApiResponse::success(tokens))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> TokenResponse {
    let settings = state.config.token_settings();
    let tokens = auth_service::refresh_token(&state.db, &body.refresh_token, settings).await?;
    Ok(ApiResponse::success(tokens))
}

/// Nothing is revoked server side; the dashboard drops its tokens.
pub async fn logout() -> Json<ApiResponse<&'static str>> {
    ApiResponse::success("Logged out")
}

/// Opens an owner or admin account. Admins only.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    body.validate()?;
    let user = auth_service::create_user(&state.db, &body).await?;
    Ok(ApiResponse::success(user.into()))
}

pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let account = auth_service::find_user_by_id(&state.db, user.id).await?;
    Ok(ApiResponse::success(account.into()))
}
