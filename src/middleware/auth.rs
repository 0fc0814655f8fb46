//! Bearer token authentication extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::errors::AppError;
use crate::models::user::UserRole;
use crate::services::auth as auth_service;
use crate::AppState;

/// Account behind the `Authorization: Bearer <token>` header.
///
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let claims = auth_service::validate_token(bearer.token(), &state.config.jwt_secret)?;

        if claims.token_type != "access" {
            return Err(AppError::Unauthorized);
        }

        let user_id: i32 = claims
            .user_id
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        let role = UserRole::from_claim(&claims.role).ok_or_else(|| {
            AppError::Internal(format!("Invalid role in token: {}", claims.role))
        })?;

        Ok(CurrentUser {
            id: user_id,
            email: claims.sub,
            role,
        })
    }
}
