//! Authentication service: password hashing, JWT, login, and account creation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::lot_owner::normalize_owner_name;
use crate::models::user::{CreateUser, User, UserRole};

/// Maximum failed login attempts before account lockout.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lockout duration in minutes after exceeding max failed attempts.
const LOCKOUT_DURATION_MINUTES: i64 = 15;

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub user_id: String,
    pub role: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token pair returned on successful login.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn claims_for(user: &User, token_type: &str, expiry_secs: i64) -> Claims {
    let now = Utc::now();
    Claims {
        sub: user.email.clone(),
        user_id: user.id.to_string(),
        role: user.role.as_claim().to_string(),
        token_type: token_type.to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    }
}

/// Signing secret and lifetimes for issued token pairs.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings<'a> {
    pub secret: &'a str,
    pub access_secs: i64,
    pub refresh_secs: i64,
}

pub fn generate_tokens(user: &User, settings: TokenSettings<'_>) -> Result<TokenPair, AppError> {
    let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());

    let encode = |claims: Claims| {
        jsonwebtoken::encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
    };

    Ok(TokenPair {
        access_token: encode(claims_for(user, "access", settings.access_secs))?,
        refresh_token: encode(claims_for(user, "refresh", settings.refresh_secs))?,
        token_type: "Bearer".to_string(),
        expires_in: settings.access_secs,
    })
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Create an account and, for owners, the matching profile row in one
/// transaction.
pub async fn create_user(pool: &PgPool, input: &CreateUser) -> Result<User, AppError> {
    let password_hash = hash_password(&input.password)?;

    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(input.email.trim().to_lowercase())
    .bind(&password_hash)
    .bind(input.role)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Email already registered".to_string())
        }
        _ => AppError::Database(e),
    })?;

    match user.role {
        UserRole::LotOwner => {
            sqlx::query("INSERT INTO lot_owners (id, name, phone_no) VALUES ($1, $2, $3)")
                .bind(user.id)
                .bind(normalize_owner_name(&input.name))
                .bind(&input.phone_no)
                .execute(&mut *tx)
                .await?;
        }
        UserRole::CarOwner => {
            let (first_name, last_name) = input.first_and_last_name();
            sqlx::query(
                "INSERT INTO car_owners (id, first_name, last_name, phone_no) VALUES ($1, $2, $3, $4)",
            )
            .bind(user.id)
            .bind(first_name)
            .bind(last_name)
            .bind(&input.phone_no)
            .execute(&mut *tx)
            .await?;
        }
        UserRole::Admin => {}
    }

    tx.commit().await?;

    tracing::info!(user_id = user.id, role = user.role.as_claim(), "Account created");
    Ok(user)
}

/// Authenticate by email and password, returning a token pair.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    settings: TokenSettings<'_>,
) -> Result<TokenPair, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            tracing::warn!(user_id = user.id, "Login attempt on locked account");
            return Err(AppError::Unauthorized);
        }
    }

    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    if !verify_password(password, &user.password_hash)? {
        let new_attempts = user.failed_login_attempts + 1;
        let lock_until = (new_attempts >= MAX_FAILED_ATTEMPTS)
            .then(|| Utc::now() + Duration::minutes(LOCKOUT_DURATION_MINUTES));
        sqlx::query(
            "UPDATE users SET failed_login_attempts = $1, locked_until = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(new_attempts)
        .bind(lock_until)
        .bind(user.id)
        .execute(pool)
        .await?;
        return Err(AppError::Unauthorized);
    }

    sqlx::query(
        "UPDATE users SET failed_login_attempts = 0, locked_until = NULL, last_login = NOW() WHERE id = $1",
    )
    .bind(user.id)
    .execute(pool)
    .await?;

    generate_tokens(&user, settings)
}

/// Exchange a valid refresh token for a fresh pair.
pub async fn refresh_token(
    pool: &PgPool,
    refresh_token_str: &str,
    settings: TokenSettings<'_>,
) -> Result<TokenPair, AppError> {
    let claims = validate_token(refresh_token_str, settings.secret)?;

    if claims.token_type != "refresh" {
        return Err(AppError::Unauthorized);
    }

    let user_id: i32 = claims
        .user_id
        .parse()
        .map_err(|_| AppError::Unauthorized)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = true")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    generate_tokens(&user, settings)
}

pub async fn find_user_by_id(pool: &PgPool, id: i32) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
