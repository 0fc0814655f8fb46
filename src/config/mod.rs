use std::env;

use crate::services::auth::TokenSettings;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_access_token_expiry_secs: i64,
    pub jwt_refresh_token_expiry_secs: i64,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_access_token_expiry_secs: env::var("JWT_ACCESS_TOKEN_EXPIRY_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .unwrap_or(900),
            jwt_refresh_token_expiry_secs: env::var("JWT_REFRESH_TOKEN_EXPIRY_SECS")
                .unwrap_or_else(|_| "604800".to_string())
                .parse()
                .unwrap_or(604800),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }

    pub fn token_settings(&self) -> TokenSettings<'_> {
        TokenSettings {
            secret: &self.jwt_secret,
            access_secs: self.jwt_access_token_expiry_secs,
            refresh_secs: self.jwt_refresh_token_expiry_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_settings_borrow_jwt_config() {
        let config = AppConfig {
            database_url: "postgres://localhost/parklot".to_string(),
            database_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 8000,
            jwt_secret: "secret".to_string(),
            jwt_access_token_expiry_secs: 900,
            jwt_refresh_token_expiry_secs: 604800,
            frontend_url: "http://localhost:3000".to_string(),
        };
        let settings = config.token_settings();
        assert_eq!(settings.secret, "secret");
        assert_eq!(settings.access_secs, 900);
        assert_eq!(settings.refresh_secs, 604800);
    }
}
