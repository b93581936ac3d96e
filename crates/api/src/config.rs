use forkline_core::password::PasswordPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Password history / expiry / placeholder policy.
    pub password_policy: PasswordPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `DEFAULT_PASSWORD`        | `changeme`                 |
    /// | `PASSWORD_EXPIRY_DAYS`    | `90`                       |
    /// | `PASSWORD_HISTORY_LIMIT`  | `3`                        |
    /// | `MIN_PASSWORD_LENGTH`     | `12`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            password_policy: password_policy_from_env(),
        }
    }
}

/// Build the [`PasswordPolicy`] from environment variables, falling back to
/// the policy defaults.
fn password_policy_from_env() -> PasswordPolicy {
    let defaults = PasswordPolicy::default();

    let max_history: i64 = std::env::var("PASSWORD_HISTORY_LIMIT")
        .unwrap_or_else(|_| defaults.max_history.to_string())
        .parse()
        .expect("PASSWORD_HISTORY_LIMIT must be a valid i64");

    let validity_days: i64 = std::env::var("PASSWORD_EXPIRY_DAYS")
        .unwrap_or_else(|_| defaults.validity_days.to_string())
        .parse()
        .expect("PASSWORD_EXPIRY_DAYS must be a valid i64");

    let min_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
        .unwrap_or_else(|_| defaults.min_length.to_string())
        .parse()
        .expect("MIN_PASSWORD_LENGTH must be a valid usize");

    let default_password =
        std::env::var("DEFAULT_PASSWORD").unwrap_or(defaults.default_password);

    PasswordPolicy {
        max_history,
        validity_days,
        min_length,
        default_password,
    }
}
