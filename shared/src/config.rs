use anyhow::{bail, Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").context("DATABASE_HOST must be set")?,
            port: std::env::var("DATABASE_PORT")
                .context("DATABASE_PORT must be set")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: std::env::var("DATABASE_USERNAME").context("DATABASE_USERNAME must be set")?,
            password: std::env::var("DATABASE_PASSWORD").context("DATABASE_PASSWORD must be set")?,
            database: std::env::var("DATABASE_NAME").context("DATABASE_NAME must be set")?,
        };

        // The signing secret is fixed for the lifetime of the process. A
        // missing secret aborts startup instead of failing every request.
        let token_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if token_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        let token_ttl = match std::env::var("AUTH_TOKEN_TTL") {
            Ok(ttl) => ttl.parse().context("AUTH_TOKEN_TTL must be seconds")?,
            Err(_) => 86400,
        };
        let auth = AuthConfig {
            token_secret,
            token_ttl,
        };

        Ok(Self { database, auth })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct AuthConfig {
    pub token_secret: String,
    /// Session lifetime in seconds. Expiry is absolute; there is no refresh.
    pub token_ttl: i64,
}
