use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use argon2::Params;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Argon2 cost parameters applied to newly hashed passwords.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl PasswordConfig {
    pub fn params(&self) -> anyhow::Result<Params> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Which resource route trees sit behind the auth gate.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    pub stations_require_auth: bool,
    pub points_require_auth: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            stations_require_auth: true,
            points_require_auth: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub listen_addr: SocketAddr,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub routes: RouteConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "chargehub".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "chargehub-clients".into()),
            ttl_minutes: check_ttl(env_or("JWT_TTL_MINUTES", 60)?)?,
        };
        if jwt.secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            memory_kib: env_or("PASSWORD_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_or("PASSWORD_ITERATIONS", defaults.iterations)?,
            parallelism: env_or("PASSWORD_PARALLELISM", defaults.parallelism)?,
        };
        password.params()?;

        let routes = RouteConfig {
            stations_require_auth: env_or("STATIONS_REQUIRE_AUTH", true)?,
            points_require_auth: env_or("POINTS_REQUIRE_AUTH", false)?,
        };

        let listen_addr = format!(
            "{}:{}",
            std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            std::env::var("APP_PORT").unwrap_or_else(|_| "5000".into())
        )
        .parse()
        .context("APP_HOST/APP_PORT do not form a socket address")?;

        Ok(Self {
            database_url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            listen_addr,
            jwt,
            password,
            routes,
        })
    }
}

/// Longest accepted token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 525_600;

fn check_ttl(minutes: i64) -> anyhow::Result<i64> {
    if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!("JWT_TTL_MINUTES={minutes} must be between 1 and {MAX_TTL_MINUTES}");
    }
    Ok(minutes)
}

/// Reads an optional variable, failing on values that do not parse.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key}={raw:?} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}
