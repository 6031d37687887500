use std::env;

use anyhow::bail;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode};

use crate::credential::DEFAULT_WORK_FACTOR;

pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_LISTEN_PORT: u16 = 3000;
pub const MAX_POOL_CONNECTIONS: u32 = 10;

/// Managed MySQL hosts that require TLS even when `DB_SSL` is unset.
const MANAGED_HOST_SUFFIX: &str = "mysql.database.azure.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_port: u16,
    pub db_tls: bool,
    pub listen_port: u16,
    pub hash_cost: u32,
}

impl Config {
    /// Reads the process environment. Fails fast, listing every missing
    /// required database variable at once.
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_host = lookup("DB_HOST").unwrap_or_default();
        let db_user = lookup("DB_USER").unwrap_or_default();
        let db_password = lookup("DB_PASSWORD").unwrap_or_default();
        let db_name = lookup("DB_NAME").unwrap_or_default();

        let mut missing = Vec::new();
        if db_host.is_empty() {
            missing.push("DB_HOST");
        }
        if db_user.is_empty() {
            missing.push("DB_USER");
        }
        if db_password.is_empty() {
            missing.push("DB_PASSWORD");
        }
        if db_name.is_empty() {
            missing.push("DB_NAME");
        }
        if !missing.is_empty() {
            bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let db_port = parse_or("DB_PORT", &lookup, DEFAULT_DB_PORT)?;
        let listen_port = parse_or("PORT", &lookup, DEFAULT_LISTEN_PORT)?;
        let hash_cost = parse_or("BCRYPT_COST", &lookup, DEFAULT_WORK_FACTOR)?;

        let db_tls = match lookup("DB_SSL") {
            Some(raw) => raw.eq_ignore_ascii_case("true"),
            None => db_host.to_ascii_lowercase().ends_with(MANAGED_HOST_SUFFIX),
        };

        Ok(Config {
            db_host,
            db_user,
            db_password,
            db_name,
            db_port,
            db_tls,
            listen_port,
            hash_cost,
        })
    }

    /// Builds the connection pool once at startup; the caller owns its
    /// lifecycle and closes it at shutdown.
    pub async fn connect(&self) -> Result<MySqlPool, sqlx::Error> {
        let options = MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
            .ssl_mode(if self.db_tls {
                MySqlSslMode::Required
            } else {
                MySqlSslMode::Disabled
            });
        MySqlPoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect_with(options)
            .await
    }
}

fn parse_or<T, F>(name: &str, lookup: &F, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(value),
            Err(_) => bail!("{} must be a number, got `{}`", name, raw),
        },
        None => Ok(default),
    }
}
