use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub streak_sweep_interval_secs: u64,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://tasking.db?mode=rwc".to_string());
        let bind_addr = parse_var("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?;
        let streak_sweep_interval_secs = parse_var("STREAK_SWEEP_INTERVAL_SECS", 3600)?;
        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;

        if streak_sweep_interval_secs == 0 {
            return Err(AppError::BadRequest(
                "STREAK_SWEEP_INTERVAL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self {
            database_url,
            bind_addr,
            streak_sweep_interval_secs,
            db_max_connections,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("{} is not valid: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
