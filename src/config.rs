use crate::admin::DEMO_ADMIN_PASSWORD;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    pub seed_demo_bookings: bool,
}

impl Config {
    /// Read configuration from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;

        let admin_password = match lookup("ADMIN_PASSWORD") {
            Some(password) if !password.is_empty() => password,
            _ => {
                tracing::warn!("ADMIN_PASSWORD not set, using the demo admin password");
                DEMO_ADMIN_PASSWORD.to_string()
            }
        };

        let seed_demo_bookings = lookup("SEED_DEMO_BOOKINGS")
            .unwrap_or_else(|| "true".to_string())
            .parse::<bool>()
            .context("Invalid SEED_DEMO_BOOKINGS (expected true or false)")?;

        Ok(Self {
            host,
            port,
            admin_password,
            seed_demo_bookings,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
