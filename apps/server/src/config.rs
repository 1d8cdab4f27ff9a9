use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Context};

/// Which backend holds the four collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite { db_path: String },
    Supabase { url: String, api_key: String },
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub store: StoreConfig,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("CRM_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid CRM_LISTEN_ADDR")?;
        let store = match env_or("CRM_STORE", "sqlite").to_ascii_lowercase().as_str() {
            "sqlite" => StoreConfig::Sqlite {
                db_path: env_or("CRM_DB_PATH", "./db/crm.db"),
            },
            "supabase" => StoreConfig::Supabase {
                url: required("CRM_SUPABASE_URL")?,
                api_key: required("CRM_SUPABASE_KEY")?,
            },
            other => bail!("Invalid CRM_STORE '{}': expected 'sqlite' or 'supabase'", other),
        };
        let cors_allow = env_or("CRM_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("CRM_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid CRM_REQUEST_TIMEOUT_MS")?;
        let json_logs = env_or("CRM_LOG_FORMAT", "text").eq_ignore_ascii_case("json");
        Ok(Self {
            listen_addr,
            store,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            json_logs,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("{} must be set when CRM_STORE=supabase", key))
}
