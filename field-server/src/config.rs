use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the mock server listens on
    pub port: u16,
    /// Single browser origin allowed by CORS (the field builder dev server)
    pub client_url: String,
    /// Artificial latency before a save is echoed back
    pub save_delay: Duration,
    /// Built field builder UI to serve as the fallback route, if any
    pub frontend_dist: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            client_url: DEFAULT_CLIENT_URL.to_string(),
            save_delay: Duration::ZERO,
            frontend_dist: None,
        }
    }
}

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            client_url: env_str("CLIENT_URL", DEFAULT_CLIENT_URL),
            save_delay: Duration::from_millis(env_parse("SAVE_DELAY_MS", 0)?),
            frontend_dist: std::env::var("FRONTEND_DIST")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Nearest `.env` at or above `start`, so launching from `field-server/`
/// still finds the workspace one.
pub fn find_env_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        Err(_) => Ok(default),
    }
}
