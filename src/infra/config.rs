//! Centralized configuration (environment variables + defaults).
//!
//! `AppConfig` is built once at startup and handed to the router through
//! `AppState`; nothing reads the environment after that.

use rand::RngCore;
use std::fmt;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SSLMODE: &str = "require";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppConfig {
    database_url: Option<String>,
    secret_key: Vec<u8>,
    secret_generated: bool,
    pub bind_addr: String,
    pub seed_on_empty: bool,
    pub static_dir: String,
}

impl AppConfig {
    /// Reads the process environment (call `dotenv` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; used by `from_env` and tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let sslmode = non_empty("DATABASE_SSLMODE").unwrap_or_else(|| DEFAULT_SSLMODE.to_string());
        let database_url = non_empty("DATABASE_URL").map(|url| with_sslmode(&url, &sslmode));

        let (secret_key, secret_generated) = match non_empty("SECRET_KEY") {
            Some(s) => (s.into_bytes(), false),
            None => {
                let mut key = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut key);
                (key, true)
            }
        };

        let bind_addr = non_empty("BIND_ADDR")
            .or_else(|| non_empty("PORT").map(|p| format!("0.0.0.0:{}", p)))
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let seed_on_empty = non_empty("SEED_ON_EMPTY")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true);

        let static_dir =
            non_empty("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Self {
            database_url,
            secret_key,
            secret_generated,
            bind_addr,
            seed_on_empty,
            static_dir,
        }
    }

    /// Connection string with the transport-security parameter applied.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn database_url_configured(&self) -> bool {
        self.database_url.is_some()
    }

    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// True when `SECRET_KEY` was missing and a per-process key was generated.
    pub fn secret_generated(&self) -> bool {
        self.secret_generated
    }

    /// Overrides the connection string; used by tests and the `preflight` binary.
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url;
        self
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("secret_key", &"<redacted>")
            .field("secret_generated", &self.secret_generated)
            .field("bind_addr", &self.bind_addr)
            .field("seed_on_empty", &self.seed_on_empty)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

/// Appends `sslmode=<mode>` unless the URL already sets one.
pub fn with_sslmode(url: &str, mode: &str) -> String {
    if url.contains("sslmode=") {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}sslmode={}", url, sep, mode)
}
