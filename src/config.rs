use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Gaitcompare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address of the upload API (same port the report UI posts to).
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default request body limit, in MiB. Covers two reports plus two datasets.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

/// Tracing filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "gaitcompare=info,gaitcompare_lib=info,tower_http=info"
}

/// Runtime configuration of the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Read `GAIT_BIND_ADDR` and `GAIT_MAX_UPLOAD_MB` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Malformed values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("GAIT_BIND_ADDR") {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "Invalid GAIT_BIND_ADDR, using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        if let Some(raw) = lookup("GAIT_MAX_UPLOAD_MB") {
            let bytes = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|mb| *mb > 0)
                .and_then(|mb| mb.checked_mul(1024 * 1024));
            match bytes {
                Some(bytes) => config.max_upload_bytes = bytes,
                None => tracing::warn!(
                    value = %raw,
                    "Invalid GAIT_MAX_UPLOAD_MB, using {DEFAULT_MAX_UPLOAD_MB}"
                ),
            }
        }

        config
    }
}
