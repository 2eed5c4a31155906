use std::sync::OnceLock;

/// Runtime endpoints for the backend API and object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub storage_base: String,
}

impl AppConfig {
    /// Resolve endpoints from build-time overrides, then from the page hostname.
    /// - In development (localhost): use http://localhost:8080
    /// - In production: use same origin (API serves static files)
    fn detect() -> Self {
        let hostname = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        Self::resolve(
            option_env!("SENTIPLE_API_BASE"),
            option_env!("SENTIPLE_STORAGE_BASE"),
            &hostname,
        )
    }

    pub fn resolve(api_override: Option<&str>, storage_override: Option<&str>, hostname: &str) -> Self {
        let api_base = match api_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(base) => base.trim_end_matches('/').to_string(),
            None if hostname == "localhost" || hostname == "127.0.0.1" => {
                "http://localhost:8080".to_string()
            }
            None => String::new(),
        };
        let storage_base = match storage_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("{api_base}/storage"),
        };
        Self {
            api_base,
            storage_base,
        }
    }
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Computed at first use
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::detect)
}

pub fn api_base() -> &'static str {
    config().api_base.as_str()
}

pub fn storage_base() -> &'static str {
    config().storage_base.as_str()
}
