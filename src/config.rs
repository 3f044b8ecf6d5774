use std::env;

/// AppConfig
///
/// Holds the shell server's configuration. Immutable once loaded and pulled into
/// handlers through `FromRef`, next to the route table in `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and which settings are mandatory.
    pub env: Env,
    // Socket address the HTTP listener binds to.
    pub bind_addr: String,
    // Application name shown in every page title.
    pub app_title: String,
    // Lifetime of the one-shot denial notice cookie, in seconds.
    pub notice_max_age_secs: i64,
}

/// Env
///
/// Local development (pretty logs, permissive defaults) or production (JSON logs,
/// explicit settings).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_APP_TITLE: &str = "EduLink";
const DEFAULT_NOTICE_MAX_AGE_SECS: i64 = 60;

impl Default for AppConfig {
    /// Safe values for test state scaffolding, no environment variables needed.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            notice_max_age_secs: DEFAULT_NOTICE_MAX_AGE_SECS,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at start-up.
    ///
    /// # Panics
    /// Panics if `SHELL_BIND_ADDR` is missing in production, or if
    /// `SHELL_NOTICE_MAX_AGE_SECS` is set but is not a non-negative integer.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = match env {
            Env::Production => env::var("SHELL_BIND_ADDR")
                .expect("FATAL: SHELL_BIND_ADDR must be set in production."),
            Env::Local => {
                env::var("SHELL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            }
        };

        let app_title =
            env::var("SHELL_APP_TITLE").unwrap_or_else(|_| DEFAULT_APP_TITLE.to_string());

        let notice_max_age_secs = match env::var("SHELL_NOTICE_MAX_AGE_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .expect("FATAL: SHELL_NOTICE_MAX_AGE_SECS must be a non-negative integer."),
            Err(_) => DEFAULT_NOTICE_MAX_AGE_SECS,
        };

        Self {
            env,
            bind_addr,
            app_title,
            notice_max_age_secs,
        }
    }
}
