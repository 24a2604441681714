use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Gemini API endpoint; overridable so tests can point at a local mock.
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct PoetryConfig {
    pub common: core_config::Config,
    pub gemini: GeminiConfig,
    pub discord: DiscordConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// May be empty; the generator validates it per call so the service can
    /// boot unconfigured and report a typed error per request.
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub webhook_url: Option<String>,
    pub username: String,
}

impl PoetryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(PoetryConfig {
            common,
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                model: get_env_or("GEMINI_MODEL", "gemini-2.0-flash"),
                api_base: get_env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            },
            discord: DiscordConfig {
                webhook_url: env::var("DISCORD_WEBHOOK_URL").ok(),
                username: get_env_or("DISCORD_USERNAME", "VibePoetry AI"),
            },
        })
    }
}

fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
