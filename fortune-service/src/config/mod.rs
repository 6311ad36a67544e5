use crate::services::fortune::{FortuneOptions, DEFAULT_MODEL};
use crate::services::persona::default_personas;
use crate::services::providers::gemini::GEMINI_API_BASE;
use crate::services::providers::ThinkingEffort;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct FortuneConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub fortune: FortuneSettings,
    /// OTLP collector; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct FortuneSettings {
    pub model: String,
    pub thinking_effort: ThinkingEffort,
    pub persona_enabled: bool,
    pub tone_instruction_enabled: bool,
    pub personas: Vec<String>,
}

impl FortuneConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from any key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        let thinking_effort = get("FORTUNE_THINKING_EFFORT", Some("unset"))?
            .parse::<ThinkingEffort>()
            .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("FORTUNE_THINKING_EFFORT: {}", e))
        })?;

        let personas = lookup("FORTUNE_PERSONAS")
            .map(|raw| parse_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(default_personas);

        Ok(FortuneConfig {
            common,
            google: GoogleConfig {
                api_key: get("GEMINI_API_KEY", None)?,
                api_base: get("GEMINI_API_BASE", Some(GEMINI_API_BASE))?,
            },
            fortune: FortuneSettings {
                model: get("FORTUNE_MODEL", Some(DEFAULT_MODEL))?,
                thinking_effort,
                persona_enabled: parse_bool(
                    "FORTUNE_PERSONA_ENABLED",
                    &get("FORTUNE_PERSONA_ENABLED", Some("false"))?,
                )?,
                tone_instruction_enabled: parse_bool(
                    "FORTUNE_TONE_INSTRUCTION_ENABLED",
                    &get("FORTUNE_TONE_INSTRUCTION_ENABLED", Some("true"))?,
                )?,
                personas,
            },
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }

    pub fn fortune_options(&self) -> FortuneOptions {
        FortuneOptions {
            persona_enabled: self.fortune.persona_enabled,
            tone_instruction_enabled: self.fortune.tone_instruction_enabled,
            model_id: self.fortune.model.clone(),
            thinking_effort: self.fortune.thinking_effort,
            personas: self.fortune.personas.clone(),
        }
    }
}

fn get_env<F>(
    lookup: &F,
    key: &str,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got '{}'",
            key,
            other
        ))),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
