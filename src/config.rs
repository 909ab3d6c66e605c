use anyhow::{ensure, Context, Result};
use std::{str::FromStr, time::Duration};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Upper bound for `UPSTREAM_MAX_RETRIES`; more attempts could not fit in the request budget anyway.
pub const MAX_UPSTREAM_RETRIES: u32 = 5;

/// Process configuration, read once at startup.
///
/// A missing `OPENAI_API_KEY` is not an error here: the server still starts and
/// every studio endpoint answers with a "not configured" error instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub upstream_timeout: Duration,
    pub upstream_max_retries: u32,
    pub limits: Limits,
    pub models: Models,
}

/// Bounds applied to user input before anything is sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_input_chars: usize,
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Models {
    /// Used for image description and the outfit stylist.
    pub vision: String,
    /// Used for the brand strategist (logo analysis).
    pub strategist: String,
    pub image: String,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_input_chars: 1000, max_image_bytes: 20 * 1024 * 1024 }
    }
}

impl Default for Models {
    fn default() -> Self {
        Self {
            vision: "gpt-4o-mini".to_string(),
            strategist: "gpt-4o".to_string(),
            image: "dall-e-3".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source so it can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let limits_default = Limits::default();
        let models_default = Models::default();

        let upstream_max_retries = parse_or(var("UPSTREAM_MAX_RETRIES"), "UPSTREAM_MAX_RETRIES", 0)?;
        ensure!(
            upstream_max_retries <= MAX_UPSTREAM_RETRIES,
            "UPSTREAM_MAX_RETRIES must be at most {MAX_UPSTREAM_RETRIES}, got {upstream_max_retries}"
        );

        Ok(Self {
            api_key: var("OPENAI_API_KEY"),
            api_base: var("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            port: parse_or(var("PORT"), "PORT", 3000)?,
            request_timeout: Duration::from_secs(parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 60)?),
            upstream_timeout: Duration::from_secs(parse_or(var("UPSTREAM_TIMEOUT_SECS"), "UPSTREAM_TIMEOUT_SECS", 55)?),
            upstream_max_retries,
            limits: Limits {
                max_input_chars: parse_or(var("MAX_INPUT_CHARS"), "MAX_INPUT_CHARS", limits_default.max_input_chars)?,
                max_image_bytes: parse_or(var("MAX_IMAGE_BYTES"), "MAX_IMAGE_BYTES", limits_default.max_image_bytes)?,
            },
            models: Models {
                vision: var("VISION_MODEL").unwrap_or(models_default.vision),
                strategist: var("STRATEGIST_MODEL").unwrap_or(models_default.strategist),
                image: var("IMAGE_MODEL").unwrap_or(models_default.image),
            },
        })
    }

    /// Key prefix that is safe to print.
    pub fn masked_key(&self) -> String {
        match &self.api_key {
            Some(key) => format!("{}...", key.chars().take(7).collect::<String>()),
            None => "<unset>".to_string(),
        }
    }
}

fn parse_or<T>(raw: Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value.parse().with_context(|| format!("{name} has an invalid value: {value:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.upstream_max_retries, 0);
        assert_eq!(config.limits, Limits::default());
        assert_eq!(config.models, Models::default());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.masked_key(), "<unset>");
    }

    #[test]
    fn overrides_are_read_and_base_is_normalised() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test-1234567890"),
            ("OPENAI_API_BASE", "http://localhost:9000/v1/"),
            ("PORT", "8081"),
            ("MAX_INPUT_CHARS", "250"),
            ("IMAGE_MODEL", "dall-e-2"),
        ])
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert_eq!(config.port, 8081);
        assert_eq!(config.limits.max_input_chars, 250);
        assert_eq!(config.models.image, "dall-e-2");
        assert_eq!(config.masked_key(), "sk-test...");
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn retries_are_capped() {
        let config = config_from(&[("UPSTREAM_MAX_RETRIES", "5")]).unwrap();
        assert_eq!(config.upstream_max_retries, MAX_UPSTREAM_RETRIES);

        let err = config_from(&[("UPSTREAM_MAX_RETRIES", "100")]).unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_MAX_RETRIES must be at most 5"));
    }
}
