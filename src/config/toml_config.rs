use crate::core::pricing::{FallbackRates, DEFAULT_FALLBACK_RATE};
use crate::core::FormulaPreset;
use crate::utils::error::{Result, SimError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PRICING_ENDPOINT: &str = "https://pricing.example.com/v1/rates";
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub preset: Option<FormulaPreset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Unset means the HTTP client default.
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_rate")]
    pub default_rate: f64,
    #[serde(default)]
    pub fallback_rates: HashMap<String, f64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_endpoint() -> String {
    DEFAULT_PRICING_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_rate() -> f64 {
    DEFAULT_FALLBACK_RATE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
            default_rate: default_rate(),
            fallback_rates: HashMap::new(),
            headers: HashMap::new(),
        }
    }
}

impl PricingConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn fallback_table(&self) -> FallbackRates {
        FallbackRates::with_overrides(&self.fallback_rates, self.default_rate)
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        validate_url("pricing.endpoint", &self.endpoint)?;
        validate_non_empty_string("pricing.user_agent", &self.user_agent)?;
        validate_positive("pricing.default_rate", self.default_rate)?;

        for (code, rate) in &self.fallback_rates {
            validate_positive(&format!("pricing.fallback_rates.{}", code), *rate)?;
        }

        if self.timeout_seconds == Some(0) {
            return Err(SimError::InvalidConfigValueError {
                field: "pricing.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SimError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRICING_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SimError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.pricing.validate()
    }
}
