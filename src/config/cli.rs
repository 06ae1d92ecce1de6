use super::toml_config::{PricingConfig, TomlConfig};
use crate::app::report::OutputFormat;
use crate::core::{BusinessParameters, FormulaPreset, Industry};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "digital-twin-sim")]
#[command(about = "See how business decisions impact profit margin and valuation")]
pub struct CliConfig {
    /// Billable utilization (%), 50-100
    #[arg(long, default_value_t = 75.0)]
    pub utilization: f64,

    /// Average pricing ($/hr); 100-500 (base) or 50-500 (industry-aware).
    /// With --industry and the industry-aware preset this defaults to the looked-up rate.
    #[arg(long)]
    pub pricing: Option<f64>,

    /// Staffing (employees), 5-50
    #[arg(long, default_value_t = 10)]
    pub staffing: u32,

    /// Customer retention (%), 50-100
    #[arg(long, default_value_t = 85.0)]
    pub retention: f64,

    /// Sales pipeline coverage (x revenue), 1-10
    #[arg(long, default_value_t = 3.0)]
    pub pipeline_coverage: f64,

    /// Recurring revenue (%), 0-100
    #[arg(long, default_value_t = 50.0)]
    pub recurring_revenue: f64,

    /// Prime vs. subcontractor mix (%), 0-100
    #[arg(long, default_value_t = 70.0)]
    pub prime_contracts: f64,

    /// Employee turnover rate (%), 0-50
    #[arg(long, default_value_t = 10.0)]
    pub turnover: f64,

    /// Billable vs. overhead staff ratio (x), 1-10
    #[arg(long, default_value_t = 4.0)]
    pub overhead_ratio: f64,

    /// Industry used for the hourly rate lookup
    #[arg(long)]
    pub industry: Option<String>,

    /// Formula preset; overrides `simulator.preset` from the config file
    #[arg(long, value_enum)]
    pub preset: Option<FormulaPreset>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Pricing service endpoint; overrides `pricing.endpoint`
    #[arg(long)]
    pub pricing_endpoint: Option<String>,

    /// Request timeout for the pricing service, in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn industry(&self) -> Result<Option<Industry>> {
        self.industry
            .as_deref()
            .map(|s| s.parse::<Industry>())
            .transpose()
    }

    pub fn parameters(&self) -> Result<BusinessParameters> {
        let defaults = BusinessParameters::default();
        Ok(BusinessParameters {
            utilization: self.utilization,
            pricing: self.pricing.unwrap_or(defaults.pricing),
            staffing: self.staffing,
            retention: self.retention,
            recurring_revenue_share: self.recurring_revenue,
            prime_contract_share: self.prime_contracts,
            pipeline_coverage: self.pipeline_coverage,
            turnover_rate: self.turnover,
            overhead_ratio: self.overhead_ratio,
            industry: self.industry()?,
        })
    }

    pub fn pricing_pinned(&self) -> bool {
        self.pricing.is_some()
    }

    /// Loads the config file, if any, and applies command-line overrides.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut pricing = file.pricing;
        if let Some(endpoint) = &self.pricing_endpoint {
            pricing.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            pricing.timeout_seconds = Some(timeout);
        }

        let resolved = ResolvedConfig {
            preset: self
                .preset
                .or(file.simulator.preset)
                .unwrap_or_default(),
            pricing,
        };
        resolved.pricing.validate()?;
        Ok(resolved)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(endpoint) = &self.pricing_endpoint {
            validate_url("pricing_endpoint", endpoint)?;
        }
        self.industry()?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub preset: FormulaPreset,
    pub pricing: PricingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_control_defaults() {
        let config = CliConfig::parse_from(["digital-twin-sim"]);
        let params = config.parameters().unwrap();

        assert_eq!(params, BusinessParameters::default());
        assert!(!config.pricing_pinned());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_flags_map_to_parameters() {
        let config = CliConfig::parse_from([
            "digital-twin-sim",
            "--pricing",
            "320",
            "--staffing",
            "25",
            "--recurring-revenue",
            "40",
            "--industry",
            "Healthcare",
            "--preset",
            "industry-aware",
        ]);
        let params = config.parameters().unwrap();

        assert_eq!(params.pricing, 320.0);
        assert_eq!(params.staffing, 25);
        assert_eq!(params.recurring_revenue_share, 40.0);
        assert_eq!(params.industry, Some(Industry::Healthcare));
        assert!(config.pricing_pinned());
        assert_eq!(config.preset, Some(FormulaPreset::IndustryAware));
    }

    #[test]
    fn test_unknown_industry_fails_validation() {
        let config = CliConfig::parse_from(["digital-twin-sim", "--industry", "mining"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[simulator]\npreset = \"industry-aware\"\n\n[pricing]\nendpoint = \"https://file.example.com/rates\"\ntimeout_seconds = 9\n",
            )
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let from_file = CliConfig::parse_from(["digital-twin-sim", "--config", path.as_str()])
            .resolve()
            .unwrap();
        assert_eq!(from_file.preset, FormulaPreset::IndustryAware);
        assert_eq!(from_file.pricing.endpoint, "https://file.example.com/rates");

        let overridden = CliConfig::parse_from([
            "digital-twin-sim",
            "--config",
            path.as_str(),
            "--preset",
            "base",
            "--pricing-endpoint",
            "http://localhost:9000/rates",
            "--timeout-seconds",
            "2",
        ])
        .resolve()
        .unwrap();
        assert_eq!(overridden.preset, FormulaPreset::Base);
        assert_eq!(overridden.pricing.endpoint, "http://localhost:9000/rates");
        assert_eq!(overridden.pricing.timeout_seconds, Some(2));
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let resolved = CliConfig::parse_from(["digital-twin-sim"]).resolve().unwrap();
        assert_eq!(resolved.preset, FormulaPreset::Base);
        assert!(resolved.pricing.timeout_seconds.is_none());
    }
}
