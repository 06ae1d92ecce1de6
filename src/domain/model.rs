use crate::utils::error::{Result, SimError};
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PROJECTION_NOW: &str = "Now";
pub const PROJECTION_ONE_YEAR: &str = "1 Year";
pub const PROJECTION_THREE_YEARS: &str = "3 Years";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    /// First entry of the industry picker; used when none is chosen.
    #[default]
    Consulting,
    Government,
    Technology,
    Healthcare,
    Finance,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Consulting,
        Industry::Government,
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
    ];

    /// Code sent to the pricing service as the `industry` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Industry::Consulting => "consulting",
            Industry::Government => "government",
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Finance => "finance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Consulting => "Consulting",
            Industry::Government => "Government",
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
        }
    }
}

/// Display label for a pricing-service code, or the code itself when unknown.
pub fn industry_label(code: &str) -> &str {
    code.parse::<Industry>()
        .map(|i| i.label())
        .unwrap_or(code)
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Industry::ALL
            .into_iter()
            .find(|i| i.code().eq_ignore_ascii_case(needle) || i.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SimError::InvalidConfigValueError {
                field: "industry".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown industry. Valid industries: {}",
                    Industry::ALL.map(|i| i.label()).join(", ")
                ),
            })
    }
}

/// The two observed formulas. They differ by a 0.2 factor on the margin and
/// by the pricing range, and are kept as separate presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum FormulaPreset {
    #[default]
    Base,
    IndustryAware,
}

impl FormulaPreset {
    pub fn margin_factor(&self) -> f64 {
        match self {
            FormulaPreset::Base => 1.0,
            FormulaPreset::IndustryAware => 0.2,
        }
    }

    pub fn pricing_range(&self) -> (f64, f64) {
        match self {
            FormulaPreset::Base => (100.0, 500.0),
            FormulaPreset::IndustryAware => (50.0, 500.0),
        }
    }

    pub fn uses_rate_lookup(&self) -> bool {
        matches!(self, FormulaPreset::IndustryAware)
    }
}

impl fmt::Display for FormulaPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaPreset::Base => f.write_str("base"),
            FormulaPreset::IndustryAware => f.write_str("industry-aware"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessParameters {
    /// Billable utilization, percent.
    pub utilization: f64,
    /// Average hourly rate.
    pub pricing: f64,
    pub staffing: u32,
    /// Customer retention, percent.
    pub retention: f64,
    pub recurring_revenue_share: f64,
    pub prime_contract_share: f64,
    // Collected but not part of either formula.
    pub pipeline_coverage: f64,
    pub turnover_rate: f64,
    pub overhead_ratio: f64,
    pub industry: Option<Industry>,
}

impl Default for BusinessParameters {
    fn default() -> Self {
        Self {
            utilization: 75.0,
            pricing: 200.0,
            staffing: 10,
            retention: 85.0,
            recurring_revenue_share: 50.0,
            prime_contract_share: 70.0,
            pipeline_coverage: 3.0,
            turnover_rate: 10.0,
            overhead_ratio: 4.0,
            industry: None,
        }
    }
}

impl BusinessParameters {
    /// Checks every input against the range its control declares.
    pub fn validate_for(&self, preset: FormulaPreset) -> Result<()> {
        self.check_ranges(preset)
            .map_err(|e| SimError::ValidationError {
                message: e.to_string(),
            })
    }

    fn check_ranges(&self, preset: FormulaPreset) -> Result<()> {
        let (min_price, max_price) = preset.pricing_range();

        validate_range("utilization", self.utilization, 50.0, 100.0)?;
        validate_range("pricing", self.pricing, min_price, max_price)?;
        validate_range("staffing", self.staffing, 5, 50)?;
        validate_range("retention", self.retention, 50.0, 100.0)?;
        validate_range("recurring_revenue_share", self.recurring_revenue_share, 0.0, 100.0)?;
        validate_range("prime_contract_share", self.prime_contract_share, 0.0, 100.0)?;
        validate_range("pipeline_coverage", self.pipeline_coverage, 1.0, 10.0)?;
        validate_range("turnover_rate", self.turnover_rate, 0.0, 50.0)?;
        validate_range("overhead_ratio", self.overhead_ratio, 1.0, 10.0)?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Thousands of currency units.
    pub profit_margin: f64,
    /// Thousands of currency units.
    pub valuation: f64,
    pub projection: [ProjectionPoint; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub industry_code: String,
    pub rate: f64,
    pub used_fallback: bool,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub preset: FormulaPreset,
    pub parameters: BusinessParameters,
    pub quote: Option<RateQuote>,
    pub result: EvaluationResult,
}
