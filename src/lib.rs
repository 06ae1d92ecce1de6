pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, ResolvedConfig};

pub use crate::adapters::pricing_http::HttpRateSource;
pub use crate::app::report::OutputFormat;
pub use crate::config::toml_config::{PricingConfig, TomlConfig};
pub use crate::core::{
    calculator::ValuationCalculator,
    pricing::{FallbackRates, PricingLookup},
    simulator::Simulator,
};
pub use crate::domain::model::{
    BusinessParameters, EvaluationResult, FormulaPreset, Industry, RateQuote, SimulationReport,
};
pub use crate::utils::error::{Result, SimError};
