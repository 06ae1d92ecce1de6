pub mod calculator;
pub mod pricing;
pub mod simulator;

pub use crate::domain::model::{
    industry_label, BusinessParameters, EvaluationResult, FormulaPreset, Industry, ProjectionPoint, RateQuote,
    SimulationReport, PROJECTION_NOW, PROJECTION_ONE_YEAR, PROJECTION_THREE_YEARS,
};
pub use crate::domain::ports::RateSource;
pub use crate::utils::error::Result;
