use crate::core::{
    BusinessParameters, EvaluationResult, FormulaPreset, ProjectionPoint, PROJECTION_NOW,
    PROJECTION_ONE_YEAR, PROJECTION_THREE_YEARS,
};

pub const VALUATION_MULTIPLE: f64 = 5.0;
pub const ONE_YEAR_GROWTH: f64 = 1.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationCalculator {
    preset: FormulaPreset,
}

impl ValuationCalculator {
    pub fn new(preset: FormulaPreset) -> Self {
        Self { preset }
    }

    pub fn preset(&self) -> FormulaPreset {
        self.preset
    }

    /// Pure and total over the declared input ranges.
    ///
    /// `pipeline_coverage`, `turnover_rate` and `overhead_ratio` do not take
    /// part in either preset's formula.
    pub fn evaluate(&self, params: &BusinessParameters) -> EvaluationResult {
        let profit_margin = (params.utilization / 100.0)
            * params.pricing
            * f64::from(params.staffing)
            * (params.recurring_revenue_share / 100.0)
            * self.preset.margin_factor();

        let valuation = profit_margin
            * VALUATION_MULTIPLE
            * (params.retention / 100.0)
            * (params.prime_contract_share / 100.0);

        // Not a growth model: the 1-year point is a flat bump and the 3-year
        // point is the valuation figure.
        let projection = [
            ProjectionPoint {
                label: PROJECTION_NOW.to_string(),
                value: profit_margin,
            },
            ProjectionPoint {
                label: PROJECTION_ONE_YEAR.to_string(),
                value: profit_margin * ONE_YEAR_GROWTH,
            },
            ProjectionPoint {
                label: PROJECTION_THREE_YEARS.to_string(),
                value: valuation,
            },
        ];

        EvaluationResult {
            profit_margin,
            valuation,
            projection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn scenario() -> BusinessParameters {
        BusinessParameters {
            utilization: 75.0,
            pricing: 200.0,
            staffing: 10,
            retention: 85.0,
            recurring_revenue_share: 50.0,
            prime_contract_share: 70.0,
            ..BusinessParameters::default()
        }
    }

    #[test]
    fn test_base_preset_scenario() {
        let result = ValuationCalculator::new(FormulaPreset::Base).evaluate(&scenario());

        assert!((result.profit_margin - 750.0).abs() < EPSILON);
        assert!((result.valuation - 2231.25).abs() < EPSILON);
    }

    #[test]
    fn test_industry_aware_preset_scenario() {
        let result = ValuationCalculator::new(FormulaPreset::IndustryAware).evaluate(&scenario());

        assert!((result.profit_margin - 150.0).abs() < EPSILON);
        assert!((result.valuation - 446.25).abs() < EPSILON);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let calculator = ValuationCalculator::new(FormulaPreset::Base);
        let params = scenario();
        assert_eq!(calculator.evaluate(&params), calculator.evaluate(&params));
    }

    #[test]
    fn test_margin_scales_linearly_with_staffing_and_pricing() {
        let calculator = ValuationCalculator::new(FormulaPreset::Base);
        let base = calculator.evaluate(&scenario());

        let doubled_staff = calculator.evaluate(&BusinessParameters {
            staffing: 20,
            ..scenario()
        });
        assert!((doubled_staff.profit_margin - 2.0 * base.profit_margin).abs() < EPSILON);

        let doubled_price = calculator.evaluate(&BusinessParameters {
            pricing: 400.0,
            ..scenario()
        });
        assert!((doubled_price.profit_margin - 2.0 * base.profit_margin).abs() < EPSILON);
    }

    #[test]
    fn test_zero_recurring_revenue_zeroes_margin() {
        for preset in [FormulaPreset::Base, FormulaPreset::IndustryAware] {
            let result = ValuationCalculator::new(preset).evaluate(&BusinessParameters {
                recurring_revenue_share: 0.0,
                utilization: 100.0,
                pricing: 500.0,
                staffing: 50,
                ..scenario()
            });
            assert_eq!(result.profit_margin, 0.0);
            assert_eq!(result.valuation, 0.0);
        }
    }

    #[test]
    fn test_zero_retention_or_prime_share_zeroes_valuation() {
        let calculator = ValuationCalculator::new(FormulaPreset::Base);

        let no_retention = calculator.evaluate(&BusinessParameters {
            retention: 0.0,
            ..scenario()
        });
        assert_eq!(no_retention.valuation, 0.0);
        assert!(no_retention.profit_margin > 0.0);

        let no_prime = calculator.evaluate(&BusinessParameters {
            prime_contract_share: 0.0,
            ..scenario()
        });
        assert_eq!(no_prime.valuation, 0.0);
    }

    #[test]
    fn test_projection_shape() {
        let result = ValuationCalculator::new(FormulaPreset::Base).evaluate(&scenario());
        let labels: Vec<&str> = result.projection.iter().map(|p| p.label.as_str()).collect();

        assert_eq!(labels, vec!["Now", "1 Year", "3 Years"]);
        assert_eq!(result.projection[0].value, result.profit_margin);
        assert_eq!(result.projection[1].value, result.profit_margin * 1.1);
        assert_eq!(result.projection[2].value, result.valuation);
    }

    #[test]
    fn test_unused_inputs_do_not_affect_output() {
        let calculator = ValuationCalculator::new(FormulaPreset::Base);
        let reference = calculator.evaluate(&scenario());
        let varied = calculator.evaluate(&BusinessParameters {
            pipeline_coverage: 10.0,
            turnover_rate: 50.0,
            overhead_ratio: 1.0,
            ..scenario()
        });
        assert_eq!(reference, varied);
    }
}
