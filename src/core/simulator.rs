use crate::core::calculator::ValuationCalculator;
use crate::core::pricing::PricingLookup;
use crate::core::{BusinessParameters, FormulaPreset, Industry, RateSource, SimulationReport};
use crate::utils::error::Result;

/// Runs one evaluation: optional rate lookup, range validation, formula.
pub struct Simulator<R: RateSource> {
    calculator: ValuationCalculator,
    lookup: PricingLookup<R>,
}

impl<R: RateSource> Simulator<R> {
    pub fn new(preset: FormulaPreset, lookup: PricingLookup<R>) -> Self {
        Self {
            calculator: ValuationCalculator::new(preset),
            lookup,
        }
    }

    pub fn preset(&self) -> FormulaPreset {
        self.calculator.preset()
    }

    /// `pricing_pinned` means the caller chose `pricing` explicitly, so a
    /// fetched rate is reported but does not replace it.
    pub async fn run(
        &self,
        mut params: BusinessParameters,
        pricing_pinned: bool,
    ) -> Result<SimulationReport> {
        let preset = self.preset();
        tracing::info!("🚀 Running simulation with the {} preset", preset);

        let quote = if preset.uses_rate_lookup() {
            let industry = *params.industry.get_or_insert_with(|| {
                let industry = Industry::default();
                tracing::debug!("No industry chosen, quoting for {}", industry);
                industry
            });

            let quote = self.lookup.fetch_rate(industry).await;
            if pricing_pinned {
                tracing::debug!(
                    "Pricing pinned at {:.2}/hr, ignoring quoted {:.2}/hr",
                    params.pricing,
                    quote.rate
                );
            } else {
                let (min, max) = preset.pricing_range();
                let rate = quote.rate.clamp(min, max);
                if rate != quote.rate {
                    tracing::warn!(
                        "Quoted rate {:.2}/hr is outside {}..={}, using {:.2}/hr",
                        quote.rate,
                        min,
                        max,
                        rate
                    );
                }
                params.pricing = rate;
            }
            Some(quote)
        } else {
            if let Some(industry) = params.industry {
                tracing::debug!("Industry {} ignored by the {} preset", industry, preset);
            }
            None
        };

        params.validate_for(preset)?;
        tracing::debug!("Parameters: {:?}", params);

        let result = self.calculator.evaluate(&params);
        tracing::info!(
            "📈 Profit margin {:.2}K, valuation {:.2}K",
            result.profit_margin,
            result.valuation
        );

        Ok(SimulationReport {
            preset,
            parameters: params,
            quote,
            result,
        })
    }
}
