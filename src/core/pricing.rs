use crate::core::{industry_label, Industry, RateQuote, RateSource};
use std::collections::HashMap;

pub const DEFAULT_FALLBACK_RATE: f64 = 150.0;

/// Static industry → hourly rate table used whenever live pricing fails.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackRates {
    rates: HashMap<String, f64>,
    default_rate: f64,
}

impl Default for FallbackRates {
    fn default() -> Self {
        let rates = [
            (Industry::Consulting, 200.0),
            (Industry::Government, 150.0),
            (Industry::Technology, 250.0),
            (Industry::Healthcare, 180.0),
            (Industry::Finance, 220.0),
        ]
        .into_iter()
        .map(|(industry, rate)| (industry.code().to_string(), rate))
        .collect();

        Self {
            rates,
            default_rate: DEFAULT_FALLBACK_RATE,
        }
    }
}

impl FallbackRates {
    /// Built-in table with `overrides` applied on top.
    pub fn with_overrides(overrides: &HashMap<String, f64>, default_rate: f64) -> Self {
        let mut table = Self::default();
        for (code, rate) in overrides {
            table.rates.insert(code.to_ascii_lowercase(), *rate);
        }
        table.default_rate = default_rate;
        table
    }

    pub fn rate_for(&self, industry_code: &str) -> f64 {
        self.rates
            .get(&industry_code.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.default_rate)
    }
}

/// Wraps a [`RateSource`] so that a rate is always produced.
pub struct PricingLookup<R: RateSource> {
    source: R,
    fallback: FallbackRates,
}

impl<R: RateSource> PricingLookup<R> {
    pub fn new(source: R) -> Self {
        Self::with_fallback(source, FallbackRates::default())
    }

    pub fn with_fallback(source: R, fallback: FallbackRates) -> Self {
        Self { source, fallback }
    }

    pub async fn fetch_rate(&self, industry: Industry) -> RateQuote {
        self.fetch_rate_for_code(industry.code()).await
    }

    pub async fn fetch_rate_for_code(&self, industry_code: &str) -> RateQuote {
        tracing::debug!("Looking up hourly rate for industry '{}'", industry_code);

        match self.source.average_hourly_rate(industry_code).await {
            Ok(rate) => {
                tracing::info!("💲 Live rate for '{}': {:.2}/hr", industry_code, rate);
                RateQuote {
                    industry_code: industry_code.to_string(),
                    rate,
                    used_fallback: false,
                    warning: None,
                }
            }
            Err(e) => {
                let rate = self.fallback.rate_for(industry_code);
                tracing::warn!(
                    "⚠️ Pricing lookup for '{}' failed ({:?}): {}; using fallback {:.2}/hr",
                    industry_code,
                    e.category(),
                    e,
                    rate
                );
                RateQuote {
                    industry_code: industry_code.to_string(),
                    rate,
                    used_fallback: true,
                    warning: Some(format!(
                        "Could not fetch live pricing for {}: {}. Using default rate ${:.2}/hr.",
                        industry_label(industry_code),
                        e,
                        rate
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, SimError};
    use async_trait::async_trait;

    enum StubSource {
        Rate(f64),
        Timeout,
        Status(u16),
        MissingField,
    }

    #[async_trait]
    impl RateSource for StubSource {
        async fn average_hourly_rate(&self, _industry_code: &str) -> Result<f64> {
            match self {
                StubSource::Rate(rate) => Ok(*rate),
                StubSource::Timeout => Err(SimError::PricingUnavailableError {
                    message: "operation timed out".to_string(),
                }),
                StubSource::Status(status) => Err(SimError::PricingStatusError { status: *status }),
                StubSource::MissingField => Err(SimError::MissingFieldError {
                    field: "average_hourly_rate".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_default_fallback_table() {
        let table = FallbackRates::default();
        assert_eq!(table.rate_for("consulting"), 200.0);
        assert_eq!(table.rate_for("government"), 150.0);
        assert_eq!(table.rate_for("technology"), 250.0);
        assert_eq!(table.rate_for("healthcare"), 180.0);
        assert_eq!(table.rate_for("finance"), 220.0);
        assert_eq!(table.rate_for("aerospace"), 150.0);
        assert_eq!(table.rate_for("FINANCE"), 220.0);
    }

    #[test]
    fn test_fallback_overrides_keep_builtin_entries() {
        let overrides = HashMap::from([("Finance".to_string(), 300.0)]);
        let table = FallbackRates::with_overrides(&overrides, 120.0);
        assert_eq!(table.rate_for("finance"), 300.0);
        assert_eq!(table.rate_for("technology"), 250.0);
        assert_eq!(table.rate_for("unknown"), 120.0);
    }

    #[tokio::test]
    async fn test_live_rate_is_used_when_available() {
        let lookup = PricingLookup::new(StubSource::Rate(275.5));
        let quote = lookup.fetch_rate(Industry::Technology).await;

        assert_eq!(quote.rate, 275.5);
        assert!(!quote.used_fallback);
        assert!(quote.warning.is_none());
        assert_eq!(quote.industry_code, "technology");
    }

    #[tokio::test]
    async fn test_timeout_falls_back_for_finance() {
        let lookup = PricingLookup::new(StubSource::Timeout);
        let quote = lookup.fetch_rate(Industry::Finance).await;

        assert_eq!(quote.rate, 220.0);
        assert!(quote.used_fallback);
        let warning = quote.warning.unwrap_or_default();
        assert!(warning.contains("220.00"));
        assert!(warning.starts_with("Could not fetch live pricing for Finance:"));
    }

    #[tokio::test]
    async fn test_every_failure_kind_uses_table() {
        let sources = [
            StubSource::Timeout,
            StubSource::Status(500),
            StubSource::Status(404),
            StubSource::MissingField,
        ];
        let expected = [
            (Industry::Consulting, 200.0),
            (Industry::Government, 150.0),
            (Industry::Technology, 250.0),
            (Industry::Healthcare, 180.0),
            (Industry::Finance, 220.0),
        ];

        for source in sources {
            let lookup = PricingLookup::new(source);
            for (industry, rate) in expected {
                let quote = lookup.fetch_rate(industry).await;
                assert!(quote.used_fallback);
                assert_eq!(quote.rate, rate, "industry {}", industry);
            }
            let unknown = lookup.fetch_rate_for_code("aerospace").await;
            assert!(unknown.used_fallback);
            assert_eq!(unknown.rate, 150.0);
        }
    }
}
