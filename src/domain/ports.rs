use crate::utils::error::Result;
use async_trait::async_trait;

/// Where live hourly rates come from. Implementations report every failure
/// as an error; turning failures into fallback rates is the caller's job.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn average_hourly_rate(&self, industry_code: &str) -> Result<f64>;
}
