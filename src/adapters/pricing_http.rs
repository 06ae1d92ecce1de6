use crate::config::toml_config::PricingConfig;
use crate::core::RateSource;
use crate::utils::error::{Result, SimError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const RATE_FIELD: &str = "average_hourly_rate";

#[derive(Debug, Deserialize)]
struct PricingResponse {
    average_hourly_rate: Option<f64>,
}

/// Queries `GET <endpoint>?industry=<code>` on the external pricing service.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    endpoint: String,
    client: Client,
}

impl HttpRateSource {
    pub fn new(config: &PricingConfig) -> Result<Self> {
        let mut builder = Client::builder().default_headers(build_headers(config)?);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Default headers for every pricing request. Custom headers whose value still
/// holds an unresolved `${VAR}` placeholder are left out.
fn build_headers(config: &PricingConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value("pricing.user_agent", &config.user_agent)?);

    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            SimError::InvalidConfigValueError {
                field: "pricing.headers".to_string(),
                value: name.clone(),
                reason: format!("Invalid header name: {}", e),
            }
        })?;

        if has_unresolved_placeholder(value) {
            tracing::warn!(
                "⚠️ Skipping pricing header '{}': environment variable in '{}' is not set",
                name,
                value
            );
            continue;
        }

        headers.insert(header_name, header_value(&format!("pricing.headers.{}", name), value)?);
    }

    Ok(headers)
}

fn has_unresolved_placeholder(value: &str) -> bool {
    value
        .find("${")
        .is_some_and(|start| value[start..].contains('}'))
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| SimError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Invalid header value: {}", e),
    })
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn average_hourly_rate(&self, industry_code: &str) -> Result<f64> {
        tracing::debug!("Making pricing request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("industry", industry_code)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    SimError::PricingUnavailableError {
                        message: e.to_string(),
                    }
                } else {
                    SimError::HttpError(e)
                }
            })?;

        tracing::debug!("Pricing response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(SimError::PricingStatusError {
                status: response.status().as_u16(),
            });
        }

        let body: PricingResponse = response.json().await?;
        body.average_hourly_rate
            .ok_or_else(|| SimError::MissingFieldError {
                field: RATE_FIELD.to_string(),
            })
    }
}
