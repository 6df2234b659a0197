//! Query API HTTP client

use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::{errors::ProviderError, DeliveryOptions, ProviderResponse};

use super::params::QueryParams;

/// SES configuration
#[derive(Clone, Debug, Parser)]
pub struct SesConfig {
    /// The SES Query API endpoint
    #[clap(
        long = "ses-endpoint",
        env = "SES_ENDPOINT",
        default_value = "https://email.us-east-1.amazonaws.com"
    )]
    pub endpoint: String,

    /// The configuration set applied to every send
    #[clap(long = "ses-configuration-set", env = "SES_CONFIGURATION_SET")]
    pub configuration_set: Option<String>,

    /// Request timeout in seconds
    #[clap(long = "ses-timeout-secs", env = "SES_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

impl SesConfig {
    /// The base options merged into every provider call
    pub fn delivery_options(&self) -> DeliveryOptions {
        match &self.configuration_set {
            Some(name) => DeliveryOptions::new().with("ConfigurationSetName", name.as_str()),
            None => DeliveryOptions::new(),
        }
    }
}

/// Posts Query API forms to the provider.
///
/// Implementations are expected to sign requests; the core never handles credentials.
#[async_trait]
pub trait QueryClient: Send + Sync + 'static {
    /// Posts `params` and returns the provider's response, whatever its status
    async fn post_form(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mock! {
    pub QueryClient {}

    #[async_trait]
    impl QueryClient for QueryClient {
        async fn post_form(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError>;
    }
}

/// A reqwest client that posts unsigned forms.
///
/// Suitable for SES-compatible local endpoints or a signing proxy in front of SES.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpQueryClient {
    /// Create a new client from the SES configuration
    pub fn new(config: &SesConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn post_form(&self, params: &QueryParams) -> Result<ProviderResponse, ProviderError> {
        debug!(
            action = params.get("Action").map(String::as_str),
            endpoint = %self.endpoint,
            "posting query request"
        );

        let response = self.http.post(&self.endpoint).form(params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProviderResponse::new(status, body))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        debug!("reqwest::Error -> ProviderError");

        if err.is_timeout() || err.is_connect() {
            ProviderError::Unreachable(err.to_string())
        } else {
            ProviderError::UnknownError(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(configuration_set: Option<&str>) -> SesConfig {
        SesConfig {
            endpoint: "http://localhost:4566".to_string(),
            configuration_set: configuration_set.map(str::to_string),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_delivery_options_with_configuration_set() {
        let options = config(Some("transactional")).delivery_options();

        assert_eq!(
            options.get("ConfigurationSetName"),
            Some(&json!("transactional"))
        );
    }

    #[test]
    fn test_delivery_options_without_configuration_set() {
        assert!(config(None).delivery_options().is_empty());
    }

    #[test]
    fn test_config_from_args() {
        let config = SesConfig::parse_from([
            "sesmail",
            "--ses-endpoint",
            "http://localhost:4566",
            "--ses-timeout-secs",
            "3",
        ]);

        assert_eq!(config.endpoint, "http://localhost:4566");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_config_defaults_and_configuration_set_flag() {
        let config = SesConfig::parse_from(["sesmail", "--ses-configuration-set", "marketing"]);

        assert_eq!(config.configuration_set.as_deref(), Some("marketing"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_http_client_builds() {
        assert!(HttpQueryClient::new(&config(None)).is_ok());
    }
}
