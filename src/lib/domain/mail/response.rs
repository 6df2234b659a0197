//! Provider response bodies

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::errors::ResponseBodyError;

/// The opaque body of a provider response.
///
/// The raw text is always kept for diagnostics; the typed views decode it on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseBody(String);

impl ResponseBody {
    /// Wraps a raw response body
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The body's text/XML rendering
    pub fn as_xml(&self) -> &str {
        &self.0
    }

    /// Decodes the addresses of a list-verified-addresses response
    pub fn verified_addresses(&self) -> Result<Vec<String>, ResponseBodyError> {
        let response: ListVerifiedEmailAddressesResponse = quick_xml::de::from_str(&self.0)?;

        Ok(response
            .list_verified_email_addresses_result
            .verified_email_addresses
            .members)
    }

    /// Decodes a send-quota response
    pub fn send_quota(&self) -> Result<SendQuota, ResponseBodyError> {
        let response: GetSendQuotaResponse = quick_xml::de::from_str(&self.0)?;

        Ok(response.get_send_quota_result)
    }

    /// Decodes the data points of a send-statistics response
    pub fn send_statistics(&self) -> Result<Vec<SendDataPoint>, ResponseBodyError> {
        let response: GetSendStatisticsResponse = quick_xml::de::from_str(&self.0)?;

        Ok(response.get_send_statistics_result.send_data_points.members)
    }

    /// Decodes the provider's error document, if the body is one
    pub fn error(&self) -> Option<ProviderErrorDetail> {
        quick_xml::de::from_str::<ErrorResponse>(&self.0)
            .ok()
            .map(|response| response.error)
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResponseBody {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Sending limits of the account
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendQuota {
    /// Maximum messages per 24 hours
    #[serde(rename = "Max24HourSend")]
    pub max_24_hour_send: f64,

    /// Maximum messages per second
    pub max_send_rate: f64,

    /// Messages sent in the last 24 hours
    #[serde(rename = "SentLast24Hours")]
    pub sent_last_24_hours: f64,
}

/// Sending activity for one fifteen-minute interval
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendDataPoint {
    /// Start of the interval
    pub timestamp: DateTime<Utc>,

    /// Messages the provider attempted to deliver
    pub delivery_attempts: u64,

    /// Messages that bounced
    pub bounces: u64,

    /// Messages marked as spam by recipients
    pub complaints: u64,

    /// Messages the provider rejected
    pub rejects: u64,
}

/// The provider's description of a failed call
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderErrorDetail {
    /// `Sender` or `Receiver`
    #[serde(rename = "Type", default)]
    pub kind: String,

    /// Machine-readable error code, e.g. `MessageRejected`
    pub code: String,

    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Members<T> {
    #[serde(rename = "member", default = "Vec::new")]
    members: Vec<T>,
}

impl<T> Default for Members<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListVerifiedEmailAddressesResponse {
    list_verified_email_addresses_result: ListVerifiedEmailAddressesResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListVerifiedEmailAddressesResult {
    #[serde(default)]
    verified_email_addresses: Members<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSendQuotaResponse {
    get_send_quota_result: SendQuota,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSendStatisticsResponse {
    get_send_statistics_result: GetSendStatisticsResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSendStatisticsResult {
    #[serde(default)]
    send_data_points: Members<SendDataPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    error: ProviderErrorDetail,
}
