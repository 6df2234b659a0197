//! Email provider module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::{
    errors::ProviderError, DeliveryOptions, Destination, MessagePayload, RawEnvelope, ResponseBody,
};

/// A response from the email provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderResponse {
    /// The HTTP status code
    pub status: u16,

    /// The response body
    pub body: ResponseBody,
}

impl ProviderResponse {
    /// Creates a new response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::new(body),
        }
    }

    /// Whether the provider reported success
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A remote transactional email provider
///
/// Each method performs exactly one provider call. A provider response, successful or not, is
/// returned as [`Ok`]; [`Err`] is reserved for failures that produced no response at all.
#[async_trait]
pub trait EmailProvider: Send + Sync + 'static {
    /// Sends a raw MIME envelope
    async fn send_raw_email(
        &self,
        envelope: &RawEnvelope,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Sends a structured message
    ///
    /// # Arguments
    /// * `source` - The sender address.
    /// * `destination` - The recipients.
    /// * `message` - The subject and body parts.
    /// * `options` - Call options, including any reply-to addresses.
    async fn send_email(
        &self,
        source: &str,
        destination: &Destination,
        message: &MessagePayload,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Starts verification of a sender address
    async fn verify_email_address(
        &self,
        email: &str,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Removes a verified sender address
    async fn delete_verified_email_address(
        &self,
        email: &str,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Lists the verified sender addresses
    async fn list_verified_email_addresses(
        &self,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Fetches the account's sending limits
    async fn get_send_quota(
        &self,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Fetches the account's recent sending statistics
    async fn get_send_statistics(
        &self,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mock! {
    pub EmailProvider {}

    #[async_trait]
    impl EmailProvider for EmailProvider {
        async fn send_raw_email(&self, envelope: &RawEnvelope, options: &DeliveryOptions) -> Result<ProviderResponse, ProviderError>;
        async fn send_email(
            &self,
            source: &str,
            destination: &Destination,
            message: &MessagePayload,
            options: &DeliveryOptions,
        ) -> Result<ProviderResponse, ProviderError>;
        async fn verify_email_address(&self, email: &str, options: &DeliveryOptions) -> Result<ProviderResponse, ProviderError>;
        async fn delete_verified_email_address(&self, email: &str, options: &DeliveryOptions) -> Result<ProviderResponse, ProviderError>;
        async fn list_verified_email_addresses(&self, options: &DeliveryOptions) -> Result<ProviderResponse, ProviderError>;
        async fn get_send_quota(&self, options: &DeliveryOptions) -> Result<ProviderResponse, ProviderError>;
        async fn get_send_statistics(&self, options: &DeliveryOptions) -> Result<ProviderResponse, ProviderError>;
    }
}
