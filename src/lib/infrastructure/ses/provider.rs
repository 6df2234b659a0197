//! SES provider

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::mail::{
    errors::ProviderError, DeliveryOptions, Destination, EmailProvider, MessagePayload,
    ProviderResponse, RawEnvelope,
};

use super::{
    client::QueryClient,
    params::{add_options, add_serialized, query_params, QueryParams},
};

/// Amazon SES over the Query API.
///
/// Options are flattened first so call-specific arguments win over options of the same name.
#[derive(Debug, Clone)]
pub struct SesProvider<C>
where
    C: QueryClient,
{
    client: Arc<C>,
}

impl<C> SesProvider<C>
where
    C: QueryClient,
{
    /// Create a new SES provider
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    async fn call(
        &self,
        action: &str,
        options: &DeliveryOptions,
        arguments: impl FnOnce(&mut QueryParams) -> Result<(), ProviderError>,
    ) -> Result<ProviderResponse, ProviderError> {
        let mut params = QueryParams::new();
        add_options(&mut params, options);
        arguments(&mut params)?;
        params.extend(query_params(action));

        self.client.post_form(&params).await
    }
}

#[async_trait]
impl<C> EmailProvider for SesProvider<C>
where
    C: QueryClient,
{
    async fn send_raw_email(
        &self,
        envelope: &RawEnvelope,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("SendRawEmail", options, |params| {
            add_serialized(params, "RawMessage", envelope)
        })
        .await
    }

    async fn send_email(
        &self,
        source: &str,
        destination: &Destination,
        message: &MessagePayload,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("SendEmail", options, |params| {
            params.insert("Source".to_string(), source.to_string());
            add_serialized(params, "Destination", destination)?;
            add_serialized(params, "Message", message)
        })
        .await
    }

    async fn verify_email_address(
        &self,
        email: &str,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("VerifyEmailAddress", options, |params| {
            params.insert("EmailAddress".to_string(), email.to_string());
            Ok(())
        })
        .await
    }

    async fn delete_verified_email_address(
        &self,
        email: &str,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("DeleteVerifiedEmailAddress", options, |params| {
            params.insert("EmailAddress".to_string(), email.to_string());
            Ok(())
        })
        .await
    }

    async fn list_verified_email_addresses(
        &self,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("ListVerifiedEmailAddresses", options, |_| Ok(()))
            .await
    }

    async fn get_send_quota(
        &self,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("GetSendQuota", options, |_| Ok(())).await
    }

    async fn get_send_statistics(
        &self,
        options: &DeliveryOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call("GetSendStatistics", options, |_| Ok(())).await
    }
}
