//! Delivery transport

use std::{fmt, sync::Arc};

use tracing::Level;

use super::{
    errors::ProviderError, DeliveryOptions, DiagnosticSink, EmailProvider, ProviderResponse,
    RawEnvelope, ResponseBody, StructuredRequest,
};

/// The outcome of one provider call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Whether the provider reported success
    pub ok: bool,

    /// The response body, or the error text when no response was received
    pub body: ResponseBody,
}

/// A provider operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Send a raw MIME envelope
    SendRawEmail,

    /// Send a structured message
    SendEmail,

    /// Verify a sender address
    VerifyEmailAddress,

    /// Delete a verified sender address
    DeleteVerifiedEmailAddress,

    /// List verified sender addresses
    ListVerifiedEmailAddresses,

    /// Fetch the sending quota
    GetSendQuota,

    /// Fetch the sending statistics
    GetSendStatistics,
}

impl Operation {
    /// The diagnostic prefix logged when this operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::SendRawEmail => "Error sending raw email: ",
            Self::SendEmail => "Error sending email: ",
            Self::VerifyEmailAddress => "Error verifying email address: ",
            Self::DeleteVerifiedEmailAddress => "Error deleting verified email address: ",
            Self::ListVerifiedEmailAddresses => "Error listing verified email addresses: ",
            Self::GetSendQuota => "Error getting send quota: ",
            Self::GetSendStatistics => "Error getting send statistics: ",
        }
    }
}

/// The only component that talks to the [`EmailProvider`].
///
/// Every operation makes exactly one provider call with the base options, returns a fresh
/// [`DeliveryOutcome`], and logs one diagnostic entry when the outcome is not ok. Provider
/// failures never surface as errors.
pub struct DeliveryTransport<P, S>
where
    P: EmailProvider,
    S: DiagnosticSink,
{
    provider: Arc<P>,
    sink: Arc<S>,
    options: DeliveryOptions,
}

impl<P, S> DeliveryTransport<P, S>
where
    P: EmailProvider,
    S: DiagnosticSink,
{
    /// Creates a new transport
    pub fn new(provider: Arc<P>, sink: Arc<S>, options: DeliveryOptions) -> Self {
        Self {
            provider,
            sink,
            options,
        }
    }

    /// The base options merged into every call
    pub fn options(&self) -> &DeliveryOptions {
        &self.options
    }

    /// Sends a raw envelope from `source`
    pub async fn send_raw(&self, envelope: &RawEnvelope, source: &str) -> DeliveryOutcome {
        let options = self.options.with("Source", source);

        let response = self.provider.send_raw_email(envelope, &options).await;

        self.settle(Operation::SendRawEmail, response)
    }

    /// Sends a structured request; its options already carry the base options
    pub async fn send(&self, request: &StructuredRequest) -> DeliveryOutcome {
        let response = self
            .provider
            .send_email(
                &request.source,
                &request.destination,
                &request.message,
                &request.options,
            )
            .await;

        self.settle(Operation::SendEmail, response)
    }

    /// Starts verification of a sender address
    pub async fn verify_address(&self, email: &str) -> DeliveryOutcome {
        let response = self.provider.verify_email_address(email, &self.options).await;

        self.settle(Operation::VerifyEmailAddress, response)
    }

    /// Removes a verified sender address
    pub async fn delete_verified_address(&self, email: &str) -> DeliveryOutcome {
        let response = self
            .provider
            .delete_verified_email_address(email, &self.options)
            .await;

        self.settle(Operation::DeleteVerifiedEmailAddress, response)
    }

    /// Lists the verified sender addresses
    pub async fn list_verified_addresses(&self) -> DeliveryOutcome {
        let response = self
            .provider
            .list_verified_email_addresses(&self.options)
            .await;

        self.settle(Operation::ListVerifiedEmailAddresses, response)
    }

    /// Fetches the sending quota
    pub async fn send_quota(&self) -> DeliveryOutcome {
        let response = self.provider.get_send_quota(&self.options).await;

        self.settle(Operation::GetSendQuota, response)
    }

    /// Fetches the sending statistics
    pub async fn send_statistics(&self) -> DeliveryOutcome {
        let response = self.provider.get_send_statistics(&self.options).await;

        self.settle(Operation::GetSendStatistics, response)
    }

    /// Fails `operation` without calling the provider
    pub fn reject(&self, operation: Operation, reason: impl fmt::Display) -> DeliveryOutcome {
        self.fail(operation, ResponseBody::new(reason.to_string()))
    }

    fn settle(
        &self,
        operation: Operation,
        response: Result<ProviderResponse, ProviderError>,
    ) -> DeliveryOutcome {
        match response {
            Ok(response) if response.is_ok() => DeliveryOutcome {
                ok: true,
                body: response.body,
            },
            Ok(response) => self.fail(operation, response.body),
            Err(err) => self.fail(operation, ResponseBody::new(err.to_string())),
        }
    }

    fn fail(&self, operation: Operation, body: ResponseBody) -> DeliveryOutcome {
        self.sink.log(
            &format!("{}{}", operation.failure_message(), body.as_xml()),
            Level::DEBUG,
        );

        DeliveryOutcome { ok: false, body }
    }
}

impl<P, S> fmt::Debug for DeliveryTransport<P, S>
where
    P: EmailProvider,
    S: DiagnosticSink,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryTransport")
            .field("provider", &"EmailProvider")
            .field("sink", &"DiagnosticSink")
            .field("options", &self.options)
            .finish()
    }
}
