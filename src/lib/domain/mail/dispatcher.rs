//! Delivery dispatcher

use std::{fmt, sync::Arc};

use tracing::debug;

use super::{
    DeliveryOutcome, DeliveryTransport, DiagnosticSink, EmailProvider, MailComposer, Message,
    Operation, RawEnvelope, ResponseBody, StructuredRequest,
};

/// How a message is encoded for the provider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// A hand-assembled base64 MIME envelope
    Raw,

    /// Discrete subject, body and destination fields
    Structured,
}

impl DeliveryMode {
    /// Picks raw delivery for messages with attachments or custom headers
    pub fn select(message: &Message) -> Self {
        if message.attachments().is_empty() && message.custom_headers().is_empty() {
            Self::Structured
        } else {
            Self::Raw
        }
    }
}

/// The caller-facing entry point for mail delivery.
///
/// Each operation performs one provider round trip and keeps its outcome as
/// [`last_result`](Self::last_result) until the next call. Operations take `&mut self`, so
/// concurrent senders need their own dispatcher.
pub struct Dispatcher<P, S, C>
where
    P: EmailProvider,
    S: DiagnosticSink,
    C: MailComposer,
{
    transport: DeliveryTransport<P, S>,
    composer: Arc<C>,
    last_result: Option<DeliveryOutcome>,
}

impl<P, S, C> Dispatcher<P, S, C>
where
    P: EmailProvider,
    S: DiagnosticSink,
    C: MailComposer,
{
    /// Creates a new dispatcher
    pub fn new(transport: DeliveryTransport<P, S>, composer: Arc<C>) -> Self {
        Self {
            transport,
            composer,
            last_result: None,
        }
    }

    /// The outcome of the most recent call, if any
    pub fn last_result(&self) -> Option<&DeliveryOutcome> {
        self.last_result.as_ref()
    }

    /// Sends `message` using the mode chosen by [`DeliveryMode::select`]
    pub async fn deliver(&mut self, message: &Message) -> bool {
        self.send(message, DeliveryMode::select(message)).await
    }

    /// Sends `message` using `mode`.
    ///
    /// A raw send of a message without raw lines composes them first.
    ///
    /// # Returns
    /// `true` if the provider accepted the message.
    pub async fn send(&mut self, message: &Message, mode: DeliveryMode) -> bool {
        debug!(?mode, from = message.from_address(), "dispatching message");

        let outcome = match mode {
            DeliveryMode::Raw => self.send_raw(message).await,
            DeliveryMode::Structured => {
                let request = StructuredRequest::build(message, self.transport.options());
                self.transport.send(&request).await
            }
        };

        self.record(outcome).ok
    }

    /// Starts verification of a sender address
    pub async fn verify_email_address(&mut self, email: &str) -> bool {
        let outcome = self.transport.verify_address(email).await;

        self.record(outcome).ok
    }

    /// Removes a verified sender address
    pub async fn delete_verified_email_address(&mut self, email: &str) -> bool {
        let outcome = self.transport.delete_verified_address(email).await;

        self.record(outcome).ok
    }

    /// Lists the verified sender addresses.
    ///
    /// The body is returned even when the call failed; check
    /// [`last_result`](Self::last_result) for success.
    pub async fn list_verified_email_addresses(&mut self) -> ResponseBody {
        let outcome = self.transport.list_verified_addresses().await;

        self.record(outcome).body.clone()
    }

    /// Fetches the sending quota.
    ///
    /// The body is returned even when the call failed; check
    /// [`last_result`](Self::last_result) for success.
    pub async fn get_send_quota(&mut self) -> ResponseBody {
        let outcome = self.transport.send_quota().await;

        self.record(outcome).body.clone()
    }

    /// Fetches the sending statistics.
    ///
    /// The body is returned even when the call failed; check
    /// [`last_result`](Self::last_result) for success.
    pub async fn get_send_statistics(&mut self) -> ResponseBody {
        let outcome = self.transport.send_statistics().await;

        self.record(outcome).body.clone()
    }

    async fn send_raw(&self, message: &Message) -> DeliveryOutcome {
        if !message.raw_headers().is_empty() || !message.raw_body_lines().is_empty() {
            let envelope = RawEnvelope::build(message, self.composer.as_ref());
            return self.transport.send_raw(&envelope, message.from_address()).await;
        }

        match self.composer.compose(message) {
            Ok(composed) => {
                let envelope = RawEnvelope::build(&composed, self.composer.as_ref());
                self.transport
                    .send_raw(&envelope, composed.from_address())
                    .await
            }
            Err(err) => self.transport.reject(Operation::SendRawEmail, err),
        }
    }

    fn record(&mut self, outcome: DeliveryOutcome) -> &DeliveryOutcome {
        self.last_result.insert(outcome)
    }
}

impl<P, S, C> fmt::Debug for Dispatcher<P, S, C>
where
    P: EmailProvider,
    S: DiagnosticSink,
    C: MailComposer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("transport", &self.transport)
            .field("composer", &"MailComposer")
            .field("last_result", &self.last_result)
            .finish()
    }
}
