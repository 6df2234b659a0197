//! Mail dispatch module.
//!
//! A [`Message`] leaves this module through one of two encodings: a base64 MIME envelope for
//! raw sends ([`RawEnvelope`]) or a [`StructuredRequest`] for simple text and HTML mail. The
//! [`Dispatcher`] picks the encoding and hands the result to the [`DeliveryTransport`], which
//! is the only component that talks to an [`EmailProvider`].

mod composer;
mod diagnostics;
mod dispatcher;
mod envelope;
mod headers;
mod message;
mod options;
mod provider;
mod request;
mod response;
mod transport;

pub mod errors;

pub use composer::MailComposer;
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use dispatcher::{DeliveryMode, Dispatcher};
pub use envelope::RawEnvelope;
pub use headers::{strip_placeholder_headers, PLACEHOLDER_HEADERS};
pub use message::{AddressList, Attachment, Message, DEFAULT_CHARSET};
pub use options::DeliveryOptions;
pub use provider::{EmailProvider, ProviderResponse};
pub use request::{Body, Content, Destination, MessagePayload, StructuredRequest};
pub use response::{ProviderErrorDetail, ResponseBody, SendDataPoint, SendQuota};
pub use transport::{DeliveryOutcome, DeliveryTransport, Operation};

#[cfg(test)]
pub mod tests {
    pub use super::composer::MockMailComposer;
    pub use super::diagnostics::MockDiagnosticSink;
    pub use super::provider::MockEmailProvider;
}
