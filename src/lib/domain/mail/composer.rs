//! Mail composition seam

#[cfg(test)]
use mockall::mock;

use super::{errors::ComposeError, Message};

/// Builds the MIME pieces a raw send needs.
///
/// The dispatcher holds one of these instead of building MIME itself.
pub trait MailComposer: Send + Sync + 'static {
    /// Formats an address for a header, encoding any display name in `charset`.
    fn format_address(&self, address: &str, charset: &str) -> String;

    /// Encodes a subject for the given charset.
    fn encode_subject(&self, subject: &str, charset: &str) -> String;

    /// Returns a copy of `message` with its raw header lines and raw body lines filled in.
    ///
    /// # Returns
    /// - [`Ok`] with the composed [`Message`].
    /// - [`Err`] containing a [`ComposeError`] if a MIME part could not be built.
    fn compose(&self, message: &Message) -> Result<Message, ComposeError>;
}

#[cfg(test)]
mock! {
    pub MailComposer {}

    impl MailComposer for MailComposer {
        fn format_address(&self, address: &str, charset: &str) -> String;
        fn encode_subject(&self, subject: &str, charset: &str) -> String;
        fn compose(&self, message: &Message) -> Result<Message, ComposeError>;
    }
}
