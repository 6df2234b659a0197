//! Raw MIME envelope

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use super::{headers::strip_placeholder_headers, MailComposer, Message};

const CRLF: &str = "\r\n";

/// End-of-data sentinel the provider expects after the body
const TERMINATOR: &str = "\r\n\r\n\r\n.";

/// A base64-encoded raw envelope ready for a raw send
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEnvelope {
    data: String,
}

impl RawEnvelope {
    /// Builds the envelope from a message's raw header lines and body lines.
    ///
    /// Placeholder header lines are dropped, then `To:` and `Subject:` headers are appended.
    /// Header well-formedness is not checked.
    pub fn build(message: &Message, composer: &impl MailComposer) -> Self {
        let mut headers = strip_placeholder_headers(message.raw_headers());

        let to = message
            .to_addresses()
            .iter()
            .map(|address| composer.format_address(address, message.charset_label()))
            .collect::<Vec<_>>()
            .join(", ");
        headers.push(format!("To: {to}"));

        headers.push(format!(
            "Subject: {}",
            composer.encode_subject(message.subject(), message.charset_label())
        ));

        let envelope = format!(
            "{headers}{CRLF}{CRLF}{body}{TERMINATOR}",
            headers = headers.join(CRLF),
            body = message.raw_body_lines().join(CRLF),
        );

        Self {
            data: STANDARD.encode(envelope),
        }
    }

    /// The base64 payload
    pub fn data(&self) -> &str {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::mail::{tests::MockMailComposer, PLACEHOLDER_HEADERS};

    use super::*;

    fn passthrough_composer() -> MockMailComposer {
        let mut composer = MockMailComposer::new();

        composer
            .expect_format_address()
            .returning(|address, _| address.to_string());
        composer
            .expect_encode_subject()
            .returning(|subject, _| format!("<{subject}>"));

        composer
    }

    fn decode(envelope: &RawEnvelope) -> Result<String, Box<dyn std::error::Error>> {
        Ok(String::from_utf8(STANDARD.decode(envelope.data())?)?)
    }

    fn header_block(decoded: &str) -> Vec<&str> {
        decoded
            .split("\r\n\r\n")
            .next()
            .unwrap_or_default()
            .split("\r\n")
            .collect()
    }

    #[test]
    fn test_envelope_strips_placeholders_and_appends_to_and_subject() -> TestResult {
        let mut headers: Vec<String> = PLACEHOLDER_HEADERS.iter().map(|h| h.to_string()).collect();
        headers.push("X-Custom: 1".to_string());

        let message = Message::new("a@x.com", "b@x.com,c@x.com", "Hi")
            .raw(headers, vec!["hello".to_string()]);

        let decoded = decode(&RawEnvelope::build(&message, &passthrough_composer()))?;

        assert_eq!(
            header_block(&decoded),
            vec!["X-Custom: 1", "To: b@x.com, c@x.com", "Subject: <Hi>"]
        );

        for placeholder in PLACEHOLDER_HEADERS {
            assert!(!decoded.contains(placeholder));
        }

        Ok(())
    }

    #[test]
    fn test_envelope_layout() -> TestResult {
        let message = Message::new("a@x.com", "b@x.com", "Hi").raw(
            vec!["From: a@x.com".to_string()],
            vec!["line one".to_string(), "line two".to_string()],
        );

        let decoded = decode(&RawEnvelope::build(&message, &passthrough_composer()))?;

        assert_eq!(
            decoded,
            "From: a@x.com\r\nTo: b@x.com\r\nSubject: <Hi>\r\n\r\nline one\r\nline two\r\n\r\n\r\n."
        );

        Ok(())
    }

    #[test]
    fn test_scalar_and_single_element_recipients_build_identical_envelopes() {
        let composer = passthrough_composer();

        let scalar = Message::new("a@x.com", "b@x.com", "Hi");
        let list = Message::new("a@x.com", vec!["b@x.com"], "Hi");

        assert_eq!(
            RawEnvelope::build(&scalar, &composer),
            RawEnvelope::build(&list, &composer)
        );
    }

    #[test]
    fn test_envelope_uses_composer_for_addresses_and_subject() -> TestResult {
        let mut composer = MockMailComposer::new();

        composer
            .expect_format_address()
            .times(2)
            .withf(|_, charset| charset == "ISO-8859-1")
            .returning(|address, _| format!("Someone <{address}>"));
        composer
            .expect_encode_subject()
            .times(1)
            .withf(|subject, charset| subject == "Hi" && charset == "ISO-8859-1")
            .returning(|_, _| "=?ISO-8859-1?B?SGk=?=".to_string());

        let message = Message::new("a@x.com", vec!["b@x.com", "c@x.com"], "Hi").charset("ISO-8859-1");

        let decoded = decode(&RawEnvelope::build(&message, &composer))?;

        assert_eq!(
            header_block(&decoded),
            vec![
                "To: Someone <b@x.com>, Someone <c@x.com>",
                "Subject: =?ISO-8859-1?B?SGk=?="
            ]
        );

        Ok(())
    }
}
