//! Structured send request

use serde::Serialize;
use serde_json::Value;

use super::{AddressList, DeliveryOptions, Message};

/// The recipient set of a structured send
///
/// Empty copy lists are omitted entirely rather than sent as empty keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    /// Primary recipients
    pub to_addresses: Vec<String>,

    /// Carbon-copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_addresses: Option<Vec<String>>,

    /// Blind carbon-copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc_addresses: Option<Vec<String>>,
}

/// A piece of text and the charset it is declared in
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    /// The text
    pub data: String,

    /// The charset label
    pub charset: String,
}

/// The body parts of a structured send
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    /// The plain text part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Content>,

    /// The HTML part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Content>,
}

/// The subject and body of a structured send
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessagePayload {
    /// The subject
    pub subject: Content,

    /// The body parts
    pub body: Body,
}

/// Everything a structured send passes to the provider
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredRequest {
    /// The sender address
    pub source: String,

    /// The recipients
    pub destination: Destination,

    /// The subject and body
    pub message: MessagePayload,

    /// The call options, including any reply-to addresses
    pub options: DeliveryOptions,
}

impl StructuredRequest {
    /// Builds the structured request for `message` on top of the base `options`.
    ///
    /// `ToAddresses` and `ReplyToAddresses` are split on `,` without trimming. Reply-to goes
    /// into the options, not the destination. No body is required; a message without one is
    /// sent with an empty `Body` and left for the provider to reject.
    pub fn build(message: &Message, options: &DeliveryOptions) -> Self {
        let destination = Destination {
            to_addresses: message.to_addresses().split_addresses(),
            cc_addresses: non_empty(message.cc_addresses()),
            bcc_addresses: non_empty(message.bcc_addresses()),
        };

        let options = match non_empty(message.reply_to_addresses()) {
            Some(_) => options.with(
                "ReplyToAddresses",
                Value::from(message.reply_to_addresses().split_addresses()),
            ),
            None => options.clone(),
        };

        let charset = message.charset_label();
        let content = |data: &str| Content {
            data: data.to_string(),
            charset: charset.to_string(),
        };

        let payload = MessagePayload {
            subject: content(message.subject()),
            body: Body {
                text: message.text().map(content),
                html: message.html().map(content),
            },
        };

        Self {
            source: message.from_address().to_string(),
            destination,
            message: payload,
            options,
        }
    }
}

fn non_empty(addresses: &AddressList) -> Option<Vec<String>> {
    if addresses.is_empty() {
        None
    } else {
        Some(addresses.iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_text_only_payload() -> TestResult {
        let message = Message::new("a@x.com", "b@x.com", "Hi")
            .text_body("hello")
            .charset("UTF-8");

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());

        assert_eq!(
            serde_json::to_value(&request.message)?,
            json!({
                "Subject": { "Data": "Hi", "Charset": "UTF-8" },
                "Body": { "Text": { "Data": "hello", "Charset": "UTF-8" } }
            })
        );

        Ok(())
    }

    #[test]
    fn test_text_and_html_coexist() -> TestResult {
        let message = Message::new("a@x.com", "b@x.com", "Hi")
            .text_body("hello")
            .html_body("<p>hello</p>");

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());
        let body = serde_json::to_value(&request.message.body)?;

        assert_eq!(body["Text"]["Data"], json!("hello"));
        assert_eq!(body["Html"]["Data"], json!("<p>hello</p>"));

        Ok(())
    }

    #[test]
    fn test_missing_bodies_send_an_empty_body() -> TestResult {
        let message = Message::new("a@x.com", "b@x.com", "Hi");

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());

        assert_eq!(serde_json::to_value(&request.message.body)?, json!({}));

        Ok(())
    }

    #[test]
    fn test_destination_splits_to_and_omits_empty_copies() -> TestResult {
        let message = Message::new("a@x.com", "b@x.com,c@x.com", "Hi");

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());

        assert_eq!(
            serde_json::to_value(&request.destination)?,
            json!({ "ToAddresses": ["b@x.com", "c@x.com"] })
        );

        Ok(())
    }

    #[test]
    fn test_destination_includes_copies_when_present() -> TestResult {
        let message = Message::new("a@x.com", "b@x.com", "Hi")
            .cc(vec!["c@x.com"])
            .bcc(vec!["d@x.com", "e@x.com"]);

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());

        assert_eq!(
            serde_json::to_value(&request.destination)?,
            json!({
                "ToAddresses": ["b@x.com"],
                "CcAddresses": ["c@x.com"],
                "BccAddresses": ["d@x.com", "e@x.com"]
            })
        );

        Ok(())
    }

    #[test]
    fn test_to_addresses_keep_surrounding_whitespace() {
        let message = Message::new("a@x.com", "b@x.com, c@x.com", "Hi");

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());

        assert_eq!(request.destination.to_addresses, vec!["b@x.com", " c@x.com"]);
    }

    #[test]
    fn test_reply_to_goes_into_options_without_touching_base() {
        let base = DeliveryOptions::from_iter([("ConfigurationSetName", "marketing")]);
        let message = Message::new("a@x.com", "b@x.com", "Hi").reply_to("r@x.com,s@x.com");

        let request = StructuredRequest::build(&message, &base);

        assert_eq!(
            request.options.get("ReplyToAddresses"),
            Some(&json!(["r@x.com", "s@x.com"]))
        );
        assert_eq!(
            request.options.get("ConfigurationSetName"),
            Some(&json!("marketing"))
        );
        assert!(base.get("ReplyToAddresses").is_none());
    }

    #[test]
    fn test_no_reply_to_key_without_reply_to() {
        let message = Message::new("a@x.com", "b@x.com", "Hi");

        let request = StructuredRequest::build(&message, &DeliveryOptions::new());

        assert!(request.options.get("ReplyToAddresses").is_none());
        assert_eq!(request.source, "a@x.com");
    }
}
