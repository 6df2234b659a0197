//! Email message

use std::fmt;

/// The charset applied to subjects and bodies when none is given
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// An ordered list of addresses
///
/// A scalar string is treated as a comma-delimited list and split on `,` without trimming, so a
/// single address becomes a one-element list. Callers are responsible for supplying clean
/// addresses; surrounding whitespace is kept and may be rejected by the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressList(Vec<String>);

impl AddressList {
    /// Create an empty address list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether the list holds no addresses
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of entries in the list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Flattens every entry through `split(',')`
    pub fn split_addresses(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for AddressList {
    fn from(raw: &str) -> Self {
        Self(raw.split(',').map(str::to_string).collect())
    }
}

impl From<String> for AddressList {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl<S: Into<String>> From<Vec<S>> for AddressList {
    fn from(addresses: Vec<S>) -> Self {
        Self(addresses.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for AddressList {
    fn from(addresses: &[&str]) -> Self {
        Self(addresses.iter().map(|a| a.to_string()).collect())
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// A file attached to a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// The file name presented to the recipient
    pub filename: String,

    /// The MIME content type, e.g. `application/pdf`
    pub content_type: String,

    /// The raw file contents
    pub content: Vec<u8>,
}

impl Attachment {
    /// Creates a new attachment
    pub fn new(filename: &str, content_type: &str, content: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            content,
        }
    }
}

/// An email message
///
/// Built once with the chained setters and then read by the encoders. `raw_headers` and
/// `raw_body_lines` are only used by raw sends and are normally filled in by a
/// [`MailComposer`](super::MailComposer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    from: String,
    to: AddressList,
    cc: AddressList,
    bcc: AddressList,
    reply_to: AddressList,
    subject: String,
    text_body: Option<String>,
    html_body: Option<String>,
    charset: String,
    headers: Vec<(String, String)>,
    attachments: Vec<Attachment>,
    raw_headers: Vec<String>,
    raw_body_lines: Vec<String>,
}

impl Message {
    /// Creates a new message with the required fields
    pub fn new(from: &str, to: impl Into<AddressList>, subject: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.into(),
            cc: AddressList::new(),
            bcc: AddressList::new(),
            reply_to: AddressList::new(),
            subject: subject.to_string(),
            text_body: None,
            html_body: None,
            charset: DEFAULT_CHARSET.to_string(),
            headers: Vec::new(),
            attachments: Vec::new(),
            raw_headers: Vec::new(),
            raw_body_lines: Vec::new(),
        }
    }

    /// Sets the carbon-copy recipients
    pub fn cc(mut self, cc: impl Into<AddressList>) -> Self {
        self.cc = cc.into();
        self
    }

    /// Sets the blind carbon-copy recipients
    pub fn bcc(mut self, bcc: impl Into<AddressList>) -> Self {
        self.bcc = bcc.into();
        self
    }

    /// Sets the reply-to addresses
    pub fn reply_to(mut self, reply_to: impl Into<AddressList>) -> Self {
        self.reply_to = reply_to.into();
        self
    }

    /// Sets the plain text body
    pub fn text_body(mut self, body: &str) -> Self {
        self.text_body = Some(body.to_string());
        self
    }

    /// Sets the HTML body
    pub fn html_body(mut self, body: &str) -> Self {
        self.html_body = Some(body.to_string());
        self
    }

    /// Sets the charset used for the subject and each body part
    pub fn charset(mut self, charset: &str) -> Self {
        self.charset = charset.to_string();
        self
    }

    /// Adds a custom header
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds an attachment
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Sets the pre-built raw header lines and body lines
    pub fn raw(mut self, headers: Vec<String>, body_lines: Vec<String>) -> Self {
        self.raw_headers = headers;
        self.raw_body_lines = body_lines;
        self
    }

    /// The sender address
    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// The primary recipients
    pub fn to_addresses(&self) -> &AddressList {
        &self.to
    }

    /// The carbon-copy recipients
    pub fn cc_addresses(&self) -> &AddressList {
        &self.cc
    }

    /// The blind carbon-copy recipients
    pub fn bcc_addresses(&self) -> &AddressList {
        &self.bcc
    }

    /// The reply-to addresses
    pub fn reply_to_addresses(&self) -> &AddressList {
        &self.reply_to
    }

    /// The subject, before any charset encoding
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The plain text body
    pub fn text(&self) -> Option<&str> {
        self.text_body.as_deref()
    }

    /// The HTML body
    pub fn html(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    /// The charset label
    pub fn charset_label(&self) -> &str {
        &self.charset
    }

    /// Custom headers in insertion order
    pub fn custom_headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Attachments in insertion order
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Raw header lines for raw sends
    pub fn raw_headers(&self) -> &[String] {
        &self.raw_headers
    }

    /// Raw body lines for raw sends
    pub fn raw_body_lines(&self) -> &[String] {
        &self.raw_body_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_address_is_one_element_list() {
        let scalar = AddressList::from("b@x.com");
        let list = AddressList::from(vec!["b@x.com"]);

        assert_eq!(scalar, list);
        assert_eq!(scalar.len(), 1);
    }

    #[test]
    fn test_scalar_address_list_is_split_without_trimming() {
        let list = AddressList::from("b@x.com, c@x.com");

        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["b@x.com", " c@x.com"]);
    }

    #[test]
    fn test_split_addresses_flattens_entries() {
        let list = AddressList::from(vec!["a@x.com,b@x.com", "c@x.com"]);

        assert_eq!(list.split_addresses(), vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn test_message_defaults() {
        let message = Message::new("a@x.com", "b@x.com", "Hi");

        assert_eq!(message.charset_label(), DEFAULT_CHARSET);
        assert!(message.cc_addresses().is_empty());
        assert!(message.text().is_none());
        assert!(message.html().is_none());
        assert!(message.raw_headers().is_empty());
    }

    #[test]
    fn test_message_setters() {
        let message = Message::new("a@x.com", "b@x.com", "Hi")
            .cc("c@x.com")
            .text_body("hello")
            .header("X-Campaign", "welcome")
            .attachment(Attachment::new("a.txt", "text/plain", b"a".to_vec()));

        assert_eq!(message.cc_addresses().to_string(), "c@x.com");
        assert_eq!(message.text(), Some("hello"));
        assert_eq!(message.custom_headers().len(), 1);
        assert_eq!(message.attachments()[0].filename, "a.txt");
    }
}
