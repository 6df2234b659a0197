//! MIME composer built on lettre's part builders

use std::path::Path;

use lettre::message::{
    header::ContentType, Attachment as AttachmentPart, MultiPart, SinglePart,
};

use crate::domain::mail::{
    errors::ComposeError, AddressList, Attachment, MailComposer, Message,
};

use super::encoding::{encode_header, format_address, transcode};

const CRLF: &str = "\r\n";

/// Composes raw header and body lines with lettre.
///
/// Display names, custom headers and text parts all use the message's charset.
#[derive(Clone, Copy, Debug, Default)]
pub struct LettreComposer;

impl LettreComposer {
    fn address_header(&self, addresses: &AddressList, charset: &str) -> String {
        addresses
            .iter()
            .map(|address| self.format_address(address, charset))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Guesses an attachment's content type from its file extension
pub fn attachment_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

enum Part {
    Single(SinglePart),
    Multi(MultiPart),
}

impl Part {
    fn formatted(&self) -> Vec<u8> {
        match self {
            Self::Single(part) => part.formatted(),
            Self::Multi(part) => part.formatted(),
        }
    }
}

fn text_part(subtype: &str, text: &str, charset: &str) -> Result<SinglePart, ComposeError> {
    let (label, bytes) = transcode(text, charset);
    let content_type = ContentType::parse(&format!("text/{subtype}; charset={label}"))
        .map_err(|_| ComposeError::InvalidCharset(label.to_string()))?;

    Ok(SinglePart::builder().header(content_type).body(bytes))
}

fn content_part(message: &Message) -> Result<Part, ComposeError> {
    let charset = message.charset_label();

    let part = match (message.text(), message.html()) {
        (Some(text), Some(html)) => Part::Multi(
            MultiPart::alternative()
                .singlepart(text_part("plain", text, charset)?)
                .singlepart(text_part("html", html, charset)?),
        ),
        (None, Some(html)) => Part::Single(text_part("html", html, charset)?),
        (Some(text), None) => Part::Single(text_part("plain", text, charset)?),
        (None, None) => Part::Single(text_part("plain", "", charset)?),
    };

    Ok(part)
}

fn attachment_part(attachment: &Attachment) -> Result<SinglePart, ComposeError> {
    let content_type = ContentType::parse(&attachment.content_type).map_err(|_| {
        ComposeError::InvalidContentType {
            filename: attachment.filename.clone(),
            content_type: attachment.content_type.clone(),
        }
    })?;

    Ok(AttachmentPart::new(attachment.filename.clone())
        .body(attachment.content.clone(), content_type))
}

fn body_part(message: &Message) -> Result<Part, ComposeError> {
    let content = content_part(message)?;

    if message.attachments().is_empty() {
        return Ok(content);
    }

    let mut mixed = match content {
        Part::Single(part) => MultiPart::mixed().singlepart(part),
        Part::Multi(part) => MultiPart::mixed().multipart(part),
    };

    for attachment in message.attachments() {
        mixed = mixed.singlepart(attachment_part(attachment)?);
    }

    Ok(Part::Multi(mixed))
}

impl MailComposer for LettreComposer {
    fn format_address(&self, address: &str, charset: &str) -> String {
        format_address(address, charset)
    }

    fn encode_subject(&self, subject: &str, charset: &str) -> String {
        encode_header(subject, charset)
    }

    fn compose(&self, message: &Message) -> Result<Message, ComposeError> {
        let charset = message.charset_label();
        let mut headers = vec![format!(
            "From: {}",
            self.format_address(message.from_address(), charset)
        )];

        if !message.reply_to_addresses().is_empty() {
            headers.push(format!(
                "Reply-To: {}",
                self.address_header(message.reply_to_addresses(), charset)
            ));
        }

        if !message.cc_addresses().is_empty() {
            headers.push(format!(
                "Cc: {}",
                self.address_header(message.cc_addresses(), charset)
            ));
        }

        // SES delivers to Bcc headers of a raw message and strips them before sending
        if !message.bcc_addresses().is_empty() {
            headers.push(format!(
                "Bcc: {}",
                self.address_header(message.bcc_addresses(), charset)
            ));
        }

        for (name, value) in message.custom_headers() {
            headers.push(format!("{name}: {}", encode_header(value, charset)));
        }

        headers.push("MIME-Version: 1.0".to_string());

        let formatted = String::from_utf8(body_part(message)?.formatted())?;
        let (part_headers, body) = formatted
            .split_once("\r\n\r\n")
            .unwrap_or((formatted.as_str(), ""));

        headers.extend(part_headers.split(CRLF).map(str::to_string));

        let body_lines = body
            .trim_end_matches(CRLF)
            .split(CRLF)
            .map(str::to_string)
            .collect();

        Ok(message.clone().raw(headers, body_lines))
    }
}
