//! Header encoding

use base64::{engine::general_purpose::STANDARD, Engine as _};
use encoding_rs::{Encoding, UTF_8};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISPLAY_NAME_REGEX: Regex = Regex::new(r"^\s*(.*?)\s*<([^<>]+)>\s*$").unwrap();
}

/// Transcodes `value` to `charset`.
///
/// Returns the label the bytes are actually in: `charset` when the label is known and can
/// represent the text, otherwise `UTF-8`.
pub fn transcode<'a>(value: &str, charset: &'a str) -> (&'a str, Vec<u8>) {
    let label = charset.trim();

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) if encoding == UTF_8 => (label, value.as_bytes().to_vec()),
        Some(encoding) => match encoding.encode(value) {
            (bytes, _, false) => (label, bytes.into_owned()),
            _ => ("UTF-8", value.as_bytes().to_vec()),
        },
        None => ("UTF-8", value.as_bytes().to_vec()),
    }
}

/// Encodes a header value as an RFC 2047 encoded word when it is not plain ASCII.
///
/// See [`transcode`] for how the charset is chosen.
pub fn encode_header(value: &str, charset: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    let (label, bytes) = transcode(value, charset);

    format!("=?{label}?B?{}?=", STANDARD.encode(bytes))
}

/// Formats an address for a header.
///
/// `Name <addr>` keeps its angle address and gets its display name encoded; a bare address is
/// trimmed.
pub fn format_address(address: &str, charset: &str) -> String {
    match DISPLAY_NAME_REGEX.captures(address) {
        Some(captures) => {
            let name = captures[1].trim_matches('"');
            let addr = &captures[2];

            if name.is_empty() {
                format!("<{addr}>")
            } else {
                format!("{} <{addr}>", encode_header(name, charset))
            }
        }
        None => address.trim().to_string(),
    }
}
