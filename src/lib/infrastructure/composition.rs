//! Mail composition with lettre

mod encoding;
mod mime;

pub use encoding::{encode_header, format_address, transcode};
pub use mime::{attachment_content_type, LettreComposer};
