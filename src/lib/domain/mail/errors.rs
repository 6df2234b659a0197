//! Error types for mail dispatch

use thiserror::Error;

/// Errors raised by a provider client before a provider response was received
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    /// The request could not be encoded for the provider
    #[error("invalid provider request: {0}")]
    InvalidRequest(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur while composing the raw MIME parts of a message
#[derive(Debug, Error)]
pub enum ComposeError {
    /// An attachment declared a content type that could not be parsed
    #[error("invalid content type for attachment {filename:?}: {content_type}")]
    InvalidContentType {
        /// The attachment's file name
        filename: String,

        /// The rejected content type
        content_type: String,
    },

    /// A text part's charset could not be declared in its content type
    #[error("invalid charset {0:?}")]
    InvalidCharset(String),

    /// The composed MIME output was not valid UTF-8
    #[error("composed message is not valid UTF-8")]
    InvalidEncoding,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur while decoding a provider response body
#[derive(Debug, Error)]
pub enum ResponseBodyError {
    /// The body is not the expected XML document
    #[error("unexpected response body: {0}")]
    Malformed(#[from] quick_xml::de::DeError),
}

impl From<std::string::FromUtf8Error> for ComposeError {
    fn from(_err: std::string::FromUtf8Error) -> Self {
        ComposeError::InvalidEncoding
    }
}
