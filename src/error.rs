//! Error taxonomies for the framing, field-decode, and encode stages.
//!
//! Framing errors are fatal to the whole stream; field errors are
//! recorded on the offending [`crate::imf::field::Field`] without
//! aborting the rest of the message; encode errors abort `encode()`
//! immediately.

use thiserror::Error;

/// Errors raised by [`crate::framing::MessageDecoder`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FramingError {
    #[error("line exceeded maximum length of {max} bytes")]
    LineTooLong { max: usize },

    #[error("bare LF in strict (non mixed-EOL) mode")]
    BareLF,

    #[error("input ended mid-CR")]
    TruncatedEol,

    #[error("header line lacks a colon after the field name")]
    MissingColon,

    #[error("header line starts with ':' or whitespace with no pending field")]
    EmptyFieldName,
}

/// Errors raised while decoding the value of a single field.
///
/// These never escape [`crate::framing::MessageDecoder`] directly: they
/// are flattened to a `String` on `Field.error` (spec's `Field.Error`),
/// but are kept as a typed enum internally so callers that inspect a
/// freshly-decoded field's raw error source aren't stuck re-parsing text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldDecodeError {
    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid trailing data")]
    InvalidTrailingData,
}

/// Errors raised by [`crate::encode::MessageEncoder`] / [`crate::encode::DataEncoder`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("field value forbids an empty list")]
    InvalidEmpty,

    #[error("unencodable control character 0x{0:02x}")]
    UnencodableControl(u8),

    #[error("address is missing a local-part or domain")]
    IncompleteAddress,
}
