#![doc = include_str!("../README.md")]

/// Byte-level constants and character-class predicates for the RFC 5322
/// lexical grammar.
pub mod ascii;

/// Low-level, email-specific lexical primitives: folding whitespace and
/// comments, atoms, quoted strings, words, phrases and local-parts.
pub mod text;

/// Typed representations for IMF header field values (addresses,
/// message-ids, date-times, trace tokens) and the closed `FieldValue`
/// dispatch table.
pub mod imf;

/// The top-level `Message` type: an ordered header plus an opaque body.
pub mod message;

/// Streaming byte-stream framing: splits a message into header fields
/// and a body (RFC 5322 §2.1-2.2).
pub mod framing;

/// Renders a decoded `Message` back to RFC 5322 bytes, with soft line
/// folding.
pub mod encode;

/// Error taxonomies shared by the framing, field-decode, and encode
/// stages.
pub mod error;

use crate::encode::{EncoderOptions, MessageEncoder};
use crate::error::{EncodeError, FramingError};
use crate::framing::{DecoderOptions, MessageDecoder};
use crate::message::Message;

/// Decodes a whole message (header + body) from a byte buffer in one
/// call. Equivalent to feeding the whole buffer to a fresh
/// [`MessageDecoder`] and closing it.
///
/// # Examples
///
/// ```
/// let input = b"From: deuxfleurs@example.com\r\n\
/// To: someone_else@example.com\r\n\
/// Subject: An RFC 5322 formatted message\r\n\
/// \r\n\
/// This is the plain text body of the message.";
///
/// let msg = imf_codec::decode_message(imf_codec::framing::DecoderOptions::default(), input)
///     .unwrap();
/// assert_eq!(msg.header.len(), 3);
/// ```
pub fn decode_message(opts: DecoderOptions, input: &[u8]) -> Result<Message, FramingError> {
    MessageDecoder::decode_all(opts, input)
}

/// Renders a decoded [`Message`] back to RFC 5322 bytes.
pub fn encode_message(msg: &Message, opts: EncoderOptions) -> Result<Vec<u8>, EncodeError> {
    MessageEncoder::new(msg, opts).encode()
}
