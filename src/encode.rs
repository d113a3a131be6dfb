//! Rendering header field values and a full [`Message`](crate::message::Message)
//! back to RFC 5322 bytes, with soft line folding (RFC 5322 §2.2.3).

use crate::error::EncodeError;
use crate::imf::field::{canonical_name, encode_value};
use crate::message::Message;

/// Default soft-fold line length used by the encoder (RFC 5322's
/// recommended 78-column limit; distinct from the framer's 998-byte
/// hard limit).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 78;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Soft-fold threshold. 0 disables folding entirely.
    pub max_line_length: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// A pre-emptive, per-token line-folding writer.
///
/// Every unit handed to [`write_token`](Self::write_token) is written
/// whole or not at all on the current line: if it (plus its separator)
/// would cross `max_line_length`, a soft fold (`CRLF SP`) is emitted
/// first instead of the separator, and the line-length counter resets
/// to 1. A unit wider than the whole budget is still emitted in full
/// (matching real-world practice: a long dot-atom is not itself split).
pub struct DataEncoder {
    buf: String,
    max_line_length: usize,
    line_len: usize,
}

impl DataEncoder {
    pub fn new(max_line_length: usize) -> Self {
        DataEncoder {
            buf: String::new(),
            max_line_length,
            line_len: 0,
        }
    }

    fn push_raw(&mut self, s: &str) {
        self.buf.push_str(s);
        self.line_len += s.chars().count();
    }

    /// Writes `token`, preceded by `sep` unless this is the first unit
    /// on the line. Folds in place of `sep` when the combination would
    /// overflow `max_line_length`.
    pub fn write_token(&mut self, sep: &str, token: &str) {
        if self.line_len == 0 {
            self.push_raw(token);
            return;
        }
        let projected = self.line_len + sep.chars().count() + token.chars().count();
        if self.max_line_length > 0 && projected > self.max_line_length {
            self.buf.push_str("\r\n ");
            self.line_len = 1;
            self.push_raw(token);
        } else {
            self.push_raw(sep);
            self.push_raw(token);
        }
    }

    /// Writes a field: `Name:` followed by its (possibly folded) value.
    /// An empty value renders nothing after the colon (the Bcc/Resent-Bcc
    /// empty-list policy).
    pub fn write_field(&mut self, name: &str, value: &str) {
        self.push_raw(name);
        self.push_raw(":");
        for word in value.split(' ').filter(|w| !w.is_empty()) {
            self.write_token(" ", word);
        }
    }

    /// Emits `CRLF` and resets the line-length counter.
    pub fn write_eol(&mut self) {
        self.buf.push_str("\r\n");
        self.line_len = 0;
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Renders a whole [`Message`] back to bytes: each field, folded per
/// `opts`, followed by `CRLF`; then the header/body blank-line
/// separator; then the body verbatim.
pub struct MessageEncoder<'a> {
    msg: &'a Message,
    opts: EncoderOptions,
}

impl<'a> MessageEncoder<'a> {
    pub fn new(msg: &'a Message, opts: EncoderOptions) -> Self {
        MessageEncoder { msg, opts }
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        for field in &self.msg.header {
            let name = canonical_name(&field.value).unwrap_or(field.name.as_str());
            let rendered = encode_value(&field.value)?;
            let mut enc = DataEncoder::new(self.opts.max_line_length);
            enc.write_field(name, &rendered);
            enc.write_eol();
            out.extend_from_slice(enc.into_string().as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.msg.body);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::{DecoderOptions, MessageDecoder};

    #[test]
    fn test_write_field_no_fold_needed() {
        let mut enc = DataEncoder::new(78);
        enc.write_field("Subject", "hi");
        assert_eq!(enc.into_string(), "Subject: hi");
    }

    #[test]
    fn test_write_field_empty_value() {
        let mut enc = DataEncoder::new(78);
        enc.write_field("Bcc", "");
        assert_eq!(enc.into_string(), "Bcc:");
    }

    #[test]
    fn test_folding_inserts_soft_fold() {
        let mut enc = DataEncoder::new(20);
        enc.write_field("To", "alice@example.com, bob@example.org, carol@example.net");
        let out = enc.into_string();
        assert!(out.contains("\r\n "));
        for line in out.split("\r\n") {
            assert!(line.len() <= 20 || !line.contains(' '));
        }
    }

    #[test]
    fn test_long_single_token_not_split() {
        let mut enc = DataEncoder::new(10);
        enc.write_field("Message-ID", "<a-very-long-message-id@example.com>");
        let out = enc.into_string();
        assert!(out.contains("<a-very-long-message-id@example.com>"));
    }

    #[test]
    fn test_round_trip_s1() {
        let msg = MessageDecoder::decode_all(
            DecoderOptions::default(),
            b"From: Alice <alice@example.com>\r\nTo: Bob <bob@example.org>\r\nSubject: hi\r\n\r\nBody here.\r\n",
        )
        .unwrap();
        let encoded = MessageEncoder::new(&msg, EncoderOptions::default())
            .encode()
            .unwrap();
        let redecoded = MessageDecoder::decode_all(DecoderOptions::default(), &encoded).unwrap();
        assert_eq!(msg, redecoded);
    }

    #[test]
    fn test_encode_bcc_empty_renders_nothing() {
        let msg = MessageDecoder::decode_all(DecoderOptions::default(), b"Bcc: \r\n\r\n").unwrap();
        let encoded = MessageEncoder::new(&msg, EncoderOptions::default())
            .encode()
            .unwrap();
        assert!(encoded.starts_with(b"Bcc:\r\n"));
    }

    #[test]
    fn test_encode_to_empty_fails() {
        let msg = MessageDecoder::decode_all(DecoderOptions::default(), b"To: \r\n\r\n").unwrap();
        let err = MessageEncoder::new(&msg, EncoderOptions::default())
            .encode()
            .unwrap_err();
        assert_eq!(err, EncodeError::InvalidEmpty);
    }
}
