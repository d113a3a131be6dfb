//! Byte-stream framing: splits a message into header [`Field`](crate::imf::field::Field)s
//! and a body, without interpreting field semantics (RFC 5322 §2.1-2.2).

use crate::ascii;
use crate::error::FramingError;
use crate::imf::field::{decode_value, Field};
use crate::message::Message;

/// Default line-length ceiling (RFC 5322 §2.1.1).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 998;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    InHeader,
    InBody,
    Closed,
}

/// Options controlling a [`MessageDecoder`]'s tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Accept a bare `LF` as a line terminator, in addition to `CRLF`.
    pub mixed_eol: bool,
    /// Maximum physical line length (EOL included). 0 means unbounded.
    pub max_line_length: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            mixed_eol: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

struct PendingField {
    raw: Vec<u8>,
}

/// A streaming RFC 5322 message framer.
///
/// Bytes are handed in via repeated [`feed`](Self::feed) calls (so a
/// caller reading from a socket or a file never needs to buffer the
/// whole message itself); [`close`](Self::close) flushes whatever
/// logical line is still pending and returns the accumulated
/// [`Message`]. [`decode_all`](Self::decode_all) is the one-shot
/// convenience wrapper around both.
pub struct MessageDecoder {
    opts: DecoderOptions,
    state: State,
    carry: Vec<u8>,
    pending: Option<PendingField>,
    last_eol: Vec<u8>,
    header: Vec<Field>,
    body: Vec<u8>,
}

impl MessageDecoder {
    pub fn new(opts: DecoderOptions) -> Self {
        MessageDecoder {
            opts,
            state: State::InHeader,
            carry: Vec::new(),
            pending: None,
            last_eol: Vec::new(),
            header: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Feeds more bytes into the decoder, processing every complete
    /// physical line found so far. Bytes without a terminating `LF` yet
    /// are buffered until the next call.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self, bytes)))]
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), FramingError> {
        self.carry.extend_from_slice(bytes);
        loop {
            if self.state == State::Closed {
                break;
            }
            let Some(pos) = memchr::memchr(ascii::LF, &self.carry) else {
                break;
            };

            let (content_end, eol_start) = if pos > 0 && self.carry[pos - 1] == ascii::CR {
                (pos - 1, pos - 1)
            } else {
                if !self.opts.mixed_eol {
                    return Err(FramingError::BareLF);
                }
                (pos, pos)
            };

            let line_len = pos + 1;
            if self.opts.max_line_length > 0 && line_len > self.opts.max_line_length {
                return Err(FramingError::LineTooLong {
                    max: self.opts.max_line_length,
                });
            }

            let content = self.carry[..content_end].to_vec();
            let eol = self.carry[eol_start..=pos].to_vec();
            self.carry.drain(..=pos);

            self.process_line(content, eol)?;
        }
        Ok(())
    }

    fn process_line(&mut self, content: Vec<u8>, eol: Vec<u8>) -> Result<(), FramingError> {
        match self.state {
            State::InBody => {
                self.body.extend_from_slice(&content);
                self.body.extend_from_slice(&eol);
            }
            State::InHeader => {
                if content.is_empty() {
                    self.flush_pending()?;
                    self.state = State::InBody;
                } else if ascii::is_wsp(content[0]) {
                    match &mut self.pending {
                        Some(p) => {
                            p.raw.extend_from_slice(&self.last_eol);
                            p.raw.extend_from_slice(&content);
                        }
                        None => {
                            // A continuation with nothing to continue: keep it
                            // as its own (doomed) logical line so the field-name
                            // scan below reports EmptyFieldName uniformly.
                            self.pending = Some(PendingField { raw: content });
                        }
                    }
                } else {
                    self.flush_pending()?;
                    self.pending = Some(PendingField { raw: content });
                }
                self.last_eol = eol;
            }
            State::Closed => {}
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<(), FramingError> {
        let Some(p) = self.pending.take() else {
            return Ok(());
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(bytes = p.raw.len(), "flushing logical header line");
        let field = self.decode_field(p.raw)?;
        #[cfg(feature = "tracing")]
        if let Some(err) = &field.error {
            tracing::warn!(field = %field.name, %err, "field decode failed, value discarded");
        }
        self.header.push(field);
        Ok(())
    }

    fn decode_field(&self, raw: Vec<u8>) -> Result<Field, FramingError> {
        let name_end = raw
            .iter()
            .position(|&b| !ascii::is_field_char(b))
            .unwrap_or(raw.len());
        if name_end == 0 {
            return Err(FramingError::EmptyFieldName);
        }
        let name = String::from_utf8_lossy(&raw[..name_end]).into_owned();

        let (after_name, _) = crate::text::whitespace::opt_fws(self.opts.mixed_eol, &raw[name_end..])
            .unwrap_or((&raw[name_end..], false));
        let Some((&ascii::COL, value)) = after_name.split_first() else {
            return Err(FramingError::MissingColon);
        };

        let (value, error) = decode_value(self.opts.mixed_eol, &name, value);
        Ok(Field {
            raw: String::from_utf8_lossy(&raw).into_owned(),
            name,
            value,
            error,
        })
    }

    /// Flushes any pending logical line (no trailing EOL required) and
    /// returns the accumulated message. Idempotent: may be called on a
    /// half-fed stream.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub fn close(mut self) -> Result<Message, FramingError> {
        if self.state == State::InHeader && self.carry.last() == Some(&ascii::CR) {
            return Err(FramingError::TruncatedEol);
        }
        if self.state == State::InHeader {
            if !self.carry.is_empty() {
                let content = std::mem::take(&mut self.carry);
                self.process_line(content, Vec::new())?;
            }
            self.flush_pending()?;
        } else if self.state == State::InBody && !self.carry.is_empty() {
            let rest = std::mem::take(&mut self.carry);
            self.body.extend_from_slice(&rest);
        }
        self.state = State::Closed;
        Ok(Message {
            header: self.header,
            body: self.body,
        })
    }

    /// One-shot convenience: feed the whole buffer then close.
    pub fn decode_all(opts: DecoderOptions, input: &[u8]) -> Result<Message, FramingError> {
        let mut dec = MessageDecoder::new(opts);
        dec.feed(input)?;
        dec.close()
    }
}
