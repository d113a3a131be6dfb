//! The closed set of recognized header field values (RFC 5322 §3.6) and
//! their dispatch table.

use crate::error::{EncodeError, FieldDecodeError};
use crate::imf::address::{
    address_list, mailbox, write_address_list, write_dot_atom_or_quoted, write_mailbox, Address,
    Mailbox,
};
use crate::imf::datetime::{date_time, write_date_time, DateTime};
use crate::imf::identification::{msg_id, msg_id_list, write_msg_id, write_msg_id_list, MessageId};
use crate::imf::trace::{
    received, return_path, write_received, write_return_path, Received, ReturnPath,
};
use crate::text::phrase::phrase_list;
use crate::text::unstructured::{unstructured, write_unstructured};

/// One decoded header-field value. A case is assigned per recognized
/// field name; anything else falls into `Optional`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    ReturnPath(ReturnPath),
    Received(Received),

    Date(DateTime),
    ResentDate(DateTime),

    From(Vec<Address>),
    ResentFrom(Vec<Address>),
    Sender(Mailbox),
    ResentSender(Mailbox),
    ReplyTo(Vec<Address>),
    To(Vec<Address>),
    Cc(Vec<Address>),
    ResentTo(Vec<Address>),
    ResentCc(Vec<Address>),
    Bcc(Vec<Address>),
    ResentBcc(Vec<Address>),

    MessageId(MessageId),
    ResentMessageId(MessageId),
    InReplyTo(Vec<MessageId>),
    References(Vec<MessageId>),

    Subject(String),
    Comments(String),
    Keywords(Vec<String>),

    Optional(String, String),
}

/// A single header field as it appeared in the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// The raw, unfolded field line (name, colon, and value), as decoded
    /// from the input -- kept for display and to support re-emitting
    /// fields this crate failed to parse.
    pub raw: String,
    /// The field name exactly as it appeared (original case preserved).
    pub name: String,
    pub value: FieldValue,
    /// Set when decoding the value failed; `value` then holds the
    /// default empty variant for this field name.
    pub error: Option<String>,
}

/// Decodes a field value from its raw text (the bytes after the colon,
/// with folding already removed by the framer). `mixed_eol` is threaded
/// through to every lexical parser touched.
///
/// Dispatch is by the lowercased field name; anything unrecognized
/// becomes `Optional`.
pub fn decode_value(mixed_eol: bool, name: &str, value: &[u8]) -> (FieldValue, Option<String>) {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "return-path" => with_fallback(
            return_path(mixed_eol, value),
            FieldValue::ReturnPath,
            || FieldValue::ReturnPath(ReturnPath(None)),
        ),
        "received" => with_fallback(received(mixed_eol, value), FieldValue::Received, || {
            FieldValue::Received(Received {
                tokens: crate::imf::trace::ReceivedTokens(Vec::new()),
                date: default_date_time(),
            })
        }),
        "date" => with_fallback(date_time(mixed_eol, value), FieldValue::Date, || {
            FieldValue::Date(default_date_time())
        }),
        "resent-date" => with_fallback(date_time(mixed_eol, value), FieldValue::ResentDate, || {
            FieldValue::ResentDate(default_date_time())
        }),
        "from" => with_fallback(
            address_list(mixed_eol, false, value),
            FieldValue::From,
            || FieldValue::From(Vec::new()),
        ),
        "resent-from" => with_fallback(
            address_list(mixed_eol, false, value),
            FieldValue::ResentFrom,
            || FieldValue::ResentFrom(Vec::new()),
        ),
        "sender" => with_fallback(mailbox(mixed_eol, value), FieldValue::Sender, || {
            FieldValue::Sender(default_mailbox())
        }),
        "resent-sender" => with_fallback(mailbox(mixed_eol, value), FieldValue::ResentSender, || {
            FieldValue::ResentSender(default_mailbox())
        }),
        "reply-to" => with_fallback(
            address_list(mixed_eol, false, value),
            FieldValue::ReplyTo,
            || FieldValue::ReplyTo(Vec::new()),
        ),
        "to" => with_fallback(address_list(mixed_eol, false, value), FieldValue::To, || {
            FieldValue::To(Vec::new())
        }),
        "cc" => with_fallback(address_list(mixed_eol, false, value), FieldValue::Cc, || {
            FieldValue::Cc(Vec::new())
        }),
        "resent-to" => with_fallback(
            address_list(mixed_eol, false, value),
            FieldValue::ResentTo,
            || FieldValue::ResentTo(Vec::new()),
        ),
        "resent-cc" => with_fallback(
            address_list(mixed_eol, false, value),
            FieldValue::ResentCc,
            || FieldValue::ResentCc(Vec::new()),
        ),
        "bcc" => with_fallback(address_list(mixed_eol, true, value), FieldValue::Bcc, || {
            FieldValue::Bcc(Vec::new())
        }),
        "resent-bcc" => with_fallback(
            address_list(mixed_eol, true, value),
            FieldValue::ResentBcc,
            || FieldValue::ResentBcc(Vec::new()),
        ),
        "message-id" => with_fallback(msg_id(mixed_eol, value), FieldValue::MessageId, || {
            FieldValue::MessageId(default_message_id())
        }),
        "resent-message-id" => with_fallback(
            msg_id(mixed_eol, value),
            FieldValue::ResentMessageId,
            || FieldValue::ResentMessageId(default_message_id()),
        ),
        "in-reply-to" => with_fallback(
            msg_id_list(mixed_eol, true, value),
            FieldValue::InReplyTo,
            || FieldValue::InReplyTo(Vec::new()),
        ),
        "references" => with_fallback(
            msg_id_list(mixed_eol, true, value),
            FieldValue::References,
            || FieldValue::References(Vec::new()),
        ),
        "subject" => (FieldValue::Subject(unstructured(value).unwrap().1), None),
        "comments" => (FieldValue::Comments(unstructured(value).unwrap().1), None),
        "keywords" => with_fallback(
            phrase_list(mixed_eol, value),
            FieldValue::Keywords,
            || FieldValue::Keywords(Vec::new()),
        ),
        _ => (
            FieldValue::Optional(name.to_string(), unstructured(value).unwrap().1),
            None,
        ),
    }
}

/// Runs a nom parser over the full field value and converts its result
/// into a `(value, error)` pair: on success the remaining input must be
/// empty or pure whitespace (anything else left over is
/// `InvalidTrailingData`); on failure the `default` value is substituted
/// and the error recorded, per this crate's per-field error isolation.
fn with_fallback<T>(
    result: nom::IResult<&[u8], T>,
    wrap: impl FnOnce(T) -> FieldValue,
    default: impl FnOnce() -> FieldValue,
) -> (FieldValue, Option<String>) {
    match result {
        Ok((rest, v)) if rest.iter().all(|b| b.is_ascii_whitespace()) => (wrap(v), None),
        Ok(_) => (
            default(),
            Some(FieldDecodeError::InvalidTrailingData.to_string()),
        ),
        Err(e) => (
            default(),
            Some(FieldDecodeError::InvalidValue(format!("{:?}", e)).to_string()),
        ),
    }
}

fn default_date_time() -> DateTime {
    use chrono::TimeZone;
    DateTime(
        chrono::FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(1970, 1, 1, 0, 0, 0)
            .unwrap(),
    )
}

fn default_mailbox() -> Mailbox {
    Mailbox {
        address: crate::imf::address::SpecificAddress {
            local_part: String::new(),
            domain: crate::imf::address::Domain::DotAtom(String::new()),
        },
        display_name: None,
    }
}

fn default_message_id() -> MessageId {
    MessageId {
        left: String::new(),
        right: crate::imf::address::Domain::DotAtom(String::new()),
    }
}

/// Encodes a field's value back to its textual form (not including the
/// field name, colon, or trailing CRLF -- the framing layer owns those).
///
/// Empty-list policy: `Bcc`/`Resent-Bcc` may render nothing; every other
/// list-valued variant fails with `InvalidEmpty` when its list is empty.
/// `Return-Path` always renders `<...>`, with the inside empty when the
/// address is absent.
pub fn encode_value(value: &FieldValue) -> Result<String, EncodeError> {
    let mut out = String::new();
    match value {
        FieldValue::ReturnPath(rp) => write_return_path(&mut out, rp)?,
        FieldValue::Received(r) => write_received(&mut out, r)?,
        FieldValue::Date(dt) | FieldValue::ResentDate(dt) => write_date_time(&mut out, dt),
        FieldValue::From(a) | FieldValue::ResentFrom(a) => write_nonempty_addresses(&mut out, a)?,
        FieldValue::Sender(m) | FieldValue::ResentSender(m) => write_mailbox(&mut out, m)?,
        FieldValue::ReplyTo(a) => write_nonempty_addresses(&mut out, a)?,
        FieldValue::To(a) | FieldValue::ResentTo(a) => write_nonempty_addresses(&mut out, a)?,
        FieldValue::Cc(a) | FieldValue::ResentCc(a) => write_nonempty_addresses(&mut out, a)?,
        FieldValue::Bcc(a) | FieldValue::ResentBcc(a) => {
            if !a.is_empty() {
                write_address_list(&mut out, a)?;
            }
        }
        FieldValue::MessageId(id) | FieldValue::ResentMessageId(id) => write_msg_id(&mut out, id)?,
        FieldValue::InReplyTo(ids) | FieldValue::References(ids) => {
            if ids.is_empty() {
                return Err(EncodeError::InvalidEmpty);
            }
            write_msg_id_list(&mut out, ids)?;
        }
        FieldValue::Subject(s) | FieldValue::Comments(s) => write_unstructured(&mut out, s),
        FieldValue::Keywords(kw) => {
            if kw.is_empty() {
                return Err(EncodeError::InvalidEmpty);
            }
            for (i, k) in kw.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_dot_atom_or_quoted(&mut out, k)?;
            }
        }
        FieldValue::Optional(_, s) => write_unstructured(&mut out, s),
    }
    Ok(out)
}

fn write_nonempty_addresses(out: &mut String, addresses: &[Address]) -> Result<(), EncodeError> {
    if addresses.is_empty() {
        return Err(EncodeError::InvalidEmpty);
    }
    write_address_list(out, addresses)
}

/// The canonical (mixed-case) field name emitted on encode for each
/// recognized variant. `Optional` carries its own name already.
pub fn canonical_name(value: &FieldValue) -> Option<&'static str> {
    Some(match value {
        FieldValue::ReturnPath(_) => "Return-Path",
        FieldValue::Received(_) => "Received",
        FieldValue::Date(_) => "Date",
        FieldValue::ResentDate(_) => "Resent-Date",
        FieldValue::From(_) => "From",
        FieldValue::ResentFrom(_) => "Resent-From",
        FieldValue::Sender(_) => "Sender",
        FieldValue::ResentSender(_) => "Resent-Sender",
        FieldValue::ReplyTo(_) => "Reply-To",
        FieldValue::To(_) => "To",
        FieldValue::Cc(_) => "Cc",
        FieldValue::ResentTo(_) => "Resent-To",
        FieldValue::ResentCc(_) => "Resent-Cc",
        FieldValue::Bcc(_) => "Bcc",
        FieldValue::ResentBcc(_) => "Resent-Bcc",
        FieldValue::MessageId(_) => "Message-ID",
        FieldValue::ResentMessageId(_) => "Resent-Message-ID",
        FieldValue::InReplyTo(_) => "In-Reply-To",
        FieldValue::References(_) => "References",
        FieldValue::Subject(_) => "Subject",
        FieldValue::Comments(_) => "Comments",
        FieldValue::Keywords(_) => "Keywords",
        FieldValue::Optional(..) => return None,
    })
}
