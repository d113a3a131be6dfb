//! Message identifiers (RFC 5322 §3.6.4).

use crate::imf::address::{domain, write_domain, write_dot_atom_or_quoted, Domain};
use crate::text::whitespace::cfws;
use crate::text::words::dot_atom_text;
use crate::{ascii, error::EncodeError};
use nom::{
    bytes::complete::tag,
    combinator::{map, opt},
    multi::many1,
    sequence::{delimited, tuple},
    IResult,
};

/// `<left@right>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageId {
    pub left: String,
    pub right: Domain,
}

/// message-id = "<" local-part "@" domain ">", CFWS permitted around
/// every piece. The left part of a message-id is a dot-atom-text (not
/// a full local-part): no quoted-string form is used in practice and
/// none is specified by RFC 5322 §3.6.4.
pub fn msg_id(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], MessageId> {
    delimited(
        tuple((opt(|i| cfws(mixed_eol, i)), tag(&[ascii::LT]))),
        map(
            tuple((
                map(dot_atom_text, |b: &[u8]| String::from_utf8_lossy(b).into_owned()),
                tag(&[ascii::AT]),
                |i| domain(mixed_eol, i),
            )),
            |(left, _, right)| MessageId { left, right },
        ),
        tuple((tag(&[ascii::GT]), opt(|i| cfws(mixed_eol, i)))),
    )(input)
}

/// message-id-list: whitespace-separated (no commas), per RFC 5322.
///
/// `allow_empty` controls whether a list containing zero ids is
/// accepted by this parser (used on decode for In-Reply-To/References,
/// which decode permissively but cannot re-encode an empty list).
pub fn msg_id_list(
    mixed_eol: bool,
    allow_empty: bool,
    input: &[u8],
) -> IResult<&[u8], Vec<MessageId>> {
    if allow_empty {
        nom::multi::many0(|i| msg_id(mixed_eol, i))(input)
    } else {
        many1(|i| msg_id(mixed_eol, i))(input)
    }
}

pub fn write_msg_id(out: &mut String, id: &MessageId) -> Result<(), EncodeError> {
    out.push('<');
    write_dot_atom_or_quoted(out, &id.left)?;
    out.push('@');
    write_domain(out, &id.right);
    out.push('>');
    Ok(())
}

pub fn write_msg_id_list(out: &mut String, ids: &[MessageId]) -> Result<(), EncodeError> {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_msg_id(out, id)?;
    }
    Ok(())
}
