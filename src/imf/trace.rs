//! Trace fields: `Received` (RFC 5322 §3.6.7) and `Return-Path`.

use crate::imf::address::{
    angle_address, domain, specific_address, write_domain, write_dot_atom_or_quoted,
    write_specific_address, Domain, SpecificAddress,
};
use crate::imf::datetime::{date_time, write_date_time, DateTime};
use crate::text::words::word;
use crate::{ascii, error::EncodeError};
use nom::{branch::alt, combinator::map, multi::many0, IResult};

/// One element of a Received-field trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceivedToken {
    SpecificAddress(SpecificAddress),
    Domain(Domain),
    Word(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivedTokens(pub Vec<ReceivedToken>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Received {
    pub tokens: ReceivedTokens,
    pub date: DateTime,
}

/// `Return-Path` carries either an angle-delimited specific address, or an
/// empty `<>`, meaning the path is explicitly unspecified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnPath(pub Option<SpecificAddress>);

/// Splits the raw field body on its LAST `;` (the date-time always
/// follows the trailing token list), then parses the tokens
/// left-of-`;` and the date-time right-of-`;` independently.
pub fn received(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Received> {
    let last_semi = input
        .iter()
        .rposition(|&b| b == ascii::SEM_COL)
        .ok_or_else(|| {
            nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))
        })?;
    let (token_buf, rest) = input.split_at(last_semi);
    let date_buf = &rest[1..];

    let (token_rest, tokens) = many0(|i| received_token(mixed_eol, i))(token_buf)?;
    if !token_rest.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            token_rest,
            nom::error::ErrorKind::Many0,
        )));
    }
    let (date_rest, date) = date_time(mixed_eol, date_buf)?;

    Ok((
        date_rest,
        Received {
            tokens: ReceivedTokens(tokens),
            date,
        },
    ))
}

/// Each token is tried in order: angle-address, specific-address,
/// domain, word; the first that succeeds is kept.
fn received_token(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], ReceivedToken> {
    alt((
        map(
            |i| angle_address(mixed_eol, false, i),
            |a| ReceivedToken::SpecificAddress(a.expect("allow_empty=false never yields None")),
        ),
        map(|i| specific_address(mixed_eol, i), ReceivedToken::SpecificAddress),
        map(|i| domain(mixed_eol, i), ReceivedToken::Domain),
        map(|i| word(mixed_eol, i), ReceivedToken::Word),
    ))(input)
}

pub fn return_path(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], ReturnPath> {
    map(|i| angle_address(mixed_eol, true, i), ReturnPath)(input)
}

pub fn write_received(out: &mut String, r: &Received) -> Result<(), EncodeError> {
    for (i, tok) in r.tokens.0.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match tok {
            ReceivedToken::SpecificAddress(a) => write_specific_address(out, a)?,
            ReceivedToken::Domain(d) => write_domain(out, d),
            ReceivedToken::Word(w) => write_dot_atom_or_quoted(out, w)?,
        }
    }
    out.push(';');
    out.push(' ');
    write_date_time(out, &r.date);
    Ok(())
}

pub fn write_return_path(out: &mut String, rp: &ReturnPath) -> Result<(), EncodeError> {
    out.push('<');
    if let Some(addr) = &rp.0 {
        write_specific_address(out, addr)?;
    }
    out.push('>');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_received() {
        let body =
            b"from smtp.example.com (x.example.com [10.0.0.1]) by mx.example.net with ESMTP id abc123; Tue, 13 Jun 2023 19:01:08 +0000";
        let (rest, r) = received(false, body).unwrap();
        assert!(rest.is_empty());
        assert_eq!(r.date.0.format("%Y").to_string(), "2023");
        assert!(r.tokens.0.iter().any(|t| matches!(t, ReceivedToken::Domain(_))));
    }

    #[test]
    fn test_received_with_addr_token() {
        let body = b"for <me@example.com>; Tue, 13 Jun 2023 19:01:08 +0000";
        let (_, r) = received(false, body).unwrap();
        assert!(r
            .tokens
            .0
            .iter()
            .any(|t| matches!(t, ReceivedToken::SpecificAddress(_))));
    }

    #[test]
    fn test_return_path_present() {
        let (rest, rp) = return_path(false, b"<bounce@example.com>").unwrap();
        assert!(rest.is_empty());
        assert_eq!(rp.0.unwrap().local_part, "bounce");
    }

    #[test]
    fn test_return_path_empty() {
        let (rest, rp) = return_path(false, b"<>").unwrap();
        assert!(rest.is_empty());
        assert!(rp.0.is_none());
    }

    #[test]
    fn test_write_return_path_empty() {
        let mut out = String::new();
        write_return_path(&mut out, &ReturnPath(None)).unwrap();
        assert_eq!(out, "<>");
    }
}
