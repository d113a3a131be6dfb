//! Domains, addresses, mailboxes and groups (RFC 5322 §3.4, RFC 6854).

use crate::text::local_part::local_part;
use crate::text::phrase::phrase;
use crate::text::quoted::write_quoted;
use crate::text::whitespace::{cfws, fws};
use crate::text::words::{dot_atom_text, is_dot_atom};
use crate::{ascii, error::EncodeError};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::{map, map_opt, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// A domain: either a dot-atom (`example.com`) or a domain-literal
/// (`[192.168.2.1]`, brackets preserved verbatim). Empty domain-literals
/// (`[]`) are permitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    DotAtom(String),
    /// Inner text only, brackets added back on render.
    Literal(String),
}

impl Domain {
    pub fn render(&self) -> String {
        match self {
            Domain::DotAtom(s) => s.clone(),
            Domain::Literal(s) => format!("[{}]", s),
        }
    }
}

/// domain = domain-literal / dot-atom (obsolete: atom *("." atom), a
/// strict superset of dot-atom).
pub fn domain(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Domain> {
    alt((
        map(|i| dot_atom_text_owned(mixed_eol, i), Domain::DotAtom),
        |i| domain_literal(mixed_eol, i),
    ))(input)
}

fn dot_atom_text_owned(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    delimited(
        opt(|i| cfws(mixed_eol, i)),
        map(dot_atom_text, |b: &[u8]| String::from_utf8_lossy(b).into_owned()),
        opt(|i| cfws(mixed_eol, i)),
    )(input)
}

/// domain-literal = [CFWS] "[" *([FWS] dtext) [FWS] "]" [CFWS]
fn domain_literal(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Domain> {
    delimited(
        pair(opt(|i| cfws(mixed_eol, i)), tag(&[ascii::LEFT_BRACKET])),
        map(
            nom::combinator::recognize(nom::multi::many0(preceded(
                opt(|i| fws(mixed_eol, i)),
                take_while1(ascii::is_dtext),
            ))),
            |b: &[u8]| Domain::Literal(String::from_utf8_lossy(b).into_owned()),
        ),
        pair(tag(&[ascii::RIGHT_BRACKET]), opt(|i| cfws(mixed_eol, i))),
    )(input)
}

/// An unquoted `local@domain` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecificAddress {
    pub local_part: String,
    pub domain: Domain,
}

/// specific-address = local-part "@" domain, CFWS permitted around "@".
pub fn specific_address(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], SpecificAddress> {
    map(
        tuple((
            |i| local_part(mixed_eol, i),
            opt(|i| cfws(mixed_eol, i)),
            tag(&[ascii::AT]),
            opt(|i| cfws(mixed_eol, i)),
            |i| domain(mixed_eol, i),
        )),
        |(local_part, _, _, _, domain)| SpecificAddress { local_part, domain },
    )(input)
}

/// angle-address = [CFWS] "<" [ specific-address ] ">" [CFWS]
///
/// If `allow_empty`, `<>` yields `None`.
pub fn angle_address(
    mixed_eol: bool,
    allow_empty: bool,
    input: &[u8],
) -> IResult<&[u8], Option<SpecificAddress>> {
    delimited(
        pair(opt(|i| cfws(mixed_eol, i)), tag(&[ascii::LT])),
        alt((
            map(|i| specific_address(mixed_eol, i), Some),
            map_opt(opt(|i| cfws(mixed_eol, i)), move |_| allow_empty.then_some(None)),
        )),
        pair(tag(&[ascii::GT]), opt(|i| cfws(mixed_eol, i))),
    )(input)
}

/// A mailbox: a specific address plus an optional display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
    pub address: SpecificAddress,
    pub display_name: Option<String>,
}

/// mailbox = name-addr / addr-spec
pub fn mailbox(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Mailbox> {
    alt((
        |i| named_address(mixed_eol, i),
        map(|i| specific_address(mixed_eol, i), |address| Mailbox {
            address,
            display_name: None,
        }),
    ))(input)
}

/// named-address = [display-name] angle-address
fn named_address(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Mailbox> {
    let (input, display_name) = opt(|i| phrase(mixed_eol, i))(input)?;
    let (input, address) = angle_address(mixed_eol, false, input)?;
    Ok((
        input,
        Mailbox {
            // angle_address(.., false, ..) never returns None.
            address: address.expect("angle-address without allow_empty always yields Some"),
            display_name,
        },
    ))
}

/// mailbox-list (obsolete syntax: empty elements between commas are
/// silently skipped). Fails if no mailbox is present, unless
/// `allow_empty`.
pub fn mailbox_list(
    mixed_eol: bool,
    allow_empty: bool,
    input: &[u8],
) -> IResult<&[u8], Vec<Mailbox>> {
    let (input, v) = mailbox_list_nullable(mixed_eol, input)?;
    if v.is_empty() && !allow_empty {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }
    Ok((input, v))
}

fn mailbox_list_nullable(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Vec<Mailbox>> {
    map(
        separated_list1(
            tag(","),
            alt((
                map(|i| mailbox(mixed_eol, i), Some),
                map(opt(|i| cfws(mixed_eol, i)), |_| None),
            )),
        ),
        |v: Vec<Option<Mailbox>>| v.into_iter().flatten().collect(),
    )(input)
}

/// A named list of mailboxes: `display-name ":" mailbox-list ";"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub display_name: String,
    pub mailboxes: Vec<Mailbox>,
}

fn group(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Group> {
    let (input, display_name) = phrase(mixed_eol, input)?;
    let (input, _) = tag(&[ascii::COL])(input)?;
    let (input, mailboxes) = mailbox_list_nullable(mixed_eol, input)?;
    let (input, _) = tag(&[ascii::SEM_COL])(input)?;
    let (input, _) = opt(|i| cfws(mixed_eol, i))(input)?;
    Ok((
        input,
        Group {
            display_name,
            mailboxes,
        },
    ))
}

/// Address = Mailbox | Group (RFC 6854).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    Mailbox(Mailbox),
    Group(Group),
}

/// address = group / mailbox
pub fn address(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Address> {
    alt((
        map(|i| group(mixed_eol, i), Address::Group),
        map(|i| mailbox(mixed_eol, i), Address::Mailbox),
    ))(input)
}

/// address-list (obsolete syntax tolerated; empty elements skipped).
/// Fails if no address is present, unless `allow_empty`.
pub fn address_list(
    mixed_eol: bool,
    allow_empty: bool,
    input: &[u8],
) -> IResult<&[u8], Vec<Address>> {
    let (input, v) = map(
        separated_list1(
            tag(","),
            alt((
                map(|i| address(mixed_eol, i), Some),
                map(opt(|i| cfws(mixed_eol, i)), |_| None),
            )),
        ),
        |v: Vec<Option<Address>>| v.into_iter().flatten().collect::<Vec<_>>(),
    )(input)?;
    if v.is_empty() && !allow_empty {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }
    Ok((input, v))
}

// --- encoding -----------------------------------------------------------

/// Write `s` as a bare atom/dot-atom if possible, else as a quoted-string.
pub fn write_dot_atom_or_quoted(out: &mut String, s: &str) -> Result<(), EncodeError> {
    if is_dot_atom(s) {
        out.push_str(s);
        Ok(())
    } else {
        write_quoted(out, s).map_err(EncodeError::UnencodableControl)
    }
}

pub fn write_domain(out: &mut String, d: &Domain) {
    out.push_str(&d.render());
}

pub fn write_specific_address(out: &mut String, a: &SpecificAddress) -> Result<(), EncodeError> {
    if a.local_part.is_empty() || matches!(&a.domain, Domain::DotAtom(s) if s.is_empty()) {
        return Err(EncodeError::IncompleteAddress);
    }
    write_dot_atom_or_quoted(out, &a.local_part)?;
    out.push('@');
    write_domain(out, &a.domain);
    Ok(())
}

pub fn write_mailbox(out: &mut String, m: &Mailbox) -> Result<(), EncodeError> {
    match &m.display_name {
        None => write_specific_address(out, &m.address)?,
        Some(name) => {
            write_dot_atom_or_quoted(out, name)?;
            out.push_str(" <");
            write_specific_address(out, &m.address)?;
            out.push('>');
        }
    }
    Ok(())
}

pub fn write_mailbox_list(out: &mut String, mailboxes: &[Mailbox]) -> Result<(), EncodeError> {
    for (i, m) in mailboxes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_mailbox(out, m)?;
    }
    Ok(())
}

pub fn write_group(out: &mut String, g: &Group) -> Result<(), EncodeError> {
    if g.display_name.is_empty() {
        return Err(EncodeError::IncompleteAddress);
    }
    write_dot_atom_or_quoted(out, &g.display_name)?;
    out.push_str(": ");
    write_mailbox_list(out, &g.mailboxes)?;
    out.push(';');
    Ok(())
}

pub fn write_address(out: &mut String, a: &Address) -> Result<(), EncodeError> {
    match a {
        Address::Mailbox(m) => write_mailbox(out, m),
        Address::Group(g) => write_group(out, g),
    }
}

pub fn write_address_list(out: &mut String, addresses: &[Address]) -> Result<(), EncodeError> {
    for (i, a) in addresses.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_address(out, a)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_address() {
        let (rest, a) = specific_address(false, b"alice@example.com").unwrap();
        assert!(rest.is_empty());
        assert_eq!(a.local_part, "alice");
        assert_eq!(a.domain, Domain::DotAtom("example.com".to_string()));
    }

    #[test]
    fn test_domain_literal() {
        let (rest, a) = specific_address(false, b"jsmith@[192.168.2.1]").unwrap();
        assert!(rest.is_empty());
        assert_eq!(a.domain, Domain::Literal("192.168.2.1".to_string()));
    }

    #[test]
    fn test_mailbox_named() {
        let (rest, m) = mailbox(false, b"Mary Smith <mary@x.test>").unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.display_name.as_deref(), Some("Mary Smith"));
        assert_eq!(m.address.local_part, "mary");
    }

    #[test]
    fn test_mailbox_bare() {
        let (rest, m) = mailbox(false, b"jdoe@example.org").unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.display_name, None);
    }

    #[test]
    fn test_group() {
        let (rest, a) = address(false, b"undisclosed-recipients: a@x, b@x;").unwrap();
        assert!(rest.is_empty());
        match a {
            Address::Group(g) => {
                assert_eq!(g.display_name, "undisclosed-recipients");
                assert_eq!(g.mailboxes.len(), 2);
            }
            _ => panic!("expected a group"),
        }
    }

    #[test]
    fn test_group_trailing_comment_consumed() {
        let (rest, a) = address(false, b"undisclosed-recipients: a@x, b@x; (no recipients)").unwrap();
        assert!(rest.is_empty());
        assert!(matches!(a, Address::Group(_)));
    }

    #[test]
    fn test_mailbox_list_obsolete_empty_elements() {
        let (rest, v) =
            mailbox_list(false, false, b",foo@bar.com,,boss@nil.test,jdoe@example.org,").unwrap();
        assert!(rest.is_empty());
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_write_mailbox() {
        let mut out = String::new();
        write_mailbox(
            &mut out,
            &Mailbox {
                address: SpecificAddress {
                    local_part: "boss".to_string(),
                    domain: Domain::DotAtom("nil.test".to_string()),
                },
                display_name: None,
            },
        )
        .unwrap();
        assert_eq!(out, "boss@nil.test");
    }

    #[test]
    fn test_write_specific_address_rejects_empty_parts() {
        let empty_local = SpecificAddress {
            local_part: String::new(),
            domain: Domain::DotAtom("nil.test".to_string()),
        };
        assert_eq!(
            write_specific_address(&mut String::new(), &empty_local).unwrap_err(),
            EncodeError::IncompleteAddress
        );

        let empty_domain = SpecificAddress {
            local_part: "boss".to_string(),
            domain: Domain::DotAtom(String::new()),
        };
        assert_eq!(
            write_specific_address(&mut String::new(), &empty_domain).unwrap_err(),
            EncodeError::IncompleteAddress
        );
    }

    #[test]
    fn test_write_specific_address_allows_empty_domain_literal() {
        let a = SpecificAddress {
            local_part: "boss".to_string(),
            domain: Domain::Literal(String::new()),
        };
        let mut out = String::new();
        write_specific_address(&mut out, &a).unwrap();
        assert_eq!(out, "boss@[]");
    }
}
