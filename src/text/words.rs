use crate::ascii;
use crate::text::whitespace::cfws;
use nom::{
    bytes::complete::{tag, take_while1},
    combinator::{map, opt, recognize},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};

/// Atom: `[CFWS] 1*atext [CFWS]`, returned as owned text.
pub fn atom(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    map(
        delimited(
            opt(|i| cfws(mixed_eol, i)),
            take_while1(ascii::is_atext),
            opt(|i| cfws(mixed_eol, i)),
        ),
        |b: &[u8]| String::from_utf8_lossy(b).into_owned(),
    )(input)
}

/// dot-atom-text: `1*atext *("." 1*atext)`.
pub fn dot_atom_text(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(pair(
        take_while1(ascii::is_atext),
        many0(pair(tag("."), take_while1(ascii::is_atext))),
    ))(input)
}

/// dot-atom: `[CFWS] dot-atom-text [CFWS]`.
pub fn dot_atom(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    map(
        delimited(
            opt(|i| cfws(mixed_eol, i)),
            dot_atom_text,
            opt(|i| cfws(mixed_eol, i)),
        ),
        |b: &[u8]| String::from_utf8_lossy(b).into_owned(),
    )(input)
}

/// Whether `s` could be re-encoded as a bare dot-atom (used by the
/// encoder to decide between bare and quoted-string rendering).
pub fn is_dot_atom(s: &str) -> bool {
    nom::combinator::all_consuming(dot_atom_text)(s.as_bytes()).is_ok()
}

/// Word: quoted-string or atom, with leading FWS permitted (spec §4.1).
pub fn word(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    nom::branch::alt((
        |i| crate::text::quoted::quoted_string(mixed_eol, i),
        |i| atom(mixed_eol, i),
    ))(input)
}
