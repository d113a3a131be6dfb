use crate::ascii;
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while1},
    combinator::{map, opt},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};

/// Quoted pair: a backslash followed by the literal byte it escapes.
///
/// ```abnf
/// quoted-pair = ("\" (VCHAR / WSP)) / obs-qp
/// obs-qp      = "\" (%d0 / obs-NO-WS-CTL / LF / CR)
/// ```
/// We accept any byte after the backslash (obsolete syntax is strictly
/// more permissive), but only escapes that satisfy the strict grammar
/// are returned as `Some`; other escapes cannot be printed back and are
/// dropped (`None`) rather than rejecting the whole message.
pub fn quoted_pair(input: &[u8]) -> IResult<&[u8], Option<u8>> {
    preceded(
        tag(&[ascii::BACKSLASH]),
        map(take(1usize), |b: &[u8]| {
            ascii::is_quotable(b[0]).then_some(b[0])
        }),
    )(input)
}

/// Quoted-pair content, returned as a borrowed slice into `input` when
/// possible so the caller only allocates for the escaped case.
enum QContent<'a> {
    Text(&'a [u8]),
    Escaped(u8),
    Dropped,
}

fn qcontent(input: &[u8]) -> IResult<&[u8], QContent<'_>> {
    alt((
        map(take_while1(ascii::is_strict_qtext), QContent::Text),
        map(take_while1(ascii::is_obs_no_ws_ctl), |_| QContent::Dropped),
        map(quoted_pair, |b| match b {
            Some(b) => QContent::Escaped(b),
            None => QContent::Dropped,
        }),
    ))(input)
}

/// Quoted string: `"` *([FWS] qcontent) [FWS] `"`, with leading/trailing
/// CFWS and quoted-pair escapes collapsed to their literal second byte.
///
/// Returns the owned, unescaped string content.
pub fn quoted_string(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    let fws = |i| crate::text::whitespace::fws(mixed_eol, i);
    let cfws = |i| crate::text::whitespace::cfws(mixed_eol, i);

    let (input, _) = opt(cfws)(input)?;
    let (input, _) = tag("\"")(input)?;
    let (input, content) = many0(pair(opt(fws), qcontent))(input)?;
    let (input, maybe_wsp) = opt(fws)(input)?;
    let (input, _) = tag("\"")(input)?;
    let (input, _) = opt(cfws)(input)?;

    let mut out = String::new();
    for (wsp, c) in content {
        if wsp.is_some() {
            out.push(' ');
        }
        match c {
            QContent::Text(bytes) => out.push_str(&String::from_utf8_lossy(bytes)),
            QContent::Escaped(b) => out.push(b as char),
            QContent::Dropped => {}
        }
    }
    if maybe_wsp.is_some() {
        out.push(' ');
    }

    Ok((input, out))
}

/// Escape a plain string for quoted-string output.
///
/// Rejects control bytes other than HT/SP (spec: `UnencodableControl`).
pub fn write_quoted(out: &mut String, s: &str) -> Result<(), u8> {
    out.push('"');
    for b in s.bytes() {
        if b == ascii::DQUOTE || b == ascii::BACKSLASH {
            out.push('\\');
            out.push(b as char);
        } else if ascii::is_vchar(b) || ascii::is_wsp(b) {
            out.push(b as char);
        } else {
            return Err(b);
        }
    }
    out.push('"');
    Ok(())
}
