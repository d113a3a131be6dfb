use crate::ascii;
use crate::text::quoted::quoted_pair;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{space0, space1},
    combinator::{opt, recognize},
    multi::{many0, many1},
    sequence::tuple,
    IResult,
};

/// Maximum nesting depth for parenthesized comments (RFC 5322 is silent
/// on a limit; real-world messages never nest this deep, and without a
/// cap a crafted input could force unbounded recursion).
const MAX_COMMENT_DEPTH: u32 = 20;

/// Obsolete/compatible end-of-line.
///
/// Strict RFC 5322 requires `CRLF`. In mixed-EOL mode a bare `LF` is also
/// accepted, matching real-world lenient servers.
pub fn obs_crlf(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], &[u8]> {
    if mixed_eol {
        alt((tag(ascii::CRLF), tag(ascii::CRCRLF), tag(&[ascii::LF])))(input)
    } else {
        tag(ascii::CRLF)(input)
    }
}

/// Folding white space.
///
/// ```abnf
/// FWS = ([*WSP CRLF] 1*WSP) / obs-FWS
/// obs-FWS = 1*WSP *(CRLF 1*WSP)
/// ```
pub fn fws(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], u8> {
    let fold = |i| fold_marker(mixed_eol, i);
    let (input, _) = alt((recognize(many1(fold)), space1))(input)?;
    Ok((input, ascii::SP))
}

fn fold_marker(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, _) = space0(input)?;
    let (input, _) = obs_crlf(mixed_eol, input)?;
    space1(input)
}

/// CFWS: any mix of folding whitespace and parenthesized comments.
///
/// ```abnf
/// CFWS = (1*([FWS] comment) [FWS]) / FWS
/// ```
pub fn cfws(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((
        recognize(|i| comments(mixed_eol, i)),
        recognize(|i| fws(mixed_eol, i)),
    ))(input)
}

fn comments(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], ()> {
    let (input, _) = many1(tuple((
        opt(|i| fws(mixed_eol, i)),
        |i| comment(mixed_eol, 0, i),
    )))(input)?;
    let (input, _) = opt(|i| fws(mixed_eol, i))(input)?;
    Ok((input, ()))
}

fn comment(mixed_eol: bool, depth: u32, input: &[u8]) -> IResult<&[u8], ()> {
    if depth >= MAX_COMMENT_DEPTH {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        )));
    }
    let (input, _) = tag("(")(input)?;
    let (input, _) = many0(tuple((
        opt(|i| fws(mixed_eol, i)),
        |i| ccontent(mixed_eol, depth, i),
    )))(input)?;
    let (input, _) = opt(|i| fws(mixed_eol, i))(input)?;
    let (input, _) = tag(")")(input)?;
    Ok((input, ()))
}

fn ccontent(mixed_eol: bool, depth: u32, input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((
        ctext,
        recognize(quoted_pair),
        recognize(|i| comment(mixed_eol, depth + 1, i)),
    ))(input)
}

fn ctext(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(ascii::is_ctext)(input)
}

/// Read `[CFWS]`, discarding it.
pub fn opt_cfws(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], ()> {
    let (input, _) = opt(|i| cfws(mixed_eol, i))(input)?;
    Ok((input, ()))
}

/// `[FWS]`, discarding it but reporting whether whitespace was present.
pub fn opt_fws(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], bool> {
    match fws(mixed_eol, input) {
        Ok((rest, _)) => Ok((rest, true)),
        Err(_) => Ok((input, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obs_crlf_mixed() {
        assert_eq!(obs_crlf(true, b"\r\nworld"), Ok((&b"world"[..], &b"\r\n"[..])));
        assert_eq!(obs_crlf(true, b"\nworld"), Ok((&b"world"[..], &b"\n"[..])));
        assert!(obs_crlf(false, b"\nworld").is_err());
    }

    #[test]
    fn test_fws() {
        assert_eq!(fws(false, b"\r\n world"), Ok((&b"world"[..], ascii::SP)));
        assert_eq!(fws(false, b" \r\n \r\n world"), Ok((&b"world"[..], ascii::SP)));
        assert_eq!(fws(false, b" world"), Ok((&b"world"[..], ascii::SP)));
        assert!(fws(false, b"\r\nFrom: test").is_err());
        assert_eq!(fws(true, b"\n world"), Ok((&b"world"[..], ascii::SP)));
    }

    #[test]
    fn test_cfws_comment() {
        assert_eq!(
            cfws(false, b"(A nice \\) chap) <pete(his account)@silly.test>"),
            Ok((
                &b"<pete(his account)@silly.test>"[..],
                &b"(A nice \\) chap) "[..]
            ))
        );
    }

    #[test]
    fn test_cfws_nested() {
        assert_eq!(
            cfws(false, b"(double (comment) is fun) wouch"),
            Ok((&b"wouch"[..], &b"(double (comment) is fun) "[..]))
        );
    }

    #[test]
    fn test_comment_depth_limit() {
        let mut s = String::new();
        for _ in 0..25 {
            s.push('(');
        }
        s.push('x');
        for _ in 0..25 {
            s.push(')');
        }
        assert!(cfws(false, s.as_bytes()).is_err());
    }
}
