use crate::text::whitespace::cfws;
use crate::text::words::word;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, opt},
    multi::many0,
    sequence::preceded,
    IResult,
};

#[derive(Clone, Debug, PartialEq)]
enum PhraseToken {
    Word(String),
    Dot,
}

/// Phrase: `1*word` / obsolete `word *(word / "." / CFWS)`.
///
/// Leading and trailing whitespace are not part of the phrase; a sole
/// `.` is a valid phrase element (used by display names like "John Q.
/// Public"). Returns the phrase rendered with single spaces between
/// words and dots glued to the preceding token.
pub fn phrase(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    let (input, first) = word(mixed_eol, input)?;
    let (input, rest) = many0(alt((
        map(|i| word(mixed_eol, i), PhraseToken::Word),
        map(
            preceded(opt(|i| cfws(mixed_eol, i)), tag(".")),
            |_| PhraseToken::Dot,
        ),
    )))(input)?;

    let mut out = first;
    for tok in rest {
        match tok {
            PhraseToken::Word(w) => {
                out.push(' ');
                out.push_str(&w);
            }
            PhraseToken::Dot => out.push('.'),
        }
    }
    Ok((input, out))
}

/// Comma-separated phrase list. The obsolete syntax permits empty
/// elements (consecutive commas), which are silently skipped. Fails if
/// the resulting list is empty.
pub fn phrase_list(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], Vec<String>> {
    let (input, items) = nom::multi::separated_list1(
        tag(","),
        alt((
            map(|i| phrase(mixed_eol, i), Some),
            map(opt(|i| cfws(mixed_eol, i)), |_| None),
        )),
    )(input)?;
    let items: Vec<String> = items.into_iter().flatten().collect();
    if items.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }
    Ok((input, items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_simple() {
        assert_eq!(
            phrase(false, b"Mary Smith <mary@x.test>"),
            Ok((&b"<mary@x.test>"[..], "Mary Smith".to_string()))
        );
    }

    #[test]
    fn test_phrase_with_dot() {
        assert_eq!(
            phrase(false, b"John Q. Public,"),
            Ok((&b","[..], "John Q. Public".to_string()))
        );
    }

    #[test]
    fn test_phrase_list() {
        assert_eq!(
            phrase_list(false, b"urgent, ,work"),
            Ok((&b""[..], vec!["urgent".to_string(), "work".to_string()]))
        );
    }
}
