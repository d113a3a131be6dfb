use crate::ascii;
use crate::text::words::word;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, map_opt},
    multi::many1,
    IResult,
};

#[derive(Clone, Debug, PartialEq)]
enum LocalPartToken {
    Dot,
    Word(String),
}

/// Local-part: one or more words separated by `.`, obsolete syntax
/// (multiple/leading/trailing dots, as seen in real-world Enron-style
/// corpora) tolerated. At least one `word` must be present -- a
/// dots-only or empty local-part is not a valid address (mirrors the
/// original decoder's unconditional first `ReadWord` call).
///
/// ```abnf
/// obs-local-part = *("." / word)
/// ```
pub fn local_part(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], String> {
    map_opt(
        many1(alt((
            map(tag(&[ascii::PERIOD]), |_| LocalPartToken::Dot),
            map(|i| word(mixed_eol, i), LocalPartToken::Word),
        ))),
        |tokens| {
            if !tokens.iter().any(|t| matches!(t, LocalPartToken::Word(_))) {
                return None;
            }
            let mut out = String::new();
            for tok in tokens {
                match tok {
                    LocalPartToken::Dot => out.push('.'),
                    LocalPartToken::Word(w) => out.push_str(&w),
                }
            }
            Some(out)
        },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_part() {
        assert_eq!(
            local_part(false, b"john.q.public@example.com"),
            Ok((&b"@example.com"[..], "john.q.public".to_string()))
        );
    }

    #[test]
    fn test_local_part_enron() {
        assert_eq!(
            local_part(false, b"a..howard@enron.com"),
            Ok((&b"@enron.com"[..], "a..howard".to_string()))
        );
        assert_eq!(
            local_part(false, b".nelson@enron.com"),
            Ok((&b"@enron.com"[..], ".nelson".to_string()))
        );
    }

    #[test]
    fn test_local_part_rejects_no_word() {
        assert!(local_part(false, b"@example.com").is_err());
        assert!(local_part(false, b"...@example.com").is_err());
    }
}
