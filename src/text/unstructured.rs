use crate::ascii;
use nom::IResult;

/// Unstructured text (RFC 5322 §3.2.5): any run of bytes up to the end
/// of the field. Leading FWS is permitted and dropped entirely. A fold
/// (an optional trailing-WSP run, a CRLF or bare LF, then a required
/// leading-WSP run) collapses to the fold's first post-break byte --
/// this keeps the distinction between a folded-in space and a
/// folded-in tab, matching what the continuation line actually wrote.
/// Whitespace not adjacent to a line break is left untouched.
pub fn unstructured(input: &[u8]) -> IResult<&[u8], String> {
    let mut i = 0;
    while i < input.len() && ascii::is_wsp(input[i]) {
        i += 1;
    }

    let mut out: Vec<u8> = Vec::with_capacity(input.len());
    while i < input.len() {
        let b = input[i];
        let is_break = b == ascii::LF || (b == ascii::CR && input.get(i + 1) == Some(&ascii::LF));
        if is_break {
            while matches!(out.last(), Some(&w) if ascii::is_wsp(w)) {
                out.pop();
            }
            i += if b == ascii::CR { 2 } else { 1 };
            let run_start = i;
            while i < input.len() && ascii::is_wsp(input[i]) {
                i += 1;
            }
            if i > run_start {
                out.push(input[run_start]);
            }
            continue;
        }
        out.push(b);
        i += 1;
    }

    Ok((&input[input.len()..], String::from_utf8_lossy(&out).into_owned()))
}

pub fn write_unstructured(out: &mut String, s: &str) {
    out.push_str(s);
}
