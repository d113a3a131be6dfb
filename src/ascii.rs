#![allow(dead_code)]

//! Byte-level constants and character-class predicates for the RFC 5322
//! lexical grammar.

pub const NULL: u8 = 0x00;
pub const SOH: u8 = 0x01;
pub const BS: u8 = 0x08;
pub const HT: u8 = 0x09;
pub const LF: u8 = 0x0A;
pub const VT: u8 = 0x0B;
pub const FF: u8 = 0x0C;
pub const CR: u8 = 0x0D;
pub const SO: u8 = 0x0E;
pub const US: u8 = 0x1F;
pub const DEL: u8 = 0x7F;

pub const SP: u8 = 0x20;
pub const EXCLAMATION: u8 = 0x21;
pub const DQUOTE: u8 = 0x22;
pub const NUM: u8 = 0x23;
pub const DOLLAR: u8 = 0x24;
pub const PERCENT: u8 = 0x25;
pub const AMPERSAND: u8 = 0x26;
pub const SQUOTE: u8 = 0x27;
pub const LEFT_PAR: u8 = 0x28;
pub const RIGHT_PAR: u8 = 0x29;
pub const ASTERISK: u8 = 0x2A;
pub const PLUS: u8 = 0x2B;
pub const COMMA: u8 = 0x2C;
pub const MINUS: u8 = 0x2D;
pub const PERIOD: u8 = 0x2E;
pub const SLASH: u8 = 0x2F;
pub const COL: u8 = 0x3A;
pub const SEM_COL: u8 = 0x3B;
pub const LT: u8 = 0x3C;
pub const EQ: u8 = 0x3D;
pub const GT: u8 = 0x3E;
pub const QUESTION: u8 = 0x3F;
pub const AT: u8 = 0x40;
pub const LEFT_BRACKET: u8 = 0x5B;
pub const BACKSLASH: u8 = 0x5C;
pub const RIGHT_BRACKET: u8 = 0x5D;
pub const CARRET: u8 = 0x5E;
pub const UNDERSCORE: u8 = 0x5F;
pub const GRAVE: u8 = 0x60;
pub const LEFT_CURLY: u8 = 0x7B;
pub const PIPE: u8 = 0x7C;
pub const RIGHT_CURLY: u8 = 0x7D;
pub const TILDE: u8 = 0x7E;

pub const CRLF: &[u8] = &[CR, LF];
pub const CRCRLF: &[u8] = &[CR, CR, LF];
pub const WS: &[u8] = &[HT, SP];

/// WSP = SP / HTAB
pub fn is_wsp(c: u8) -> bool {
    c == SP || c == HT
}

/// US-ASCII printable characters (VCHAR).
pub fn is_vchar(c: u8) -> bool {
    (EXCLAMATION..=TILDE).contains(&c)
}

/// obs-NO-WS-CTL: control characters with no whitespace significance.
pub fn is_obs_no_ws_ctl(c: u8) -> bool {
    (SOH..=BS).contains(&c) || c == VT || c == FF || (SO..=US).contains(&c) || c == DEL
}

/// atext: the characters allowed, unquoted, in an atom.
pub fn is_atext(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || c == EXCLAMATION
        || c == NUM
        || c == DOLLAR
        || c == PERCENT
        || c == AMPERSAND
        || c == SQUOTE
        || c == ASTERISK
        || c == PLUS
        || c == MINUS
        || c == SLASH
        || c == EQ
        || c == QUESTION
        || c == CARRET
        || c == UNDERSCORE
        || c == GRAVE
        || c == LEFT_CURLY
        || c == PIPE
        || c == RIGHT_CURLY
        || c == TILDE
}

/// ctext: comment text, excluding `(`, `)`, `\`.
pub fn is_restr_ctext(c: u8) -> bool {
    (EXCLAMATION..=SQUOTE).contains(&c)
        || (ASTERISK..=LEFT_BRACKET).contains(&c)
        || (RIGHT_BRACKET..=TILDE).contains(&c)
}

pub fn is_ctext(c: u8) -> bool {
    is_restr_ctext(c) || is_obs_no_ws_ctl(c)
}

/// qtext: quoted-string text, excluding `\` and `"`.
pub fn is_strict_qtext(c: u8) -> bool {
    c == EXCLAMATION || (NUM..=LEFT_BRACKET).contains(&c) || (RIGHT_BRACKET..=TILDE).contains(&c)
}

pub fn is_qtext(c: u8) -> bool {
    is_strict_qtext(c) || is_obs_no_ws_ctl(c)
}

/// dtext: domain-literal text, excluding `[`, `]`, `\`.
pub fn is_strict_dtext(c: u8) -> bool {
    (0x21..=0x5A).contains(&c) || (0x5E..=0x7E).contains(&c)
}

pub fn is_dtext(c: u8) -> bool {
    is_strict_dtext(c) || is_obs_no_ws_ctl(c)
}

/// field-name character: printable ASCII excluding `:`.
pub fn is_field_char(c: u8) -> bool {
    (0x21..=0x39).contains(&c) || (0x3B..=0x7E).contains(&c)
}

/// A byte that may legally follow a backslash in a quoted-pair.
pub fn is_quotable(c: u8) -> bool {
    is_vchar(c) || is_wsp(c)
}
