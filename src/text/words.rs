//! RFC 2045 token.

use nom::{bytes::complete::take_while1, sequence::delimited, IResult};

use crate::text::ascii;
use crate::text::whitespace::ows;

/// Is this byte allowed in a token?
///
/// ```abnf
/// token := 1*<any (US-ASCII) CHAR except SPACE, CTLs, or tspecials>
/// tspecials := "(" / ")" / "<" / ">" / "@" / "," / ";" / ":" /
///              "\" / <"> / "/" / "[" / "]" / "?" / "="
/// ```
pub fn is_token_char(c: u8) -> bool {
    (ascii::EXCLAMATION..=ascii::TILDE).contains(&c)
        && !matches!(
            c,
            b'(' | b')'
                | b'<'
                | b'>'
                | b'@'
                | b','
                | b';'
                | b':'
                | b'\\'
                | b'"'
                | b'/'
                | b'['
                | b']'
                | b'?'
                | b'='
        )
}

pub fn token(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_token_char)(input)
}

/// A token with its surrounding (foldable) whitespace consumed.
pub fn token_ws(input: &[u8]) -> IResult<&[u8], &[u8]> {
    delimited(ows, token, ows)(input)
}
