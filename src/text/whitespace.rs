//! Whitespace and line-terminator parsers shared by every grammar.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{space0, space1},
    combinator::{eof, opt, recognize, value},
    multi::{many0, many1},
    sequence::{pair, terminated, tuple},
    IResult,
};

use crate::text::ascii;

/// Obsolete/Compatible CRLF
///
/// Theoretically, all lines must end with \r\n
/// but some mail servers like Dovecot support malformated emails,
/// for example with only \n eol. It works because
/// \r or \n is allowed nowhere else, so we also add this support.
pub fn obs_crlf(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((
        tag(ascii::CRLF),
        tag(ascii::CRCRLF),
        tag(&[ascii::CR]),
        tag(&[ascii::LF]),
    ))(input)
}

/// End of a header line: a line terminator, or the end of the buffer.
///
/// Multipart part spans are sliced out of the surrounding message, so a
/// header section may legitimately stop at the end of its slice.
pub fn line_end(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((obs_crlf, eof))(input)
}

/// ```abnf
/// fold_line = any *(1*(crlf WS) any) crlf
/// ```
pub fn foldable_line(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(
        recognize(tuple((
            is_not(ascii::CRLF),
            many0(pair(many1(pair(obs_crlf, space1)), is_not(ascii::CRLF))),
        ))),
        line_end,
    )(input)
}

// Note: WSP = SP / HTAB = %x20 / %x09
// nom::*::space0 = *WSP
// nom::*::space1 = 1*WSP

/// Permissive foldable white space
///
/// Folding white space are used for long headers splitted on multiple lines.
/// The obsolete syntax allowes multiple lines without content; implemented for
/// compatibility reasons
pub fn fws(input: &[u8]) -> IResult<&[u8], u8> {
    let (input, _) = alt((recognize(many1(fold_marker)), space1))(input)?;
    Ok((input, ascii::SP))
}
fn fold_marker(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, _) = space0(input)?;
    let (input, _) = obs_crlf(input)?;
    space1(input)
}

/// Optional folding white space.
pub fn ows(input: &[u8]) -> IResult<&[u8], ()> {
    value((), opt(fws))(input)
}

/// Collapses folded line breaks (and the whitespace run around them) into a
/// single space. Used to expose generic field bodies as one logical line.
pub fn unfold(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        let c = body[i];
        if c == ascii::CR || c == ascii::LF {
            while i < body.len()
                && matches!(body[i], ascii::CR | ascii::LF | ascii::SP | ascii::HTAB)
            {
                i += 1;
            }
            if !out.is_empty() && i < body.len() {
                out.push(ascii::SP);
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obs_crlf() {
        assert_eq!(obs_crlf(b"\rworld"), Ok((&b"world"[..], &b"\r"[..])));
        assert_eq!(obs_crlf(b"\r\nworld"), Ok((&b"world"[..], &b"\r\n"[..])));
        assert_eq!(obs_crlf(b"\nworld"), Ok((&b"world"[..], &b"\n"[..])));
    }

    #[test]
    fn test_fws() {
        assert_eq!(fws(b"\r\n world"), Ok((&b"world"[..], ascii::SP)));
        assert_eq!(fws(b" \r\n \r\n world"), Ok((&b"world"[..], ascii::SP)));
        assert_eq!(fws(b" world"), Ok((&b"world"[..], ascii::SP)));
        assert!(fws(b"\r\nFrom: test").is_err());
    }

    #[test]
    fn test_foldable_line() {
        assert_eq!(
            foldable_line(b"text/plain\r\n charset=utf-8\r\nnext"),
            Ok((&b"next"[..], &b"text/plain\r\n charset=utf-8"[..]))
        );
        assert_eq!(
            foldable_line(b"no terminator"),
            Ok((&b""[..], &b"no terminator"[..]))
        );
    }

    #[test]
    fn test_unfold() {
        assert_eq!(unfold(b"hello\r\n   folded world"), b"hello folded world");
        assert_eq!(unfold(b"plain"), b"plain");
    }
}
