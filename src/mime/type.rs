use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::map,
    multi::many0,
    sequence::{pair, preceded, tuple},
    IResult,
};
use std::borrow::Cow;

use crate::text::quoted::{quoted_string, QuotedString};
use crate::text::whitespace::ows;
use crate::text::words::{token, token_ws};

/// A parameter value: bare token or quoted-string.
#[derive(Debug, PartialEq, Clone)]
pub enum MIMEWord<'a> {
    Token(&'a [u8]),
    Quoted(QuotedString<'a>),
}

impl<'a> MIMEWord<'a> {
    /// The unescaped value bytes.
    pub fn to_bytes(&self) -> Cow<'a, [u8]> {
        match self {
            Self::Token(t) => Cow::Borrowed(t),
            Self::Quoted(q) => q.to_bytes(),
        }
    }
}

pub fn mime_word(input: &[u8]) -> IResult<&[u8], MIMEWord<'_>> {
    alt((
        map(quoted_string, MIMEWord::Quoted),
        map(token_ws, MIMEWord::Token),
    ))(input)
}

#[derive(Debug, PartialEq, Clone)]
pub struct Parameter<'a> {
    pub name: &'a [u8],
    pub value: MIMEWord<'a>,
}

pub fn parameter(input: &[u8]) -> IResult<&[u8], Parameter<'_>> {
    map(
        tuple((token_ws, tag(b"="), mime_word)),
        |(name, _, value)| Parameter { name, value },
    )(input)
}

pub fn parameter_list(input: &[u8]) -> IResult<&[u8], Vec<Parameter<'_>>> {
    many0(preceded(pair(ows, tag(b";")), parameter))(input)
}

/// A Content-Type field body: `type "/" subtype *( ";" parameter )`.
#[derive(Debug, PartialEq, Clone)]
pub struct ContentType<'a> {
    pub main: &'a [u8],
    pub sub: &'a [u8],
    pub params: Vec<Parameter<'a>>,
}

/// The primary production alone: `type "/" subtype`.
///
/// Used for degraded extraction when the parameter list is malformed.
pub fn mime_type(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    map(tuple((token_ws, tag(b"/"), token)), |(main, _, sub)| {
        (main, sub)
    })(input)
}

pub fn content_type(input: &[u8]) -> IResult<&[u8], ContentType<'_>> {
    map(
        tuple((mime_type, parameter_list)),
        |((main, sub), params)| ContentType { main, sub, params },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_plain() {
        assert_eq!(
            content_type(b"text/plain"),
            Ok((
                &b""[..],
                ContentType {
                    main: &b"text"[..],
                    sub: &b"plain"[..],
                    params: vec![],
                }
            ))
        );
    }

    #[test]
    fn test_content_type_charset() {
        assert_eq!(
            content_type(b"text/plain; charset=utf-8"),
            Ok((
                &b""[..],
                ContentType {
                    main: &b"text"[..],
                    sub: &b"plain"[..],
                    params: vec![Parameter {
                        name: &b"charset"[..],
                        value: MIMEWord::Token(&b"utf-8"[..]),
                    }],
                }
            ))
        );
    }

    #[test]
    fn test_content_type_quoted_boundary() {
        let (rest, parsed) =
            content_type(b"multipart/mixed; boundary=\"simple boundary\"").unwrap();
        assert_eq!(rest, &b""[..]);
        assert_eq!(parsed.main, &b"multipart"[..]);
        assert_eq!(parsed.params[0].name, &b"boundary"[..]);
        assert_eq!(
            parsed.params[0].value.to_bytes(),
            Cow::Borrowed(&b"simple boundary"[..])
        );
    }

    #[test]
    fn test_content_type_folded() {
        let (rest, parsed) =
            content_type(b"multipart/alternative;\r\n boundary=\"b1_e376dc71\"").unwrap();
        assert_eq!(rest, &b""[..]);
        assert_eq!(parsed.sub, &b"alternative"[..]);
        assert_eq!(
            parsed.params[0].value.to_bytes(),
            Cow::Borrowed(&b"b1_e376dc71"[..])
        );
    }

    #[test]
    fn test_content_type_unquoted_specials_stop() {
        // an unquoted value full of specials parses only partially: the
        // caller sees leftover input and flags the field
        let (rest, parsed) = content_type(b"multipart/mixed; boundary=-=Part.2=-").unwrap();
        assert_eq!(parsed.main, &b"multipart"[..]);
        assert_eq!(rest, &b"=Part.2=-"[..]);
    }

    #[test]
    fn test_mime_type_degraded() {
        assert_eq!(
            mime_type(b"multipart/mixed; boundary=-=Part.2=-").unwrap().1,
            (&b"multipart"[..], &b"mixed"[..])
        );
    }
}
