//! The parsed entity tree.
//!
//! An entity is a header section plus a body; the body may itself hold
//! entities (multipart children, an embedded message). The tree borrows from
//! the input buffer and is immutable once built.

/// Multipart bodies
pub mod composite;

/// Leaf bodies
pub mod discrete;

use nom::{
    branch::alt,
    bytes::complete::is_not,
    combinator::{not, recognize},
    multi::many0,
    sequence::pair,
    IResult,
};
use std::borrow::Cow;

use bounded_static::ToStatic;

pub use crate::entity::composite::Multipart;
pub use crate::entity::discrete::{BinaryBody, TextBody};
use crate::error::Error;
use crate::header::{self, Header};
use crate::text::ascii::CRLF;
use crate::text::boundary::boundary;
use crate::text::whitespace::obs_crlf;
use crate::{Config, Recovery};

/// Charset assumed for text bodies that do not declare one.
const DEFAULT_CHARSET: &[u8] = b"us-ascii";

/// A header section and the body it describes.
#[derive(Debug, PartialEq, Clone, ToStatic)]
pub struct Entity<'a> {
    pub header: Header<'a>,
    pub body: Body<'a>,
}

/// The root entity of a parsed stream.
pub type Message<'a> = Entity<'a>;

/// A child entity of a multipart body.
pub type BodyPart<'a> = Entity<'a>;

#[derive(Debug, PartialEq, Clone, ToStatic)]
pub enum Body<'a> {
    Text(TextBody<'a>),
    Binary(BinaryBody<'a>),
    Multipart(Multipart<'a>),
    Message(Box<Entity<'a>>),
}

impl<'a> Body<'a> {
    pub fn as_text(&self) -> Option<&TextBody<'a>> {
        match self {
            Self::Text(x) => Some(x),
            _ => None,
        }
    }
    pub fn as_binary(&self) -> Option<&BinaryBody<'a>> {
        match self {
            Self::Binary(x) => Some(x),
            _ => None,
        }
    }
    pub fn as_multipart(&self) -> Option<&Multipart<'a>> {
        match self {
            Self::Multipart(x) => Some(x),
            _ => None,
        }
    }
    pub fn as_message(&self) -> Option<&Entity<'a>> {
        match self {
            Self::Message(x) => Some(x),
            _ => None,
        }
    }
}

/// Parses one entity: header section, then the body the header announces.
pub(crate) fn entity<'a>(config: Config, input: &'a [u8]) -> Result<Entity<'a>, Error> {
    let (body_input, raw_fields) = header::header(input).map_err(|_| Error::Parse)?;
    let header = Header::from_raw(raw_fields);
    if config.bad_header_line == Recovery::Strict && !header.unparsed().is_empty() {
        return Err(Error::MalformedHeaderLine);
    }
    let body = build_body(config, &header, body_input)?;
    Ok(Entity { header, body })
}

fn build_body<'a>(
    config: Config,
    header: &Header<'a>,
    input: &'a [u8],
) -> Result<Body<'a>, Error> {
    let encoding = header
        .transfer_encoding()
        .map(|f| f.mechanism().clone())
        .unwrap_or_default();

    if let Some(ctype) = header.content_type() {
        if let Some(mime) = ctype.mime() {
            if mime.is_multipart() {
                return match ctype.boundary() {
                    Some(bound) => Ok(Body::Multipart(composite::multipart(config, bound, input)?)),
                    None if config.missing_boundary == Recovery::Strict => {
                        Err(Error::MissingBoundary)
                    }
                    None => {
                        // unusable boundary: keep the content as an opaque leaf
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            "multipart entity without a usable boundary, degrading to binary"
                        );
                        Ok(Body::Binary(BinaryBody {
                            encoding,
                            raw: Cow::Borrowed(input),
                        }))
                    }
                };
            }
            if mime.is_message() {
                return Ok(Body::Message(Box::new(entity(config, input)?)));
            }
            if !mime.is_text() {
                return Ok(Body::Binary(BinaryBody {
                    encoding,
                    raw: Cow::Borrowed(input),
                }));
            }
            let charset = ctype
                .charset()
                .map(|p| p.value.clone())
                .unwrap_or(Cow::Borrowed(DEFAULT_CHARSET));
            return Ok(Body::Text(TextBody {
                charset,
                encoding,
                raw: Cow::Borrowed(input),
            }));
        }
    }

    // absent or hopeless content-type: text/plain in us-ascii
    Ok(Body::Text(TextBody {
        charset: Cow::Borrowed(DEFAULT_CHARSET),
        encoding,
        raw: Cow::Borrowed(input),
    }))
}

/// Everything up to (but not including) the next delimiter line of `bound`,
/// or to the end of input. The line terminator owned by the delimiter is not
/// part of the span.
pub(crate) fn part_raw<'a>(bound: &[u8]) -> impl Fn(&'a [u8]) -> IResult<&'a [u8], &'a [u8]> + '_ {
    move |input| {
        recognize(many0(pair(
            not(boundary(bound)),
            alt((is_not(CRLF), obs_crlf)),
        )))(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_raw() {
        assert_eq!(
            part_raw(b"simple boundary")(
                b"Content-type: text/plain; charset=us-ascii\r\n\r\nThis is explicitly typed plain US-ASCII text.\r\n\r\n--simple boundary--\r\n"
            ),
            Ok((
                &b"\r\n--simple boundary--\r\n"[..],
                &b"Content-type: text/plain; charset=us-ascii\r\n\r\nThis is explicitly typed plain US-ASCII text.\r\n"[..],
            ))
        );
    }

    #[test]
    fn test_part_raw_stops_at_eof() {
        assert_eq!(
            part_raw(b"b")(b"no delimiter here"),
            Ok((&b""[..], &b"no delimiter here"[..]))
        );
    }

    #[test]
    fn test_entity_default_type() {
        let parsed = entity(Config::default(), b"Subject: hi\r\n\r\nplain body").unwrap();
        let text = parsed.body.as_text().unwrap();
        assert_eq!(text.charset.as_ref(), b"us-ascii");
        assert_eq!(text.raw.as_ref(), b"plain body");
    }

    #[test]
    fn test_entity_strict_bad_header_line() {
        let input = b"garbage without colon\r\n\r\nbody";
        assert!(entity(Config::default(), input).is_ok());
        let strict = Config {
            bad_header_line: Recovery::Strict,
            ..Config::default()
        };
        assert_eq!(entity(strict, input), Err(Error::MalformedHeaderLine));
    }

    #[test]
    fn test_entity_missing_boundary_degrades() {
        let input = b"Content-Type: multipart/mixed\r\n\r\nopaque";
        let parsed = entity(Config::default(), input).unwrap();
        assert_eq!(
            parsed.body.as_binary().map(|b| b.raw.as_ref()),
            Some(&b"opaque"[..])
        );
        let strict = Config {
            missing_boundary: Recovery::Strict,
            ..Config::default()
        };
        assert_eq!(entity(strict, input), Err(Error::MissingBoundary));
    }
}
