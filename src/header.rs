//! Header section lexer.
//!
//! Splits the header block into logical field lines (continuation lines are
//! merged with the line they extend), without interpreting field bodies. A
//! non-continuation line with no usable name/colon prefix is kept as an
//! unparsed line so that one bad line never aborts the message.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{space0, space1},
    combinator::{map, opt, recognize},
    multi::{many0, many1},
    sequence::{pair, preceded, separated_pair, terminated},
    IResult,
};
use std::borrow::Cow;

use bounded_static::ToStatic;

use crate::field::{ContentTransferEncodingField, ContentTypeField, Field};
use crate::text::ascii;
use crate::text::whitespace::{foldable_line, line_end, obs_crlf};

/// One lexed header line, not yet interpreted.
#[derive(Debug, PartialEq)]
pub enum FieldRaw<'a> {
    Good { name: &'a [u8], body: &'a [u8] },
    Bad(&'a [u8]),
}

/// ```abnf
/// field-name = 1*(%x21-7E except ":")
/// ```
fn field_name(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(|c: u8| (ascii::EXCLAMATION..=ascii::TILDE).contains(&c) && c != b':')(input)
}

/// A field body up to its final line terminator, continuation lines
/// included. May be empty.
fn field_body(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(
        recognize(pair(
            opt(is_not(ascii::CRLF)),
            many0(pair(many1(pair(obs_crlf, space1)), opt(is_not(ascii::CRLF)))),
        )),
        line_end,
    )(input)
}

pub fn field_raw(input: &[u8]) -> IResult<&[u8], FieldRaw<'_>> {
    alt((
        map(
            separated_pair(
                terminated(field_name, space0),
                tag(b":"),
                preceded(space0, field_body),
            ),
            |(name, body)| FieldRaw::Good { name, body },
        ),
        map(foldable_line, FieldRaw::Bad),
    ))(input)
}

/// The whole header section, consuming the blank line that ends it.
pub fn header(input: &[u8]) -> IResult<&[u8], Vec<FieldRaw<'_>>> {
    terminated(many0(field_raw), opt(obs_crlf))(input)
}

/// An ordered header section: interpreted fields plus the raw bytes of the
/// lines the lexer had to skip.
#[derive(Debug, PartialEq, Clone, Default, ToStatic)]
pub struct Header<'a> {
    fields: Vec<Field<'a>>,
    unparsed: Vec<Cow<'a, [u8]>>,
}

impl<'a> Header<'a> {
    pub(crate) fn from_raw(raw: Vec<FieldRaw<'a>>) -> Self {
        let mut fields = Vec::new();
        let mut unparsed = Vec::new();
        for entry in raw {
            match entry {
                FieldRaw::Good { name, body } => fields.push(Field::interpret(name, body)),
                FieldRaw::Bad(line) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        line = String::from_utf8_lossy(line).as_ref(),
                        "skipping header line without a colon"
                    );
                    unparsed.push(Cow::Borrowed(line));
                }
            }
        }
        Self { fields, unparsed }
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// First field with this name, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Field<'a>> {
        self.fields
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn content_type(&self) -> Option<&ContentTypeField<'a>> {
        self.fields.iter().find_map(|f| match f {
            Field::ContentType(v) => Some(v),
            _ => None,
        })
    }

    pub fn transfer_encoding(&self) -> Option<&ContentTransferEncodingField<'a>> {
        self.fields.iter().find_map(|f| match f {
            Field::TransferEncoding(v) => Some(v),
            _ => None,
        })
    }

    /// Raw lines the lexer skipped.
    pub fn unparsed(&self) -> &[Cow<'a, [u8]>] {
        &self.unparsed
    }

    /// Reprints every field, one folded line each, without the terminating
    /// blank line. Skipped lines are not reprinted.
    pub fn raw(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for f in &self.fields {
            out.extend_from_slice(&f.raw());
            out.extend_from_slice(ascii::CRLF);
        }
        out
    }
}
