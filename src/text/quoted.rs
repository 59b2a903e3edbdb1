use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while1},
    combinator::opt,
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};
use std::borrow::Cow;

use bounded_static::ToStatic;

use crate::text::ascii;
use crate::text::whitespace::{fws, ows};

/// A parsed quoted-string, kept as the list of its unescaped chunks.
#[derive(Debug, PartialEq, Default, Clone, ToStatic)]
pub struct QuotedString<'a>(pub Vec<Cow<'a, [u8]>>);

impl<'a> QuotedString<'a> {
    pub fn push(&mut self, chunk: Cow<'a, [u8]>) {
        self.0.push(chunk)
    }

    /// Flattens the chunks into a single byte string; borrows when the
    /// quoted-string was a single unescaped run.
    pub fn to_bytes(&self) -> Cow<'a, [u8]> {
        match self.0.len() {
            0 => Cow::Borrowed(&[]),
            1 => self.0[0].clone(),
            _ => Cow::Owned(self.0.iter().fold(
                Vec::with_capacity(self.0.iter().map(|c| c.len()).sum()),
                |mut acc, c| {
                    acc.extend_from_slice(c);
                    acc
                },
            )),
        }
    }
}

/// Quoted pair
///
/// ```abnf
/// quoted-pair = "\" any
/// ```
pub fn quoted_pair(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(tag("\\"), take(1usize))(input)
}

/// Any byte allowed unescaped inside a quoted-string. Bytes above 0x7e are
/// tolerated so 8-bit parameter values survive a lenient parse.
fn is_qtext(c: u8) -> bool {
    !matches!(c, ascii::DQUOTE | ascii::BACKSLASH | ascii::CR | ascii::LF)
}

/// Quoted string content
///
/// ```abnf
/// qcontent = qtext / quoted-pair
/// ```
fn qcontent(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((take_while1(is_qtext), quoted_pair))(input)
}

/// Quoted string
///
/// ```abnf
/// quoted-string = [FWS] DQUOTE *([FWS] qcontent) [FWS] DQUOTE [FWS]
/// ```
pub fn quoted_string(input: &[u8]) -> IResult<&[u8], QuotedString<'_>> {
    let (input, _) = ows(input)?;
    let (input, _) = tag("\"")(input)?;
    let (input, content) = many0(pair(opt(fws), qcontent))(input)?;

    let mut qstring = QuotedString::default();
    for (maybe_wsp, chunk) in content {
        if maybe_wsp.is_some() {
            qstring.push(Cow::Borrowed(&b" "[..]));
        }
        qstring.push(Cow::Borrowed(chunk));
    }

    let (input, maybe_wsp) = opt(fws)(input)?;
    if maybe_wsp.is_some() {
        qstring.push(Cow::Borrowed(&b" "[..]));
    }

    let (input, _) = tag("\"")(input)?;
    let (input, _) = ows(input)?;
    Ok((input, qstring))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_string_escape() {
        assert_eq!(
            quoted_string(b" \"hello\\\"world\" ").unwrap().1.to_bytes(),
            Cow::<[u8]>::Owned(b"hello\"world".to_vec()),
        );
    }

    #[test]
    fn test_quoted_string_fold() {
        assert_eq!(
            quoted_string(b"\"hello\r\n world\"").unwrap().1.to_bytes(),
            Cow::<[u8]>::Owned(b"hello world".to_vec()),
        );
    }

    #[test]
    fn test_quoted_string_single_chunk_borrows() {
        let parsed = quoted_string(b"\"simple boundary\"").unwrap().1;
        assert_eq!(parsed.to_bytes(), Cow::Borrowed(&b"simple boundary"[..]));
        assert!(matches!(parsed.to_bytes(), Cow::Borrowed(_)));
    }
}
