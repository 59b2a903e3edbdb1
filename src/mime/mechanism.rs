use bounded_static::ToStatic;
use nom::{combinator::map, IResult};
use std::borrow::Cow;

use crate::text::words::token_ws;

/// Content-Transfer-Encoding registry.
///
/// Unknown tokens are kept verbatim; whether they are an error is only
/// decided at decode time.
#[derive(Debug, Clone, PartialEq, Default, ToStatic)]
pub enum Mechanism<'a> {
    #[default]
    _7Bit,
    _8Bit,
    Binary,
    QuotedPrintable,
    Base64,
    Other(Cow<'a, [u8]>),
}

impl<'a> Mechanism<'a> {
    /// Canonical token for printing.
    pub fn as_token(&self) -> Cow<'_, str> {
        match self {
            Self::_7Bit => "7bit".into(),
            Self::_8Bit => "8bit".into(),
            Self::Binary => "binary".into(),
            Self::QuotedPrintable => "quoted-printable".into(),
            Self::Base64 => "base64".into(),
            Self::Other(token) => String::from_utf8_lossy(token),
        }
    }
}

pub fn mechanism(input: &[u8]) -> IResult<&[u8], Mechanism<'_>> {
    map(token_ws, |t: &[u8]| match t.to_ascii_lowercase().as_slice() {
        b"7bit" => Mechanism::_7Bit,
        b"8bit" => Mechanism::_8Bit,
        b"binary" => Mechanism::Binary,
        b"quoted-printable" => Mechanism::QuotedPrintable,
        b"base64" => Mechanism::Base64,
        _ => Mechanism::Other(Cow::Borrowed(t)),
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mechanism() {
        assert_eq!(mechanism(b"7bit").unwrap().1, Mechanism::_7Bit);
        assert_eq!(mechanism(b" 8bit ").unwrap().1, Mechanism::_8Bit);
        assert_eq!(mechanism(b"bInArY").unwrap().1, Mechanism::Binary);
        assert_eq!(mechanism(b" base64 ").unwrap().1, Mechanism::Base64);
        assert_eq!(
            mechanism(b" Quoted-Printable ").unwrap().1,
            Mechanism::QuotedPrintable,
        );
    }

    #[test]
    fn test_mechanism_unknown() {
        assert_eq!(
            mechanism(b"x-uuencode").unwrap().1,
            Mechanism::Other(Cow::Borrowed(b"x-uuencode")),
        );
    }

    #[test]
    fn test_mechanism_canonical_token() {
        assert_eq!(mechanism(b"BASE64").unwrap().1.as_token(), "base64");
    }
}
