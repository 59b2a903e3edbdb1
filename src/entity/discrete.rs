//! Leaf bodies.

use std::borrow::Cow;
use std::fmt;

use bounded_static::ToStatic;

use crate::decode::{charset_decode, transfer_decode};
use crate::error::Error;
use crate::mime::mechanism::Mechanism;
use crate::Recovery;

/// A text body: raw bytes plus the charset and transfer encoding needed to
/// read them. Decoding is lazy.
#[derive(PartialEq, Clone, ToStatic)]
pub struct TextBody<'a> {
    pub charset: Cow<'a, [u8]>,
    pub encoding: Mechanism<'a>,
    pub raw: Cow<'a, [u8]>,
}

impl<'a> TextBody<'a> {
    /// Transfer-decodes then charset-decodes the body.
    pub fn decoded(&self, recovery: Recovery) -> Result<String, Error> {
        let bytes = transfer_decode(&self.encoding, &self.raw, recovery)?;
        charset_decode(&self.charset, &bytes, recovery)
    }
}

impl<'a> fmt::Debug for TextBody<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("TextBody")
            .field("charset", &String::from_utf8_lossy(&self.charset))
            .field("encoding", &self.encoding)
            .field(
                "raw",
                &format_args!("\"{}\"", String::from_utf8_lossy(&self.raw)),
            )
            .finish()
    }
}

/// An opaque body: anything that is not text and not a recognized composite.
#[derive(PartialEq, Clone, ToStatic)]
pub struct BinaryBody<'a> {
    pub encoding: Mechanism<'a>,
    pub raw: Cow<'a, [u8]>,
}

impl<'a> BinaryBody<'a> {
    /// Transfer-decodes the body.
    pub fn decoded(&self, recovery: Recovery) -> Result<Cow<'_, [u8]>, Error> {
        transfer_decode(&self.encoding, &self.raw, recovery)
    }
}

impl<'a> fmt::Debug for BinaryBody<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("BinaryBody")
            .field("encoding", &self.encoding)
            .field(
                "raw",
                &format_args!("\"{}\"", String::from_utf8_lossy(&self.raw)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_decoded() {
        let body = TextBody {
            charset: Cow::Borrowed(b"utf-8"),
            encoding: Mechanism::Base64,
            raw: Cow::Borrowed(b"Y2Fmw6k="),
        };
        assert_eq!(body.decoded(Recovery::Strict).unwrap(), "café");
    }

    #[test]
    fn test_binary_decoded_passthrough() {
        let body = BinaryBody {
            encoding: Mechanism::default(),
            raw: Cow::Borrowed(b"\x00\x01\x02"),
        };
        assert_eq!(
            body.decoded(Recovery::Strict).unwrap().as_ref(),
            &b"\x00\x01\x02"[..]
        );
    }
}
