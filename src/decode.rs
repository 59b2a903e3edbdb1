//! Content decoding: transfer encoding, then charset for text bodies.
//!
//! Decoding is lazy; nothing here runs while the tree is built. The caller
//! picks a [`Recovery`] policy per call: `Lenient` skips malformed units the
//! way most mail software does, `Strict` surfaces them as
//! [`Error::ContentDecode`].

use std::borrow::Cow;

use base64::{engine::general_purpose, Engine as _};
use encoding_rs::Encoding;

use crate::error::Error;
use crate::mime::mechanism::Mechanism;
use crate::text::ascii;
use crate::Recovery;

/// Reverses the transfer encoding. Identity mechanisms borrow the input.
pub fn transfer_decode<'a>(
    mechanism: &Mechanism<'_>,
    raw: &'a [u8],
    recovery: Recovery,
) -> Result<Cow<'a, [u8]>, Error> {
    match mechanism {
        Mechanism::_7Bit | Mechanism::_8Bit | Mechanism::Binary => Ok(Cow::Borrowed(raw)),
        Mechanism::Base64 => base64_decode(raw, recovery).map(Cow::Owned),
        Mechanism::QuotedPrintable => quoted_printable_decode(raw, recovery).map(Cow::Owned),
        Mechanism::Other(token) => match recovery {
            // unknown mechanism: hand the caller the raw bytes
            Recovery::Lenient => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    mechanism = String::from_utf8_lossy(token).as_ref(),
                    "unknown transfer encoding, passing body through"
                );
                Ok(Cow::Borrowed(raw))
            }
            Recovery::Strict => Err(Error::ContentDecode(format!(
                "unknown transfer encoding {}",
                String::from_utf8_lossy(token)
            ))),
        },
    }
}

fn base64_decode(raw: &[u8], recovery: Recovery) -> Result<Vec<u8>, Error> {
    match recovery {
        Recovery::Strict => {
            // transport line breaks and padding whitespace are expected even
            // in a well-formed body
            let filtered: Vec<u8> = raw
                .iter()
                .copied()
                .filter(|&c| !matches!(c, ascii::CR | ascii::LF | ascii::SP | ascii::HTAB))
                .collect();
            general_purpose::STANDARD
                .decode(&filtered)
                .map_err(|e| Error::ContentDecode(format!("base64: {}", e)))
        }
        Recovery::Lenient => {
            // drop everything outside the alphabet, drop padding, truncate a
            // dangling unit
            let mut cleaned: Vec<u8> = raw
                .iter()
                .copied()
                .filter(|&c| c.is_ascii_alphanumeric() || c == b'+' || c == b'/')
                .collect();
            if cleaned.len() % 4 == 1 {
                cleaned.pop();
            }
            Ok(general_purpose::STANDARD_NO_PAD
                .decode(&cleaned)
                .unwrap_or_default())
        }
    }
}

fn quoted_printable_decode(raw: &[u8], recovery: Recovery) -> Result<Vec<u8>, Error> {
    let mode = match recovery {
        Recovery::Lenient => quoted_printable::ParseMode::Robust,
        Recovery::Strict => quoted_printable::ParseMode::Strict,
    };
    quoted_printable::decode(raw, mode)
        .map_err(|e| Error::ContentDecode(format!("quoted-printable: {}", e)))
}

/// Decodes text bytes with the named charset, falling back to WINDOWS-1252
/// when the label is unknown (it decodes any byte sequence, so a lenient
/// decode cannot fail).
pub fn charset_decode(label: &[u8], bytes: &[u8], recovery: Recovery) -> Result<String, Error> {
    let codec = Encoding::for_label(label).unwrap_or(encoding_rs::WINDOWS_1252);
    let (text, malformed) = codec.decode_without_bom_handling(bytes);
    if malformed && recovery == Recovery::Strict {
        return Err(Error::ContentDecode(format!(
            "text is not valid {}",
            codec.name()
        )));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64() {
        assert_eq!(
            transfer_decode(&Mechanism::Base64, b"SGVsbG8gd29ybGQ=", Recovery::Strict).unwrap(),
            Cow::<[u8]>::Owned(b"Hello world".to_vec()),
        );
    }

    #[test]
    fn test_base64_wrapped_lines() {
        assert_eq!(
            base64_decode(b"SGVs\r\nbG8g\r\nd29y\r\nbGQ=\r\n", Recovery::Strict).unwrap(),
            b"Hello world".to_vec(),
        );
    }

    #[test]
    fn test_base64_garbage() {
        assert!(base64_decode(b"SGVsbG8*!?", Recovery::Strict).is_err());
        assert_eq!(
            base64_decode(b"SGVsbG8*!?", Recovery::Lenient).unwrap(),
            b"Hello".to_vec(),
        );
    }

    #[test]
    fn test_quoted_printable_soft_break() {
        assert_eq!(
            quoted_printable_decode(
                b"Now's the time =\r\nfor all folk to come=\r\n to the aid of their country.",
                Recovery::Lenient,
            )
            .unwrap(),
            b"Now's the time for all folk to come to the aid of their country.".to_vec(),
        );
    }

    #[test]
    fn test_quoted_printable_bad_escape() {
        assert!(quoted_printable_decode(b"broken =zz escape", Recovery::Strict).is_err());
        assert!(quoted_printable_decode(b"broken =zz escape", Recovery::Lenient).is_ok());
    }

    #[test]
    fn test_identity_borrows() {
        let body = &b"already plain"[..];
        assert!(matches!(
            transfer_decode(&Mechanism::_7Bit, body, Recovery::Strict).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_charset_latin1() {
        assert_eq!(
            charset_decode(b"iso-8859-1", b"caf\xe9", Recovery::Strict).unwrap(),
            "café",
        );
    }

    #[test]
    fn test_charset_unknown_label_falls_back() {
        assert_eq!(
            charset_decode(b"x-no-such-charset", b"caf\xe9", Recovery::Lenient).unwrap(),
            "café",
        );
    }

    #[test]
    fn test_charset_strict_rejects_malformed() {
        assert!(charset_decode(b"utf-8", b"caf\xe9", Recovery::Strict).is_err());
        assert_eq!(
            charset_decode(b"utf-8", b"caf\xe9", Recovery::Lenient).unwrap(),
            "caf\u{fffd}",
        );
    }
}
