//! Line terminator normalization.
//!
//! Messages captured from disk or from sloppy producers mix `\n`, `\r` and
//! `\r\n`. The grammars tolerate all of them, but callers that want a
//! canonical buffer (for storage or byte-exact reserialization) can rewrite
//! every terminator to CRLF first.

use std::borrow::Cow;
use std::io::Read;

use crate::error::Error;
use crate::text::ascii;

/// Rewrites every line terminator (`\n`, `\r`, `\r\n`) to CRLF.
///
/// Borrows the input untouched when it is already canonical.
pub fn normalize_eol(input: &[u8]) -> Cow<'_, [u8]> {
    let mut out: Option<Vec<u8>> = None;
    let mut copied = 0;
    let mut cursor = 0;
    while let Some(offset) = memchr::memchr2(ascii::CR, ascii::LF, &input[cursor..]) {
        let pos = cursor + offset;
        if input[pos] == ascii::CR && input.get(pos + 1) == Some(&ascii::LF) {
            cursor = pos + 2;
            continue;
        }
        let buf = out.get_or_insert_with(|| Vec::with_capacity(input.len() + 16));
        buf.extend_from_slice(&input[copied..pos]);
        buf.extend_from_slice(ascii::CRLF);
        // CR CR LF is one (obsolete) terminator, not two
        cursor = if input[pos] == ascii::CR
            && input.get(pos + 1) == Some(&ascii::CR)
            && input.get(pos + 2) == Some(&ascii::LF)
        {
            pos + 3
        } else {
            pos + 1
        };
        copied = cursor;
    }
    match out {
        None => Cow::Borrowed(input),
        Some(mut buf) => {
            buf.extend_from_slice(&input[copied..]);
            Cow::Owned(buf)
        }
    }
}

/// Reads a whole stream and normalizes its line terminators.
///
/// I/O failures abort with [`Error::StreamRead`]; no partial buffer is
/// returned.
pub fn read_normalized(mut reader: impl Read) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| Error::StreamRead(e.to_string()))?;
    Ok(normalize_eol(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lone_lf() {
        assert_eq!(
            normalize_eol(b"a\nb\nc").as_ref(),
            &b"a\r\nb\r\nc"[..]
        );
    }

    #[test]
    fn test_normalize_lone_cr() {
        assert_eq!(normalize_eol(b"a\rb").as_ref(), &b"a\r\nb"[..]);
    }

    #[test]
    fn test_normalize_crcrlf_is_one_terminator() {
        assert_eq!(normalize_eol(b"a\r\r\nb").as_ref(), &b"a\r\nb"[..]);
    }

    #[test]
    fn test_normalize_mixed() {
        assert_eq!(
            normalize_eol(b"a\r\nb\nc\rd").as_ref(),
            &b"a\r\nb\r\nc\r\nd"[..]
        );
    }

    #[test]
    fn test_normalize_canonical_borrows() {
        let input = b"a\r\nb\r\n";
        assert!(matches!(normalize_eol(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_read_normalized() {
        let got = read_normalized(&b"line one\nline two\n"[..]).unwrap();
        assert_eq!(got, b"line one\r\nline two\r\n");
    }
}
