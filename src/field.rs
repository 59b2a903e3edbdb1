//! Typed header fields.
//!
//! Only the two MIME structural fields get a grammar; everything else is a
//! [`GenericField`] kept verbatim. A structured field that fails its grammar
//! is *kept* (marked invalid, raw body preserved for reprinting) and the
//! type/subtype is still extracted on a best-effort basis, so a broken
//! parameter list never hides the fact that an entity claimed to be
//! `multipart/mixed`.

use std::borrow::Cow;
use std::fmt;

use bounded_static::ToStatic;

use crate::error::Error;
use crate::mime::mechanism::{mechanism, Mechanism};
use crate::mime::r#type;
use crate::print::HeaderWriter;
use crate::text::ascii;
use crate::text::whitespace::unfold;
use crate::text::words::is_token_char;

const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_TRANSFER_ENCODING: &str = "Content-Transfer-Encoding";

/// Every header field the crate distinguishes.
#[derive(Debug, PartialEq, Clone, ToStatic)]
pub enum Field<'a> {
    ContentType(ContentTypeField<'a>),
    TransferEncoding(ContentTransferEncodingField<'a>),
    Generic(GenericField<'a>),
}

impl<'a> Field<'a> {
    /// Dispatches a lexed header line on its (case-insensitive) name.
    pub(crate) fn interpret(name: &'a [u8], body: &'a [u8]) -> Field<'a> {
        let name = String::from_utf8_lossy(name);
        match name.to_ascii_lowercase().as_str() {
            "content-type" => Field::ContentType(ContentTypeField::interpret(name, body)),
            "content-transfer-encoding" => {
                Field::TransferEncoding(ContentTransferEncodingField::interpret(name, body))
            }
            _ => Field::Generic(GenericField {
                name,
                body: Cow::Borrowed(body),
            }),
        }
    }

    /// Field name with its original casing.
    pub fn name(&self) -> &str {
        match self {
            Self::ContentType(f) => &f.name,
            Self::TransferEncoding(f) => &f.name,
            Self::Generic(f) => &f.name,
        }
    }

    /// Did the whole field body match its grammar? Generic fields have no
    /// grammar and are always valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::ContentType(f) => f.is_valid(),
            Self::TransferEncoding(f) => f.is_valid(),
            Self::Generic(_) => true,
        }
    }

    /// The grammar violation carried by an invalid field, if any.
    pub fn error(&self) -> Option<Error> {
        let name = match self {
            Self::ContentType(f) if !f.is_valid() => CONTENT_TYPE,
            Self::TransferEncoding(f) if !f.is_valid() => CONTENT_TRANSFER_ENCODING,
            _ => return None,
        };
        Some(Error::InvalidFieldGrammar(name))
    }

    /// Raw `Name: body` rendering, folded, without a trailing CRLF.
    pub fn raw(&self) -> Vec<u8> {
        match self {
            Self::ContentType(f) => f.raw(),
            Self::TransferEncoding(f) => f.raw(),
            Self::Generic(f) => f.raw(),
        }
    }
}

/// `type/subtype`, stored lowercased.
#[derive(PartialEq, Clone, ToStatic)]
pub struct MimeType<'a> {
    pub main: Cow<'a, [u8]>,
    pub sub: Cow<'a, [u8]>,
}

impl<'a> MimeType<'a> {
    fn new(main: &'a [u8], sub: &'a [u8]) -> Self {
        Self {
            main: lower(main),
            sub: lower(sub),
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.main.as_ref() == b"multipart"
    }

    pub fn is_message(&self) -> bool {
        self.main.as_ref() == b"message" && self.sub.as_ref() == b"rfc822"
    }

    pub fn is_text(&self) -> bool {
        self.main.as_ref() == b"text"
    }
}

impl<'a> fmt::Display for MimeType<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            String::from_utf8_lossy(&self.main),
            String::from_utf8_lossy(&self.sub)
        )
    }
}

impl<'a> fmt::Debug for MimeType<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MimeType").field(&self.to_string()).finish()
    }
}

/// One Content-Type parameter, value unescaped. Names keep their original
/// casing but compare case-insensitively.
#[derive(PartialEq, Clone, ToStatic)]
pub struct Param<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, [u8]>,
}

impl<'a> fmt::Debug for Param<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("name", &self.name)
            .field("value", &String::from_utf8_lossy(&self.value))
            .finish()
    }
}

/// A Content-Type field.
///
/// Built either by parsing a raw body or from a typed value plus parameter
/// list; equivalent inputs converge to the same state and print the same raw
/// bytes.
#[derive(Debug, PartialEq, Clone, ToStatic)]
pub struct ContentTypeField<'a> {
    name: Cow<'a, str>,
    mime: Option<MimeType<'a>>,
    params: Vec<Param<'a>>,
    /// Verbatim body, kept when the grammar failed; reprinting an invalid
    /// field reproduces its source.
    invalid: Option<Cow<'a, [u8]>>,
}

impl<'a> ContentTypeField<'a> {
    fn interpret(name: Cow<'a, str>, body: &'a [u8]) -> Self {
        match r#type::content_type(body) {
            Ok((rest, parsed)) if only_fws(rest) => Self {
                name,
                mime: Some(MimeType::new(parsed.main, parsed.sub)),
                params: parsed
                    .params
                    .into_iter()
                    .map(|p| Param {
                        name: String::from_utf8_lossy(p.name),
                        value: p.value.to_bytes(),
                    })
                    .collect(),
                invalid: None,
            },
            // Degraded: keep the raw body, still extract type/subtype when
            // the primary production alone parsed.
            _ => Self {
                name,
                mime: r#type::mime_type(body)
                    .ok()
                    .map(|(_, (main, sub))| MimeType::new(main, sub)),
                params: vec![],
                invalid: Some(Cow::Borrowed(body)),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_none() && self.mime.is_some()
    }

    /// Best-effort `type/subtype`, lowercased. Available for most invalid
    /// fields too.
    pub fn mime_type(&self) -> Option<String> {
        self.mime.as_ref().map(MimeType::to_string)
    }

    pub fn mime(&self) -> Option<&MimeType<'a>> {
        self.mime.as_ref()
    }

    pub fn params(&self) -> &[Param<'a>] {
        &self.params
    }

    /// Parameter value, name compared case-insensitively.
    pub fn param(&self, name: &str) -> Option<&Param<'a>> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// The boundary parameter, when present and non-empty.
    pub fn boundary(&self) -> Option<&[u8]> {
        self.param("boundary")
            .map(|p| p.value.as_ref())
            .filter(|b| !b.is_empty())
    }

    pub fn charset(&self) -> Option<&Param<'a>> {
        self.param("charset")
    }

    pub fn raw(&self) -> Vec<u8> {
        let mut w = HeaderWriter::new();
        w.write(self.name.as_bytes());
        w.write(b": ");
        if let Some(body) = &self.invalid {
            w.write(body);
            return w.finish();
        }
        if let Some(mime) = &self.mime {
            w.write(&mime.main);
            w.write(b"/");
            w.write(&mime.sub);
        }
        for p in &self.params {
            w.write(&[ascii::SEMICOLON]);
            w.write_clause(&render_param(p));
        }
        w.finish()
    }
}

fn render_param(p: &Param<'_>) -> Vec<u8> {
    let mut out = vec![ascii::SP];
    out.extend_from_slice(p.name.as_bytes());
    out.push(b'=');
    if !p.value.is_empty() && p.value.iter().all(|&c| is_token_char(c)) {
        out.extend_from_slice(&p.value);
    } else {
        out.push(ascii::DQUOTE);
        for &c in p.value.iter() {
            if c == ascii::DQUOTE || c == ascii::BACKSLASH {
                out.push(ascii::BACKSLASH);
            }
            out.push(c);
        }
        out.push(ascii::DQUOTE);
    }
    out
}

/// Builds a Content-Type field by parsing a raw field body.
pub fn content_type(body: &str) -> ContentTypeField<'_> {
    ContentTypeField::interpret(Cow::Borrowed(CONTENT_TYPE), body.as_bytes())
}

/// Builds a Content-Type field from a type/subtype and an ordered parameter
/// list. `None` and an empty list both mean "no parameters".
pub fn content_type_with<'a>(
    mime_type: &'a str,
    params: Option<&[(&'a str, &'a str)]>,
) -> ContentTypeField<'a> {
    let mime = match r#type::mime_type(mime_type.as_bytes()) {
        Ok((rest, (main, sub))) if only_fws(rest) => Some(MimeType::new(main, sub)),
        _ => None,
    };
    match mime {
        Some(mime) => ContentTypeField {
            name: Cow::Borrowed(CONTENT_TYPE),
            mime: Some(mime),
            params: params
                .unwrap_or(&[])
                .iter()
                .map(|(name, value)| Param {
                    name: Cow::Borrowed(*name),
                    value: Cow::Borrowed(value.as_bytes()),
                })
                .collect(),
            invalid: None,
        },
        None => ContentTypeField {
            name: Cow::Borrowed(CONTENT_TYPE),
            mime: None,
            params: vec![],
            invalid: Some(Cow::Borrowed(mime_type.as_bytes())),
        },
    }
}

/// A Content-Transfer-Encoding field.
#[derive(Debug, PartialEq, Clone, ToStatic)]
pub struct ContentTransferEncodingField<'a> {
    name: Cow<'a, str>,
    mechanism: Mechanism<'a>,
    invalid: Option<Cow<'a, [u8]>>,
}

impl<'a> ContentTransferEncodingField<'a> {
    fn interpret(name: Cow<'a, str>, body: &'a [u8]) -> Self {
        match mechanism(body) {
            Ok((rest, parsed)) if only_fws(rest) => Self {
                name,
                mechanism: parsed,
                invalid: None,
            },
            _ => Self {
                name,
                mechanism: Mechanism::default(),
                invalid: Some(Cow::Borrowed(body)),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_none()
    }

    pub fn mechanism(&self) -> &Mechanism<'a> {
        &self.mechanism
    }

    pub fn raw(&self) -> Vec<u8> {
        let mut w = HeaderWriter::new();
        w.write(self.name.as_bytes());
        w.write(b": ");
        match &self.invalid {
            Some(body) => w.write(body),
            None => w.write(self.mechanism.as_token().as_bytes()),
        }
        w.finish()
    }
}

/// Builds a Content-Transfer-Encoding field by parsing a raw field body.
pub fn content_transfer_encoding(body: &str) -> ContentTransferEncodingField<'_> {
    ContentTransferEncodingField::interpret(Cow::Borrowed(CONTENT_TRANSFER_ENCODING), body.as_bytes())
}

/// Any field without a grammar of its own. Body kept verbatim, folding
/// included, so reprinting reproduces the source bytes.
#[derive(PartialEq, Clone, ToStatic)]
pub struct GenericField<'a> {
    name: Cow<'a, str>,
    body: Cow<'a, [u8]>,
}

impl<'a> GenericField<'a> {
    pub fn new(name: &'a str, body: &'a str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            body: Cow::Borrowed(body.as_bytes()),
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as one logical line, folds collapsed.
    pub fn value(&self) -> String {
        String::from_utf8_lossy(&unfold(&self.body)).into_owned()
    }

    pub fn raw(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.len() + 2 + self.body.len());
        out.extend_from_slice(self.name.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(&self.body);
        out
    }
}

impl<'a> fmt::Debug for GenericField<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericField")
            .field("name", &self.name)
            .field("body", &String::from_utf8_lossy(&self.body))
            .finish()
    }
}

fn lower(b: &[u8]) -> Cow<'_, [u8]> {
    if b.iter().any(u8::is_ascii_uppercase) {
        Cow::Owned(b.to_ascii_lowercase())
    } else {
        Cow::Borrowed(b)
    }
}

fn only_fws(rest: &[u8]) -> bool {
    rest.iter()
        .all(|&c| matches!(c, ascii::SP | ascii::HTAB | ascii::CR | ascii::LF))
}
