use thiserror::Error;

/// Everything that can go wrong while parsing, decoding or rendering.
///
/// Structural problems inside a message (bad header lines, field grammar
/// violations, unusable boundaries) are normally recovered in place and
/// recorded on the tree; they only surface as errors under a strict
/// [`Config`](crate::Config), or through [`Field::error`](crate::field::Field::error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("header line has no name/colon separator")]
    MalformedHeaderLine,

    #[error("{0} field body does not match its grammar")]
    InvalidFieldGrammar(&'static str),

    #[error("multipart content-type carries no usable boundary parameter")]
    MissingBoundary,

    #[error("body decode failed: {0}")]
    ContentDecode(String),

    #[error("reading the input stream failed: {0}")]
    StreamRead(String),

    #[error("malformed message structure")]
    Parse,
}
