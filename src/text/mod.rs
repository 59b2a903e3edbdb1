/// Named ASCII bytes
pub mod ascii;

/// Multipart boundary delimiter lines
pub mod boundary;

/// CRLF normalization of raw buffers
pub mod normalize;

/// Quoted string
pub mod quoted;

/// Whitespace, line folding
pub mod whitespace;

/// RFC 2045 token
pub mod words;
