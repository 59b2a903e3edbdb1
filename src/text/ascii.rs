//! Named ASCII bytes used across the grammars.

pub const HTAB: u8 = 0x09;
pub const LF: u8 = 0x0a;
pub const CR: u8 = 0x0d;
pub const SP: u8 = 0x20;
pub const EXCLAMATION: u8 = 0x21;
pub const DQUOTE: u8 = 0x22;
pub const SEMICOLON: u8 = 0x3b;
pub const BACKSLASH: u8 = 0x5c;
pub const TILDE: u8 = 0x7e;

pub const CRLF: &[u8] = &[CR, LF];
pub const CRCRLF: &[u8] = &[CR, CR, LF];
