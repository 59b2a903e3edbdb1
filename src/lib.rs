#![doc = include_str!("../README.md")]

/// Body decoding (transfer encoding + charset)
pub mod decode;

/// The parsed entity tree
pub mod entity;

pub mod error;

/// Typed header fields
pub mod field;

/// Header section lexer
pub mod header;

/// Content-Type and Content-Transfer-Encoding grammars
pub mod mime;

mod print;

/// Low-level text parsers
pub mod text;

pub use crate::entity::{Body, BodyPart, Entity, Message, Multipart};
pub use crate::error::Error;
pub use crate::text::normalize::{normalize_eol, read_normalized};

/// What to do when the input is damaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recovery {
    /// Skip or degrade the damaged piece and keep going (what mail software
    /// does in practice).
    #[default]
    Lenient,
    /// Surface the damage as an [`Error`].
    Strict,
}

/// Per-decision recovery policy used while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Header lines with no name/colon prefix.
    pub bad_header_line: Recovery,
    /// Multipart entities without a usable boundary parameter.
    pub missing_boundary: Recovery,
}

/// Parses a message with the default (lenient) configuration.
pub fn message(input: &[u8]) -> Result<Message<'_>, Error> {
    message_with(input, Config::default())
}

/// Parses a message with an explicit recovery policy.
pub fn message_with(input: &[u8], config: Config) -> Result<Message<'_>, Error> {
    entity::entity(config, input)
}
