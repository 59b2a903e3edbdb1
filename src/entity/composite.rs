//! Multipart bodies.

use std::borrow::Cow;
use std::fmt;

use bounded_static::ToStatic;

use crate::entity::{entity, part_raw, Entity};
use crate::error::Error;
use crate::text::boundary::{boundary, Delimiter};
use crate::Config;

/// A multipart body: the children plus the raw preamble and epilogue around
/// them. Children may be empty; preamble and epilogue default to empty.
#[derive(PartialEq, Clone, ToStatic)]
pub struct Multipart<'a> {
    pub children: Vec<Entity<'a>>,
    pub preamble: Cow<'a, [u8]>,
    pub epilogue: Cow<'a, [u8]>,
}

impl<'a> fmt::Debug for Multipart<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Multipart")
            .field("children", &self.children)
            .field(
                "preamble",
                &format_args!("\"{}\"", String::from_utf8_lossy(&self.preamble)),
            )
            .field(
                "epilogue",
                &format_args!("\"{}\"", String::from_utf8_lossy(&self.epilogue)),
            )
            .finish()
    }
}

/// Scans the delimiter lines of `bound` and parses every part span as a full
/// entity. A missing terminal delimiter is tolerated: parts are collected
/// until the input runs out and the epilogue stays empty.
pub(crate) fn multipart<'a>(
    config: Config,
    bound: &[u8],
    input: &'a [u8],
) -> Result<Multipart<'a>, Error> {
    let (mut cursor, preamble) = part_raw(bound)(input).map_err(|_| Error::Parse)?;
    let mut children = Vec::new();
    loop {
        match boundary(bound)(cursor) {
            Err(_) => {
                return Ok(Multipart {
                    children,
                    preamble: Cow::Borrowed(preamble),
                    epilogue: Cow::Borrowed(&[]),
                })
            }
            Ok((rest, Delimiter::Last)) => {
                return Ok(Multipart {
                    children,
                    preamble: Cow::Borrowed(preamble),
                    epilogue: Cow::Borrowed(rest),
                })
            }
            Ok((rest, Delimiter::Next)) => {
                let (after, span) = part_raw(bound)(rest).map_err(|_| Error::Parse)?;
                children.push(entity(config, span)?);
                cursor = after;
            }
        }
    }
}
