use nom::{
    bytes::complete::tag, character::complete::space0, combinator::opt, sequence::tuple, IResult,
};

use crate::text::whitespace::{line_end, obs_crlf};

#[derive(Debug, PartialEq)]
pub enum Delimiter {
    Next,
    Last,
}

/// RFC 2046 boundary delimiter line: `--boundary` opens the next part,
/// `--boundary--` closes the multipart. Trailing transport padding is
/// ignored. The delimiter must occupy a whole line: it sits at the start of
/// a line (callers only probe after a terminator or at the buffer start) and
/// nothing but padding may follow it, so a content line that merely starts
/// with `--boundary` is not a delimiter.
pub fn boundary<'a>(boundary: &[u8]) -> impl Fn(&'a [u8]) -> IResult<&'a [u8], Delimiter> + '_ {
    move |input: &[u8]| {
        let (rest, (_, _, _, last, _, _)) = tuple((
            opt(obs_crlf),
            tag(b"--"),
            tag(boundary),
            opt(tag(b"--")),
            space0,
            line_end,
        ))(input)?;
        match last {
            Some(_) => Ok((rest, Delimiter::Last)),
            None => Ok((rest, Delimiter::Next)),
        }
    }
}
