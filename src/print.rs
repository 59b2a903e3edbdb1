//! Header field rendering with deterministic folding.
//!
//! Folding is only ever applied at fold points the caller declares (in
//! practice: before a parameter clause), never mid-token and never when the
//! line still fits. This keeps printing a pure function of the structured
//! value.

use crate::text::ascii;

/// Visible columns after which a declared fold point breaks the line.
pub(crate) const LINE_LIMIT: usize = 76;

pub(crate) struct HeaderWriter {
    buf: Vec<u8>,
    line: usize,
}

impl HeaderWriter {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::new(),
            line: 0,
        }
    }

    /// Appends bytes on the current line. Never folds.
    pub(crate) fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.line += bytes.len();
    }

    /// Appends a clause that starts with a single SP, breaking the line
    /// before it when it would not fit. The clause's own leading SP becomes
    /// the continuation indent after a break.
    pub(crate) fn write_clause(&mut self, clause: &[u8]) {
        debug_assert!(clause.first() == Some(&ascii::SP));
        if self.line + clause.len() > LINE_LIMIT {
            self.buf.extend_from_slice(ascii::CRLF);
            self.line = 0;
        }
        self.write(clause);
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fold_when_fitting() {
        let mut w = HeaderWriter::new();
        w.write(b"Content-Type: text/plain;");
        w.write_clause(b" charset=utf-8");
        assert_eq!(w.finish(), b"Content-Type: text/plain; charset=utf-8");
    }

    #[test]
    fn test_fold_before_overflowing_clause() {
        let mut w = HeaderWriter::new();
        w.write(b"Content-Type: multipart/mixed;");
        let clause = format!(" boundary=\"{}\"", "x".repeat(60));
        w.write_clause(clause.as_bytes());
        let expected = format!("Content-Type: multipart/mixed;\r\n boundary=\"{}\"", "x".repeat(60));
        assert_eq!(w.finish(), expected.as_bytes());
    }

    #[test]
    fn test_long_single_clause_never_folds_twice() {
        let mut w = HeaderWriter::new();
        w.write(b"X: y;");
        let clause = format!(" name={}", "z".repeat(100));
        w.write_clause(clause.as_bytes());
        let out = w.finish();
        // one break, the oversized clause stays whole
        assert_eq!(out.iter().filter(|&&c| c == ascii::CR).count(), 1);
    }
}
