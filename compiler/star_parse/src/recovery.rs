//! Error recovery.
//!
//! After a failed statement the parser skips to the end of the enclosing
//! placeholder so the rest of the template still parses.

use star_ir::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// Skip tokens until brace depth returns to zero.
    ///
    /// At depth zero the failed construct already ended (e.g. a section
    /// index out of range after its block closed), so parsing resumes at
    /// the current token.
    pub(crate) fn synchronize(&mut self) {
        while self.block_depth > 0 && !self.cursor.is_at_end() {
            match self.cursor.advance().kind {
                TokenKind::LeftBrace => self.block_depth += 1,
                TokenKind::RightBrace => self.block_depth -= 1,
                _ => {}
            }
        }
        self.block_depth = 0;
    }
}
