//! Lexer for Starscript templates.
//!
//! Two modes. In text mode the lexer collects literal template text until an
//! unescaped `{` (which opens an expression) or a `#<digit>` section marker.
//! In expression mode it produces real tokens through the logos-derived
//! [`RawToken`](raw_token::RawToken) and tracks brace depth so nested
//! `{ ... }` stay in expression mode until the outermost `}` closes.
//!
//! The lexer never fails: malformed input becomes a [`TokenKind::Error`]
//! token carrying a message for the parser to report.

mod raw_token;

use logos::Logos;
use star_ir::{Span, Token, TokenKind};

use raw_token::{convert_token, RawToken};

/// Pull-based template lexer.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
    depth: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 0,
            depth: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// `true` while inside at least one unclosed `{`.
    #[inline]
    pub fn is_in_expression(&self) -> bool {
        self.depth > 0
    }

    /// Scan the next token. Returns `Eof` forever once the source is exhausted.
    pub fn next_token(&mut self) -> Token {
        if self.depth > 0 {
            self.expression_token()
        } else {
            self.text_token()
        }
    }

    fn text_token(&mut self) -> Token {
        let rest = &self.source[self.pos..];
        let bytes = rest.as_bytes();
        if bytes.is_empty() {
            return self.eof();
        }

        let start = self.pos;
        let (line, column) = (self.line, self.column);

        if starts_expression(bytes) {
            self.advance_to(start + 1);
            self.depth = 1;
            return self.token_from(TokenKind::LeftBrace, start, line, column);
        }

        if starts_section(bytes) {
            let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            let numeral = rest[1..1 + digits].to_owned();
            self.advance_to(start + 1 + digits);
            return self.token_from(TokenKind::Section(numeral), start, line, column);
        }

        let mut text = String::new();
        let mut i = 0;
        while i < bytes.len() {
            let tail = &bytes[i..];
            if matches!(tail[0], b'{' | b'#') {
                if starts_expression(tail) || starts_section(tail) {
                    break;
                }
                text.push(char::from(tail[0]));
                // `{{` and `##` collapse to a single character.
                i += if tail.get(1) == Some(&tail[0]) { 2 } else { 1 };
            } else {
                let next = tail
                    .iter()
                    .position(|b| matches!(b, b'{' | b'#'))
                    .map_or(bytes.len(), |p| i + p);
                text.push_str(&rest[i..next]);
                i = next;
            }
        }

        self.advance_to(start + i);
        self.token_from(TokenKind::Text(text), start, line, column)
    }

    fn expression_token(&mut self) -> Token {
        let base = self.pos;
        let mut raw = RawToken::lexer(&self.source[base..]);

        let Some(result) = raw.next() else {
            // Only whitespace left.
            self.advance_to(self.source.len());
            return self.eof();
        };

        let range = raw.span();
        let start = base + range.start;
        self.advance_to(start);
        let (line, column) = (self.line, self.column);

        match result {
            Ok(RawToken::DoubleQuote) => self.string('"', start, line, column),
            Ok(RawToken::SingleQuote) => self.string('\'', start, line, column),
            Ok(token) => {
                match token {
                    RawToken::LeftBrace => self.depth += 1,
                    RawToken::RightBrace => self.depth = self.depth.saturating_sub(1),
                    _ => {}
                }
                let kind = convert_token(token, raw.slice());
                self.advance_to(base + range.end);
                self.token_from(kind, start, line, column)
            }
            Err(()) => {
                let width = self.source[start..].chars().next().map_or(1, char::len_utf8);
                self.advance_to(start + width);
                self.token_from(TokenKind::Error("Unexpected character."), start, line, column)
            }
        }
    }

    /// Scan a quoted string whose opening delimiter sits at `start`.
    fn string(&mut self, delimiter: char, start: usize, line: u32, column: u32) -> Token {
        let body = start + 1;
        let mut value = String::new();
        let mut end = None;

        let mut chars = self.source[body..].char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                }
            } else if c == delimiter {
                end = Some(body + i + c.len_utf8());
                break;
            } else {
                value.push(c);
            }
        }

        if let Some(end) = end {
            self.advance_to(end);
            self.token_from(TokenKind::Str(value), start, line, column)
        } else {
            self.advance_to(self.source.len());
            self.token_from(TokenKind::Error("Unterminated string."), start, line, column)
        }
    }

    fn eof(&self) -> Token {
        Token::new(
            TokenKind::Eof,
            Span::from_range(self.pos..self.pos),
            self.line,
            self.column,
        )
    }

    fn token_from(&self, kind: TokenKind, start: usize, line: u32, column: u32) -> Token {
        Token::new(kind, Span::from_range(start..self.pos), line, column)
    }

    /// Move to byte offset `target`, keeping line and column in step.
    fn advance_to(&mut self, target: usize) {
        for c in self.source[self.pos..target].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.pos = target;
    }
}

#[inline]
fn starts_expression(bytes: &[u8]) -> bool {
    bytes.first() == Some(&b'{') && bytes.get(1) != Some(&b'{')
}

#[inline]
fn starts_section(bytes: &[u8]) -> bool {
    bytes.first() == Some(&b'#') && bytes.get(1).is_some_and(u8::is_ascii_digit)
}

/// Lex a whole template. The last token is always `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests;
