//! Token stream navigation shared by every grammar module.
//!
//! Besides cursor movement, the stream tracks the *expected set*: every
//! `check` that fails at the current position records a description of the
//! token it wanted. Advancing clears the set, so when a production finally
//! gives up, the set lists exactly the alternatives tried at the failure
//! position.

use crate::ast::Span;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::{Token, TokenKind};
use smol_str::SmolStr;

/// Result type for grammar productions.
pub type ParseResult<T> = Result<T, ParseError>;

static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    text: SmolStr::new_inline(""),
    span: 0..0,
};

/// A saved stream position for speculative parsing.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    pos: usize,
    expected: Vec<&'static str>,
}

/// Cursor over a token slice terminated by `Eof`.
pub(crate) struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
    expected: Vec<&'static str>,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            expected: Vec::new(),
        }
    }

    /// Returns the current token.
    pub fn current(&self) -> &'a Token {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions ahead; past the end this is `Eof`.
    pub fn peek_nth(&self, n: usize) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        tokens
            .get(self.pos + n)
            .or_else(|| tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    pub fn peek_kind(&self, n: usize) -> &'a TokenKind {
        &self.peek_nth(n).kind
    }

    /// Returns true if the token `n` ahead is the keyword `kw`. Never records.
    pub fn peek_is_keyword(&self, n: usize, kw: Keyword) -> bool {
        self.peek_kind(n).is_keyword(kw)
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Consumes and returns the current token. `Eof` is never consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
            self.expected.clear();
        }
        token
    }

    /// Records `description` as acceptable at the current position.
    pub fn expecting(&mut self, description: &'static str) {
        if !self.expected.contains(&description) {
            self.expected.push(description);
        }
    }

    pub fn expecting_all(&mut self, descriptions: &[&'static str]) {
        for description in descriptions {
            self.expecting(description);
        }
    }

    /// Checks the current token kind, recording it as expected on mismatch.
    pub fn check(&mut self, kind: &TokenKind) -> bool {
        if &self.current().kind == kind {
            true
        } else {
            self.expecting(kind.describe());
            false
        }
    }

    /// Checks for a keyword, recording it as expected on mismatch.
    pub fn check_keyword(&mut self, kw: Keyword) -> bool {
        if self.current().kind.is_keyword(kw) {
            true
        } else {
            self.expecting(kw.as_str());
            false
        }
    }

    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn consume_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a keyword sequence such as `IF NOT EXISTS` only if it is
    /// present in full. Only the first keyword is recorded on mismatch.
    pub fn consume_keywords(&mut self, keywords: &[Keyword]) -> bool {
        for (i, kw) in keywords.iter().enumerate() {
            if !self.peek_is_keyword(i, *kw) {
                if i == 0 {
                    self.expecting(kw.as_str());
                }
                return false;
            }
        }
        for _ in keywords {
            self.advance();
        }
        true
    }

    /// Consumes the expected token kind and returns its span.
    pub fn expect(&mut self, kind: &TokenKind) -> ParseResult<Span> {
        if self.check(kind) {
            Ok(self.advance().span.clone())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consumes the expected keyword and returns its span.
    pub fn expect_keyword(&mut self, kw: Keyword) -> ParseResult<Span> {
        if self.check_keyword(kw) {
            Ok(self.advance().span.clone())
        } else {
            Err(self.unexpected())
        }
    }

    /// Builds an error for the current token from the expected set.
    pub fn unexpected(&self) -> ParseError {
        let token = self.current();
        let expected = self.expected.clone();
        let kind = match token.kind {
            TokenKind::Eof => ParseErrorKind::UnexpectedEndOfInput { expected },
            _ => ParseErrorKind::UnexpectedToken {
                found: token.text.clone(),
                expected,
            },
        };
        ParseError::new(kind, token.span.clone())
    }

    pub fn mark(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            expected: self.expected.clone(),
        }
    }

    pub fn reset(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.expected = checkpoint.expected;
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.clone(),
            None => self.current().span.clone(),
        }
    }

    /// Start offset of the current token.
    pub fn start(&self) -> usize {
        self.current().span.start
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        start..self.previous_span().end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn advance_stops_at_eof() {
        let tokens = tokenize("a").tokens;
        let mut stream = TokenStream::new(&tokens);
        stream.advance();
        assert!(stream.at_eof());
        stream.advance();
        assert!(stream.at_eof());
        assert_eq!(stream.peek_kind(5), &TokenKind::Eof);
    }

    #[test]
    fn failed_checks_accumulate_until_advance() {
        let tokens = tokenize("x y").tokens;
        let mut stream = TokenStream::new(&tokens);
        assert!(!stream.check_keyword(Keyword::Select));
        assert!(!stream.check(&TokenKind::LParen));
        assert!(!stream.check_keyword(Keyword::Select));
        let error = stream.unexpected();
        assert_eq!(error.expected(), ["SELECT", "'('"]);

        stream.advance();
        assert!(!stream.check(&TokenKind::Comma));
        assert_eq!(stream.unexpected().expected(), ["','"]);
    }

    #[test]
    fn reset_restores_position_and_expected_set() {
        let tokens = tokenize("a b c").tokens;
        let mut stream = TokenStream::new(&tokens);
        stream.check_keyword(Keyword::With);
        let checkpoint = stream.mark();
        stream.advance();
        stream.check(&TokenKind::Dot);
        stream.reset(checkpoint);
        assert_eq!(stream.current().text, "a");
        assert_eq!(stream.unexpected().expected(), ["WITH"]);
    }

    #[test]
    fn keyword_sequence_is_all_or_nothing() {
        let tokens = tokenize("IF NOT x").tokens;
        let mut stream = TokenStream::new(&tokens);
        assert!(!stream.consume_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists]));
        assert_eq!(stream.current().text, "IF");
        assert!(stream.consume_keywords(&[Keyword::If, Keyword::Not]));
        assert_eq!(stream.current().text, "x");
    }

    #[test]
    fn end_of_input_error_kind() {
        let tokens = tokenize("").tokens;
        let mut stream = TokenStream::new(&tokens);
        assert!(stream.expect(&TokenKind::RParen).is_err());
        let error = stream.unexpected();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnexpectedEndOfInput { .. }
        ));
        assert_eq!(error.code(), "P002");
    }
}
