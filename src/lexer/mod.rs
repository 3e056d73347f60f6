//! Lexical analysis.
//!
//! Raw scanning is derived with `logos`; the scanner output is then
//! post-processed into [`Token`]s:
//! - words are classified as keywords or identifiers,
//! - quote characters are stripped and doubled-quote escapes collapsed,
//! - `TIME WITH TIME ZONE`, `TIMESTAMP WITH TIME ZONE` and `DOUBLE PRECISION`
//!   are merged into single tokens when separated only by whitespace,
//! - runs of unrecognized characters are coalesced into one diagnostic.

pub mod keywords;
pub mod token;

use crate::ast::Span;
use crate::diag::Diag;
use keywords::{Keyword, lookup_keyword};
use logos::{FilterResult, Logos};
use smol_str::SmolStr;
use token::{Token, TokenKind};

/// Result of lexical analysis.
///
/// Contains both the tokens produced and any diagnostics encountered during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, always terminated by an EOF token.
    pub tokens: Vec<Token>,
    /// Lexical errors, in source order.
    pub diagnostics: Vec<Diag>,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"--[^\r\n]*", logos::skip)]
    #[token("/*", block_comment)]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_@:]*")]
    Word,

    #[regex(r#""([^"]|"")*""#)]
    QuotedIdentifier,

    #[regex(r"`([^`]|``)*`")]
    BackquotedIdentifier,

    #[regex(r"[0-9]+[A-Za-z_@:][A-Za-z0-9_@:]*", priority = 1)]
    DigitIdentifier,

    #[regex(r"'([^']|'')*'")]
    String,

    #[regex(r"[uU]&'", prefixed_string)]
    UnicodeString,

    #[regex(r"[xX]'", prefixed_string)]
    BinaryLiteral,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Decimal,

    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)[eE][+-]?[0-9]+", priority = 10)]
    Double,

    #[token("=")]
    Eq,
    #[token("<>")]
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("||")]
    Concat,
    #[token("?")]
    QuestionMark,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
}

/// Skips the rest of a `/* ... */` comment. Comments do not nest.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(()),
    }
}

/// Extends a `U&'` or `X'` prefix through the closing quote; `''` is an
/// escaped quote.
fn prefixed_string(lex: &mut logos::Lexer<RawToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        if rest[i] == b'\'' {
            if rest.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            lex.bump(i + 1);
            return true;
        }
        i += 1;
    }
    false
}

/// A lexical analyzer for SQL source text.
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenizes the source text.
    ///
    /// Scanning continues past unrecognized characters so that every lexical
    /// problem is reported; an unterminated quote consumes the rest of the input.
    pub fn tokenize(self) -> LexerResult {
        let mut tokens = Vec::new();
        let mut diagnostics = Vec::new();
        let mut raw = RawToken::lexer(self.source);
        let mut pending_error: Option<Span> = None;

        while let Some(next) = raw.next() {
            let span = raw.span();
            match next {
                Ok(kind) => {
                    if let Some(bad) = pending_error.take() {
                        diagnostics.push(unrecognized(self.source, bad));
                    }
                    tokens.push(self.cook(kind, span));
                }
                Err(()) => {
                    let slice = &self.source[span.clone()];
                    if let Some(message) = unterminated_message(slice) {
                        if let Some(bad) = pending_error.take() {
                            diagnostics.push(unrecognized(self.source, bad));
                        }
                        let rest = span.start..self.source.len();
                        diagnostics.push(
                            Diag::error(message)
                                .with_primary_label(rest, "starts here")
                                .with_code("L002"),
                        );
                        break;
                    }
                    match pending_error.as_mut() {
                        Some(bad) => bad.end = span.end,
                        None => pending_error = Some(span),
                    }
                }
            }
        }

        if let Some(bad) = pending_error {
            diagnostics.push(unrecognized(self.source, bad));
        }

        let mut tokens = merge_multi_word_units(self.source, tokens);
        let eof = self.source.len();
        tokens.push(Token::new(TokenKind::Eof, eof..eof, ""));

        LexerResult {
            tokens,
            diagnostics,
        }
    }

    fn cook(&self, raw: RawToken, span: Span) -> Token {
        let text = &self.source[span.clone()];
        let kind = match raw {
            RawToken::Word => match lookup_keyword(text) {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Identifier(SmolStr::new(text)),
            },
            RawToken::QuotedIdentifier => TokenKind::QuotedIdentifier(unquote(text, '"')),
            RawToken::BackquotedIdentifier => TokenKind::BackquotedIdentifier(unquote(text, '`')),
            RawToken::DigitIdentifier => TokenKind::DigitIdentifier(SmolStr::new(text)),
            RawToken::String => TokenKind::String(unquote(text, '\'')),
            RawToken::UnicodeString => TokenKind::UnicodeString(unquote(&text[2..], '\'')),
            RawToken::BinaryLiteral => {
                TokenKind::BinaryLiteral(SmolStr::new(&text[2..text.len() - 1]))
            }
            RawToken::Integer => TokenKind::Integer(SmolStr::new(text)),
            RawToken::Decimal => TokenKind::Decimal(SmolStr::new(text)),
            RawToken::Double => TokenKind::Double(SmolStr::new(text)),
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Concat => TokenKind::Concat,
            RawToken::QuestionMark => TokenKind::QuestionMark,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::FatArrow => TokenKind::FatArrow,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Semicolon => TokenKind::Semicolon,
            // Skipped by its callbacks; never yielded.
            RawToken::Comment => TokenKind::Eof,
        };
        Token::new(kind, span, text)
    }
}

/// Tokenizes source text.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}

/// Strips the surrounding quote characters and collapses doubled quotes.
fn unquote(text: &str, quote: char) -> SmolStr {
    let inner = &text[1..text.len() - 1];
    let doubled: String = [quote, quote].iter().collect();
    if inner.contains(&doubled) {
        SmolStr::new(inner.replace(&doubled, &quote.to_string()))
    } else {
        SmolStr::new(inner)
    }
}

fn unterminated_message(slice: &str) -> Option<&'static str> {
    let unprefixed = slice
        .strip_prefix(['u', 'U'])
        .and_then(|rest| rest.strip_prefix('&'))
        .or_else(|| slice.strip_prefix(['x', 'X']))
        .filter(|rest| rest.starts_with('\''))
        .unwrap_or(slice);
    match unprefixed.chars().next()? {
        '\'' => Some("unterminated string literal"),
        '"' => Some("unterminated quoted identifier"),
        '`' => Some("unterminated backquoted identifier"),
        _ if slice.starts_with("/*") => Some("unterminated block comment"),
        _ => None,
    }
}

fn unrecognized(source: &str, span: Span) -> Diag {
    let text = source.get(span.clone()).unwrap_or_default();
    Diag::error(format!("unrecognized input '{text}'"))
        .with_primary_label(span, "not a valid token")
        .with_code("L001")
}

#[derive(Clone, Copy)]
enum Piece {
    Kw(Keyword),
    Word(&'static str),
}

const MULTI_WORD_UNITS: &[(&[Piece], TokenKind)] = &[
    (
        &[
            Piece::Kw(Keyword::Time),
            Piece::Kw(Keyword::With),
            Piece::Kw(Keyword::Time),
            Piece::Kw(Keyword::Zone),
        ],
        TokenKind::TimeWithTimeZone,
    ),
    (
        &[
            Piece::Kw(Keyword::Timestamp),
            Piece::Kw(Keyword::With),
            Piece::Kw(Keyword::Time),
            Piece::Kw(Keyword::Zone),
        ],
        TokenKind::TimestampWithTimeZone,
    ),
    (
        &[Piece::Word("DOUBLE"), Piece::Word("PRECISION")],
        TokenKind::DoublePrecision,
    ),
];

fn piece_matches(piece: Piece, token: &Token) -> bool {
    match (piece, &token.kind) {
        (Piece::Kw(kw), TokenKind::Keyword(found)) => kw == *found,
        (Piece::Word(word), TokenKind::Identifier(text)) => text.eq_ignore_ascii_case(word),
        _ => false,
    }
}

/// Merges adjacent words forming a multi-word type name into one token.
fn merge_multi_word_units(source: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;

    'outer: while i < tokens.len() {
        for (pieces, kind) in MULTI_WORD_UNITS {
            let Some(window) = tokens.get(i..i + pieces.len()) else {
                continue;
            };
            let words_match = pieces
                .iter()
                .zip(window)
                .all(|(piece, token)| piece_matches(*piece, token));
            let whitespace_only = window.windows(2).all(|pair| {
                source[pair[0].span.end..pair[1].span.start]
                    .chars()
                    .all(char::is_whitespace)
            });
            if words_match && whitespace_only {
                let span = window[0].span.start..window[window.len() - 1].span.end;
                merged.push(Token::new(kind.clone(), span.clone(), &source[span]));
                i += pieces.len();
                continue 'outer;
            }
        }
        merged.push(tokens[i].clone());
        i += 1;
    }

    merged
}
