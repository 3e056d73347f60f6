//! Token types produced by the lexer.

use crate::ast::Span;
use crate::lexer::keywords::Keyword;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
///
/// Literal and identifier kinds carry their decoded payload: quote characters
/// are stripped and doubled quote escapes are collapsed. The raw source text
/// is kept on [`Token::text`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A reserved or non-reserved keyword.
    Keyword(Keyword),

    // Identifiers
    Identifier(SmolStr),
    QuotedIdentifier(SmolStr),
    BackquotedIdentifier(SmolStr),
    DigitIdentifier(SmolStr),

    // Literals
    String(SmolStr),
    /// `U&'...'` with escapes still encoded; decoding needs the optional UESCAPE.
    UnicodeString(SmolStr),
    /// `X'...'` hex digits, unvalidated.
    BinaryLiteral(SmolStr),
    Integer(SmolStr),
    Decimal(SmolStr),
    Double(SmolStr),

    // Multi-word lexical units
    TimeWithTimeZone,
    TimestampWithTimeZone,
    DoublePrecision,

    // Operators
    Eq,          // =
    NotEq,       // <> or !=
    Lt,          // <
    LtEq,        // <=
    Gt,          // >
    GtEq,        // >=
    Plus,        // +
    Minus,       // -
    Star,        // *
    Slash,       // /
    Percent,     // %
    Concat,      // ||
    QuestionMark, // ?
    Arrow,       // ->
    FatArrow,    // =>

    // Punctuation
    Dot,       // .
    Comma,     // ,
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;

    Eof,
}

impl TokenKind {
    /// Returns the keyword, if this token is one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Returns true if this token can be used as an identifier: a bare,
    /// quoted, backquoted or digit-led identifier, or a non-reserved keyword.
    pub fn is_identifier_like(&self) -> bool {
        match self {
            TokenKind::Identifier(_)
            | TokenKind::QuotedIdentifier(_)
            | TokenKind::BackquotedIdentifier(_)
            | TokenKind::DigitIdentifier(_) => true,
            TokenKind::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }

    /// Returns true for string literal tokens (plain or unicode).
    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::String(_) | TokenKind::UnicodeString(_))
    }

    /// Short description used in "expected ..." diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Identifier(_)
            | TokenKind::QuotedIdentifier(_)
            | TokenKind::BackquotedIdentifier(_)
            | TokenKind::DigitIdentifier(_) => "<identifier>",
            TokenKind::String(_) | TokenKind::UnicodeString(_) => "<string>",
            TokenKind::BinaryLiteral(_) => "<binary literal>",
            TokenKind::Integer(_) => "<integer>",
            TokenKind::Decimal(_) => "<decimal>",
            TokenKind::Double(_) => "<double>",
            TokenKind::TimeWithTimeZone => "TIME WITH TIME ZONE",
            TokenKind::TimestampWithTimeZone => "TIMESTAMP WITH TIME ZONE",
            TokenKind::DoublePrecision => "DOUBLE PRECISION",
            TokenKind::Eq => "'='",
            TokenKind::NotEq => "'<>'",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Concat => "'||'",
            TokenKind::QuestionMark => "'?'",
            TokenKind::Arrow => "'->'",
            TokenKind::FatArrow => "'=>'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "<EOF>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) | TokenKind::DigitIdentifier(name) => write!(f, "{name}"),
            TokenKind::QuotedIdentifier(name) => write!(f, "\"{}\"", name.replace('"', "\"\"")),
            TokenKind::BackquotedIdentifier(name) => write!(f, "`{}`", name.replace('`', "``")),
            TokenKind::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            TokenKind::UnicodeString(value) => write!(f, "U&'{}'", value.replace('\'', "''")),
            TokenKind::BinaryLiteral(hex) => write!(f, "X'{hex}'"),
            TokenKind::Integer(text) | TokenKind::Decimal(text) | TokenKind::Double(text) => {
                write!(f, "{text}")
            }
            other => f.write_str(other.describe().trim_matches('\'')),
        }
    }
}

/// A lexical token with its kind, raw source text and span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_like_classification() {
        assert!(TokenKind::Identifier("orders".into()).is_identifier_like());
        assert!(TokenKind::QuotedIdentifier("Order Id".into()).is_identifier_like());
        assert!(TokenKind::DigitIdentifier("1st".into()).is_identifier_like());
        assert!(TokenKind::Keyword(Keyword::Role).is_identifier_like());
        assert!(!TokenKind::Keyword(Keyword::Select).is_identifier_like());
        assert!(!TokenKind::Integer("1".into()).is_identifier_like());
    }

    #[test]
    fn describe_for_diagnostics() {
        assert_eq!(TokenKind::Keyword(Keyword::From).describe(), "FROM");
        assert_eq!(TokenKind::LParen.describe(), "'('");
        assert_eq!(TokenKind::Identifier("x".into()).describe(), "<identifier>");
        assert_eq!(TokenKind::Eof.describe(), "<EOF>");
    }

    #[test]
    fn display_re_escapes_payloads() {
        assert_eq!(TokenKind::String("it's".into()).to_string(), "'it''s'");
        assert_eq!(
            TokenKind::QuotedIdentifier("a\"b".into()).to_string(),
            "\"a\"\"b\""
        );
        assert_eq!(TokenKind::Comma.to_string(), ",");
        assert_eq!(TokenKind::Keyword(Keyword::Select).to_string(), "SELECT");
    }
}
