//! Identifier, name and literal-token primitives.

use crate::ast::{Identifier, QualifiedName, Quoting, Span};
use crate::error::ParseError;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use smol_str::SmolStr;

const DEFAULT_UNICODE_ESCAPE: char = '\\';

impl Parser<'_> {
    /// Returns true if the current token can be read as an identifier.
    pub(crate) fn at_identifier(&self) -> bool {
        self.stream.current().kind.is_identifier_like()
    }

    /// Like [`Self::at_identifier`], recording `<identifier>` on mismatch.
    pub(crate) fn check_identifier(&mut self) -> bool {
        if self.at_identifier() {
            true
        } else {
            self.stream.expecting("<identifier>");
            false
        }
    }

    /// Parses an identifier: a bare word, a non-reserved keyword, or a
    /// quoted, backquoted or digit-led identifier.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.stream.current();
        let (value, quoting) = match &token.kind {
            TokenKind::Identifier(value) => (value.clone(), Quoting::Unquoted),
            TokenKind::QuotedIdentifier(value) => (value.clone(), Quoting::Quoted),
            TokenKind::BackquotedIdentifier(value) => {
                if !self.options.allow_backquoted_identifiers {
                    return Err(ParseError::invalid(
                        "backquoted identifiers are not supported; use double quotes to quote identifiers",
                        token.span.clone(),
                    ));
                }
                (value.clone(), Quoting::Backquoted)
            }
            TokenKind::DigitIdentifier(value) => {
                if !self.options.allow_digit_identifiers {
                    return Err(ParseError::invalid(
                        "identifiers must not start with a digit; surround the identifier with double quotes",
                        token.span.clone(),
                    ));
                }
                (value.clone(), Quoting::Unquoted)
            }
            TokenKind::Keyword(kw) if !kw.is_reserved() => (token.text.clone(), Quoting::Unquoted),
            _ => {
                self.stream.expecting("<identifier>");
                return Err(self.stream.unexpected());
            }
        };
        self.stream.advance();
        Ok(Identifier::new(value, quoting, token.span.clone()))
    }

    /// Parses `identifier ('.' identifier)*`.
    pub(crate) fn parse_qualified_name(&mut self) -> ParseResult<QualifiedName> {
        let mut parts = vec![self.parse_identifier()?];
        while self.stream.consume(&TokenKind::Dot) {
            parts.push(self.parse_identifier()?);
        }
        Ok(QualifiedName::new(parts))
    }

    /// Parses `'(' identifier (',' identifier)* ')'`.
    pub(crate) fn parse_identifier_list(&mut self) -> ParseResult<Vec<Identifier>> {
        self.stream.expect(&TokenKind::LParen)?;
        let identifiers = self.parse_comma_separated(Self::parse_identifier)?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(identifiers)
    }

    /// Parses one or more `item`s separated by commas.
    pub(crate) fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = vec![item(self)?];
        while self.stream.consume(&TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Parses a string literal and returns its decoded value.
    ///
    /// Unicode strings (`U&'...'`) may be followed by `UESCAPE 'c'`.
    pub(crate) fn parse_string(&mut self) -> ParseResult<(SmolStr, Span)> {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::String(value) => {
                self.stream.advance();
                Ok((value.clone(), token.span.clone()))
            }
            TokenKind::UnicodeString(raw) => {
                self.stream.advance();
                let mut span = token.span.clone();
                let mut escape = DEFAULT_UNICODE_ESCAPE;
                if self.stream.consume_keyword(Keyword::Uescape) {
                    let escape_token = self.stream.current();
                    let TokenKind::String(text) = &escape_token.kind else {
                        self.stream.expecting("<string>");
                        return Err(self.stream.unexpected());
                    };
                    self.stream.advance();
                    escape = validate_unicode_escape(text, escape_token.span.clone())?;
                    span = span.start..escape_token.span.end;
                }
                let value = decode_unicode(raw, escape, span.clone())?;
                Ok((value, span))
            }
            _ => {
                self.stream.expecting("<string>");
                Err(self.stream.unexpected())
            }
        }
    }

    /// Parses an integer literal, keeping its source text.
    pub(crate) fn parse_integer(&mut self) -> ParseResult<(SmolStr, Span)> {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::Integer(text) => {
                self.stream.advance();
                Ok((text.clone(), token.span.clone()))
            }
            _ => {
                self.stream.expecting("<integer>");
                Err(self.stream.unexpected())
            }
        }
    }
}

fn validate_unicode_escape(text: &str, span: Span) -> ParseResult<char> {
    let mut chars = text.chars();
    let (Some(escape), None) = (chars.next(), chars.next()) else {
        return Err(ParseError::invalid(
            "UESCAPE must be a single character",
            span,
        ));
    };
    if escape.is_ascii_hexdigit() || matches!(escape, '+' | '"' | '\'') || escape.is_whitespace() {
        return Err(ParseError::invalid(
            format!("invalid Unicode escape character '{escape}'"),
            span,
        ));
    }
    Ok(escape)
}

/// Decodes `\XXXX` and `\+XXXXXX` escapes (with a configurable escape
/// character). A doubled escape character stands for itself.
pub(crate) fn decode_unicode(raw: &str, escape: char, span: Span) -> ParseResult<SmolStr> {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != escape {
            decoded.push(c);
            continue;
        }
        let digits = match chars.peek() {
            Some(&next) if next == escape => {
                chars.next();
                decoded.push(escape);
                continue;
            }
            Some('+') => {
                chars.next();
                6
            }
            _ => 4,
        };
        let hex: String = chars.by_ref().take(digits).collect();
        if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::invalid(
                format!(
                    "incomplete escape sequence in Unicode string: expected {digits} hexadecimal digits after '{escape}'"
                ),
                span,
            ));
        }
        let code_point = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32);
        match code_point {
            Some(ch) => decoded.push(ch),
            None => {
                return Err(ParseError::invalid(
                    format!("invalid Unicode code point U+{hex}"),
                    span,
                ));
            }
        }
    }
    Ok(SmolStr::new(decoded))
}

/// Validates the digits of `X'...'` and returns them without whitespace.
pub(crate) fn validate_binary_literal(digits: &str, span: Span) -> ParseResult<SmolStr> {
    let compact: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::invalid(
            "binary literal can only contain hexadecimal digits",
            span,
        ));
    }
    if compact.len() % 2 != 0 {
        return Err(ParseError::invalid(
            "binary literal must contain an even number of digits",
            span,
        ));
    }
    Ok(SmolStr::new(compact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::lexer::tokenize;
    use crate::parser::ParserOptions;

    fn with_parser<T>(
        sql: &str,
        options: ParserOptions,
        f: impl FnOnce(&mut Parser<'_>) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let tokens = tokenize(sql).tokens;
        let mut parser = Parser::new(&tokens, options);
        f(&mut parser)
    }

    #[test]
    fn identifiers_keep_quoting_and_case() {
        let names = with_parser(
            r#"Orders."Line Items".`x`.role"#,
            ParserOptions::default(),
            |p| p.parse_qualified_name(),
        )
        .unwrap();
        let quoting: Vec<_> = names.parts.iter().map(|id| id.quoting).collect();
        assert_eq!(
            quoting,
            [
                Quoting::Unquoted,
                Quoting::Quoted,
                Quoting::Backquoted,
                Quoting::Unquoted
            ]
        );
        assert_eq!(names.parts[0].value, "Orders");
        assert_eq!(names.parts[1].value, "Line Items");
        assert_eq!(names.parts[3].value, "role");

        // After a dot, `.1` lexes as a decimal, so digit-led parts only lead.
        let names = with_parser("1st.x", ParserOptions::default(), |p| {
            p.parse_qualified_name()
        })
        .unwrap();
        assert_eq!(names.parts[0].value, "1st");
        assert_eq!(names.parts[0].quoting, Quoting::Unquoted);
        assert!(with_parser("x.1st", ParserOptions::default(), |p| {
            p.parse_qualified_name()?;
            p.expect_end()
        })
        .is_err());
    }

    #[test]
    fn reserved_keyword_is_not_an_identifier() {
        let error = with_parser("select", ParserOptions::default(), |p| p.parse_identifier())
            .unwrap_err();
        assert_eq!(error.expected(), ["<identifier>"]);
    }

    #[test]
    fn identifier_styles_can_be_rejected() {
        let options = ParserOptions::default()
            .with_backquoted_identifiers(false)
            .with_digit_identifiers(false);
        let error = with_parser("`x`", options, |p| p.parse_identifier()).unwrap_err();
        assert!(error.to_string().starts_with("backquoted identifiers"));
        let error = with_parser("1st", options, |p| p.parse_identifier()).unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::Invalid { .. }));
    }

    #[test]
    fn unicode_strings_decode_escapes() {
        let (value, span) = with_parser(r"U&'\0041\+01F600 \\'", ParserOptions::default(), |p| {
            p.parse_string()
        })
        .unwrap();
        assert_eq!(value, "A\u{1F600} \\");
        assert_eq!(span, 0..20);

        let (value, span) = with_parser(
            "U&'#0041#0042' UESCAPE '#'",
            ParserOptions::default(),
            |p| p.parse_string(),
        )
        .unwrap();
        assert_eq!(value, "AB");
        assert_eq!(span, 0..26);
    }

    #[test]
    fn unicode_escape_errors() {
        assert!(decode_unicode(r"\00", '\\', 0..1).is_err());
        assert!(decode_unicode(r"\D800", '\\', 0..1).is_err());
        assert!(validate_unicode_escape("a", 0..1).is_err());
        assert!(validate_unicode_escape("+", 0..1).is_err());
        assert!(validate_unicode_escape("ab", 0..1).is_err());
        assert_eq!(validate_unicode_escape("!", 0..1).unwrap(), '!');
    }

    #[test]
    fn binary_literal_validation() {
        assert_eq!(validate_binary_literal("CA FE", 0..1).unwrap(), "CAFE");
        assert!(validate_binary_literal("CAF", 0..1).is_err());
        assert!(validate_binary_literal("XY", 0..1).is_err());
    }
}
