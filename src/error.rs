//! Structured parse errors.
//!
//! Every entry point fails with a single [`ParseError`]. The error carries the
//! span it refers to and converts into the internal [`Diag`] model, from which
//! a `miette` report with source context can be rendered.

use crate::ast::Span;
use crate::diag::{Diag, SourceFile, convert_diag_to_report};
use miette::Report;
use smol_str::SmolStr;
use thiserror::Error;

/// A syntax error with the location it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where it went wrong.
    pub span: Span,
    /// An earlier location the error refers back to, with its label.
    pub related: Option<(Span, &'static str)>,
}

/// The category of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A token that no alternative at this position accepts.
    #[error("unexpected '{found}', expected {}", expected_list(.expected))]
    UnexpectedToken {
        /// Source text of the offending token.
        found: SmolStr,
        /// Descriptions of the tokens that would have been accepted, in the
        /// order the grammar tried them.
        expected: Vec<&'static str>,
    },

    /// Input ended while a production was incomplete.
    #[error("unexpected end of input, expected {}", expected_list(.expected))]
    UnexpectedEndOfInput {
        /// Descriptions of the tokens that would have been accepted.
        expected: Vec<&'static str>,
    },

    /// Tokens remain after a complete standalone production.
    #[error("unexpected '{found}' after the end of the input")]
    TrailingInput {
        /// Source text of the first extra token.
        found: SmolStr,
    },

    /// The lexer could not produce a valid token.
    #[error("{message}")]
    Lexical { message: String },

    /// Syntactically well-formed input that is rejected anyway.
    #[error("{message}")]
    Invalid { message: String },

    /// Nesting exceeded [`ParserOptions::max_nesting_depth`](crate::ParserOptions).
    #[error("input is nested too deeply (limit is {limit})")]
    NestingTooDeep { limit: usize },
}

fn expected_list(expected: &[&'static str]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [single] => (*single).to_string(),
        many => format!("one of {}", many.join(", ")),
    }
}

impl ParseError {
    /// Creates a new error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            related: None,
        }
    }

    /// Points the error back at an earlier location, such as the first of
    /// two duplicate clauses.
    pub fn with_related(mut self, span: Span, label: &'static str) -> Self {
        self.related = Some((span, label));
        self
    }

    /// Creates an [`ParseErrorKind::Invalid`] error.
    pub fn invalid(message: impl Into<String>, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Invalid {
                message: message.into(),
            },
            span,
        )
    }

    /// The expected-token set, for errors that carry one.
    pub fn expected(&self) -> &[&'static str] {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. }
            | ParseErrorKind::UnexpectedEndOfInput { expected } => expected,
            _ => &[],
        }
    }

    /// Stable diagnostic code for this error category.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => "P001",
            ParseErrorKind::UnexpectedEndOfInput { .. } => "P002",
            ParseErrorKind::TrailingInput { .. } => "P003",
            ParseErrorKind::Lexical { .. } => "L001",
            ParseErrorKind::Invalid { .. } => "P004",
            ParseErrorKind::NestingTooDeep { .. } => "P005",
        }
    }

    pub(crate) fn is_nesting_too_deep(&self) -> bool {
        matches!(self.kind, ParseErrorKind::NestingTooDeep { .. })
    }

    /// Converts this error into the internal diagnostic model.
    pub fn to_diag(&self) -> Diag {
        let label = match &self.kind {
            ParseErrorKind::UnexpectedToken { .. } => "unexpected token",
            ParseErrorKind::UnexpectedEndOfInput { .. } => "input ends here",
            ParseErrorKind::TrailingInput { .. } => "extra input starts here",
            ParseErrorKind::Lexical { .. } => "not a valid token",
            ParseErrorKind::Invalid { .. } => "here",
            ParseErrorKind::NestingTooDeep { .. } => "limit reached here",
        };
        let mut diag = Diag::error(self.to_string())
            .with_primary_label(self.span.clone(), label)
            .with_code(self.code());
        if let Some((span, label)) = &self.related {
            diag = diag.with_secondary_label(span.clone(), *label);
        }
        match &self.kind {
            ParseErrorKind::TrailingInput { found } => {
                let diag = diag.with_help("a single statement or expression was expected");
                if found == ";" {
                    diag.with_note("scripts of ';'-separated statements go through parse_script")
                } else {
                    diag
                }
            }
            ParseErrorKind::NestingTooDeep { .. } => {
                diag.with_help("raise the nesting limit in the parser options")
            }
            _ => diag,
        }
    }

    /// Renders this error as a `miette` report over `source`.
    pub fn to_report(&self, source: &str) -> Report {
        convert_diag_to_report(&self.to_diag(), &SourceFile::new(source))
    }
}

impl From<ParseError> for Diag {
    fn from(error: ParseError) -> Self {
        error.to_diag()
    }
}

impl From<Diag> for ParseError {
    /// Lexer diagnostics become [`ParseErrorKind::Lexical`] errors at their
    /// primary label.
    fn from(diag: Diag) -> Self {
        let span = diag
            .labels
            .first()
            .map(|label| label.span.clone())
            .unwrap_or(0..0);
        Self::new(
            ParseErrorKind::Lexical {
                message: diag.message,
            },
            span,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_token_message_lists_alternatives() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                found: "FROM".into(),
                expected: vec!["<identifier>", "'('"],
            },
            7..11,
        );
        assert_eq!(
            error.to_string(),
            "unexpected 'FROM', expected one of <identifier>, '('"
        );
        assert_eq!(error.code(), "P001");
        assert_eq!(error.expected(), ["<identifier>", "'('"]);
    }

    #[test]
    fn single_expectation_is_not_listed() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedEndOfInput {
                expected: vec!["')'"],
            },
            4..4,
        );
        assert_eq!(error.to_string(), "unexpected end of input, expected ')'");
    }

    #[test]
    fn diag_conversion_keeps_span_and_code() {
        let error = ParseError::new(ParseErrorKind::TrailingInput { found: "x".into() }, 9..10);
        let diag = error.to_diag();
        assert_eq!(diag.code.as_deref(), Some("P003"));
        assert_eq!(diag.labels[0].span, 9..10);
        assert!(diag.help.is_some());
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn trailing_semicolon_suggests_scripts() {
        let error = ParseError::new(ParseErrorKind::TrailingInput { found: ";".into() }, 8..9);
        let diag = error.to_diag();
        assert_eq!(diag.notes.len(), 1);
        assert!(diag.notes[0].contains("parse_script"));
    }

    #[test]
    fn related_location_becomes_secondary_label() {
        let error = ParseError::invalid("duplicate language clause", 20..32)
            .with_related(4..16, "first given here");
        let diag = error.to_diag();
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[0].span, 20..32);
        assert_eq!(diag.labels[1].span, 4..16);
        assert_eq!(diag.labels[1].role, crate::diag::LabelRole::Secondary);
        assert_eq!(diag.labels[1].message, "first given here");
    }

    #[test]
    fn lexer_diag_becomes_lexical_error() {
        let diag = Diag::error("unterminated string literal")
            .with_primary_label(7..11, "starts here")
            .with_code("L002");
        let error = ParseError::from(diag);
        assert_eq!(error.span, 7..11);
        assert_eq!(error.code(), "L001");
        assert_eq!(error.to_string(), "unterminated string literal");
    }

    #[test]
    fn report_renders_message() {
        let error = ParseError::invalid("duplicate language clause", 0..6);
        let report = error.to_report("SELECT 1");
        assert_eq!(report.to_string(), "duplicate language clause");
    }
}
