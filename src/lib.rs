//! Parser for an analytic SQL dialect with rich diagnostics.
//!
//! The crate turns SQL text into an immutable, span-annotated syntax tree or
//! a structured [`ParseError`]. Errors convert into `miette` reports for
//! display.
//!
//! # Example
//!
//! ```
//! use sql_parser::ast::{QueryBody, Statement};
//! use sql_parser::parse_statement;
//!
//! let statement = parse_statement("SELECT name, count(*) FROM users GROUP BY name").unwrap();
//! let Statement::Query(query) = statement else { unreachable!() };
//! assert!(matches!(query.body, QueryBody::Specification(_)));
//!
//! let error = parse_statement("SELECT FROM t").unwrap_err();
//! assert_eq!(error.span, 7..11);
//! assert!(error.expected().contains(&"<identifier>"));
//! ```
//!
//! Scripts of several statements are parsed with [`parse_script`], which
//! keeps going after a bad statement:
//!
//! ```
//! let result = sql_parser::parse_script("SELECT 1; SELEC 2; SHOW TABLES");
//! assert_eq!(result.statements.len(), 2);
//! assert_eq!(result.errors.len(), 1);
//! ```

pub mod ast;
pub mod diag;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Span, Spanned};

pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole};
pub use error::{ParseError, ParseErrorKind};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use parser::{
    DecimalLiteralTreatment, ParserOptions, ScriptResult, SqlParser, parse_boolean_expression,
    parse_expression, parse_script, parse_sort_items, parse_statement, parse_type,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_accessible() {
        let _span: Span = 0..5;
        let _spanned = Spanned::new(42, 0..5);
        let options =
            ParserOptions::default().with_decimal_literal_treatment(DecimalLiteralTreatment::Reject);
        let _parser = SqlParser::new(options);
    }

    #[test]
    fn errors_render_as_reports() {
        let source = "SELECT * FROM";
        let error = parse_statement(source).unwrap_err();
        let report = error.to_report(source);
        assert_eq!(report.code().map(|code| code.to_string()).as_deref(), Some("P002"));
    }
}
