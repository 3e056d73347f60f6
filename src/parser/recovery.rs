//! Script parsing with statement-level error recovery.
//!
//! A script is a sequence of statements separated by `;`. A statement that
//! fails to parse is recorded and skipped up to the next `;`, so one bad
//! statement never hides the errors or results of the rest.

use crate::ast::Statement;
use crate::diag::{Diag, SourceFile, convert_diagnostics_to_reports};
use crate::error::ParseError;
use crate::lexer::token::TokenKind;
use crate::lexer::{LexerResult, tokenize};
use crate::parser::base::ParseResult;
use crate::parser::{Parser, ParserOptions};
use miette::Report;
use tracing::debug;

/// Outcome of parsing a script.
#[derive(Debug)]
pub struct ScriptResult {
    /// Statements that parsed cleanly, in source order.
    pub statements: Vec<Statement>,
    /// Lexical and syntax errors, in source order.
    pub errors: Vec<ParseError>,
    /// Errors and warnings rendered as `miette` reports over the script.
    pub diagnostics: Vec<Report>,
}

impl ScriptResult {
    /// Returns true when no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub(crate) fn parse_script(sql: &str, options: ParserOptions) -> ScriptResult {
    let LexerResult {
        tokens,
        diagnostics: mut diags,
    } = tokenize(sql);
    let mut errors: Vec<ParseError> = diags.iter().cloned().map(ParseError::from).collect();
    let mut statements = Vec::new();

    let mut parser = Parser::new(&tokens, options);
    parser.skip_separators(&mut diags, false);
    while !parser.stream.at_eof() {
        parser.parameter_count = 0;
        let result = parser.parse_statement().and_then(|statement| {
            parser.expect_statement_end()?;
            Ok(statement)
        });
        match result {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                diags.push(error.to_diag());
                errors.push(error);
                let skipped = parser.skip_statement();
                debug!(skipped, "skipped to the next statement");
            }
        }
        parser.skip_separators(&mut diags, true);
    }

    debug!(
        len = sql.len(),
        statements = statements.len(),
        errors = errors.len(),
        "parsed script"
    );
    ScriptResult {
        statements,
        errors,
        diagnostics: convert_diagnostics_to_reports(&diags, &SourceFile::new(sql)),
    }
}

impl Parser<'_> {
    /// Accepts the end of a statement: `;` (left unconsumed) or end of input.
    fn expect_statement_end(&mut self) -> ParseResult<()> {
        if self.stream.at_eof() || self.stream.check(&TokenKind::Semicolon) {
            Ok(())
        } else {
            Err(self.stream.unexpected())
        }
    }

    /// Skips to the next `;` or end of input, returning the tokens skipped.
    fn skip_statement(&mut self) -> usize {
        let mut skipped = 0;
        while !self.stream.at_eof() && *self.stream.peek_kind(0) != TokenKind::Semicolon {
            self.stream.advance();
            skipped += 1;
        }
        skipped
    }

    /// Consumes a run of `;`. Each one not terminating a statement is an
    /// empty statement and gets a warning.
    fn skip_separators(&mut self, diags: &mut Vec<Diag>, after_statement: bool) {
        let mut terminates = after_statement;
        while *self.stream.peek_kind(0) == TokenKind::Semicolon {
            let span = self.stream.advance().span.clone();
            if !terminates {
                diags.push(
                    Diag::warning("empty statement")
                        .with_primary_label(span, "nothing before this ';'")
                        .with_code("W001"),
                );
            }
            terminates = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, QueryBody, SelectItem, Statement};
    use crate::error::ParseErrorKind;
    use crate::parse_script;

    #[test]
    fn splits_on_semicolons() {
        let result = parse_script("SELECT 1; SELECT 2;\nSHOW TABLES");
        assert!(result.is_ok());
        assert_eq!(result.statements.len(), 3);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.statements[1].span(), 10..18);
    }

    #[test]
    fn recovers_at_statement_boundary() {
        let result = parse_script("SELECT 1; SELEC 2; SELECT 3 4; CREATE TABLE t (a int)");
        assert_eq!(result.statements.len(), 2);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.diagnostics.len(), 2);
        assert!(matches!(
            &result.errors[1].kind,
            ParseErrorKind::UnexpectedToken { found, .. } if found == "4"
        ));
        assert!(result.errors[1].expected().contains(&"';'"));
        assert!(matches!(result.statements[1], Statement::CreateTable { .. }));
    }

    #[test]
    fn empty_statements_warn() {
        let result = parse_script(";SELECT 1;;");
        assert!(result.is_ok());
        assert_eq!(result.statements.len(), 1);
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn parameters_restart_per_statement() {
        let result = parse_script("SELECT ?; SELECT ?");
        for statement in &result.statements {
            let Statement::Query(query) = statement else {
                panic!("expected query");
            };
            let QueryBody::Specification(specification) = &query.body else {
                panic!("expected specification");
            };
            assert!(matches!(
                &specification.select_items[0],
                SelectItem::Expression { expression: Expression::Parameter(0, _), .. }
            ));
        }
    }

    #[test]
    fn lexical_errors_are_reported() {
        let result = parse_script("SELECT 1; SELECT 'open");
        assert!(!result.is_ok());
        assert!(matches!(result.errors[0].kind, ParseErrorKind::Lexical { .. }));
        assert_eq!(result.statements.len(), 1);
    }

    #[test]
    fn empty_script() {
        let result = parse_script("  -- nothing here\n");
        assert!(result.is_ok());
        assert!(result.statements.is_empty());
    }
}
