//! Recursive-descent parser for the SQL dialect.
//!
//! A single [`Parser`] walks the token stream; the grammar is split across
//! modules by area (types, expressions, relations, queries, statements), each
//! adding an `impl` block. Binary operator tiers are iterative loops, so
//! left-associativity falls out of the loop order.
//!
//! Most decisions need one or two tokens of lookahead. Where a prefix is
//! genuinely ambiguous for an unbounded number of tokens (a parenthesized
//! query versus a parenthesized expression or relation, special forms of
//! non-reserved words), the parser speculates: it marks the stream, tries the
//! preferred alternative and rolls back on failure.

mod base;
mod expression;
pub mod options;
mod primitives;
mod query;
mod recovery;
mod relation;
mod statement;
mod types;

pub use options::{DecimalLiteralTreatment, ParserOptions};
pub use recovery::ScriptResult;

use crate::ast::{DataType, Expression, SortItem, Statement};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::{LexerResult, tokenize};
use base::{ParseResult, TokenStream};
use tracing::{debug, trace};

/// Parser state for a single parse call.
pub(crate) struct Parser<'a> {
    stream: TokenStream<'a>,
    options: ParserOptions,
    depth: usize,
    /// Number of `?` markers seen so far; the next marker gets this index.
    parameter_count: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], options: ParserOptions) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            options,
            depth: 0,
            parameter_count: 0,
        }
    }

    /// Runs `f` one nesting level deeper, failing once the configured limit is hit.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.options.max_nesting_depth {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep {
                    limit: self.options.max_nesting_depth,
                },
                self.stream.current().span.clone(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Tries `f`; on failure rewinds the stream and returns `None`.
    ///
    /// The expected set and parameter numbering are restored along with the
    /// cursor. Exceeding the nesting limit is never retried.
    pub(crate) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Option<T>> {
        let checkpoint = self.stream.mark();
        let parameters = self.parameter_count;
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_nesting_too_deep() => Err(error),
            Err(error) => {
                trace!(position = ?error.span, %error, "speculative branch rolled back");
                self.stream.reset(checkpoint);
                self.parameter_count = parameters;
                Ok(None)
            }
        }
    }

    /// Fails with `TrailingInput` unless the stream is exhausted.
    pub(crate) fn expect_end(&mut self) -> ParseResult<()> {
        let token = self.stream.current();
        match token.kind {
            TokenKind::Eof => Ok(()),
            _ => Err(ParseError::new(
                ParseErrorKind::TrailingInput {
                    found: token.text.clone(),
                },
                token.span.clone(),
            )),
        }
    }
}

/// Parser entry points bound to a set of [`ParserOptions`].
///
/// Each entry point tokenizes its input, parses one production and requires
/// the input to end right after it.
///
/// # Example
///
/// ```
/// use sql_parser::{ParserOptions, SqlParser, ast::Statement};
///
/// let parser = SqlParser::new(ParserOptions::default());
/// let statement = parser.parse_statement("SELECT 1").unwrap();
/// assert!(matches!(statement, Statement::Query(_)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlParser {
    options: ParserOptions,
}

impl SqlParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a single statement.
    pub fn parse_statement(&self, sql: &str) -> Result<Statement, ParseError> {
        self.run(sql, "statement", |p| p.parse_statement())
    }

    /// Parses a standalone expression.
    pub fn parse_expression(&self, sql: &str) -> Result<Expression, ParseError> {
        self.run(sql, "expression", |p| p.parse_expression())
    }

    /// Parses a standalone boolean expression, such as a row filter.
    pub fn parse_boolean_expression(&self, sql: &str) -> Result<Expression, ParseError> {
        self.run(sql, "boolean expression", |p| p.parse_boolean_expression())
    }

    /// Parses a comma-separated list of sort items.
    pub fn parse_sort_items(&self, sql: &str) -> Result<Vec<SortItem>, ParseError> {
        self.run(sql, "sort items", |p| p.parse_sort_item_list())
    }

    /// Parses a data type.
    pub fn parse_type(&self, sql: &str) -> Result<DataType, ParseError> {
        self.run(sql, "type", |p| p.parse_type())
    }

    /// Parses `;`-separated statements, recovering at statement boundaries.
    pub fn parse_script(&self, sql: &str) -> ScriptResult {
        recovery::parse_script(sql, self.options)
    }

    fn run<T>(
        &self,
        sql: &str,
        production: &'static str,
        parse: impl FnOnce(&mut Parser<'_>) -> ParseResult<T>,
    ) -> Result<T, ParseError> {
        let LexerResult {
            tokens,
            diagnostics,
        } = tokenize(sql);
        if let Some(diag) = diagnostics.into_iter().next() {
            debug!(production, message = %diag.message, "lexing failed");
            return Err(ParseError::from(diag));
        }

        let mut parser = Parser::new(&tokens, self.options);
        let result = parse(&mut parser).and_then(|value| {
            parser.expect_end()?;
            Ok(value)
        });
        match &result {
            Ok(_) => debug!(production, len = sql.len(), "parsed"),
            Err(error) => debug!(production, len = sql.len(), %error, "parse failed"),
        }
        result
    }
}

/// Parses a single statement with default options.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    SqlParser::default().parse_statement(sql)
}

/// Parses a standalone expression with default options.
pub fn parse_expression(sql: &str) -> Result<Expression, ParseError> {
    SqlParser::default().parse_expression(sql)
}

/// Parses a standalone boolean expression with default options.
pub fn parse_boolean_expression(sql: &str) -> Result<Expression, ParseError> {
    SqlParser::default().parse_boolean_expression(sql)
}

/// Parses a sort item list with default options.
pub fn parse_sort_items(sql: &str) -> Result<Vec<SortItem>, ParseError> {
    SqlParser::default().parse_sort_items(sql)
}

/// Parses a data type with default options.
pub fn parse_type(sql: &str) -> Result<DataType, ParseError> {
    SqlParser::default().parse_type(sql)
}

/// Parses a script of `;`-separated statements with default options.
pub fn parse_script(sql: &str) -> ScriptResult {
    SqlParser::default().parse_script(sql)
}
