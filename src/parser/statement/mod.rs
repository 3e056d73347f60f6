//! Statement grammar.
//!
//! [`Parser::parse_statement`] dispatches on the leading keyword. Every
//! statement family has a distinct leading keyword except queries, which are
//! tried last, so the expected set of an unrecognized statement lists every
//! statement keyword plus every query start.
//!
//! DDL lives in [`ddl`], access control in [`security`] and introspection
//! (`SHOW`, `DESCRIBE`) in [`show`]. Session, DML, EXPLAIN, transaction and
//! prepared-statement forms are small enough to live here.

mod ddl;
mod security;
mod show;

use crate::ast::{
    ExplainFormat, ExplainOption, ExplainType, Expression, IsolationLevel, LikePattern, Property,
    Statement, TransactionMode, UpdateAssignment,
};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use smol_str::SmolStr;

const STATEMENT_START: &[&str] = &[
    "USE",
    "SET",
    "RESET",
    "SHOW",
    "CREATE",
    "DROP",
    "ALTER",
    "TRUNCATE",
    "ANALYZE",
    "REFRESH",
    "CALL",
    "INSERT",
    "DELETE",
    "UPDATE",
    "GRANT",
    "REVOKE",
    "DESCRIBE",
    "DESC",
    "EXPLAIN",
    "START",
    "COMMIT",
    "ROLLBACK",
    "PREPARE",
    "DEALLOCATE",
    "EXECUTE",
];

impl Parser<'_> {
    /// Parses one statement.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(Self::parse_statement_body)
    }

    fn parse_statement_body(&mut self) -> ParseResult<Statement> {
        let Some(keyword) = self.stream.current().kind.keyword() else {
            return self.parse_query_statement();
        };

        match keyword {
            Keyword::Use => self.parse_use(),
            Keyword::Set => self.parse_set(),
            Keyword::Reset => self.parse_reset_session(),
            Keyword::Show => self.parse_show(),
            Keyword::Create => self.parse_create(),
            Keyword::Drop => self.parse_drop(),
            Keyword::Alter => self.parse_alter(),
            Keyword::Truncate => self.parse_truncate(),
            Keyword::Analyze => self.parse_analyze(),
            Keyword::Refresh => self.parse_refresh_materialized_view(),
            Keyword::Call => self.parse_call(),
            Keyword::Insert => self.parse_insert(),
            Keyword::Delete => self.parse_delete(),
            Keyword::Update => self.parse_update(),
            Keyword::Grant => self.parse_grant(),
            Keyword::Revoke => self.parse_revoke(),
            Keyword::Describe | Keyword::Desc => self.parse_describe(),
            Keyword::Explain => self.parse_explain(),
            Keyword::Start => self.parse_start_transaction(),
            Keyword::Commit | Keyword::Rollback => {
                let start = self.stream.start();
                self.stream.advance();
                self.stream.consume_keyword(Keyword::Work);
                let span = self.stream.span_from(start);
                Ok(if keyword == Keyword::Commit {
                    Statement::Commit { span }
                } else {
                    Statement::Rollback { span }
                })
            }
            Keyword::Prepare => self.parse_prepare(),
            Keyword::Deallocate => {
                let start = self.stream.start();
                self.stream.advance();
                self.stream.expect_keyword(Keyword::Prepare)?;
                let name = self.parse_identifier()?;
                Ok(Statement::Deallocate {
                    name,
                    span: self.stream.span_from(start),
                })
            }
            Keyword::Execute => self.parse_execute(),
            _ => self.parse_query_statement(),
        }
    }

    fn parse_query_statement(&mut self) -> ParseResult<Statement> {
        self.stream.expecting_all(STATEMENT_START);
        Ok(Statement::Query(Box::new(self.parse_query()?)))
    }

    // ========================================================================
    // Session
    // ========================================================================

    fn parse_use(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Use)?;
        let first = self.parse_identifier()?;
        let (catalog, schema) = if self.stream.consume(&TokenKind::Dot) {
            (Some(first), self.parse_identifier()?)
        } else {
            (None, first)
        };
        Ok(Statement::Use {
            catalog,
            schema,
            span: self.stream.span_from(start),
        })
    }

    fn parse_set(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Set)?;

        if self.stream.consume_keyword(Keyword::Role) {
            return self.parse_set_role(start);
        }
        self.stream.expect_keyword(Keyword::Session)?;
        let name = self.parse_qualified_name()?;
        self.stream.expect(&TokenKind::Eq)?;
        let value = self.parse_expression()?;
        Ok(Statement::SetSession {
            name,
            value,
            span: self.stream.span_from(start),
        })
    }

    fn parse_reset_session(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Reset)?;
        self.stream.expect_keyword(Keyword::Session)?;
        let name = self.parse_qualified_name()?;
        Ok(Statement::ResetSession {
            name,
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // DML
    // ========================================================================

    fn parse_insert(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Insert)?;
        self.stream.expect_keyword(Keyword::Into)?;
        let target = self.parse_qualified_name()?;
        let columns = if self.column_aliases_follow() {
            self.parse_identifier_list()?
        } else {
            Vec::new()
        };
        let query = self.parse_query()?;
        Ok(Statement::Insert {
            target,
            columns,
            query: Box::new(query),
            span: self.stream.span_from(start),
        })
    }

    fn parse_delete(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Delete)?;
        self.stream.expect_keyword(Keyword::From)?;
        let table = self.parse_qualified_name()?;
        let where_clause = self.parse_where()?;
        Ok(Statement::Delete {
            table,
            where_clause,
            span: self.stream.span_from(start),
        })
    }

    fn parse_update(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Update)?;
        let table = self.parse_qualified_name()?;
        self.stream.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_comma_separated(|p| {
            let assignment_start = p.stream.start();
            let column = p.parse_identifier()?;
            p.stream.expect(&TokenKind::Eq)?;
            let value = p.parse_expression()?;
            Ok(UpdateAssignment {
                column,
                value,
                span: p.stream.span_from(assignment_start),
            })
        })?;
        let where_clause = self.parse_where()?;
        Ok(Statement::Update {
            table,
            assignments,
            where_clause,
            span: self.stream.span_from(start),
        })
    }

    fn parse_where(&mut self) -> ParseResult<Option<Expression>> {
        if self.stream.consume_keyword(Keyword::Where) {
            Ok(Some(self.parse_boolean_expression()?))
        } else {
            Ok(None)
        }
    }

    // ========================================================================
    // EXPLAIN
    // ========================================================================

    fn parse_explain(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Explain)?;
        let analyze = self.stream.consume_keyword(Keyword::Analyze);
        let verbose = self.stream.consume_keyword(Keyword::Verbose);

        let options_follow = *self.stream.peek_kind(0) == TokenKind::LParen
            && matches!(
                self.stream.peek_kind(1).keyword(),
                Some(Keyword::Format | Keyword::Type)
            );
        let options = if options_follow {
            self.stream.advance();
            let options = self.parse_comma_separated(Self::parse_explain_option)?;
            self.stream.expect(&TokenKind::RParen)?;
            options
        } else {
            Vec::new()
        };

        let statement = self.parse_statement()?;
        Ok(Statement::Explain {
            analyze,
            verbose,
            options,
            statement: Box::new(statement),
            span: self.stream.span_from(start),
        })
    }

    fn parse_explain_option(&mut self) -> ParseResult<ExplainOption> {
        if self.stream.consume_keyword(Keyword::Format) {
            let format = match self.stream.current().kind.keyword() {
                Some(Keyword::Text) => ExplainFormat::Text,
                Some(Keyword::Graphviz) => ExplainFormat::Graphviz,
                Some(Keyword::Json) => ExplainFormat::Json,
                _ => {
                    self.stream.expecting_all(&["TEXT", "GRAPHVIZ", "JSON"]);
                    return Err(self.stream.unexpected());
                }
            };
            self.stream.advance();
            return Ok(ExplainOption::Format(format));
        }

        self.stream.expect_keyword(Keyword::Type)?;
        let explain_type = match self.stream.current().kind.keyword() {
            Some(Keyword::Logical) => ExplainType::Logical,
            Some(Keyword::Distributed) => ExplainType::Distributed,
            Some(Keyword::Validate) => ExplainType::Validate,
            Some(Keyword::Io) => ExplainType::Io,
            _ => {
                self.stream
                    .expecting_all(&["LOGICAL", "DISTRIBUTED", "VALIDATE", "IO"]);
                return Err(self.stream.unexpected());
            }
        };
        self.stream.advance();
        Ok(ExplainOption::Type(explain_type))
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    fn parse_start_transaction(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Start)?;
        self.stream.expect_keyword(Keyword::Transaction)?;

        let modes = if self.stream.check_keyword(Keyword::Isolation)
            || self.stream.check_keyword(Keyword::Read)
        {
            self.parse_comma_separated(Self::parse_transaction_mode)?
        } else {
            Vec::new()
        };

        Ok(Statement::StartTransaction {
            modes,
            span: self.stream.span_from(start),
        })
    }

    fn parse_transaction_mode(&mut self) -> ParseResult<TransactionMode> {
        if self.stream.consume_keyword(Keyword::Isolation) {
            self.stream.expect_keyword(Keyword::Level)?;
            let level = if self.stream.consume_keyword(Keyword::Serializable) {
                IsolationLevel::Serializable
            } else if self.stream.consume_keyword(Keyword::Repeatable) {
                self.stream.expect_keyword(Keyword::Read)?;
                IsolationLevel::RepeatableRead
            } else {
                self.stream.expect_keyword(Keyword::Read)?;
                if self.stream.consume_keyword(Keyword::Uncommitted) {
                    IsolationLevel::ReadUncommitted
                } else {
                    self.stream.expect_keyword(Keyword::Committed)?;
                    IsolationLevel::ReadCommitted
                }
            };
            return Ok(TransactionMode::Isolation(level));
        }

        self.stream.expect_keyword(Keyword::Read)?;
        if self.stream.consume_keyword(Keyword::Only) {
            Ok(TransactionMode::ReadOnly(true))
        } else {
            self.stream.expect_keyword(Keyword::Write)?;
            Ok(TransactionMode::ReadOnly(false))
        }
    }

    // ========================================================================
    // Prepared statements
    // ========================================================================

    fn parse_prepare(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Prepare)?;
        let name = self.parse_identifier()?;
        self.stream.expect_keyword(Keyword::From)?;
        let statement = self.parse_statement()?;
        Ok(Statement::Prepare {
            name,
            statement: Box::new(statement),
            span: self.stream.span_from(start),
        })
    }

    fn parse_execute(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Execute)?;
        let name = self.parse_identifier()?;
        let parameters = if self.stream.consume_keyword(Keyword::Using) {
            self.parse_comma_separated(Self::parse_expression)?
        } else {
            Vec::new()
        };
        Ok(Statement::Execute {
            name,
            parameters,
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // Shared clauses
    // ========================================================================

    /// Parses `IF EXISTS` if present.
    fn parse_if_exists(&mut self) -> bool {
        self.stream.consume_keywords(&[Keyword::If, Keyword::Exists])
    }

    /// Parses `IF NOT EXISTS` if present.
    fn parse_if_not_exists(&mut self) -> bool {
        self.stream
            .consume_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists])
    }

    /// Parses `'(' name = value, ... ')'`.
    fn parse_properties(&mut self) -> ParseResult<Vec<Property>> {
        self.stream.expect(&TokenKind::LParen)?;
        let properties = self.parse_comma_separated(|p| {
            let start = p.stream.start();
            let name = p.parse_identifier()?;
            p.stream.expect(&TokenKind::Eq)?;
            let value = p.parse_expression()?;
            Ok(Property {
                name,
                value,
                span: p.stream.span_from(start),
            })
        })?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(properties)
    }

    /// Parses an optional `WITH (properties)` clause.
    ///
    /// `WITH` not followed by `(` is left alone; it may start `WITH [NO] DATA`.
    fn parse_with_properties(&mut self) -> ParseResult<Vec<Property>> {
        if self.stream.check_keyword(Keyword::With) && *self.stream.peek_kind(1) == TokenKind::LParen
        {
            self.stream.advance();
            self.parse_properties()
        } else {
            Ok(Vec::new())
        }
    }

    /// Parses an optional `COMMENT 'text'`.
    fn parse_comment(&mut self) -> ParseResult<Option<SmolStr>> {
        if self.stream.consume_keyword(Keyword::Comment) {
            Ok(Some(self.parse_string()?.0))
        } else {
            Ok(None)
        }
    }

    /// Parses an optional `LIKE 'pattern' [ESCAPE 'c']`.
    fn parse_like_pattern(&mut self) -> ParseResult<Option<LikePattern>> {
        let start = self.stream.start();
        if !self.stream.consume_keyword(Keyword::Like) {
            return Ok(None);
        }
        let (pattern, _) = self.parse_string()?;
        let escape = if self.stream.consume_keyword(Keyword::Escape) {
            Some(self.parse_string()?.0)
        } else {
            None
        };
        Ok(Some(LikePattern {
            pattern,
            escape,
            span: self.stream.span_from(start),
        }))
    }

    /// Returns true at `'(' identifier (',' | ')')`, the start of a column
    /// alias list rather than a parenthesized query or element list.
    fn column_aliases_follow(&self) -> bool {
        *self.stream.peek_kind(0) == TokenKind::LParen
            && self.stream.peek_kind(1).is_identifier_like()
            && matches!(
                self.stream.peek_kind(2),
                TokenKind::Comma | TokenKind::RParen
            )
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse_statement;

    #[test]
    fn session_statements() {
        assert!(matches!(
            parse_statement("USE hive.web").unwrap(),
            Statement::Use { catalog: Some(_), ref schema, .. } if schema.value == "web"
        ));
        assert!(matches!(
            parse_statement("USE web").unwrap(),
            Statement::Use { catalog: None, .. }
        ));
        assert!(matches!(
            parse_statement("SET SESSION hive.optimize = true").unwrap(),
            Statement::SetSession { ref name, .. } if name.parts.len() == 2
        ));
        assert!(matches!(
            parse_statement("RESET SESSION query_max_memory").unwrap(),
            Statement::ResetSession { .. }
        ));
    }

    #[test]
    fn insert_with_columns_and_query() {
        let Statement::Insert {
            target,
            columns,
            query,
            span,
        } = parse_statement("INSERT INTO t (a,b) SELECT a,b FROM s").unwrap()
        else {
            panic!("expected insert");
        };
        assert_eq!(target.to_string(), "t");
        assert_eq!(columns.len(), 2);
        assert!(matches!(query.body, QueryBody::Specification(_)));
        assert_eq!(span, 0..37);

        assert!(matches!(
            parse_statement("INSERT INTO t (SELECT 1)").unwrap(),
            Statement::Insert { ref columns, .. } if columns.is_empty()
        ));
        assert!(matches!(
            parse_statement("INSERT INTO t VALUES (1, 'a'), (2, 'b')").unwrap(),
            Statement::Insert { ref query, .. } if matches!(query.body, QueryBody::Values(ref rows, _) if rows.len() == 2)
        ));
    }

    #[test]
    fn delete_and_update() {
        assert!(matches!(
            parse_statement("DELETE FROM t WHERE x = 1").unwrap(),
            Statement::Delete { where_clause: Some(_), .. }
        ));
        assert!(matches!(
            parse_statement("DELETE FROM t").unwrap(),
            Statement::Delete { where_clause: None, .. }
        ));
        assert!(matches!(
            parse_statement("UPDATE t SET a = 1, b = b + 1 WHERE c").unwrap(),
            Statement::Update { ref assignments, where_clause: Some(_), .. } if assignments.len() == 2
        ));
    }

    #[test]
    fn explain_with_options() {
        let Statement::Explain {
            analyze,
            options,
            statement,
            ..
        } = parse_statement("EXPLAIN (FORMAT JSON) SELECT 1").unwrap()
        else {
            panic!("expected explain");
        };
        assert!(!analyze);
        assert_eq!(options, [ExplainOption::Format(ExplainFormat::Json)]);
        assert!(matches!(*statement, Statement::Query(_)));

        assert!(matches!(
            parse_statement("EXPLAIN ANALYZE VERBOSE (TYPE DISTRIBUTED, FORMAT TEXT) SELECT 1").unwrap(),
            Statement::Explain { analyze: true, verbose: true, ref options, .. } if options.len() == 2
        ));
        assert!(matches!(
            parse_statement("EXPLAIN (SELECT 1)").unwrap(),
            Statement::Explain { ref options, .. } if options.is_empty()
        ));
    }

    #[test]
    fn transactions() {
        let Statement::StartTransaction { modes, .. } = parse_statement(
            "START TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY",
        )
        .unwrap() else {
            panic!("expected start transaction");
        };
        assert_eq!(
            modes,
            [
                TransactionMode::Isolation(IsolationLevel::RepeatableRead),
                TransactionMode::ReadOnly(true)
            ]
        );
        assert!(matches!(parse_statement("COMMIT WORK").unwrap(), Statement::Commit { .. }));
        assert!(matches!(parse_statement("ROLLBACK").unwrap(), Statement::Rollback { .. }));
        assert!(matches!(
            parse_statement("START TRANSACTION").unwrap(),
            Statement::StartTransaction { ref modes, .. } if modes.is_empty()
        ));
    }

    #[test]
    fn prepared_statements() {
        let Statement::Prepare { name, statement, .. } =
            parse_statement("PREPARE q FROM SELECT * FROM t WHERE id = ?").unwrap()
        else {
            panic!("expected prepare");
        };
        assert_eq!(name.value, "q");
        assert!(matches!(*statement, Statement::Query(_)));

        assert!(matches!(
            parse_statement("EXECUTE q USING 1, 'a'").unwrap(),
            Statement::Execute { ref parameters, .. } if parameters.len() == 2
        ));
        assert!(matches!(
            parse_statement("DEALLOCATE PREPARE q").unwrap(),
            Statement::Deallocate { .. }
        ));
    }

    #[test]
    fn unknown_statement_lists_every_start() {
        let error = parse_statement("FROB t").unwrap_err();
        for start in ["SELECT", "WITH", "CREATE", "SHOW", "EXPLAIN", "'('"] {
            assert!(error.expected().contains(&start), "missing {start}");
        }
    }
}
