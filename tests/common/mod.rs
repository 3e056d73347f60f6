//! Common test utilities shared by the integration tests.
//!
//! # Parsing Helpers
//! - [`statement`] - Parse a statement, panicking with a rendered report on errors
//! - [`expression`] - Parse a standalone expression
//! - [`specification`] - Parse a query and return its `SELECT` body
//! - [`parse_error`] - Parse a statement that must fail
//!
//! # Diagnostic Helpers
//! - [`format_diagnostics`] - Format reports for display in assertions

#![allow(dead_code)]

use sql_parser::ast::{Expression, QueryBody, QuerySpecification, Statement};
use sql_parser::{ParseError, parse_expression, parse_statement};

/// Format reports for display in assertion messages.
pub fn format_diagnostics(diags: &[miette::Report]) -> String {
    diags
        .iter()
        .map(|diag| format!("{diag:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a statement, panicking with the rendered error on failure.
pub fn statement(sql: &str) -> Statement {
    match parse_statement(sql) {
        Ok(statement) => statement,
        Err(error) => panic!("failed to parse `{sql}`:\n{:?}", error.to_report(sql)),
    }
}

/// Parse an expression, panicking with the rendered error on failure.
pub fn expression(sql: &str) -> Expression {
    match parse_expression(sql) {
        Ok(expression) => expression,
        Err(error) => panic!("failed to parse `{sql}`:\n{:?}", error.to_report(sql)),
    }
}

/// Parse a query statement whose body is a plain `SELECT`.
pub fn specification(sql: &str) -> QuerySpecification {
    let Statement::Query(query) = statement(sql) else {
        panic!("`{sql}` is not a query");
    };
    match query.body {
        QueryBody::Specification(specification) => *specification,
        other => panic!("`{sql}` has body {other:?}"),
    }
}

/// Parse a statement that is expected to fail.
pub fn parse_error(sql: &str) -> ParseError {
    match parse_statement(sql) {
        Ok(statement) => panic!("`{sql}` unexpectedly parsed as {statement:?}"),
        Err(error) => error,
    }
}

/// Asserts that every statement in `sqls` parses.
pub fn assert_all_parse(sqls: &[&str]) {
    for sql in sqls {
        statement(sql);
    }
}
