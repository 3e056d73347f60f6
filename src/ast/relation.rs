//! Relation AST nodes: FROM-clause items and joins.

use crate::ast::{Expression, Identifier, QualifiedName, Query, Span};

/// A relation in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// A table reference, optionally pinned to a historical version
    Table {
        name: QualifiedName,
        version: Option<TableVersion>,
        span: Span,
    },
    /// `(query)`
    Subquery(Box<Query>, Span),
    /// `UNNEST(expr, ...) [WITH ORDINALITY]`
    Unnest {
        expressions: Vec<Expression>,
        with_ordinality: bool,
        span: Span,
    },
    /// `LATERAL (query)`
    Lateral(Box<Query>, Span),
    /// `(relation)`
    Parenthesized(Box<Relation>, Span),
    /// `relation [AS] alias [(column, ...)]`
    Aliased {
        relation: Box<Relation>,
        alias: Identifier,
        column_names: Vec<Identifier>,
        span: Span,
    },
    /// `relation TABLESAMPLE method (percentage)`
    Sampled {
        relation: Box<Relation>,
        method: SampleMethod,
        percentage: Box<Expression>,
        span: Span,
    },
    Join(Box<Join>),
}

impl Relation {
    pub fn span(&self) -> Span {
        match self {
            Relation::Subquery(_, span)
            | Relation::Lateral(_, span)
            | Relation::Parenthesized(_, span) => span.clone(),
            Relation::Table { span, .. }
            | Relation::Unnest { span, .. }
            | Relation::Aliased { span, .. }
            | Relation::Sampled { span, .. } => span.clone(),
            Relation::Join(join) => join.span.clone(),
        }
    }
}

/// A binary join. Chains of joins nest to the left.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub left: Relation,
    pub right: Relation,
    /// Absent exactly for `CROSS JOIN`.
    pub criteria: Option<JoinCriteria>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Cross,
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCriteria {
    On(Expression),
    Using(Vec<Identifier>),
    /// `NATURAL ... JOIN`
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMethod {
    Bernoulli,
    System,
}

/// `FOR kind {AS OF | BEFORE} value`
#[derive(Debug, Clone, PartialEq)]
pub struct TableVersion {
    pub kind: TableVersionKind,
    pub operator: TableVersionOperator,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableVersionKind {
    SystemTime,
    SystemVersion,
    Timestamp,
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableVersionOperator {
    AsOf,
    Before,
}
