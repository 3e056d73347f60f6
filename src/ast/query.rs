//! Query AST nodes: WITH, set operations, SELECT, ORDER BY, OFFSET and LIMIT.

use crate::ast::{Expression, Identifier, QualifiedName, Relation, SetQuantifier, SortItem, Span};
use smol_str::SmolStr;

/// A complete query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub with: Option<With>,
    pub body: QueryBody,
    pub order_by: Vec<SortItem>,
    pub offset: Option<Offset>,
    pub limit: Option<Limit>,
    pub span: Span,
}

/// `WITH [RECURSIVE] name [(columns)] AS (query), ...`
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub recursive: bool,
    pub queries: Vec<WithQuery>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithQuery {
    pub name: Identifier,
    pub column_names: Vec<Identifier>,
    pub query: Box<Query>,
    pub span: Span,
}

/// The set-operation tree of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryBody {
    Specification(Box<QuerySpecification>),
    /// `TABLE name`
    Table(QualifiedName, Span),
    /// `VALUES row, ...`
    Values(Vec<Expression>, Span),
    /// `(query)`
    Subquery(Box<Query>, Span),
    SetOperation {
        operator: SetOperator,
        quantifier: Option<SetQuantifier>,
        left: Box<QueryBody>,
        right: Box<QueryBody>,
        span: Span,
    },
}

impl QueryBody {
    pub fn span(&self) -> Span {
        match self {
            QueryBody::Specification(specification) => specification.span.clone(),
            QueryBody::Table(_, span)
            | QueryBody::Values(_, span)
            | QueryBody::Subquery(_, span)
            | QueryBody::SetOperation { span, .. } => span.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// `OFFSET n [ROW | ROWS]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offset {
    pub count: SmolStr,
    pub span: Span,
}

/// Row limit of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    /// `LIMIT n`
    Count(SmolStr, Span),
    /// `LIMIT ALL`
    All(Span),
    /// `FETCH FIRST n ROWS ONLY`
    FetchFirst(SmolStr, Span),
}

/// `SELECT ... [FROM ...] [WHERE ...] [GROUP BY ...] [HAVING ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpecification {
    pub quantifier: Option<SetQuantifier>,
    pub select_items: Vec<SelectItem>,
    /// Comma-separated FROM entries in source order; empty without FROM.
    pub from: Vec<Relation>,
    pub where_clause: Option<Expression>,
    pub group_by: Option<GroupBy>,
    pub having: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `expr [[AS] alias]`
    Expression {
        expression: Expression,
        alias: Option<Identifier>,
        span: Span,
    },
    /// `*` or `prefix.*`
    AllColumns {
        prefix: Option<QualifiedName>,
        span: Span,
    },
}

impl SelectItem {
    pub fn span(&self) -> Span {
        match self {
            SelectItem::Expression { span, .. } | SelectItem::AllColumns { span, .. } => {
                span.clone()
            }
        }
    }
}

/// `GROUP BY [ALL | DISTINCT] element, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub quantifier: Option<SetQuantifier>,
    pub elements: Vec<GroupingElement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupingElement {
    /// `expr` or `(expr, ...)`
    Simple(Vec<Expression>, Span),
    Rollup(Vec<Expression>, Span),
    Cube(Vec<Expression>, Span),
    /// `GROUPING SETS ((a, b), c, ())`
    GroupingSets(Vec<Vec<Expression>>, Span),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    #[test]
    fn body_span_delegates_to_specification() {
        let specification = QuerySpecification {
            quantifier: None,
            select_items: vec![SelectItem::Expression {
                expression: Expression::Literal(Literal::Integer("1".into()), 7..8),
                alias: None,
                span: 7..8,
            }],
            from: Vec::new(),
            where_clause: None,
            group_by: None,
            having: None,
            span: 0..8,
        };
        let body = QueryBody::Specification(Box::new(specification));
        assert_eq!(body.span(), 0..8);
    }
}
