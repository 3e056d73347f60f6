//! Expression AST nodes.
//!
//! Binary operators are never flattened: `a - b - c` is
//! `Binary(Sub, Binary(Sub, a, b), c)`. Parentheses written in the source
//! are kept as [`Expression::Parenthesized`].

use crate::ast::{BaseType, DataType, Identifier, IntervalField, QualifiedName, Query, Span};
use smol_str::SmolStr;
use std::fmt;

// ============================================================================
// Expression
// ============================================================================

/// Any scalar or boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(Literal, Span),

    /// Column or variable reference
    Identifier(Identifier),

    /// `base.field`
    Dereference {
        base: Box<Expression>,
        field: Identifier,
        span: Span,
    },

    /// `base[index]`
    Subscript {
        base: Box<Expression>,
        index: Box<Expression>,
        span: Span,
    },

    /// `?` parameter marker, numbered by position of appearance starting at 0
    Parameter(u32, Span),

    /// Unary `+` / `-`
    Unary(UnaryOperator, Box<Expression>, Span),

    /// Arithmetic or `||`
    Binary(BinaryOperator, Box<Expression>, Box<Expression>, Span),

    /// `value AT TIME ZONE zone`
    AtTimeZone {
        value: Box<Expression>,
        zone: Box<Expression>,
        span: Span,
    },

    /// `left op right`
    Comparison(ComparisonOperator, Box<Expression>, Box<Expression>, Span),

    /// `value op {ALL | ANY | SOME} (subquery)`
    QuantifiedComparison {
        operator: ComparisonOperator,
        quantifier: ComparisonQuantifier,
        value: Box<Expression>,
        subquery: Box<Query>,
        span: Span,
    },

    /// `value [NOT] BETWEEN low AND high`
    Between {
        value: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
        negated: bool,
        span: Span,
    },

    /// `value [NOT] IN (expr, ...)`
    InList {
        value: Box<Expression>,
        list: Vec<Expression>,
        negated: bool,
        span: Span,
    },

    /// `value [NOT] IN (subquery)`
    InSubquery {
        value: Box<Expression>,
        subquery: Box<Query>,
        negated: bool,
        span: Span,
    },

    /// `value [NOT] LIKE pattern [ESCAPE escape]`
    Like {
        value: Box<Expression>,
        pattern: Box<Expression>,
        escape: Option<Box<Expression>>,
        negated: bool,
        span: Span,
    },

    /// `value IS [NOT] NULL`
    IsNull {
        value: Box<Expression>,
        negated: bool,
        span: Span,
    },

    /// `left IS [NOT] DISTINCT FROM right`
    IsDistinctFrom {
        left: Box<Expression>,
        right: Box<Expression>,
        negated: bool,
        span: Span,
    },

    /// `NOT operand`
    Not(Box<Expression>, Span),

    /// `AND` / `OR`
    Logical(LogicalOperator, Box<Expression>, Box<Expression>, Span),

    /// Function call, possibly aggregate or windowed
    FunctionCall(Box<FunctionCall>),

    /// `x -> body` or `(x, y) -> body`
    Lambda {
        parameters: Vec<Identifier>,
        body: Box<Expression>,
        span: Span,
    },

    /// Scalar subquery `(SELECT ...)`
    Subquery(Box<Query>, Span),

    /// `EXISTS (subquery)`
    Exists(Box<Query>, Span),

    /// `CASE operand WHEN ... END`
    SimpleCase {
        operand: Box<Expression>,
        when_clauses: Vec<WhenClause>,
        else_result: Option<Box<Expression>>,
        span: Span,
    },

    /// `CASE WHEN condition ... END`
    SearchedCase {
        when_clauses: Vec<WhenClause>,
        else_result: Option<Box<Expression>>,
        span: Span,
    },

    /// `CAST(value AS type)`, or `TRY_CAST` when `safe`
    Cast {
        value: Box<Expression>,
        data_type: DataType,
        safe: bool,
        span: Span,
    },

    /// `ARRAY[expr, ...]`
    Array(Vec<Expression>, Span),

    /// `ROW(expr, ...)` or `(expr, expr, ...)`
    Row(Vec<Expression>, Span),

    /// `POSITION(needle IN haystack)`
    Position {
        needle: Box<Expression>,
        haystack: Box<Expression>,
        span: Span,
    },

    /// `CURRENT_DATE`, `CURRENT_TIME[(p)]`, `LOCALTIMESTAMP[(p)]`, ...
    CurrentTime {
        function: CurrentTimeFunction,
        precision: Option<SmolStr>,
        span: Span,
    },

    /// `CURRENT_USER`
    CurrentUser(Span),

    /// `SUBSTRING(value FROM start [FOR length])`
    Substring {
        value: Box<Expression>,
        start: Box<Expression>,
        length: Option<Box<Expression>>,
        span: Span,
    },

    /// `NORMALIZE(value [, form])`
    Normalize {
        value: Box<Expression>,
        form: Option<NormalForm>,
        span: Span,
    },

    /// `EXTRACT(field FROM value)`
    Extract {
        field: Identifier,
        value: Box<Expression>,
        span: Span,
    },

    /// `GROUPING(name, ...)`
    Grouping(Vec<QualifiedName>, Span),

    /// `(expr)`
    Parenthesized(Box<Expression>, Span),
}

impl Expression {
    /// Returns the source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(_, span)
            | Expression::Parameter(_, span)
            | Expression::Unary(_, _, span)
            | Expression::Binary(_, _, _, span)
            | Expression::Comparison(_, _, _, span)
            | Expression::Not(_, span)
            | Expression::Logical(_, _, _, span)
            | Expression::Subquery(_, span)
            | Expression::Exists(_, span)
            | Expression::Array(_, span)
            | Expression::Row(_, span)
            | Expression::CurrentUser(span)
            | Expression::Grouping(_, span)
            | Expression::Parenthesized(_, span) => span.clone(),
            Expression::Identifier(identifier) => identifier.span.clone(),
            Expression::FunctionCall(call) => call.span.clone(),
            Expression::Dereference { span, .. }
            | Expression::Subscript { span, .. }
            | Expression::AtTimeZone { span, .. }
            | Expression::QuantifiedComparison { span, .. }
            | Expression::Between { span, .. }
            | Expression::InList { span, .. }
            | Expression::InSubquery { span, .. }
            | Expression::Like { span, .. }
            | Expression::IsNull { span, .. }
            | Expression::IsDistinctFrom { span, .. }
            | Expression::Lambda { span, .. }
            | Expression::SimpleCase { span, .. }
            | Expression::SearchedCase { span, .. }
            | Expression::Cast { span, .. }
            | Expression::Position { span, .. }
            | Expression::CurrentTime { span, .. }
            | Expression::Substring { span, .. }
            | Expression::Normalize { span, .. }
            | Expression::Extract { span, .. } => span.clone(),
        }
    }
}

// ============================================================================
// Literals
// ============================================================================

/// A literal value.
///
/// Numeric literals keep their source text; string literals hold the decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(SmolStr),
    Decimal(SmolStr),
    Double(SmolStr),
    String(SmolStr),
    /// Hex digits of `X'...'`, validated
    Binary(SmolStr),
    /// `INTERVAL [+|-] 'value' from [TO to]`
    Interval {
        sign: Sign,
        value: SmolStr,
        from: IntervalField,
        to: Option<IntervalField>,
    },
    /// `DATE '2020-01-01'`, `DOUBLE PRECISION '1.5'`, ...
    Typed { data_type: BaseType, value: SmolStr },
}

/// Sign of an interval literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("NULL"),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
            Literal::Integer(text) | Literal::Decimal(text) | Literal::Double(text) => {
                f.write_str(text)
            }
            Literal::String(value) => write_string(f, value),
            Literal::Binary(hex) => write!(f, "X'{hex}'"),
            Literal::Interval {
                sign,
                value,
                from,
                to,
            } => {
                f.write_str("INTERVAL ")?;
                if *sign == Sign::Negative {
                    f.write_str("-")?;
                }
                write_string(f, value)?;
                write!(f, " {from}")?;
                if let Some(to) = to {
                    write!(f, " TO {to}")?;
                }
                Ok(())
            }
            Literal::Typed { data_type, value } => {
                write!(f, "{data_type} ")?;
                write_string(f, value)
            }
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Concatenate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonQuantifier {
    All,
    Any,
    Some,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// Niladic date/time functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentTimeFunction {
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    Localtime,
    Localtimestamp,
}

/// Unicode normal form of `NORMALIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

/// `WHEN operand THEN result` of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub operand: Expression,
    pub result: Expression,
    pub span: Span,
}

// ============================================================================
// Function calls and windows
// ============================================================================

/// `ALL` / `DISTINCT` on SELECT, aggregates, set operations and GROUP BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

/// `IGNORE NULLS` / `RESPECT NULLS` before `OVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullTreatment {
    Ignore,
    Respect,
}

/// A function invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub quantifier: Option<SetQuantifier>,
    pub arguments: Vec<Expression>,
    /// `name(*)`
    pub wildcard: bool,
    /// `ORDER BY` inside the argument list
    pub order_by: Vec<SortItem>,
    /// `FILTER (WHERE ...)`
    pub filter: Option<Box<Expression>>,
    pub null_treatment: Option<NullTreatment>,
    pub window: Option<Window>,
    pub span: Span,
}

/// The body of an `OVER (...)` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub partition_by: Vec<Expression>,
    pub order_by: Vec<SortItem>,
    pub frame: Option<WindowFrame>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnits {
    Range,
    Rows,
    Groups,
}

/// A window frame. A frame written with a single bound ends at the current row.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub start: FrameBound,
    pub end: FrameBound,
    /// Whether the frame was written as `BETWEEN start AND end`.
    pub between: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    UnboundedPreceding,
    UnboundedFollowing,
    CurrentRow,
    Preceding(Box<Expression>),
    Following(Box<Expression>),
}

// ============================================================================
// Sort items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    First,
    Last,
}

/// `expr [ASC | DESC] [NULLS FIRST | NULLS LAST]`
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub key: Expression,
    pub ordering: Option<Ordering>,
    pub null_ordering: Option<NullOrdering>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Quoting;

    #[test]
    fn span_of_struct_and_tuple_variants() {
        let left = Expression::Literal(Literal::Integer("1".into()), 0..1);
        let right = Expression::Identifier(Identifier::new("x", Quoting::Unquoted, 4..5));
        assert_eq!(right.span(), 4..5);
        let sum = Expression::Binary(
            BinaryOperator::Add,
            Box::new(left),
            Box::new(right),
            0..5,
        );
        let is_null = Expression::IsNull {
            value: Box::new(sum),
            negated: true,
            span: 0..17,
        };
        assert_eq!(is_null.span(), 0..17);
    }

    #[test]
    fn literal_display_escapes_and_keywords() {
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Boolean(false).to_string(), "FALSE");
        assert_eq!(Literal::String("it's".into()).to_string(), "'it''s'");
        assert_eq!(Literal::Binary("CAFE".into()).to_string(), "X'CAFE'");
        assert_eq!(Literal::Double("1.5E3".into()).to_string(), "1.5E3");
    }

    #[test]
    fn interval_and_typed_literal_display() {
        let interval = Literal::Interval {
            sign: Sign::Negative,
            value: "3".into(),
            from: IntervalField::Day,
            to: Some(IntervalField::Hour),
        };
        assert_eq!(interval.to_string(), "INTERVAL -'3' DAY TO HOUR");

        let typed = Literal::Typed {
            data_type: BaseType::DoublePrecision,
            value: "1.5".into(),
        };
        assert_eq!(typed.to_string(), "DOUBLE PRECISION '1.5'");
    }
}
