//! Expression grammar.
//!
//! Tiers, loosest first:
//!
//! ```text
//! boolean    := boolean OR boolean | boolean AND boolean | NOT boolean | predicated
//! predicated := value predicate?
//! value      := value '||' value | value (+|-) value | value (*|/|%) value
//!             | (+|-) value | value AT TIME ZONE zone | primary
//! primary    := literal | parameter | name | call | special form | primary '[' value ']'
//!             | primary '.' identifier | '(' ... ')'
//! ```
//!
//! Each binary tier is a loop, which keeps every operator left-associative.

use crate::ast::{
    BaseType, BinaryOperator, ComparisonOperator, ComparisonQuantifier, CurrentTimeFunction,
    Expression, FrameBound, FrameUnits, FunctionCall, Literal, LogicalOperator,
    NormalForm, NullOrdering, NullTreatment, Ordering, QualifiedName, Query, SetQuantifier, Sign,
    SortItem, UnaryOperator, WhenClause, Window, WindowFrame,
};
use crate::error::ParseError;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::base::ParseResult;
use crate::parser::primitives::validate_binary_literal;
use crate::parser::{DecimalLiteralTreatment, Parser};

/// Everything that can start a primary expression, as reported when none matches.
const PRIMARY_EXPRESSION_START: &[&str] = &[
    "NULL",
    "TRUE",
    "FALSE",
    "<integer>",
    "<decimal>",
    "<double>",
    "<string>",
    "<binary literal>",
    "'?'",
    "'('",
    "CASE",
    "CAST",
    "TRY_CAST",
    "EXISTS",
    "ARRAY",
    "ROW",
    "INTERVAL",
    "DOUBLE PRECISION",
    "POSITION",
    "SUBSTRING",
    "NORMALIZE",
    "EXTRACT",
    "GROUPING",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "CURRENT_USER",
    "<identifier>",
];

const COMPARISON_OPERATORS: &[&str] = &["'='", "'<>'", "'<'", "'<='", "'>'", "'>='"];

impl Parser<'_> {
    // ========================================================================
    // Boolean tiers
    // ========================================================================

    /// Parses a full expression.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.nested(Self::parse_or_expression)
    }

    /// Parses a boolean expression. Boolean and scalar expressions share one
    /// grammar; the distinction is left to semantic analysis.
    pub(crate) fn parse_boolean_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression()
    }

    fn parse_or_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and_expression()?;

        while self.stream.consume_keyword(Keyword::Or) {
            let right = self.parse_and_expression()?;
            let span = left.span().start..right.span().end;
            left = Expression::Logical(LogicalOperator::Or, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_not_expression()?;

        while self.stream.consume_keyword(Keyword::And) {
            let right = self.parse_not_expression()?;
            let span = left.span().start..right.span().end;
            left = Expression::Logical(LogicalOperator::And, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_not_expression(&mut self) -> ParseResult<Expression> {
        if self.stream.check_keyword(Keyword::Not) {
            let start = self.stream.start();
            self.stream.advance();
            let operand = self.nested(Self::parse_not_expression)?;
            let span = start..operand.span().end;
            Ok(Expression::Not(Box::new(operand), span))
        } else {
            self.parse_predicated()
        }
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    fn parse_predicated(&mut self) -> ParseResult<Expression> {
        let value = self.parse_value_expression()?;
        let start = value.span().start;

        if let Some(operator) = self.comparison_operator() {
            self.stream.advance();
            return self.parse_comparison_rhs(operator, value);
        }

        let negated = self.stream.check_keyword(Keyword::Not)
            && matches!(
                self.stream.peek_kind(1).keyword(),
                Some(Keyword::Between | Keyword::In | Keyword::Like)
            );
        if negated {
            self.stream.advance();
        }

        if self.stream.consume_keyword(Keyword::Between) {
            let low = self.parse_value_expression()?;
            self.stream.expect_keyword(Keyword::And)?;
            let high = self.parse_value_expression()?;
            let span = start..high.span().end;
            return Ok(Expression::Between {
                value: Box::new(value),
                low: Box::new(low),
                high: Box::new(high),
                negated,
                span,
            });
        }

        if self.stream.consume_keyword(Keyword::In) {
            return self.parse_in_rhs(value, negated);
        }

        if self.stream.consume_keyword(Keyword::Like) {
            let pattern = self.parse_value_expression()?;
            let escape = if self.stream.consume_keyword(Keyword::Escape) {
                Some(Box::new(self.parse_value_expression()?))
            } else {
                None
            };
            return Ok(Expression::Like {
                value: Box::new(value),
                pattern: Box::new(pattern),
                escape,
                negated,
                span: self.stream.span_from(start),
            });
        }

        if !negated && self.stream.consume_keyword(Keyword::Is) {
            let negated = self.stream.consume_keyword(Keyword::Not);
            if self.stream.consume_keyword(Keyword::Null) {
                return Ok(Expression::IsNull {
                    value: Box::new(value),
                    negated,
                    span: self.stream.span_from(start),
                });
            }
            self.stream.expect_keyword(Keyword::Distinct)?;
            self.stream.expect_keyword(Keyword::From)?;
            let right = self.parse_value_expression()?;
            let span = start..right.span().end;
            return Ok(Expression::IsDistinctFrom {
                left: Box::new(value),
                right: Box::new(right),
                negated,
                span,
            });
        }

        Ok(value)
    }

    fn comparison_operator(&mut self) -> Option<ComparisonOperator> {
        let operator = match self.stream.current().kind {
            TokenKind::Eq => ComparisonOperator::Equal,
            TokenKind::NotEq => ComparisonOperator::NotEqual,
            TokenKind::Lt => ComparisonOperator::LessThan,
            TokenKind::LtEq => ComparisonOperator::LessThanOrEqual,
            TokenKind::Gt => ComparisonOperator::GreaterThan,
            TokenKind::GtEq => ComparisonOperator::GreaterThanOrEqual,
            _ => {
                self.stream.expecting_all(COMPARISON_OPERATORS);
                return None;
            }
        };
        Some(operator)
    }

    fn parse_comparison_rhs(
        &mut self,
        operator: ComparisonOperator,
        left: Expression,
    ) -> ParseResult<Expression> {
        let start = left.span().start;
        let quantifier = match self.stream.current().kind.keyword() {
            Some(Keyword::All) => Some(ComparisonQuantifier::All),
            Some(Keyword::Any) => Some(ComparisonQuantifier::Any),
            Some(Keyword::Some) => Some(ComparisonQuantifier::Some),
            _ => None,
        };

        if let Some(quantifier) = quantifier {
            if *self.stream.peek_kind(1) == TokenKind::LParen {
                let subquery = self.speculate(|p| {
                    p.stream.advance();
                    p.parse_parenthesized_query()
                })?;
                if let Some(subquery) = subquery {
                    return Ok(Expression::QuantifiedComparison {
                        operator,
                        quantifier,
                        value: Box::new(left),
                        subquery: Box::new(subquery),
                        span: self.stream.span_from(start),
                    });
                }
            }
        }

        let right = self.parse_value_expression()?;
        let span = start..right.span().end;
        Ok(Expression::Comparison(
            operator,
            Box::new(left),
            Box::new(right),
            span,
        ))
    }

    fn parse_in_rhs(&mut self, value: Expression, negated: bool) -> ParseResult<Expression> {
        let start = value.span().start;
        if self.query_follows_parens(0) {
            if let Some(subquery) = self.speculate(Self::parse_parenthesized_query)? {
                return Ok(Expression::InSubquery {
                    value: Box::new(value),
                    subquery: Box::new(subquery),
                    negated,
                    span: self.stream.span_from(start),
                });
            }
        }

        self.stream.expect(&TokenKind::LParen)?;
        let list = self.parse_comma_separated(Self::parse_expression)?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::InList {
            value: Box::new(value),
            list,
            negated,
            span: self.stream.span_from(start),
        })
    }

    /// Parses `'(' query ')'`.
    pub(crate) fn parse_parenthesized_query(&mut self) -> ParseResult<Query> {
        self.stream.expect(&TokenKind::LParen)?;
        let query = self.parse_query()?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(query)
    }

    /// Returns true if, past the run of `(` starting `n` tokens ahead, the
    /// next token starts a query.
    pub(crate) fn query_follows_parens(&self, mut n: usize) -> bool {
        if *self.stream.peek_kind(n) != TokenKind::LParen {
            return false;
        }
        while *self.stream.peek_kind(n) == TokenKind::LParen {
            n += 1;
        }
        matches!(
            self.stream.peek_kind(n).keyword(),
            Some(Keyword::Select | Keyword::With | Keyword::Values | Keyword::Table)
        )
    }

    // ========================================================================
    // Value tiers
    // ========================================================================

    /// Parses a value expression: arithmetic, concatenation and `AT TIME ZONE`
    /// over primaries, without predicates or boolean operators.
    pub(crate) fn parse_value_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_additive()?;

        while self.stream.consume(&TokenKind::Concat) {
            let right = self.parse_additive()?;
            let span = left.span().start..right.span().end;
            left = Expression::Binary(
                BinaryOperator::Concatenate,
                Box::new(left),
                Box::new(right),
                span,
            );
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let operator = if self.stream.consume(&TokenKind::Plus) {
                BinaryOperator::Add
            } else if self.stream.consume(&TokenKind::Minus) {
                BinaryOperator::Subtract
            } else {
                break;
            };
            let right = self.parse_multiplicative()?;
            let span = left.span().start..right.span().end;
            left = Expression::Binary(operator, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let operator = if self.stream.consume(&TokenKind::Star) {
                BinaryOperator::Multiply
            } else if self.stream.consume(&TokenKind::Slash) {
                BinaryOperator::Divide
            } else if self.stream.consume(&TokenKind::Percent) {
                BinaryOperator::Modulus
            } else {
                break;
            };
            let right = self.parse_unary()?;
            let span = left.span().start..right.span().end;
            left = Expression::Binary(operator, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let operator = if self.stream.check(&TokenKind::Plus) {
            UnaryOperator::Plus
        } else if self.stream.check(&TokenKind::Minus) {
            UnaryOperator::Minus
        } else {
            return self.parse_at_time_zone();
        };
        let start = self.stream.start();
        self.stream.advance();
        let operand = self.nested(Self::parse_unary)?;
        let span = start..operand.span().end;
        Ok(Expression::Unary(operator, Box::new(operand), span))
    }

    fn parse_at_time_zone(&mut self) -> ParseResult<Expression> {
        let mut value = self.parse_postfix()?;

        while self.stream.check_keyword(Keyword::At)
            && self.stream.peek_is_keyword(1, Keyword::Time)
            && self.stream.peek_is_keyword(2, Keyword::Zone)
        {
            for _ in 0..3 {
                self.stream.advance();
            }
            let zone = if self.stream.check_keyword(Keyword::Interval) {
                self.parse_interval_literal()?
            } else {
                let (text, span) = self.parse_string()?;
                Expression::Literal(Literal::String(text), span)
            };
            let span = value.span().start..zone.span().end;
            value = Expression::AtTimeZone {
                value: Box::new(value),
                zone: Box::new(zone),
                span,
            };
        }

        Ok(value)
    }

    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        let mut expr = self.parse_primary()?;

        loop {
            if self.stream.consume(&TokenKind::LBracket) {
                let index = self.nested(Self::parse_value_expression)?;
                self.stream.expect(&TokenKind::RBracket)?;
                expr = Expression::Subscript {
                    base: Box::new(expr),
                    index: Box::new(index),
                    span: self.stream.span_from(start),
                };
            } else if self.stream.consume(&TokenKind::Dot) {
                let field = self.parse_identifier()?;
                let span = start..field.span.end;
                expr = Expression::Dereference {
                    base: Box::new(expr),
                    field,
                    span,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        if let Some(expr) = self.parse_non_reserved_special_form()? {
            return Ok(expr);
        }

        let token = self.stream.current();
        let start = token.span.start;
        let next = self.stream.peek_kind(1);

        match &token.kind {
            TokenKind::Keyword(Keyword::Null) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Null, token.span.clone()))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Boolean(true), token.span.clone()))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Boolean(false), token.span.clone()))
            }
            TokenKind::Integer(text) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Integer(text.clone()), token.span.clone()))
            }
            TokenKind::Decimal(text) => {
                let literal = match self.options.decimal_literal_treatment {
                    DecimalLiteralTreatment::AsDouble => Literal::Double(text.clone()),
                    DecimalLiteralTreatment::AsDecimal => Literal::Decimal(text.clone()),
                    DecimalLiteralTreatment::Reject => {
                        return Err(ParseError::invalid(
                            "unexpected decimal literal",
                            token.span.clone(),
                        ));
                    }
                };
                self.stream.advance();
                Ok(Expression::Literal(literal, token.span.clone()))
            }
            TokenKind::Double(text) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Double(text.clone()), token.span.clone()))
            }
            TokenKind::String(_) | TokenKind::UnicodeString(_) => {
                let (value, span) = self.parse_string()?;
                Ok(Expression::Literal(Literal::String(value), span))
            }
            TokenKind::BinaryLiteral(digits) => {
                let hex = validate_binary_literal(digits, token.span.clone())?;
                self.stream.advance();
                Ok(Expression::Literal(Literal::Binary(hex), token.span.clone()))
            }
            TokenKind::QuestionMark => {
                self.stream.advance();
                let index = self.parameter_count;
                self.parameter_count += 1;
                Ok(Expression::Parameter(index, token.span.clone()))
            }
            TokenKind::LParen => self.parse_parenthesized_expression(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(false),
            TokenKind::Keyword(Keyword::Exists) => {
                self.stream.advance();
                let query = self.parse_parenthesized_query()?;
                Ok(Expression::Exists(Box::new(query), self.stream.span_from(start)))
            }
            TokenKind::Keyword(Keyword::Array) if *next == TokenKind::LBracket => {
                self.stream.advance();
                self.stream.advance();
                let elements = if self.stream.check(&TokenKind::RBracket) {
                    Vec::new()
                } else {
                    self.parse_comma_separated(Self::parse_expression)?
                };
                self.stream.expect(&TokenKind::RBracket)?;
                Ok(Expression::Array(elements, self.stream.span_from(start)))
            }
            TokenKind::Keyword(Keyword::Row) if *next == TokenKind::LParen => {
                self.stream.advance();
                self.stream.advance();
                let fields = self.parse_comma_separated(Self::parse_expression)?;
                self.stream.expect(&TokenKind::RParen)?;
                Ok(Expression::Row(fields, self.stream.span_from(start)))
            }
            TokenKind::Keyword(Keyword::Interval)
                if next.is_string() || matches!(next, TokenKind::Plus | TokenKind::Minus) =>
            {
                self.parse_interval_literal()
            }
            TokenKind::DoublePrecision => {
                self.stream.advance();
                let (value, _) = self.parse_string()?;
                Ok(Expression::Literal(
                    Literal::Typed {
                        data_type: BaseType::DoublePrecision,
                        value,
                    },
                    self.stream.span_from(start),
                ))
            }
            TokenKind::Keyword(Keyword::CurrentDate) => {
                self.stream.advance();
                Ok(Expression::CurrentTime {
                    function: CurrentTimeFunction::CurrentDate,
                    precision: None,
                    span: token.span.clone(),
                })
            }
            TokenKind::Keyword(Keyword::CurrentTime) => {
                self.parse_current_time(CurrentTimeFunction::CurrentTime)
            }
            TokenKind::Keyword(Keyword::CurrentTimestamp) => {
                self.parse_current_time(CurrentTimeFunction::CurrentTimestamp)
            }
            TokenKind::Keyword(Keyword::Localtime) => {
                self.parse_current_time(CurrentTimeFunction::Localtime)
            }
            TokenKind::Keyword(Keyword::Localtimestamp) => {
                self.parse_current_time(CurrentTimeFunction::Localtimestamp)
            }
            TokenKind::Keyword(Keyword::CurrentUser) => {
                self.stream.advance();
                Ok(Expression::CurrentUser(token.span.clone()))
            }
            TokenKind::Keyword(Keyword::Normalize) => self.parse_normalize(),
            TokenKind::Keyword(Keyword::Extract) => self.parse_extract(),
            TokenKind::Keyword(Keyword::Grouping) => {
                self.stream.advance();
                self.stream.expect(&TokenKind::LParen)?;
                let columns = if self.stream.check(&TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_comma_separated(Self::parse_qualified_name)?
                };
                self.stream.expect(&TokenKind::RParen)?;
                Ok(Expression::Grouping(columns, self.stream.span_from(start)))
            }
            _ if self.at_identifier() => self.parse_identifier_primary(),
            _ => {
                self.stream.expecting_all(PRIMARY_EXPRESSION_START);
                Err(self.stream.unexpected())
            }
        }
    }

    /// `TRY_CAST`, `POSITION` and `SUBSTRING` are non-reserved: their special
    /// syntax is tried first and an ordinary call is parsed if it does not fit.
    fn parse_non_reserved_special_form(&mut self) -> ParseResult<Option<Expression>> {
        if *self.stream.peek_kind(1) != TokenKind::LParen {
            return Ok(None);
        }
        match self.stream.current().kind.keyword() {
            Some(Keyword::TryCast) => self.speculate(|p| p.parse_cast(true)),
            Some(Keyword::Position) => self.speculate(Self::parse_position),
            Some(Keyword::Substring) => self.speculate(Self::parse_substring),
            _ => Ok(None),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();

        if self.lambda_follows() {
            let parameters = if *self.stream.peek_kind(1) == TokenKind::RParen {
                self.stream.advance();
                self.stream.advance();
                Vec::new()
            } else {
                self.parse_identifier_list()?
            };
            self.stream.expect(&TokenKind::Arrow)?;
            let body = self.parse_expression()?;
            let span = start..body.span().end;
            return Ok(Expression::Lambda {
                parameters,
                body: Box::new(body),
                span,
            });
        }

        if self.query_follows_parens(0) {
            if let Some(query) = self.speculate(Self::parse_parenthesized_query)? {
                return Ok(Expression::Subquery(
                    Box::new(query),
                    self.stream.span_from(start),
                ));
            }
        }

        self.stream.expect(&TokenKind::LParen)?;
        let first = self.parse_expression()?;
        if self.stream.consume(&TokenKind::Comma) {
            let mut fields = vec![first];
            fields.extend(self.parse_comma_separated(Self::parse_expression)?);
            self.stream.expect(&TokenKind::RParen)?;
            return Ok(Expression::Row(fields, self.stream.span_from(start)));
        }
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::Parenthesized(
            Box::new(first),
            self.stream.span_from(start),
        ))
    }

    /// Matches `'(' [identifier (',' identifier)*] ')' '->'` without consuming.
    fn lambda_follows(&self) -> bool {
        let mut n = 1;
        if *self.stream.peek_kind(n) != TokenKind::RParen {
            loop {
                if !self.stream.peek_kind(n).is_identifier_like() {
                    return false;
                }
                n += 1;
                match self.stream.peek_kind(n) {
                    TokenKind::Comma => n += 1,
                    TokenKind::RParen => break,
                    _ => return false,
                }
            }
        }
        *self.stream.peek_kind(n + 1) == TokenKind::Arrow
    }

    /// Parses what follows an identifier-like token: a lambda, a typed
    /// literal, a function call or a plain reference.
    fn parse_identifier_primary(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        let next = self.stream.peek_kind(1);

        if *next == TokenKind::Arrow {
            let parameter = self.parse_identifier()?;
            self.stream.advance();
            let body = self.parse_expression()?;
            let span = start..body.span().end;
            return Ok(Expression::Lambda {
                parameters: vec![parameter],
                body: Box::new(body),
                span,
            });
        }

        if next.is_string() {
            let name = self.parse_identifier()?;
            let (value, _) = self.parse_string()?;
            return Ok(Expression::Literal(
                Literal::Typed {
                    data_type: BaseType::Named(QualifiedName::new(vec![name])),
                    value,
                },
                self.stream.span_from(start),
            ));
        }

        if self.function_call_follows() {
            return self.parse_function_call();
        }

        Ok(Expression::Identifier(self.parse_identifier()?))
    }

    /// Matches `identifier ('.' identifier)* '('` without consuming.
    fn function_call_follows(&self) -> bool {
        let mut n = 0;
        loop {
            if !self.stream.peek_kind(n).is_identifier_like() {
                return false;
            }
            n += 1;
            match self.stream.peek_kind(n) {
                TokenKind::Dot => n += 1,
                TokenKind::LParen => return true,
                _ => return false,
            }
        }
    }

    fn parse_interval_literal(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Interval)?;
        let sign = if self.stream.consume(&TokenKind::Minus) {
            Sign::Negative
        } else {
            self.stream.consume(&TokenKind::Plus);
            Sign::Positive
        };
        let (value, _) = self.parse_string()?;
        let from = self.parse_interval_field()?;
        let to = if self.stream.consume_keyword(Keyword::To) {
            Some(self.parse_interval_field()?)
        } else {
            None
        };
        Ok(Expression::Literal(
            Literal::Interval {
                sign,
                value,
                from,
                to,
            },
            self.stream.span_from(start),
        ))
    }

    fn parse_case(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Case)?;

        let operand = if self.stream.check_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let mut when_clauses = Vec::new();
        while self.stream.check_keyword(Keyword::When) {
            let clause_start = self.stream.start();
            self.stream.advance();
            let condition = self.parse_expression()?;
            self.stream.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            when_clauses.push(WhenClause {
                operand: condition,
                result,
                span: self.stream.span_from(clause_start),
            });
        }
        if when_clauses.is_empty() {
            return Err(self.stream.unexpected());
        }

        let else_result = if self.stream.consume_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.stream.expect_keyword(Keyword::End)?;
        let span = self.stream.span_from(start);

        Ok(match operand {
            Some(operand) => Expression::SimpleCase {
                operand: Box::new(operand),
                when_clauses,
                else_result,
                span,
            },
            None => Expression::SearchedCase {
                when_clauses,
                else_result,
                span,
            },
        })
    }

    fn parse_cast(&mut self, safe: bool) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.advance();
        self.stream.expect(&TokenKind::LParen)?;
        let value = self.parse_expression()?;
        self.stream.expect_keyword(Keyword::As)?;
        let data_type = self.parse_type()?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::Cast {
            value: Box::new(value),
            data_type,
            safe,
            span: self.stream.span_from(start),
        })
    }

    fn parse_position(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.advance();
        self.stream.expect(&TokenKind::LParen)?;
        let needle = self.parse_value_expression()?;
        self.stream.expect_keyword(Keyword::In)?;
        let haystack = self.parse_value_expression()?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::Position {
            needle: Box::new(needle),
            haystack: Box::new(haystack),
            span: self.stream.span_from(start),
        })
    }

    fn parse_substring(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.advance();
        self.stream.expect(&TokenKind::LParen)?;
        let value = self.parse_value_expression()?;
        self.stream.expect_keyword(Keyword::From)?;
        let from = self.parse_value_expression()?;
        let length = if self.stream.consume_keyword(Keyword::For) {
            Some(Box::new(self.parse_value_expression()?))
        } else {
            None
        };
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::Substring {
            value: Box::new(value),
            start: Box::new(from),
            length,
            span: self.stream.span_from(start),
        })
    }

    fn parse_normalize(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.advance();
        self.stream.expect(&TokenKind::LParen)?;
        let value = self.parse_value_expression()?;
        let form = if self.stream.consume(&TokenKind::Comma) {
            let form = match self.stream.current().kind.keyword() {
                Some(Keyword::Nfc) => NormalForm::Nfc,
                Some(Keyword::Nfd) => NormalForm::Nfd,
                Some(Keyword::Nfkc) => NormalForm::Nfkc,
                Some(Keyword::Nfkd) => NormalForm::Nfkd,
                _ => {
                    self.stream.expecting_all(&["NFC", "NFD", "NFKC", "NFKD"]);
                    return Err(self.stream.unexpected());
                }
            };
            self.stream.advance();
            Some(form)
        } else {
            None
        };
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::Normalize {
            value: Box::new(value),
            form,
            span: self.stream.span_from(start),
        })
    }

    fn parse_extract(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.advance();
        self.stream.expect(&TokenKind::LParen)?;
        let field = self.parse_identifier()?;
        self.stream.expect_keyword(Keyword::From)?;
        let value = self.parse_value_expression()?;
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Expression::Extract {
            field,
            value: Box::new(value),
            span: self.stream.span_from(start),
        })
    }

    fn parse_current_time(&mut self, function: CurrentTimeFunction) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.advance();
        let precision = if self.stream.consume(&TokenKind::LParen) {
            let (precision, _) = self.parse_integer()?;
            self.stream.expect(&TokenKind::RParen)?;
            Some(precision)
        } else {
            None
        };
        Ok(Expression::CurrentTime {
            function,
            precision,
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // Function calls and windows
    // ========================================================================

    fn parse_function_call(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        let name = self.parse_qualified_name()?;
        self.stream.expect(&TokenKind::LParen)?;

        let mut quantifier = None;
        let mut arguments = Vec::new();
        let mut wildcard = false;
        let mut order_by = Vec::new();

        if self.stream.current().kind == TokenKind::Star
            && *self.stream.peek_kind(1) == TokenKind::RParen
        {
            self.stream.advance();
            wildcard = true;
        } else if !self.stream.check(&TokenKind::RParen) {
            quantifier = self.parse_set_quantifier();
            arguments = self.parse_comma_separated(Self::parse_expression)?;
            if self.stream.consume_keywords(&[Keyword::Order, Keyword::By]) {
                order_by = self.parse_sort_item_list()?;
            }
        }
        self.stream.expect(&TokenKind::RParen)?;

        let filter = if self.stream.check_keyword(Keyword::Filter)
            && *self.stream.peek_kind(1) == TokenKind::LParen
        {
            self.stream.advance();
            self.stream.advance();
            self.stream.expect_keyword(Keyword::Where)?;
            let condition = self.parse_boolean_expression()?;
            self.stream.expect(&TokenKind::RParen)?;
            Some(Box::new(condition))
        } else {
            None
        };

        let null_treatment = match self.stream.current().kind.keyword() {
            Some(Keyword::Ignore) if self.stream.peek_is_keyword(1, Keyword::Nulls) => {
                Some(NullTreatment::Ignore)
            }
            Some(Keyword::Respect) if self.stream.peek_is_keyword(1, Keyword::Nulls) => {
                Some(NullTreatment::Respect)
            }
            _ => None,
        };
        if null_treatment.is_some() {
            self.stream.advance();
            self.stream.advance();
        }

        let window = if null_treatment.is_some() {
            self.stream.expect_keyword(Keyword::Over)?;
            Some(self.parse_window_specification()?)
        } else if self.stream.consume_keyword(Keyword::Over) {
            Some(self.parse_window_specification()?)
        } else {
            None
        };

        Ok(Expression::FunctionCall(Box::new(FunctionCall {
            name,
            quantifier,
            arguments,
            wildcard,
            order_by,
            filter,
            null_treatment,
            window,
            span: self.stream.span_from(start),
        })))
    }

    /// Parses an optional `ALL` / `DISTINCT`.
    ///
    /// `ALL` is non-reserved, so it is only taken as a quantifier when the
    /// next token cannot follow a column named `all`.
    pub(crate) fn parse_set_quantifier(&mut self) -> Option<SetQuantifier> {
        if self.stream.consume_keyword(Keyword::Distinct) {
            return Some(SetQuantifier::Distinct);
        }
        if self.stream.check_keyword(Keyword::All) && all_is_quantifier(self.stream.peek_kind(1)) {
            self.stream.advance();
            return Some(SetQuantifier::All);
        }
        None
    }

    fn parse_window_specification(&mut self) -> ParseResult<Window> {
        let start = self.stream.start();
        self.stream.expect(&TokenKind::LParen)?;

        let partition_by = if self.stream.consume_keywords(&[Keyword::Partition, Keyword::By]) {
            self.parse_comma_separated(Self::parse_expression)?
        } else {
            Vec::new()
        };
        let order_by = if self.stream.consume_keywords(&[Keyword::Order, Keyword::By]) {
            self.parse_sort_item_list()?
        } else {
            Vec::new()
        };
        let frame = self.parse_window_frame()?;

        self.stream.expect(&TokenKind::RParen)?;
        Ok(Window {
            partition_by,
            order_by,
            frame,
            span: self.stream.span_from(start),
        })
    }

    fn parse_window_frame(&mut self) -> ParseResult<Option<WindowFrame>> {
        let start = self.stream.start();
        let units = if self.stream.consume_keyword(Keyword::Range) {
            FrameUnits::Range
        } else if self.stream.consume_keyword(Keyword::Rows) {
            FrameUnits::Rows
        } else if self.stream.consume_keyword(Keyword::Groups) {
            FrameUnits::Groups
        } else {
            return Ok(None);
        };

        let between = self.stream.consume_keyword(Keyword::Between);
        let (start_bound, end_bound) = if between {
            let lower = self.parse_frame_bound()?;
            self.stream.expect_keyword(Keyword::And)?;
            (lower, self.parse_frame_bound()?)
        } else {
            (self.parse_frame_bound()?, FrameBound::CurrentRow)
        };

        Ok(Some(WindowFrame {
            units,
            start: start_bound,
            end: end_bound,
            between,
            span: self.stream.span_from(start),
        }))
    }

    fn parse_frame_bound(&mut self) -> ParseResult<FrameBound> {
        if self.stream.check_keyword(Keyword::Unbounded) {
            if self.stream.peek_is_keyword(1, Keyword::Preceding) {
                self.stream.advance();
                self.stream.advance();
                return Ok(FrameBound::UnboundedPreceding);
            }
            if self.stream.peek_is_keyword(1, Keyword::Following) {
                self.stream.advance();
                self.stream.advance();
                return Ok(FrameBound::UnboundedFollowing);
            }
        }
        if self.stream.consume_keywords(&[Keyword::Current, Keyword::Row]) {
            return Ok(FrameBound::CurrentRow);
        }

        let offset = self.parse_expression()?;
        if self.stream.consume_keyword(Keyword::Preceding) {
            Ok(FrameBound::Preceding(Box::new(offset)))
        } else {
            self.stream.expect_keyword(Keyword::Following)?;
            Ok(FrameBound::Following(Box::new(offset)))
        }
    }

    // ========================================================================
    // Sort items
    // ========================================================================

    /// Parses `expression [ASC | DESC] [NULLS (FIRST | LAST)]`.
    pub(crate) fn parse_sort_item(&mut self) -> ParseResult<SortItem> {
        let start = self.stream.start();
        let key = self.parse_expression()?;

        let ordering = if self.stream.consume_keyword(Keyword::Asc) {
            Some(Ordering::Ascending)
        } else if self.stream.consume_keyword(Keyword::Desc) {
            Some(Ordering::Descending)
        } else {
            None
        };

        let null_ordering = if self.stream.consume_keyword(Keyword::Nulls) {
            if self.stream.consume_keyword(Keyword::First) {
                Some(NullOrdering::First)
            } else {
                self.stream.expect_keyword(Keyword::Last)?;
                Some(NullOrdering::Last)
            }
        } else {
            None
        };

        Ok(SortItem {
            key,
            ordering,
            null_ordering,
            span: self.stream.span_from(start),
        })
    }

    pub(crate) fn parse_sort_item_list(&mut self) -> ParseResult<Vec<SortItem>> {
        self.parse_comma_separated(Self::parse_sort_item)
    }
}

fn all_is_quantifier(next: &TokenKind) -> bool {
    !matches!(
        next,
        TokenKind::RParen
            | TokenKind::Comma
            | TokenKind::Dot
            | TokenKind::LBracket
            | TokenKind::Semicolon
            | TokenKind::Eof
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Concat
            | TokenKind::Keyword(Keyword::From | Keyword::As)
    )
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ParseErrorKind;
    use crate::parser::{DecimalLiteralTreatment, ParserOptions, SqlParser};
    use crate::{parse_expression, parse_sort_items};

    fn ident(expr: &Expression) -> &str {
        match expr {
            Expression::Identifier(id) => id.value.as_str(),
            other => panic!("expected identifier, got {other:?}"),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        let Expression::Binary(BinaryOperator::Subtract, left, right, span) =
            parse_expression("a - b - c").unwrap()
        else {
            panic!("expected subtraction");
        };
        assert_eq!(span, 0..9);
        assert_eq!(ident(&right), "c");
        assert!(matches!(
            *left,
            Expression::Binary(BinaryOperator::Subtract, _, _, ref inner) if *inner == (0..5)
        ));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let Expression::Logical(LogicalOperator::Or, left, right, _) =
            parse_expression("a OR b AND c").unwrap()
        else {
            panic!("expected OR at the root");
        };
        assert_eq!(ident(&left), "a");
        assert!(matches!(*right, Expression::Logical(LogicalOperator::And, ..)));
    }

    #[test]
    fn comparisons_bind_tighter_than_and() {
        let Expression::Logical(LogicalOperator::And, left, right, _) =
            parse_expression("a = b AND c = d").unwrap()
        else {
            panic!("expected AND at the root");
        };
        assert!(matches!(*left, Expression::Comparison(ComparisonOperator::Equal, ..)));
        assert!(matches!(*right, Expression::Comparison(ComparisonOperator::Equal, ..)));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Expression::Binary(BinaryOperator::Add, left, right, _) =
            parse_expression("1 + 2 * 3").unwrap()
        else {
            panic!("expected addition at the root");
        };
        assert!(matches!(*left, Expression::Literal(Literal::Integer(ref v), _) if v == "1"));
        assert!(matches!(*right, Expression::Binary(BinaryOperator::Multiply, ..)));
    }

    #[test]
    fn concatenation_is_loosest_value_operator() {
        let parsed = parse_expression("a || b + 1").unwrap();
        let Expression::Binary(BinaryOperator::Concatenate, _, right, _) = parsed else {
            panic!("expected concatenation");
        };
        assert!(matches!(*right, Expression::Binary(BinaryOperator::Add, ..)));
    }

    #[test]
    fn unary_minus_and_not() {
        let parsed = parse_expression("NOT -x > 1").unwrap();
        let Expression::Not(inner, span) = parsed else {
            panic!("expected NOT");
        };
        assert_eq!(span, 0..10);
        let Expression::Comparison(ComparisonOperator::GreaterThan, left, ..) = *inner else {
            panic!("expected comparison");
        };
        assert!(matches!(*left, Expression::Unary(UnaryOperator::Minus, ..)));
    }

    #[test]
    fn parameters_are_numbered_in_order() {
        let parsed = parse_expression("f(?, ?) + ?").unwrap();
        let Expression::Binary(_, left, right, _) = parsed else {
            panic!("expected binary");
        };
        let Expression::FunctionCall(call) = *left else {
            panic!("expected call");
        };
        assert!(matches!(call.arguments[0], Expression::Parameter(0, _)));
        assert!(matches!(call.arguments[1], Expression::Parameter(1, _)));
        assert!(matches!(*right, Expression::Parameter(2, _)));
    }

    #[test]
    fn parenthesized_row_and_subquery() {
        assert!(matches!(
            parse_expression("(a)").unwrap(),
            Expression::Parenthesized(_, ref span) if *span == (0..3)
        ));
        assert!(matches!(
            parse_expression("(1, 'x', b)").unwrap(),
            Expression::Row(ref fields, _) if fields.len() == 3
        ));
        assert!(matches!(
            parse_expression("(SELECT 1)").unwrap(),
            Expression::Subquery(..)
        ));
        let Expression::Binary(BinaryOperator::Add, left, ..) =
            parse_expression("((SELECT 1) + 1)").map(|e| match e {
                Expression::Parenthesized(inner, _) => *inner,
                other => other,
            })
            .unwrap()
        else {
            panic!("expected addition");
        };
        assert!(matches!(*left, Expression::Subquery(..)));
    }

    #[test]
    fn lambdas() {
        let Expression::FunctionCall(call) = parse_expression("transform(xs, x -> x * 2)").unwrap()
        else {
            panic!("expected call");
        };
        assert!(matches!(
            &call.arguments[1],
            Expression::Lambda { parameters, .. } if parameters.len() == 1
        ));
        assert!(matches!(
            parse_expression("(a, b) -> a + b").unwrap(),
            Expression::Lambda { ref parameters, .. } if parameters.len() == 2
        ));
        assert!(matches!(
            parse_expression("() -> 1").unwrap(),
            Expression::Lambda { ref parameters, .. } if parameters.is_empty()
        ));
    }

    #[test]
    fn predicates() {
        assert!(matches!(
            parse_expression("x NOT BETWEEN 1 AND 2 + 3").unwrap(),
            Expression::Between { negated: true, .. }
        ));
        assert!(matches!(
            parse_expression("x IN (1, 2, 3)").unwrap(),
            Expression::InList { ref list, negated: false, .. } if list.len() == 3
        ));
        assert!(matches!(
            parse_expression("x NOT IN (SELECT y FROM t)").unwrap(),
            Expression::InSubquery { negated: true, .. }
        ));
        assert!(matches!(
            parse_expression("x IN ((SELECT 1), 2)").unwrap(),
            Expression::InList { ref list, .. } if list.len() == 2
        ));
        assert!(matches!(
            parse_expression("name LIKE 'a!%' ESCAPE '!'").unwrap(),
            Expression::Like { escape: Some(_), negated: false, .. }
        ));
        assert!(matches!(
            parse_expression("x IS NOT NULL").unwrap(),
            Expression::IsNull { negated: true, ref span, .. } if *span == (0..13)
        ));
        assert!(matches!(
            parse_expression("x IS DISTINCT FROM y").unwrap(),
            Expression::IsDistinctFrom { negated: false, .. }
        ));
    }

    #[test]
    fn quantified_comparison_falls_back_to_function_call() {
        assert!(matches!(
            parse_expression("x > ALL (SELECT y FROM t)").unwrap(),
            Expression::QuantifiedComparison {
                quantifier: ComparisonQuantifier::All,
                ..
            }
        ));
        let Expression::Comparison(_, _, right, _) = parse_expression("x = any(1)").unwrap() else {
            panic!("expected plain comparison");
        };
        assert!(matches!(*right, Expression::FunctionCall(_)));
    }

    #[test]
    fn special_forms_and_their_fallbacks() {
        assert!(matches!(
            parse_expression("TRY_CAST(x AS bigint)").unwrap(),
            Expression::Cast { safe: true, .. }
        ));
        assert!(matches!(
            parse_expression("try_cast(x)").unwrap(),
            Expression::FunctionCall(_)
        ));
        assert!(matches!(
            parse_expression("POSITION('a' IN s)").unwrap(),
            Expression::Position { .. }
        ));
        assert!(matches!(
            parse_expression("position(s, 'a')").unwrap(),
            Expression::FunctionCall(_)
        ));
        assert!(matches!(
            parse_expression("SUBSTRING(s FROM 2 FOR 3)").unwrap(),
            Expression::Substring { length: Some(_), .. }
        ));
        assert!(matches!(
            parse_expression("substring(s, 2)").unwrap(),
            Expression::FunctionCall(_)
        ));
        assert!(matches!(
            parse_expression("NORMALIZE(s, NFKC)").unwrap(),
            Expression::Normalize { form: Some(NormalForm::Nfkc), .. }
        ));
        assert!(matches!(
            parse_expression("EXTRACT(year FROM d)").unwrap(),
            Expression::Extract { .. }
        ));
        assert!(matches!(
            parse_expression("CURRENT_TIMESTAMP(3)").unwrap(),
            Expression::CurrentTime {
                function: CurrentTimeFunction::CurrentTimestamp,
                precision: Some(_),
                ..
            }
        ));
        assert!(matches!(
            parse_expression("GROUPING(a, t.b)").unwrap(),
            Expression::Grouping(ref columns, _) if columns.len() == 2
        ));
    }

    #[test]
    fn case_expressions() {
        assert!(matches!(
            parse_expression("CASE x WHEN 1 THEN 'a' WHEN 2 THEN 'b' ELSE 'c' END").unwrap(),
            Expression::SimpleCase { ref when_clauses, else_result: Some(_), .. }
                if when_clauses.len() == 2
        ));
        assert!(matches!(
            parse_expression("CASE WHEN x > 1 THEN 1 END").unwrap(),
            Expression::SearchedCase { else_result: None, .. }
        ));
        assert!(parse_expression("CASE x END").is_err());
    }

    #[test]
    fn literals() {
        assert!(matches!(
            parse_expression("DATE '2020-01-01'").unwrap(),
            Expression::Literal(Literal::Typed { data_type: BaseType::Named(_), .. }, _)
        ));
        assert!(matches!(
            parse_expression("DOUBLE PRECISION '1.5'").unwrap(),
            Expression::Literal(Literal::Typed { data_type: BaseType::DoublePrecision, .. }, _)
        ));
        assert!(matches!(
            parse_expression("INTERVAL -'3' DAY TO HOUR").unwrap(),
            Expression::Literal(
                Literal::Interval { sign: Sign::Negative, to: Some(IntervalField::Hour), .. },
                _
            )
        ));
        assert!(matches!(
            parse_expression("X'00ff'").unwrap(),
            Expression::Literal(Literal::Binary(ref hex), _) if hex == "00ff"
        ));
        assert!(parse_expression("X'0'").is_err());
        assert!(matches!(
            parse_expression("ARRAY[1, 2]").unwrap(),
            Expression::Array(ref items, _) if items.len() == 2
        ));
        assert!(matches!(
            parse_expression("ROW(1, 'a')").unwrap(),
            Expression::Row(ref items, _) if items.len() == 2
        ));
    }

    #[test]
    fn decimal_literal_treatment() {
        assert!(matches!(
            parse_expression("1.5").unwrap(),
            Expression::Literal(Literal::Double(_), _)
        ));
        let decimal =
            SqlParser::new(ParserOptions::default().with_decimal_literal_treatment(
                DecimalLiteralTreatment::AsDecimal,
            ));
        assert!(matches!(
            decimal.parse_expression("1.5").unwrap(),
            Expression::Literal(Literal::Decimal(_), _)
        ));
        let reject = SqlParser::new(
            ParserOptions::default().with_decimal_literal_treatment(DecimalLiteralTreatment::Reject),
        );
        let error = reject.parse_expression("1.5").unwrap_err();
        assert_eq!(error.to_string(), "unexpected decimal literal");
        assert!(matches!(
            reject.parse_expression("1E5").unwrap(),
            Expression::Literal(Literal::Double(_), _)
        ));
    }

    #[test]
    fn postfix_subscript_dereference_and_time_zone() {
        let parsed = parse_expression("a.b[1].c").unwrap();
        let Expression::Dereference { base, field, span } = parsed else {
            panic!("expected dereference");
        };
        assert_eq!(field.value, "c");
        assert_eq!(span, 0..8);
        assert!(matches!(*base, Expression::Subscript { .. }));

        assert!(matches!(
            parse_expression("ts AT TIME ZONE 'UTC'").unwrap(),
            Expression::AtTimeZone { .. }
        ));
        assert!(matches!(
            parse_expression("ts AT TIME ZONE INTERVAL '1' HOUR").unwrap(),
            Expression::AtTimeZone { .. }
        ));
    }

    #[test]
    fn aggregate_and_window_calls() {
        let Expression::FunctionCall(call) = parse_expression(
            "sum(DISTINCT x ORDER BY y) FILTER (WHERE x > 0) \
             IGNORE NULLS OVER (PARTITION BY k ORDER BY t DESC NULLS LAST \
             ROWS BETWEEN UNBOUNDED PRECEDING AND 1 FOLLOWING)",
        )
        .unwrap() else {
            panic!("expected call");
        };
        assert_eq!(call.quantifier, Some(SetQuantifier::Distinct));
        assert_eq!(call.order_by.len(), 1);
        assert!(call.filter.is_some());
        assert_eq!(call.null_treatment, Some(NullTreatment::Ignore));
        let window = call.window.unwrap();
        assert_eq!(window.partition_by.len(), 1);
        assert_eq!(window.order_by[0].ordering, Some(Ordering::Descending));
        assert_eq!(window.order_by[0].null_ordering, Some(NullOrdering::Last));
        let frame = window.frame.unwrap();
        assert_eq!(frame.units, FrameUnits::Rows);
        assert!(frame.between);
        assert_eq!(frame.start, FrameBound::UnboundedPreceding);
        assert!(matches!(frame.end, FrameBound::Following(_)));

        let Expression::FunctionCall(call) =
            parse_expression("count(*) OVER (RANGE 5 PRECEDING)").unwrap()
        else {
            panic!("expected call");
        };
        assert!(call.wildcard);
        let frame = call.window.unwrap().frame.unwrap();
        assert!(!frame.between);
        assert_eq!(frame.end, FrameBound::CurrentRow);
    }

    #[test]
    fn all_as_argument_name() {
        let Expression::FunctionCall(call) = parse_expression("f(all)").unwrap() else {
            panic!("expected call");
        };
        assert_eq!(call.quantifier, None);
        assert_eq!(ident(&call.arguments[0]), "all");
    }

    #[test]
    fn sort_items() {
        let items = parse_sort_items("a, b DESC, c NULLS FIRST").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].ordering, Some(Ordering::Descending));
        assert_eq!(items[2].null_ordering, Some(NullOrdering::First));
        assert_eq!(items[1].span, 3..9);
    }

    #[test]
    fn missing_operand_reports_primary_alternatives() {
        let error = parse_expression("1 +").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnexpectedEndOfInput { .. }));
        for expected in ["<identifier>", "'('", "CASE", "<integer>"] {
            assert!(error.expected().contains(&expected), "missing {expected}");
        }
    }
}
