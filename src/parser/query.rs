//! Query grammar: WITH, set operations, SELECT and the trailing
//! ORDER BY / OFFSET / LIMIT clauses.

use crate::ast::{
    Expression, GroupBy, GroupingElement, Limit, Offset, QualifiedName, Query, QueryBody,
    QuerySpecification, SelectItem, SetOperator, With, WithQuery,
};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

impl Parser<'_> {
    /// Parses `[WITH ...] queryNoWith`.
    pub(crate) fn parse_query(&mut self) -> ParseResult<Query> {
        self.nested(|p| {
            let start = p.stream.start();
            let with = if p.stream.check_keyword(Keyword::With) {
                Some(p.parse_with()?)
            } else {
                None
            };

            let body = p.parse_query_term()?;

            let order_by = if p.stream.consume_keywords(&[Keyword::Order, Keyword::By]) {
                p.parse_sort_item_list()?
            } else {
                Vec::new()
            };
            let offset = p.parse_offset()?;
            let limit = p.parse_limit()?;

            Ok(Query {
                with,
                body,
                order_by,
                offset,
                limit,
                span: p.stream.span_from(start),
            })
        })
    }

    fn parse_with(&mut self) -> ParseResult<With> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::With)?;
        let recursive = self.stream.consume_keyword(Keyword::Recursive);

        let queries = self.parse_comma_separated(|p| {
            let query_start = p.stream.start();
            let name = p.parse_identifier()?;
            let column_names = if p.stream.check(&TokenKind::LParen) {
                p.parse_identifier_list()?
            } else {
                Vec::new()
            };
            p.stream.expect_keyword(Keyword::As)?;
            let query = p.parse_parenthesized_query()?;
            Ok(WithQuery {
                name,
                column_names,
                query: Box::new(query),
                span: p.stream.span_from(query_start),
            })
        })?;

        Ok(With {
            recursive,
            queries,
            span: self.stream.span_from(start),
        })
    }

    fn parse_offset(&mut self) -> ParseResult<Option<Offset>> {
        let start = self.stream.start();
        if !self.stream.consume_keyword(Keyword::Offset) {
            return Ok(None);
        }
        let (count, _) = self.parse_integer()?;
        if !self.stream.consume_keyword(Keyword::Row) {
            self.stream.consume_keyword(Keyword::Rows);
        }
        Ok(Some(Offset {
            count,
            span: self.stream.span_from(start),
        }))
    }

    fn parse_limit(&mut self) -> ParseResult<Option<Limit>> {
        let start = self.stream.start();
        if self.stream.consume_keyword(Keyword::Limit) {
            if self.stream.consume_keyword(Keyword::All) {
                return Ok(Some(Limit::All(self.stream.span_from(start))));
            }
            let (count, _) = self.parse_integer()?;
            return Ok(Some(Limit::Count(count, self.stream.span_from(start))));
        }

        if self.stream.consume_keyword(Keyword::Fetch) {
            self.stream.expect_keyword(Keyword::First)?;
            let (count, _) = self.parse_integer()?;
            if !self.stream.consume_keyword(Keyword::Row) {
                self.stream.expect_keyword(Keyword::Rows)?;
            }
            self.stream.expect_keyword(Keyword::Only)?;
            return Ok(Some(Limit::FetchFirst(count, self.stream.span_from(start))));
        }

        Ok(None)
    }

    // ========================================================================
    // Set operations
    // ========================================================================

    /// `UNION` and `EXCEPT` share the loosest tier.
    fn parse_query_term(&mut self) -> ParseResult<QueryBody> {
        let mut left = self.parse_intersect_term()?;

        loop {
            let operator = if self.stream.consume_keyword(Keyword::Union) {
                SetOperator::Union
            } else if self.stream.consume_keyword(Keyword::Except) {
                SetOperator::Except
            } else {
                break;
            };
            let quantifier = self.parse_set_quantifier();
            let right = self.parse_intersect_term()?;
            let span = left.span().start..right.span().end;
            left = QueryBody::SetOperation {
                operator,
                quantifier,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_intersect_term(&mut self) -> ParseResult<QueryBody> {
        let mut left = self.parse_query_primary()?;

        while self.stream.consume_keyword(Keyword::Intersect) {
            let quantifier = self.parse_set_quantifier();
            let right = self.parse_query_primary()?;
            let span = left.span().start..right.span().end;
            left = QueryBody::SetOperation {
                operator: SetOperator::Intersect,
                quantifier,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_query_primary(&mut self) -> ParseResult<QueryBody> {
        let start = self.stream.start();

        if self.stream.check_keyword(Keyword::Select) {
            let specification = self.parse_query_specification()?;
            return Ok(QueryBody::Specification(Box::new(specification)));
        }

        if self.stream.consume_keyword(Keyword::Table) {
            let name = self.parse_qualified_name()?;
            return Ok(QueryBody::Table(name, self.stream.span_from(start)));
        }

        if self.stream.consume_keyword(Keyword::Values) {
            let rows = self.parse_comma_separated(Self::parse_expression)?;
            return Ok(QueryBody::Values(rows, self.stream.span_from(start)));
        }

        if self.stream.check(&TokenKind::LParen) {
            let query = self.parse_parenthesized_query()?;
            return Ok(QueryBody::Subquery(
                Box::new(query),
                self.stream.span_from(start),
            ));
        }

        Err(self.stream.unexpected())
    }

    // ========================================================================
    // SELECT
    // ========================================================================

    pub(crate) fn parse_query_specification(&mut self) -> ParseResult<QuerySpecification> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Select)?;
        let quantifier = self.parse_set_quantifier();
        let select_items = self.parse_comma_separated(Self::parse_select_item)?;

        let from = if self.stream.consume_keyword(Keyword::From) {
            self.parse_comma_separated(Self::parse_relation)?
        } else {
            Vec::new()
        };

        let where_clause = if self.stream.consume_keyword(Keyword::Where) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };

        let group_by = if self.stream.check_keyword(Keyword::Group) {
            Some(self.parse_group_by()?)
        } else {
            None
        };

        let having = if self.stream.consume_keyword(Keyword::Having) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };

        Ok(QuerySpecification {
            quantifier,
            select_items,
            from,
            where_clause,
            group_by,
            having,
            span: self.stream.span_from(start),
        })
    }

    fn parse_select_item(&mut self) -> ParseResult<SelectItem> {
        let start = self.stream.start();

        if self.stream.consume(&TokenKind::Star) {
            return Ok(SelectItem::AllColumns {
                prefix: None,
                span: self.stream.span_from(start),
            });
        }

        if self.qualified_star_follows() {
            let mut parts = vec![self.parse_identifier()?];
            while *self.stream.peek_kind(1) != TokenKind::Star {
                self.stream.advance();
                parts.push(self.parse_identifier()?);
            }
            self.stream.expect(&TokenKind::Dot)?;
            self.stream.expect(&TokenKind::Star)?;
            return Ok(SelectItem::AllColumns {
                prefix: Some(QualifiedName::new(parts)),
                span: self.stream.span_from(start),
            });
        }

        let expression = self.parse_expression()?;
        let alias = if self.stream.consume_keyword(Keyword::As) || self.at_implicit_alias() {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        Ok(SelectItem::Expression {
            expression,
            alias,
            span: self.stream.span_from(start),
        })
    }

    /// Matches `identifier ('.' identifier)* '.' '*'` without consuming.
    fn qualified_star_follows(&self) -> bool {
        let mut n = 0;
        loop {
            if !self.stream.peek_kind(n).is_identifier_like()
                || *self.stream.peek_kind(n + 1) != TokenKind::Dot
            {
                return false;
            }
            if *self.stream.peek_kind(n + 2) == TokenKind::Star {
                return true;
            }
            n += 2;
        }
    }

    /// Returns true if the current token is an identifier that can serve as
    /// an alias without `AS`.
    ///
    /// Non-reserved words that open a following clause (`LIMIT 10`,
    /// `OFFSET 5`, `FETCH FIRST`, `TABLESAMPLE BERNOULLI`) are not aliases.
    pub(crate) fn at_implicit_alias(&mut self) -> bool {
        if !self.check_identifier() {
            return false;
        }
        let next = self.stream.peek_kind(1);
        match self.stream.current().kind.keyword() {
            Some(Keyword::Limit) => {
                !matches!(next, TokenKind::Integer(_)) && !next.is_keyword(Keyword::All)
            }
            Some(Keyword::Offset) => !matches!(next, TokenKind::Integer(_)),
            Some(Keyword::Fetch) => !next.is_keyword(Keyword::First),
            Some(Keyword::Tablesample) => !matches!(
                next.keyword(),
                Some(Keyword::Bernoulli | Keyword::System)
            ),
            _ => true,
        }
    }

    // ========================================================================
    // GROUP BY
    // ========================================================================

    fn parse_group_by(&mut self) -> ParseResult<GroupBy> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Group)?;
        self.stream.expect_keyword(Keyword::By)?;
        let quantifier = self.parse_set_quantifier();
        let elements = self.parse_comma_separated(Self::parse_grouping_element)?;
        Ok(GroupBy {
            quantifier,
            elements,
            span: self.stream.span_from(start),
        })
    }

    fn parse_grouping_element(&mut self) -> ParseResult<GroupingElement> {
        let start = self.stream.start();

        if self.stream.consume_keyword(Keyword::Rollup) {
            let expressions = self.parse_expression_tuple()?;
            return Ok(GroupingElement::Rollup(expressions, self.stream.span_from(start)));
        }

        if self.stream.consume_keyword(Keyword::Cube) {
            let expressions = self.parse_expression_tuple()?;
            return Ok(GroupingElement::Cube(expressions, self.stream.span_from(start)));
        }

        if self.stream.check_keyword(Keyword::Grouping) && self.stream.peek_is_keyword(1, Keyword::Sets) {
            self.stream.advance();
            self.stream.advance();
            self.stream.expect(&TokenKind::LParen)?;
            let sets = self.parse_comma_separated(Self::parse_grouping_set)?;
            self.stream.expect(&TokenKind::RParen)?;
            return Ok(GroupingElement::GroupingSets(sets, self.stream.span_from(start)));
        }

        let expressions = self.parse_grouping_set()?;
        Ok(GroupingElement::Simple(expressions, self.stream.span_from(start)))
    }

    /// Parses `'(' [expression, ...] ')'` or a single expression.
    ///
    /// A parenthesized list is only taken as a set when a grouping delimiter
    /// follows it; otherwise `(a + 1) * 2` is an ordinary expression.
    fn parse_grouping_set(&mut self) -> ParseResult<Vec<Expression>> {
        if self.stream.check(&TokenKind::LParen) {
            let set = self.speculate(|p| {
                let expressions = p.parse_expression_tuple()?;
                if ends_grouping_set(&p.stream.current().kind) {
                    Ok(expressions)
                } else {
                    Err(p.stream.unexpected())
                }
            })?;
            if let Some(expressions) = set {
                return Ok(expressions);
            }
        }
        Ok(vec![self.parse_expression()?])
    }

    fn parse_expression_tuple(&mut self) -> ParseResult<Vec<Expression>> {
        self.stream.expect(&TokenKind::LParen)?;
        let expressions = if self.stream.check(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_expression)?
        };
        self.stream.expect(&TokenKind::RParen)?;
        Ok(expressions)
    }
}

fn ends_grouping_set(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Comma | TokenKind::RParen | TokenKind::Semicolon | TokenKind::Eof => true,
        TokenKind::Keyword(kw) => matches!(
            kw,
            Keyword::Having
                | Keyword::Order
                | Keyword::Limit
                | Keyword::Offset
                | Keyword::Fetch
                | Keyword::Union
                | Keyword::Except
                | Keyword::Intersect
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ParseErrorKind;
    use crate::parse_statement;

    fn query(sql: &str) -> Query {
        match parse_statement(sql).unwrap() {
            Statement::Query(query) => *query,
            other => panic!("expected query, got {other:?}"),
        }
    }

    fn specification(sql: &str) -> QuerySpecification {
        match query(sql).body {
            QueryBody::Specification(specification) => *specification,
            other => panic!("expected specification, got {other:?}"),
        }
    }

    #[test]
    fn select_literal_without_from() {
        let spec = specification("SELECT 1");
        assert_eq!(spec.select_items.len(), 1);
        assert!(matches!(
            &spec.select_items[0],
            SelectItem::Expression {
                expression: Expression::Literal(Literal::Integer(_), _),
                alias: None,
                ..
            }
        ));
        assert!(spec.from.is_empty());
        assert_eq!(spec.span, 0..8);
    }

    #[test]
    fn full_specification() {
        let query = query("SELECT * FROM a JOIN b ON a.id = b.id WHERE a.x > 1 ORDER BY a.x LIMIT 10");
        assert_eq!(query.order_by.len(), 1);
        assert!(matches!(&query.limit, Some(Limit::Count(count, _)) if count == "10"));
        let QueryBody::Specification(spec) = &query.body else {
            panic!("expected specification");
        };
        assert!(matches!(spec.select_items[0], SelectItem::AllColumns { prefix: None, .. }));
        assert!(matches!(&spec.from[0], Relation::Join(_)));
        assert!(matches!(
            spec.where_clause,
            Some(Expression::Comparison(ComparisonOperator::GreaterThan, ..))
        ));
    }

    #[test]
    fn select_items_with_aliases_and_prefixed_stars() {
        let spec = specification("SELECT t.*, s.x.*, a AS b, c d, e FROM t");
        let items = &spec.select_items;
        assert_eq!(items.len(), 5);
        assert!(matches!(
            &items[0],
            SelectItem::AllColumns { prefix: Some(name), .. } if name.to_string() == "t"
        ));
        assert!(matches!(
            &items[1],
            SelectItem::AllColumns { prefix: Some(name), .. } if name.parts.len() == 2
        ));
        assert!(matches!(&items[2], SelectItem::Expression { alias: Some(a), .. } if a.value == "b"));
        assert!(matches!(&items[3], SelectItem::Expression { alias: Some(a), .. } if a.value == "d"));
        assert!(matches!(&items[4], SelectItem::Expression { alias: None, .. }));
    }

    #[test]
    fn non_reserved_words_are_columns() {
        let spec = specification("SELECT role FROM t");
        assert!(matches!(
            &spec.select_items[0],
            SelectItem::Expression { expression: Expression::Identifier(id), .. } if id.value == "role"
        ));
        assert!(parse_statement("SELECT select FROM t").is_err());
    }

    #[test]
    fn intersect_binds_tighter_than_union() {
        let query = query("SELECT 1 UNION ALL SELECT 2 INTERSECT SELECT 3 EXCEPT SELECT 4");
        let QueryBody::SetOperation { operator, left, .. } = &query.body else {
            panic!("expected set operation");
        };
        assert_eq!(*operator, SetOperator::Except);
        let QueryBody::SetOperation {
            operator,
            quantifier,
            right,
            ..
        } = left.as_ref()
        else {
            panic!("expected nested set operation");
        };
        assert_eq!(*operator, SetOperator::Union);
        assert_eq!(*quantifier, Some(SetQuantifier::All));
        assert!(matches!(
            right.as_ref(),
            QueryBody::SetOperation { operator: SetOperator::Intersect, .. }
        ));
    }

    #[test]
    fn with_clause_and_query_primaries() {
        let query = query(
            "WITH RECURSIVE r (n) AS (VALUES 1), s AS (TABLE r) \
             SELECT * FROM r UNION (SELECT * FROM s)",
        );
        let with = query.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.queries.len(), 2);
        assert_eq!(with.queries[0].column_names.len(), 1);
        assert!(matches!(with.queries[0].query.body, QueryBody::Values(..)));
        assert!(matches!(with.queries[1].query.body, QueryBody::Table(..)));
        assert!(matches!(
            query.body,
            QueryBody::SetOperation { ref right, .. } if matches!(right.as_ref(), QueryBody::Subquery(..))
        ));
    }

    #[test]
    fn offset_limit_and_fetch() {
        let query = query("SELECT x FROM t ORDER BY x DESC OFFSET 5 ROWS FETCH FIRST 10 ROWS ONLY");
        assert!(matches!(&query.offset, Some(Offset { count, .. }) if count == "5"));
        assert!(matches!(&query.limit, Some(Limit::FetchFirst(count, _)) if count == "10"));
        let query = self::query("SELECT x FROM t LIMIT ALL");
        assert!(matches!(query.limit, Some(Limit::All(_))));
    }

    #[test]
    fn group_by_forms() {
        let spec = specification(
            "SELECT k FROM t GROUP BY DISTINCT (a, b), ROLLUP (c, d), CUBE (e), \
             GROUPING SETS ((a), (), b), (x + 1) * 2 HAVING count(*) > 1",
        );
        let group_by = spec.group_by.unwrap();
        assert_eq!(group_by.quantifier, Some(SetQuantifier::Distinct));
        let elements = &group_by.elements;
        assert_eq!(elements.len(), 5);
        assert!(matches!(&elements[0], GroupingElement::Simple(e, _) if e.len() == 2));
        assert!(matches!(&elements[1], GroupingElement::Rollup(e, _) if e.len() == 2));
        assert!(matches!(&elements[2], GroupingElement::Cube(e, _) if e.len() == 1));
        assert!(matches!(
            &elements[3],
            GroupingElement::GroupingSets(sets, _) if sets.len() == 3 && sets[1].is_empty()
        ));
        assert!(matches!(
            &elements[4],
            GroupingElement::Simple(e, _)
                if matches!(e[0], Expression::Binary(BinaryOperator::Multiply, ..))
        ));
        assert!(spec.having.is_some());
    }

    #[test]
    fn select_without_items_reports_expression_starts() {
        let error = parse_statement("SELECT FROM t").unwrap_err();
        let ParseErrorKind::UnexpectedToken { found, expected } = &error.kind else {
            panic!("expected unexpected-token error, got {error:?}");
        };
        assert_eq!(found, "FROM");
        assert_eq!(error.span, 7..11);
        for start in ["'*'", "NOT", "<identifier>", "<integer>", "CASE", "'('"] {
            assert!(expected.contains(&start), "missing {start} in {expected:?}");
        }
    }
}
