//! Relation grammar: FROM-clause items, joins, sampling and aliases.
//!
//! ```text
//! relation        := sampled (joinClause)*
//! joinClause      := CROSS JOIN sampled
//!                  | joinType JOIN sampled (ON boolean | USING '(' id, ... ')')
//!                  | NATURAL joinType JOIN sampled
//! sampled         := aliased (TABLESAMPLE (BERNOULLI | SYSTEM) '(' expression ')')?
//! aliased         := primary ([AS] identifier ('(' id, ... ')')?)?
//! primary         := name tableVersion? | '(' query ')' | '(' relation ')'
//!                  | UNNEST '(' expression, ... ')' (WITH ORDINALITY)?
//!                  | LATERAL '(' query ')'
//! ```

use crate::ast::{
    Join, JoinCriteria, JoinType, Relation, SampleMethod, TableVersion, TableVersionKind,
    TableVersionOperator,
};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

impl Parser<'_> {
    /// Parses a relation with any number of joins, nesting them to the left.
    pub(crate) fn parse_relation(&mut self) -> ParseResult<Relation> {
        let start = self.stream.start();
        let mut left = self.parse_sampled_relation()?;

        loop {
            let (join_type, criteria, right) = if self.stream.consume_keyword(Keyword::Cross) {
                self.stream.expect_keyword(Keyword::Join)?;
                (JoinType::Cross, None, self.parse_sampled_relation()?)
            } else if self.stream.consume_keyword(Keyword::Natural) {
                let join_type = self.parse_join_type()?.unwrap_or(JoinType::Inner);
                self.stream.expect_keyword(Keyword::Join)?;
                let right = self.parse_sampled_relation()?;
                (join_type, Some(JoinCriteria::Natural), right)
            } else if let Some(join_type) = self.parse_join_type()? {
                self.stream.expect_keyword(Keyword::Join)?;
                let right = self.parse_sampled_relation()?;
                let criteria = self.parse_join_criteria()?;
                (join_type, Some(criteria), right)
            } else {
                break;
            };

            left = Relation::Join(Box::new(Join {
                join_type,
                left,
                right,
                criteria,
                span: self.stream.span_from(start),
            }));
        }

        Ok(left)
    }

    /// Parses the join type before `JOIN`, leaving `JOIN` itself unconsumed.
    /// A bare `JOIN` is an inner join.
    fn parse_join_type(&mut self) -> ParseResult<Option<JoinType>> {
        if self.stream.check_keyword(Keyword::Join) {
            return Ok(Some(JoinType::Inner));
        }
        if self.stream.consume_keyword(Keyword::Inner) {
            return Ok(Some(JoinType::Inner));
        }
        let join_type = if self.stream.consume_keyword(Keyword::Left) {
            JoinType::Left
        } else if self.stream.consume_keyword(Keyword::Right) {
            JoinType::Right
        } else if self.stream.consume_keyword(Keyword::Full) {
            JoinType::Full
        } else {
            self.stream.expecting_all(&["CROSS", "NATURAL"]);
            return Ok(None);
        };
        self.stream.consume_keyword(Keyword::Outer);
        Ok(Some(join_type))
    }

    fn parse_join_criteria(&mut self) -> ParseResult<JoinCriteria> {
        if self.stream.consume_keyword(Keyword::On) {
            return Ok(JoinCriteria::On(self.parse_boolean_expression()?));
        }
        if self.stream.consume_keyword(Keyword::Using) {
            return Ok(JoinCriteria::Using(self.parse_identifier_list()?));
        }
        Err(self.stream.unexpected())
    }

    fn parse_sampled_relation(&mut self) -> ParseResult<Relation> {
        let start = self.stream.start();
        let relation = self.parse_aliased_relation()?;

        if !self.stream.consume_keyword(Keyword::Tablesample) {
            return Ok(relation);
        }
        let method = if self.stream.consume_keyword(Keyword::Bernoulli) {
            SampleMethod::Bernoulli
        } else if self.stream.consume_keyword(Keyword::System) {
            SampleMethod::System
        } else {
            return Err(self.stream.unexpected());
        };
        self.stream.expect(&TokenKind::LParen)?;
        let percentage = self.parse_expression()?;
        self.stream.expect(&TokenKind::RParen)?;

        Ok(Relation::Sampled {
            relation: Box::new(relation),
            method,
            percentage: Box::new(percentage),
            span: self.stream.span_from(start),
        })
    }

    fn parse_aliased_relation(&mut self) -> ParseResult<Relation> {
        let start = self.stream.start();
        let relation = self.parse_relation_primary()?;

        let alias = if self.stream.consume_keyword(Keyword::As) || self.at_implicit_alias() {
            self.parse_identifier()?
        } else {
            return Ok(relation);
        };
        let column_names = if self.stream.check(&TokenKind::LParen) {
            self.parse_identifier_list()?
        } else {
            Vec::new()
        };

        Ok(Relation::Aliased {
            relation: Box::new(relation),
            alias,
            column_names,
            span: self.stream.span_from(start),
        })
    }

    fn parse_relation_primary(&mut self) -> ParseResult<Relation> {
        self.nested(|p| {
            let start = p.stream.start();

            if p.stream.check(&TokenKind::LParen) {
                if p.query_follows_parens(0) {
                    if let Some(query) = p.speculate(Self::parse_parenthesized_query)? {
                        return Ok(Relation::Subquery(Box::new(query), p.stream.span_from(start)));
                    }
                }
                p.stream.advance();
                let relation = p.parse_relation()?;
                p.stream.expect(&TokenKind::RParen)?;
                return Ok(Relation::Parenthesized(
                    Box::new(relation),
                    p.stream.span_from(start),
                ));
            }

            if p.stream.consume_keyword(Keyword::Unnest) {
                p.stream.expect(&TokenKind::LParen)?;
                let expressions = p.parse_comma_separated(Self::parse_expression)?;
                p.stream.expect(&TokenKind::RParen)?;
                let with_ordinality = p
                    .stream
                    .consume_keywords(&[Keyword::With, Keyword::Ordinality]);
                return Ok(Relation::Unnest {
                    expressions,
                    with_ordinality,
                    span: p.stream.span_from(start),
                });
            }

            if p.stream.check_keyword(Keyword::Lateral)
                && *p.stream.peek_kind(1) == TokenKind::LParen
            {
                p.stream.advance();
                let query = p.parse_parenthesized_query()?;
                return Ok(Relation::Lateral(Box::new(query), p.stream.span_from(start)));
            }

            let name = p.parse_qualified_name()?;
            let version = p.parse_table_version()?;
            Ok(Relation::Table {
                name,
                version,
                span: p.stream.span_from(start),
            })
        })
    }

    /// Parses `FOR kind (AS OF | BEFORE) value` after a table name.
    fn parse_table_version(&mut self) -> ParseResult<Option<TableVersion>> {
        let start = self.stream.start();
        if !self.stream.consume_keyword(Keyword::For) {
            return Ok(None);
        }

        let kind = match self.stream.current().kind.keyword() {
            Some(Keyword::SystemTime) => TableVersionKind::SystemTime,
            Some(Keyword::SystemVersion) => TableVersionKind::SystemVersion,
            Some(Keyword::Timestamp) => TableVersionKind::Timestamp,
            Some(Keyword::Version) => TableVersionKind::Version,
            _ => {
                self.stream
                    .expecting_all(&["SYSTEM_TIME", "SYSTEM_VERSION", "TIMESTAMP", "VERSION"]);
                return Err(self.stream.unexpected());
            }
        };
        self.stream.advance();

        let operator = if self.stream.consume_keywords(&[Keyword::As, Keyword::Of]) {
            TableVersionOperator::AsOf
        } else {
            self.stream.expect_keyword(Keyword::Before)?;
            TableVersionOperator::Before
        };
        let value = self.parse_value_expression()?;

        Ok(Some(TableVersion {
            kind,
            operator,
            value,
            span: self.stream.span_from(start),
        }))
    }
}
