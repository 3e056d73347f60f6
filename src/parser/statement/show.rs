//! `SHOW` and `DESCRIBE`.

use crate::ast::{Identifier, ShowCreateObject, ShowStatsTarget, Statement};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

impl Parser<'_> {
    pub(super) fn parse_show(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Show)?;

        if self.stream.consume_keyword(Keyword::Create) {
            return self.parse_show_create(start);
        }
        if self.stream.consume_keyword(Keyword::Tables) {
            let schema = if self.consume_from_or_in() {
                Some(self.parse_qualified_name()?)
            } else {
                None
            };
            let like = self.parse_like_pattern()?;
            return Ok(Statement::ShowTables {
                schema,
                like,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Schemas) {
            let catalog = if self.consume_from_or_in() {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            let like = self.parse_like_pattern()?;
            return Ok(Statement::ShowSchemas {
                catalog,
                like,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Catalogs) {
            let like = self.parse_like_pattern()?;
            return Ok(Statement::ShowCatalogs {
                like,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Columns) {
            if !self.consume_from_or_in() {
                return Err(self.stream.unexpected());
            }
            let table = self.parse_qualified_name()?;
            return Ok(Statement::ShowColumns {
                table,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Stats) {
            self.stream.expect_keyword(Keyword::For)?;
            let target = if self.stream.consume(&TokenKind::LParen) {
                let specification = self.parse_query_specification()?;
                self.stream.expect(&TokenKind::RParen)?;
                ShowStatsTarget::Query(Box::new(specification))
            } else {
                ShowStatsTarget::Table(self.parse_qualified_name()?)
            };
            return Ok(Statement::ShowStats {
                target,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Functions) {
            let like = self.parse_like_pattern()?;
            return Ok(Statement::ShowFunctions {
                like,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Session) {
            let like = self.parse_like_pattern()?;
            return Ok(Statement::ShowSession {
                like,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Grants) {
            let table = if self.stream.consume_keyword(Keyword::On) {
                self.stream.consume_keyword(Keyword::Table);
                Some(self.parse_qualified_name()?)
            } else {
                None
            };
            return Ok(Statement::ShowGrants {
                table,
                span: self.stream.span_from(start),
            });
        }
        if self
            .stream
            .consume_keywords(&[Keyword::Role, Keyword::Grants])
        {
            let catalog = self.parse_optional_catalog()?;
            return Ok(Statement::ShowRoleGrants {
                catalog,
                span: self.stream.span_from(start),
            });
        }

        let current = self.stream.consume_keyword(Keyword::Current);
        self.stream.expect_keyword(Keyword::Roles)?;
        let catalog = self.parse_optional_catalog()?;
        Ok(Statement::ShowRoles {
            current,
            catalog,
            span: self.stream.span_from(start),
        })
    }

    fn parse_show_create(&mut self, start: usize) -> ParseResult<Statement> {
        if self.stream.consume_keyword(Keyword::Function) {
            let name = self.parse_qualified_name()?;
            let parameter_types = self.parse_optional_type_list()?;
            return Ok(Statement::ShowCreateFunction {
                name,
                parameter_types,
                span: self.stream.span_from(start),
            });
        }

        let object = if self.stream.consume_keyword(Keyword::Table) {
            ShowCreateObject::Table
        } else if self.stream.consume_keyword(Keyword::View) {
            ShowCreateObject::View
        } else {
            self.stream.expect_keyword(Keyword::Materialized)?;
            self.stream.expect_keyword(Keyword::View)?;
            ShowCreateObject::MaterializedView
        };
        let name = self.parse_qualified_name()?;
        Ok(Statement::ShowCreate {
            object,
            name,
            span: self.stream.span_from(start),
        })
    }

    /// `DESCRIBE INPUT name`, `DESCRIBE OUTPUT name`, or `DESCRIBE table`.
    pub(super) fn parse_describe(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.advance();

        let name_follows = self.stream.peek_kind(1).is_identifier_like();
        if name_follows && self.stream.consume_keyword(Keyword::Input) {
            let name = self.parse_identifier()?;
            return Ok(Statement::DescribeInput {
                name,
                span: self.stream.span_from(start),
            });
        }
        if name_follows && self.stream.consume_keyword(Keyword::Output) {
            let name = self.parse_identifier()?;
            return Ok(Statement::DescribeOutput {
                name,
                span: self.stream.span_from(start),
            });
        }

        let table = self.parse_qualified_name()?;
        Ok(Statement::ShowColumns {
            table,
            span: self.stream.span_from(start),
        })
    }

    fn consume_from_or_in(&mut self) -> bool {
        self.stream.consume_keyword(Keyword::From) || self.stream.consume_keyword(Keyword::In)
    }

    fn parse_optional_catalog(&mut self) -> ParseResult<Option<Identifier>> {
        if self.consume_from_or_in() {
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }
}
