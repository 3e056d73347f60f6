//! Schema, table, view, type and routine DDL, plus `CALL`.

use crate::ast::{
    AlterTableAction, CallArgument, ColumnDefinition, ConstraintKind, ConstraintSpecification,
    DataType, DropBehavior, LikeProperties, NullCallClause, ParameterDeclaration, Query,
    RoutineBody, RoutineCharacteristics, RoutineLanguage, Span, Statement, TableElement,
    TypeDefinition, ViewSecurity,
};
use crate::error::ParseError;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

/// An at-most-once clause: its value and where it was given.
type OnceSlot<T> = Option<(T, Span)>;

/// Stores `value` in an at-most-once clause slot. A repeat points back at the
/// first occurrence.
fn set_once<T>(slot: &mut OnceSlot<T>, value: T, clause: &str, span: Span) -> ParseResult<()> {
    if let Some((_, first)) = slot {
        return Err(
            ParseError::invalid(format!("duplicate {clause}"), span)
                .with_related(first.clone(), "first given here"),
        );
    }
    *slot = Some((value, span));
    Ok(())
}

fn once_value<T>(slot: OnceSlot<T>) -> Option<T> {
    slot.map(|(value, _)| value)
}

impl Parser<'_> {
    // ========================================================================
    // CREATE / DROP / ALTER dispatch
    // ========================================================================

    pub(super) fn parse_create(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Create)?;

        if self.stream.consume_keyword(Keyword::Schema) {
            let if_not_exists = self.parse_if_not_exists();
            let name = self.parse_qualified_name()?;
            let properties = self.parse_with_properties()?;
            return Ok(Statement::CreateSchema {
                name,
                if_not_exists,
                properties,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Table) {
            return self.parse_create_table(start);
        }
        if self.stream.consume_keyword(Keyword::Materialized) {
            self.stream.expect_keyword(Keyword::View)?;
            return self.parse_create_materialized_view(start);
        }
        if self.stream.consume_keyword(Keyword::Type) {
            return self.parse_create_type(start);
        }
        if self.stream.consume_keyword(Keyword::Role) {
            return self.parse_create_role(start);
        }

        let replace = self
            .stream
            .consume_keywords(&[Keyword::Or, Keyword::Replace]);
        if self.stream.consume_keyword(Keyword::View) {
            return self.parse_create_view(start, replace);
        }
        let temporary = self.stream.consume_keyword(Keyword::Temporary);
        self.stream.expect_keyword(Keyword::Function)?;
        self.parse_create_function(start, replace, temporary)
    }

    pub(super) fn parse_drop(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Drop)?;

        if self.stream.consume_keyword(Keyword::Schema) {
            let if_exists = self.parse_if_exists();
            let name = self.parse_qualified_name()?;
            let behavior = if self.stream.consume_keyword(Keyword::Cascade) {
                Some(DropBehavior::Cascade)
            } else if self.stream.consume_keyword(Keyword::Restrict) {
                Some(DropBehavior::Restrict)
            } else {
                None
            };
            return Ok(Statement::DropSchema {
                name,
                if_exists,
                behavior,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Table) {
            let if_exists = self.parse_if_exists();
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropTable {
                name,
                if_exists,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::View) {
            let if_exists = self.parse_if_exists();
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropView {
                name,
                if_exists,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Materialized) {
            self.stream.expect_keyword(Keyword::View)?;
            let if_exists = self.parse_if_exists();
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropMaterializedView {
                name,
                if_exists,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Role) {
            let name = self.parse_identifier()?;
            return Ok(Statement::DropRole {
                name,
                span: self.stream.span_from(start),
            });
        }

        let temporary = self.stream.consume_keyword(Keyword::Temporary);
        self.stream.expect_keyword(Keyword::Function)?;
        let if_exists = self.parse_if_exists();
        let name = self.parse_qualified_name()?;
        let parameter_types = self.parse_optional_type_list()?;
        Ok(Statement::DropFunction {
            name,
            temporary,
            if_exists,
            parameter_types,
            span: self.stream.span_from(start),
        })
    }

    pub(super) fn parse_alter(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Alter)?;

        if self.stream.consume_keyword(Keyword::Schema) {
            let name = self.parse_qualified_name()?;
            self.stream.expect_keyword(Keyword::Rename)?;
            self.stream.expect_keyword(Keyword::To)?;
            let new_name = self.parse_identifier()?;
            return Ok(Statement::RenameSchema {
                name,
                new_name,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::Table) {
            let if_exists = self.parse_if_exists();
            let table = self.parse_qualified_name()?;
            let action = self.parse_alter_table_action()?;
            return Ok(Statement::AlterTable {
                table,
                if_exists,
                action,
                span: self.stream.span_from(start),
            });
        }
        if self.stream.consume_keyword(Keyword::View) {
            let if_exists = self.parse_if_exists();
            let from = self.parse_qualified_name()?;
            self.stream.expect_keyword(Keyword::Rename)?;
            self.stream.expect_keyword(Keyword::To)?;
            let to = self.parse_qualified_name()?;
            return Ok(Statement::RenameView {
                from,
                to,
                if_exists,
                span: self.stream.span_from(start),
            });
        }

        self.stream.expect_keyword(Keyword::Function)?;
        let name = self.parse_qualified_name()?;
        let parameter_types = self.parse_optional_type_list()?;
        let mut null_call = None;
        loop {
            let clause_start = self.stream.start();
            let Some(clause) = self.parse_null_call_clause()? else {
                break;
            };
            let span = self.stream.span_from(clause_start);
            set_once(&mut null_call, clause, "null call clause", span)?;
        }
        Ok(Statement::AlterFunction {
            name,
            parameter_types,
            null_call: once_value(null_call),
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // Tables
    // ========================================================================

    fn parse_create_table(&mut self, start: usize) -> ParseResult<Statement> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_qualified_name()?;

        if !self.stream.check(&TokenKind::LParen) || self.column_aliases_follow() {
            let column_aliases = if self.column_aliases_follow() {
                self.parse_identifier_list()?
            } else {
                Vec::new()
            };
            let comment = self.parse_comment()?;
            let properties = self.parse_with_properties()?;
            self.stream.expect_keyword(Keyword::As)?;
            let query = self.parse_ddl_query()?;
            let with_data = if self.stream.consume_keyword(Keyword::With) {
                let no = self.stream.consume_keyword(Keyword::No);
                self.stream.expect_keyword(Keyword::Data)?;
                !no
            } else {
                true
            };
            return Ok(Statement::CreateTableAsSelect {
                name,
                if_not_exists,
                column_aliases,
                comment,
                properties,
                query: Box::new(query),
                with_data,
                span: self.stream.span_from(start),
            });
        }

        self.stream.expect(&TokenKind::LParen)?;
        let elements = self.parse_comma_separated(Self::parse_table_element)?;
        self.stream.expect(&TokenKind::RParen)?;
        let comment = self.parse_comment()?;
        let properties = self.parse_with_properties()?;
        Ok(Statement::CreateTable {
            name,
            if_not_exists,
            elements,
            comment,
            properties,
            span: self.stream.span_from(start),
        })
    }

    /// Parses the query of `CREATE TABLE ... AS` and `CREATE MATERIALIZED
    /// VIEW ... AS`. A fully parenthesized query is unwrapped.
    fn parse_ddl_query(&mut self) -> ParseResult<Query> {
        if self.stream.check(&TokenKind::LParen) {
            let parenthesized = self.speculate(|p| {
                let query = p.parse_parenthesized_query()?;
                match p.stream.current().kind {
                    TokenKind::Eof | TokenKind::Semicolon | TokenKind::Keyword(Keyword::With) => {
                        Ok(query)
                    }
                    _ => Err(p.stream.unexpected()),
                }
            })?;
            if let Some(query) = parenthesized {
                return Ok(query);
            }
        }
        self.parse_query()
    }

    fn parse_table_element(&mut self) -> ParseResult<TableElement> {
        let start = self.stream.start();
        if self.stream.consume_keyword(Keyword::Like) {
            let table = self.parse_qualified_name()?;
            let properties = if self
                .stream
                .consume_keywords(&[Keyword::Including, Keyword::Properties])
            {
                Some(LikeProperties::Including)
            } else if self
                .stream
                .consume_keywords(&[Keyword::Excluding, Keyword::Properties])
            {
                Some(LikeProperties::Excluding)
            } else {
                None
            };
            return Ok(TableElement::Like {
                table,
                properties,
                span: self.stream.span_from(start),
            });
        }
        if self.constraint_follows() {
            return Ok(TableElement::Constraint(
                self.parse_constraint_specification()?,
            ));
        }
        Ok(TableElement::Column(self.parse_column_definition()?))
    }

    fn constraint_follows(&self) -> bool {
        let stream = &self.stream;
        stream.peek_is_keyword(0, Keyword::Constraint)
            || (stream.peek_is_keyword(0, Keyword::Unique)
                && *stream.peek_kind(1) == TokenKind::LParen)
            || (stream.peek_is_keyword(0, Keyword::Primary)
                && stream.peek_is_keyword(1, Keyword::Key))
    }

    fn parse_column_definition(&mut self) -> ParseResult<ColumnDefinition> {
        let start = self.stream.start();
        let name = self.parse_identifier()?;
        let data_type = self.parse_type()?;
        let nullable = !self
            .stream
            .consume_keywords(&[Keyword::Not, Keyword::Null]);
        let comment = self.parse_comment()?;
        let properties = self.parse_with_properties()?;
        Ok(ColumnDefinition {
            name,
            data_type,
            nullable,
            comment,
            properties,
            span: self.stream.span_from(start),
        })
    }

    fn parse_constraint_specification(&mut self) -> ParseResult<ConstraintSpecification> {
        let start = self.stream.start();
        let name = if self.stream.consume_keyword(Keyword::Constraint) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let kind = if self.stream.consume_keyword(Keyword::Unique) {
            ConstraintKind::Unique
        } else {
            self.stream.expect_keyword(Keyword::Primary)?;
            self.stream.expect_keyword(Keyword::Key)?;
            ConstraintKind::PrimaryKey
        };
        let columns = self.parse_identifier_list()?;

        let (mut enabled, mut rely, mut enforced) = (None, None, None);
        loop {
            let qualifier_start = self.stream.start();
            let negated = self.stream.peek_is_keyword(0, Keyword::Not)
                && (self.stream.peek_is_keyword(1, Keyword::Rely)
                    || self.stream.peek_is_keyword(1, Keyword::Enforced));
            if negated {
                self.stream.advance();
            }
            if !negated && self.stream.consume_keyword(Keyword::Enabled) {
                let span = self.stream.span_from(qualifier_start);
                set_once(&mut enabled, true, "ENABLED qualifier", span)?;
            } else if !negated && self.stream.consume_keyword(Keyword::Disabled) {
                let span = self.stream.span_from(qualifier_start);
                set_once(&mut enabled, false, "ENABLED qualifier", span)?;
            } else if self.stream.consume_keyword(Keyword::Rely) {
                let span = self.stream.span_from(qualifier_start);
                set_once(&mut rely, !negated, "RELY qualifier", span)?;
            } else if self.stream.consume_keyword(Keyword::Enforced) {
                let span = self.stream.span_from(qualifier_start);
                set_once(&mut enforced, !negated, "ENFORCED qualifier", span)?;
            } else {
                break;
            }
        }

        Ok(ConstraintSpecification {
            name,
            kind,
            columns,
            enabled: once_value(enabled),
            rely: once_value(rely),
            enforced: once_value(enforced),
            span: self.stream.span_from(start),
        })
    }

    fn parse_alter_table_action(&mut self) -> ParseResult<AlterTableAction> {
        if self.stream.consume_keyword(Keyword::Rename) {
            if self.stream.consume_keyword(Keyword::Column) {
                let if_exists = self.parse_if_exists();
                let from = self.parse_identifier()?;
                self.stream.expect_keyword(Keyword::To)?;
                let to = self.parse_identifier()?;
                return Ok(AlterTableAction::RenameColumn {
                    if_exists,
                    from,
                    to,
                });
            }
            self.stream.expect_keyword(Keyword::To)?;
            return Ok(AlterTableAction::RenameTo(self.parse_qualified_name()?));
        }

        if self.stream.consume_keyword(Keyword::Drop) {
            if self.stream.consume_keyword(Keyword::Column) {
                let if_exists = self.parse_if_exists();
                let column = self.parse_qualified_name()?;
                return Ok(AlterTableAction::DropColumn { if_exists, column });
            }
            self.stream.expect_keyword(Keyword::Constraint)?;
            let if_exists = self.parse_if_exists();
            let name = self.parse_identifier()?;
            return Ok(AlterTableAction::DropConstraint { if_exists, name });
        }

        if self.stream.consume_keyword(Keyword::Add) {
            if self.stream.consume_keyword(Keyword::Column) {
                let if_not_exists = self.parse_if_not_exists();
                let column = self.parse_column_definition()?;
                return Ok(AlterTableAction::AddColumn {
                    if_not_exists,
                    column,
                });
            }
            return Ok(AlterTableAction::AddConstraint(
                self.parse_constraint_specification()?,
            ));
        }

        if self.stream.consume_keyword(Keyword::Alter) {
            self.stream.consume_keyword(Keyword::Column);
            let column = self.parse_identifier()?;
            let not_null = if self.stream.consume_keyword(Keyword::Set) {
                true
            } else {
                self.stream.expect_keyword(Keyword::Drop)?;
                false
            };
            self.stream.expect_keyword(Keyword::Not)?;
            self.stream.expect_keyword(Keyword::Null)?;
            return Ok(AlterTableAction::AlterColumnNotNull { column, not_null });
        }

        self.stream.expect_keyword(Keyword::Set)?;
        self.stream.expect_keyword(Keyword::Properties)?;
        Ok(AlterTableAction::SetProperties(self.parse_properties()?))
    }

    pub(super) fn parse_truncate(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Truncate)?;
        self.stream.expect_keyword(Keyword::Table)?;
        let name = self.parse_qualified_name()?;
        Ok(Statement::TruncateTable {
            name,
            span: self.stream.span_from(start),
        })
    }

    pub(super) fn parse_analyze(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Analyze)?;
        let name = self.parse_qualified_name()?;
        let properties = self.parse_with_properties()?;
        Ok(Statement::Analyze {
            name,
            properties,
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // Views
    // ========================================================================

    fn parse_create_view(&mut self, start: usize, replace: bool) -> ParseResult<Statement> {
        let name = self.parse_qualified_name()?;
        let security = if self.stream.consume_keyword(Keyword::Security) {
            if self.stream.consume_keyword(Keyword::Definer) {
                Some(ViewSecurity::Definer)
            } else {
                self.stream.expect_keyword(Keyword::Invoker)?;
                Some(ViewSecurity::Invoker)
            }
        } else {
            None
        };
        self.stream.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        Ok(Statement::CreateView {
            name,
            replace,
            security,
            query: Box::new(query),
            span: self.stream.span_from(start),
        })
    }

    fn parse_create_materialized_view(&mut self, start: usize) -> ParseResult<Statement> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_qualified_name()?;
        let comment = self.parse_comment()?;
        let properties = self.parse_with_properties()?;
        self.stream.expect_keyword(Keyword::As)?;
        let query = self.parse_ddl_query()?;
        Ok(Statement::CreateMaterializedView {
            name,
            if_not_exists,
            comment,
            properties,
            query: Box::new(query),
            span: self.stream.span_from(start),
        })
    }

    pub(super) fn parse_refresh_materialized_view(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Refresh)?;
        self.stream.expect_keyword(Keyword::Materialized)?;
        self.stream.expect_keyword(Keyword::View)?;
        let name = self.parse_qualified_name()?;
        self.stream.expect_keyword(Keyword::Where)?;
        let predicate = self.parse_boolean_expression()?;
        Ok(Statement::RefreshMaterializedView {
            name,
            predicate,
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // Types and routines
    // ========================================================================

    fn parse_create_type(&mut self, start: usize) -> ParseResult<Statement> {
        let name = self.parse_qualified_name()?;
        self.stream.expect_keyword(Keyword::As)?;
        let definition = if self.stream.consume(&TokenKind::LParen) {
            let fields = self.parse_comma_separated(Self::parse_parameter_declaration)?;
            self.stream.expect(&TokenKind::RParen)?;
            TypeDefinition::Struct(fields)
        } else {
            TypeDefinition::Distinct(self.parse_type()?)
        };
        Ok(Statement::CreateType {
            name,
            definition,
            span: self.stream.span_from(start),
        })
    }

    fn parse_parameter_declaration(&mut self) -> ParseResult<ParameterDeclaration> {
        let start = self.stream.start();
        let name = self.parse_identifier()?;
        let data_type = self.parse_type()?;
        Ok(ParameterDeclaration {
            name,
            data_type,
            span: self.stream.span_from(start),
        })
    }

    fn parse_create_function(
        &mut self,
        start: usize,
        replace: bool,
        temporary: bool,
    ) -> ParseResult<Statement> {
        let name = self.parse_qualified_name()?;
        self.stream.expect(&TokenKind::LParen)?;
        let parameters = if self.stream.check(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_parameter_declaration)?
        };
        self.stream.expect(&TokenKind::RParen)?;
        self.stream.expect_keyword(Keyword::Returns)?;
        let return_type = self.parse_type()?;
        let comment = self.parse_comment()?;
        let characteristics = self.parse_routine_characteristics()?;
        let body = self.parse_routine_body()?;
        Ok(Statement::CreateFunction {
            name,
            replace,
            temporary,
            parameters,
            return_type,
            comment,
            characteristics,
            body,
            span: self.stream.span_from(start),
        })
    }

    fn parse_routine_characteristics(&mut self) -> ParseResult<RoutineCharacteristics> {
        let (mut language, mut deterministic, mut null_call) = (None, None, None);
        loop {
            let clause_start = self.stream.start();
            if self.stream.consume_keyword(Keyword::Language) {
                let value = if self.stream.consume_keyword(Keyword::Sql) {
                    RoutineLanguage::Sql
                } else {
                    RoutineLanguage::Other(self.parse_identifier()?)
                };
                let span = self.stream.span_from(clause_start);
                set_once(&mut language, value, "language clause", span)?;
            } else if self.stream.consume_keyword(Keyword::Deterministic) {
                let span = self.stream.span_from(clause_start);
                set_once(&mut deterministic, true, "determinism clause", span)?;
            } else if self
                .stream
                .consume_keywords(&[Keyword::Not, Keyword::Deterministic])
            {
                let span = self.stream.span_from(clause_start);
                set_once(&mut deterministic, false, "determinism clause", span)?;
            } else if let Some(clause) = self.parse_null_call_clause()? {
                let span = self.stream.span_from(clause_start);
                set_once(&mut null_call, clause, "null call clause", span)?;
            } else {
                return Ok(RoutineCharacteristics {
                    language: once_value(language),
                    deterministic: once_value(deterministic),
                    null_call: once_value(null_call),
                });
            }
        }
    }

    /// Parses `RETURNS NULL ON NULL INPUT` or `CALLED ON NULL INPUT`.
    fn parse_null_call_clause(&mut self) -> ParseResult<Option<NullCallClause>> {
        let clause = if self
            .stream
            .consume_keywords(&[Keyword::Returns, Keyword::Null])
        {
            NullCallClause::ReturnsNullOnNullInput
        } else if self.stream.consume_keyword(Keyword::Called) {
            NullCallClause::CalledOnNullInput
        } else {
            return Ok(None);
        };
        self.stream.expect_keyword(Keyword::On)?;
        self.stream.expect_keyword(Keyword::Null)?;
        self.stream.expect_keyword(Keyword::Input)?;
        Ok(Some(clause))
    }

    fn parse_routine_body(&mut self) -> ParseResult<RoutineBody> {
        if self.stream.consume_keyword(Keyword::Return) {
            return Ok(RoutineBody::Return(self.parse_expression()?));
        }
        self.stream.expect_keyword(Keyword::External)?;
        let name = if self.stream.consume_keyword(Keyword::Name) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(RoutineBody::External(name))
    }

    /// Parses a parenthesized type list if one follows.
    pub(super) fn parse_optional_type_list(&mut self) -> ParseResult<Option<Vec<DataType>>> {
        if self.stream.check(&TokenKind::LParen) {
            Ok(Some(self.parse_type_list()?))
        } else {
            Ok(None)
        }
    }

    // ========================================================================
    // CALL
    // ========================================================================

    pub(super) fn parse_call(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Call)?;
        let name = self.parse_qualified_name()?;
        self.stream.expect(&TokenKind::LParen)?;
        let arguments = if self.stream.check(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(|p| {
                let argument_start = p.stream.start();
                let name = if p.at_identifier() && *p.stream.peek_kind(1) == TokenKind::FatArrow {
                    let name = p.parse_identifier()?;
                    p.stream.advance();
                    Some(name)
                } else {
                    None
                };
                let value = p.parse_expression()?;
                Ok(CallArgument {
                    name,
                    value,
                    span: p.stream.span_from(argument_start),
                })
            })?
        };
        self.stream.expect(&TokenKind::RParen)?;
        Ok(Statement::Call {
            name,
            arguments,
            span: self.stream.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::diag::LabelRole;
    use crate::error::ParseErrorKind;
    use crate::parse_statement;

    #[test]
    fn create_table_with_elements() {
        let Statement::CreateTable {
            name,
            elements,
            comment,
            properties,
            ..
        } = parse_statement("CREATE TABLE t (a INT, b VARCHAR(10)) COMMENT 'x'").unwrap()
        else {
            panic!("expected create table");
        };
        assert_eq!(name.to_string(), "t");
        assert_eq!(comment.as_deref(), Some("x"));
        assert!(properties.is_empty());
        assert_eq!(elements.len(), 2);
        let TableElement::Column(b) = &elements[1] else {
            panic!("expected column");
        };
        assert_eq!(b.name.value, "b");
        assert!(b.nullable);
        assert_eq!(b.data_type.to_string(), "VARCHAR(10)");
    }

    #[test]
    fn table_element_kinds() {
        let Statement::CreateTable { elements, .. } = parse_statement(
            "CREATE TABLE IF NOT EXISTS s.t (\
               id bigint NOT NULL COMMENT 'key' WITH (partitioning = 'x'), \
               LIKE other INCLUDING PROPERTIES, \
               CONSTRAINT pk PRIMARY KEY (id) NOT ENFORCED RELY, \
               UNIQUE (id) DISABLED\
             ) WITH (format = 'ORC')",
        )
        .unwrap() else {
            panic!("expected create table");
        };
        assert!(matches!(
            &elements[0],
            TableElement::Column(c) if !c.nullable && c.comment.as_deref() == Some("key") && c.properties.len() == 1
        ));
        assert!(matches!(
            &elements[1],
            TableElement::Like { properties: Some(LikeProperties::Including), .. }
        ));
        let TableElement::Constraint(pk) = &elements[2] else {
            panic!("expected constraint");
        };
        assert_eq!(pk.name.as_ref().map(|n| n.value.as_str()), Some("pk"));
        assert_eq!(pk.kind, ConstraintKind::PrimaryKey);
        assert_eq!((pk.enabled, pk.rely, pk.enforced), (None, Some(true), Some(false)));
        assert!(matches!(
            &elements[3],
            TableElement::Constraint(c) if c.kind == ConstraintKind::Unique && c.enabled == Some(false)
        ));
    }

    #[test]
    fn duplicate_constraint_qualifier_is_invalid() {
        let error =
            parse_statement("CREATE TABLE t (a int, UNIQUE (a) RELY NOT RELY)").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::Invalid { .. }));
        assert_eq!(error.span, 39..47);
        assert_eq!(error.related, Some((34..38, "first given here")));
    }

    #[test]
    fn create_table_as_select() {
        let Statement::CreateTableAsSelect {
            column_aliases,
            properties,
            with_data,
            query,
            ..
        } = parse_statement("CREATE TABLE t (x, y) WITH (a = 1) AS (SELECT 1, 2) WITH NO DATA")
            .unwrap()
        else {
            panic!("expected CTAS");
        };
        assert_eq!(column_aliases.len(), 2);
        assert_eq!(properties.len(), 1);
        assert!(!with_data);
        assert!(matches!(query.body, QueryBody::Specification(_)));

        assert!(matches!(
            parse_statement("CREATE TABLE t AS SELECT * FROM s").unwrap(),
            Statement::CreateTableAsSelect { with_data: true, .. }
        ));
        assert!(matches!(
            parse_statement("CREATE TABLE t AS (SELECT 1) UNION (SELECT 2)").unwrap(),
            Statement::CreateTableAsSelect { ref query, .. }
                if matches!(query.body, QueryBody::SetOperation { .. })
        ));
    }

    #[test]
    fn schema_statements() {
        assert!(matches!(
            parse_statement("CREATE SCHEMA IF NOT EXISTS hive.s WITH (location = '/x')").unwrap(),
            Statement::CreateSchema { if_not_exists: true, ref properties, .. } if properties.len() == 1
        ));
        assert!(matches!(
            parse_statement("DROP SCHEMA IF EXISTS s CASCADE").unwrap(),
            Statement::DropSchema { if_exists: true, behavior: Some(DropBehavior::Cascade), .. }
        ));
        assert!(matches!(
            parse_statement("ALTER SCHEMA s RENAME TO s2").unwrap(),
            Statement::RenameSchema { ref new_name, .. } if new_name.value == "s2"
        ));
    }

    #[test]
    fn alter_table_actions() {
        let action = |sql: &str| match parse_statement(sql).unwrap() {
            Statement::AlterTable { action, .. } => action,
            other => panic!("expected alter table, got {other:?}"),
        };
        assert!(matches!(action("ALTER TABLE t RENAME TO u"), AlterTableAction::RenameTo(_)));
        assert!(matches!(
            action("ALTER TABLE t RENAME COLUMN IF EXISTS a TO b"),
            AlterTableAction::RenameColumn { if_exists: true, .. }
        ));
        assert!(matches!(
            action("ALTER TABLE t DROP COLUMN a"),
            AlterTableAction::DropColumn { if_exists: false, .. }
        ));
        assert!(matches!(
            action("ALTER TABLE t ADD COLUMN IF NOT EXISTS c double"),
            AlterTableAction::AddColumn { if_not_exists: true, .. }
        ));
        assert!(matches!(
            action("ALTER TABLE t ADD CONSTRAINT u UNIQUE (a, b)"),
            AlterTableAction::AddConstraint(_)
        ));
        assert!(matches!(
            action("ALTER TABLE t DROP CONSTRAINT IF EXISTS u"),
            AlterTableAction::DropConstraint { if_exists: true, .. }
        ));
        assert!(matches!(
            action("ALTER TABLE t ALTER COLUMN a DROP NOT NULL"),
            AlterTableAction::AlterColumnNotNull { not_null: false, .. }
        ));
        assert!(matches!(
            action("ALTER TABLE t ALTER a SET NOT NULL"),
            AlterTableAction::AlterColumnNotNull { not_null: true, .. }
        ));
        assert!(matches!(
            action("ALTER TABLE t SET PROPERTIES (x = 1)"),
            AlterTableAction::SetProperties(ref p) if p.len() == 1
        ));
        assert!(matches!(
            parse_statement("ALTER TABLE IF EXISTS t RENAME TO u").unwrap(),
            Statement::AlterTable { if_exists: true, .. }
        ));
    }

    #[test]
    fn views() {
        assert!(matches!(
            parse_statement("CREATE OR REPLACE VIEW v SECURITY INVOKER AS SELECT 1").unwrap(),
            Statement::CreateView { replace: true, security: Some(ViewSecurity::Invoker), .. }
        ));
        assert!(matches!(
            parse_statement("CREATE MATERIALIZED VIEW IF NOT EXISTS mv COMMENT 'c' AS SELECT 1").unwrap(),
            Statement::CreateMaterializedView { if_not_exists: true, comment: Some(_), .. }
        ));
        assert!(matches!(
            parse_statement("REFRESH MATERIALIZED VIEW mv WHERE ds = '2020-01-01'").unwrap(),
            Statement::RefreshMaterializedView { .. }
        ));
        assert!(matches!(
            parse_statement("ALTER VIEW IF EXISTS v RENAME TO w").unwrap(),
            Statement::RenameView { if_exists: true, .. }
        ));
        assert!(matches!(
            parse_statement("DROP MATERIALIZED VIEW mv").unwrap(),
            Statement::DropMaterializedView { if_exists: false, .. }
        ));
    }

    #[test]
    fn create_function() {
        let Statement::CreateFunction {
            replace,
            temporary,
            parameters,
            return_type,
            characteristics,
            body,
            ..
        } = parse_statement(
            "CREATE OR REPLACE TEMPORARY FUNCTION tan(x double) RETURNS double \
             COMMENT 'tangent' LANGUAGE SQL DETERMINISTIC RETURNS NULL ON NULL INPUT \
             RETURN sin(x) / cos(x)",
        )
        .unwrap() else {
            panic!("expected create function");
        };
        assert!(replace && temporary);
        assert_eq!(parameters.len(), 1);
        assert_eq!(return_type.to_string(), "double");
        assert_eq!(characteristics.language, Some(RoutineLanguage::Sql));
        assert_eq!(characteristics.deterministic, Some(true));
        assert_eq!(
            characteristics.null_call,
            Some(NullCallClause::ReturnsNullOnNullInput)
        );
        assert!(matches!(body, RoutineBody::Return(Expression::Binary(..))));

        assert!(matches!(
            parse_statement("CREATE FUNCTION f() RETURNS int LANGUAGE java EXTERNAL NAME impl").unwrap(),
            Statement::CreateFunction {
                characteristics: RoutineCharacteristics { language: Some(RoutineLanguage::Other(_)), .. },
                body: RoutineBody::External(Some(_)),
                ..
            }
        ));
    }

    #[test]
    fn duplicate_routine_clause_is_invalid() {
        let error = parse_statement(
            "CREATE FUNCTION f() RETURNS int DETERMINISTIC NOT DETERMINISTIC RETURN 1",
        )
        .unwrap_err();
        let ParseErrorKind::Invalid { message } = &error.kind else {
            panic!("expected invalid, got {error:?}");
        };
        assert_eq!(message, "duplicate determinism clause");
        assert_eq!(error.span, 46..63);
        assert_eq!(error.related, Some((32..45, "first given here")));

        let diag = error.to_diag();
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[0].role, LabelRole::Primary);
        assert_eq!(diag.labels[1].role, LabelRole::Secondary);
        assert_eq!(diag.labels[1].span, 32..45);
        assert_eq!(diag.labels[1].message, "first given here");
    }

    #[test]
    fn alter_and_drop_function() {
        assert!(matches!(
            parse_statement("ALTER FUNCTION f(int, varchar) CALLED ON NULL INPUT").unwrap(),
            Statement::AlterFunction {
                parameter_types: Some(ref types),
                null_call: Some(NullCallClause::CalledOnNullInput),
                ..
            } if types.len() == 2
        ));
        assert!(matches!(
            parse_statement("DROP TEMPORARY FUNCTION IF EXISTS f()").unwrap(),
            Statement::DropFunction { temporary: true, if_exists: true, parameter_types: Some(ref t), .. } if t.is_empty()
        ));
        assert!(matches!(
            parse_statement("DROP FUNCTION f").unwrap(),
            Statement::DropFunction { parameter_types: None, .. }
        ));
    }

    #[test]
    fn create_type() {
        assert!(matches!(
            parse_statement("CREATE TYPE p AS (x double, y double)").unwrap(),
            Statement::CreateType { definition: TypeDefinition::Struct(ref f), .. } if f.len() == 2
        ));
        assert!(matches!(
            parse_statement("CREATE TYPE money AS decimal(10, 2)").unwrap(),
            Statement::CreateType { definition: TypeDefinition::Distinct(_), .. }
        ));
    }

    #[test]
    fn call_with_named_arguments() {
        let Statement::Call { name, arguments, .. } =
            parse_statement("CALL system.sync(schema => 's', 1)").unwrap()
        else {
            panic!("expected call");
        };
        assert_eq!(name.to_string(), "system.sync");
        assert_eq!(arguments[0].name.as_ref().map(|n| n.value.as_str()), Some("schema"));
        assert!(arguments[1].name.is_none());
        assert!(matches!(
            parse_statement("CALL p()").unwrap(),
            Statement::Call { ref arguments, .. } if arguments.is_empty()
        ));
    }

    #[test]
    fn misc_table_statements() {
        assert!(matches!(
            parse_statement("DROP TABLE IF EXISTS t").unwrap(),
            Statement::DropTable { if_exists: true, .. }
        ));
        assert!(matches!(
            parse_statement("TRUNCATE TABLE t").unwrap(),
            Statement::TruncateTable { .. }
        ));
        assert!(matches!(
            parse_statement("ANALYZE t WITH (partitions = ARRAY['a'])").unwrap(),
            Statement::Analyze { ref properties, .. } if properties.len() == 1
        ));
    }

    #[test]
    fn unknown_create_target_lists_alternatives() {
        let error = parse_statement("CREATE INDEX i").unwrap_err();
        for expected in ["SCHEMA", "TABLE", "VIEW", "FUNCTION", "ROLE"] {
            assert!(error.expected().contains(&expected), "missing {expected}");
        }
    }
}
