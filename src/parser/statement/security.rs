//! Roles, grants and privileges.

use crate::ast::{Grantor, Identifier, Principal, Privileges, Quoting, RoleSelection, Statement};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

impl Parser<'_> {
    /// `CREATE ROLE name [WITH ADMIN grantor]`, after `CREATE ROLE`.
    pub(super) fn parse_create_role(&mut self, start: usize) -> ParseResult<Statement> {
        let name = self.parse_identifier()?;
        let grantor = if self
            .stream
            .consume_keywords(&[Keyword::With, Keyword::Admin])
        {
            Some(self.parse_grantor()?)
        } else {
            None
        };
        Ok(Statement::CreateRole {
            name,
            grantor,
            span: self.stream.span_from(start),
        })
    }

    /// `SET ROLE {ALL | NONE | name}`, after `SET ROLE`.
    pub(super) fn parse_set_role(&mut self, start: usize) -> ParseResult<Statement> {
        let role = if self.stream.consume_keyword(Keyword::All) {
            RoleSelection::All
        } else if self.stream.consume_keyword(Keyword::None) {
            RoleSelection::None
        } else {
            RoleSelection::Role(self.parse_identifier()?)
        };
        Ok(Statement::SetRole {
            role,
            span: self.stream.span_from(start),
        })
    }

    pub(super) fn parse_grant(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Grant)?;

        if !self.privileges_form_follows(Keyword::To) {
            let roles = self.parse_comma_separated(Self::parse_identifier)?;
            self.stream.expect_keyword(Keyword::To)?;
            let grantees = self.parse_comma_separated(Self::parse_principal)?;
            let admin_option =
                self.stream
                    .consume_keywords(&[Keyword::With, Keyword::Admin, Keyword::Option]);
            let grantor = self.parse_granted_by()?;
            return Ok(Statement::GrantRoles {
                roles,
                grantees,
                admin_option,
                grantor,
                span: self.stream.span_from(start),
            });
        }

        let privileges = self.parse_privileges()?;
        self.stream.expect_keyword(Keyword::On)?;
        self.stream.consume_keyword(Keyword::Table);
        let table = self.parse_qualified_name()?;
        self.stream.expect_keyword(Keyword::To)?;
        let grantee = self.parse_principal()?;
        let grant_option =
            self.stream
                .consume_keywords(&[Keyword::With, Keyword::Grant, Keyword::Option]);
        Ok(Statement::Grant {
            privileges,
            table,
            grantee,
            grant_option,
            span: self.stream.span_from(start),
        })
    }

    pub(super) fn parse_revoke(&mut self) -> ParseResult<Statement> {
        let start = self.stream.start();
        self.stream.expect_keyword(Keyword::Revoke)?;

        let admin_option =
            self.stream
                .consume_keywords(&[Keyword::Admin, Keyword::Option, Keyword::For]);
        if admin_option || !self.privileges_form_follows(Keyword::From) {
            let roles = self.parse_comma_separated(Self::parse_identifier)?;
            self.stream.expect_keyword(Keyword::From)?;
            let grantees = self.parse_comma_separated(Self::parse_principal)?;
            let grantor = self.parse_granted_by()?;
            return Ok(Statement::RevokeRoles {
                roles,
                grantees,
                admin_option,
                grantor,
                span: self.stream.span_from(start),
            });
        }

        let grant_option =
            self.stream
                .consume_keywords(&[Keyword::Grant, Keyword::Option, Keyword::For]);
        let privileges = self.parse_privileges()?;
        self.stream.expect_keyword(Keyword::On)?;
        self.stream.consume_keyword(Keyword::Table);
        let table = self.parse_qualified_name()?;
        self.stream.expect_keyword(Keyword::From)?;
        let grantee = self.parse_principal()?;
        Ok(Statement::Revoke {
            grant_option,
            privileges,
            table,
            grantee,
            span: self.stream.span_from(start),
        })
    }

    /// Scans ahead for `ON` before `terminator`, which marks the table
    /// privilege form of GRANT and REVOKE rather than the role form.
    fn privileges_form_follows(&self, terminator: Keyword) -> bool {
        let mut n = 0;
        loop {
            let kind = self.stream.peek_kind(n);
            match kind {
                TokenKind::Eof | TokenKind::Semicolon => return false,
                _ if kind.is_keyword(Keyword::On) => return true,
                _ if kind.is_keyword(terminator) => return false,
                _ => n += 1,
            }
        }
    }

    /// `ALL PRIVILEGES` or a list of privilege names.
    fn parse_privileges(&mut self) -> ParseResult<Privileges> {
        if self
            .stream
            .consume_keywords(&[Keyword::All, Keyword::Privileges])
        {
            return Ok(Privileges::All);
        }
        let names = self.parse_comma_separated(|p| {
            let token = p.stream.current();
            match token.kind.keyword() {
                Some(Keyword::Select | Keyword::Insert | Keyword::Delete) => {
                    p.stream.advance();
                    Ok(Identifier::new(
                        token.text.clone(),
                        Quoting::Unquoted,
                        token.span.clone(),
                    ))
                }
                _ => {
                    p.stream.expecting_all(&["SELECT", "INSERT", "DELETE"]);
                    p.parse_identifier()
                }
            }
        })?;
        Ok(Privileges::Named(names))
    }

    /// `USER name`, `ROLE name` or a bare name.
    fn parse_principal(&mut self) -> ParseResult<Principal> {
        let name_follows = self.stream.peek_kind(1).is_identifier_like();
        if name_follows && self.stream.consume_keyword(Keyword::User) {
            return Ok(Principal::User(self.parse_identifier()?));
        }
        if name_follows && self.stream.consume_keyword(Keyword::Role) {
            return Ok(Principal::Role(self.parse_identifier()?));
        }
        Ok(Principal::Unspecified(self.parse_identifier()?))
    }

    fn parse_grantor(&mut self) -> ParseResult<Grantor> {
        if self.stream.consume_keyword(Keyword::CurrentUser) {
            return Ok(Grantor::CurrentUser);
        }
        if self.stream.consume_keyword(Keyword::CurrentRole) {
            return Ok(Grantor::CurrentRole);
        }
        Ok(Grantor::Principal(self.parse_principal()?))
    }

    fn parse_granted_by(&mut self) -> ParseResult<Option<Grantor>> {
        if self
            .stream
            .consume_keywords(&[Keyword::Granted, Keyword::By])
        {
            Ok(Some(self.parse_grantor()?))
        } else {
            Ok(None)
        }
    }
}
