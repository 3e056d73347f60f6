//! Type grammar.
//!
//! ```text
//! type := ARRAY '<' type '>'
//!       | MAP '<' type ',' type '>'
//!       | ROW '(' identifier type (',' identifier type)* ')'
//!       | INTERVAL field TO field
//!       | baseType ('(' typeParameter (',' typeParameter)* ')')?
//!       | type ARRAY
//! ```

use crate::ast::{ArraySyntax, BaseType, DataType, IntervalField, RowField, TypeParameter};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;

const TYPE_START: &[&str] = &[
    "ARRAY",
    "MAP",
    "ROW",
    "INTERVAL",
    "TIME WITH TIME ZONE",
    "TIMESTAMP WITH TIME ZONE",
    "DOUBLE PRECISION",
    "<identifier>",
];

const INTERVAL_FIELDS: &[&str] = &["YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND"];

impl Parser<'_> {
    /// Parses a type, including any postfix `ARRAY` suffixes.
    pub(crate) fn parse_type(&mut self) -> ParseResult<DataType> {
        self.nested(|p| {
            let start = p.stream.start();
            let mut data_type = p.parse_type_primary()?;
            while p.stream.consume_keyword(Keyword::Array) {
                data_type = DataType::Array {
                    element: Box::new(data_type),
                    syntax: ArraySyntax::Postfix,
                    span: p.stream.span_from(start),
                };
            }
            Ok(data_type)
        })
    }

    /// Parses `'(' (type (',' type)*)? ')'`, as used in routine signatures.
    pub(crate) fn parse_type_list(&mut self) -> ParseResult<Vec<DataType>> {
        self.stream.expect(&TokenKind::LParen)?;
        let types = if self.stream.check(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_type)?
        };
        self.stream.expect(&TokenKind::RParen)?;
        Ok(types)
    }

    fn parse_type_primary(&mut self) -> ParseResult<DataType> {
        let start = self.stream.start();
        let next = self.stream.peek_kind(1);
        let current = &self.stream.current().kind;

        if current.is_keyword(Keyword::Array) && *next == TokenKind::Lt {
            self.stream.advance();
            self.stream.advance();
            let element = self.parse_type()?;
            self.stream.expect(&TokenKind::Gt)?;
            return Ok(DataType::Array {
                element: Box::new(element),
                syntax: ArraySyntax::Angle,
                span: self.stream.span_from(start),
            });
        }

        if current.is_keyword(Keyword::Map) && *next == TokenKind::Lt {
            self.stream.advance();
            self.stream.advance();
            let key = self.parse_type()?;
            self.stream.expect(&TokenKind::Comma)?;
            let value = self.parse_type()?;
            self.stream.expect(&TokenKind::Gt)?;
            return Ok(DataType::Map {
                key: Box::new(key),
                value: Box::new(value),
                span: self.stream.span_from(start),
            });
        }

        if current.is_keyword(Keyword::Row) && *next == TokenKind::LParen {
            self.stream.advance();
            self.stream.advance();
            let fields = self.parse_comma_separated(|p| {
                let field_start = p.stream.start();
                let name = p.parse_identifier()?;
                let data_type = p.parse_type()?;
                Ok(RowField {
                    name,
                    data_type,
                    span: p.stream.span_from(field_start),
                })
            })?;
            self.stream.expect(&TokenKind::RParen)?;
            return Ok(DataType::Row {
                fields,
                span: self.stream.span_from(start),
            });
        }

        if current.is_keyword(Keyword::Interval) && interval_field(next).is_some() {
            self.stream.advance();
            let from = self.parse_interval_field()?;
            self.stream.expect_keyword(Keyword::To)?;
            let to = self.parse_interval_field()?;
            return Ok(DataType::Interval {
                from,
                to,
                span: self.stream.span_from(start),
            });
        }

        let base = match current {
            TokenKind::TimeWithTimeZone => {
                self.stream.advance();
                BaseType::TimeWithTimeZone
            }
            TokenKind::TimestampWithTimeZone => {
                self.stream.advance();
                BaseType::TimestampWithTimeZone
            }
            TokenKind::DoublePrecision => {
                self.stream.advance();
                BaseType::DoublePrecision
            }
            _ if self.at_identifier() => BaseType::Named(self.parse_qualified_name()?),
            _ => {
                self.stream.expecting_all(TYPE_START);
                return Err(self.stream.unexpected());
            }
        };

        let mut parameters = Vec::new();
        if self.stream.consume(&TokenKind::LParen) {
            parameters = self.parse_comma_separated(Self::parse_type_parameter)?;
            self.stream.expect(&TokenKind::RParen)?;
        }
        Ok(DataType::Generic {
            base,
            parameters,
            span: self.stream.span_from(start),
        })
    }

    fn parse_type_parameter(&mut self) -> ParseResult<TypeParameter> {
        if let TokenKind::Integer(value) = &self.stream.current().kind {
            let span = self.stream.advance().span.clone();
            return Ok(TypeParameter::Integer(value.clone(), span));
        }
        self.stream.expecting("<integer>");
        Ok(TypeParameter::Type(self.parse_type()?))
    }

    /// Parses one of `YEAR`, `MONTH`, `DAY`, `HOUR`, `MINUTE`, `SECOND`.
    pub(crate) fn parse_interval_field(&mut self) -> ParseResult<IntervalField> {
        match interval_field(&self.stream.current().kind) {
            Some(field) => {
                self.stream.advance();
                Ok(field)
            }
            None => {
                self.stream.expecting_all(INTERVAL_FIELDS);
                Err(self.stream.unexpected())
            }
        }
    }
}

pub(crate) fn interval_field(kind: &TokenKind) -> Option<IntervalField> {
    match kind.keyword()? {
        Keyword::Year => Some(IntervalField::Year),
        Keyword::Month => Some(IntervalField::Month),
        Keyword::Day => Some(IntervalField::Day),
        Keyword::Hour => Some(IntervalField::Hour),
        Keyword::Minute => Some(IntervalField::Minute),
        Keyword::Second => Some(IntervalField::Second),
        _ => None,
    }
}
