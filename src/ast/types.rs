//! Data type AST nodes.

use crate::ast::{Identifier, QualifiedName, Span};
use smol_str::SmolStr;
use std::fmt;

/// A data type, as written in `CAST`, column definitions and routine signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// `ARRAY<T>` or the postfix `T ARRAY`
    Array {
        element: Box<DataType>,
        syntax: ArraySyntax,
        span: Span,
    },
    /// `MAP<K, V>`
    Map {
        key: Box<DataType>,
        value: Box<DataType>,
        span: Span,
    },
    /// `ROW(name T, ...)`
    Row { fields: Vec<RowField>, span: Span },
    /// `INTERVAL <from> TO <to>`
    Interval {
        from: IntervalField,
        to: IntervalField,
        span: Span,
    },
    /// A base type with optional parameters: `bigint`, `varchar(10)`, `decimal(10, 2)`
    Generic {
        base: BaseType,
        parameters: Vec<TypeParameter>,
        span: Span,
    },
}

impl DataType {
    pub fn span(&self) -> Span {
        match self {
            DataType::Array { span, .. }
            | DataType::Map { span, .. }
            | DataType::Row { span, .. }
            | DataType::Interval { span, .. }
            | DataType::Generic { span, .. } => span.clone(),
        }
    }
}

/// Which spelling an array type used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySyntax {
    /// `ARRAY<T>`
    Angle,
    /// `T ARRAY`
    Postfix,
}

/// A named field of a `ROW` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowField {
    pub name: Identifier,
    pub data_type: DataType,
    pub span: Span,
}

/// The name part of a [`DataType::Generic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    TimeWithTimeZone,
    TimestampWithTimeZone,
    DoublePrecision,
    Named(QualifiedName),
}

/// A parameter inside `name(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeParameter {
    /// An integer literal, kept as written.
    Integer(SmolStr, Span),
    Type(DataType),
}

/// A field of an interval type or literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntervalField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for IntervalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntervalField::Year => "YEAR",
            IntervalField::Month => "MONTH",
            IntervalField::Day => "DAY",
            IntervalField::Hour => "HOUR",
            IntervalField::Minute => "MINUTE",
            IntervalField::Second => "SECOND",
        })
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::TimeWithTimeZone => f.write_str("TIME WITH TIME ZONE"),
            BaseType::TimestampWithTimeZone => f.write_str("TIMESTAMP WITH TIME ZONE"),
            BaseType::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            BaseType::Named(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeParameter::Integer(value, _) => f.write_str(value),
            TypeParameter::Type(data_type) => write!(f, "{data_type}"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Array {
                element,
                syntax: ArraySyntax::Angle,
                ..
            } => write!(f, "ARRAY<{element}>"),
            DataType::Array {
                element,
                syntax: ArraySyntax::Postfix,
                ..
            } => write!(f, "{element} ARRAY"),
            DataType::Map { key, value, .. } => write!(f, "MAP<{key}, {value}>"),
            DataType::Row { fields, .. } => {
                f.write_str("ROW(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", field.name, field.data_type)?;
                }
                f.write_str(")")
            }
            DataType::Interval { from, to, .. } => write!(f, "INTERVAL {from} TO {to}"),
            DataType::Generic {
                base, parameters, ..
            } => {
                write!(f, "{base}")?;
                if !parameters.is_empty() {
                    f.write_str("(")?;
                    for (i, parameter) in parameters.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{parameter}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}
