//! Identifiers and qualified names.

use crate::ast::Span;
use smol_str::SmolStr;
use std::fmt;

/// How an identifier was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quoting {
    /// A bare word: a plain or digit-led identifier, or a non-reserved keyword.
    Unquoted,
    /// `"name"`, case preserved exactly.
    Quoted,
    /// `` `name` ``
    Backquoted,
}

/// A single identifier.
///
/// `value` holds the text exactly as written, with quote characters removed
/// and doubled-quote escapes collapsed. No case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub value: SmolStr,
    pub quoting: Quoting,
    pub span: Span,
}

impl Identifier {
    pub fn new(value: impl Into<SmolStr>, quoting: Quoting, span: Span) -> Self {
        Self {
            value: value.into(),
            quoting,
            span,
        }
    }

    /// Returns true for `"quoted"` and `` `backquoted` `` identifiers.
    pub fn is_delimited(&self) -> bool {
        self.quoting != Quoting::Unquoted
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quoting {
            Quoting::Unquoted => f.write_str(&self.value),
            Quoting::Quoted => write!(f, "\"{}\"", self.value.replace('"', "\"\"")),
            Quoting::Backquoted => write!(f, "`{}`", self.value.replace('`', "``")),
        }
    }
}

/// A dotted name such as `catalog.schema.table`.
///
/// Always holds at least one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub parts: Vec<Identifier>,
    pub span: Span,
}

impl QualifiedName {
    /// Builds a name from its parts, spanning the first through the last part.
    pub fn new(parts: Vec<Identifier>) -> Self {
        let span = match (parts.first(), parts.last()) {
            (Some(first), Some(last)) => first.span.start..last.span.end,
            _ => 0..0,
        };
        Self { parts, span }
    }

    /// The last part, which names the object itself.
    pub fn suffix(&self) -> Option<&Identifier> {
        self.parts.last()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
