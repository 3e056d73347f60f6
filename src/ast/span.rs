//! Source spans and spanned values.

use std::ops::Range;

/// Byte range in the source text.
///
/// This is the canonical span type used throughout the lexer, parser and AST.
pub type Span = Range<usize>;

/// Returns a span covering both `start` and `end`.
pub fn merge(start: &Span, end: &Span) -> Span {
    start.start.min(end.start)..start.end.max(end.end)
}

/// A value paired with the span it was parsed from.
///
/// Used for small leaves (string payloads, integer counts) that have no AST
/// node of their own but still need a location for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Where the value appears in the source.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Maps the inner value while keeping the span.
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            node: f(self.node),
            span: self.span,
        }
    }

    /// Extracts the inner value, discarding the span.
    pub fn into_inner(self) -> T {
        self.node
    }
}

impl<T> AsRef<T> for Spanned<T> {
    fn as_ref(&self) -> &T {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smol_str::SmolStr;

    #[test]
    fn merge_covers_both_ranges() {
        assert_eq!(merge(&(3..5), &(10..14)), 3..14);
        assert_eq!(merge(&(10..14), &(3..5)), 3..14);
        assert_eq!(merge(&(4..4), &(4..4)), 4..4);
    }

    #[test]
    fn spanned_map_keeps_span() {
        let comment = Spanned::new(SmolStr::new("orders table"), 30..44);
        let len = comment.map(|text| text.len());
        assert_eq!(len.node, 12);
        assert_eq!(len.span, 30..44);
    }

    #[test]
    fn spanned_into_inner_and_as_ref() {
        let count = Spanned::new(10_u64, 7..9);
        assert_eq!(*count.as_ref(), 10);
        assert_eq!(count.into_inner(), 10);
    }
}
