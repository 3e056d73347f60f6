//! Parser configuration.

/// How numeric literals with a decimal point (`1.5`, `.5`) are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalLiteralTreatment {
    /// Produce [`Literal::Double`](crate::ast::Literal::Double).
    #[default]
    AsDouble,
    /// Produce [`Literal::Decimal`](crate::ast::Literal::Decimal).
    AsDecimal,
    /// Fail with an error suggesting an explicit `DECIMAL '...'` or exponent form.
    Reject,
}

/// Options controlling what the parser accepts.
///
/// # Example
///
/// ```
/// use sql_parser::{DecimalLiteralTreatment, ParserOptions};
///
/// let options = ParserOptions::default()
///     .with_decimal_literal_treatment(DecimalLiteralTreatment::AsDecimal)
///     .with_max_nesting_depth(16);
/// assert!(options.allow_backquoted_identifiers);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub decimal_literal_treatment: DecimalLiteralTreatment,
    /// Accept `` `name` `` identifiers.
    pub allow_backquoted_identifiers: bool,
    /// Accept identifiers that start with a digit, such as `1st`.
    pub allow_digit_identifiers: bool,
    /// Maximum depth of nested expressions, queries, relations and types.
    ///
    /// The default of 32 stops recursion well before it exhausts a 2 MiB
    /// thread stack, including in unoptimized builds. Raise it only for
    /// parsers running on larger stacks.
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            decimal_literal_treatment: DecimalLiteralTreatment::AsDouble,
            allow_backquoted_identifiers: true,
            allow_digit_identifiers: true,
            max_nesting_depth: 32,
        }
    }
}

impl ParserOptions {
    pub fn with_decimal_literal_treatment(mut self, treatment: DecimalLiteralTreatment) -> Self {
        self.decimal_literal_treatment = treatment;
        self
    }

    pub fn with_backquoted_identifiers(mut self, allow: bool) -> Self {
        self.allow_backquoted_identifiers = allow;
        self
    }

    pub fn with_digit_identifiers(mut self, allow: bool) -> Self {
        self.allow_digit_identifiers = allow;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}
