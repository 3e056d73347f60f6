//! Diagnostic model shared by the lexer, the parser and script recovery.
//!
//! A [`Diag`] is plain data. Rendering is deferred to
//! [`convert_diagnostics_to_reports`], which produces `miette` reports with the
//! offending SQL attached as source code.

use crate::ast::Span;
use miette::{Diagnostic, LabeledSpan, Report, Severity};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// The input was rejected.
    Error,
    /// The input was accepted but looks suspicious.
    Warning,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// Whether a label marks the main location or supporting context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Primary,
    Secondary,
}

/// A span of source text with a short explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    pub span: Span,
    pub message: String,
    pub role: LabelRole,
}

impl DiagLabel {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Secondary,
        }
    }
}

/// A structured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub severity: DiagSeverity,
    pub message: String,
    /// Labeled source locations; the first primary label is the anchor.
    pub labels: Vec<DiagLabel>,
    pub help: Option<String>,
    pub notes: Vec<String>,
    /// Stable code such as `P001` (parser) or `L001` (lexer).
    pub code: Option<String>,
}

impl Diag {
    /// Creates a diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
        }
    }

    /// Creates an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Warning, message)
    }

    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// SQL text a diagnostic is rendered against.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
}

impl SourceFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Clamps a span into the bounds of the content.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// Renders diagnostics as `miette` reports.
pub fn convert_diagnostics_to_reports(diagnostics: &[Diag], source: &SourceFile) -> Vec<Report> {
    diagnostics
        .iter()
        .map(|diag| convert_diag_to_report(diag, source))
        .collect()
}

/// Renders a single diagnostic as a `miette` report.
///
/// Label spans outside the source are clamped rather than rejected.
pub fn convert_diag_to_report(diag: &Diag, source: &SourceFile) -> Report {
    Report::new(RenderedDiag::build(diag, source)).with_source_code(source.content().to_string())
}

#[derive(Debug)]
struct RenderedDiag {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    notes: Vec<RenderedNote>,
}

impl RenderedDiag {
    fn build(diag: &Diag, source: &SourceFile) -> Self {
        let labels = diag
            .labels
            .iter()
            .map(|label| {
                let span = source.clamp_span(&label.span);
                let offset_len = (span.start, span.end - span.start);
                match label.role {
                    LabelRole::Primary => {
                        LabeledSpan::new_primary_with_span(Some(label.message.clone()), offset_len)
                    }
                    LabelRole::Secondary => {
                        LabeledSpan::new_with_span(Some(label.message.clone()), offset_len)
                    }
                }
            })
            .collect();

        Self {
            message: diag.message.clone(),
            severity: match diag.severity {
                DiagSeverity::Error => Severity::Error,
                DiagSeverity::Warning => Severity::Warning,
            },
            code: diag.code.clone(),
            help: diag.help.clone(),
            labels,
            notes: diag.notes.iter().cloned().map(RenderedNote).collect(),
        }
    }
}

#[derive(Debug)]
struct RenderedNote(String);

impl fmt::Display for RenderedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RenderedDiag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RenderedDiag {}
impl std::error::Error for RenderedNote {}

impl Diagnostic for RenderedDiag {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.iter().cloned()))
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.notes.is_empty() {
            None
        } else {
            Some(Box::new(
                self.notes.iter().map(|note| note as &dyn Diagnostic),
            ))
        }
    }
}

impl Diagnostic for RenderedNote {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Advice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_parts() {
        let diag = Diag::error("duplicate language clause")
            .with_primary_label(60..72, "second clause")
            .with_secondary_label(40..52, "first clause")
            .with_help("remove one of the clauses")
            .with_note("each routine characteristic may appear once")
            .with_code("P004");

        assert_eq!(diag.severity, DiagSeverity::Error);
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[0].role, LabelRole::Primary);
        assert_eq!(diag.labels[1].role, LabelRole::Secondary);
        assert_eq!(diag.help.as_deref(), Some("remove one of the clauses"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.code.as_deref(), Some("P004"));
    }

    #[test]
    fn severity_display() {
        assert_eq!(DiagSeverity::Error.to_string(), "error");
        assert_eq!(DiagSeverity::Warning.to_string(), "warning");
        assert_eq!(Diag::warning("empty statement").severity, DiagSeverity::Warning);
    }

    #[test]
    fn clamp_span_stays_in_bounds() {
        let src = SourceFile::new("SELECT");
        assert_eq!(src.clamp_span(&(0..100)), 0..6);
        assert_eq!(src.clamp_span(&(10..20)), 6..6);
        assert_eq!(src.clamp_span(&(2..4)), 2..4);
    }

    #[test]
    fn report_keeps_message_code_and_labels() {
        let source = SourceFile::new("SELECT FROM t");
        let diag = Diag::error("unexpected 'FROM'")
            .with_primary_label(7..11, "unexpected token")
            .with_code("P001");

        let rendered = RenderedDiag::build(&diag, &source);
        assert_eq!(rendered.code.as_deref(), Some("P001"));
        assert_eq!(rendered.labels.len(), 1);
        assert!(rendered.labels[0].primary());
        assert_eq!(rendered.labels[0].offset(), 7);
        assert_eq!(rendered.labels[0].len(), 4);

        let report = convert_diag_to_report(&diag, &source);
        assert_eq!(report.to_string(), "unexpected 'FROM'");
    }

    #[test]
    fn notes_become_related_advice() {
        let source = SourceFile::new("SELECT 1");
        let diag = Diag::error("root").with_note("first").with_note("second");
        let rendered = RenderedDiag::build(&diag, &source);
        let related = rendered
            .related()
            .expect("notes should be related diagnostics")
            .collect::<Vec<_>>();
        assert_eq!(related.len(), 2);
        assert_eq!(related[1].to_string(), "second");
        assert_eq!(related[0].severity(), Some(Severity::Advice));
    }

    #[test]
    fn out_of_bounds_labels_do_not_panic() {
        let source = SourceFile::new("short");
        let diags = vec![
            Diag::error("first").with_primary_label(0..100, "clamped"),
            Diag::warning("second"),
        ];
        let reports = convert_diagnostics_to_reports(&diags, &source);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].to_string(), "second");
    }
}
