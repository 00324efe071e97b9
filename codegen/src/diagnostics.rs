//! Diagnostic reporting shared by the generator and the lint pass.
//!
//! Every problem is a `(severity, location, message)` triple handed to a [`DiagnosticSink`].
//! Backends decide how to surface it: compile errors, collected lint issues or log lines.

use crate::model::{ColumnDescriptor, EntityDescriptor};
use crate::rules::Rule;
use proc_macro2::{Span, TokenStream};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Source construct a diagnostic is tied to: an entity or one of its fields.
#[derive(Clone, Debug)]
pub struct Location {
    pub span: Span,
    pub element: String,
}

impl Location {
    pub fn new(span: Span, element: impl Into<String>) -> Location {
        Location { span, element: element.into() }
    }

    pub fn entity(entity: &EntityDescriptor) -> Location {
        Location::new(entity.ident.span(), entity.name())
    }

    pub fn field(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Location {
        Location::new(column.span, format!("{}.{}", entity.name(), column.display_name()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element)
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
    pub rule: Option<Rule>,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: Location, message: impl Into<String>) -> Diagnostic {
        Diagnostic { severity, location, message: message.into(), rule: None }
    }

    pub fn error(location: Location, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Error, location, message)
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Warning, location, message)
    }

    pub fn with_rule(mut self, rule: Rule) -> Diagnostic {
        self.rule = Some(rule);
        self
    }

    pub fn report_to(self, sink: &mut dyn DiagnosticSink) {
        sink.report_diagnostic(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Aborts processing of a single entity. Carries the error diagnostic to report.
#[derive(Clone, Debug)]
pub struct AbortError(Box<Diagnostic>);

impl AbortError {
    pub fn new(location: Location, message: impl Into<String>) -> AbortError {
        AbortError(Box::new(Diagnostic::error(location, message)))
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.0
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        *self.0
    }
}

impl From<Diagnostic> for AbortError {
    fn from(diagnostic: Diagnostic) -> Self {
        AbortError(Box::new(diagnostic))
    }
}

impl From<syn::Error> for AbortError {
    fn from(err: syn::Error) -> Self {
        AbortError::new(Location::new(err.span(), "attribute"), err.to_string())
    }
}

impl fmt::Display for AbortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AbortError {}

pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, location: Location, message: String);

    /// Sinks that care about the originating rule override this.
    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.report(diagnostic.severity, diagnostic.location, diagnostic.message);
    }
}

/// Keeps every diagnostic in arrival order.
#[derive(Default, Debug)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, severity: Severity, location: Location, message: String) {
        self.diagnostics.push(Diagnostic::new(severity, location, message));
    }

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Writes diagnostics as log lines.
#[derive(Default, Debug)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, severity: Severity, location: Location, message: String) {
        match severity {
            Severity::Info => crate::info!("{location}: {message}"),
            Severity::Warning => crate::warn!("{location}: {message}"),
            Severity::Error => crate::error!("{location}: {message}"),
        }
    }
}

/// Turns errors into `compile_error!` invocations spanned on the offending construct,
/// everything else goes to the log.
#[derive(Default)]
pub struct CompileErrorSink {
    errors: Option<syn::Error>,
    log: LogSink,
}

impl CompileErrorSink {
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    pub fn into_compile_errors(self) -> TokenStream {
        self.errors.map(|e| e.to_compile_error()).unwrap_or_default()
    }
}

impl DiagnosticSink for CompileErrorSink {
    fn report(&mut self, severity: Severity, location: Location, message: String) {
        if severity != Severity::Error {
            self.log.report(severity, location, message);
            return;
        }
        let err = syn::Error::new(location.span, message);
        match &mut self.errors {
            Some(errors) => errors.combine(err),
            None => self.errors = Some(err),
        }
    }
}
