//! Observability sink for soft failures
//!
//! Every [`Diagnostic`] raised during reconciliation is handed to a
//! [`DiagnosticSink`]. The default [`LogSink`] forwards to the `log` facade;
//! [`RecordingSink`] keeps them for later inspection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Diagnostic;

/// Receiver for non-fatal diagnostics
pub trait DiagnosticSink {
    /// Report one diagnostic
    fn emit(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Box<T> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Sink that writes diagnostics to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownFamily { .. } | Diagnostic::ConstructionFailed { .. } => {
                log::error!("{diagnostic}");
            }
            _ => log::warn!("{diagnostic}"),
        }
    }
}

/// Sink that records diagnostics and also logs them
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking emitter cannot leave the Vec half-written
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of everything recorded so far
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of diagnostics recorded
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        LogSink.emit(diagnostic.clone());
        self.lock().push(diagnostic);
    }
}
