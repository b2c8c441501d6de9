//! Diagnostics Collaborator
//!
//! Schema resolution degrades on bad input instead of failing - malformed
//! `$ref` pointers, dangling definitions, reference cycles. Those
//! degradations still need to be visible somewhere, so the resolver reports
//! them through an injected [`Diagnostics`] sink rather than logging into a
//! hidden global side-channel.
//!
//! [`TracingDiagnostics`] is the production sink (forwards to `tracing`);
//! [`RecordingDiagnostics`] captures messages for assertions in tests.

use std::sync::Mutex;

/// Sink for non-fatal engine diagnostics.
///
/// Warnings mark recovered degradations (resolution fell back to "no schema
/// known"); debug messages mark deliberate no-op paths (equality
/// short-circuits, stale report drops).
pub trait Diagnostics: Send + Sync {
    /// Report a recovered degradation.
    fn warn(&self, message: &str);

    /// Report a deliberate no-op or skipped step.
    fn debug(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }
}

/// Captures diagnostics in memory. Intended for tests and embedding hosts
/// that surface engine diagnostics through their own channels.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    warnings: Mutex<Vec<String>>,
    debugs: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings recorded so far, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("diagnostics lock poisoned").clone()
    }

    /// Debug messages recorded so far, in order.
    pub fn debugs(&self) -> Vec<String> {
        self.debugs.lock().expect("diagnostics lock poisoned").clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .expect("diagnostics lock poisoned")
            .push(message.to_string());
    }

    fn debug(&self, message: &str) {
        self.debugs
            .lock()
            .expect("diagnostics lock poisoned")
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_diagnostics_captures_in_order() {
        let diagnostics = RecordingDiagnostics::new();
        diagnostics.warn("first");
        diagnostics.debug("second");
        diagnostics.warn("third");

        assert_eq!(diagnostics.warnings(), vec!["first", "third"]);
        assert_eq!(diagnostics.debugs(), vec!["second"]);
    }

    #[test]
    fn test_tracing_diagnostics_forwards_to_subscriber() {
        use std::io::{self, Write};
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::EnvFilter;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer({
                let capture = capture.clone();
                move || capture.clone()
            })
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingDiagnostics.warn("dangling reference degraded");
            TracingDiagnostics.debug("skipping unchanged value");
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("dangling reference degraded"));
        assert!(output.contains("skipping unchanged value"));
    }
}
