// crates/idcodec-core/src/audit.rs
// ============================================================================
// Module: IdCodec Audit Logging
// Description: Structured audit events for codec failures and lenient downgrades.
// Purpose: Emit JSON-line audit logs without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The codec records one [`IdCodecAuditEvent`] per failed call and per
//! lenient downgrade to an absent result. Events carry the operation, the
//! error classification, the id class and the active flags. Raw id values
//! are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::error::IdError;
use crate::core::error::IdErrorCategory;
use crate::core::flags::IdCodecFlags;
use crate::core::identifiers::IdClass;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Codec entry point that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdCodecOperation {
    /// `to_qualified`.
    ToQualified,
    /// `to_unqualified`.
    ToUnqualified,
    /// `from_qualified`.
    FromQualified,
    /// `from_unqualified`.
    FromUnqualified,
}

/// Outcome recorded for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdCodecOutcome {
    /// The call failed.
    Error,
    /// The call failed structurally and returned no id under the lenient flag.
    LenientAbsent,
}

/// Codec audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct IdCodecAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Codec operation.
    pub operation: IdCodecOperation,
    /// Call outcome.
    pub outcome: IdCodecOutcome,
    /// Error kind label.
    pub error_kind: &'static str,
    /// Error category.
    pub error_category: IdErrorCategory,
    /// Id class involved, when known.
    pub id_class: Option<&'static str>,
    /// Labels of the active codec flags.
    pub flags: Vec<&'static str>,
}

impl IdCodecAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(
        operation: IdCodecOperation,
        outcome: IdCodecOutcome,
        error: &IdError,
        id_class: Option<IdClass>,
        flags: IdCodecFlags,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "id_codec",
            timestamp_ms,
            operation,
            outcome,
            error_kind: error.kind(),
            error_category: error.category(),
            id_class: id_class.map(|id_class| id_class.name()),
            flags: flags.labels(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for codec events.
pub trait IdCodecAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &IdCodecAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl IdCodecAuditSink for StderrAuditSink {
    fn record(&self, event: &IdCodecAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl IdCodecAuditSink for FileAuditSink {
    fn record(&self, event: &IdCodecAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events.
    events: Mutex<Vec<IdCodecAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<IdCodecAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl IdCodecAuditSink for MemoryAuditSink {
    fn record(&self, event: &IdCodecAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl IdCodecAuditSink for NoopAuditSink {
    fn record(&self, _event: &IdCodecAuditEvent) {}
}
