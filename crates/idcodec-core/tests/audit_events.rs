// crates/idcodec-core/tests/audit_events.rs
// ============================================================================
// Module: Codec Audit Tests
// Description: Audit events emitted for failures and lenient downgrades.
// Purpose: Ensure every failed call is recorded without leaking raw values.
// ============================================================================
//! ## Overview
//! Runs codec calls against in-memory and file sinks and inspects the
//! recorded JSON events.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;

use common::OrderKey;
use idcodec_core::FileAuditSink;
use idcodec_core::IdCodecFlags;
use idcodec_core::IdCodecOperation;
use idcodec_core::IdCodecOutcome;
use idcodec_core::IdErrorCategory;
use idcodec_core::MemoryAuditSink;
use serde_json::Value;

#[test]
fn successful_calls_record_nothing() {
    let sink = Arc::new(MemoryAuditSink::new());
    let codec = common::codec_with_audit(sink.clone());
    let text = codec.to_qualified(Some(&common::order_key()), IdCodecFlags::NONE).unwrap().unwrap();
    assert!(codec.from_qualified(Some(&text), IdCodecFlags::NONE).unwrap().is_some());
    assert!(codec.from_qualified(None, IdCodecFlags::NONE).unwrap().is_none());
    assert!(sink.events().is_empty());
}

#[test]
fn strict_failure_records_error_event() {
    let sink = Arc::new(MemoryAuditSink::new());
    let codec = common::codec_with_audit(sink.clone());
    assert!(codec.from_unqualified::<OrderKey>(Some("secret-tenant"), IdCodecFlags::ENCRYPTION).is_err());

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event, "id_codec");
    assert_eq!(event.operation, IdCodecOperation::FromUnqualified);
    assert_eq!(event.outcome, IdCodecOutcome::Error);
    assert_eq!(event.error_kind, "component_count");
    assert_eq!(event.error_category, IdErrorCategory::Format);
    assert!(event.id_class.unwrap().ends_with("OrderKey"));
    assert_eq!(event.flags, vec!["encryption"]);
}

#[test]
fn lenient_downgrade_records_absent_outcome() {
    let sink = Arc::new(MemoryAuditSink::new());
    let codec = common::codec_with_audit(sink.clone());
    assert!(codec.from_qualified(Some("Nope:1"), IdCodecFlags::LENIENT).unwrap().is_none());

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, IdCodecOutcome::LenientAbsent);
    assert_eq!(events[0].error_kind, "unknown_type_name");
    assert_eq!(events[0].id_class, None);
}

#[test]
fn events_never_carry_raw_values() {
    let sink = Arc::new(MemoryAuditSink::new());
    let codec = common::codec_with_audit(sink.clone());
    assert!(codec.from_qualified(Some("OrderKey:secret-tenant;not-a-number"), IdCodecFlags::NONE).is_err());

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let payload = serde_json::to_string(&events[0]).unwrap();
    assert!(!payload.contains("secret-tenant"));
    assert!(!payload.contains("not-a-number"));
}

#[test]
fn file_sink_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = Arc::new(FileAuditSink::new(&path).unwrap());
    let codec = common::codec_with_audit(sink);
    assert!(codec.from_qualified(Some("missing-separator"), IdCodecFlags::NONE).is_err());
    assert!(codec.from_qualified(Some("missing-separator"), IdCodecFlags::LENIENT).unwrap().is_none());

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<Value> = contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["outcome"], "error");
    assert_eq!(lines[0]["operation"], "from_qualified");
    assert_eq!(lines[1]["outcome"], "lenient_absent");
    assert_eq!(lines[1]["flags"], serde_json::json!(["lenient"]));
}
