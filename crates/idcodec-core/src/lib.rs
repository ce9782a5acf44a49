// crates/idcodec-core/src/lib.rs
// ============================================================================
// Module: IdCodec Core Library
// Description: Public API surface for typed identifiers and their codec.
// Purpose: Expose id types, registries, the codec and audit sinks.
// Dependencies: crate::{audit, core, interfaces, registry, runtime}
// ============================================================================

//! ## Overview
//! IdCodec core converts strongly typed identifiers to and from compact
//! strings. An unqualified string carries only raw component values; a
//! qualified string prefixes them with a registered type name so the id
//! class can be recovered without context.
//!
//! Registries are built at startup and injected into an [`IdCodec`]; there
//! is no global state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod registry;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::FileAuditSink;
pub use audit::IdCodecAuditEvent;
pub use audit::IdCodecAuditSink;
pub use audit::IdCodecOperation;
pub use audit::IdCodecOutcome;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::RejectUnknownIds;
pub use interfaces::UnknownIdHandler;
pub use registry::IdDescriptor;
pub use registry::IdFactory;
pub use registry::IdInventory;
pub use registry::RawMapperError;
pub use registry::RawTypeMapper;
pub use registry::RawTypeRegistry;
pub use runtime::COMPONENT_SEPARATOR;
pub use runtime::IdCodec;
pub use runtime::QUALIFIED_SEPARATOR;
