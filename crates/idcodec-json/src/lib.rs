// crates/idcodec-json/src/lib.rs
// ============================================================================
// Module: IdCodec JSON Library
// Description: Serde integration for typed ids.
// Purpose: Expose the mapping context, id adapters, mapper and field helpers.
// Dependencies: idcodec-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Typed ids appear in JSON data objects in two places. A field holding one
//! statically typed id is written unqualified; an object key is written
//! qualified because one map may hold ids of several classes.
//!
//! Field helpers reach their adapters through the [`DataObjectMapper`]
//! active on the current thread; every mapper entry point installs itself
//! for the duration of the call.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapters;
pub mod context;
pub mod error;
pub mod fields;
pub mod filter;
pub mod mapper;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapters::IdMapKey;
pub use adapters::QualifiedIdMapKeyDeserializer;
pub use adapters::QualifiedIdMapKeySerializer;
pub use adapters::UnqualifiedIdDeserializer;
pub use adapters::UnqualifiedIdSerializer;
pub use context::MappingContext;
pub use context::id_codec_flags;
pub use error::IdJsonError;
pub use fields::QualifiedKey;
pub use fields::qualified_map;
pub use fields::unqualified;
pub use fields::unqualified_opt;
pub use filter::IdEncryptionFilter;
pub use mapper::DataObjectMapper;
pub use mapper::MapperScope;
pub use mapper::active_mapper;
pub use mapper::with_active_mapper;
