// crates/idcodec-core/src/registry/mod.rs
// ============================================================================
// Module: IdCodec Registries
// Description: Startup-built lookup tables consumed by the codec.
// Purpose: Group the raw type registry, id inventory and id factory.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Registries are populated once during startup and then shared read-only.
//! Mutation requires exclusive access, so a registry held by a codec behind
//! an `Arc` can no longer change.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod factory;
pub mod inventory;
pub mod raw_types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use factory::IdDescriptor;
pub use factory::IdFactory;
pub use inventory::IdInventory;
pub use raw_types::RawMapperError;
pub use raw_types::RawTypeMapper;
pub use raw_types::RawTypeRegistry;
