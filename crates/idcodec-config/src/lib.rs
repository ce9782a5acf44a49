// crates/idcodec-config/src/lib.rs
// ============================================================================
// Module: IdCodec Config Library
// Description: Config model and validation for the id mapping layer.
// Purpose: Single source of truth for idcodec.toml semantics.
// Dependencies: idcodec-core, idcodec-json, serde, toml
// ============================================================================

//! ## Overview
//! `idcodec-config` loads `idcodec.toml`, validates it fail-closed and turns
//! it into the mapping context and audit sink used at runtime.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
