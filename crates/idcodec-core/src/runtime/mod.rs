// crates/idcodec-core/src/runtime/mod.rs
// ============================================================================
// Module: IdCodec Runtime
// Description: The codec converting ids to and from strings.
// Purpose: Group the stateless conversion engine.
// Dependencies: crate::{audit, core, interfaces, registry}
// ============================================================================

//! ## Overview
//! Runtime modules implement the conversion rules. Every outer surface, such
//! as JSON adapters, calls into the same [`IdCodec`] so the wire forms stay
//! identical everywhere.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod codec;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codec::COMPONENT_SEPARATOR;
pub use codec::IdCodec;
pub use codec::QUALIFIED_SEPARATOR;
