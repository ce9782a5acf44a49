// crates/idcodec-json/src/context.rs
// ============================================================================
// Module: Mapping Context
// Description: Per-mapper switches consulted by the id adapters.
// Purpose: Derive codec flags from the surrounding JSON mapping configuration.
// Dependencies: idcodec-core, serde
// ============================================================================

//! ## Overview
//! A [`MappingContext`] belongs to one data-object mapper. Adapters read it
//! once to compute their codec flags and to decide whether decode failures
//! pass through as absent values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use idcodec_core::IdCodecFlag;
use idcodec_core::IdCodecFlags;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Switches of one data-object mapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingContext {
    /// Ids are written and read in encrypted form.
    #[serde(default)]
    pub id_encryption: bool,
    /// Undecodable ids are treated as absent instead of failing.
    #[serde(default)]
    pub lenient_mode: bool,
}

impl MappingContext {
    /// Creates a context with every switch off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id_encryption: false,
            lenient_mode: false,
        }
    }

    /// Returns a copy with id encryption set to `enabled`.
    #[must_use]
    pub const fn with_id_encryption(mut self, enabled: bool) -> Self {
        self.id_encryption = enabled;
        self
    }

    /// Returns a copy with lenient mode set to `enabled`.
    #[must_use]
    pub const fn with_lenient_mode(mut self, enabled: bool) -> Self {
        self.lenient_mode = enabled;
        self
    }

    /// Returns true when id encryption is active.
    #[must_use]
    pub const fn is_id_encryption(&self) -> bool {
        self.id_encryption
    }

    /// Returns true when lenient mode is active.
    #[must_use]
    pub const fn is_lenient_mode(&self) -> bool {
        self.lenient_mode
    }
}

// ============================================================================
// SECTION: Flags
// ============================================================================

/// Returns the codec flags implied by `context`.
///
/// Only id encryption maps to a codec flag; lenient mode is applied by the
/// adapters themselves. No context yields the empty set.
#[must_use]
pub fn id_codec_flags(context: Option<&MappingContext>) -> IdCodecFlags {
    match context {
        Some(context) if context.is_id_encryption() => IdCodecFlags::from(IdCodecFlag::Encryption),
        _ => IdCodecFlags::NONE,
    }
}
