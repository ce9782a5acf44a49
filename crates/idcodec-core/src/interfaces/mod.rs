// crates/idcodec-core/src/interfaces/mod.rs
// ============================================================================
// Module: IdCodec Interfaces
// Description: Host-supplied extension points of the codec.
// Purpose: Let applications encode id shapes the codec does not know.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! The codec walks root and composite ids itself. Any other shape is handed
//! to an [`UnknownIdHandler`]; the default [`RejectUnknownIds`] fails with
//! [`IdError::UnsupportedIdType`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::IdError;
use crate::core::flags::IdCodecFlags;
use crate::core::identifiers::Id;
use crate::runtime::codec::IdCodec;

// ============================================================================
// SECTION: Unknown Id Handler
// ============================================================================

/// Encodes ids whose shape is [`IdShape::Other`](crate::IdShape::Other).
pub trait UnknownIdHandler: Send + Sync {
    /// Returns the unqualified form of `id`.
    ///
    /// Implementations may call back into `codec` for nested known ids.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] when the id cannot be encoded.
    fn to_unqualified(&self, codec: &IdCodec, id: &dyn Id, flags: IdCodecFlags) -> Result<String, IdError>;
}

/// Default handler rejecting every unknown id shape.
pub struct RejectUnknownIds;

impl UnknownIdHandler for RejectUnknownIds {
    fn to_unqualified(&self, _codec: &IdCodec, id: &dyn Id, _flags: IdCodecFlags) -> Result<String, IdError> {
        Err(IdError::UnsupportedIdType {
            id_class: id.id_class().name().to_string(),
        })
    }
}
