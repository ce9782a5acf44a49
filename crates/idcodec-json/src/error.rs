// crates/idcodec-json/src/error.rs
// ============================================================================
// Module: JSON Id Errors
// Description: Failures raised while mapping ids into and out of JSON.
// Purpose: Name the offending value and target id class on decode failures.
// Dependencies: idcodec-core, thiserror
// ============================================================================

//! ## Overview
//! Decode failures surface as [`IdJsonError::InvalidFormat`], carrying the
//! rejected text and the id class it was meant to become. Serde only
//! transports messages, so errors raised inside a serializer reach callers
//! of the mapper as [`IdJsonError::Json`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use idcodec_core::IdError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// JSON id mapping errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdJsonError {
    /// A JSON value or key could not be decoded into the target id class.
    #[error("{message} (value '{value}', target id class {id_class})")]
    InvalidFormat {
        /// Failure description.
        message: String,
        /// Rejected text.
        value: String,
        /// Target id class name.
        id_class: &'static str,
    },
    /// An id adapter ran outside a data-object mapper scope.
    #[error("no data object mapper is active on this thread")]
    NoActiveMapper,
    /// The codec failed while encoding an id.
    #[error(transparent)]
    Codec(#[from] IdError),
    /// The JSON document could not be read or written.
    #[error("json error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for IdJsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
