// crates/idcodec-json/src/filter.rs
// ============================================================================
// Module: Id Encryption Filter
// Description: Request/response hook selecting the id-encryption mapper.
// Purpose: Read request bodies and write response bodies with encrypted ids.
// Dependencies: idcodec-core, serde
// ============================================================================

//! ## Overview
//! A REST layer calls [`IdEncryptionFilter::on_request`] before reading the
//! request body and [`IdEncryptionFilter::on_response`] before writing the
//! response body. Each hook installs the id-encryption mapper on the current
//! thread until the returned guard drops, so data objects handled in between
//! see [`IdCodecFlag::Encryption`](idcodec_core::IdCodecFlag::Encryption).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use idcodec_core::IdCodec;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::IdJsonError;
use crate::mapper::DataObjectMapper;
use crate::mapper::MapperScope;

// ============================================================================
// SECTION: Filter
// ============================================================================

/// Swaps in the id-encryption mapper for request and response bodies.
#[derive(Debug, Clone)]
pub struct IdEncryptionFilter {
    /// Mapper with id encryption asserted.
    mapper: DataObjectMapper,
}

impl IdEncryptionFilter {
    /// Creates the filter over `codec`.
    #[must_use]
    pub fn new(codec: Arc<IdCodec>) -> Self {
        Self {
            mapper: DataObjectMapper::id_encryption(codec),
        }
    }

    /// Returns the id-encryption mapper.
    #[must_use]
    pub const fn mapper(&self) -> &DataObjectMapper {
        &self.mapper
    }

    /// Installs the mapper for reading a request body.
    #[must_use = "the mapper is only active while the scope guard is alive"]
    pub fn on_request(&self) -> MapperScope {
        self.mapper.enter()
    }

    /// Installs the mapper for writing a response body.
    #[must_use = "the mapper is only active while the scope guard is alive"]
    pub fn on_response(&self) -> MapperScope {
        self.mapper.enter()
    }

    /// Reads a request body with the id-encryption mapper.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError`] when the body cannot be read.
    pub fn read_request<T: DeserializeOwned>(&self, body: &str) -> Result<T, IdJsonError> {
        self.mapper.read_value(body)
    }

    /// Writes a response body with the id-encryption mapper.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError`] when the value cannot be written.
    pub fn write_response<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, IdJsonError> {
        self.mapper.write_value_as_string(value)
    }
}
