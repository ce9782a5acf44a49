// crates/idcodec-json/src/mapper.rs
// ============================================================================
// Module: Data Object Mapper
// Description: JSON entry points running with a scoped set of id adapters.
// Purpose: Make the mapper's adapters visible to serde field helpers.
// Dependencies: idcodec-core, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`DataObjectMapper`] owns a codec, a [`MappingContext`] and one adapter
//! of each kind. Serde field helpers cannot receive arguments, so every
//! mapper entry point first installs the mapper as the active mapper of the
//! current thread and removes it when the call returns.
//!
//! Scopes nest: the most recently installed mapper still in scope is the
//! active one. Field helpers record the typed error they raise on the active
//! entry, and the entry points return it instead of the flattened serde
//! message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::Cell;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use idcodec_core::IdCodec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::adapters::QualifiedIdMapKeyDeserializer;
use crate::adapters::QualifiedIdMapKeySerializer;
use crate::adapters::UnqualifiedIdDeserializer;
use crate::adapters::UnqualifiedIdSerializer;
use crate::context::MappingContext;
use crate::error::IdJsonError;

// ============================================================================
// SECTION: Mapper
// ============================================================================

/// Shared state of a mapper.
#[derive(Debug)]
struct MapperInner {
    /// Shared codec.
    codec: Arc<IdCodec>,
    /// Mapper switches.
    context: MappingContext,
    /// Field value writer.
    unqualified_serializer: UnqualifiedIdSerializer,
    /// Field value reader.
    unqualified_deserializer: UnqualifiedIdDeserializer,
    /// Map key writer.
    map_key_serializer: QualifiedIdMapKeySerializer,
    /// Map key reader.
    map_key_deserializer: QualifiedIdMapKeyDeserializer,
}

/// JSON mapper for data objects holding typed ids.
///
/// Cloning is cheap; clones share adapters and their cached flags.
#[derive(Debug, Clone)]
pub struct DataObjectMapper {
    /// Shared state.
    inner: Arc<MapperInner>,
}

impl DataObjectMapper {
    /// Creates a mapper over `codec` with `context`.
    #[must_use]
    pub fn new(codec: Arc<IdCodec>, context: MappingContext) -> Self {
        let scoped = Some(context);
        Self {
            inner: Arc::new(MapperInner {
                unqualified_serializer: UnqualifiedIdSerializer::new(Arc::clone(&codec), scoped),
                unqualified_deserializer: UnqualifiedIdDeserializer::new(Arc::clone(&codec), scoped),
                map_key_serializer: QualifiedIdMapKeySerializer::new(Arc::clone(&codec), scoped),
                map_key_deserializer: QualifiedIdMapKeyDeserializer::new(Arc::clone(&codec), scoped),
                codec,
                context,
            }),
        }
    }

    /// Creates the mapper variant with id encryption asserted.
    #[must_use]
    pub fn id_encryption(codec: Arc<IdCodec>) -> Self {
        Self::new(codec, MappingContext::new().with_id_encryption(true))
    }

    /// Returns the codec.
    #[must_use]
    pub fn codec(&self) -> &IdCodec {
        &self.inner.codec
    }

    /// Returns the mapping context.
    #[must_use]
    pub fn context(&self) -> MappingContext {
        self.inner.context
    }

    /// Returns the field value writer.
    #[must_use]
    pub fn unqualified_serializer(&self) -> &UnqualifiedIdSerializer {
        &self.inner.unqualified_serializer
    }

    /// Returns the field value reader.
    #[must_use]
    pub fn unqualified_deserializer(&self) -> &UnqualifiedIdDeserializer {
        &self.inner.unqualified_deserializer
    }

    /// Returns the map key writer.
    #[must_use]
    pub fn map_key_serializer(&self) -> &QualifiedIdMapKeySerializer {
        &self.inner.map_key_serializer
    }

    /// Returns the map key reader.
    #[must_use]
    pub fn map_key_deserializer(&self) -> &QualifiedIdMapKeyDeserializer {
        &self.inner.map_key_deserializer
    }

    /// Installs this mapper as the active mapper until the guard drops.
    #[must_use = "the mapper is only active while the scope guard is alive"]
    pub fn enter(&self) -> MapperScope {
        let token = NEXT_SCOPE_TOKEN.with(|next| {
            let token = next.get();
            next.set(token.wrapping_add(1));
            token
        });
        ACTIVE_MAPPERS.with(|mappers| {
            mappers.borrow_mut().push(ActiveMapper {
                token,
                mapper: self.clone(),
                failure: None,
            });
        });
        MapperScope {
            token,
            _thread_bound: PhantomData,
        }
    }

    /// Writes `value` as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the error raised by an id field helper, such as
    /// [`IdJsonError::Codec`] for an id that cannot be encoded, and
    /// [`IdJsonError::Json`] for any other serialization failure.
    pub fn write_value_as_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, IdJsonError> {
        let scope = self.enter();
        serde_json::to_string(value).map_err(|err| scope.into_error(err))
    }

    /// Reads `json` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError::InvalidFormat`] naming the rejected text and
    /// the target id class when an id field or map key cannot be decoded,
    /// and [`IdJsonError::Json`] when the document is malformed.
    pub fn read_value<T: DeserializeOwned>(&self, json: &str) -> Result<T, IdJsonError> {
        let scope = self.enter();
        serde_json::from_str(json).map_err(|err| scope.into_error(err))
    }

    /// Converts `value` into a JSON tree.
    ///
    /// # Errors
    ///
    /// Same as [`DataObjectMapper::write_value_as_string`].
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value, IdJsonError> {
        let scope = self.enter();
        serde_json::to_value(value).map_err(|err| scope.into_error(err))
    }

    /// Converts a JSON tree into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`DataObjectMapper::read_value`].
    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T, IdJsonError> {
        let scope = self.enter();
        serde_json::from_value(value).map_err(|err| scope.into_error(err))
    }
}

// ============================================================================
// SECTION: Active Mapper
// ============================================================================

/// Installed mapper plus the typed failure raised under it.
struct ActiveMapper {
    /// Identifies the scope that installed the entry.
    token: u64,
    /// Installed mapper.
    mapper: DataObjectMapper,
    /// Last error raised by a field helper while this entry was active.
    failure: Option<IdJsonError>,
}

std::thread_local! {
    /// Stack of installed mappers; the last entry is active.
    static ACTIVE_MAPPERS: RefCell<Vec<ActiveMapper>> = const { RefCell::new(Vec::new()) };
    /// Token handed to the next scope.
    static NEXT_SCOPE_TOKEN: Cell<u64> = const { Cell::new(0) };
}

/// Guard keeping a mapper installed on the current thread.
///
/// Dropping the guard removes exactly the entry it installed, so guards may
/// drop in any order. The guard is not `Send`; it must drop on the thread
/// that created it.
#[derive(Debug)]
pub struct MapperScope {
    /// Token of the installed entry.
    token: u64,
    /// Pins the guard to its thread.
    _thread_bound: PhantomData<*const ()>,
}

impl MapperScope {
    /// Takes the typed failure recorded under this scope, if any.
    fn take_failure(&self) -> Option<IdJsonError> {
        ACTIVE_MAPPERS.with(|mappers| {
            mappers
                .borrow_mut()
                .iter_mut()
                .rev()
                .find(|entry| entry.token == self.token)
                .and_then(|entry| entry.failure.take())
        })
    }

    /// Prefers the recorded typed failure over the flattened serde error.
    fn into_error(self, err: serde_json::Error) -> IdJsonError {
        match self.take_failure() {
            Some(failure) if err.is_data() => failure,
            _ => IdJsonError::from(err),
        }
    }
}

impl Drop for MapperScope {
    fn drop(&mut self) {
        ACTIVE_MAPPERS.with(|mappers| {
            let mut mappers = mappers.borrow_mut();
            if let Some(index) = mappers.iter().rposition(|entry| entry.token == self.token) {
                mappers.remove(index);
            }
        });
    }
}

/// Records `err` as the typed failure of the active mapper.
pub(crate) fn record_failure(err: IdJsonError) {
    ACTIVE_MAPPERS.with(|mappers| {
        if let Some(entry) = mappers.borrow_mut().last_mut() {
            entry.failure = Some(err);
        }
    });
}

/// Returns the active mapper of the current thread.
#[must_use]
pub fn active_mapper() -> Option<DataObjectMapper> {
    ACTIVE_MAPPERS.with(|mappers| mappers.borrow().last().map(|entry| entry.mapper.clone()))
}

/// Runs `f` with the active mapper.
///
/// # Errors
///
/// Returns [`IdJsonError::NoActiveMapper`] outside any mapper scope, or the
/// error of `f`.
pub fn with_active_mapper<R>(
    f: impl FnOnce(&DataObjectMapper) -> Result<R, IdJsonError>,
) -> Result<R, IdJsonError> {
    let mapper = active_mapper().ok_or(IdJsonError::NoActiveMapper)?;
    f(&mapper)
}
