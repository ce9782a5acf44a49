// crates/idcodec-json/src/fields.rs
// ============================================================================
// Module: Serde Field Helpers
// Description: `#[serde(with = "...")]` modules for id fields and id-keyed maps.
// Purpose: Route id fields through the adapters of the active mapper.
// Dependencies: idcodec-core, serde
// ============================================================================

//! ## Overview
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Order {
//!     #[serde(with = "idcodec_json::unqualified")]
//!     id: OrderId,
//!     #[serde(with = "idcodec_json::unqualified_opt", default)]
//!     parent: Option<OrderId>,
//!     #[serde(with = "idcodec_json::qualified_map")]
//!     refs: HashMap<IdMapKey<OrderId>, String>,
//! }
//! ```
//! The helpers fail outside a [`DataObjectMapper`] scope.

// ============================================================================
// SECTION: Imports
// ============================================================================

use idcodec_core::Id;

use crate::adapters::IdMapKey;
use crate::adapters::QualifiedIdMapKeySerializer;
use crate::error::IdJsonError;
use crate::mapper::DataObjectMapper;
use crate::mapper::active_mapper;
use crate::mapper::record_failure;

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Returns the active mapper or a serde error.
fn require_mapper<E, F>(custom: F) -> Result<DataObjectMapper, E>
where
    F: FnOnce(IdJsonError) -> E,
{
    active_mapper().ok_or_else(|| custom(IdJsonError::NoActiveMapper))
}

/// Converts `err` into a serializer error, keeping the typed error for the
/// mapper entry point.
fn ser_error<E: serde::ser::Error>(err: IdJsonError) -> E {
    let flattened = E::custom(&err);
    record_failure(err);
    flattened
}

/// Converts `err` into a deserializer error, keeping the typed error for the
/// mapper entry point.
fn de_error<E: serde::de::Error>(err: IdJsonError) -> E {
    let flattened = E::custom(&err);
    record_failure(err);
    flattened
}

/// Map key written through the qualified map key adapter.
pub trait QualifiedKey {
    /// Returns the JSON object key.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError`] when the key cannot be encoded.
    fn to_key(&self, adapter: &QualifiedIdMapKeySerializer) -> Result<String, IdJsonError>;
}

impl<T: Id> QualifiedKey for T {
    fn to_key(&self, adapter: &QualifiedIdMapKeySerializer) -> Result<String, IdJsonError> {
        adapter.to_key(self)
    }
}

impl<T: Id> QualifiedKey for IdMapKey<T> {
    fn to_key(&self, adapter: &QualifiedIdMapKeySerializer) -> Result<String, IdJsonError> {
        match self {
            Self::Id(id) => adapter.to_key(id),
            Self::Raw(key) => Ok(key.clone()),
        }
    }
}

// ============================================================================
// SECTION: Unqualified Values
// ============================================================================

/// Required id field written as an unqualified string.
pub mod unqualified {
    use idcodec_core::Id;
    use idcodec_core::IdType;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    use super::de_error;
    use super::require_mapper;
    use super::ser_error;

    /// Serializes `id` with the active mapper.
    ///
    /// # Errors
    ///
    /// Fails outside a mapper scope or when the codec cannot encode the id.
    pub fn serialize<I, S>(id: &I, serializer: S) -> Result<S::Ok, S::Error>
    where
        I: Id,
        S: Serializer,
    {
        let mapper = require_mapper(<S::Error as serde::ser::Error>::custom)?;
        let text = mapper.unqualified_serializer().to_text(id).map_err(ser_error::<S::Error>)?;
        serializer.serialize_str(&text)
    }

    /// Deserializes a required id with the active mapper.
    ///
    /// # Errors
    ///
    /// Fails outside a mapper scope or when the text does not decode to `T`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: IdType,
        D: Deserializer<'de>,
    {
        let mapper = require_mapper(<D::Error as serde::de::Error>::custom)?;
        let text = String::deserialize(deserializer)?;
        mapper
            .unqualified_deserializer()
            .from_required_text::<T>(&text)
            .map_err(de_error::<D::Error>)
    }
}

/// Optional id field written as an unqualified string or `null`.
///
/// Combine with `#[serde(default)]` to accept a missing field.
pub mod unqualified_opt {
    use idcodec_core::Id;
    use idcodec_core::IdType;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    use super::de_error;
    use super::require_mapper;
    use super::ser_error;

    /// Serializes `id` with the active mapper; `None` becomes `null`.
    ///
    /// # Errors
    ///
    /// Fails outside a mapper scope or when the codec cannot encode the id.
    #[allow(clippy::ref_option, reason = "serde `with` helpers receive the field by reference.")]
    pub fn serialize<I, S>(id: &Option<I>, serializer: S) -> Result<S::Ok, S::Error>
    where
        I: Id,
        S: Serializer,
    {
        match id {
            Some(id) => {
                let mapper = require_mapper(<S::Error as serde::ser::Error>::custom)?;
                let text = mapper.unqualified_serializer().to_text(id).map_err(ser_error::<S::Error>)?;
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional id with the active mapper.
    ///
    /// `null` and `""` decode to `None`; in lenient mode so does any
    /// undecodable value.
    ///
    /// # Errors
    ///
    /// Fails outside a mapper scope or when the text does not decode to `T`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: IdType,
        D: Deserializer<'de>,
    {
        let mapper = require_mapper(<D::Error as serde::de::Error>::custom)?;
        let text = Option::<String>::deserialize(deserializer)?;
        mapper
            .unqualified_deserializer()
            .from_text::<T>(text.as_deref())
            .map_err(de_error::<D::Error>)
    }
}

// ============================================================================
// SECTION: Qualified Map Keys
// ============================================================================

/// Map whose keys are written as qualified ids.
///
/// Keys may be any [`QualifiedKey`], so one map can mix id classes when its
/// key type is an enum over several ids. Reading requires a single target
/// class and yields [`IdMapKey`] keys.
pub mod qualified_map {
    use std::fmt;
    use std::marker::PhantomData;

    use idcodec_core::IdType;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;
    use serde::de::MapAccess;
    use serde::de::Visitor;
    use serde::ser::SerializeMap;

    use super::QualifiedKey;
    use super::de_error;
    use super::require_mapper;
    use super::ser_error;
    use crate::adapters::IdMapKey;
    use crate::mapper::DataObjectMapper;

    /// Serializes `map` with qualified keys.
    ///
    /// # Errors
    ///
    /// Fails outside a mapper scope, when a key cannot be encoded or when a
    /// value fails to serialize.
    pub fn serialize<'a, M, K, V, S>(map: &'a M, serializer: S) -> Result<S::Ok, S::Error>
    where
        &'a M: IntoIterator<Item = (&'a K, &'a V)>,
        K: QualifiedKey + 'a,
        V: Serialize + 'a,
        S: Serializer,
    {
        let mapper = require_mapper(<S::Error as serde::ser::Error>::custom)?;
        let adapter = mapper.map_key_serializer();
        let mut out = serializer.serialize_map(None)?;
        for (key, value) in map {
            let key = key.to_key(adapter).map_err(ser_error::<S::Error>)?;
            out.serialize_entry(&key, value)?;
        }
        out.end()
    }

    /// Deserializes a map keyed by qualified ids of class `K`.
    ///
    /// # Errors
    ///
    /// Fails outside a mapper scope, when a key does not decode to `K`
    /// outside lenient mode, or when a value fails to deserialize.
    pub fn deserialize<'de, M, K, V, D>(deserializer: D) -> Result<M, D::Error>
    where
        M: FromIterator<(IdMapKey<K>, V)>,
        K: IdType,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let mapper = require_mapper(<D::Error as serde::de::Error>::custom)?;
        let entries = deserializer.deserialize_map(QualifiedMapVisitor::<K, V> {
            mapper,
            marker: PhantomData,
        })?;
        Ok(entries.into_iter().collect())
    }

    /// Collects map entries, decoding each key.
    struct QualifiedMapVisitor<K, V> {
        /// Mapper providing the key adapter.
        mapper: DataObjectMapper,
        /// Entry types.
        marker: PhantomData<fn() -> (K, V)>,
    }

    impl<'de, K, V> Visitor<'de> for QualifiedMapVisitor<K, V>
    where
        K: IdType,
        V: Deserialize<'de>,
    {
        type Value = Vec<(IdMapKey<K>, V)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map keyed by qualified ids")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let adapter = self.mapper.map_key_deserializer();
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                let key = adapter.from_key::<K>(&key).map_err(de_error::<A::Error>)?;
                entries.push((key, value));
            }
            Ok(entries)
        }
    }
}
