// crates/idcodec-json/src/adapters.rs
// ============================================================================
// Module: Id Adapters
// Description: Value and map-key adapters between ids and JSON strings.
// Purpose: Apply the codec with flags derived from the mapping context.
// Dependencies: idcodec-core
// ============================================================================

//! ## Overview
//! Field values hold unqualified ids: the field's static type already names
//! the id class. Map keys hold qualified ids, since one map may mix id
//! classes.
//!
//! Every adapter derives its codec flags from its [`MappingContext`] on
//! first use and keeps them for its lifetime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::OnceLock;

use idcodec_core::Id;
use idcodec_core::IdClass;
use idcodec_core::IdCodec;
use idcodec_core::IdCodecFlags;
use idcodec_core::IdType;
use idcodec_core::downcast_id;

use crate::context::MappingContext;
use crate::context::id_codec_flags;
use crate::error::IdJsonError;

// ============================================================================
// SECTION: Context Flags
// ============================================================================

/// Mapping context plus its lazily derived codec flags.
#[derive(Debug)]
struct ContextFlags {
    /// Context of the owning mapper; `None` outside any mapper.
    context: Option<MappingContext>,
    /// Flags computed on first use.
    flags: OnceLock<IdCodecFlags>,
}

impl ContextFlags {
    /// Wraps a context without computing flags yet.
    const fn new(context: Option<MappingContext>) -> Self {
        Self {
            context,
            flags: OnceLock::new(),
        }
    }

    /// Returns the cached codec flags.
    fn get(&self) -> IdCodecFlags {
        *self.flags.get_or_init(|| id_codec_flags(self.context.as_ref()))
    }

    /// Returns true when the context asks for lenient decoding.
    fn is_lenient_mode(&self) -> bool {
        self.context.as_ref().is_some_and(MappingContext::is_lenient_mode)
    }
}

// ============================================================================
// SECTION: Map Keys
// ============================================================================

/// Decoded map key: the id, or the raw key passed through in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdMapKey<T> {
    /// Successfully decoded id.
    Id(T),
    /// Undecodable key kept verbatim.
    Raw(String),
}

impl<T> IdMapKey<T> {
    /// Returns the decoded id, if any.
    #[must_use]
    pub const fn as_id(&self) -> Option<&T> {
        match self {
            Self::Id(id) => Some(id),
            Self::Raw(_) => None,
        }
    }

    /// Converts into the decoded id, if any.
    #[must_use]
    pub fn into_id(self) -> Option<T> {
        match self {
            Self::Id(id) => Some(id),
            Self::Raw(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Unqualified Values
// ============================================================================

/// Writes ids as unqualified field values.
#[derive(Debug)]
pub struct UnqualifiedIdSerializer {
    /// Shared codec.
    codec: Arc<IdCodec>,
    /// Context flags.
    flags: ContextFlags,
}

impl UnqualifiedIdSerializer {
    /// Creates the adapter for a mapper with `context`.
    #[must_use]
    pub const fn new(codec: Arc<IdCodec>, context: Option<MappingContext>) -> Self {
        Self {
            codec,
            flags: ContextFlags::new(context),
        }
    }

    /// Returns the codec flags applied by this adapter.
    #[must_use]
    pub fn flags(&self) -> IdCodecFlags {
        self.flags.get()
    }

    /// Returns the unqualified text of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError::Codec`] when the codec cannot encode the id.
    pub fn to_text(&self, id: &dyn Id) -> Result<String, IdJsonError> {
        Ok(self.codec.to_unqualified(Some(id), self.flags())?.unwrap_or_default())
    }
}

/// Reads ids from unqualified field values.
#[derive(Debug)]
pub struct UnqualifiedIdDeserializer {
    /// Shared codec.
    codec: Arc<IdCodec>,
    /// Context flags.
    flags: ContextFlags,
}

impl UnqualifiedIdDeserializer {
    /// Creates the adapter for a mapper with `context`.
    #[must_use]
    pub const fn new(codec: Arc<IdCodec>, context: Option<MappingContext>) -> Self {
        Self {
            codec,
            flags: ContextFlags::new(context),
        }
    }

    /// Returns the codec flags applied by this adapter.
    #[must_use]
    pub fn flags(&self) -> IdCodecFlags {
        self.flags.get()
    }

    /// Decodes an optional field value into `T`.
    ///
    /// In lenient mode a decode failure yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError::InvalidFormat`] naming the text and `T`.
    pub fn from_text<T: IdType>(&self, text: Option<&str>) -> Result<Option<T>, IdJsonError> {
        match self.codec.from_unqualified::<T>(text, self.flags()) {
            Ok(id) => Ok(id),
            Err(_) if self.flags.is_lenient_mode() => Ok(None),
            Err(err) => Err(IdJsonError::InvalidFormat {
                message: format!("failed to deserialize unqualified id: {err}"),
                value: text.unwrap_or_default().to_string(),
                id_class: IdClass::of::<T>().name(),
            }),
        }
    }

    /// Decodes a required field value into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError::InvalidFormat`] when the text does not decode
    /// to an id, including empty text. Lenient mode does not apply.
    pub fn from_required_text<T: IdType>(&self, text: &str) -> Result<T, IdJsonError> {
        let invalid = |message: String| IdJsonError::InvalidFormat {
            message,
            value: text.to_string(),
            id_class: IdClass::of::<T>().name(),
        };
        self.codec
            .from_unqualified::<T>(Some(text), self.flags())
            .map_err(|err| invalid(format!("failed to deserialize unqualified id: {err}")))?
            .ok_or_else(|| invalid("unqualified id is absent".to_string()))
    }
}

// ============================================================================
// SECTION: Qualified Map Keys
// ============================================================================

/// Writes ids as qualified map keys.
#[derive(Debug)]
pub struct QualifiedIdMapKeySerializer {
    /// Shared codec.
    codec: Arc<IdCodec>,
    /// Context flags.
    flags: ContextFlags,
}

impl QualifiedIdMapKeySerializer {
    /// Creates the adapter for a mapper with `context`.
    #[must_use]
    pub const fn new(codec: Arc<IdCodec>, context: Option<MappingContext>) -> Self {
        Self {
            codec,
            flags: ContextFlags::new(context),
        }
    }

    /// Returns the codec flags applied by this adapter.
    #[must_use]
    pub fn flags(&self) -> IdCodecFlags {
        self.flags.get()
    }

    /// Returns the qualified key text of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError::Codec`] when the id class has no type name or
    /// a component cannot be encoded.
    pub fn to_key(&self, id: &dyn Id) -> Result<String, IdJsonError> {
        Ok(self.codec.to_qualified(Some(id), self.flags())?.unwrap_or_default())
    }
}

/// Reads ids from qualified map keys.
#[derive(Debug)]
pub struct QualifiedIdMapKeyDeserializer {
    /// Shared codec.
    codec: Arc<IdCodec>,
    /// Context flags.
    flags: ContextFlags,
}

impl QualifiedIdMapKeyDeserializer {
    /// Creates the adapter for a mapper with `context`.
    #[must_use]
    pub const fn new(codec: Arc<IdCodec>, context: Option<MappingContext>) -> Self {
        Self {
            codec,
            flags: ContextFlags::new(context),
        }
    }

    /// Returns the codec flags applied by this adapter.
    #[must_use]
    pub fn flags(&self) -> IdCodecFlags {
        self.flags.get()
    }

    /// Decodes a qualified key that must name id class `T`.
    ///
    /// An empty key, an id of another class and any codec failure are
    /// rejected; in lenient mode the key is passed through as
    /// [`IdMapKey::Raw`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`IdJsonError::InvalidFormat`] naming the key and `T`.
    pub fn from_key<T: IdType>(&self, key: &str) -> Result<IdMapKey<T>, IdJsonError> {
        match self.decode::<T>(key) {
            Ok(id) => Ok(IdMapKey::Id(id)),
            Err(_) if self.flags.is_lenient_mode() => Ok(IdMapKey::Raw(key.to_string())),
            Err(message) => Err(IdJsonError::InvalidFormat {
                message: format!("failed to deserialize qualified id map key: {message}"),
                value: key.to_string(),
                id_class: IdClass::of::<T>().name(),
            }),
        }
    }

    /// Decodes `key` and checks the resulting class.
    fn decode<T: IdType>(&self, key: &str) -> Result<T, String> {
        let id = self
            .codec
            .from_qualified(Some(key), self.flags())
            .map_err(|err| err.to_string())?
            .ok_or_else(|| "qualified id is absent".to_string())?;
        let id_class = id.id_class();
        downcast_id::<T>(id).ok_or_else(|| format!("id of class {id_class} is not a {}", IdClass::of::<T>()))
    }
}
