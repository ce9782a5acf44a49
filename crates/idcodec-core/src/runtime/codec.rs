// crates/idcodec-core/src/runtime/codec.rs
// ============================================================================
// Module: Id Codec
// Description: Conversion between ids and their qualified/unqualified strings.
// Purpose: Encode and decode typed ids with pluggable raw type mapping.
// Dependencies: crate::{audit, core, interfaces, registry}
// ============================================================================

//! ## Overview
//! Wire forms:
//! - unqualified: `raw1;raw2;...;rawN`, one segment per flattened raw
//!   component, an empty segment for each raw component of an absent
//!   component (an absent nested composite of arity N writes N segments);
//! - qualified: `<type-name>:<unqualified>`, split on the first `:` only.
//!
//! Segments are never escaped, so raw values must not contain `;` or `:`.
//! An empty segment and an absent component are indistinguishable; both
//! decode to an absent component.
//!
//! The codec holds no per-call state. Registries are shared read-only, and
//! flags are passed with every call, so one codec may serve any number of
//! threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::audit::IdCodecAuditEvent;
use crate::audit::IdCodecAuditSink;
use crate::audit::IdCodecOperation;
use crate::audit::IdCodecOutcome;
use crate::audit::NoopAuditSink;
use crate::core::error::IdError;
use crate::core::flags::IdCodecFlags;
use crate::core::identifiers::Id;
use crate::core::identifiers::IdClass;
use crate::core::identifiers::IdComponent;
use crate::core::identifiers::IdShape;
use crate::core::identifiers::IdType;
use crate::core::raw::RawType;
use crate::core::raw::RawValue;
use crate::interfaces::RejectUnknownIds;
use crate::interfaces::UnknownIdHandler;
use crate::registry::IdFactory;
use crate::registry::IdInventory;
use crate::registry::RawMapperError;
use crate::registry::RawTypeRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between type name and unqualified id.
pub const QUALIFIED_SEPARATOR: char = ':';
/// Separator between raw components.
pub const COMPONENT_SEPARATOR: char = ';';

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Converts ids to and from their string representations.
#[derive(Clone)]
pub struct IdCodec {
    /// Raw type mappers.
    raw_types: Arc<RawTypeRegistry>,
    /// Type name registry.
    inventory: Arc<IdInventory>,
    /// Id constructors.
    factory: Arc<IdFactory>,
    /// Fallback for unknown id shapes.
    unknown_ids: Arc<dyn UnknownIdHandler>,
    /// Audit sink for failures and lenient downgrades.
    audit: Arc<dyn IdCodecAuditSink>,
}

impl IdCodec {
    /// Creates a codec over the given registries.
    #[must_use]
    pub fn new(
        raw_types: Arc<RawTypeRegistry>,
        inventory: Arc<IdInventory>,
        factory: Arc<IdFactory>,
    ) -> Self {
        Self {
            raw_types,
            inventory,
            factory,
            unknown_ids: Arc::new(RejectUnknownIds),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the handler for unknown id shapes.
    #[must_use]
    pub fn with_unknown_id_handler(mut self, handler: Arc<dyn UnknownIdHandler>) -> Self {
        self.unknown_ids = handler;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn IdCodecAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the raw type registry.
    #[must_use]
    pub fn raw_types(&self) -> &RawTypeRegistry {
        &self.raw_types
    }

    /// Returns the id inventory.
    #[must_use]
    pub fn inventory(&self) -> &IdInventory {
        &self.inventory
    }

    /// Returns the id factory.
    #[must_use]
    pub fn factory(&self) -> &IdFactory {
        &self.factory
    }

    // ------------------------------------------------------------------------
    // Id to string
    // ------------------------------------------------------------------------

    /// Returns `"<type-name>:<raw;raw;...>"`, or `None` for no id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::MissingTypeName`] when the id class has no type
    /// name, plus any error of [`IdCodec::to_unqualified`].
    pub fn to_qualified(&self, id: Option<&dyn Id>, flags: IdCodecFlags) -> Result<Option<String>, IdError> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.qualify(id, flags)
            .map(Some)
            .map_err(|err| self.fail(IdCodecOperation::ToQualified, Some(id.id_class()), flags, err))
    }

    /// Returns `"raw;raw;..."`, or `None` for no id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::MissingRawTypeMapper`] when a root value has no
    /// mapper, [`IdError::ComponentFormat`] when a mapper fails, and the
    /// unknown-id handler's error for other shapes.
    pub fn to_unqualified(&self, id: Option<&dyn Id>, flags: IdCodecFlags) -> Result<Option<String>, IdError> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.unqualify(id, flags)
            .map(Some)
            .map_err(|err| self.fail(IdCodecOperation::ToUnqualified, Some(id.id_class()), flags, err))
    }

    /// Encodes a present id without recording audit events.
    ///
    /// Unknown-id handlers use this to encode nested known ids.
    ///
    /// # Errors
    ///
    /// Same as [`IdCodec::to_unqualified`].
    pub fn unqualify(&self, id: &dyn Id, flags: IdCodecFlags) -> Result<String, IdError> {
        match id.shape() {
            IdShape::Root(value) => self.format_raw(id.id_class(), &value),
            IdShape::Composite(components) => {
                let mut segments = Vec::with_capacity(components.len());
                for component in components {
                    match component {
                        IdComponent::Present(component) => segments.push(self.unqualify(component, flags)?),
                        IdComponent::Absent(arity) => segments.extend(std::iter::repeat_n(String::new(), arity)),
                    }
                }
                Ok(segments.join(&COMPONENT_SEPARATOR.to_string()))
            }
            IdShape::Other => self.unknown_ids.to_unqualified(self, id, flags),
        }
    }

    // ------------------------------------------------------------------------
    // String to id
    // ------------------------------------------------------------------------

    /// Parses `"<type-name>:<raw;raw;...>"`.
    ///
    /// Returns `None` for absent or empty input. Under the lenient flag a
    /// missing separator or an unknown type name also yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidQualifiedFormat`] or
    /// [`IdError::UnknownTypeName`] when not lenient, and any error of
    /// [`IdCodec::from_unqualified_class`] regardless of flags.
    pub fn from_qualified(&self, text: Option<&str>, flags: IdCodecFlags) -> Result<Option<Box<dyn Id>>, IdError> {
        let operation = IdCodecOperation::FromQualified;
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            return Ok(None);
        };
        let Some((type_name, unqualified)) = text.split_once(QUALIFIED_SEPARATOR) else {
            return self.lenient_or_fail(
                operation,
                None,
                flags,
                IdError::InvalidQualifiedFormat {
                    value: text.to_string(),
                },
            );
        };
        let Some(id_class) = self.inventory.id_class(type_name) else {
            return self.lenient_or_fail(
                operation,
                None,
                flags,
                IdError::UnknownTypeName {
                    type_name: type_name.to_string(),
                },
            );
        };
        self.decode_class(id_class, unqualified)
            .map_err(|err| self.fail(operation, Some(id_class), flags, err))
    }

    /// Parses `"raw;raw;..."` into id type `T`.
    ///
    /// Returns `None` for absent or empty input.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::ComponentCount`] when the segment count differs
    /// from the declared arity (under every flag combination),
    /// [`IdError::MissingRawTypeMapper`] and [`IdError::ComponentParse`].
    pub fn from_unqualified<T: IdType>(&self, text: Option<&str>, flags: IdCodecFlags) -> Result<Option<T>, IdError> {
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            return Ok(None);
        };
        let id_class = IdClass::of::<T>();
        self.parse_components(id_class, &T::raw_types(), text)
            .and_then(IdFactory::create_typed::<T>)
            .map_err(|err| self.fail(IdCodecOperation::FromUnqualified, Some(id_class), flags, err))
    }

    /// Parses `"raw;raw;..."` into the registered id class `id_class`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::MissingIdClass`] when no class is given,
    /// [`IdError::MissingIdDescriptor`] when the class is not registered with
    /// the factory, and the errors of [`IdCodec::from_unqualified`].
    pub fn from_unqualified_class(
        &self,
        id_class: Option<IdClass>,
        text: Option<&str>,
        flags: IdCodecFlags,
    ) -> Result<Option<Box<dyn Id>>, IdError> {
        let operation = IdCodecOperation::FromUnqualified;
        let Some(id_class) = id_class else {
            let err = IdError::MissingIdClass {
                value: text.unwrap_or_default().to_string(),
            };
            return Err(self.fail(operation, None, flags, err));
        };
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            return Ok(None);
        };
        self.decode_class(id_class, text).map_err(|err| self.fail(operation, Some(id_class), flags, err))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Prefixes the unqualified form with the type name.
    fn qualify(&self, id: &dyn Id, flags: IdCodecFlags) -> Result<String, IdError> {
        let id_class = id.id_class();
        let type_name = self.inventory.type_name_of(id_class).ok_or_else(|| IdError::MissingTypeName {
            id_class: id_class.name().to_string(),
        })?;
        let unqualified = self.unqualify(id, flags)?;
        Ok(format!("{type_name}{QUALIFIED_SEPARATOR}{unqualified}"))
    }

    /// Formats one root value.
    fn format_raw(&self, id_class: IdClass, value: &RawValue) -> Result<String, IdError> {
        self.raw_types.to_string(value).map_err(|err| match err {
            RawMapperError::Missing(raw_type) => IdError::MissingRawTypeMapper {
                raw_type,
                id_class: id_class.name().to_string(),
            },
            RawMapperError::Failed {
                raw_type,
                message,
            } => IdError::ComponentFormat {
                raw_type,
                id_class: id_class.name().to_string(),
                message,
            },
        })
    }

    /// Decodes non-empty unqualified text through the factory descriptor.
    fn decode_class(&self, id_class: IdClass, text: &str) -> Result<Option<Box<dyn Id>>, IdError> {
        let descriptor = self.factory.descriptor(id_class).ok_or_else(|| IdError::MissingIdDescriptor {
            id_class: id_class.name().to_string(),
        })?;
        if text.is_empty() {
            return Ok(None);
        }
        let components = self.parse_components(id_class, descriptor.raw_types(), text)?;
        descriptor.create(components)
    }

    /// Splits text into segments and parses each against its declared raw type.
    fn parse_components(
        &self,
        id_class: IdClass,
        raw_types: &[RawType],
        text: &str,
    ) -> Result<Vec<Option<RawValue>>, IdError> {
        let segments: Vec<&str> = text.split(COMPONENT_SEPARATOR).collect();
        if segments.len() != raw_types.len() {
            return Err(IdError::ComponentCount {
                expected: raw_types.len(),
                actual: segments.len(),
                components: segments.join(", "),
                id_class: id_class.name().to_string(),
            });
        }
        segments
            .iter()
            .zip(raw_types)
            .map(|(segment, raw_type)| self.parse_segment(id_class, *raw_type, segment))
            .collect()
    }

    /// Parses one segment; an empty segment is an absent component.
    fn parse_segment(&self, id_class: IdClass, raw_type: RawType, segment: &str) -> Result<Option<RawValue>, IdError> {
        if !self.raw_types.contains(raw_type) {
            return Err(IdError::MissingRawTypeMapper {
                raw_type,
                id_class: id_class.name().to_string(),
            });
        }
        if segment.is_empty() {
            return Ok(None);
        }
        self.raw_types.from_string(raw_type, segment).map(Some).map_err(|err| {
            let message = match err {
                RawMapperError::Missing(_) => "missing mapper".to_string(),
                RawMapperError::Failed {
                    message, ..
                } => message,
            };
            IdError::ComponentParse {
                value: segment.to_string(),
                raw_type,
                id_class: id_class.name().to_string(),
                message,
            }
        })
    }

    /// Returns `None` under the lenient flag, else the recorded error.
    fn lenient_or_fail<T>(
        &self,
        operation: IdCodecOperation,
        id_class: Option<IdClass>,
        flags: IdCodecFlags,
        err: IdError,
    ) -> Result<Option<T>, IdError> {
        if flags.is_lenient() {
            let event = IdCodecAuditEvent::new(operation, IdCodecOutcome::LenientAbsent, &err, id_class, flags);
            self.audit.record(&event);
            return Ok(None);
        }
        Err(self.fail(operation, id_class, flags, err))
    }

    /// Records a failure and hands the error back.
    fn fail(
        &self,
        operation: IdCodecOperation,
        id_class: Option<IdClass>,
        flags: IdCodecFlags,
        err: IdError,
    ) -> IdError {
        let event = IdCodecAuditEvent::new(operation, IdCodecOutcome::Error, &err, id_class, flags);
        self.audit.record(&event);
        err
    }
}

impl fmt::Debug for IdCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdCodec")
            .field("raw_types", &self.raw_types)
            .field("inventory", &self.inventory)
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}
