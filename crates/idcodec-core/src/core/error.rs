// crates/idcodec-core/src/core/error.rs
// ============================================================================
// Module: Identifier Errors
// Description: Error taxonomy for id registration, encoding and decoding.
// Purpose: Name the offending value, raw type and id class in every failure.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! All identifier failures surface as [`IdError`]. Each variant belongs to
//! one [`IdErrorCategory`]: configuration errors are raised at startup and
//! never retried, format and conversion errors reject caller input, and
//! unsupported-type errors mark id shapes the codec cannot walk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::raw::RawType;

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Coarse classification of an [`IdError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdErrorCategory {
    /// Startup-time registration problem.
    Configuration,
    /// Caller input does not match the wire format.
    Format,
    /// A raw type mapper rejected a value.
    Conversion,
    /// The id shape is neither root nor composite and no handler accepted it.
    UnsupportedType,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the id registries and the id codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The id class has no registered type name.
    #[error("missing type name registration for id class {id_class}")]
    MissingTypeName {
        /// Id class name.
        id_class: String,
    },
    /// The type name cannot be used as a qualified-form tag.
    #[error("invalid type name '{type_name}' for id class {id_class}: {reason}")]
    InvalidTypeName {
        /// Rejected type name.
        type_name: String,
        /// Id class name.
        id_class: String,
        /// Rejection reason.
        reason: &'static str,
    },
    /// The type name is already bound to another id class.
    #[error(
        "type name '{type_name}' is already registered for id class {existing}, cannot register {id_class}"
    )]
    DuplicateTypeName {
        /// Conflicting type name.
        type_name: String,
        /// Id class already holding the name.
        existing: String,
        /// Id class that attempted registration.
        id_class: String,
    },
    /// The id class is already registered under another type name.
    #[error("id class {id_class} is already registered with type name '{type_name}'")]
    DuplicateIdClass {
        /// Id class name.
        id_class: String,
        /// Type name already held by the class.
        type_name: String,
    },
    /// No raw type mapper is registered for a component type.
    #[error("missing raw type mapper for wrapped type {raw_type}, id type {id_class}")]
    MissingRawTypeMapper {
        /// Raw type without a mapper.
        raw_type: RawType,
        /// Id class name.
        id_class: String,
    },
    /// The id class has no factory descriptor.
    #[error("missing id factory registration for id class {id_class}")]
    MissingIdDescriptor {
        /// Id class name.
        id_class: String,
    },
    /// A qualified id lacks the type name separator.
    #[error("qualified id '{value}' format is invalid")]
    InvalidQualifiedFormat {
        /// Rejected input.
        value: String,
    },
    /// A qualified id names an unregistered type.
    #[error("no id class found for type name '{type_name}'")]
    UnknownTypeName {
        /// Unresolved type name.
        type_name: String,
    },
    /// No id class was supplied to parse an unqualified id.
    #[error("missing id class to parse unqualified id '{value}'")]
    MissingIdClass {
        /// Unqualified input.
        value: String,
    },
    /// Component count differs from the declared arity.
    #[error(
        "wrong argument size, expected {expected} parameter, got {actual} raw components [{components}], id type {id_class}"
    )]
    ComponentCount {
        /// Declared arity.
        expected: usize,
        /// Received component count.
        actual: usize,
        /// Received components, comma separated.
        components: String,
        /// Id class name.
        id_class: String,
    },
    /// A component value has a raw type other than the declared one.
    #[error("component {index} of id type {id_class} has raw type {actual}, expected {expected}")]
    ComponentType {
        /// Zero-based component position.
        index: usize,
        /// Declared raw type.
        expected: RawType,
        /// Received raw type.
        actual: RawType,
        /// Id class name.
        id_class: String,
    },
    /// A raw type mapper failed to parse a component.
    #[error("failed to parse component value={value}, rawType={raw_type}, idType={id_class}: {message}")]
    ComponentParse {
        /// Component text.
        value: String,
        /// Declared raw type.
        raw_type: RawType,
        /// Id class name.
        id_class: String,
        /// Mapper failure message.
        message: String,
    },
    /// A raw type mapper failed to format a component.
    #[error("failed to format raw value of type {raw_type} for id type {id_class}: {message}")]
    ComponentFormat {
        /// Raw type of the value.
        raw_type: RawType,
        /// Id class name.
        id_class: String,
        /// Mapper failure message.
        message: String,
    },
    /// A constructor read past the declared components.
    #[error("id type {id_class} requested component {index} beyond its declared raw types")]
    MissingComponent {
        /// Zero-based component position.
        index: usize,
        /// Id class name.
        id_class: String,
    },
    /// A constructor consumed fewer components than declared.
    #[error("id type {id_class} consumed {consumed} of {declared} declared components")]
    DeclarationMismatch {
        /// Components consumed by the constructor.
        consumed: usize,
        /// Declared component count.
        declared: usize,
        /// Id class name.
        id_class: String,
    },
    /// The id shape is not supported by the codec.
    #[error("unsupported id type {id_class}, cannot convert id")]
    UnsupportedIdType {
        /// Id class name.
        id_class: String,
    },
}

impl IdError {
    /// Returns the category of the error.
    #[must_use]
    pub const fn category(&self) -> IdErrorCategory {
        match self {
            Self::MissingTypeName { .. }
            | Self::InvalidTypeName { .. }
            | Self::DuplicateTypeName { .. }
            | Self::DuplicateIdClass { .. }
            | Self::MissingRawTypeMapper { .. }
            | Self::MissingIdDescriptor { .. }
            | Self::MissingComponent { .. }
            | Self::DeclarationMismatch { .. } => IdErrorCategory::Configuration,
            Self::InvalidQualifiedFormat { .. }
            | Self::UnknownTypeName { .. }
            | Self::MissingIdClass { .. }
            | Self::ComponentCount { .. }
            | Self::ComponentType { .. } => IdErrorCategory::Format,
            Self::ComponentParse { .. } | Self::ComponentFormat { .. } => {
                IdErrorCategory::Conversion
            }
            Self::UnsupportedIdType { .. } => IdErrorCategory::UnsupportedType,
        }
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingTypeName { .. } => "missing_type_name",
            Self::InvalidTypeName { .. } => "invalid_type_name",
            Self::DuplicateTypeName { .. } => "duplicate_type_name",
            Self::DuplicateIdClass { .. } => "duplicate_id_class",
            Self::MissingRawTypeMapper { .. } => "missing_raw_type_mapper",
            Self::MissingIdDescriptor { .. } => "missing_id_descriptor",
            Self::InvalidQualifiedFormat { .. } => "invalid_qualified_format",
            Self::UnknownTypeName { .. } => "unknown_type_name",
            Self::MissingIdClass { .. } => "missing_id_class",
            Self::ComponentCount { .. } => "component_count",
            Self::ComponentType { .. } => "component_type",
            Self::ComponentParse { .. } => "component_parse",
            Self::ComponentFormat { .. } => "component_format",
            Self::MissingComponent { .. } => "missing_component",
            Self::DeclarationMismatch { .. } => "declaration_mismatch",
            Self::UnsupportedIdType { .. } => "unsupported_id_type",
        }
    }
}
