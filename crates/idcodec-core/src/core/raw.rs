// crates/idcodec-core/src/core/raw.rs
// ============================================================================
// Module: Raw Component Values
// Description: Primitive wire types wrapped by identifiers.
// Purpose: Provide a closed set of raw types plus a typed escape hatch for custom values.
// Dependencies: serde, time, uuid
// ============================================================================

//! ## Overview
//! Every root identifier wraps exactly one raw value. Raw values are tagged
//! with a [`RawType`] so the codec can look up the string mapper for the
//! value without inspecting Rust types at runtime. Custom raw types carry a
//! type-erased payload that still compares structurally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::locale::Locale;

// ============================================================================
// SECTION: Raw Types
// ============================================================================

/// Primitive component type declared by an identifier.
///
/// # Invariants
/// - Custom names are unique per process; two custom types with the same name
///   share one mapper slot in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RawType {
    /// UTF-8 string.
    String,
    /// RFC 4122 UUID.
    Uuid,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Point in time with millisecond wire precision.
    Date,
    /// BCP-47 locale.
    Locale,
    /// Application-defined raw type.
    Custom(&'static str),
}

impl RawType {
    /// Returns a stable label for the raw type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Date => "date",
            Self::Locale => "locale",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Custom Values
// ============================================================================

/// Object-safe view of a custom raw payload.
pub trait CustomRaw: Any + fmt::Debug + Send + Sync {
    /// Compares against another payload; payloads of different types are unequal.
    fn eq_dyn(&self, other: &dyn CustomRaw) -> bool;
}

impl<T> CustomRaw for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn eq_dyn(&self, other: &dyn CustomRaw) -> bool {
        let other: &dyn Any = other;
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// Custom raw value tagged with its raw type name.
#[derive(Clone)]
pub struct CustomValue {
    /// Registered custom raw type name.
    raw_type: &'static str,
    /// Shared payload.
    value: Arc<dyn CustomRaw>,
}

impl CustomValue {
    /// Wraps a payload under the given custom raw type name.
    #[must_use]
    pub fn new<T: CustomRaw>(raw_type: &'static str, value: T) -> Self {
        Self {
            raw_type,
            value: Arc::new(value),
        }
    }

    /// Returns the raw type of the payload.
    #[must_use]
    pub const fn raw_type(&self) -> RawType {
        RawType::Custom(self.raw_type)
    }

    /// Returns the payload when it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let value: &dyn Any = &*self.value;
        value.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("raw_type", &self.raw_type)
            .field("value", &self.value)
            .finish()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw_type == other.raw_type && self.value.eq_dyn(&*other.value)
    }
}

// ============================================================================
// SECTION: Raw Values
// ============================================================================

/// A single raw component value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// String value.
    String(String),
    /// UUID value.
    Uuid(Uuid),
    /// Integer value.
    Integer(i32),
    /// Long value.
    Long(i64),
    /// Date value.
    Date(OffsetDateTime),
    /// Locale value.
    Locale(Locale),
    /// Custom value.
    Custom(CustomValue),
}

impl RawValue {
    /// Returns the raw type tag of this value.
    #[must_use]
    pub const fn raw_type(&self) -> RawType {
        match self {
            Self::String(_) => RawType::String,
            Self::Uuid(_) => RawType::Uuid,
            Self::Integer(_) => RawType::Integer,
            Self::Long(_) => RawType::Long,
            Self::Date(_) => RawType::Date,
            Self::Locale(_) => RawType::Locale,
            Self::Custom(value) => value.raw_type(),
        }
    }
}

// ============================================================================
// SECTION: Raw Primitive Trait
// ============================================================================

/// Rust type usable as the wrapped value of a root identifier.
pub trait RawPrimitive: Clone + 'static {
    /// Raw type declared for this primitive.
    const RAW_TYPE: RawType;

    /// Converts the value into its tagged form.
    fn into_raw(self) -> RawValue;

    /// Borrows the value out of its tagged form; `None` on a type mismatch.
    fn from_raw_ref(value: &RawValue) -> Option<&Self>;

    /// Clones the value into its tagged form.
    fn to_raw(&self) -> RawValue {
        self.clone().into_raw()
    }

    /// Clones the value out of its tagged form; `None` on a type mismatch.
    fn from_raw(value: &RawValue) -> Option<Self> {
        Self::from_raw_ref(value).cloned()
    }
}

impl RawPrimitive for String {
    const RAW_TYPE: RawType = RawType::String;

    fn into_raw(self) -> RawValue {
        RawValue::String(self)
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl RawPrimitive for Uuid {
    const RAW_TYPE: RawType = RawType::Uuid;

    fn into_raw(self) -> RawValue {
        RawValue::Uuid(self)
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::Uuid(value) => Some(value),
            _ => None,
        }
    }
}

impl RawPrimitive for i32 {
    const RAW_TYPE: RawType = RawType::Integer;

    fn into_raw(self) -> RawValue {
        RawValue::Integer(self)
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::Integer(value) => Some(value),
            _ => None,
        }
    }
}

impl RawPrimitive for i64 {
    const RAW_TYPE: RawType = RawType::Long;

    fn into_raw(self) -> RawValue {
        RawValue::Long(self)
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::Long(value) => Some(value),
            _ => None,
        }
    }
}

impl RawPrimitive for OffsetDateTime {
    const RAW_TYPE: RawType = RawType::Date;

    fn into_raw(self) -> RawValue {
        RawValue::Date(self)
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::Date(value) => Some(value),
            _ => None,
        }
    }
}

impl RawPrimitive for Locale {
    const RAW_TYPE: RawType = RawType::Locale;

    fn into_raw(self) -> RawValue {
        RawValue::Locale(self)
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::Locale(value) => Some(value),
            _ => None,
        }
    }
}
