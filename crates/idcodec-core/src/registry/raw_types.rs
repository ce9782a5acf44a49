// crates/idcodec-core/src/registry/raw_types.rs
// ============================================================================
// Module: Raw Type Registry
// Description: Bidirectional string mappers keyed by raw type.
// Purpose: Convert raw component values to and from their wire text.
// Dependencies: thiserror, time, uuid
// ============================================================================

//! ## Overview
//! The registry maps each [`RawType`] to a [`RawTypeMapper`] holding a
//! parse function and a format function. Registration needs `&mut self`;
//! once the registry is shared with a codec behind an `Arc` it is read-only,
//! so lookups are safe from any number of threads.
//!
//! Default mappers: identity for strings, canonical hyphenated UUIDs,
//! decimal integers and longs, dates as decimal epoch milliseconds, locales
//! as BCP-47 language tags.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::locale::Locale;
use crate::core::raw::RawPrimitive;
use crate::core::raw::RawType;
use crate::core::raw::RawValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Nanoseconds per millisecond, used by the date mapper.
const NANOS_PER_MILLI: i128 = 1_000_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by raw type lookups and mappers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawMapperError {
    /// No mapper is registered for the raw type.
    #[error("missing raw type mapper for {0}")]
    Missing(RawType),
    /// The mapper rejected the input.
    #[error("{raw_type} mapper failed: {message}")]
    Failed {
        /// Raw type of the mapper.
        raw_type: RawType,
        /// Failure message.
        message: String,
    },
}

// ============================================================================
// SECTION: Mapper
// ============================================================================

/// Parse function of a mapper.
type FromStringFn = dyn Fn(&str) -> Result<RawValue, String> + Send + Sync;
/// Format function of a mapper.
type ToStringFn = dyn Fn(&RawValue) -> Result<String, String> + Send + Sync;

/// Pair of functions converting a raw type to and from text.
#[derive(Clone)]
pub struct RawTypeMapper {
    /// Text to value.
    from_string: Arc<FromStringFn>,
    /// Value to text.
    to_string: Arc<ToStringFn>,
}

impl RawTypeMapper {
    /// Creates a mapper over tagged raw values.
    pub fn new<F, G>(from_string: F, to_string: G) -> Self
    where
        F: Fn(&str) -> Result<RawValue, String> + Send + Sync + 'static,
        G: Fn(&RawValue) -> Result<String, String> + Send + Sync + 'static,
    {
        Self {
            from_string: Arc::new(from_string),
            to_string: Arc::new(to_string),
        }
    }

    /// Creates a mapper for raw primitive `T` from typed functions.
    pub fn typed<T, E, F, G>(from_string: F, to_string: G) -> Self
    where
        T: RawPrimitive,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        G: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::new(
            move |text| from_string(text).map(T::into_raw).map_err(|err| err.to_string()),
            move |value| {
                T::from_raw_ref(value).map(&to_string).ok_or_else(|| {
                    format!("expected raw type {}, got {}", T::RAW_TYPE, value.raw_type())
                })
            },
        )
    }

    /// Parses text into a raw value.
    ///
    /// # Errors
    ///
    /// Returns the mapper's failure message.
    pub fn parse(&self, text: &str) -> Result<RawValue, String> {
        (self.from_string)(text)
    }

    /// Formats a raw value as text.
    ///
    /// # Errors
    ///
    /// Returns the mapper's failure message.
    pub fn format(&self, value: &RawValue) -> Result<String, String> {
        (self.to_string)(value)
    }
}

impl fmt::Debug for RawTypeMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawTypeMapper")
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of raw type mappers.
#[derive(Debug, Clone, Default)]
pub struct RawTypeRegistry {
    /// Mapper per raw type.
    mappers: HashMap<RawType, RawTypeMapper>,
}

impl RawTypeRegistry {
    /// Creates a registry without any mapper.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry with the default mappers installed.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register_typed::<String, std::convert::Infallible, _, _>(
            |text| Ok(text.to_string()),
            String::clone,
        );
        registry.register_typed::<Uuid, _, _, _>(Uuid::parse_str, Uuid::to_string);
        registry.register_typed::<i32, _, _, _>(str::parse::<i32>, i32::to_string);
        registry.register_typed::<i64, _, _, _>(str::parse::<i64>, i64::to_string);
        registry.register_typed::<OffsetDateTime, _, _, _>(parse_epoch_millis, format_epoch_millis);
        registry.register_typed::<Locale, _, _, _>(Locale::parse, |locale| locale.as_str().to_string());
        registry
    }

    /// Installs a mapper, replacing and returning any previous one.
    pub fn register(&mut self, raw_type: RawType, mapper: RawTypeMapper) -> Option<RawTypeMapper> {
        self.mappers.insert(raw_type, mapper)
    }

    /// Installs typed functions for raw primitive `T` under `T::RAW_TYPE`.
    pub fn register_typed<T, E, F, G>(&mut self, from_string: F, to_string: G) -> Option<RawTypeMapper>
    where
        T: RawPrimitive,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        G: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.register(T::RAW_TYPE, RawTypeMapper::typed(from_string, to_string))
    }

    /// Removes and returns the mapper for `raw_type`.
    pub fn unregister(&mut self, raw_type: RawType) -> Option<RawTypeMapper> {
        self.mappers.remove(&raw_type)
    }

    /// Returns true when a mapper is registered for `raw_type`.
    #[must_use]
    pub fn contains(&self, raw_type: RawType) -> bool {
        self.mappers.contains_key(&raw_type)
    }

    /// Returns the mapper for `raw_type`.
    #[must_use]
    pub fn mapper(&self, raw_type: RawType) -> Option<&RawTypeMapper> {
        self.mappers.get(&raw_type)
    }

    /// Formats a raw value with the mapper of its raw type.
    ///
    /// # Errors
    ///
    /// Returns [`RawMapperError::Missing`] when no mapper is registered and
    /// [`RawMapperError::Failed`] when the mapper rejects the value.
    pub fn to_string(&self, value: &RawValue) -> Result<String, RawMapperError> {
        let raw_type = value.raw_type();
        let mapper = self.mapper(raw_type).ok_or(RawMapperError::Missing(raw_type))?;
        mapper.format(value).map_err(|message| RawMapperError::Failed {
            raw_type,
            message,
        })
    }

    /// Parses text with the mapper of `raw_type`.
    ///
    /// # Errors
    ///
    /// Returns [`RawMapperError::Missing`] when no mapper is registered and
    /// [`RawMapperError::Failed`] when the mapper rejects the text.
    pub fn from_string(&self, raw_type: RawType, text: &str) -> Result<RawValue, RawMapperError> {
        let mapper = self.mapper(raw_type).ok_or(RawMapperError::Missing(raw_type))?;
        let value = mapper.parse(text).map_err(|message| RawMapperError::Failed {
            raw_type,
            message,
        })?;
        if value.raw_type() == raw_type {
            Ok(value)
        } else {
            Err(RawMapperError::Failed {
                raw_type,
                message: format!("mapper produced raw type {}", value.raw_type()),
            })
        }
    }
}

// ============================================================================
// SECTION: Date Mapping
// ============================================================================

/// Parses decimal epoch milliseconds.
fn parse_epoch_millis(text: &str) -> Result<OffsetDateTime, String> {
    let millis = text.parse::<i64>().map_err(|err| err.to_string())?;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * NANOS_PER_MILLI)
        .map_err(|err| err.to_string())
}

/// Formats a date as decimal epoch milliseconds (sub-millisecond precision is dropped).
fn format_epoch_millis(value: &OffsetDateTime) -> String {
    value.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI).to_string()
}
