// crates/idcodec-core/src/core/mod.rs
// ============================================================================
// Module: IdCodec Core Types
// Description: Identifier model, raw values, flags and errors.
// Purpose: Provide the value types shared by registries, codec and adapters.
// Dependencies: serde, thiserror, time, uuid
// ============================================================================

//! ## Overview
//! Core types describe what an identifier is (root or composite), which raw
//! primitives it wraps, and how codec calls are parameterized and fail.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod flags;
pub mod identifiers;
pub mod locale;
pub mod raw;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::IdError;
pub use error::IdErrorCategory;
pub use flags::IdCodecFlag;
pub use flags::IdCodecFlags;
pub use identifiers::ComponentReader;
pub use identifiers::Id;
pub use identifiers::IdComponent;
pub use identifiers::IdClass;
pub use identifiers::IdShape;
pub use identifiers::IdType;
pub use identifiers::downcast_id;
pub use locale::Locale;
pub use locale::LocaleError;
pub use raw::CustomRaw;
pub use raw::CustomValue;
pub use raw::RawPrimitive;
pub use raw::RawType;
pub use raw::RawValue;
