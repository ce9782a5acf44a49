// crates/idcodec-core/src/core/flags.rs
// ============================================================================
// Module: Codec Flags
// Description: Per-call behavior switches for the id codec.
// Purpose: Carry orthogonal options without mutating shared codec state.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Flags are passed by value to every codec call. `Lenient` downgrades
//! structural format failures of qualified ids to absent results.
//! `Encryption` has no codec-level effect; the JSON mapping layer reads it to
//! select its id-encryption configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::BitOr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Flag
// ============================================================================

/// Single codec behavior switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdCodecFlag {
    /// Return `None` instead of failing on malformed qualified ids or unknown type names.
    Lenient,
    /// Id encryption is requested by the surrounding mapping context.
    Encryption,
}

impl IdCodecFlag {
    /// All known flags in declaration order.
    pub const ALL: [Self; 2] = [Self::Lenient, Self::Encryption];

    /// Returns a stable label for the flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Encryption => "encryption",
        }
    }

    /// Bit used inside [`IdCodecFlags`].
    const fn bit(self) -> u8 {
        match self {
            Self::Lenient => 0b01,
            Self::Encryption => 0b10,
        }
    }
}

// ============================================================================
// SECTION: Flag Set
// ============================================================================

/// Set of codec flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IdCodecFlags(u8);

impl IdCodecFlags {
    /// Empty flag set.
    pub const NONE: Self = Self(0);
    /// Only [`IdCodecFlag::Lenient`].
    pub const LENIENT: Self = Self(IdCodecFlag::Lenient.bit());
    /// Only [`IdCodecFlag::Encryption`].
    pub const ENCRYPTION: Self = Self(IdCodecFlag::Encryption.bit());

    /// Returns a copy with `flag` added.
    #[must_use]
    pub const fn with(self, flag: IdCodecFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true when `flag` is set.
    #[must_use]
    pub const fn contains(self, flag: IdCodecFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Returns true when [`IdCodecFlag::Lenient`] is set.
    #[must_use]
    pub const fn is_lenient(self) -> bool {
        self.contains(IdCodecFlag::Lenient)
    }

    /// Returns true when [`IdCodecFlag::Encryption`] is set.
    #[must_use]
    pub const fn is_encryption(self) -> bool {
        self.contains(IdCodecFlag::Encryption)
    }

    /// Returns true when no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the contained flags.
    pub fn iter(self) -> impl Iterator<Item = IdCodecFlag> {
        IdCodecFlag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }

    /// Returns the labels of the contained flags.
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        self.iter().map(IdCodecFlag::as_str).collect()
    }
}

impl From<IdCodecFlag> for IdCodecFlags {
    fn from(flag: IdCodecFlag) -> Self {
        Self::NONE.with(flag)
    }
}

impl FromIterator<IdCodecFlag> for IdCodecFlags {
    fn from_iter<I: IntoIterator<Item = IdCodecFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl BitOr for IdCodecFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOr<IdCodecFlag> for IdCodecFlags {
    type Output = Self;

    fn bitor(self, rhs: IdCodecFlag) -> Self::Output {
        self.with(rhs)
    }
}
