// crates/idcodec-core/src/registry/inventory.rs
// ============================================================================
// Module: Id Inventory
// Description: Bidirectional mapping between type names and id classes.
// Purpose: Resolve the tag of qualified ids in both directions.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Qualified ids carry a short type name ahead of the `:` separator. The
//! inventory binds each concrete id class to exactly one type name and each
//! type name to exactly one id class. Lookups return `Option`; the codec
//! decides whether an unknown name is fatal or lenient.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use crate::core::error::IdError;
use crate::core::identifiers::Id;
use crate::core::identifiers::IdClass;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Characters that cannot appear in a type name.
const RESERVED_TYPE_NAME_CHARS: [char; 2] = [':', ';'];

// ============================================================================
// SECTION: Inventory
// ============================================================================

/// Type name registry for concrete id classes.
///
/// # Invariants
/// - Type names are unique, non-empty and free of `:` and `;`.
/// - Each id class holds at most one type name.
#[derive(Debug, Clone, Default)]
pub struct IdInventory {
    /// Id class per type name.
    by_type_name: HashMap<String, IdClass>,
    /// Type name per id class.
    by_id_class: HashMap<IdClass, String>,
}

impl IdInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `type_name` to id type `T`.
    ///
    /// # Errors
    ///
    /// See [`IdInventory::register_class`].
    pub fn register<T: Id>(&mut self, type_name: &str) -> Result<(), IdError> {
        self.register_class(IdClass::of::<T>(), type_name)
    }

    /// Builder form of [`IdInventory::register`].
    ///
    /// # Errors
    ///
    /// See [`IdInventory::register_class`].
    pub fn with<T: Id>(mut self, type_name: &str) -> Result<Self, IdError> {
        self.register::<T>(type_name)?;
        Ok(self)
    }

    /// Binds `type_name` to `id_class`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidTypeName`] for an empty name or one holding a
    /// separator, [`IdError::DuplicateTypeName`] when the name is taken and
    /// [`IdError::DuplicateIdClass`] when the class already has a name.
    pub fn register_class(&mut self, id_class: IdClass, type_name: &str) -> Result<(), IdError> {
        validate_type_name(id_class, type_name)?;
        if let Some(existing) = self.by_type_name.get(type_name) {
            return Err(IdError::DuplicateTypeName {
                type_name: type_name.to_string(),
                existing: existing.name().to_string(),
                id_class: id_class.name().to_string(),
            });
        }
        if let Some(existing) = self.by_id_class.get(&id_class) {
            return Err(IdError::DuplicateIdClass {
                id_class: id_class.name().to_string(),
                type_name: existing.clone(),
            });
        }
        self.by_type_name.insert(type_name.to_string(), id_class);
        self.by_id_class.insert(id_class, type_name.to_string());
        Ok(())
    }

    /// Returns the type name of the id's class.
    #[must_use]
    pub fn type_name(&self, id: &dyn Id) -> Option<&str> {
        self.type_name_of(id.id_class())
    }

    /// Returns the type name bound to `id_class`.
    #[must_use]
    pub fn type_name_of(&self, id_class: IdClass) -> Option<&str> {
        self.by_id_class.get(&id_class).map(String::as_str)
    }

    /// Returns the id class bound to `type_name`.
    #[must_use]
    pub fn id_class(&self, type_name: &str) -> Option<IdClass> {
        self.by_type_name.get(type_name).copied()
    }

    /// Returns the number of registered type names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type_name.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type_name.is_empty()
    }
}

/// Rejects type names that would corrupt the qualified wire form.
fn validate_type_name(id_class: IdClass, type_name: &str) -> Result<(), IdError> {
    let reason = if type_name.is_empty() {
        "type name is empty"
    } else if type_name.contains(RESERVED_TYPE_NAME_CHARS) {
        "type name contains a reserved separator"
    } else {
        return Ok(());
    };
    Err(IdError::InvalidTypeName {
        type_name: type_name.to_string(),
        id_class: id_class.name().to_string(),
        reason,
    })
}
