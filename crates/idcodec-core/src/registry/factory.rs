// crates/idcodec-core/src/registry/factory.rs
// ============================================================================
// Module: Id Factory
// Description: Descriptor table for constructing ids from raw components.
// Purpose: Rebuild concrete ids whose class is only known at runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Each registered id type contributes an [`IdDescriptor`]: its class, its
//! flattened raw component types and a constructor. Construction validates
//! the component count and every present component's raw type against the
//! declaration before calling the constructor; mismatches are hard errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use crate::core::error::IdError;
use crate::core::identifiers::ComponentReader;
use crate::core::identifiers::Id;
use crate::core::identifiers::IdClass;
use crate::core::identifiers::IdType;
use crate::core::raw::RawType;
use crate::core::raw::RawValue;

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Type-erased constructor of a registered id type.
type Constructor = fn(&mut ComponentReader) -> Result<Option<Box<dyn Id>>, IdError>;

/// Static shape and constructor of one id type.
#[derive(Debug, Clone)]
pub struct IdDescriptor {
    /// Described class.
    id_class: IdClass,
    /// Declared raw component types.
    raw_types: Vec<RawType>,
    /// Constructor over decoded components.
    constructor: Constructor,
}

impl IdDescriptor {
    /// Builds the descriptor of id type `T`.
    #[must_use]
    pub fn of<T: IdType>() -> Self {
        Self {
            id_class: IdClass::of::<T>(),
            raw_types: T::raw_types(),
            constructor: construct_boxed::<T>,
        }
    }

    /// Returns the described class.
    #[must_use]
    pub const fn id_class(&self) -> IdClass {
        self.id_class
    }

    /// Returns the declared raw component types.
    #[must_use]
    pub fn raw_types(&self) -> &[RawType] {
        &self.raw_types
    }

    /// Validates components and constructs the id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::ComponentCount`] or [`IdError::ComponentType`] when
    /// the components disagree with the declaration, or any constructor error.
    pub fn create(&self, components: Vec<Option<RawValue>>) -> Result<Option<Box<dyn Id>>, IdError> {
        validate_components(self.id_class, &self.raw_types, &components)?;
        let mut reader = ComponentReader::new(self.id_class, components);
        let id = (self.constructor)(&mut reader)?;
        reader.finish()?;
        Ok(id)
    }
}

/// Constructs `T` and erases its type.
fn construct_boxed<T: IdType>(reader: &mut ComponentReader) -> Result<Option<Box<dyn Id>>, IdError> {
    Ok(T::from_components(reader)?.map(|id| Box::new(id) as Box<dyn Id>))
}

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Descriptor table keyed by id class.
#[derive(Debug, Clone, Default)]
pub struct IdFactory {
    /// Descriptor per id class.
    descriptors: HashMap<IdClass, IdDescriptor>,
}

impl IdFactory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers id type `T`, replacing any previous descriptor.
    pub fn register<T: IdType>(&mut self) {
        let descriptor = IdDescriptor::of::<T>();
        self.descriptors.insert(descriptor.id_class(), descriptor);
    }

    /// Builder form of [`IdFactory::register`].
    #[must_use]
    pub fn with<T: IdType>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Returns the descriptor of `id_class`.
    #[must_use]
    pub fn descriptor(&self, id_class: IdClass) -> Option<&IdDescriptor> {
        self.descriptors.get(&id_class)
    }

    /// Returns the declared raw component types of `id_class`.
    #[must_use]
    pub fn raw_types(&self, id_class: IdClass) -> Option<&[RawType]> {
        self.descriptor(id_class).map(IdDescriptor::raw_types)
    }

    /// Constructs an id of a registered class.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::MissingIdDescriptor`] for an unregistered class and
    /// any error of [`IdDescriptor::create`].
    pub fn create(
        &self,
        id_class: IdClass,
        components: Vec<Option<RawValue>>,
    ) -> Result<Option<Box<dyn Id>>, IdError> {
        self.descriptor(id_class)
            .ok_or_else(|| IdError::MissingIdDescriptor {
                id_class: id_class.name().to_string(),
            })?
            .create(components)
    }

    /// Constructs an id of static type `T`; no registration is required.
    ///
    /// # Errors
    ///
    /// Same as [`IdDescriptor::create`].
    pub fn create_typed<T: IdType>(components: Vec<Option<RawValue>>) -> Result<Option<T>, IdError> {
        let id_class = IdClass::of::<T>();
        validate_components(id_class, &T::raw_types(), &components)?;
        let mut reader = ComponentReader::new(id_class, components);
        let id = T::from_components(&mut reader)?;
        reader.finish()?;
        Ok(id)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks arity and raw types of present components against the declaration.
fn validate_components(
    id_class: IdClass,
    declared: &[RawType],
    components: &[Option<RawValue>],
) -> Result<(), IdError> {
    if declared.len() != components.len() {
        let rendered = components
            .iter()
            .map(|component| component.as_ref().map_or("null", |value| value.raw_type().as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(IdError::ComponentCount {
            expected: declared.len(),
            actual: components.len(),
            components: rendered,
            id_class: id_class.name().to_string(),
        });
    }
    for (index, (expected, component)) in declared.iter().zip(components).enumerate() {
        if let Some(value) = component
            && value.raw_type() != *expected
        {
            return Err(IdError::ComponentType {
                index,
                expected: *expected,
                actual: value.raw_type(),
                id_class: id_class.name().to_string(),
            });
        }
    }
    Ok(())
}
