// crates/idcodec-core/src/core/identifiers.rs
// ============================================================================
// Module: Typed Identifiers
// Description: Object-safe identifier model with static component declarations.
// Purpose: Let the codec walk root and composite ids without runtime reflection.
// Dependencies: crate::core::{error, raw}
// ============================================================================

//! ## Overview
//! An identifier is an immutable value implementing [`Id`]. Its [`IdShape`]
//! is one of a closed set of variants: a root id wraps one raw value, a
//! composite id is an ordered tuple of component ids, and anything else is
//! handed to the codec's unknown-id handler.
//!
//! Concrete identifier types also implement [`IdType`], which declares the
//! flattened, ordered raw component types and rebuilds a value from decoded
//! components. The [`root_id!`](crate::root_id) and
//! [`composite_id!`](crate::composite_id) macros generate both impls.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::any::TypeId;
use std::fmt;

use crate::core::error::IdError;
use crate::core::raw::RawPrimitive;
use crate::core::raw::RawValue;
use crate::core::raw::RawType;

// ============================================================================
// SECTION: Id Class
// ============================================================================

/// Names a concrete identifier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdClass {
    /// Rust type identity.
    type_id: TypeId,
    /// Rust type path, used in messages.
    name: &'static str,
}

impl IdClass {
    /// Returns the id class of `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the full Rust type path.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the last path segment of the type name.
    #[must_use]
    pub fn simple_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Display for IdClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// SECTION: Id Traits
// ============================================================================

/// Structural view of an identifier.
#[derive(Debug)]
pub enum IdShape<'a> {
    /// Root id wrapping exactly one raw value.
    Root(RawValue),
    /// Composite id with one slot per declared component.
    Composite(Vec<IdComponent<'a>>),
    /// Any other shape, delegated to the codec's unknown-id handler.
    Other,
}

/// One component slot of a composite id.
#[derive(Debug, Clone, Copy)]
pub enum IdComponent<'a> {
    /// Component id.
    Present(&'a dyn Id),
    /// Absent component spanning this many flattened raw components.
    Absent(usize),
}

impl<'a> IdComponent<'a> {
    /// Builds the slot of an optional component of id type `T`.
    #[must_use]
    pub fn of<T: IdType>(component: Option<&'a T>) -> Self {
        match component {
            Some(component) => Self::Present(component),
            None => Self::Absent(T::raw_types().len()),
        }
    }
}

/// Object-safe identifier interface.
pub trait Id: Any + fmt::Debug + Send + Sync {
    /// Returns the concrete class of this id.
    fn id_class(&self) -> IdClass;

    /// Returns the structural shape of this id.
    fn shape(&self) -> IdShape<'_>;
}

/// Static declaration of a concrete identifier type.
pub trait IdType: Id + Sized {
    /// Flattened, ordered raw types of all components.
    fn raw_types() -> Vec<RawType>;

    /// Rebuilds a value from decoded components; `None` when every component is absent.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] when a component has the wrong raw type or the
    /// reader runs out of components.
    fn from_components(reader: &mut ComponentReader) -> Result<Option<Self>, IdError>;
}

/// Converts a boxed id back into its concrete type.
#[must_use]
pub fn downcast_id<T: Id>(id: Box<dyn Id>) -> Option<T> {
    let id: Box<dyn Any> = id;
    id.downcast::<T>().ok().map(|id| *id)
}

// ============================================================================
// SECTION: Component Reader
// ============================================================================

/// Sequential reader over decoded raw components.
///
/// # Invariants
/// - Components are consumed strictly in declaration order.
#[derive(Debug)]
pub struct ComponentReader {
    /// Class being constructed, for error messages.
    id_class: IdClass,
    /// Remaining components.
    components: std::vec::IntoIter<Option<RawValue>>,
    /// Position of the next component.
    position: usize,
    /// Total number of components.
    declared: usize,
}

impl ComponentReader {
    /// Creates a reader for the components of `id_class`.
    #[must_use]
    pub fn new(id_class: IdClass, components: Vec<Option<RawValue>>) -> Self {
        let declared = components.len();
        Self {
            id_class,
            components: components.into_iter(),
            position: 0,
            declared,
        }
    }

    /// Reads the next component as raw primitive `P`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::MissingComponent`] when no component is left and
    /// [`IdError::ComponentType`] when the value has another raw type.
    pub fn next_raw<P: RawPrimitive>(&mut self) -> Result<Option<P>, IdError> {
        let index = self.position;
        let Some(slot) = self.components.next() else {
            return Err(IdError::MissingComponent {
                index,
                id_class: self.id_class.name().to_string(),
            });
        };
        self.position += 1;
        let Some(value) = slot else {
            return Ok(None);
        };
        P::from_raw(&value).map(Some).ok_or_else(|| IdError::ComponentType {
            index,
            expected: P::RAW_TYPE,
            actual: value.raw_type(),
            id_class: self.id_class.name().to_string(),
        })
    }

    /// Reads the next component id; nested composites consume their full arity.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`IdType::from_components`].
    pub fn next_id<T: IdType>(&mut self) -> Result<Option<T>, IdError> {
        T::from_components(self)
    }

    /// Verifies that every component was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::DeclarationMismatch`] when components remain.
    pub fn finish(self) -> Result<(), IdError> {
        if self.position == self.declared {
            Ok(())
        } else {
            Err(IdError::DeclarationMismatch {
                consumed: self.position,
                declared: self.declared,
                id_class: self.id_class.name().to_string(),
            })
        }
    }
}

// ============================================================================
// SECTION: Macros
// ============================================================================

/// Declares a root identifier wrapping one raw primitive.
///
/// ```
/// idcodec_core::root_id! {
///     /// Order identifier.
///     pub struct OrderId(uuid::Uuid);
/// }
/// ```
#[macro_export]
macro_rules! root_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($raw:ty);) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name($raw);

        #[allow(dead_code, reason = "generated accessors are optional for callers")]
        impl $name {
            #[doc = concat!("Wraps a raw value into a [`", stringify!($name), "`].")]
            #[must_use]
            $vis const fn new(value: $raw) -> Self {
                Self(value)
            }

            /// Returns the wrapped raw value.
            #[must_use]
            $vis const fn value(&self) -> &$raw {
                &self.0
            }
        }

        impl $crate::Id for $name {
            fn id_class(&self) -> $crate::IdClass {
                $crate::IdClass::of::<Self>()
            }

            fn shape(&self) -> $crate::IdShape<'_> {
                $crate::IdShape::Root($crate::RawPrimitive::to_raw(&self.0))
            }
        }

        impl $crate::IdType for $name {
            fn raw_types() -> ::std::vec::Vec<$crate::RawType> {
                ::std::vec![<$raw as $crate::RawPrimitive>::RAW_TYPE]
            }

            fn from_components(
                reader: &mut $crate::ComponentReader,
            ) -> ::std::result::Result<::std::option::Option<Self>, $crate::IdError> {
                ::std::result::Result::Ok(reader.next_raw::<$raw>()?.map(Self))
            }
        }
    };
}

/// Declares a composite identifier over component ids.
///
/// Every component is optional; decoding yields `None` when all are absent.
#[macro_export]
macro_rules! composite_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$field_meta:meta])* $field:ident : $component:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            $($field: ::std::option::Option<$component>,)+
        }

        #[allow(dead_code, reason = "generated accessors are optional for callers")]
        impl $name {
            #[doc = concat!("Builds a [`", stringify!($name), "`] from its components.")]
            #[must_use]
            $vis const fn new($($field: ::std::option::Option<$component>),+) -> Self {
                Self { $($field),+ }
            }

            $(
                #[doc = concat!("Returns the `", stringify!($field), "` component.")]
                $(#[$field_meta])*
                #[must_use]
                $vis const fn $field(&self) -> ::std::option::Option<&$component> {
                    self.$field.as_ref()
                }
            )+
        }

        impl $crate::Id for $name {
            fn id_class(&self) -> $crate::IdClass {
                $crate::IdClass::of::<Self>()
            }

            fn shape(&self) -> $crate::IdShape<'_> {
                $crate::IdShape::Composite(::std::vec![
                    $($crate::IdComponent::of::<$component>(self.$field.as_ref())),+
                ])
            }
        }

        impl $crate::IdType for $name {
            fn raw_types() -> ::std::vec::Vec<$crate::RawType> {
                let mut raw_types = ::std::vec::Vec::new();
                $(raw_types.extend(<$component as $crate::IdType>::raw_types());)+
                raw_types
            }

            fn from_components(
                reader: &mut $crate::ComponentReader,
            ) -> ::std::result::Result<::std::option::Option<Self>, $crate::IdError> {
                $(let $field = reader.next_id::<$component>()?;)+
                if [$($field.is_none()),+].into_iter().all(::std::convert::identity) {
                    return ::std::result::Result::Ok(::std::option::Option::None);
                }
                ::std::result::Result::Ok(::std::option::Option::Some(Self { $($field),+ }))
            }
        }
    };
}
