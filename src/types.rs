//! Shared types for the view pipeline.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::token::ViewToken;

/// Descriptor for a view's input model type.
///
/// Pairs the compile-time `TypeId` with the type's name so predicates can
/// match on either. Built via [`ModelType::of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelType {
    id: TypeId,
    name: &'static str,
}

impl ModelType {
    /// Descriptor for the model type `T`.
    pub fn of<T: 'static>() -> Self {
        ModelType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified name of the model type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when this descriptor refers to `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Predicate over view tokens.
pub type TokenPredicate = Arc<dyn Fn(&ViewToken) -> bool + Send + Sync>;

/// Predicate over input model types.
pub type ModelPredicate = Arc<dyn Fn(&ModelType) -> bool + Send + Sync>;
