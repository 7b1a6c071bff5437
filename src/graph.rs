//! Discovery context passed opaquely to view facilities.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-safe map of host registration state.
///
/// Facilities read settings objects out of the graph at discovery time; the
/// registry itself never interprets the contents. One value per type: a
/// second `set` of the same type replaces the first.
#[derive(Default)]
pub struct DiscoveryGraph {
    state: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl DiscoveryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register state, replacing any existing value of the same type.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.state.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.state.get(&TypeId::of::<T>())?.downcast_ref()
    }

    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.state.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// Get state, inserting `T::default()` when missing.
    pub fn get_or_default<T: Any + Send + Sync + Default>(&mut self) -> &mut T {
        self.state
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut()
            .expect("graph entry type matches its key")
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.state.contains_key(&TypeId::of::<T>())
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl std::fmt::Debug for DiscoveryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryGraph")
            .field("entries", &self.state.len())
            .finish()
    }
}
