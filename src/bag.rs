//! The final read-only collection of discovered views.

use chrono::{DateTime, Utc};

use crate::token::ViewToken;
use crate::types::ModelType;

/// Read-only view over the final token sequence.
///
/// Built exactly once per registry instance, after exclusion filters and
/// policies have run. Exposes enumeration and lookup; no mutation.
#[derive(Debug, Clone)]
pub struct ViewBag {
    views: Vec<ViewToken>,
    built_at: DateTime<Utc>,
}

impl ViewBag {
    pub fn new(views: Vec<ViewToken>) -> Self {
        ViewBag {
            views,
            built_at: Utc::now(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewToken> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// First view whose logical name matches, in discovery order.
    pub fn find(&self, name: &str) -> Option<&ViewToken> {
        self.views.iter().find(|token| token.name() == name)
    }

    /// Views whose input model matches the descriptor.
    pub fn views_for(&self, model: &ModelType) -> Vec<&ViewToken> {
        self.views
            .iter()
            .filter(|token| token.model() == Some(model))
            .collect()
    }

    /// Views whose input model is `T`.
    pub fn views_for_model<T: 'static>(&self) -> Vec<&ViewToken> {
        self.views_for(&ModelType::of::<T>())
    }

    /// When the bag was materialized.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl<'a> IntoIterator for &'a ViewBag {
    type Item = &'a ViewToken;
    type IntoIter = std::slice::Iter<'a, ViewToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}
