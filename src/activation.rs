//! Fluent configuration scoped to matching views.

use std::sync::Arc;

use serde_json::Value;

use crate::policy::ViewTokenPolicy;
use crate::registry::ViewEngineRegistry;
use crate::token::ViewToken;
use crate::types::TokenPredicate;

/// Scopes subsequent configuration to views matching a predicate.
///
/// Created by [`ViewEngineRegistry::if_the_view_matches`] and
/// [`ViewEngineRegistry::if_the_input_model_matches`]. Every method
/// registers one policy or exclusion on the owning registry and consumes
/// the expression; the expression carries no state of its own.
pub struct ActivationExpression<'a> {
    registry: &'a mut ViewEngineRegistry,
    filter: TokenPredicate,
}

impl<'a> ActivationExpression<'a> {
    pub(crate) fn new(registry: &'a mut ViewEngineRegistry, filter: TokenPredicate) -> Self {
        ActivationExpression { registry, filter }
    }

    /// Register a policy applying `mutation` to matching views.
    pub fn alter_with(
        self,
        description: impl Into<String>,
        mutation: impl Fn(&mut ViewToken) + Send + Sync + 'static,
    ) {
        let mutation: Arc<dyn Fn(&mut ViewToken) -> Result<(), String> + Send + Sync> =
            Arc::new(move |token| {
                mutation(token);
                Ok(())
            });
        self.registry.add_policy(ViewTokenPolicy::from_parts(
            description.into(),
            self.filter,
            mutation,
        ));
    }

    /// Assign the activation profile for matching views.
    pub fn set_profile(self, profile: impl Into<String>) {
        let profile = profile.into();
        let description = format!("set profile to '{profile}'");
        self.alter_with(description, move |token| token.set_profile(profile.clone()));
    }

    /// Attach a metadata entry to matching views.
    pub fn set_metadata(self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let description = format!("set metadata '{key}'");
        self.alter_with(description, move |token| {
            token.insert_metadata(key.clone(), value.clone())
        });
    }

    /// Exclude matching views from the final bag.
    pub fn exclude(self) {
        self.registry.push_exclude(self.filter);
    }
}
