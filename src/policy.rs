//! View token policies: predicate and mutation pairs applied after discovery.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::ViewError;
use crate::token::ViewToken;
use crate::types::TokenPredicate;

pub(crate) type Alteration =
    Arc<dyn Fn(&mut ViewToken) -> Result<(), String> + Send + Sync>;

/// A named alteration rule for matching view tokens.
///
/// The registry applies policies in registration order once discovery and
/// exclusion are complete; a later policy sees the mutations of earlier
/// ones. The description is for diagnostics only and carries no behavior.
pub struct ViewTokenPolicy {
    filter: TokenPredicate,
    alteration: Alteration,
    description: String,
}

impl ViewTokenPolicy {
    /// Policy from a predicate and a fallible mutation.
    pub fn new(
        description: impl Into<String>,
        filter: impl Fn(&ViewToken) -> bool + Send + Sync + 'static,
        alteration: impl Fn(&mut ViewToken) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        ViewTokenPolicy {
            filter: Arc::new(filter),
            alteration: Arc::new(alteration),
            description: description.into(),
        }
    }

    /// Policy whose mutation cannot fail.
    pub fn altering(
        description: impl Into<String>,
        filter: impl Fn(&ViewToken) -> bool + Send + Sync + 'static,
        mutation: impl Fn(&mut ViewToken) + Send + Sync + 'static,
    ) -> Self {
        Self::new(description, filter, move |token| {
            mutation(token);
            Ok(())
        })
    }

    pub(crate) fn from_parts(
        description: String,
        filter: TokenPredicate,
        alteration: Alteration,
    ) -> Self {
        ViewTokenPolicy {
            filter,
            alteration,
            description,
        }
    }

    pub fn matches(&self, token: &ViewToken) -> bool {
        (self.filter)(token)
    }

    /// Apply the mutation to a single token.
    pub fn apply(&self, token: &mut ViewToken) -> Result<(), ViewError> {
        (self.alteration)(token).map_err(|message| ViewError::Policy {
            policy: self.description.clone(),
            message,
        })
    }

    /// Apply the mutation to every matching token, in sequence. The first
    /// failure aborts; remaining tokens are left untouched.
    pub fn alter_all(&self, tokens: &mut [ViewToken]) -> Result<(), ViewError> {
        let mut applied = 0usize;
        for token in tokens.iter_mut() {
            if self.matches(token) {
                self.apply(token)?;
                applied += 1;
            }
        }
        trace!(policy = %self.description, applied, "policy applied");
        Ok(())
    }

    pub fn describe(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for ViewTokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view token policy: {}", self.description)
    }
}

impl fmt::Debug for ViewTokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewTokenPolicy")
            .field("description", &self.description)
            .finish()
    }
}
