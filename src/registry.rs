//! The view engine registry: aggregates facilities, exclusion filters, and
//! policies into a lazily built view bag.

use std::any::TypeId;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::activation::ActivationExpression;
use crate::bag::ViewBag;
use crate::error::ViewError;
use crate::facility::ViewFacility;
use crate::graph::DiscoveryGraph;
use crate::policy::ViewTokenPolicy;
use crate::token::ViewToken;
use crate::types::{ModelType, TokenPredicate};

struct RegisteredFacility {
    type_id: TypeId,
    facility: Box<dyn ViewFacility>,
}

/// Aggregator for view discovery.
///
/// Facilities, exclusion filters, and policies are registered during a
/// configuration phase; the first read of [`views`](Self::views) runs
/// discovery against the bound graph, removes excluded tokens, applies
/// policies in registration order, and caches the result for the registry's
/// lifetime. Registrations made after the first read are silently
/// ineffective.
pub struct ViewEngineRegistry {
    facilities: Vec<RegisteredFacility>,
    policies: Vec<ViewTokenPolicy>,
    excludes: Vec<TokenPredicate>,
    graph: DiscoveryGraph,
    bag: Mutex<Option<Arc<ViewBag>>>,
    preloaded: Option<Vec<ViewToken>>,
}

impl ViewEngineRegistry {
    pub fn new() -> Self {
        ViewEngineRegistry {
            facilities: Vec::new(),
            policies: Vec::new(),
            excludes: Vec::new(),
            graph: DiscoveryGraph::new(),
            bag: Mutex::new(None),
            preloaded: None,
        }
    }

    /// Testing constructor: preload the bag contents without discovery.
    /// The build pipeline is bypassed entirely, so exclusion filters and
    /// policies do not run against preloaded views.
    pub fn with_views(views: Vec<ViewToken>) -> Self {
        let mut registry = Self::new();
        registry.preloaded = Some(views);
        registry
    }

    /// Register a view facility.
    ///
    /// Idempotent by concrete type: a facility whose type is already
    /// registered is dropped without error, so duplicate registrations
    /// never produce duplicate discovery.
    pub fn add_facility<F: ViewFacility>(&mut self, facility: F) {
        let type_id = TypeId::of::<F>();
        if self.facilities.iter().any(|f| f.type_id == type_id) {
            debug!(
                facility = facility.kind(),
                "facility type already registered, ignoring"
            );
            return;
        }
        self.facilities.push(RegisteredFacility {
            type_id,
            facility: Box::new(facility),
        });
    }

    /// Append a policy to the ordered policy list. No deduplication.
    pub fn add_policy(&mut self, policy: ViewTokenPolicy) {
        self.policies.push(policy);
    }

    /// Exclude discovered views matching the filter from the final bag.
    pub fn exclude_views(
        &mut self,
        filter: impl Fn(&ViewToken) -> bool + Send + Sync + 'static,
    ) {
        self.push_exclude(Arc::new(filter));
    }

    pub(crate) fn push_exclude(&mut self, filter: TokenPredicate) {
        self.excludes.push(filter);
    }

    /// Bind the discovery context used by facilities. Must happen before
    /// the first read of [`views`](Self::views); facilities see an empty
    /// graph otherwise.
    pub fn use_graph(&mut self, graph: DiscoveryGraph) {
        self.graph = graph;
    }

    pub fn graph(&self) -> &DiscoveryGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut DiscoveryGraph {
        &mut self.graph
    }

    /// Registered facilities, in registration order.
    pub fn facilities(&self) -> impl Iterator<Item = &dyn ViewFacility> {
        self.facilities.iter().map(|f| f.facility.as_ref())
    }

    /// Scope subsequent configuration to views matching the filter.
    pub fn if_the_view_matches(
        &mut self,
        filter: impl Fn(&ViewToken) -> bool + Send + Sync + 'static,
    ) -> ActivationExpression<'_> {
        ActivationExpression::new(self, Arc::new(filter))
    }

    /// Scope subsequent configuration by the input model type of a view.
    /// Views with no model never match.
    pub fn if_the_input_model_matches(
        &mut self,
        filter: impl Fn(&ModelType) -> bool + Send + Sync + 'static,
    ) -> ActivationExpression<'_> {
        self.if_the_view_matches(move |token| token.model().map(&filter).unwrap_or(false))
    }

    /// All of the views found in this running application.
    ///
    /// The first read triggers discovery and caches the bag; every later
    /// read returns the identical cached result without re-discovery, even
    /// if the graph or registrations changed. A failed build is not
    /// cached: the error propagates and the next read retries.
    pub fn views(&self) -> Result<Arc<ViewBag>, ViewError> {
        let mut slot = self.bag.lock();
        if let Some(bag) = slot.as_ref() {
            return Ok(Arc::clone(bag));
        }
        let bag = Arc::new(self.build_bag()?);
        *slot = Some(Arc::clone(&bag));
        Ok(bag)
    }

    fn build_bag(&self) -> Result<ViewBag, ViewError> {
        if let Some(views) = &self.preloaded {
            return Ok(ViewBag::new(views.clone()));
        }

        let mut views = Vec::new();
        for registered in &self.facilities {
            let facility = registered.facility.as_ref();
            let found = facility
                .discover(&self.graph)
                .map_err(|source| ViewError::Facility {
                    facility: facility.kind().to_string(),
                    source,
                })?;
            debug!(
                facility = facility.kind(),
                count = found.len(),
                "facility discovery complete"
            );
            views.extend(found);
        }

        let before = views.len();
        views.retain(|token| !self.excludes.iter().any(|filter| filter(token)));
        if views.len() != before {
            debug!(excluded = before - views.len(), "exclusion filters removed views");
        }

        for policy in &self.policies {
            policy.alter_all(&mut views)?;
        }

        info!(
            views = views.len(),
            facilities = self.facilities.len(),
            policies = self.policies.len(),
            "view bag built"
        );
        Ok(ViewBag::new(views))
    }
}

impl Default for ViewEngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
