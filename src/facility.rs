//! Pluggable discovery sources for view tokens.

use crate::error::FacilityError;
use crate::graph::DiscoveryGraph;
use crate::token::ViewToken;

pub mod files;

pub use files::FileTemplateFacility;

/// A pluggable source of view tokens.
///
/// `discover` must be a pure function of the graph's contents at call time;
/// implementations do not cache between calls. The registry invokes it at
/// most once per registry instance, when the view bag is first read, and
/// registers at most one facility per concrete type.
pub trait ViewFacility: Send + Sync + 'static {
    /// Find every view this facility knows about.
    fn discover(&self, graph: &DiscoveryGraph) -> Result<Vec<ViewToken>, FacilityError>;

    /// Short label identifying the facility kind, used in logs and errors.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
