//! View tokens: handles describing one discoverable view artifact.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::types::ModelType;

/// Handle identifying one discoverable view and its input model.
///
/// The origin is the token's unique source identity (a file path or logical
/// source name) and never changes after discovery. The logical name, profile,
/// resolved path, and metadata may all be altered by view token policies
/// during configuration.
#[derive(Debug, Clone)]
pub struct ViewToken {
    origin: String,
    facility: String,
    name: String,
    model: Option<ModelType>,
    profile: Option<String>,
    resolved_path: Option<PathBuf>,
    metadata: HashMap<String, Value>,
}

impl ViewToken {
    /// Create a token for a view discovered at `origin` by the facility
    /// identified by `facility`.
    pub fn new(
        origin: impl Into<String>,
        facility: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        ViewToken {
            origin: origin.into(),
            facility: facility.into(),
            name: name.into(),
            model: None,
            profile: None,
            resolved_path: None,
            metadata: HashMap::new(),
        }
    }

    /// Associate the input model type `T` with this view.
    pub fn with_model<T: 'static>(mut self) -> Self {
        self.model = Some(ModelType::of::<T>());
        self
    }

    /// Unique source identity of the view. Immutable after discovery.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Kind label of the facility that produced the token.
    pub fn facility(&self) -> &str {
        &self.facility
    }

    /// Logical name the view is looked up by.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Input model type associated with the view, when known.
    pub fn model(&self) -> Option<&ModelType> {
        self.model.as_ref()
    }

    pub fn set_model(&mut self, model: ModelType) {
        self.model = Some(model);
    }

    /// Activation profile assigned by policies, if any.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn set_profile(&mut self, profile: impl Into<String>) {
        self.profile = Some(profile.into());
    }

    /// Path the view resolves to at render time, when one has been assigned.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    pub fn set_resolved_path(&mut self, path: impl Into<PathBuf>) {
        self.resolved_path = Some(path.into());
    }

    /// Facility-specific metadata attached to the token.
    pub fn metadata(&self) -> &HashMap<String, Value> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Attach a metadata entry, replacing any existing value for the key.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }
}
