//! Shared view settings registered into the discovery graph.

use serde::{Deserialize, Serialize};

/// Ordered list of namespaces shared with every discovered view.
///
/// Hosts append their own namespaces during configuration; facilities read
/// the final list out of the discovery graph when materializing tokens.
/// Duplicates are ignored, insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonNamespaces {
    namespaces: Vec<String>,
}

impl CommonNamespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a namespace. A namespace already present is ignored.
    pub fn add(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if !self.namespaces.contains(&namespace) {
            self.namespaces.push(namespace);
        }
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
