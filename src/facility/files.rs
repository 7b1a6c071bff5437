//! File-backed template discovery.

use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use super::ViewFacility;
use crate::error::FacilityError;
use crate::graph::DiscoveryGraph;
use crate::settings::CommonNamespaces;
use crate::token::ViewToken;

#[derive(Debug, Clone)]
struct TemplateRoot {
    path: PathBuf,
    extension: String,
}

/// Discovers view templates as files under one or more template roots.
///
/// Walks each root without following symlinks and emits one token per file
/// carrying that root's extension, sorted by path for determinism. Tokens
/// are named by file stem; the resolved path is relative to the root. When
/// the discovery graph carries [`CommonNamespaces`], the list is attached
/// to every token as `namespaces` metadata.
#[derive(Debug, Clone, Default)]
pub struct FileTemplateFacility {
    roots: Vec<TemplateRoot>,
}

impl FileTemplateFacility {
    /// Facility with a single template root.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let mut facility = Self::default();
        facility.add_root(root, extension);
        facility
    }

    /// Add a template root. A leading dot on the extension is accepted.
    pub fn add_root(&mut self, root: impl Into<PathBuf>, extension: impl Into<String>) {
        let extension = extension.into();
        let extension = extension.trim_start_matches('.').to_string();
        self.roots.push(TemplateRoot {
            path: root.into(),
            extension,
        });
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    fn discover_root(
        &self,
        root: &TemplateRoot,
        namespaces: Option<&CommonNamespaces>,
    ) -> Result<Vec<ViewToken>, FacilityError> {
        if !root.path.is_dir() {
            return Err(FacilityError::RootNotFound(root.path.clone()));
        }
        let canonical = dunce::canonicalize(&root.path)?;

        let mut paths = Vec::new();
        for entry in WalkDir::new(&canonical).follow_links(false) {
            let entry = entry.map_err(|e| FacilityError::InvalidTemplate(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == root.extension)
                .unwrap_or(false);
            if matches {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        let mut tokens = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    FacilityError::InvalidTemplate(format!(
                        "template name is not valid UTF-8: {}",
                        path.display()
                    ))
                })?
                .to_string();
            let relative = path
                .strip_prefix(&canonical)
                .unwrap_or(&path)
                .to_path_buf();

            let mut token = ViewToken::new(path.display().to_string(), self.kind(), name);
            token.set_resolved_path(relative);
            if let Some(namespaces) = namespaces {
                if !namespaces.is_empty() {
                    token.insert_metadata(
                        "namespaces",
                        serde_json::json!(namespaces.namespaces()),
                    );
                }
            }
            tokens.push(token);
        }

        debug!(
            root = %canonical.display(),
            extension = %root.extension,
            count = tokens.len(),
            "discovered file templates"
        );
        Ok(tokens)
    }
}

impl ViewFacility for FileTemplateFacility {
    fn kind(&self) -> &'static str {
        "file-template"
    }

    fn discover(&self, graph: &DiscoveryGraph) -> Result<Vec<ViewToken>, FacilityError> {
        let namespaces = graph.get::<CommonNamespaces>();
        let mut tokens = Vec::new();
        for root in &self.roots {
            tokens.extend(self.discover_root(root, namespaces)?);
        }
        Ok(tokens)
    }
}
