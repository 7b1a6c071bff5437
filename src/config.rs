//! Configuration for seeding a view engine registry.
//!
//! Hierarchical load: a global config file under the user config directory,
//! then a workspace-local `vista.toml`, then `VISTA_`-prefixed environment
//! overrides. Later layers win.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ViewError;
use crate::facility::FileTemplateFacility;
use crate::logging::LoggingConfig;
use crate::registry::ViewEngineRegistry;
use crate::settings::CommonNamespaces;

/// Workspace-local configuration file name.
pub const WORKSPACE_FILE: &str = "vista.toml";

/// One template search root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateRoot {
    pub path: PathBuf,

    /// Template file extension discovered under the root.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "html".to_string()
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewConfig {
    /// Template search roots, discovered by a single file facility.
    #[serde(default)]
    pub templates: Vec<TemplateRoot>,

    /// View name prefixes excluded from the final bag.
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,

    /// Namespaces shared with every discovered view.
    #[serde(default)]
    pub namespaces: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Template(String),
    Exclusion(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Template(msg) => write!(f, "Template: {}", msg),
            ValidationError::Exclusion(msg) => write!(f, "Exclusion: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Path to the global config file.
/// Uses `XDG_CONFIG_HOME` when set, otherwise `~/.config/vista/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map(|base| base.join("vista").join("config.toml"))
}

impl ViewConfig {
    /// Load the layered configuration.
    ///
    /// Layers, last one wins: global config file, `vista.toml` under
    /// `workspace_root`, environment variables (`VISTA_` prefix, `__` as
    /// the section separator, e.g. `VISTA_LOGGING__LEVEL=debug`).
    pub fn load(workspace_root: Option<&Path>) -> Result<Self, ViewError> {
        let mut builder = Config::builder();

        if let Some(global) = global_config_path() {
            if global.exists() {
                builder = builder.add_source(File::from(global));
            } else {
                warn!(
                    config_path = %global.display(),
                    "global configuration file not found, using defaults"
                );
            }
        }

        if let Some(root) = workspace_root {
            let local = root.join(WORKSPACE_FILE);
            if local.exists() {
                builder = builder.add_source(File::from(local));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("VISTA")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?.try_deserialize::<ViewConfig>()?;
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ViewError> {
        toml::from_str(text).map_err(|e| ViewError::Config(e.to_string()))
    }

    /// Write the configuration as TOML to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ViewError> {
        let text = toml::to_string_pretty(self).map_err(|e| ViewError::Config(e.to_string()))?;
        std::fs::write(path, text)
            .map_err(|e| ViewError::Config(format!("cannot write {}: {}", path.display(), e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for root in &self.templates {
            if root.path.as_os_str().is_empty() {
                errors.push(ValidationError::Template(
                    "template root path cannot be empty".to_string(),
                ));
            }
            if root.extension.is_empty() {
                errors.push(ValidationError::Template(format!(
                    "template root '{}' has an empty extension",
                    root.path.display()
                )));
            }
        }

        for prefix in &self.exclude_prefixes {
            if prefix.is_empty() {
                errors.push(ValidationError::Exclusion(
                    "exclusion prefix cannot be empty".to_string(),
                ));
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "unknown format '{}', expected 'text' or 'json'",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Seed a registry from this configuration: shared namespaces into the
    /// graph, one exclusion filter per prefix, and a single file facility
    /// covering every template root.
    pub fn apply_to(&self, registry: &mut ViewEngineRegistry) {
        if !self.namespaces.is_empty() {
            let shared = registry.graph_mut().get_or_default::<CommonNamespaces>();
            for namespace in &self.namespaces {
                shared.add(namespace.clone());
            }
        }

        for prefix in &self.exclude_prefixes {
            let prefix = prefix.clone();
            registry.exclude_views(move |token| token.name().starts_with(prefix.as_str()));
        }

        if !self.templates.is_empty() {
            let mut facility = FileTemplateFacility::default();
            for root in &self.templates {
                facility.add_root(&root.path, root.extension.as_str());
            }
            registry.add_facility(facility);
        }
    }
}
