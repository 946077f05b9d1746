//! Configuration loading for trunk-yls
//!
//! Architecture: Anti-Corruption Layer - Configuration translates the external YAML file
//! - Raw YAML is converted into the exclusion set the rules consult
//! - Lookup of the default config file lives here, not in the CLI

use crate::domain::diagnostics::{YlsError, YlsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "trunk-yls.yaml";

/// Exclusion configuration for schema sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YlsConfig {
    /// Hostnames (`host[:port]`) that may not serve schemas
    #[serde(default)]
    pub excluded_domains: BTreeSet<String>,
}

impl YlsConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> YlsResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            YlsError::config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config = Self::parse(&contents).map_err(|e| {
            YlsError::config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        config.warn_unusable_entries();
        tracing::debug!(
            "Loaded {} excluded domain(s) from {}",
            config.excluded_domains.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> YlsResult<Self> {
        let config = Self::parse(content)
            .map_err(|e| YlsError::config(format!("Failed to parse config: {e}")))?;

        config.warn_unusable_entries();
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `trunk-yls.yaml` in the
    /// working directory is used when present, otherwise the empty config.
    pub fn resolve(explicit: Option<&Path>) -> YlsResult<Self> {
        match explicit {
            Some(path) if !path.is_file() => Err(YlsError::ConfigNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from_file(default_path)
                } else {
                    tracing::debug!("No {} found, using empty exclusion list", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Entries that can never match a schema domain.
    ///
    /// These are kept in the config; they are reported, not rejected.
    pub fn unusable_entries(&self) -> Vec<String> {
        self.excluded_domains
            .iter()
            .filter_map(|domain| {
                if domain.trim().is_empty() {
                    Some("Excluded domain entries should not be blank".to_string())
                } else if domain.contains('/') {
                    Some(format!("Excluded domain '{domain}' is a URL, not a host"))
                } else {
                    None
                }
            })
            .collect()
    }

    fn warn_unusable_entries(&self) {
        for problem in self.unusable_entries() {
            tracing::warn!("{}", problem);
        }
    }

    /// Whether schemas served from `domain` are forbidden. Matching is exact.
    pub fn is_excluded(&self, domain: &str) -> bool {
        !domain.is_empty() && self.excluded_domains.contains(domain)
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: YlsConfig,
}

impl ConfigBuilder {
    /// Create a new builder with an empty exclusion list
    pub fn new() -> Self {
        Self { config: YlsConfig::default() }
    }

    /// Forbid schemas served from `domain`
    pub fn exclude_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.excluded_domains.insert(domain.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> YlsConfig {
        self.config.warn_unusable_entries();
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
