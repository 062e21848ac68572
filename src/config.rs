//! Engine configuration: defaults, optional JSON config file, and `SKOS_*`
//! environment overrides, merged in that order (environment wins).

use crate::error::{Result, ThesaurusError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default recursion bound for hierarchy construction. Deep enough for any
/// real thesaurus; shallow enough to cut off pathological closures fast.
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 64;

const ENV_SORT_LANGUAGE: &str = "SKOS_SORT_LANGUAGE";
const ENV_MAX_HIERARCHY_DEPTH: &str = "SKOS_MAX_HIERARCHY_DEPTH";

/// Resolved engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default language for label-based sibling ordering when a call does
    /// not pass one explicitly.
    pub sort_language: Option<String>,
    /// Upper bound on hierarchy recursion depth, per branch.
    pub max_hierarchy_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            sort_language: None,
            max_hierarchy_depth: DEFAULT_MAX_HIERARCHY_DEPTH,
        }
    }
}

/// File-level view of the configuration; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    sort_language: Option<String>,
    max_hierarchy_depth: Option<usize>,
}

impl EngineConfig {
    /// Load configuration: JSON file (if given) overlaid with environment
    /// variables. Missing pieces fall back to defaults.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_config = match config_file {
            Some(path) => load_config_file(path)?,
            None => PartialConfig::default(),
        };

        let sort_language = env::var(ENV_SORT_LANGUAGE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(file_config.sort_language);

        let max_hierarchy_depth = match env::var(ENV_MAX_HIERARCHY_DEPTH) {
            Ok(raw) => Some(raw.trim().parse::<usize>().map_err(|_| {
                ThesaurusError::Config(format!(
                    "{ENV_MAX_HIERARCHY_DEPTH} must be a positive integer, got `{raw}`"
                ))
            })?),
            Err(_) => None,
        }
        .or(file_config.max_hierarchy_depth)
        .unwrap_or(DEFAULT_MAX_HIERARCHY_DEPTH);

        if max_hierarchy_depth == 0 {
            return Err(ThesaurusError::Config(
                "max_hierarchy_depth must be at least 1".to_string(),
            ));
        }

        Ok(EngineConfig {
            sort_language,
            max_hierarchy_depth,
        })
    }
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ThesaurusError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ThesaurusError::Config(format!("failed to parse {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_nothing_is_given() {
        let config = EngineConfig::default();
        assert_eq!(config.sort_language, None);
        assert_eq!(config.max_hierarchy_depth, DEFAULT_MAX_HIERARCHY_DEPTH);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sort_language": "de", "max_hierarchy_depth": 12}}"#
        )
        .unwrap();

        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.sort_language.as_deref(), Some("de"));
        assert_eq!(config.max_hierarchy_depth, 12);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            EngineConfig::load(Some(file.path())),
            Err(ThesaurusError::Config(_))
        ));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_hierarchy_depth": 0}}"#).unwrap();

        assert!(matches!(
            EngineConfig::load(Some(file.path())),
            Err(ThesaurusError::Config(_))
        ));
    }
}
