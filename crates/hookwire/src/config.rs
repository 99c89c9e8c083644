//! Registry configuration loading with 4-tier priority.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{DEFAULT_PRIORITY, Priority};

/// Effective settings shared by a registry and every hook it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Priority used by [`Hook::add`](crate::Hook::add) (default: 10).
    #[serde(default = "default_priority")]
    pub default_priority: Priority,
    /// Drop a priority bucket once its last entry is removed (default: false).
    #[serde(default)]
    pub prune_empty_buckets: bool,
}

fn default_priority() -> Priority {
    DEFAULT_PRIORITY
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            prune_empty_buckets: false,
        }
    }
}

/// One configuration source. `None` fields defer to lower-priority layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfigLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune_empty_buckets: Option<bool>,
}

impl RegistryConfigLayer {
    /// Load from a TOML file, returning an empty layer on error.
    fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(layer) => layer,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse registry config at {}: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read registry config at {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply the fields this layer sets on top of `config`.
    fn apply_to(&self, config: &mut RegistryConfig) {
        if let Some(priority) = self.default_priority {
            config.default_priority = priority;
        }
        if let Some(prune) = self.prune_empty_buckets {
            config.prune_empty_buckets = prune;
        }
    }
}

/// Load registry config with 4-tier priority:
/// 1. runtime_overrides (highest)
/// 2. project config
/// 3. global config (`{config_dir}/hookwire/registry.toml`)
/// 4. built-in defaults (lowest)
///
/// Missing files are skipped; unreadable or malformed files are logged and skipped.
pub fn load_registry_config(
    project_config_path: Option<&Path>,
    global_config_path: Option<&Path>,
    runtime_overrides: Option<&RegistryConfigLayer>,
) -> RegistryConfig {
    // Layer 4 (lowest): built-in defaults
    let mut config = RegistryConfig::default();

    // Layer 3: global config
    if let Some(path) = global_config_path {
        RegistryConfigLayer::load_from_file(path).apply_to(&mut config);
    }

    // Layer 2: project config
    if let Some(path) = project_config_path {
        RegistryConfigLayer::load_from_file(path).apply_to(&mut config);
    }

    // Layer 1 (highest): runtime overrides
    if let Some(overrides) = runtime_overrides {
        overrides.apply_to(&mut config);
    }

    tracing::debug!(?config, "Loaded registry config");
    config
}

/// Resolve the global registry config path
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "hookwire")
        .map(|dirs| dirs.config_dir().join("registry.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_empty_config() {
        let config = load_registry_config(None, None, None);
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.default_priority, 10);
        assert!(!config.prune_empty_buckets);
    }

    #[test]
    fn test_load_global_config() {
        let global = write_config(
            r#"
default_priority = 25
"#,
        );

        let config = load_registry_config(None, Some(global.path()), None);
        assert_eq!(config.default_priority, 25);
        assert!(!config.prune_empty_buckets);
    }

    #[test]
    fn test_priority_merge() {
        let global = write_config(
            r#"
default_priority = 25
prune_empty_buckets = true
"#,
        );
        let project = write_config(
            r#"
default_priority = -1
"#,
        );

        // Project overrides global field by field
        let config = load_registry_config(Some(project.path()), Some(global.path()), None);
        assert_eq!(config.default_priority, -1);
        assert!(config.prune_empty_buckets);
    }

    #[test]
    fn test_runtime_overrides() {
        let project = write_config(
            r#"
default_priority = 3
prune_empty_buckets = true
"#,
        );
        let overrides = RegistryConfigLayer {
            default_priority: None,
            prune_empty_buckets: Some(false),
        };

        let config = load_registry_config(Some(project.path()), None, Some(&overrides));
        assert_eq!(config.default_priority, 3);
        assert!(!config.prune_empty_buckets);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = load_registry_config(Some(&missing), None, None);
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let broken = write_config("default_priority = \"high\"");
        let global = write_config("default_priority = 7");

        let config = load_registry_config(Some(broken.path()), Some(global.path()), None);
        assert_eq!(config.default_priority, 7);
    }

    #[test]
    fn test_registry_config_serde_roundtrip() {
        let original = RegistryConfig {
            default_priority: 42,
            prune_empty_buckets: true,
        };
        let encoded = toml::to_string(&original).unwrap();
        let decoded: RegistryConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_registry_config_defaults_when_fields_missing() {
        let config: RegistryConfig = toml::from_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_global_config_path_file_name() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("registry.toml"));
        }
    }
}
