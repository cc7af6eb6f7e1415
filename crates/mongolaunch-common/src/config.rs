//! Configuration management for mongolaunch
//!
//! Every default reproduces the fixed development setup: a `sample-mongodb`
//! container from `mongo:latest` on port 27017 with its data kept under
//! `.tmp/mongo` next to the launcher.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{ContainerInvocation, Credentials, PortMapping, VolumeMount};

/// Main configuration structure for mongolaunch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Container runtime configuration
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Container configuration
    #[serde(default)]
    pub container: ContainerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML/JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let config: Config = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse TOML config: {}", e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse JSON config: {}", e)))?
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Build the runtime invocation for a resolved storage path
    pub fn invocation(&self, storage_path: &Path) -> Result<ContainerInvocation> {
        let container = &self.container;
        let invocation = ContainerInvocation::new(
            container.name.clone(),
            container.image.parse()?,
            PortMapping::new(container.host_port, container.container_port)?,
            &container.credentials(),
            VolumeMount::new(storage_path, &self.storage.container_path)?,
        )?;
        Ok(invocation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Container runtime program (`docker`, `podman`, or a path)
    pub program: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Container name; fixed, so a second concurrent launch collides
    pub name: String,
    /// Image reference
    pub image: String,
    /// Port published on the host
    pub host_port: u16,
    /// Port MongoDB listens on inside the container
    pub container_port: u16,
    /// Root administrator user name
    pub username: String,
    /// Root administrator password
    pub password: String,
}

impl ContainerConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "sample-mongodb".to_string(),
            image: "mongo:latest".to_string(),
            host_port: 27017,
            container_port: 27017,
            username: "admin".to_string(),
            password: "admin-password".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory the storage path is anchored at (default: the launcher's directory)
    pub base_dir: Option<PathBuf>,
    /// Storage path relative to the base directory
    pub relative_path: PathBuf,
    /// Database data directory inside the container
    pub container_path: PathBuf,
    /// Create the storage directory before launching
    pub create_dir: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            relative_path: PathBuf::from(".tmp/mongo"),
            container_path: PathBuf::from("/data/db"),
            create_dir: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fixed_setup() {
        let config = Config::default();
        assert_eq!(config.runtime.program, "docker");
        assert_eq!(config.container.name, "sample-mongodb");
        assert_eq!(config.container.image, "mongo:latest");
        assert_eq!(config.container.host_port, 27017);
        assert_eq!(config.container.container_port, 27017);
        assert_eq!(config.storage.relative_path, PathBuf::from(".tmp/mongo"));
        assert_eq!(config.storage.container_path, PathBuf::from("/data/db"));
        assert!(config.storage.base_dir.is_none());
        assert!(!config.storage.create_dir);
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[runtime]
program = "podman"

[container]
host_port = 27018
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.runtime.program, "podman");
        assert_eq!(config.container.host_port, 27018);
        assert_eq!(config.container.container_port, 27017);
        assert_eq!(config.container.name, "sample-mongodb");
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"storage": {{"create_dir": true}}}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.storage.create_dir);
        assert_eq!(config.container, ContainerConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "container = 3").unwrap();
        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invocation_from_config() {
        let config = Config::default();
        let invocation = config.invocation(Path::new("/srv/.tmp/mongo")).unwrap();
        assert_eq!(invocation.name(), "sample-mongodb");
        assert_eq!(invocation.volume().target, PathBuf::from("/data/db"));

        let mut config = Config::default();
        config.container.host_port = 0;
        assert!(matches!(
            config.invocation(Path::new("/srv")),
            Err(Error::InvalidInvocation(_))
        ));
    }
}
