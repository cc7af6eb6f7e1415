//! Configuration loading

use std::path::{Path, PathBuf};

use mongolaunch_common::config::Config;
use mongolaunch_common::Result;

/// Settings given on the command line or through the environment.
/// They win over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub runtime: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub create_dir: bool,
}

/// Load configuration from file, or defaults when it does not exist
pub fn load(path: &Path, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    apply(&mut config, overrides);
    Ok(config)
}

pub fn apply(config: &mut Config, overrides: &Overrides) {
    if let Some(runtime) = &overrides.runtime {
        config.runtime.program.clone_from(runtime);
    }
    if let Some(base_dir) = &overrides.base_dir {
        config.storage.base_dir = Some(base_dir.clone());
    }
    if overrides.create_dir {
        config.storage.create_dir = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[runtime]\nprogram = \"podman\"\n\n[storage]\nbase_dir = \"/from/file\"").unwrap();

        let overrides = Overrides {
            runtime: Some("nerdctl".to_string()),
            base_dir: None,
            create_dir: true,
        };
        let config = load(file.path(), &overrides).unwrap();
        assert_eq!(config.runtime.program, "nerdctl");
        assert_eq!(config.storage.base_dir, Some(PathBuf::from("/from/file")));
        assert!(config.storage.create_dir);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("missing.toml"), &Overrides::default()).unwrap();
        assert_eq!(config, Config::default());
    }
}
