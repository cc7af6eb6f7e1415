//! Container invocation model for mongolaunch

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::InvocationError;

/// Environment variable the MongoDB image reads the root user name from
pub const ROOT_USERNAME_ENV: &str = "MONGO_INITDB_ROOT_USERNAME";

/// Environment variable the MongoDB image reads the root password from
pub const ROOT_PASSWORD_ENV: &str = "MONGO_INITDB_ROOT_PASSWORD";

/// Placeholder shown instead of the password in logs and rendered commands
pub const MASK: &str = "****";

// ============================================================================
// Invocation Parts
// ============================================================================

/// A published port, `host:container`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl PortMapping {
    pub fn new(host: u16, container: u16) -> Result<Self, InvocationError> {
        if host == 0 {
            return Err(InvocationError::ZeroPort("host"));
        }
        if container == 0 {
            return Err(InvocationError::ZeroPort("container"));
        }
        Ok(Self { host, container })
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

/// An environment assignment passed into the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, InvocationError> {
        let key = key.into();
        if key.is_empty() || key.contains('=') || key.chars().any(char::is_whitespace) {
            return Err(InvocationError::InvalidEnvKey(key));
        }
        Ok(Self {
            key,
            value: value.into(),
        })
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A bind mount from a host directory into the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl VolumeMount {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Result<Self, InvocationError> {
        let source = source.into();
        let target = target.into();
        for path in [&source, &target] {
            if !is_absolute_mount_path(path) {
                return Err(InvocationError::RelativeMount(path.clone()));
            }
        }
        Ok(Self { source, target })
    }
}

// Container paths are always POSIX, even when the host is not.
fn is_absolute_mount_path(path: &Path) -> bool {
    path.is_absolute() || path.to_string_lossy().starts_with('/')
}

impl fmt::Display for VolumeMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.display(), self.target.display())
    }
}

/// An image reference, `repository[:tag]` or `repository@digest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    /// `None` for digest references
    pub tag: Option<String>,
}

impl ImageRef {
    pub const DEFAULT_TAG: &'static str = "latest";
}

impl FromStr for ImageRef {
    type Err = InvocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(InvocationError::InvalidImage(s.to_string()));
        }

        if s.contains('@') {
            return Ok(Self {
                repository: s.to_string(),
                tag: None,
            });
        }

        // A colon before the last slash belongs to a registry host:port.
        let name_start = s.rfind('/').map_or(0, |i| i + 1);
        let (repository, tag) = match s[name_start..].rfind(':') {
            Some(i) => (&s[..name_start + i], &s[name_start + i + 1..]),
            None => (s, Self::DEFAULT_TAG),
        };

        if repository.is_empty() || tag.is_empty() || repository.ends_with('/') {
            return Err(InvocationError::InvalidImage(s.to_string()));
        }

        Ok(Self {
            repository: repository.to_string(),
            tag: Some(tag.to_string()),
        })
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}:{}", self.repository, tag),
            None => f.write_str(&self.repository),
        }
    }
}

/// Root administrator credentials handed to the database image
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &MASK)
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The two environment assignments, username first
    pub fn env_vars(&self) -> Result<[EnvVar; 2], InvocationError> {
        Ok([
            EnvVar::new(ROOT_USERNAME_ENV, self.username.clone())?,
            EnvVar::new(ROOT_PASSWORD_ENV, self.password.clone())?,
        ])
    }
}

// ============================================================================
// Container Invocation
// ============================================================================

/// Whether rendered arguments may contain the password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Secrets {
    #[default]
    Masked,
    Revealed,
}

/// One `run` request to the container runtime.
///
/// Always auto-removed, with exactly one name, image, port mapping and
/// volume mount plus the two credential variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInvocation {
    name: String,
    image: ImageRef,
    port: PortMapping,
    env: [EnvVar; 2],
    volume: VolumeMount,
}

impl ContainerInvocation {
    pub fn new(
        name: impl Into<String>,
        image: ImageRef,
        port: PortMapping,
        credentials: &Credentials,
        volume: VolumeMount,
    ) -> Result<Self, InvocationError> {
        let name = name.into();
        validate_name(&name)?;
        let env = credentials.env_vars()?;

        Ok(Self {
            name,
            image,
            port,
            env,
            volume,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> &VolumeMount {
        &self.volume
    }

    /// Arguments for the runtime program, starting with the `run` verb
    pub fn to_args(&self) -> Vec<String> {
        self.render_args(Secrets::Revealed)
    }

    /// Arguments with the password replaced by [`MASK`] unless revealed
    pub fn render_args(&self, secrets: Secrets) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--name".to_string(),
            self.name.clone(),
            "-p".to_string(),
            self.port.to_string(),
        ];

        for var in &self.env {
            args.push("-e".to_string());
            if secrets == Secrets::Masked && var.key == ROOT_PASSWORD_ENV {
                args.push(format!("{}={}", var.key, MASK));
            } else {
                args.push(var.to_string());
            }
        }

        args.push("-v".to_string());
        args.push(self.volume.to_string());
        args.push(self.image.to_string());
        args
    }
}

fn validate_name(name: &str) -> Result<(), InvocationError> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err(InvocationError::EmptyName),
        Some(first) if !first.is_ascii_alphanumeric() => {
            Err(InvocationError::InvalidName(name.to_string()))
        }
        Some(_) => {
            if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')) {
                Ok(())
            } else {
                Err(InvocationError::InvalidName(name.to_string()))
            }
        }
    }
}
