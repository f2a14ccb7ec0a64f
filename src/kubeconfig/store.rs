//! Kubeconfig file I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::kube;
use crate::error::{CtxError, Result};

use super::models::KubeConfig;

/// Handles reading and writing a kubeconfig file
#[derive(Debug, Clone)]
pub struct KubeconfigStore {
    config_path: PathBuf,
}

impl Default for KubeconfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KubeconfigStore {
    /// Create a new store using the default kubeconfig path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a store with a custom path (--file flag, tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Path of the file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// First entry of $KUBECONFIG, else ~/.kube/config
    fn default_config_path() -> PathBuf {
        let sep = if cfg!(windows) { ';' } else { ':' };

        std::env::var(kube::ENV_VAR)
            .ok()
            .and_then(|v| {
                v.split(sep)
                    .map(str::trim)
                    .find(|s| !s.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(kube::DIR_NAME)
                    .join(kube::FILE_NAME)
            })
    }

    /// Load the kubeconfig from disk.
    /// Returns an empty config if the file doesn't exist or is empty, errors on corrupt YAML.
    pub fn load(&self) -> Result<KubeConfig> {
        if !self.config_path.exists() {
            debug!(
                "Kubeconfig {} does not exist, starting empty",
                self.config_path.display()
            );
            return Ok(KubeConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            CtxError::Config(format!(
                "Failed to read kubeconfig {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(KubeConfig::default());
        }

        serde_yml::from_str(&content).map_err(|e| {
            CtxError::Config(format!(
                "Failed to parse kubeconfig {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Save the kubeconfig to disk.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    pub fn save(&self, config: &KubeConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CtxError::Config(format!(
                        "Failed to create kubeconfig directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let yaml = serde_yml::to_string(config)
            .map_err(|e| CtxError::Config(format!("Failed to serialize kubeconfig: {}", e)))?;

        let tmp_path = self.config_path.with_extension("tmp");
        fs::write(&tmp_path, &yaml).map_err(|e| {
            CtxError::Config(format!(
                "Failed to write temp kubeconfig {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| {
                CtxError::Config(format!("Failed to set permissions on kubeconfig: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.config_path).map_err(|e| {
            CtxError::Config(format!(
                "Failed to rename temp kubeconfig to {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        debug!("Wrote kubeconfig {}", self.config_path.display());
        Ok(())
    }
}
