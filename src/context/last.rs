//! Previous-context pointer storage

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::last_context;
use crate::error::{CtxError, Result};

/// Stores the context name restored by `upctx -`
pub trait LastContextStore {
    /// Stored name, `None` when nothing was recorded
    fn read(&self) -> Result<Option<String>>;
    /// Record `name`, replacing any previous value
    fn write(&self, name: &str) -> Result<()>;
}

/// Pointer kept in a single-line file (~/.up/last-context)
pub struct FileLastContext {
    path: PathBuf,
}

impl Default for FileLastContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLastContext {
    pub fn new() -> Self {
        Self {
            path: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(last_context::DIR_NAME)
                .join(last_context::FILE_NAME),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LastContextStore for FileLastContext {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let name = content.trim();
                Ok((!name.is_empty()).then(|| name.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CtxError::Config(format!(
                "Failed to read last context {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, name: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CtxError::Config(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(&self.path, format!("{}\n", name)).map_err(|e| {
            CtxError::Config(format!(
                "Failed to write last context {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
