//! Committing a navigation target into the operator's kubeconfig

use log::{debug, info, warn};
use std::cell::RefCell;

use crate::error::{CtxError, Result};
use crate::kubeconfig::{KubeConfig, KubeconfigStore};

use super::last::LastContextStore;
use super::merge::{contexts_equal, merge_upbound_context};
use super::swap::activate_context;

/// Checks a prospective kubeconfig before it is written
#[allow(async_fn_in_trait)]
pub trait KubeconfigVerifier {
    async fn verify(&self, config: &KubeConfig) -> Result<()>;
}

/// Destination for the kubeconfig built by an accepted navigation node
#[allow(async_fn_in_trait)]
pub trait ContextWriter {
    /// Name given to the context being written
    fn context_name(&self) -> &str;

    /// Commit the current context of `config`
    async fn write(&self, config: &KubeConfig) -> Result<()>;
}

/// Merges into a kubeconfig file under the canonical context name
pub struct FileContextWriter<V, L> {
    store: KubeconfigStore,
    last: L,
    verifier: V,
    preferred: String,
}

impl<V: KubeconfigVerifier, L: LastContextStore> FileContextWriter<V, L> {
    pub fn new(store: KubeconfigStore, last: L, verifier: V, preferred: &str) -> Self {
        Self {
            store,
            last,
            verifier,
            preferred: preferred.to_string(),
        }
    }

    /// Toggle back to the context recorded by the last switch.
    /// Needs no network access; the returned config is what was written.
    pub fn swap_to_previous(&self) -> Result<KubeConfig> {
        let last = self.last.read()?.ok_or_else(|| {
            CtxError::Navigation("no previous context to switch to".to_string())
        })?;
        debug!("Swapping to previous context {:?}", last);

        let current = self.store.load()?;
        let (conf, last) = activate_context(current, &last, &self.preferred)?;
        self.store.save(&conf)?;
        self.record_last(&last);
        Ok(conf)
    }

    /// Best effort: the kubeconfig is already written
    fn record_last(&self, name: &str) {
        if let Err(e) = self.last.write(name) {
            warn!("Failed to record previous context {:?}: {}", name, e);
        }
    }
}

impl<V: KubeconfigVerifier, L: LastContextStore> ContextWriter for FileContextWriter<V, L> {
    fn context_name(&self) -> &str {
        &self.preferred
    }

    async fn write(&self, config: &KubeConfig) -> Result<()> {
        let src_context = config.current_context.as_str();
        let current = self.store.load()?;

        if current.current_context == self.preferred
            && contexts_equal(&current, &self.preferred, config, src_context)
        {
            info!(
                "Context {:?} already points at this target, leaving {} untouched",
                self.preferred,
                self.store.path().display()
            );
            return Ok(());
        }

        let (merged, last) = merge_upbound_context(current, config, src_context, &self.preferred)?;
        self.verifier.verify(&merged).await?;
        self.store.save(&merged)?;
        self.record_last(&last);
        Ok(())
    }
}

/// Renders the kubeconfig instead of merging it (`--file -`).
/// The caller prints it once the terminal is free.
pub struct StdoutContextWriter {
    name: String,
    rendered: RefCell<Option<String>>,
}

impl StdoutContextWriter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rendered: RefCell::new(None),
        }
    }

    /// YAML of the last written kubeconfig
    pub fn take_rendered(&self) -> Option<String> {
        self.rendered.borrow_mut().take()
    }

    fn render(config: &KubeConfig) -> Result<String> {
        serde_yml::to_string(config)
            .map_err(|e| CtxError::Config(format!("Failed to serialize kubeconfig: {}", e)))
    }
}

impl ContextWriter for StdoutContextWriter {
    fn context_name(&self) -> &str {
        &self.name
    }

    async fn write(&self, config: &KubeConfig) -> Result<()> {
        *self.rendered.borrow_mut() = Some(Self::render(config)?);
        Ok(())
    }
}
