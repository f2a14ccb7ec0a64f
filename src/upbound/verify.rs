//! Health probe run against a merged kubeconfig before it is saved

use log::debug;

use crate::context::KubeconfigVerifier;
use crate::error::{CtxError, Result};
use crate::kubeconfig::KubeConfig;

use super::space::SpaceClient;

/// Probes the current context of the kubeconfig with an authenticated request.
/// Trust comes only from the kubeconfig itself, so a passing probe means the
/// written file works.
pub struct ProbeVerifier;

impl KubeconfigVerifier for ProbeVerifier {
    async fn verify(&self, config: &KubeConfig) -> Result<()> {
        let current = config.resolve_current()?;
        debug!(
            "Probing context {:?} at {}",
            current.name, current.cluster.server
        );

        let client = SpaceClient::connect(current.cluster, current.auth_info, false)
            .await
            .map_err(|e| CtxError::Verify(e.to_string()))?;
        client
            .probe()
            .await
            .map_err(|e| CtxError::Verify(format!("{}: {}", current.cluster.server, e)))
    }
}
