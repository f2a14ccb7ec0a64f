//! Exec credential plugins (`users[].user.exec`)

use log::debug;
use tokio::process::Command;

use crate::config::kube;
use crate::error::{CtxError, Result};
use crate::kubeconfig::ExecConfig;

use super::models::{ExecCredential, ExecCredentialStatus};

/// Run the plugin and return the credentials it printed
pub async fn run_exec_plugin(exec: &ExecConfig) -> Result<ExecCredentialStatus> {
    let api_version = if exec.api_version.is_empty() {
        kube::EXEC_API_VERSION
    } else {
        exec.api_version.as_str()
    };
    let exec_info = serde_json::json!({
        "apiVersion": api_version,
        "kind": "ExecCredential",
        "spec": {"interactive": false},
    });

    debug!("Running exec credential plugin: {} {:?}", exec.command, exec.args);
    let output = Command::new(&exec.command)
        .args(&exec.args)
        .envs(exec.env.iter().map(|e| (e.name.as_str(), e.value.as_str())))
        .env("KUBERNETES_EXEC_INFO", exec_info.to_string())
        .output()
        .await
        .map_err(|e| CtxError::Token(format!("failed to run {}: {}", exec.command, e)))?;

    if !output.status.success() {
        return Err(CtxError::Token(format!(
            "{} exited with {}: {}",
            exec.command,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let credential: ExecCredential = serde_json::from_slice(&output.stdout)?;
    credential
        .status
        .ok_or_else(|| CtxError::Token(format!("{} returned no credentials", exec.command)))
}
