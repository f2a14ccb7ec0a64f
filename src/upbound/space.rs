//! Kubernetes API client for a space (or a control plane proxied by it)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use reqwest::{Certificate, Client, ClientBuilder, Identity};
use serde::de::DeserializeOwned;
use std::fs;
use std::time::Duration;

use crate::config::{http, spaces};
use crate::error::{CtxError, Result};
use crate::kubeconfig::{AuthInfo, Cluster};

use super::exec::run_exec_plugin;
use super::models::{ConfigMap, NamedObject, ObjectList};
use super::SpaceIngress;

/// Client bound to one kubeconfig cluster and its credentials
pub struct SpaceClient {
    client: Client,
    server: String,
    token: Option<String>,
}

impl SpaceClient {
    /// Build a client the way kubectl would for this cluster and user.
    /// Exec plugins run here, once per client.
    pub async fn connect(
        cluster: &Cluster,
        auth_info: Option<&AuthInfo>,
        insecure: bool,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(http::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(http::TIMEOUT_SECS));

        builder = with_cluster_trust(builder, cluster)?;
        if insecure || cluster.insecure_skip_tls_verify == Some(true) {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let mut token = None;
        if let Some(auth_info) = auth_info {
            token = auth_info.token.clone();
            let mut cert = auth_info.client_certificate_data.clone();
            let mut key = auth_info.client_key_data.clone();

            if let Some(exec) = &auth_info.exec {
                let status = run_exec_plugin(exec).await?;
                token = status.token.or(token);
                if status.client_certificate_data.is_some() {
                    // plugin output is PEM, kubeconfig fields are base64
                    cert = status.client_certificate_data.map(|pem| STANDARD.encode(pem));
                    key = status.client_key_data.map(|pem| STANDARD.encode(pem));
                }
            }

            if let (Some(cert), Some(key)) = (cert, key) {
                let mut pem = decode_pem("client-certificate-data", &cert)?;
                pem.push(b'\n');
                pem.extend(decode_pem("client-key-data", &key)?);
                builder = builder.identity(Identity::from_pem(&pem)?);
            }
        }

        Ok(Self {
            client: builder.build()?,
            server: cluster.server.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, error_context: &str) -> Result<T> {
        let url = format!("{}/{}", self.server, path);
        debug!("Fetching {} from: {}", error_context, url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(CtxError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", error_context),
            });
        }
        Ok(response.json().await?)
    }

    /// Namespaces labelled as groups
    pub async fn list_groups(&self) -> Result<Vec<String>> {
        let path = format!(
            "api/v1/namespaces?labelSelector={}",
            urlencoding::encode(spaces::GROUP_LABEL)
        );
        let list: ObjectList<NamedObject> = self.get_json(&path, "groups").await?;
        Ok(names(list))
    }

    pub async fn list_control_planes(&self, group: &str) -> Result<Vec<String>> {
        let path = format!(
            "{}/namespaces/{}/controlplanes",
            spaces::API_PREFIX,
            urlencoding::encode(group)
        );
        let list: ObjectList<NamedObject> = self
            .get_json(&path, &format!("control planes in group '{}'", group))
            .await?;
        Ok(names(list))
    }

    /// Ingress published by a self-hosted space
    pub async fn get_ingress(&self) -> Result<SpaceIngress> {
        let path = format!(
            "api/v1/namespaces/{}/configmaps/{}",
            spaces::SYSTEM_NAMESPACE,
            spaces::INGRESS_CONFIG_MAP
        );
        let config_map: ConfigMap = self
            .get_json(&path, &format!("config map {}", spaces::INGRESS_CONFIG_MAP))
            .await?;

        let host = config_map
            .data
            .get(spaces::INGRESS_HOST_KEY)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| {
                CtxError::Config(format!(
                    "config map {} has no {}",
                    spaces::INGRESS_CONFIG_MAP,
                    spaces::INGRESS_HOST_KEY
                ))
            })?;

        Ok(SpaceIngress {
            host: host.clone(),
            ca_data: config_map
                .data
                .get(spaces::INGRESS_CA_KEY)
                .filter(|ca| !ca.is_empty())
                .map(|pem| STANDARD.encode(pem)),
        })
    }

    /// Succeeds when the API server answers an authenticated request
    pub async fn probe(&self) -> Result<()> {
        let _: serde_json::Value = self.get_json(spaces::PROBE_PATH, "server version").await?;
        Ok(())
    }
}

fn names(list: ObjectList<NamedObject>) -> Vec<String> {
    list.items
        .into_iter()
        .map(|item| item.metadata.name)
        .filter(|name| !name.is_empty())
        .collect()
}

fn decode_pem(field: &str, data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| CtxError::Config(format!("invalid {}: {}", field, e)))
}

fn with_cluster_trust(mut builder: ClientBuilder, cluster: &Cluster) -> Result<ClientBuilder> {
    let pem = match (&cluster.certificate_authority_data, &cluster.certificate_authority) {
        (Some(data), _) => decode_pem("certificate-authority-data", data)?,
        (None, Some(path)) => fs::read(path).map_err(|e| {
            CtxError::Config(format!("Failed to read certificate authority {}: {}", path, e))
        })?,
        (None, None) => return Ok(builder),
    };

    for cert in Certificate::from_pem_bundle(&pem)? {
        builder = builder.add_root_certificate(cert);
    }
    Ok(builder)
}
