//! Working out where the current kubeconfig context points

use log::debug;
use reqwest::Url;

use crate::error::{CtxError, Result};
use crate::kubeconfig::{Cluster, KubeConfig};
use crate::upbound::jwt::organization_from_auth;
use crate::upbound::UpboundApi;

use super::node::{ControlPlane, Group, NavigationNode, Organization, Space};

/// A cluster server URL split into the space endpoint and the path it addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPath {
    /// scheme://host[:port], plus any path prefix in front of the Kubernetes API
    pub base: String,
    pub group: Option<String>,
    pub control_plane: Option<String>,
}

impl ServerPath {
    pub fn parse(server: &str) -> Result<Self> {
        let url = Url::parse(server)
            .map_err(|e| CtxError::Config(format!("invalid server URL {:?}: {}", server, e)))?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let api_start = segments
            .iter()
            .position(|seg| *seg == "apis" || *seg == "api")
            .or_else(|| segments.iter().position(|seg| *seg == "namespaces"))
            .unwrap_or(segments.len());

        let mut base = url.origin().ascii_serialization();
        for seg in &segments[..api_start] {
            base.push('/');
            base.push_str(seg);
        }

        let mut group = None;
        let mut control_plane = None;
        if let Some(i) = segments.iter().position(|seg| *seg == "namespaces") {
            group = segments.get(i + 1).map(|s| s.to_string());
            if segments.get(i + 2) == Some(&"controlplanes") {
                control_plane = segments.get(i + 3).map(|s| s.to_string());
            }
        }

        Ok(Self {
            base,
            group,
            control_plane,
        })
    }

    /// Base without its scheme, the form spaces advertise as ingress
    pub fn ingress(&self) -> &str {
        strip_scheme(&self.base)
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Node corresponding to the current context of `config`
pub async fn derive_state<A: UpboundApi>(api: &A, config: &KubeConfig) -> Result<NavigationNode> {
    let current = config.resolve_current()?;
    let server = ServerPath::parse(&current.cluster.server)?;
    debug!("Deriving state of context {:?}: {:?}", current.name, server);

    let base_cluster = Cluster {
        server: server.base.clone(),
        ..current.cluster.clone()
    };
    let auth_info = current.auth_info.cloned().unwrap_or_default();
    let insecure =
        api.skip_tls_verify() || current.cluster.insecure_skip_tls_verify == Some(true);

    let space = match api.get_space_ingress(&base_cluster, current.auth_info).await {
        Ok(ingress) => {
            debug!("Self-hosted space with ingress {}", ingress.host);
            Space {
                org: None,
                name: strip_scheme(&ingress.host).trim_end_matches('/').to_string(),
                ingress: ingress.host,
                ca_data: ingress
                    .ca_data
                    .or_else(|| current.cluster.certificate_authority_data.clone()),
                insecure,
                auth_info,
            }
        }
        Err(e) if e.is_not_found() || e.is_unauthorized() => {
            let Some(org) = organization_from_auth(current.auth_info) else {
                debug!("No organization in credentials ({}), starting at root", e);
                return Ok(NavigationNode::Root);
            };
            let org = Organization { name: org };
            let ingress = server.ingress().to_string();
            let name = cloud_space_name(api, &org, &ingress).await;
            Space {
                org: Some(org),
                name,
                ingress,
                ca_data: current.cluster.certificate_authority_data.clone(),
                insecure,
                auth_info,
            }
        }
        Err(e) => return Err(e),
    };

    let group = server
        .group
        .or_else(|| current.context.namespace().map(str::to_string));

    Ok(match (group, server.control_plane) {
        (Some(group), Some(ctp)) => NavigationNode::ControlPlane(ControlPlane {
            group: Group { space, name: group },
            name: ctp,
        }),
        (Some(group), None) => NavigationNode::Group(Group { space, name: group }),
        (None, _) => NavigationNode::Space(space),
    })
}

/// Name of the organization's space serving `ingress`, or the ingress itself
async fn cloud_space_name<A: UpboundApi>(api: &A, org: &Organization, ingress: &str) -> String {
    match api.list_spaces(org).await {
        Ok(spaces) => spaces
            .into_iter()
            .find(|space| space.ingress.trim_end_matches('/') == ingress)
            .map(|space| space.name)
            .unwrap_or_else(|| ingress.to_string()),
        Err(e) => {
            debug!("Could not list spaces of {}: {}", org.name, e);
            ingress.to_string()
        }
    }
}
