//! In-memory collaborators for navigation tests

use std::cell::RefCell;

use crate::context::ContextWriter;
use crate::error::{CtxError, Result};
use crate::kubeconfig::{AuthInfo, Cluster, KubeConfig};
use crate::upbound::{SpaceIngress, UpboundApi};

use super::node::{Group, Organization, Space};

pub fn cloud_space(org: &str, name: &str) -> Space {
    Space {
        org: Some(Organization {
            name: org.to_string(),
        }),
        name: name.to_string(),
        ingress: format!("{}.example.com", name),
        ca_data: Some("Q0EK".to_string()),
        insecure: false,
        auth_info: AuthInfo {
            token: Some(format!("tok-{}", org)),
            ..Default::default()
        },
    }
}

pub fn disconnected_space(name: &str) -> Space {
    Space {
        org: None,
        name: name.to_string(),
        ingress: name.to_string(),
        ca_data: None,
        insecure: false,
        auth_info: AuthInfo::default(),
    }
}

/// Fixed hierarchy: acme/{eu-1,us-1}/{default,team-a}/...; zeta has no spaces.
/// Only group "default" holds control planes.
#[derive(Default)]
pub struct FakeApi {
    /// Ingress returned for any cluster; `None` answers 404
    pub ingress: Option<String>,
    /// Non-zero: ingress lookups fail with this status
    pub ingress_status: u16,
    pub fail_listing: bool,
    /// Answer of `skip_tls_verify`
    pub insecure: bool,
    /// Breadcrumbs of every listed node, in order
    pub listed: RefCell<Vec<String>>,
}

impl FakeApi {
    fn record(&self, what: String) -> Result<()> {
        self.listed.borrow_mut().push(what);
        if self.fail_listing {
            return Err(CtxError::Api {
                status: 503,
                message: "Failed to fetch listing".to_string(),
            });
        }
        Ok(())
    }
}

impl UpboundApi for FakeApi {
    fn skip_tls_verify(&self) -> bool {
        self.insecure
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.record("/".to_string())?;
        Ok(["zeta", "acme"]
            .iter()
            .map(|name| Organization {
                name: name.to_string(),
            })
            .collect())
    }

    async fn list_spaces(&self, org: &Organization) -> Result<Vec<Space>> {
        self.record(format!("/{}", org.name))?;
        Ok(match org.name.as_str() {
            "acme" => vec![cloud_space("acme", "us-1"), cloud_space("acme", "eu-1")],
            _ => Vec::new(),
        })
    }

    async fn list_groups(&self, space: &Space) -> Result<Vec<String>> {
        self.record(space.breadcrumbs())?;
        Ok(vec!["team-a".to_string(), "default".to_string()])
    }

    async fn list_control_planes(&self, group: &Group) -> Result<Vec<String>> {
        self.record(group.breadcrumbs())?;
        Ok(match group.name.as_str() {
            "default" => vec!["ctp2".to_string(), "ctp1".to_string()],
            _ => Vec::new(),
        })
    }

    async fn get_space_ingress(
        &self,
        _cluster: &Cluster,
        _auth_info: Option<&AuthInfo>,
    ) -> Result<SpaceIngress> {
        let status = match (&self.ingress, self.ingress_status) {
            (Some(host), 0) => {
                return Ok(SpaceIngress {
                    host: host.clone(),
                    ca_data: None,
                })
            }
            (None, 0) => 404,
            (_, status) => status,
        };
        Err(CtxError::Api {
            status,
            message: "Failed to fetch config map ingress-public".to_string(),
        })
    }
}

/// Keeps every kubeconfig it is asked to write
pub struct RecordingWriter {
    pub name: String,
    pub written: RefCell<Vec<KubeConfig>>,
    pub fail: bool,
}

impl Default for RecordingWriter {
    fn default() -> Self {
        Self {
            name: "upbound".to_string(),
            written: RefCell::new(Vec::new()),
            fail: false,
        }
    }
}

impl ContextWriter for RecordingWriter {
    fn context_name(&self) -> &str {
        &self.name
    }

    async fn write(&self, config: &KubeConfig) -> Result<()> {
        if self.fail {
            return Err(CtxError::Verify("connection refused".to_string()));
        }
        self.written.borrow_mut().push(config.clone());
        Ok(())
    }
}
