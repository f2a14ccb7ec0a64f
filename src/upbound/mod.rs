//! Upbound collaborators: the cloud API and space Kubernetes APIs

mod cloud;
mod exec;
pub mod jwt;
mod models;
mod space;
mod verify;

pub use cloud::CloudClient;
pub use space::SpaceClient;
pub use verify::ProbeVerifier;

use crate::error::Result;
use crate::kubeconfig::{AuthInfo, Cluster};
use crate::nav::{Group, Organization, Space};

/// Ingress published by a self-hosted space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceIngress {
    /// Host, optionally with port
    pub host: String,
    /// Base64 PEM bundle
    pub ca_data: Option<String>,
}

/// Everything navigation needs to list children and recognise spaces
#[allow(async_fn_in_trait)]
pub trait UpboundApi {
    /// Whether spaces reached through this client skip TLS verification
    fn skip_tls_verify(&self) -> bool {
        false
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>>;

    async fn list_spaces(&self, org: &Organization) -> Result<Vec<Space>>;

    async fn list_groups(&self, space: &Space) -> Result<Vec<String>>;

    async fn list_control_planes(&self, group: &Group) -> Result<Vec<String>>;

    /// Ingress config map of the space behind `cluster`.
    /// 404/401/403 errors mean the endpoint is not a self-hosted space.
    async fn get_space_ingress(
        &self,
        cluster: &Cluster,
        auth_info: Option<&AuthInfo>,
    ) -> Result<SpaceIngress>;
}

/// Production implementation over HTTP
pub struct UpboundClient {
    cloud: CloudClient,
    insecure: bool,
}

impl UpboundClient {
    pub fn new(cloud: CloudClient, insecure: bool) -> Self {
        Self { cloud, insecure }
    }

    /// Credentials stored in contexts for cloud spaces
    fn cloud_auth_info(&self) -> AuthInfo {
        AuthInfo {
            token: self.cloud.token().map(str::to_string),
            ..Default::default()
        }
    }

    /// The space's own cluster entry decides trust, as it will once written
    async fn connect(&self, space: &Space) -> Result<SpaceClient> {
        let cluster = space.cluster(space.server_url());
        SpaceClient::connect(&cluster, Some(&space.auth_info), false).await
    }
}

impl UpboundApi for UpboundClient {
    fn skip_tls_verify(&self) -> bool {
        self.insecure
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let orgs = self.cloud.list_organizations().await?;
        Ok(orgs
            .into_iter()
            .map(|org| Organization { name: org.name })
            .collect())
    }

    async fn list_spaces(&self, org: &Organization) -> Result<Vec<Space>> {
        let spaces = self.cloud.list_spaces(&org.name).await?;
        Ok(spaces
            .into_iter()
            .map(|space| Space {
                org: Some(org.clone()),
                name: space.name,
                ingress: space.ingress,
                ca_data: space.ca,
                insecure: self.insecure,
                auth_info: self.cloud_auth_info(),
            })
            .collect())
    }

    async fn list_groups(&self, space: &Space) -> Result<Vec<String>> {
        self.connect(space).await?.list_groups().await
    }

    async fn list_control_planes(&self, group: &Group) -> Result<Vec<String>> {
        self.connect(&group.space)
            .await?
            .list_control_planes(&group.name)
            .await
    }

    async fn get_space_ingress(
        &self,
        cluster: &Cluster,
        auth_info: Option<&AuthInfo>,
    ) -> Result<SpaceIngress> {
        SpaceClient::connect(cluster, auth_info, self.insecure)
            .await?
            .get_ingress()
            .await
    }
}
