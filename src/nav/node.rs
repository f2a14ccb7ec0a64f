//! Navigation nodes: root → organization → space → group → control plane

use log::debug;

use crate::config::spaces;
use crate::context::ContextWriter;
use crate::error::{CtxError, Result};
use crate::kubeconfig::{AuthInfo, Cluster, KubeConfig};
use crate::upbound::UpboundApi;

/// An Upbound organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
}

/// A space: one Kubernetes-like API endpoint hosting groups and control planes.
/// Cloud spaces belong to an organization; disconnected (self-hosted) spaces don't.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub org: Option<Organization>,
    pub name: String,
    /// Ingress host, optionally with port
    pub ingress: String,
    /// Base64 PEM bundle, as stored in kubeconfig
    pub ca_data: Option<String>,
    /// Skip TLS verification instead of trusting `ca_data`
    pub insecure: bool,
    pub auth_info: AuthInfo,
}

impl Space {
    pub fn is_cloud(&self) -> bool {
        self.org.is_some()
    }

    /// API server URL of the space
    pub fn server_url(&self) -> String {
        let ingress = self.ingress.trim_end_matches('/');
        if ingress.starts_with("https://") || ingress.starts_with("http://") {
            ingress.to_string()
        } else {
            format!("https://{}", ingress)
        }
    }

    /// Cluster entry reaching `server` with this space's trust settings.
    /// kubectl rejects a CA combined with insecure-skip-tls-verify.
    pub fn cluster(&self, server: String) -> Cluster {
        Cluster {
            server,
            certificate_authority_data: self.ca_data.clone().filter(|_| !self.insecure),
            insecure_skip_tls_verify: self.insecure.then_some(true),
            ..Default::default()
        }
    }

    pub fn breadcrumbs(&self) -> String {
        match &self.org {
            Some(org) => format!("/{}/{}", org.name, self.name),
            None => format!("/{}", self.name),
        }
    }
}

/// A group (namespace) inside a space
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub space: Space,
    pub name: String,
}

impl Group {
    pub fn breadcrumbs(&self) -> String {
        format!("{}/{}", self.space.breadcrumbs(), self.name)
    }
}

/// A control plane inside a group
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPlane {
    pub group: Group,
    pub name: String,
}

impl ControlPlane {
    /// Kubernetes API URL of the control plane, proxied by the space
    pub fn server_url(&self) -> String {
        format!(
            "{}/{}/namespaces/{}/controlplanes/{}/k8s",
            self.group.space.server_url(),
            spaces::API_PREFIX,
            self.group.name,
            self.name
        )
    }

    pub fn breadcrumbs(&self) -> String {
        format!("{}/{}", self.group.breadcrumbs(), self.name)
    }
}

/// Nodes with a parent. A disconnected space is the top of its hierarchy.
pub trait Back {
    fn back(&self) -> Option<NavigationNode>;
}

impl Back for Organization {
    fn back(&self) -> Option<NavigationNode> {
        Some(NavigationNode::Root)
    }
}

impl Back for Space {
    fn back(&self) -> Option<NavigationNode> {
        self.org.clone().map(NavigationNode::Organization)
    }
}

impl Back for Group {
    fn back(&self) -> Option<NavigationNode> {
        Some(NavigationNode::Space(self.space.clone()))
    }
}

impl Back for ControlPlane {
    fn back(&self) -> Option<NavigationNode> {
        Some(NavigationNode::Group(self.group.clone()))
    }
}

/// Nodes that can become the canonical kubeconfig context
pub trait Accepting {
    /// Single-context kubeconfig pointing at this node, entries named `name`
    fn kubeconfig(&self, name: &str) -> KubeConfig;
}

impl Accepting for Space {
    fn kubeconfig(&self, name: &str) -> KubeConfig {
        KubeConfig::single(
            name,
            self.cluster(self.server_url()),
            self.auth_info.clone(),
            None,
        )
    }
}

impl Accepting for Group {
    fn kubeconfig(&self, name: &str) -> KubeConfig {
        KubeConfig::single(
            name,
            self.space.cluster(self.space.server_url()),
            self.space.auth_info.clone(),
            Some(self.name.clone()),
        )
    }
}

impl Accepting for ControlPlane {
    fn kubeconfig(&self, name: &str) -> KubeConfig {
        KubeConfig::single(
            name,
            self.group.space.cluster(self.server_url()),
            self.group.space.auth_info.clone(),
            Some(spaces::CONTROL_PLANE_NAMESPACE.to_string()),
        )
    }
}

/// One entry of a node's listing
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub text: String,
    /// Node entered when the item is selected
    pub on_enter: Option<NavigationNode>,
    /// Placeholder rows such as "No groups found"
    pub not_selectable: bool,
    /// The synthetic ".." entry
    pub back: bool,
}

impl Item {
    fn child(text: String, node: NavigationNode) -> Self {
        Self {
            text,
            on_enter: Some(node),
            not_selectable: false,
            back: false,
        }
    }

    fn up(node: NavigationNode) -> Self {
        Self {
            text: "..".to_string(),
            on_enter: Some(node),
            not_selectable: false,
            back: true,
        }
    }

    fn placeholder(text: &str) -> Self {
        Self {
            text: text.to_string(),
            on_enter: None,
            not_selectable: true,
            back: false,
        }
    }
}

/// Where the operator currently is
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationNode {
    Root,
    Organization(Organization),
    Space(Space),
    Group(Group),
    ControlPlane(ControlPlane),
}

impl NavigationNode {
    /// Human-readable path of the node
    pub fn breadcrumbs(&self) -> String {
        match self {
            NavigationNode::Root => "/".to_string(),
            NavigationNode::Organization(org) => format!("/{}", org.name),
            NavigationNode::Space(space) => space.breadcrumbs(),
            NavigationNode::Group(group) => group.breadcrumbs(),
            NavigationNode::ControlPlane(ctp) => ctp.breadcrumbs(),
        }
    }

    fn as_back(&self) -> Option<&dyn Back> {
        match self {
            NavigationNode::Root => None,
            NavigationNode::Organization(org) => Some(org),
            NavigationNode::Space(space) => Some(space),
            NavigationNode::Group(group) => Some(group),
            NavigationNode::ControlPlane(ctp) => Some(ctp),
        }
    }

    /// Parent node; `None` at the top of the hierarchy
    pub fn back(&self) -> Option<NavigationNode> {
        self.as_back().and_then(|node| node.back())
    }

    /// The node as an activation target, if it can be one
    pub fn accepting(&self) -> Option<&dyn Accepting> {
        match self {
            NavigationNode::Space(space) if space.is_cloud() => Some(space),
            NavigationNode::Group(group) => Some(group),
            NavigationNode::ControlPlane(ctp) => Some(ctp),
            _ => None,
        }
    }

    pub fn can_accept(&self) -> bool {
        self.accepting().is_some()
    }

    /// Make this node the canonical kubeconfig context
    pub async fn accept<W: ContextWriter>(&self, writer: &W) -> Result<String> {
        let target = self.accepting().ok_or_else(|| {
            CtxError::Navigation(format!("cannot switch context to {}", self.breadcrumbs()))
        })?;

        let name = writer.context_name();
        writer.write(&target.kubeconfig(name)).await?;
        Ok(format!(
            "Kubeconfig context {:?} switched to: {}",
            name,
            self.breadcrumbs()
        ))
    }

    /// Children of this node, sorted by name, preceded by ".." when there is a parent
    pub async fn items<A: UpboundApi>(&self, api: &A) -> Result<Vec<Item>> {
        let (mut children, empty) = match self {
            NavigationNode::Root => {
                let orgs = api.list_organizations().await?;
                let items = orgs
                    .into_iter()
                    .map(|org| Item::child(org.name.clone(), NavigationNode::Organization(org)))
                    .collect();
                (items, "No organizations found")
            }
            NavigationNode::Organization(org) => {
                let spaces = api.list_spaces(org).await?;
                let items = spaces
                    .into_iter()
                    .map(|space| Item::child(space.name.clone(), NavigationNode::Space(space)))
                    .collect();
                (items, "No spaces found")
            }
            NavigationNode::Space(space) => {
                let groups = api.list_groups(space).await?;
                let items = groups
                    .into_iter()
                    .map(|name| {
                        let group = Group {
                            space: space.clone(),
                            name: name.clone(),
                        };
                        Item::child(name, NavigationNode::Group(group))
                    })
                    .collect();
                (items, "No groups found")
            }
            NavigationNode::Group(group) => {
                let ctps = api.list_control_planes(group).await?;
                let items = ctps
                    .into_iter()
                    .map(|name| {
                        let ctp = ControlPlane {
                            group: group.clone(),
                            name: name.clone(),
                        };
                        Item::child(name, NavigationNode::ControlPlane(ctp))
                    })
                    .collect();
                (items, "No control planes found")
            }
            NavigationNode::ControlPlane(_) => (Vec::new(), ""),
        };

        debug!("{} has {} children", self.breadcrumbs(), children.len());
        children.sort_by(|a, b| a.text.cmp(&b.text));

        let mut items = Vec::with_capacity(children.len() + 1);
        if let Some(parent) = self.back() {
            items.push(Item::up(parent));
        }
        if children.is_empty() && !empty.is_empty() {
            items.push(Item::placeholder(empty));
        }
        items.extend(children);
        Ok(items)
    }
}
