//! Kubeconfig data models
//!
//! The on-disk format stores clusters, users and contexts as lists of
//! `{name, <body>}` entries. In memory they are maps keyed by name, which is
//! what every merge operation works with. Keys this model does not know about
//! are carried in `extra` so that a load/save round trip never drops them.

use serde::{Deserialize, Serialize};
use serde_yml::Value;
use std::collections::BTreeMap;

use crate::config::kube;
use crate::error::{CtxError, Result};

/// Unknown keys preserved verbatim
pub type Extra = BTreeMap<String, Value>;

/// A Kubernetes API endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cluster {
    #[serde(default)]
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_tls_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_server_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Credentials used against a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key_data: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Exec credential plugin descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecConfig {
    #[serde(default)]
    pub api_version: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<ExecEnvVar>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Environment variable passed to an exec plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecEnvVar {
    pub name: String,
    pub value: String,
}

/// A (cluster, user, namespace) triple
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Context {
    /// Namespace, treating an empty string as unset
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}

/// A kubeconfig file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawKubeConfig", into = "RawKubeConfig")]
pub struct KubeConfig {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub preferences: Option<Value>,
    pub clusters: BTreeMap<String, Cluster>,
    pub auth_infos: BTreeMap<String, AuthInfo>,
    pub contexts: BTreeMap<String, Context>,
    /// Name of the current context; empty when unset
    pub current_context: String,
    pub extensions: Option<Value>,
    pub extra: Extra,
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            api_version: Some(kube::API_VERSION.to_string()),
            kind: Some(kube::KIND.to_string()),
            preferences: None,
            clusters: BTreeMap::new(),
            auth_infos: BTreeMap::new(),
            contexts: BTreeMap::new(),
            current_context: String::new(),
            extensions: None,
            extra: Extra::new(),
        }
    }
}

/// A context with its cluster and auth info looked up
#[derive(Debug, Clone, Copy)]
pub struct ResolvedContext<'a> {
    pub name: &'a str,
    pub context: &'a Context,
    pub cluster: &'a Cluster,
    pub auth_info: Option<&'a AuthInfo>,
}

impl KubeConfig {
    /// Build a kubeconfig holding a single context, cluster and auth info,
    /// all under `name`, with `name` as the current context.
    pub fn single(name: &str, cluster: Cluster, auth_info: AuthInfo, namespace: Option<String>) -> Self {
        let mut config = KubeConfig::default();
        config.clusters.insert(name.to_string(), cluster);
        config.auth_infos.insert(name.to_string(), auth_info);
        config.contexts.insert(
            name.to_string(),
            Context {
                cluster: name.to_string(),
                user: name.to_string(),
                namespace,
                ..Default::default()
            },
        );
        config.current_context = name.to_string();
        config
    }

    /// Look up a context and the entries it references
    pub fn resolve(&self, name: &str) -> Result<ResolvedContext<'_>> {
        let (name, context) = self
            .contexts
            .get_key_value(name)
            .ok_or_else(|| CtxError::not_found("context", name))?;
        let cluster = self
            .clusters
            .get(&context.cluster)
            .ok_or_else(|| CtxError::not_found("cluster", &context.cluster))?;
        let auth_info = if context.user.is_empty() {
            None
        } else {
            Some(
                self.auth_infos
                    .get(&context.user)
                    .ok_or_else(|| CtxError::not_found("user", &context.user))?,
            )
        };
        Ok(ResolvedContext {
            name,
            context,
            cluster,
            auth_info,
        })
    }

    /// Look up the current context
    pub fn resolve_current(&self) -> Result<ResolvedContext<'_>> {
        if self.current_context.is_empty() {
            return Err(CtxError::Config(
                "kubeconfig has no current context set".to_string(),
            ));
        }
        self.resolve(&self.current_context)
    }
}

#[derive(Serialize, Deserialize)]
struct NamedCluster {
    name: String,
    #[serde(default)]
    cluster: Cluster,
}

#[derive(Serialize, Deserialize)]
struct NamedAuthInfo {
    name: String,
    #[serde(default)]
    user: AuthInfo,
}

#[derive(Serialize, Deserialize)]
struct NamedContext {
    name: String,
    #[serde(default)]
    context: Context,
}

/// On-disk layout
#[derive(Serialize, Deserialize)]
struct RawKubeConfig {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preferences: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    clusters: Vec<NamedCluster>,
    #[serde(default, deserialize_with = "null_as_empty")]
    users: Vec<NamedAuthInfo>,
    #[serde(default, deserialize_with = "null_as_empty")]
    contexts: Vec<NamedContext>,
    #[serde(rename = "current-context", default)]
    current_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extensions: Option<Value>,
    #[serde(flatten)]
    extra: Extra,
}

/// kubectl writes `clusters: null` for empty lists
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<RawKubeConfig> for KubeConfig {
    fn from(raw: RawKubeConfig) -> Self {
        KubeConfig {
            api_version: raw.api_version,
            kind: raw.kind,
            preferences: raw.preferences,
            clusters: raw
                .clusters
                .into_iter()
                .map(|c| (c.name, c.cluster))
                .collect(),
            auth_infos: raw.users.into_iter().map(|u| (u.name, u.user)).collect(),
            contexts: raw
                .contexts
                .into_iter()
                .map(|c| (c.name, c.context))
                .collect(),
            current_context: raw.current_context,
            extensions: raw.extensions,
            extra: raw.extra,
        }
    }
}

impl From<KubeConfig> for RawKubeConfig {
    fn from(config: KubeConfig) -> Self {
        RawKubeConfig {
            api_version: config.api_version,
            kind: config.kind,
            preferences: config.preferences,
            clusters: config
                .clusters
                .into_iter()
                .map(|(name, cluster)| NamedCluster { name, cluster })
                .collect(),
            users: config
                .auth_infos
                .into_iter()
                .map(|(name, user)| NamedAuthInfo { name, user })
                .collect(),
            contexts: config
                .contexts
                .into_iter()
                .map(|(name, context)| NamedContext { name, context })
                .collect(),
            current_context: config.current_context,
            extensions: config.extensions,
            extra: config.extra,
        }
    }
}
