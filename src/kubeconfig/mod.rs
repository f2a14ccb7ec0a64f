//! Kubeconfig model and file store

mod models;
mod store;

pub use models::{
    AuthInfo, Cluster, Context, ExecConfig, ExecEnvVar, Extra, KubeConfig, ResolvedContext,
};
pub use store::KubeconfigStore;
