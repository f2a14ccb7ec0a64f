//! Merging a freshly built context into a kubeconfig under the canonical name

use log::debug;

use crate::error::Result;
use crate::kubeconfig::{Context, KubeConfig};

use super::names::{allocate_free_name, repoint, Reference};
use super::swap::{activate_context, previous_name};

/// Insert `src`'s context `src_context` into `dest` as `<preferred>-previous`,
/// then swap it into `<preferred>`. Entries already occupying
/// `<preferred>-previous` move to the lowest free numbered suffix first.
///
/// Returns the merged config and the name to restore on the next toggle.
pub fn merge_upbound_context(
    mut dest: KubeConfig,
    src: &KubeConfig,
    src_context: &str,
    preferred: &str,
) -> Result<(KubeConfig, String)> {
    let resolved = src.resolve(src_context)?;
    let previous = previous_name(preferred);

    if let Some(cluster) = dest.clusters.remove(&previous) {
        let free = allocate_free_name(&previous, &dest.clusters);
        debug!("Moving cluster {:?} to {:?}", previous, free);
        dest.clusters.insert(free.clone(), cluster);
        repoint(&mut dest.contexts, Reference::Cluster, &previous, &free);
    }

    if let Some(auth_info) = dest.auth_infos.remove(&previous) {
        let free = allocate_free_name(&previous, &dest.auth_infos);
        debug!("Moving user {:?} to {:?}", previous, free);
        dest.auth_infos.insert(free.clone(), auth_info);
        repoint(&mut dest.contexts, Reference::User, &previous, &free);
    }

    if let Some(context) = dest.contexts.remove(&previous) {
        let free = allocate_free_name(&previous, &dest.contexts);
        debug!("Moving context {:?} to {:?}", previous, free);
        dest.contexts.insert(free.clone(), context);
        if dest.current_context == previous {
            dest.current_context = free;
        }
    }

    let mut context = resolved.context.clone();
    dest.clusters.insert(previous.clone(), resolved.cluster.clone());
    context.cluster = previous.clone();
    match resolved.auth_info {
        Some(auth_info) => {
            dest.auth_infos.insert(previous.clone(), auth_info.clone());
            context.user = previous.clone();
        }
        None => context.user = String::new(),
    }
    dest.contexts.insert(previous.clone(), context);

    activate_context(dest, &previous, preferred)
}

/// True when both contexts exist and have equal bodies, clusters and users.
/// The names of the referenced cluster and user are not compared.
pub fn contexts_equal(a: &KubeConfig, a_context: &str, b: &KubeConfig, b_context: &str) -> bool {
    let (Ok(x), Ok(y)) = (a.resolve(a_context), b.resolve(b_context)) else {
        return false;
    };

    let body = |c: &Context| Context {
        cluster: String::new(),
        user: String::new(),
        ..c.clone()
    };

    body(x.context) == body(y.context) && x.cluster == y.cluster && x.auth_info == y.auth_info
}
