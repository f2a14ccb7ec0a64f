//! Switching the current context, swapping the canonical and previous entries
//! when the target is the shadow `-previous` context.

use log::debug;

use crate::config::defaults;
use crate::error::{CtxError, Result};
use crate::kubeconfig::KubeConfig;

use super::names::{swap_entries, swap_references, Reference};

/// Name of the shadow entries holding the previous canonical target
pub fn previous_name(preferred: &str) -> String {
    format!("{}{}", preferred, defaults::PREVIOUS_SUFFIX)
}

/// Make `source` the current context.
///
/// Moving to any context other than `<preferred>-previous` only flips
/// `current-context`. Moving to `<preferred>-previous` exchanges it with
/// `<preferred>`, so the canonical name always carries the active target, and
/// exchanges the clusters and users named after them when the new canonical
/// context references the `-previous` ones.
///
/// Returns the updated config and the name to restore on the next toggle.
pub fn activate_context(
    mut conf: KubeConfig,
    source: &str,
    preferred: &str,
) -> Result<(KubeConfig, String)> {
    if !conf.contexts.contains_key(source) {
        return Err(CtxError::not_found("context", source));
    }
    let old_current = conf.current_context.clone();
    if !old_current.is_empty() && !conf.contexts.contains_key(&old_current) {
        return Err(CtxError::not_found("context", &old_current));
    }

    let previous = previous_name(preferred);

    if source != previous {
        debug!("Switching current context {:?} -> {:?}", old_current, source);
        conf.current_context = source.to_string();
        return Ok((conf, old_current));
    }

    if old_current == source {
        debug!("Context {:?} is already current", source);
        return Ok((conf, old_current));
    }

    let last = if old_current == preferred {
        previous.clone()
    } else {
        old_current
    };

    debug!("Swapping contexts {:?} <-> {:?}", preferred, previous);
    swap_entries(&mut conf.contexts, preferred, &previous);
    conf.current_context = preferred.to_string();

    let (swap_cluster, swap_user) = conf
        .contexts
        .get(preferred)
        .map(|c| (c.cluster == previous, c.user == previous))
        .ok_or_else(|| CtxError::not_found("context", preferred))?;

    if swap_cluster {
        if !swap_entries(&mut conf.clusters, preferred, &previous) {
            return Err(CtxError::not_found("cluster", &previous));
        }
        swap_references(&mut conf.contexts, Reference::Cluster, preferred, &previous);
    }

    if swap_user {
        if !swap_entries(&mut conf.auth_infos, preferred, &previous) {
            return Err(CtxError::not_found("user", &previous));
        }
        swap_references(&mut conf.contexts, Reference::User, preferred, &previous);
    }

    Ok((conf, last))
}
