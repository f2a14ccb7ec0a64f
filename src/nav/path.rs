//! Non-interactive navigation along a slash-separated path

use log::debug;

use crate::error::{CtxError, Result};
use crate::upbound::UpboundApi;

use super::node::NavigationNode;

/// Walk `path` from `start`. A leading `/` starts at the top of `start`'s
/// hierarchy (the root, or a disconnected space whose name is then the first
/// segment); `.` and empty segments stay put; `..` moves to the parent;
/// anything else enters the child of that name.
pub async fn walk_path<A: UpboundApi>(
    api: &A,
    start: NavigationNode,
    path: &str,
) -> Result<NavigationNode> {
    let mut segments = path.split('/').filter(|seg| !matches!(*seg, "" | "."));
    let mut node = if path.starts_with('/') {
        absolute_start(start, &mut segments, path)?
    } else {
        start
    };

    for segment in segments {
        if segment == ".." {
            node = node.back().ok_or_else(|| {
                CtxError::Navigation(format!(
                    "cannot move up from {} (path {:?})",
                    node.breadcrumbs(),
                    path
                ))
            })?;
            continue;
        }

        debug!("Entering {:?} from {}", segment, node.breadcrumbs());
        let child = node
            .items(api)
            .await?
            .into_iter()
            .filter(|item| !item.back && !item.not_selectable)
            .find(|item| item.text == segment)
            .and_then(|item| item.on_enter);

        node = child.ok_or_else(|| {
            CtxError::Navigation(format!(
                "{:?} not found in {} (path {:?})",
                segment,
                node.breadcrumbs(),
                path
            ))
        })?;
    }

    Ok(node)
}

/// Node an absolute path starts from. Breadcrumbs of a disconnected space
/// begin with its name, so that name is consumed here.
fn absolute_start<'a>(
    start: NavigationNode,
    segments: &mut impl Iterator<Item = &'a str>,
    path: &str,
) -> Result<NavigationNode> {
    let mut top = start;
    while let Some(parent) = top.back() {
        top = parent;
    }

    let space = match top {
        NavigationNode::Space(space) if !space.is_cloud() => space,
        _ => return Ok(NavigationNode::Root),
    };

    match segments.next() {
        None => Ok(NavigationNode::Space(space)),
        Some(name) if name == space.name => Ok(NavigationNode::Space(space)),
        Some("..") => Err(CtxError::Navigation(format!(
            "cannot move up from / (path {:?})",
            path
        ))),
        Some(name) => Err(CtxError::Navigation(format!(
            "{:?} not found in / (path {:?})",
            name, path
        ))),
    }
}
