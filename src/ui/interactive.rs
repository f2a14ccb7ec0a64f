//! Interactive navigation loop

use log::debug;

use crate::context::ContextWriter;
use crate::error::Result;
use crate::nav::NavigationNode;
use crate::upbound::UpboundApi;

use super::picker::{ListView, Picker, Selection};

/// Outcome of a successful switch
#[derive(Debug, Clone, PartialEq)]
pub struct Switched {
    pub node: NavigationNode,
    pub message: String,
}

/// Let the operator browse from `start` until they switch context or quit.
///
/// Returns the accepted node, or `None` when the operator quit. Failing to
/// list the starting node is an error; later listing or switching failures
/// keep the operator where they were and are shown as a status line.
pub async fn run_interactive<A, W, P>(
    api: &A,
    writer: &W,
    picker: &mut P,
    start: NavigationNode,
) -> Result<Option<Switched>>
where
    A: UpboundApi,
    W: ContextWriter,
    P: Picker,
{
    let mut node = start;
    picker.busy(&node.breadcrumbs())?;
    let mut items = node.items(api).await?;
    let mut status: Option<String> = None;

    loop {
        let title = node.breadcrumbs();
        let selection = picker.pick(&ListView {
            title: &title,
            items: &items,
            can_accept: node.can_accept(),
            status: status.as_deref(),
        })?;
        status = None;

        let target = match selection {
            Selection::Quit => return Ok(None),
            Selection::Accept => {
                picker.busy(&title)?;
                match node.accept(writer).await {
                    Ok(message) => return Ok(Some(Switched { node, message })),
                    Err(e) => {
                        status = Some(e.to_string());
                        continue;
                    }
                }
            }
            Selection::Enter(i) => items.get(i).and_then(|item| item.on_enter.clone()),
            Selection::Back => node.back(),
        };

        let Some(target) = target else {
            continue;
        };

        let target_title = target.breadcrumbs();
        debug!("Navigating from {} to {}", title, target_title);
        picker.busy(&target_title)?;
        match target.items(api).await {
            Ok(children) => {
                node = target;
                items = children;
            }
            Err(e) => status = Some(format!("{}: {}", target_title, e)),
        }
    }
}
