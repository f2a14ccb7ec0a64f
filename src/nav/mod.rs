//! Navigation through the Upbound hierarchy
//!
//! Nodes are plain values: each carries copies of its ancestors, so moving
//! back never needs a network call.

mod derive;
mod node;
mod path;

#[cfg(test)]
pub(crate) mod testing;

pub use derive::{derive_state, ServerPath};
pub use node::{Accepting, Back, ControlPlane, Group, Item, NavigationNode, Organization, Space};
pub use path::walk_path;
