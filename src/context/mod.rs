//! Kubeconfig context merge engine
//!
//! Keeps one canonical context (default `upbound`) pointed at the operator's
//! current target. Switching targets moves the prior canonical entries to
//! `<name>-previous`, so `upctx -` can toggle between the last two targets
//! without network access. The data of unrelated contexts, clusters and users is
//! preserved; an unrelated context that references the canonical or shadow
//! cluster or user is repointed to keep following the same entry data.
//!
//! The kubeconfig and the pointer file are updated with read-then-write and no
//! locking; concurrent invocations can lose updates.

mod last;
mod merge;
mod names;
mod swap;
mod writer;

pub use last::{FileLastContext, LastContextStore};
pub use merge::{contexts_equal, merge_upbound_context};
pub use names::{allocate_free_name, NameSet};
pub use swap::{activate_context, previous_name};
pub use writer::{ContextWriter, FileContextWriter, KubeconfigVerifier, StdoutContextWriter};
