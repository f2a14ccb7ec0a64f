//! upctx - Navigate Upbound and switch kubeconfig context
//!
//! Walks the Upbound hierarchy (organization, space, group, control plane)
//! and keeps one kubeconfig context pointed at the chosen target.
//!
//! # Features
//!
//! - Works out the current target from the kubeconfig's current context
//! - Interactive browsing or direct paths (`/org/space/group/ctp`, `..`, `.`)
//! - Instant toggle back to the previous context with `-`
//! - Preserves the data of unrelated contexts, clusters and users
//!
//! # Example
//!
//! ```bash
//! # Browse interactively
//! upctx
//!
//! # Switch to a control plane
//! upctx /acme/eu-1/default/ctp1
//!
//! # Go back to whatever was active before
//! upctx -
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod kubeconfig;
pub mod nav;
pub mod ui;
pub mod upbound;

pub use cli::Cli;
pub use commands::run_ctx_command;
pub use error::{CtxError, Result};
pub use kubeconfig::{KubeConfig, KubeconfigStore};
pub use nav::{derive_state, walk_path, NavigationNode};
pub use upbound::{CloudClient, UpboundApi, UpboundClient};
