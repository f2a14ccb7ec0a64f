//! upctx - Main entry point

use clap::Parser;
use log::{debug, info};

use upctx::{run_ctx_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting upctx v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: path={:?}, context={}, file={:?}, domain={}, short={}, insecure={}",
        cli.path,
        cli.context,
        cli.file,
        cli.domain,
        cli.short,
        cli.insecure_skip_tls_verify
    );

    if let Err(e) = run_ctx_command(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
