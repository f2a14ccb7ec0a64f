//! `upctx` command handler

use log::debug;

use crate::cli::Cli;
use crate::config::defaults;
use crate::context::{
    ContextWriter, FileContextWriter, FileLastContext, KubeconfigVerifier, LastContextStore,
    StdoutContextWriter,
};
use crate::error::{CtxError, Result};
use crate::kubeconfig::KubeconfigStore;
use crate::nav::{derive_state, walk_path, NavigationNode};
use crate::ui::{
    clear_spinner, create_spinner, run_interactive, set_spinner_message, Switched, TerminalPicker,
};
use crate::upbound::{CloudClient, ProbeVerifier, UpboundApi, UpboundClient};

/// Run the command described by `cli`
pub async fn run_ctx_command(cli: &Cli) -> Result<()> {
    let store = match &cli.file {
        Some(path) if !cli.to_stdout() => KubeconfigStore::with_path(path.clone()),
        _ => KubeconfigStore::new(),
    };
    debug!("Using kubeconfig {}", store.path().display());

    let api = UpboundClient::new(
        CloudClient::new(cli.token.clone(), cli.domain.clone()),
        cli.insecure_skip_tls_verify,
    );
    let file_writer = FileContextWriter::new(
        store.clone(),
        FileLastContext::new(),
        ProbeVerifier,
        &cli.context,
    );

    if cli.path.as_deref() == Some(defaults::SWAP_PREVIOUS) {
        if cli.to_stdout() {
            return Err(CtxError::Navigation(
                "cannot swap to the previous context when printing to stdout".to_string(),
            ));
        }
        return swap_to_previous(cli, &api, &file_writer).await;
    }

    let config = store.load()?;
    let spinner = create_spinner("Reading current context...", cli.short || cli.path.is_none());
    let start = derive_state(&api, &config).await;
    clear_spinner(spinner);
    let start = start?;
    debug!("Starting at {}", start.breadcrumbs());

    if cli.to_stdout() {
        let writer = StdoutContextWriter::new(&cli.context);
        let switched = navigate(cli, &api, &writer, start).await?;
        if let Some(yaml) = writer.take_rendered() {
            print!("{}", yaml);
        }
        if let Some(switched) = switched {
            eprintln!("{}", report(cli, &switched));
        }
    } else if let Some(switched) = navigate(cli, &api, &file_writer, start).await? {
        println!("{}", report(cli, &switched));
    }
    Ok(())
}

fn report(cli: &Cli, switched: &Switched) -> String {
    if cli.short {
        switched.node.breadcrumbs()
    } else {
        switched.message.clone()
    }
}

/// Interactive browsing without a path, otherwise walk the path and switch
async fn navigate<A: UpboundApi, W: ContextWriter>(
    cli: &Cli,
    api: &A,
    writer: &W,
    start: NavigationNode,
) -> Result<Option<Switched>> {
    let Some(path) = cli.path.as_deref() else {
        let mut picker = TerminalPicker::enter()?;
        return run_interactive(api, writer, &mut picker, start).await;
    };

    let spinner = create_spinner(&format!("Resolving {}...", path), cli.short);
    let result = async {
        let node = walk_path(api, start, path).await?;
        set_spinner_message(&spinner, &format!("Switching to {}...", node.breadcrumbs()));
        let message = node.accept(writer).await?;
        Ok::<_, CtxError>(Switched { node, message })
    }
    .await;
    clear_spinner(spinner);
    result.map(Some)
}

async fn swap_to_previous<A, V, L>(
    cli: &Cli,
    api: &A,
    writer: &FileContextWriter<V, L>,
) -> Result<()>
where
    A: UpboundApi,
    V: KubeconfigVerifier,
    L: LastContextStore,
{
    let config = writer.swap_to_previous()?;

    let spinner = create_spinner("Reading current context...", cli.short);
    let location = match derive_state(api, &config).await {
        Ok(node) => node.breadcrumbs(),
        Err(e) => {
            debug!("Could not derive location of {:?}: {}", config.current_context, e);
            config.current_context.clone()
        }
    };
    clear_spinner(spinner);

    if cli.short {
        println!("{}", location);
    } else {
        println!("Switched kubeconfig context to: {}", location);
    }
    Ok(())
}
