//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

use crate::config::{defaults, kube};

/// Select an Upbound kubeconfig context
#[derive(Parser, Debug)]
#[command(name = "upctx")]
#[command(version)]
#[command(
    about = "Navigate Upbound organizations, spaces, groups and control planes and switch kubeconfig context",
    long_about = None
)]
#[command(after_help = "EXAMPLES:\n  \
        upctx                              # browse interactively\n  \
        upctx /acme/eu-1/default/ctp1      # switch to a control plane\n  \
        upctx ..                           # switch to the parent of the current target\n  \
        upctx -                            # swap back to the previous context\n  \
        upctx -f - /acme/eu-1/default      # print the kubeconfig instead of writing it")]
pub struct Cli {
    /// Path to navigate to: `-` swaps to the previous context, `.` and `..`
    /// are relative to the current target, a leading `/` starts at the top
    pub path: Option<String>,

    /// Name of the kubeconfig context to manage
    #[arg(long, env = defaults::CONTEXT_ENV_VAR, default_value = defaults::CONTEXT)]
    pub context: String,

    /// Print only the path of the new target
    #[arg(short, long, default_value_t = false)]
    pub short: bool,

    /// Kubeconfig file to modify (`-` prints the new context to stdout)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Upbound API token used to list organizations and spaces
    #[arg(long, env = defaults::TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Upbound domain
    #[arg(long, env = defaults::DOMAIN_ENV_VAR, default_value = defaults::DOMAIN)]
    pub domain: String,

    /// Skip TLS verification when talking to spaces and control planes
    #[arg(long, default_value_t = false)]
    pub insecure_skip_tls_verify: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// True when the kubeconfig goes to stdout instead of a file
    pub fn to_stdout(&self) -> bool {
        self.file
            .as_deref()
            .is_some_and(|f| f.as_os_str() == kube::STDOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["upctx"]);
        assert!(cli.path.is_none());
        assert_eq!(cli.context, defaults::CONTEXT);
        assert_eq!(cli.domain, defaults::DOMAIN);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert!(!cli.short);
        assert!(!cli.insecure_skip_tls_verify);
        assert!(cli.file.is_none());
        assert!(!cli.to_stdout());
    }

    #[test]
    fn test_cli_swap_argument() {
        let cli = Cli::parse_from(["upctx", "-"]);
        assert_eq!(cli.path.as_deref(), Some("-"));
    }

    #[test]
    fn test_cli_relative_path() {
        let cli = Cli::parse_from(["upctx", "../team-a"]);
        assert_eq!(cli.path.as_deref(), Some("../team-a"));
    }

    #[test]
    fn test_cli_stdout_file() {
        let cli = Cli::parse_from(["upctx", "-f", "-", "/acme/eu-1"]);
        assert!(cli.to_stdout());
        assert_eq!(cli.path.as_deref(), Some("/acme/eu-1"));
    }

    #[test]
    fn test_cli_file_path() {
        let cli = Cli::parse_from(["upctx", "--file", "/tmp/kubeconfig", "."]);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/kubeconfig")));
        assert!(!cli.to_stdout());
    }

    #[test]
    fn test_cli_all_options() {
        let cli = Cli::parse_from([
            "upctx",
            "--context",
            "mine",
            "-s",
            "--token",
            "secret",
            "--domain",
            "upbound.example.com",
            "--insecure-skip-tls-verify",
            "-l",
            "debug",
            "/acme",
        ]);

        assert_eq!(cli.context, "mine");
        assert!(cli.short);
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.domain, "upbound.example.com");
        assert!(cli.insecure_skip_tls_verify);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.path.as_deref(), Some("/acme"));
    }
}
