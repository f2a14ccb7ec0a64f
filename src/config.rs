/// Default values for CLI
pub mod defaults {
    /// Name of the canonical kubeconfig context
    pub const CONTEXT: &str = "upbound";

    /// Suffix of the shadow entries holding the previous canonical target
    pub const PREVIOUS_SUFFIX: &str = "-previous";

    /// Path argument that swaps back to the previous context
    pub const SWAP_PREVIOUS: &str = "-";

    /// Default Upbound domain
    pub const DOMAIN: &str = "upbound.io";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Environment variable overriding the canonical context name
    pub const CONTEXT_ENV_VAR: &str = "UP_CONTEXT";

    /// Environment variable overriding the Upbound domain
    pub const DOMAIN_ENV_VAR: &str = "UP_DOMAIN";

    /// Environment variable holding the cloud API token
    pub const TOKEN_ENV_VAR: &str = "UP_TOKEN";
}

/// Kubeconfig location
pub mod kube {
    /// Environment variable listing kubeconfig files
    pub const ENV_VAR: &str = "KUBECONFIG";

    /// Kubeconfig directory name (relative to HOME)
    pub const DIR_NAME: &str = ".kube";

    /// Kubeconfig file name
    pub const FILE_NAME: &str = "config";

    /// Value of `--file` that prints the kubeconfig instead of writing it
    pub const STDOUT: &str = "-";

    /// apiVersion written into new kubeconfig files
    pub const API_VERSION: &str = "v1";

    /// kind written into new kubeconfig files
    pub const KIND: &str = "Config";

    /// apiVersion of exec credential plugins
    pub const EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1";
}

/// Previous-context pointer file
pub mod last_context {
    /// Directory name (relative to HOME)
    pub const DIR_NAME: &str = ".up";

    /// Pointer file name
    pub const FILE_NAME: &str = "last-context";
}

/// Upbound cloud API
pub mod api {
    /// Host prefix of the cloud API (prepended to the domain)
    pub const HOST_PREFIX: &str = "api.";

    /// Base path of the cloud API
    pub const BASE_PATH: &str = "/v1";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Spaces endpoint (below an organization)
    pub const SPACES: &str = "spaces";

    /// JWT claim holding the organization name
    pub const ORGANIZATION_CLAIM: &str = "organization";

    /// Exec plugin argument naming the organization
    pub const ORGANIZATION_ARG: &str = "--organization";
}

/// Spaces Kubernetes API
pub mod spaces {
    /// API group and version serving control planes
    pub const API_PREFIX: &str = "apis/spaces.upbound.io/v1beta1";

    /// Label marking a namespace as a group
    pub const GROUP_LABEL: &str = "spaces.upbound.io/group=true";

    /// Namespace holding the ingress config map
    pub const SYSTEM_NAMESPACE: &str = "upbound-system";

    /// Config map identifying a self-hosted space
    pub const INGRESS_CONFIG_MAP: &str = "ingress-public";

    /// Config map key holding the ingress host
    pub const INGRESS_HOST_KEY: &str = "ingress-host";

    /// Config map key holding the ingress CA bundle
    pub const INGRESS_CA_KEY: &str = "ingress-ca";

    /// Namespace set on control plane contexts
    pub const CONTROL_PLANE_NAMESPACE: &str = "default";

    /// Endpoint probed before committing a kubeconfig
    pub const PROBE_PATH: &str = "version";
}

/// HTTP client settings
pub mod http {
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Total request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_path_format() {
        assert!(api::BASE_PATH.starts_with('/'));
    }

    #[test]
    fn test_previous_suffix_is_dash_prefixed() {
        assert!(defaults::PREVIOUS_SUFFIX.starts_with('-'));
    }

    #[test]
    fn test_default_domain_is_valid() {
        assert!(defaults::DOMAIN.contains('.'));
        assert!(!defaults::DOMAIN.starts_with("https://"));
    }

    #[test]
    fn test_spaces_api_prefix_has_no_slashes_at_ends() {
        assert!(!spaces::API_PREFIX.starts_with('/'));
        assert!(!spaces::API_PREFIX.ends_with('/'));
    }
}
