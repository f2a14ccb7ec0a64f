//! Response models of the cloud API and the space Kubernetes API

use serde::Deserialize;
use std::collections::BTreeMap;

/// Organization as returned by `GET /v1/organizations`
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    #[serde(default)]
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Space as returned by `GET /v1/organizations/<org>/spaces`
#[derive(Deserialize, Debug, Clone)]
pub struct SpaceResponse {
    pub name: String,
    pub ingress: String,
    /// Base64 PEM bundle, absent for publicly trusted ingresses
    #[serde(default)]
    pub ca: Option<String>,
}

/// Kubernetes list envelope
#[derive(Deserialize, Debug)]
pub struct ObjectList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
}

/// Any object where only the name matters (namespaces, control planes)
#[derive(Deserialize, Debug)]
pub struct NamedObject {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

#[derive(Deserialize, Debug, Default)]
pub struct ConfigMap {
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// `status` of an exec credential plugin's output
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExecCredentialStatus {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub client_certificate_data: Option<String>,
    #[serde(default)]
    pub client_key_data: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ExecCredential {
    pub status: Option<ExecCredentialStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_deserialize() {
        let json = r#"[{"id": 12, "name": "acme", "displayName": "Acme Inc"}]"#;
        let orgs: Vec<OrganizationResponse> = serde_json::from_str(json).unwrap();
        assert_eq!(orgs[0].name, "acme");
        assert_eq!(orgs[0].display_name.as_deref(), Some("Acme Inc"));
    }

    #[test]
    fn test_space_without_ca() {
        let json = r#"{"name": "eu-1", "ingress": "eu-1.example.com"}"#;
        let space: SpaceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(space.ingress, "eu-1.example.com");
        assert!(space.ca.is_none());
    }

    #[test]
    fn test_object_list_of_names() {
        let json = r#"{"kind": "NamespaceList", "items": [{"metadata": {"name": "default", "labels": {}}}]}"#;
        let list: ObjectList<NamedObject> = serde_json::from_str(json).unwrap();
        assert_eq!(list.items[0].metadata.name, "default");
    }

    #[test]
    fn test_null_items() {
        let json = r#"{"items": []}"#;
        let list: ObjectList<NamedObject> = serde_json::from_str(json).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_exec_credential() {
        let json = r#"{"apiVersion": "client.authentication.k8s.io/v1", "kind": "ExecCredential",
            "status": {"token": "abc", "expirationTimestamp": "2030-01-01T00:00:00Z"}}"#;
        let cred: ExecCredential = serde_json::from_str(json).unwrap();
        assert_eq!(cred.status.unwrap().token.as_deref(), Some("abc"));
    }
}
