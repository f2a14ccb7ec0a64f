//! Organization lookup from stored credentials

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::debug;

use crate::config::api;
use crate::error::{CtxError, Result};
use crate::kubeconfig::AuthInfo;

/// Claims of a JWT, without signature verification
pub fn decode_claims(token: &str) -> Result<serde_json::Value> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| CtxError::Token("token is not a JWT".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| CtxError::Token(format!("invalid JWT payload: {}", e)))?;

    Ok(serde_json::from_slice(&bytes)?)
}

/// Organization named by the token's claims or the exec plugin's arguments
pub fn organization_from_auth(auth_info: Option<&AuthInfo>) -> Option<String> {
    let auth_info = auth_info?;

    if let Some(token) = auth_info.token.as_deref() {
        match decode_claims(token) {
            Ok(claims) => {
                if let Some(org) = claims[api::ORGANIZATION_CLAIM].as_str() {
                    return Some(org.to_string());
                }
            }
            Err(e) => debug!("Ignoring unreadable token: {}", e),
        }
    }

    let args = &auth_info.exec.as_ref()?.args;
    let prefix = format!("{}=", api::ORGANIZATION_ARG);
    args.iter().enumerate().find_map(|(i, arg)| {
        if let Some(org) = arg.strip_prefix(&prefix) {
            Some(org.to_string())
        } else if arg == api::ORGANIZATION_ARG {
            args.get(i + 1).cloned()
        } else {
            None
        }
    })
}

#[cfg(test)]
pub(crate) fn fake_jwt(claims: serde_json::Value) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}
