//! Local decoding of a JWT's payload.
//!
//! No signature check happens here; the result only drives rendering
//! decisions such as whether to show the user-management menu. The server
//! remains authoritative.

use models::UserIdentity;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

/// Outcome of decoding a token's claims. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClaims {
    Decoded {
        id: Option<String>,
        name: Option<String>,
        email: Option<String>,
        role: Option<String>,
        /// `exp` as seconds since the epoch. Informational only.
        expires_at: Option<i64>,
    },
    Malformed {
        reason: String,
    },
}

impl TokenClaims {
    pub fn role(&self) -> Option<&str> {
        match self {
            TokenClaims::Decoded { role, .. } => role.as_deref(),
            TokenClaims::Malformed { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, TokenClaims::Malformed { .. })
    }

    /// Identity projected from the claims, when they carry a user id.
    ///
    /// The display name falls back to the email, then to the id.
    pub fn identity(&self) -> Option<UserIdentity> {
        let TokenClaims::Decoded {
            id,
            name,
            email,
            role,
            ..
        } = self
        else {
            return None;
        };

        let id = id.clone()?;
        let name = name
            .clone()
            .or_else(|| email.clone())
            .unwrap_or_else(|| id.clone());

        Some(UserIdentity {
            id,
            name,
            email: email.clone(),
            role: role.clone(),
        })
    }
}

/// Decode the payload segment of `token`.
pub fn decode_claims(token: &str) -> TokenClaims {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => {
            return malformed("missing payload segment");
        }
    };

    // Accept both alphabets and optional padding.
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = match URL_SAFE_NO_PAD.decode(normalized.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => return malformed(format!("base64 decode failed: {e}")),
    };

    let claims: Map<String, Value> = match serde_json::from_slice(&bytes) {
        Ok(Value::Object(claims)) => claims,
        Ok(_) => return malformed("payload is not a JSON object"),
        Err(e) => return malformed(format!("JSON parse failed: {e}")),
    };

    TokenClaims::Decoded {
        id: string_claim(&claims, "id").or_else(|| string_claim(&claims, "sub")),
        name: string_claim(&claims, "name"),
        email: string_claim(&claims, "email"),
        role: claims
            .get("role")
            .and_then(Value::as_str)
            .filter(|role| !role.is_empty())
            .map(str::to_string),
        expires_at: claims.get("exp").and_then(Value::as_i64),
    }
}

fn malformed(reason: impl Into<String>) -> TokenClaims {
    TokenClaims::Malformed {
        reason: reason.into(),
    }
}

/// String claims; numeric ids are accepted and rendered as strings.
fn string_claim(claims: &Map<String, Value>, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
