// src/session/token.rs — Access token claim extraction
//
// The backend issues signed JWTs whose payload carries `sub`, `role`,
// and `exp`. The client reads those claims without verifying the
// signature: the decoded role gates UI navigation only, and every
// privileged endpoint re-checks authorization server-side. Never trust
// a decoded claim for anything beyond view visibility.

use anyhow::{bail, Result};
use serde::Deserialize;

/// Claims the client cares about. Anything else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// True when an `exp` claim is present and in the past.
    pub fn is_expired(&self, now_unix: i64) -> bool {
        matches!(self.exp, Some(exp) if exp <= now_unix)
    }
}

/// Extract the claims from a JWT's middle part without verifying the
/// signature. Fails on anything that is not a three-part token with a
/// base64url JSON payload.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        bail!("invalid token: expected 3 parts, got {}", parts.len());
    }
    let payload = base64url_decode(parts[1])?;
    Ok(serde_json::from_slice(&payload)?)
}

/// Decode a base64url-encoded string (padding tolerated) to bytes.
fn base64url_decode(input: &str) -> Result<Vec<u8>> {
    fn val(c: u8) -> Option<u8> {
        match c {
            b'A'..=b'Z' => Some(c - b'A'),
            b'a'..=b'z' => Some(c - b'a' + 26),
            b'0'..=b'9' => Some(c - b'0' + 52),
            b'-' => Some(62),
            b'_' => Some(63),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity((bytes.len() * 3) / 4);
    let mut buf: u32 = 0;
    let mut bits: u32 = 0;

    for &b in bytes {
        if b == b'=' {
            continue;
        }
        let v = val(b).ok_or_else(|| anyhow::anyhow!("invalid base64url character: {}", b as char))?;
        buf = (buf << 6) | v as u32;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((buf >> bits) as u8);
            buf &= (1 << bits) - 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Header {"alg":"HS256","typ":"JWT"} / payload {"sub":"42","role":"customer","exp":4102444800}
    const CUSTOMER_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI0MiIsInJvbGUiOiJjdXN0b21lciIsImV4cCI6NDEwMjQ0NDgwMH0.sig";

    #[test]
    fn decodes_role_and_subject() {
        let claims = decode_claims(CUSTOMER_TOKEN).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.role.as_deref(), Some("customer"));
        assert!(!claims.is_expired(1_700_000_000));
    }

    #[test]
    fn expired_token_is_flagged() {
        let claims = Claims {
            sub: Some("1".into()),
            role: Some("customer".into()),
            exp: Some(1_000),
        };
        assert!(claims.is_expired(2_000));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(decode_claims("garbage").is_err());
        assert!(decode_claims("a.b.c.d").is_err());
        assert!(decode_claims("x.!!!not-base64!!!.y").is_err());
    }

    #[test]
    fn rejects_non_json_payload() {
        // "hello" base64url-encoded is aGVsbG8
        assert!(decode_claims("h.aGVsbG8.s").is_err());
    }
}
