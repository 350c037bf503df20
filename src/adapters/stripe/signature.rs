//! Stripe-Signature header parsing and HMAC computation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    #[error("Empty Stripe-Signature header")]
    Empty,

    #[error("Missing timestamp (t=) in signature")]
    MissingTimestamp,

    #[error("Missing v1 signature in header")]
    MissingV1Signature,

    #[error("Invalid timestamp format")]
    InvalidTimestamp,

    #[error("Invalid signature format (not valid hex)")]
    InvalidSignatureFormat,
}

/// Parsed Stripe-Signature header.
///
/// Format: `t=<unix seconds>,v1=<hex>[,v1=<hex>...][,v0=<hex>]`. Stripe sends
/// more than one `v1` entry while a signing secret is being rolled, so every
/// entry is kept. `v0` and unknown keys are ignored.
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(SignatureParseError::Empty);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    let bytes = hex_decode(value.trim())
                        .ok_or(SignatureParseError::InvalidSignatureFormat)?;
                    v1_signatures.push(bytes);
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        if v1_signatures.is_empty() {
            return Err(SignatureParseError::MissingV1Signature);
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }

    /// True if any `v1` entry equals `expected`. Each comparison is constant-time.
    pub fn matches(&self, expected: &[u8]) -> bool {
        self.v1_signatures
            .iter()
            .fold(false, |found, candidate| {
                found | bool::from(candidate.as_slice().ct_eq(expected))
            })
    }
}

/// HMAC-SHA256 over `"{timestamp}.{payload}"`, using the raw payload bytes.
pub fn compute_signature(secret: &[u8], timestamp: i64, payload: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so `new_from_slice` cannot fail here.
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Builds a header value the way Stripe does, for local tooling and tests.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let signature = compute_signature(secret.as_bytes(), timestamp, payload);
    format!("t={},v1={}", timestamp, hex_encode(&signature))
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || !hex.is_ascii() || hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        bytes.push(u8::from_str_radix(&hex[i..i + 2], 16).ok()?);
    }
    Some(bytes)
}

/// Encode bytes to hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
