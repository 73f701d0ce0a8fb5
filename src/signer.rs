//! Request signing.
//!
//! The remote verifier rebuilds the canonical string from the transmitted
//! fields in the same fixed order, appends the account secret and compares
//! SHA-1 digests. Field order is per operation and is never alphabetized.

use sha1::{Digest, Sha1};

/// Operation being signed, with the identifiers it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// `None` lets the remote service assign a random identifier.
    Upload { public_id: Option<&'a str> },
    Destroy { public_id: &'a str },
    Rename { from: &'a str, to: &'a str },
}

/// Canonical string for `op`, secret appended.
pub fn canonical_string(op: &Operation<'_>, timestamp: &str, secret: &str) -> String {
    match op {
        Operation::Upload { public_id: Some(id) } | Operation::Destroy { public_id: id } => {
            format!("public_id={id}&timestamp={timestamp}{secret}")
        }
        Operation::Upload { public_id: None } => format!("timestamp={timestamp}{secret}"),
        Operation::Rename { from, to } => {
            format!("from_public_id={from}&timestamp={timestamp}&to_public_id={to}{secret}")
        }
    }
}

/// Lowercase hex SHA-1 of the canonical string.
pub fn sign(op: &Operation<'_>, timestamp: &str, secret: &str) -> String {
    sha1_hex(canonical_string(op, timestamp, secret).as_bytes())
}

pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Current Unix time in seconds, as sent in the `timestamp` field.
pub fn unix_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Form fields of one signed call, in transmission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    fields: Vec<(String, String)>,
}

impl SignedRequest {
    /// Build the signed field set for `op`. The same `timestamp` goes into
    /// the signature and the transmitted `timestamp` field.
    pub fn new(op: &Operation<'_>, api_key: &str, timestamp: &str, secret: &str) -> Self {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(5);
        let mut push = |k: &str, v: &str| fields.push((k.to_string(), v.to_string()));

        match *op {
            Operation::Upload { public_id } => {
                if let Some(id) = public_id {
                    push("public_id", id);
                }
                push("api_key", api_key);
                push("timestamp", timestamp);
            }
            Operation::Destroy { public_id } => {
                push("api_key", api_key);
                push("public_id", public_id);
                push("timestamp", timestamp);
            }
            Operation::Rename { from, to } => {
                push("api_key", api_key);
                push("from_public_id", from);
                push("timestamp", timestamp);
                push("to_public_id", to);
            }
        }
        push("signature", &sign(op, timestamp, secret));

        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn signature(&self) -> &str {
        self.get("signature").unwrap_or_default()
    }
}
