//! Metadata signing shared by the front service and the broker.
//!
//! Canonical string: `{filename}:{size}:{content_type}` with `size` in decimal.
//! Signature = hex(HMAC-SHA256(secret, canonical)).
//!
//! Both services hold the same secret, configured out of band. The broker only
//! issues upload credentials for metadata carrying a valid signature.

use crate::models::UploadMetadata;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 over canonical upload metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

/// Encode metadata in the fixed field order used for signing.
pub fn canonical_string(metadata: &UploadMetadata) -> String {
    format!(
        "{}:{}:{}",
        metadata.filename, metadata.size, metadata.content_type
    )
}

fn mac_for(metadata: &UploadMetadata, secret: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(canonical_string(metadata).as_bytes());
    mac
}

/// Sign metadata with the shared secret.
pub fn sign(metadata: &UploadMetadata, secret: &[u8]) -> Signature {
    let tag = mac_for(metadata, secret).finalize().into_bytes();
    Signature(hex::encode(tag))
}

/// Check a hex signature against metadata.
///
/// The tag comparison is constant time. Input that is not valid hex or has the
/// wrong length is rejected before any comparison.
pub fn verify(metadata: &UploadMetadata, signature: &str, secret: &[u8]) -> bool {
    let Ok(received) = hex::decode(signature) else {
        return false;
    };
    mac_for(metadata, secret).verify_slice(&received).is_ok()
}

/// Holds the process-wide signing secret.
#[derive(Clone)]
pub struct MetadataSigner {
    secret: Vec<u8>,
}

impl MetadataSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn sign(&self, metadata: &UploadMetadata) -> Signature {
        sign(metadata, &self.secret)
    }

    pub fn verify(&self, metadata: &UploadMetadata, signature: &str) -> bool {
        verify(metadata, signature, &self.secret)
    }
}

impl fmt::Debug for MetadataSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
