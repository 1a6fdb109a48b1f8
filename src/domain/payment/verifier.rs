//! Payment webhook signature verification.
//!
//! The processor signs every notification with HMAC-SHA512 over the raw
//! request body, using a secret shared only between it and this service.
//! The hex-encoded digest arrives in a request header.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

type HmacSha512 = Hmac<Sha512>;

/// Verifier for payment notification signatures.
pub struct NotificationVerifier {
    /// Shared signing secret from the processor dashboard.
    secret: String,
}

impl NotificationVerifier {
    /// Creates a new verifier with the given shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the hex signature against the raw notification body.
    ///
    /// Any defect (undecodable hex, wrong length, digest mismatch)
    /// yields the same `InvalidSignature` error so a probing sender
    /// learns nothing about which check failed.
    pub fn verify(&self, payload: &[u8], signature_hex: &str) -> Result<(), WebhookError> {
        let provided =
            hex::decode(signature_hex.trim()).map_err(|_| WebhookError::InvalidSignature)?;

        let mut mac = HmacSha512::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        if !constant_time_compare(expected.as_slice(), &provided) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the hex HMAC-SHA512 signature for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
