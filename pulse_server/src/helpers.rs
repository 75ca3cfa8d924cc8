//! HMAC helpers for webhook signature checks.
//!
//! Shopify signs each webhook delivery with HMAC-SHA256 over the raw request body, keyed with the
//! app's shared secret, and sends the result base64-encoded in the `X-Shopify-Hmac-Sha256` header.
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The base64-encoded HMAC-SHA256 signature of `data` under `secret`. This is the exact value
/// Shopify places in the signature header, so it is also what the tests use to sign payloads.
pub fn calculate_hmac(secret: &str, data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(data);
    base64::encode(mac.finalize().into_bytes())
}

/// Checks the signature a caller claimed against the raw body. The comparison runs in constant
/// time via `Mac::verify_slice`. An empty secret or a signature that is not valid base64 always
/// fails.
pub fn verify_hmac(secret: &str, data: &[u8], claimed_signature: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(claimed) = base64::decode(claimed_signature) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(data);
    mac.verify_slice(&claimed).is_ok()
}
