//! Short random hex identifiers.

use rand::RngCore;

/// Generate `n_bytes` of randomness as a lowercase hex string.
///
/// Session ids use 4 bytes (8 chars — short enough to read out loud),
/// participant ids 8 bytes. Uniqueness is checked by the caller where it
/// matters.
pub(crate) fn random_id(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
