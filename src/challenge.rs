//! Fiat–Shamir challenge computation.
//!
//! The challenge scalar binds the aggregated nonce, the aggregated public
//! key, and the message into the final signature:
//!
//! ```text
//! e = SHA256(Rx || compressed(X) || m) mod n
//! ```
//!
//! `X` enters the hash in full compressed form (parity byte included), so
//! the challenge commits to the exact aggregate produced by key
//! aggregation.

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::{ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};

use crate::keyagg::compress_pubkey;

/// Compute the challenge scalar `e = SHA256(Rx || X || m) mod n`.
pub fn compute_challenge(
    nonce_x: &[u8; 32],
    combined: &ProjectivePoint,
    message: &[u8],
) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update(nonce_x);
    hasher.update(compress_pubkey(combined));
    hasher.update(message);
    let digest = hasher.finalize();
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}
