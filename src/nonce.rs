//! Deterministic nonce derivation and nonce-sign normalization.
//!
//! Nonces are derived as HMAC-SHA256 keyed by the private key over the
//! message, reduced modulo the curve order. A nonce is therefore unique per
//! (key, message) pair and unpredictable without the private key; reusing a
//! nonce across different messages would leak the private key, which is why
//! no random-nonce path exists here.

use hmac::{Hmac, Mac};
use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::{ProjectivePoint, Scalar};
use sha2::Sha256;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Derive the deterministic secret nonce for `(seckey, message)`.
///
/// Falls back to 1 in the negligible case where the reduced HMAC output is
/// zero, so the returned scalar is always usable as a nonce.
pub fn deterministic_nonce(seckey: &Scalar, message: &[u8]) -> Scalar {
    let mut key = [0u8; 32];
    key.copy_from_slice(&seckey.to_bytes());
    let mut mac = HmacSha256::new_from_slice(&key).expect("HMAC accepts any key length");
    key.zeroize();
    mac.update(message);
    let digest = mac.finalize().into_bytes();
    let nonce = <Scalar as Reduce<U256>>::reduce_bytes(&digest);
    if bool::from(nonce.is_zero()) {
        Scalar::ONE
    } else {
        nonce
    }
}

/// Flip a nonce scalar's sign when the aggregated nonce point has odd y.
///
/// Summing the normalized per-signer nonces then lands on the point with
/// even y and the x-coordinate committed to in the signature, which is what
/// the Schnorr equation is verified against.
pub fn normalize_nonce_parity(aggregated: &ProjectivePoint, nonce: Scalar) -> Scalar {
    if bool::from(aggregated.to_affine().y_is_odd()) {
        -nonce
    } else {
        nonce
    }
}

/// Big-endian x-coordinate of a curve point.
pub fn x_bytes(point: &ProjectivePoint) -> [u8; 32] {
    point.to_affine().x().into()
}
