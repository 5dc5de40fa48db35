//! Non-interactive signing with all private keys in one place.
//!
//! This is the self-contained path: keys in, one aggregate signature out.
//! It runs key aggregation internally, derives one deterministic nonce per
//! key, and sums the per-key Schnorr contributions into a single scalar.

use k256::elliptic_curve::PrimeField;
use k256::{ProjectivePoint, Scalar};
use tracing::debug;

use crate::challenge::compute_challenge;
use crate::check;
use crate::error::{MusigError, Result};
use crate::keyagg::{compress_pubkey, compute_coefficient, compute_ell};
use crate::nonce::{deterministic_nonce, normalize_nonce_parity, x_bytes};
use crate::PublicKey;

/// An aggregate Schnorr signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Big-endian x-coordinate of the aggregated nonce point.
    pub r: [u8; 32],
    /// Aggregate signature scalar.
    pub s: Scalar,
}

impl Signature {
    /// 64-byte wire encoding `r || s`.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Parse a signature from its 64-byte wire encoding.
    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Self> {
        let mut r = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        let mut s_repr = [0u8; 32];
        s_repr.copy_from_slice(&bytes[32..]);
        let s = Option::<Scalar>::from(Scalar::from_repr(s_repr.into()))
            .ok_or(MusigError::InvalidArgument("signature scalar out of range"))?;
        Ok(Signature { r, s })
    }
}

/// Produce one aggregate signature over `message` from all private keys.
///
/// Algorithm:
/// 1. Reject an empty key list or a zero key (`InvalidArgument`).
/// 2. Per key, in input order: derive the deterministic nonce `r_i`,
///    accumulate `R = sum(G * r_i)`, and derive the public key `X_i`.
/// 3. Require the derived public keys to be pairwise distinct
///    (`DuplicatePublicKey`); a repeated key would permit key-cancellation
///    forgery.
/// 4. Aggregate `X = sum(a_i * X_i)` with coefficients from `ell`.
/// 5. Challenge `e` over `(Rx, X, message)`.
/// 6. Sum `s = sum(k_i + e * a_i * x_i) mod n`, where `k_i` is `r_i`
///    sign-normalized against `R`'s parity.
///
/// Pure function: no scalar is persisted. Callers should drop or zero
/// private keys after use.
pub fn sign_non_interactive(seckeys: &[Scalar], message: &[u8]) -> Result<Signature> {
    if seckeys.is_empty() {
        return Err(MusigError::InvalidArgument("private key list is empty"));
    }
    if seckeys.iter().any(|seckey| bool::from(seckey.is_zero())) {
        return Err(MusigError::InvalidArgument("private key is the zero scalar"));
    }
    debug!(signers = seckeys.len(), "producing non-interactive multi-signature");

    let mut nonces = Vec::with_capacity(seckeys.len());
    let mut points = Vec::with_capacity(seckeys.len());
    let mut pubkeys: Vec<PublicKey> = Vec::with_capacity(seckeys.len());
    let mut nonce_agg = ProjectivePoint::IDENTITY;
    for seckey in seckeys {
        let nonce = deterministic_nonce(seckey, message);
        nonce_agg += ProjectivePoint::GENERATOR * nonce;
        let point = ProjectivePoint::GENERATOR * seckey;
        pubkeys.push(compress_pubkey(&point));
        points.push(point);
        nonces.push(nonce);
    }
    check::validate_unique_public_keys(&pubkeys)?;

    let ell = compute_ell(&pubkeys)?;
    let mut coefficients = Vec::with_capacity(seckeys.len());
    let mut key_agg = ProjectivePoint::IDENTITY;
    for (idx, point) in points.iter().enumerate() {
        let coefficient = compute_coefficient(&ell, idx as u32);
        key_agg += *point * coefficient;
        coefficients.push(coefficient);
    }

    let r = x_bytes(&nonce_agg);
    let e = compute_challenge(&r, &key_agg, message);

    let mut s = Scalar::ZERO;
    for ((seckey, nonce), coefficient) in seckeys.iter().zip(nonces).zip(coefficients) {
        let k = normalize_nonce_parity(&nonce_agg, nonce);
        s += k + e * coefficient * seckey;
    }
    Ok(Signature { r, s })
}
