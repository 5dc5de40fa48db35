//! MuSig public key aggregation.
//!
//! Aggregation binds every participant key to the full key list through a
//! per-index coefficient, which is what defeats rogue-key attacks:
//!
//! 1. Compute the list hash `ell = SHA256(P_0 || .. || P_last)` over the
//!    compressed keys in caller-supplied order. The order is
//!    security-relevant and is never normalized or sorted, since
//!    coefficients index into this exact order.
//! 2. Derive `a_i = SHA256(Tag || Tag || ell || LE32(i)) mod n`, where
//!    `Tag = SHA256("MuSig coefficient")`. The doubled tag is domain
//!    separation against single-tag hash uses elsewhere.
//! 3. Aggregate `X = sum(a_i * P_i)`.
//!
//! No even-Y normalization is applied to the aggregate: the challenge later
//! commits to the full compressed encoding of `X`, parity byte included.

use std::sync::LazyLock;

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};

use crate::check;
use crate::error::{MusigError, Result};
use crate::{Ell, PublicKey};

/// Domain-separation tag for coefficient derivation, hashed once per process.
static COEFFICIENT_TAG: LazyLock<[u8; 32]> =
    LazyLock::new(|| Sha256::digest(b"MuSig coefficient").into());

/// Compute the binding hash `ell` over the full ordered participant key list.
///
/// Every key is validated (canonical compressed form, on-curve) before
/// hashing; fails with [`MusigError::InvalidPublicKey`] naming the first
/// offending index, or [`MusigError::InvalidArgument`] on an empty list.
pub fn compute_ell(pubkeys: &[PublicKey]) -> Result<Ell> {
    if pubkeys.is_empty() {
        return Err(MusigError::InvalidArgument("public key list is empty"));
    }
    check::validate_public_keys(pubkeys)?;
    Ok(hash_key_list(pubkeys))
}

fn hash_key_list(pubkeys: &[PublicKey]) -> Ell {
    let mut hasher = Sha256::new();
    for pubkey in pubkeys {
        hasher.update(pubkey);
    }
    hasher.finalize().into()
}

/// Derive the aggregation coefficient for the signer at `idx`.
///
/// Deterministic function of `(ell, idx)` only; recomputed per use and never
/// cached across calls.
pub fn compute_coefficient(ell: &Ell, idx: u32) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update(*COEFFICIENT_TAG);
    hasher.update(*COEFFICIENT_TAG);
    hasher.update(ell);
    hasher.update(idx.to_le_bytes());
    let digest = hasher.finalize();
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

/// Combine participant public keys into the aggregated key `X = sum(a_i * P_i)`.
///
/// Returns the aggregate point together with the `ell` it was derived from,
/// so callers can feed the same binding hash into session setup. Fails with
/// whatever [`compute_ell`] fails with. Uniqueness of the keys is *not*
/// enforced here; callers requiring rogue-key resistance must additionally
/// call [`crate::check::validate_unique_public_keys`], as the
/// non-interactive signer does.
pub fn combine_pubkeys(pubkeys: &[PublicKey]) -> Result<(ProjectivePoint, Ell)> {
    if pubkeys.is_empty() {
        return Err(MusigError::InvalidArgument("public key list is empty"));
    }
    let points = check::validate_public_keys(pubkeys)?;
    let ell = hash_key_list(pubkeys);

    let mut combined = ProjectivePoint::IDENTITY;
    for (idx, point) in points.iter().enumerate() {
        combined += *point * compute_coefficient(&ell, idx as u32);
    }
    Ok((combined, ell))
}

/// Serialize a point to canonical SEC1 compressed form.
pub fn compress_pubkey(point: &ProjectivePoint) -> PublicKey {
    let encoded = point.to_affine().to_encoded_point(true);
    debug_assert_eq!(encoded.len(), 33, "cannot compress the identity point");
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(encoded.as_bytes());
    bytes
}
