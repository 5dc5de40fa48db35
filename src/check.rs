//! Input validation for public entry points.
//!
//! Small pure validators, called eagerly before any cryptographic
//! computation proceeds on malformed input. No validation state is retained.

use elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};

use crate::error::{MusigError, Result};
use crate::PublicKey;

/// Parse one compressed public key, checking format and curve membership.
pub(crate) fn parse_public_key(bytes: &PublicKey, idx: usize) -> Result<ProjectivePoint> {
    let encoded =
        EncodedPoint::from_bytes(bytes).map_err(|_| MusigError::InvalidPublicKey(idx))?;
    let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or(MusigError::InvalidPublicKey(idx))?;
    Ok(ProjectivePoint::from(affine))
}

/// Validate every key in the list (canonical compressed form, on-curve).
///
/// Returns the parsed curve points in input order, or `InvalidPublicKey`
/// naming the first offending index.
pub fn validate_public_keys(pubkeys: &[PublicKey]) -> Result<Vec<ProjectivePoint>> {
    pubkeys
        .iter()
        .enumerate()
        .map(|(idx, pubkey)| parse_public_key(pubkey, idx))
        .collect()
}

/// Reject key lists containing a repeated public key.
pub fn validate_unique_public_keys(pubkeys: &[PublicKey]) -> Result<()> {
    for (second, pubkey) in pubkeys.iter().enumerate() {
        for (first, earlier) in pubkeys[..second].iter().enumerate() {
            if pubkey == earlier {
                return Err(MusigError::DuplicatePublicKey { first, second });
            }
        }
    }
    Ok(())
}

/// Validate the dynamic session parameters.
///
/// Fixed-length fields (session id, ell) are enforced by their `[u8; 32]`
/// types; this checks what the type system cannot express.
pub fn validate_session_params(
    seckey: &Scalar,
    message: &[u8],
    pub_key_combined: &PublicKey,
) -> Result<()> {
    if bool::from(seckey.is_zero()) {
        return Err(MusigError::InvalidSessionParams(
            "private key must be a nonzero scalar",
        ));
    }
    if message.is_empty() {
        return Err(MusigError::InvalidSessionParams("message must not be empty"));
    }
    parse_public_key(pub_key_combined, 0).map_err(|_| {
        MusigError::InvalidSessionParams("combined public key is not a valid curve point")
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyagg::compress_pubkey;

    fn test_pubkey(seckey: u64) -> PublicKey {
        compress_pubkey(&(ProjectivePoint::GENERATOR * Scalar::from(seckey)))
    }

    #[test]
    fn accepts_valid_compressed_keys() {
        let keys = [test_pubkey(1), test_pubkey(2), test_pubkey(3)];
        let points = validate_public_keys(&keys).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], ProjectivePoint::GENERATOR);
    }

    #[test]
    fn rejects_bad_prefix_byte() {
        let mut bad = test_pubkey(1);
        bad[0] = 0x05;
        let err = validate_public_keys(&[test_pubkey(2), bad]).unwrap_err();
        assert_eq!(err, MusigError::InvalidPublicKey(1));
    }

    #[test]
    fn rejects_off_curve_x_coordinate() {
        // x-coordinate with no square root for x^3 + 7 (BIP-340 invalid-key vector).
        let mut bad = [0u8; 33];
        bad[0] = 0x02;
        bad[1..].copy_from_slice(
            &hex::decode("eefdea4cdb677750a420fee807eacf21eb9898ae79b9768766e4faa04a2d4a34")
                .unwrap(),
        );
        let err = validate_public_keys(&[bad]).unwrap_err();
        assert_eq!(err, MusigError::InvalidPublicKey(0));
    }

    #[test]
    fn detects_duplicate_keys() {
        let keys = [test_pubkey(1), test_pubkey(2), test_pubkey(1)];
        let err = validate_unique_public_keys(&keys).unwrap_err();
        assert_eq!(err, MusigError::DuplicatePublicKey { first: 0, second: 2 });
    }

    #[test]
    fn distinct_keys_pass_uniqueness() {
        let keys = [test_pubkey(1), test_pubkey(2), test_pubkey(3)];
        assert!(validate_unique_public_keys(&keys).is_ok());
    }

    #[test]
    fn session_params_reject_zero_key() {
        let err =
            validate_session_params(&Scalar::ZERO, b"msg", &test_pubkey(1)).unwrap_err();
        assert!(matches!(err, MusigError::InvalidSessionParams(_)));
    }

    #[test]
    fn session_params_reject_empty_message() {
        let err =
            validate_session_params(&Scalar::ONE, b"", &test_pubkey(1)).unwrap_err();
        assert!(matches!(err, MusigError::InvalidSessionParams(_)));
    }

    #[test]
    fn session_params_reject_malformed_combined_key() {
        let mut bad = test_pubkey(1);
        bad[0] = 0x04;
        let err = validate_session_params(&Scalar::ONE, b"msg", &bad).unwrap_err();
        assert!(matches!(err, MusigError::InvalidSessionParams(_)));
    }
}
