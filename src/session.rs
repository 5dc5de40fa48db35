//! Round 1 (commit) of the interactive signing protocol.
//!
//! Each signer holds only their own private key and derives a session-bound
//! secret nonce plus a commitment to its curve point. The commitment is
//! published before the nonce point itself, which is what blocks adaptive
//! nonce-grinding across cooperating signers; only the commitment ever
//! leaves this module's output by default.
//!
//! Later rounds (commitment verification, nonce reveal and aggregation,
//! partial signatures) are coordinated externally; [`Session`] is the
//! immutable handoff artifact they consume.

use std::fmt;

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::{ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroize;

use crate::check;
use crate::error::Result;
use crate::keyagg::compute_coefficient;
use crate::nonce::x_bytes;
use crate::{Ell, PublicKey, SessionId};

/// Per-signer state produced by round 1 of the interactive protocol.
///
/// Immutable value type: later-round logic takes a `Session` plus peer data
/// and produces new values, never mutates this one. Not reusable across
/// different `(session_id, message)` pairs.
#[derive(Clone)]
pub struct Session {
    /// Caller-chosen 32-byte session identifier.
    pub session_id: SessionId,
    /// The message this session will sign.
    pub message: Vec<u8>,
    /// Aggregated public key of all participants, compressed.
    pub pub_key_combined: PublicKey,
    /// Binding hash over the participant key list that produced
    /// `pub_key_combined`.
    pub ell: Ell,
    /// This signer's secret nonce. Never exposed directly; see
    /// [`Session::secret_nonce`].
    sec_nonce: Scalar,
    /// Commitment `SHA256(Rx)` to the secret nonce's curve point, safe to
    /// broadcast in round 1.
    pub commitment: [u8; 32],
}

impl Session {
    /// Initialize a signing session for the signer at position `idx` in the
    /// key list that produced `ell`.
    ///
    /// The secret nonce is a deterministic function of all arguments plus
    /// the signer's private key:
    ///
    /// ```text
    /// sec_nonce = SHA256(session_id || message || pub_key_combined
    ///                    || bytes(seckey * a_idx)) mod n
    /// ```
    ///
    /// Fails with [`crate::MusigError::InvalidSessionParams`] on a zero
    /// private key, empty message, or malformed combined key.
    pub fn initialize(
        session_id: SessionId,
        seckey: &Scalar,
        message: &[u8],
        pub_key_combined: PublicKey,
        ell: Ell,
        idx: u32,
    ) -> Result<Self> {
        check::validate_session_params(seckey, message, &pub_key_combined)?;
        debug!(idx, "initializing signer session");

        let coefficient = compute_coefficient(&ell, idx);
        let session_secret = *seckey * coefficient;
        let mut secret_bytes = [0u8; 32];
        secret_bytes.copy_from_slice(&session_secret.to_bytes());

        let mut hasher = Sha256::new();
        hasher.update(session_id);
        hasher.update(message);
        hasher.update(pub_key_combined);
        hasher.update(secret_bytes);
        secret_bytes.zeroize();
        let digest = hasher.finalize();
        let sec_nonce = <Scalar as Reduce<U256>>::reduce_bytes(&digest);

        let nonce_point = ProjectivePoint::GENERATOR * sec_nonce;
        let commitment: [u8; 32] = Sha256::digest(x_bytes(&nonce_point)).into();

        Ok(Session {
            session_id,
            message: message.to_vec(),
            pub_key_combined,
            ell,
            sec_nonce,
            commitment,
        })
    }

    /// The secret nonce, for the later rounds run by this signer.
    ///
    /// Must not be sent to peers before every participant's commitment has
    /// been collected.
    pub fn secret_nonce(&self) -> &Scalar {
        &self.sec_nonce
    }

    /// Recheck that the stored commitment matches the secret nonce's curve
    /// point.
    pub fn verify_commitment(&self) -> bool {
        let nonce_point = ProjectivePoint::GENERATOR * self.sec_nonce;
        let expected: [u8; 32] = Sha256::digest(x_bytes(&nonce_point)).into();
        bool::from(expected.ct_eq(&self.commitment))
    }
}

impl fmt::Debug for Session {
    // sec_nonce is deliberately omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("message", &self.message)
            .field("pub_key_combined", &self.pub_key_combined)
            .field("ell", &self.ell)
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}
