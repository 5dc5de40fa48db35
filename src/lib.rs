//! MuSig Schnorr multi-signatures (n-of-n) over secp256k1.
//!
//! Combines N public keys into one aggregated key and produces a single
//! Schnorr signature under it, either non-interactively when one party
//! holds every private key ([`sign_non_interactive`]), or as round 1
//! (commit) of the multi-party interactive protocol ([`Session`]).
//! Curve and scalar arithmetic come from [`k256`].
mod challenge;
pub use challenge::compute_challenge;
pub mod check;
mod error;
pub use error::{MusigError, Result};
mod keyagg;
pub use keyagg::{combine_pubkeys, compress_pubkey, compute_coefficient, compute_ell};
pub mod nonce;
pub use nonce::{deterministic_nonce, normalize_nonce_parity};
mod session;
pub use session::Session;
mod sign;
pub use sign::{Signature, sign_non_interactive};

/// Canonical SEC1 compressed public key bytes.
pub type PublicKey = [u8; 33];
/// Binding hash over the full ordered participant key list.
pub type Ell = [u8; 32];
/// Caller-chosen 32-byte session identifier.
pub type SessionId = [u8; 32];
