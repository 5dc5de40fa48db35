use thiserror::Error;

/// Result type alias for MuSig operations.
pub type Result<T> = std::result::Result<T, MusigError>;

/// Errors that can occur while aggregating keys or signing.
///
/// Every variant is raised synchronously during input validation, before any
/// cryptographic computation touches the offending value. There is no
/// internal retry: a failed call produces no partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MusigError {
    /// A required input was missing, empty, or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A public key was malformed or does not lie on secp256k1.
    #[error("malformed or off-curve public key at index {0}")]
    InvalidPublicKey(usize),

    /// Two participants supplied the same public key. Aggregating a repeated
    /// key is vulnerable to key-cancellation forgery.
    #[error("duplicate public key at indices {first} and {second}")]
    DuplicatePublicKey {
        /// Index of the earlier occurrence in the key list.
        first: usize,
        /// Index of the later occurrence.
        second: usize,
    },

    /// A session parameter failed validation.
    #[error("invalid session parameters: {0}")]
    InvalidSessionParams(&'static str),
}
