//! Error types for signing and verification.

use alloc::string::String;
use core::fmt;

/// Error types for ECDSA signing, verification and transaction id computation.
///
/// A failed verification is not an error: [`crate::Verifier::verify`] reports it
/// as `Ok(false)`. These variants cover caller mistakes and backend failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input is well-typed but structurally wrong (length, emptiness)
    InvalidInput(String),
    /// The private key is not in the open range (0, curve order)
    InvalidPrivateKey,
    /// The public key bytes have the wrong length or encoding prefix
    InvalidPublicKey(String),
    /// An integer lies outside the open range (0, curve order)
    OutOfRange(String),
    /// An integer does not fit the requested fixed width
    Encoding(String),
    /// The curve backend could not reconstruct a point from bytes
    DecodeError(String),
    /// The curve backend failed on an operation it should support
    Backend(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "Invalid input - {}", e),
            Self::InvalidPrivateKey => write!(f, "Private key is outside the valid range"),
            Self::InvalidPublicKey(e) => write!(f, "Invalid public key - {}", e),
            Self::OutOfRange(e) => write!(f, "Value out of range - {}", e),
            Self::Encoding(e) => write!(f, "Encoding failed - {}", e),
            Self::DecodeError(e) => write!(f, "Point decode error - {}", e),
            Self::Backend(e) => write!(f, "Curve backend error - {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::InvalidInput("digest must be 32 bytes".to_string()).to_string(),
            "Invalid input - digest must be 32 bytes"
        );
        assert_eq!(
            Error::InvalidPrivateKey.to_string(),
            "Private key is outside the valid range"
        );
        assert_eq!(
            Error::DecodeError("bad point".to_string()).to_string(),
            "Point decode error - bad point"
        );
    }
}
