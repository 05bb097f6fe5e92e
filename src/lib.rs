//! Deterministic ECDSA over secp256k1 for UTXO transaction authorization.
//!
//! Signing derives its nonce with an HMAC-SHA256 DRBG (RFC 6979 style) and
//! always emits canonical low-s signatures. Verification rejects out of range
//! and non-canonical signatures before checking the curve equation.
//!
//! ```
//! use utxo_ecdsa::{compute_transaction_id, double_sha256, sign, verify, BigUint, Signer};
//!
//! let txid = compute_transaction_id(&[0xd1, 0xa8, 0xf3, 0xb7]).unwrap();
//! assert_eq!(txid.len(), 64);
//!
//! let private_key = BigUint::from(0x5eed_u32);
//! let digest = double_sha256(b"raw transaction bytes");
//! let signature = sign(&private_key, &digest).unwrap();
//!
//! let public_key = Signer::default().public_key(&private_key, true).unwrap();
//! assert!(verify(&public_key, &signature, &digest).unwrap());
//! ```

#![no_std]

#[macro_use]
pub extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod codec;
pub mod curve;
pub mod error;
pub mod nonce;
pub mod signature;
pub mod signer;
pub mod utils;
pub mod verifier;

pub use codec::*;
pub use curve::*;
pub use error::*;
pub use nonce::*;
pub use signature::*;
pub use signer::*;
pub use utils::*;
pub use verifier::*;

pub use num_bigint::BigUint;

use alloc::string::String;

/// Display-form transaction id of `data`; see [`transaction_id`].
pub fn compute_transaction_id(data: &[u8]) -> Result<String, Error> {
    transaction_id(data)
}

/// Signs a 32-byte `digest` over secp256k1 with the default nonce derivation.
pub fn sign(private_key: &BigUint, digest: &[u8]) -> Result<Signature, Error> {
    Signer::default().sign(private_key, digest)
}

/// Verifies a secp256k1 signature; see [`Verifier::verify`].
pub fn verify(public_key: &[u8], signature: &Signature, digest: &[u8]) -> Result<bool, Error> {
    Verifier::default().verify(public_key, signature, digest)
}
