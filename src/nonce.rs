//! Deterministic ECDSA nonce derivation with an HMAC-SHA256 DRBG, following
//! the construction of RFC 6979 section 3.2:
//! <https://datatracker.ietf.org/doc/html/rfc6979#section-3.2>
//!
//! The same `(private key, digest)` pair always yields the same nonce, and
//! distinct digests yield independent nonces, so no entropy source is needed
//! and nonce reuse across messages cannot happen.

use alloc::{string::ToString, vec::Vec};

use bitcoin::hashes::{hmac, sha256, Hash, HashEngine};
use num_bigint::BigUint;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{decode_scalar, utils, CurveParameters, Error, DIGEST_LEN};

const HASH_LEN: usize = 32;

/// How the message digest is folded into the DRBG seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NonceDerivation {
    /// The digest is hashed once more with SHA-256 before seeding, and a
    /// rejected candidate only refreshes `K`. This is the derivation the
    /// ledger's existing signatures were produced with.
    #[default]
    Rehashed,
    /// Plain RFC 6979: the digest is reduced modulo the order and folded in
    /// directly, and a rejected candidate refreshes both `K` and `V`.
    Rfc6979,
}

/// HMAC-DRBG state `(K, V)` scoped to a single signing operation.
///
/// Each call to [`NonceGenerator::next_nonce`] yields the next valid nonce of
/// the stream. The first one is the nonce for the `(key, digest)` pair; later
/// ones are only drawn when a nonce leads to a degenerate signature.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct NonceGenerator {
    k: [u8; HASH_LEN],
    v: [u8; HASH_LEN],
    #[zeroize(skip)]
    order: BigUint,
    #[zeroize(skip)]
    derivation: NonceDerivation,
}

impl NonceGenerator {
    /// Seeds the generator from `private_key` and `digest`.
    pub fn new(
        private_key: &BigUint,
        digest: &[u8; DIGEST_LEN],
        params: &CurveParameters,
        derivation: NonceDerivation,
    ) -> Result<Self, Error> {
        if !params.is_valid_scalar(private_key) {
            return Err(Error::InvalidPrivateKey);
        }
        if params.order().bits() > (HASH_LEN as u64) * 8 {
            return Err(Error::InvalidInput(
                "nonce derivation supports group orders of at most 256 bits".to_string(),
            ));
        }

        let x = Zeroizing::new(params.encode_scalar(private_key)?);
        let h1: Zeroizing<Vec<u8>> = Zeroizing::new(match derivation {
            NonceDerivation::Rehashed => utils::sha256(digest).to_vec(),
            NonceDerivation::Rfc6979 => {
                let reduced = bits2int(digest, params.order().bits()) % params.order();
                params.encode_scalar(&reduced)?
            }
        });

        let mut generator = Self {
            k: [0x00; HASH_LEN],
            v: [0x01; HASH_LEN],
            order: params.order().clone(),
            derivation,
        };

        for separator in [0x00u8, 0x01] {
            generator.k = hmac_sha256(
                &generator.k,
                &[&generator.v, &[separator], x.as_slice(), h1.as_slice()],
            );
            generator.v = hmac_sha256(&generator.k, &[&generator.v]);
        }

        Ok(generator)
    }

    /// Returns the next nonce in `(0, order)`.
    ///
    /// Out-of-range candidates are skipped. There is no iteration cap: a
    /// rejection happens with negligible probability for 256-bit orders.
    pub fn next_nonce(&mut self) -> BigUint {
        loop {
            self.v = hmac_sha256(&self.k, &[&self.v]);
            let candidate = match self.derivation {
                NonceDerivation::Rehashed => decode_scalar(&self.v),
                NonceDerivation::Rfc6979 => bits2int(&self.v, self.order.bits()),
            };

            // Advance past this candidate so the following call continues
            // the stream.
            self.k = hmac_sha256(&self.k, &[&self.v, &[0x00]]);
            if self.derivation == NonceDerivation::Rfc6979 {
                self.v = hmac_sha256(&self.k, &[&self.v]);
            }

            if candidate.bits() > 0 && candidate < self.order {
                return candidate;
            }
            trace!("nonce candidate outside the group order, drawing again");
        }
    }
}

/// Derives the nonce for `(private_key, digest)`.
pub fn generate_nonce(
    private_key: &BigUint,
    digest: &[u8; DIGEST_LEN],
    params: &CurveParameters,
    derivation: NonceDerivation,
) -> Result<BigUint, Error> {
    Ok(NonceGenerator::new(private_key, digest, params, derivation)?.next_nonce())
}

/// Leftmost `qlen` bits of `bytes` as an integer.
fn bits2int(bytes: &[u8], qlen: u64) -> BigUint {
    let x = decode_scalar(bytes);
    let blen = (bytes.len() as u64) * 8;
    if blen > qlen {
        x >> (blen - qlen)
    } else {
        x
    }
}

fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> [u8; HASH_LEN] {
    let mut engine = hmac::HmacEngine::<sha256::Hash>::new(key);
    for part in parts {
        engine.input(part);
    }
    hmac::Hmac::<sha256::Hash>::from_engine(engine).to_byte_array()
}
