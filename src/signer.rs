//! Deterministic, canonical (low-s) ECDSA signing.

use alloc::{string::ToString, vec::Vec};

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::{
    decode_scalar, digest_array, CurveBackend, Error, NonceDerivation, NonceGenerator,
    Secp256k1Backend, Signature, DIGEST_LEN,
};

/// Produces ECDSA signatures over 32-byte message digests.
///
/// Signing is deterministic: the nonce comes from [`NonceGenerator`], so the
/// same key and digest always give the same signature.
pub struct Signer<B = Secp256k1Backend> {
    backend: B,
    derivation: NonceDerivation,
}

impl Default for Signer<Secp256k1Backend> {
    fn default() -> Self {
        Self::new(Secp256k1Backend::new())
    }
}

impl<B: CurveBackend> Signer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            derivation: NonceDerivation::default(),
        }
    }

    /// Selects how the digest is folded into the nonce seed.
    pub fn with_derivation(mut self, derivation: NonceDerivation) -> Self {
        self.derivation = derivation;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn derivation(&self) -> NonceDerivation {
        self.derivation
    }

    /// Signs `digest` with `private_key`.
    ///
    /// Fails with [`Error::InvalidPrivateKey`] unless `0 < private_key < order`
    /// and with [`Error::InvalidInput`] unless `digest` is 32 bytes.
    pub fn sign(&self, private_key: &BigUint, digest: &[u8]) -> Result<Signature, Error> {
        let params = self.backend.params();
        if !params.is_valid_scalar(private_key) {
            return Err(Error::InvalidPrivateKey);
        }
        let digest = digest_array(digest)?;

        let mut nonces = NonceGenerator::new(private_key, &digest, params, self.derivation)?;
        let signature = self.sign_with_nonces(private_key, &digest, &mut nonces)?;

        debug!(
            curve = params.name(),
            r = %format_args!("{:064x}", signature.r),
            s = %format_args!("{:064x}", signature.s),
            "signed digest"
        );

        Ok(signature)
    }

    /// Derives the SEC 1 public key bytes for `private_key`.
    pub fn public_key(&self, private_key: &BigUint, compressed: bool) -> Result<Vec<u8>, Error> {
        if !self.backend.params().is_valid_scalar(private_key) {
            return Err(Error::InvalidPrivateKey);
        }
        let point = self.backend.mul_generator(private_key)?;

        Ok(self.backend.encode_point(&point, compressed))
    }

    /// Runs `s = k⁻¹ (z + r d) mod n` over the nonce stream until a nonce
    /// gives non-zero `r` and `s`, then canonicalizes `s`.
    fn sign_with_nonces(
        &self,
        private_key: &BigUint,
        digest: &[u8; DIGEST_LEN],
        nonces: &mut NonceGenerator,
    ) -> Result<Signature, Error> {
        let params = self.backend.params();
        let order = params.order();
        let z = decode_scalar(digest);

        loop {
            let k = nonces.next_nonce();

            let point = self.backend.mul_generator(&k)?;
            let r = self.backend.x_coordinate(&point) % order;
            if r.is_zero() {
                trace!("nonce produced r = 0, drawing the next nonce");
                continue;
            }

            let k_inv = k.modinv(order).ok_or_else(|| {
                Error::Backend("nonce is not invertible modulo the group order".to_string())
            })?;
            let s = (k_inv * ((&z + &r * private_key) % order)) % order;
            if s.is_zero() {
                trace!("nonce produced s = 0, drawing the next nonce");
                continue;
            }

            return Ok(Signature::new(r, s).normalize_s(params));
        }
    }
}
