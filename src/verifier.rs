//! ECDSA verification with range and canonical-form checks ahead of the
//! curve equation.

use tracing::debug;

use crate::{digest_array, CurveBackend, Error, Secp256k1Backend, Signature};

/// Public key encodings: compressed (33 bytes) or uncompressed (65 bytes).
const PUBLIC_KEY_LENGTHS: [usize; 2] = [33, 65];
const PUBLIC_KEY_PREFIXES: [u8; 3] = [0x02, 0x03, 0x04];

/// Checks ECDSA signatures over 32-byte message digests.
///
/// Malformed inputs (public key shape, digest length) are caller errors and
/// surface as [`Error`]. Every other failure is a plain `Ok(false)`: an out
/// of range `r` or `s`, a non-canonical (high) `s`, an undecodable public key
/// and a failed curve equation are indistinguishable to the caller.
pub struct Verifier<B = Secp256k1Backend> {
    backend: B,
}

impl Default for Verifier<Secp256k1Backend> {
    fn default() -> Self {
        Self::new(Secp256k1Backend::new())
    }
}

impl<B: CurveBackend> Verifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Verifies `signature` over `digest` against the SEC 1 encoded `public_key`.
    pub fn verify(
        &self,
        public_key: &[u8],
        signature: &Signature,
        digest: &[u8],
    ) -> Result<bool, Error> {
        check_public_key(public_key)?;
        let digest = digest_array(digest)?;
        let params = self.backend.params();

        if !params.is_valid_scalar(&signature.r) {
            debug!("rejecting signature: r out of range");
            return Ok(false);
        }
        if !params.is_valid_scalar(&signature.s) {
            debug!("rejecting signature: s out of range");
            return Ok(false);
        }
        // A signer of this crate never emits the upper-half twin.
        if !params.is_low_s(&signature.s) {
            debug!("rejecting signature: s is not canonical");
            return Ok(false);
        }

        let point = match self.backend.decode_point(public_key) {
            Ok(point) => point,
            Err(e) => {
                debug!(error = %e, "rejecting signature: public key does not decode");
                return Ok(false);
            }
        };

        let valid = self.backend.verify_point(&point, signature, &digest);
        if !valid {
            debug!("rejecting signature: verification equation failed");
        }

        Ok(valid)
    }
}

/// Structural check of a SEC 1 public key: length and encoding prefix.
fn check_public_key(public_key: &[u8]) -> Result<(), Error> {
    if !PUBLIC_KEY_LENGTHS.contains(&public_key.len()) {
        return Err(Error::InvalidPublicKey(format!(
            "length {} must be 33 or 65 bytes",
            public_key.len()
        )));
    }
    if !PUBLIC_KEY_PREFIXES.contains(&public_key[0]) {
        return Err(Error::InvalidPublicKey(format!(
            "prefix {:#04x} must be 0x02, 0x03 or 0x04",
            public_key[0]
        )));
    }

    Ok(())
}
