//! The ECDSA `(r, s)` signature value.

use alloc::{string::ToString, vec::Vec};

use num_bigint::BigUint;

use crate::{decode_scalar, CurveParameters, Error};

/// An ECDSA signature.
///
/// Named fields keep `r` and `s` from being transposed. Signatures produced by
/// [`crate::Signer`] always satisfy `s <= order / 2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Returns true if `s` is in the lower half of the group (canonical form).
    pub fn is_low_s(&self, params: &CurveParameters) -> bool {
        params.is_low_s(&self.s)
    }

    /// Replaces a high `s` by `order - s`; a no-op on canonical signatures.
    pub fn normalize_s(self, params: &CurveParameters) -> Self {
        Self {
            r: self.r,
            s: params.normalize_s(self.s),
        }
    }

    /// Serializes as `r || s`, each at the curve's fixed scalar width.
    pub fn to_compact(&self, params: &CurveParameters) -> Result<Vec<u8>, Error> {
        let mut out = params.encode_scalar(&self.r)?;
        out.extend_from_slice(&params.encode_scalar(&self.s)?);
        Ok(out)
    }

    /// Parses the `r || s` form produced by [`Signature::to_compact`].
    ///
    /// Both halves must lie in `(0, order)`. The canonical-form check is left
    /// to the verifier, which reports it as a rejection rather than an error.
    pub fn from_compact(bytes: &[u8], params: &CurveParameters) -> Result<Self, Error> {
        let width = params.scalar_len();
        if bytes.len() != 2 * width {
            return Err(Error::InvalidInput(format!(
                "compact signature must be {} bytes, got {}",
                2 * width,
                bytes.len()
            )));
        }

        let (r, s) = bytes.split_at(width);
        let (r, s) = (decode_scalar(r), decode_scalar(s));
        if !params.is_valid_scalar(&r) {
            return Err(Error::OutOfRange("r".to_string()));
        }
        if !params.is_valid_scalar(&s) {
            return Err(Error::OutOfRange("s".to_string()));
        }

        Ok(Self { r, s })
    }
}
