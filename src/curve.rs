//! Curve parameters and the elliptic-curve capability the signer and
//! verifier delegate point arithmetic to.

use alloc::{string::ToString, vec::Vec};

use bitcoin::secp256k1::{constants, ecdsa, Message, PublicKey, SecretKey};
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::{decode_scalar, encode_scalar, Error, SecpCtx, Signature, DIGEST_LEN};

/// Immutable description of the scalar group of a curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParameters {
    name: &'static str,
    order: BigUint,
    half_order: BigUint,
    scalar_len: usize,
}

impl CurveParameters {
    /// Builds parameters for a curve whose group has the given `order`.
    ///
    /// `scalar_len` is the fixed width, in bytes, of serialized scalars and
    /// must be large enough to hold `order`.
    pub fn new(name: &'static str, order: BigUint, scalar_len: usize) -> Result<Self, Error> {
        if order <= BigUint::from(2u8) {
            return Err(Error::InvalidInput(format!(
                "curve order of {} is too small",
                name
            )));
        }
        if order.bits() > (scalar_len as u64) * 8 {
            return Err(Error::InvalidInput(format!(
                "curve order of {} does not fit in {} bytes",
                name, scalar_len
            )));
        }

        let half_order = &order / 2u32;
        Ok(Self {
            name,
            order,
            half_order,
            scalar_len,
        })
    }

    /// The standard secp256k1 group parameters.
    pub fn secp256k1() -> Self {
        let order = BigUint::from_bytes_be(&constants::CURVE_ORDER);
        let half_order = &order / 2u32;
        Self {
            name: "secp256k1",
            order,
            half_order,
            scalar_len: constants::SECRET_KEY_SIZE,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// `order / 2`, rounded down; the largest canonical `s`.
    pub fn half_order(&self) -> &BigUint {
        &self.half_order
    }

    pub fn scalar_len(&self) -> usize {
        self.scalar_len
    }

    /// Returns true if `0 < x < order`.
    pub fn is_valid_scalar(&self, x: &BigUint) -> bool {
        !x.is_zero() && x < &self.order
    }

    /// Returns true if `s <= order / 2`.
    pub fn is_low_s(&self, s: &BigUint) -> bool {
        s <= &self.half_order
    }

    /// Maps `s` to `order - s` when it lies in the upper half of the group.
    pub fn normalize_s(&self, s: BigUint) -> BigUint {
        if self.is_low_s(&s) {
            s
        } else {
            &self.order - s
        }
    }

    /// Encodes `x` at this curve's fixed scalar width.
    pub fn encode_scalar(&self, x: &BigUint) -> Result<Vec<u8>, Error> {
        encode_scalar(x, self.scalar_len)
    }
}

/// Point arithmetic supplied by an elliptic-curve library.
///
/// The protocol logic in [`crate::Signer`] and [`crate::Verifier`] only prepares
/// inputs for these operations and interprets their results, so any
/// implementation honoring this contract can be substituted.
pub trait CurveBackend {
    type Point;

    /// Parameters of the group this backend operates on.
    fn params(&self) -> &CurveParameters;

    /// Computes `k * G` for the curve generator `G`.
    fn mul_generator(&self, k: &BigUint) -> Result<Self::Point, Error>;

    /// Affine x-coordinate of `point` as an integer.
    fn x_coordinate(&self, point: &Self::Point) -> BigUint;

    /// Reconstructs a point from its SEC 1 encoding.
    fn decode_point(&self, bytes: &[u8]) -> Result<Self::Point, Error>;

    /// SEC 1 encoding of `point`.
    fn encode_point(&self, point: &Self::Point, compressed: bool) -> Vec<u8>;

    /// Checks the ECDSA verification equation for `signature` over `digest`.
    fn verify_point(
        &self,
        point: &Self::Point,
        signature: &Signature,
        digest: &[u8; DIGEST_LEN],
    ) -> bool;
}

/// [`CurveBackend`] over secp256k1, backed by libsecp256k1.
pub struct Secp256k1Backend {
    secp: SecpCtx,
    params: CurveParameters,
}

impl Secp256k1Backend {
    pub fn new() -> Self {
        Self {
            secp: SecpCtx::new(),
            params: CurveParameters::secp256k1(),
        }
    }

    /// DER encoding of `signature`, as consumed by script interpreters and
    /// most ECDSA libraries.
    pub fn serialize_der(&self, signature: &Signature) -> Result<Vec<u8>, Error> {
        let compact = signature.to_compact(&self.params)?;
        let signature = ecdsa::Signature::from_compact(&compact)
            .map_err(|e| Error::OutOfRange(e.to_string()))?;

        Ok(signature.serialize_der().to_vec())
    }
}

impl Default for Secp256k1Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveBackend for Secp256k1Backend {
    type Point = PublicKey;

    fn params(&self) -> &CurveParameters {
        &self.params
    }

    fn mul_generator(&self, k: &BigUint) -> Result<PublicKey, Error> {
        let bytes = Zeroizing::new(self.params.encode_scalar(k)?);
        let secret = SecretKey::from_slice(&bytes).map_err(|e| Error::OutOfRange(e.to_string()))?;

        Ok(PublicKey::from_secret_key(&self.secp, &secret))
    }

    fn x_coordinate(&self, point: &PublicKey) -> BigUint {
        decode_scalar(&point.serialize()[1..])
    }

    fn decode_point(&self, bytes: &[u8]) -> Result<PublicKey, Error> {
        PublicKey::from_slice(bytes).map_err(|e| Error::DecodeError(e.to_string()))
    }

    fn encode_point(&self, point: &PublicKey, compressed: bool) -> Vec<u8> {
        if compressed {
            point.serialize().to_vec()
        } else {
            point.serialize_uncompressed().to_vec()
        }
    }

    fn verify_point(
        &self,
        point: &PublicKey,
        signature: &Signature,
        digest: &[u8; DIGEST_LEN],
    ) -> bool {
        let signature = match signature
            .to_compact(&self.params)
            .ok()
            .and_then(|compact| ecdsa::Signature::from_compact(&compact).ok())
        {
            Some(signature) => signature,
            None => return false,
        };
        let message = Message::from_digest(*digest);

        self.secp.verify_ecdsa(&message, &signature, point).is_ok()
    }
}

impl core::fmt::Debug for Secp256k1Backend {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Secp256k1Backend")
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_secp256k1_parameters() {
        let params = CurveParameters::secp256k1();

        assert_eq!(params.name(), "secp256k1");
        assert_eq!(params.scalar_len(), 32);
        assert_eq!(
            params.encode_scalar(params.order()).unwrap(),
            hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").to_vec()
        );
        assert_eq!(
            params.encode_scalar(params.half_order()).unwrap(),
            hex!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0").to_vec()
        );
    }

    #[test]
    fn test_scalar_range() {
        let params = CurveParameters::secp256k1();
        let n = params.order().clone();

        assert!(!params.is_valid_scalar(&BigUint::zero()));
        assert!(params.is_valid_scalar(&BigUint::from(1u8)));
        assert!(params.is_valid_scalar(&(&n - 1u32)));
        assert!(!params.is_valid_scalar(&n));
        assert!(!params.is_valid_scalar(&(&n + 1u32)));
    }

    #[test]
    fn test_low_s_boundary() {
        let params = CurveParameters::secp256k1();
        let half = params.half_order().clone();

        assert!(params.is_low_s(&half));
        assert!(!params.is_low_s(&(&half + 1u32)));

        let high = &half + 1u32;
        let normalized = params.normalize_s(high.clone());
        assert_eq!(&normalized + &high, params.order().clone());
        assert!(params.is_low_s(&normalized));
        assert_eq!(params.normalize_s(half.clone()), half);
    }

    #[test]
    fn test_custom_parameters() {
        let params = CurveParameters::new("toy", BigUint::from(251u32), 1).unwrap();
        assert_eq!(params.half_order(), &BigUint::from(125u32));
        assert_eq!(params.encode_scalar(&BigUint::from(7u8)).unwrap(), vec![7]);

        assert!(CurveParameters::new("tiny", BigUint::from(2u8), 1).is_err());
        assert!(CurveParameters::new("wide", BigUint::from(0x1_0000u32), 2).is_err());
    }

    #[test]
    fn test_backend_generator_and_encoding() {
        let backend = Secp256k1Backend::new();
        let point = backend.mul_generator(&BigUint::from(1u8)).unwrap();

        assert_eq!(
            backend.encode_point(&point, true),
            hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").to_vec()
        );
        assert_eq!(
            backend.x_coordinate(&point),
            decode_scalar(&hex!(
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            ))
        );

        let uncompressed = backend.encode_point(&point, false);
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(backend.decode_point(&uncompressed).unwrap(), point);
    }

    #[test]
    fn test_backend_rejects_bad_inputs() {
        let backend = Secp256k1Backend::new();

        assert!(backend.mul_generator(&BigUint::zero()).is_err());
        assert!(backend.mul_generator(backend.params().order()).is_err());

        // x = 5 is not on secp256k1
        let mut off_curve = [0u8; 33];
        off_curve[0] = 0x02;
        off_curve[32] = 0x05;
        assert!(matches!(
            backend.decode_point(&off_curve),
            Err(Error::DecodeError(_))
        ));
    }

    #[test]
    fn test_serialize_der() {
        let backend = Secp256k1Backend::new();
        let signature = Signature::new(
            decode_scalar(&hex!(
                "934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8"
            )),
            decode_scalar(&hex!(
                "2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"
            )),
        );

        assert_eq!(
            backend.serialize_der(&signature).unwrap(),
            hex!(
                "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8"
                "02202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"
            )
            .to_vec()
        );
    }
}
