//! Big-endian fixed-width conversion between scalars and byte strings.

use alloc::{vec, vec::Vec};

use num_bigint::BigUint;

use crate::Error;

/// Encodes `n` as exactly `length` big-endian bytes, left-padded with zeros.
///
/// Fails with [`Error::Encoding`] if `n` needs more than `length` bytes.
pub fn encode_scalar(n: &BigUint, length: usize) -> Result<Vec<u8>, Error> {
    let significant = if n.bits() == 0 {
        Vec::new()
    } else {
        n.to_bytes_be()
    };

    if significant.len() > length {
        return Err(Error::Encoding(format!(
            "integer needs {} bytes, only {} available",
            significant.len(),
            length
        )));
    }

    let mut out = vec![0u8; length];
    out[length - significant.len()..].copy_from_slice(&significant);
    Ok(out)
}

/// Decodes a big-endian byte string as an unsigned integer.
pub fn decode_scalar(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}
