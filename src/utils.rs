//! Hashing helpers: the double-SHA256 transaction id and digest checks
//! shared by the signer and verifier.

use alloc::string::{String, ToString};

use bitcoin::{
    hashes::{sha256, sha256d, Hash},
    hex::DisplayHex,
    secp256k1::{All, Secp256k1},
};

use crate::Error;

/// Length of a message digest accepted by [`crate::Signer`] and [`crate::Verifier`].
pub const DIGEST_LEN: usize = 32;

/// Computes `SHA256(SHA256(data))` in natural byte order.
pub fn double_sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    sha256d::Hash::hash(data).to_byte_array()
}

/// Computes the display form of a transaction id.
///
/// The double-SHA256 digest is byte-reversed before hex encoding, which is the
/// little-endian convention ledgers use when showing transaction ids.
pub fn transaction_id(data: &[u8]) -> Result<String, Error> {
    if data.is_empty() {
        return Err(Error::InvalidInput(
            "empty transaction data cannot be hashed".to_string(),
        ));
    }

    let mut digest = double_sha256(data);
    digest.reverse();

    Ok(digest.as_slice().to_lower_hex_string())
}

pub(crate) fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    sha256::Hash::hash(data).to_byte_array()
}

/// Checks that `digest` is exactly [`DIGEST_LEN`] bytes.
pub(crate) fn digest_array(digest: &[u8]) -> Result<[u8; DIGEST_LEN], Error> {
    digest.try_into().map_err(|_| {
        Error::InvalidInput(format!(
            "digest must be {} bytes, got {}",
            DIGEST_LEN,
            digest.len()
        ))
    })
}

pub(crate) type SecpCtx = Secp256k1<All>;

#[cfg(test)]
mod tests {
    use bitcoin::Txid;
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_transaction_id_vector() {
        let txid = transaction_id(&hex!("d1a8f3b7c4e2095d")).unwrap();

        assert_eq!(
            txid,
            "c93a44c8e81788a8d1c309cf92bda3989c5dc9201b2faffa8fa444d2680dd4ad"
        );
        assert_eq!(txid.len(), 64);
    }

    #[test]
    fn test_transaction_id_is_reversed_double_hash() {
        assert_eq!(
            double_sha256(&hex!("d1a8f3b7c4e2095d")),
            hex!("add40d68d244a48ffaaf2f1b20c95d9c98a3bd92cf09c3d1a88817e8c8443ac9")
        );

        // Matches the ledger's own Txid display convention
        let data = b"abc";
        let expected = Txid::from_raw_hash(sha256d::Hash::hash(data)).to_string();
        assert_eq!(transaction_id(data).unwrap(), expected);
        assert_eq!(
            expected,
            "58636c3ec08c12d55aedda056d602d5bcca72d8df6a69b519b72d32dc2428b4f"
        );
    }

    #[test]
    fn test_transaction_id_rejects_empty() {
        assert!(matches!(transaction_id(&[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_digest_array_length() {
        assert!(digest_array(&[0u8; 32]).is_ok());
        assert!(matches!(
            digest_array(&[0u8; 31]),
            Err(Error::InvalidInput(_))
        ));
        assert!(digest_array(&[0u8; 33]).is_err());
    }
}
