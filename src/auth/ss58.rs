//! ss58 address codec.
//!
//! Only the simple account form is handled: a one- or two-byte network
//! prefix, a 32-byte sr25519 public key, and a two-byte blake2b checksum
//! over `b"SS58PRE" || prefix || key`.

use blake2::{Blake2b512, Digest};

use crate::auth::error::Ss58Error;

const CHECKSUM_PREIMAGE_PREFIX: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const KEY_LEN: usize = 32;

/// Decode an ss58 address into the raw 32-byte public key.
///
/// The network prefix is accepted as-is; callers compare identities by
/// public key, not by network.
pub fn decode(address: &str) -> Result<[u8; 32], Ss58Error> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|_| Ss58Error::BadBase58)?;

    let prefix_len = match data.len() {
        n if n == 1 + KEY_LEN + CHECKSUM_LEN => 1,
        n if n == 2 + KEY_LEN + CHECKSUM_LEN => 2,
        n => return Err(Ss58Error::BadLength(n)),
    };

    let (body, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    let expected = checksum_of(body);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(Ss58Error::BadChecksum);
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&body[prefix_len..]);
    Ok(key)
}

/// Encode a 32-byte public key as an ss58 address under the given
/// single-byte network prefix (42 is the generic Substrate network).
pub fn encode(public_key: &[u8; 32], network: u8) -> String {
    let mut body = Vec::with_capacity(1 + KEY_LEN + CHECKSUM_LEN);
    body.push(network);
    body.extend_from_slice(public_key);
    let checksum = checksum_of(&body);
    body.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(body).into_string()
}

fn checksum_of(body: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_PREIMAGE_PREFIX);
    hasher.update(body);
    let mut checksum = [0u8; 64];
    checksum.copy_from_slice(&hasher.finalize());
    checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let key = [7u8; 32];
        let address = encode(&key, 42);
        assert_eq!(decode(&address).unwrap(), key);
    }

    #[test]
    fn rejects_tampered_checksum() {
        let key = [7u8; 32];
        let mut address = encode(&key, 42);
        // Flip the final character to damage the checksum.
        let last = address.pop().unwrap();
        let replacement = if last == '1' { '2' } else { '1' };
        address.push(replacement);
        assert!(matches!(
            decode(&address),
            Err(Ss58Error::BadChecksum) | Err(Ss58Error::BadBase58)
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let data = bs58::encode([1u8; 10]).into_string();
        assert_eq!(decode(&data), Err(Ss58Error::BadLength(10)));
    }

    #[test]
    fn rejects_non_base58() {
        assert_eq!(decode("not an address!"), Err(Ss58Error::BadBase58));
    }
}
