//! Content hashing for ring placement.

use md5::{Digest, Md5};

/// Compute the 32-bit placement key for a byte payload.
///
/// The key is the first 4 bytes of the MD5 digest of the full payload,
/// interpreted big-endian. Identical content always yields the identical
/// key, regardless of when or where it is computed.
///
/// This is a routing coordinate, not an integrity digest: the truncation
/// to 32 bits makes collisions merely co-placement, and verifying stored
/// content is the storage layer's concern.
pub fn content_key(data: &[u8]) -> u32 {
    let digest = Md5::digest(data);
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest_prefixes() {
        // md5("hello") = 5d41402a...
        assert_eq!(content_key(b"hello"), 0x5d41_402a);
        // md5("hello world") = 5eb63bbb...
        assert_eq!(content_key(b"hello world"), 0x5eb6_3bbb);
        // md5("") = d41d8cd9...
        assert_eq!(content_key(b""), 0xd41d_8cd9);
    }

    #[test]
    fn test_key_is_deterministic() {
        let data = b"the same payload, hashed twice";
        assert_eq!(content_key(data), content_key(data));
    }

    #[test]
    fn test_realistic_corpus_has_no_collisions() {
        use std::collections::HashSet;
        let keys: HashSet<u32> = (0..1000)
            .map(|i| content_key(format!("object-{i}").as_bytes()))
            .collect();
        assert_eq!(keys.len(), 1000);
    }
}
