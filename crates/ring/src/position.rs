//! Ring position hashing.
//!
//! A ring position is the low 32 bits of the MD5 digest of a string, read
//! big-endian. Reducing a big-endian integer modulo 2^32 only depends on
//! its least-significant 4 bytes, so this is just the digest's trailing
//! 4 bytes interpreted as a `u32`.

/// Hashes `input` into a 32-bit ring position.
#[inline]
pub fn hash_position(input: &str) -> u32 {
    let digest = md5::compute(input.as_bytes());
    let tail: [u8; 4] = digest.0[12..16].try_into().expect("md5 digest is 16 bytes");
    u32::from_be_bytes(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(hash_position("node1:0"), hash_position("node1:0"));
    }

    #[test]
    fn distinct_inputs_usually_differ() {
        assert_ne!(hash_position("node1:0"), hash_position("node1:1"));
        assert_ne!(hash_position("node1:0"), hash_position("node2:0"));
    }
}
