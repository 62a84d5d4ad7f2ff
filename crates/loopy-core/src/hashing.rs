//! One-way hashing used to derive privacy-preserving identifiers.

/// Hash `input` with MD5 and render the digest as 32 lowercase hex characters.
///
/// The raw platform identifier never leaves the device; only this digest is
/// reported as the device `id`.
///
/// # Example
///
/// ```
/// use loopy_core::md5_hex;
///
/// assert_eq!(md5_hex("hello"), "5d41402abc4b2a76b9719d911017c592");
/// ```
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_vectors() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            md5_hex("The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_md5_is_deterministic() {
        let first = md5_hex("00:1A:2B:3C:4D:5E");
        let second = md5_hex("00:1A:2B:3C:4D:5E");
        assert_eq!(first, second);
    }

    #[test]
    fn test_md5_distinguishes_inputs() {
        assert_ne!(md5_hex("device-a"), md5_hex("device-b"));
        // Case matters
        assert_ne!(md5_hex("Device"), md5_hex("device"));
    }

    #[test]
    fn test_md5_shape() {
        let digest = md5_hex("ünïcödé");
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
