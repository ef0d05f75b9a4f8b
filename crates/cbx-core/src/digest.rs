//! # Content Digests
//!
//! Some checklist formats provide no identifier for their leaf entries, so
//! the loaders derive one from the entry text. The digest must be stable
//! across runs and platforms: the same text always yields the same
//! shortcode, which keeps persisted dispositions attached to it.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `text` as 64 lowercase hex characters.
pub fn sha256_hex(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn lowercase_and_fixed_width() {
        let digest = sha256_hex("Identify what sensitive design information is exposed.");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn whitespace_is_significant() {
        assert_ne!(sha256_hex("objective"), sha256_hex("objective "));
    }
}
