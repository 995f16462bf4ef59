//! SHA-256 credential hashing

use kage_domain::CredentialHasher;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256$";

/// Peppered SHA-256, stored as `sha256$<hex>`
#[derive(Debug, Clone, Default)]
pub struct Sha256Hasher {
    pepper: String,
}

impl Sha256Hasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    fn digest(&self, raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl CredentialHasher for Sha256Hasher {
    fn hash(&self, raw: &str) -> String {
        format!("{}{}", SCHEME, self.digest(raw))
    }

    fn verify(&self, raw: &str, hash: &str) -> bool {
        hash.strip_prefix(SCHEME)
            .is_some_and(|digest| digest == self.digest(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Sha256Hasher::new("pepper");
        let hash = hasher.hash("Ramen#2024");

        assert!(hash.starts_with("sha256$"));
        assert_eq!(hash.len(), SCHEME.len() + 64);
        assert!(hasher.verify("Ramen#2024", &hash));
        assert!(!hasher.verify("Ramen#2025", &hash));
    }

    #[test]
    fn test_pepper_changes_the_hash() {
        let plain = Sha256Hasher::default().hash("Ramen#2024");
        let peppered = Sha256Hasher::new("konoha").hash("Ramen#2024");
        assert_ne!(plain, peppered);
        assert!(!Sha256Hasher::new("konoha").verify("Ramen#2024", &plain));
    }

    #[test]
    fn test_unknown_scheme_never_verifies() {
        let hasher = Sha256Hasher::default();
        let digest = hasher.digest("Ramen#2024");
        assert!(!hasher.verify("Ramen#2024", &digest));
    }
}
