//! CredentialHasher - One-way transformation of passwords
//!
//! The domain only ever stores and compares the output.

pub trait CredentialHasher: Send + Sync {
    /// Hash a raw password for storage
    fn hash(&self, raw: &str) -> String;

    /// Check a raw password against a stored hash
    fn verify(&self, raw: &str, hash: &str) -> bool;
}
