//! Authenticator - Turns a principal into a ninja
//!
//! Token issuance and session handling live outside Kage. This only answers
//! "which ninja is this?" for an already-trusted principal, and checks
//! passwords at login.

use std::sync::Arc;

use kage_domain::{CredentialHasher, Ninja, NinjaRepository};
use shared::{KageError, Result};
use tracing::{debug, warn};

pub struct Authenticator<N> {
    ninjas: N,
    hasher: Arc<dyn CredentialHasher>,
}

impl<N: NinjaRepository> Authenticator<N> {
    pub fn new(ninjas: N, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { ninjas, hasher }
    }

    /// Resolve a principal (the ninja's email) to the acting ninja
    pub fn authenticate(&self, principal: &str) -> Result<Ninja> {
        match self.ninjas.find_by_email(principal)? {
            Some(ninja) => {
                debug!(ninja = %ninja.id(), "principal resolved");
                Ok(ninja)
            }
            None => {
                warn!(principal, "unknown principal");
                Err(KageError::Unauthenticated)
            }
        }
    }

    /// Check an email/password pair
    ///
    /// Unknown email and wrong password fail the same way.
    pub fn login(&self, email: &str, password: &str) -> Result<Ninja> {
        let ninja = self
            .ninjas
            .find_by_email(email)?
            .filter(|n| self.hasher.verify(password, n.credential_hash()));

        match ninja {
            Some(ninja) => {
                debug!(ninja = %ninja.id(), "login accepted");
                Ok(ninja)
            }
            None => {
                warn!(email, "login rejected");
                Err(KageError::Unauthenticated)
            }
        }
    }
}
