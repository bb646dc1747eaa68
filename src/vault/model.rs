//! The plaintext vault payload.
//!
//! A `Vault` maps service name -> username -> password.  It only ever
//! exists in memory after a successful decrypt, and its strings are
//! wiped when it is dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Username -> password for a single service.
pub type Credentials = BTreeMap<String, String>;

/// Service name -> credentials.
pub type ServiceMap = BTreeMap<String, Credentials>;

/// The decrypted service -> username -> password store.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault {
    services: ServiceMap,
}

impl Vault {
    /// An empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `services[service][username] = password`.
    ///
    /// Returns `true` when an existing password was replaced.
    pub fn upsert(&mut self, service: &str, username: &str, password: &str) -> bool {
        let previous = self
            .services
            .entry(service.to_string())
            .or_default()
            .insert(username.to_string(), password.to_string());

        match previous {
            Some(mut old) => {
                old.zeroize();
                true
            }
            None => false,
        }
    }

    /// Remove one credential.  A service left with no usernames is dropped.
    ///
    /// Returns `None` if the service is unknown and `Some(false)` if the
    /// service exists but the username does not.
    pub fn remove(&mut self, service: &str, username: &str) -> Option<bool> {
        let credentials = self.services.get_mut(service)?;
        let Some(mut old) = credentials.remove(username) else {
            return Some(false);
        };
        old.zeroize();

        if credentials.is_empty() {
            self.services.remove(service);
        }
        Some(true)
    }

    /// The credentials stored under `service`, if any.
    pub fn credentials(&self, service: &str) -> Option<&Credentials> {
        self.services.get(service)
    }

    /// Service names in sorted order.
    pub fn service_names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// The full service map.
    pub fn services(&self) -> &ServiceMap {
        &self.services
    }

    /// Number of services.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Number of (service, username) pairs.
    pub fn credential_count(&self) -> usize {
        self.services.values().map(BTreeMap::len).sum()
    }

    /// `true` when no credentials are stored at all.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Drop for Vault {
    fn drop(&mut self) {
        for (mut service, credentials) in std::mem::take(&mut self.services) {
            service.zeroize();
            for (mut username, mut password) in credentials {
                username.zeroize();
                password.zeroize();
            }
        }
    }
}

// Only counts are shown so a stray `{:?}` never prints credentials.
impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("services", &self.service_count())
            .field("credentials", &self.credential_count())
            .finish()
    }
}

/// Result of a credential lookup.
///
/// Choosing between several candidates is the caller's job: the vault
/// hands back the full candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// No service was named: every service with its credentials.
    Services(ServiceMap),
    /// A single service's username -> password map.
    Credentials(Credentials),
}
