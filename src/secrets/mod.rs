use std::collections::HashMap;
use std::sync::RwLock;

/// Entries kept when no explicit limit is configured
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Secret hashes last rendered per (device, interface).
///
/// Lets an unchanged secret keep its previous hash instead of being
/// re-salted on every synthesis. Entries are independent; no operation
/// spans more than one key. The store lives as long as the process and
/// holds at most `capacity` keys: once full, existing keys are still
/// updated but new ones are not remembered, so their secrets are simply
/// re-encoded on the next request.
#[derive(Debug)]
pub struct SecretStore {
    hashes: RwLock<HashMap<(String, String), String>>,
    capacity: usize,
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hashes: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, device: &str, interface: &str) -> Option<String> {
        let hashes = self.hashes.read().unwrap_or_else(|e| e.into_inner());
        hashes
            .get(&(device.to_string(), interface.to_string()))
            .cloned()
    }

    /// Store `hash`; returns false when the store is full and the key is new.
    pub fn put(&self, device: &str, interface: &str, hash: String) -> bool {
        let mut hashes = self.hashes.write().unwrap_or_else(|e| e.into_inner());
        let key = (device.to_string(), interface.to_string());
        if hashes.len() >= self.capacity && !hashes.contains_key(&key) {
            tracing::warn!(
                "secret cache full ({} entries), not remembering {} on {}",
                self.capacity,
                interface,
                device
            );
            return false;
        }
        hashes.insert(key, hash);
        true
    }

    pub fn remove(&self, device: &str, interface: &str) -> Option<String> {
        let mut hashes = self.hashes.write().unwrap_or_else(|e| e.into_inner());
        hashes.remove(&(device.to_string(), interface.to_string()))
    }

    pub fn len(&self) -> usize {
        self.hashes.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_keyed_by_device_and_interface() {
        let store = SecretStore::new();
        assert!(store.is_empty());
        store.put("pe1", "Eth-Trunk1", "01ABCD".into());
        store.put("pe2", "Eth-Trunk1", "02ABCD".into());

        assert_eq!(store.get("pe1", "Eth-Trunk1").as_deref(), Some("01ABCD"));
        assert_eq!(store.get("pe2", "Eth-Trunk1").as_deref(), Some("02ABCD"));
        assert_eq!(store.get("pe1", "Eth-Trunk2"), None);

        store.put("pe1", "Eth-Trunk1", "05FFFF".into());
        assert_eq!(store.get("pe1", "Eth-Trunk1").as_deref(), Some("05FFFF"));
        assert_eq!(store.len(), 2);

        assert_eq!(store.remove("pe1", "Eth-Trunk1").as_deref(), Some("05FFFF"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_full_store_updates_known_keys_only() {
        let store = SecretStore::with_capacity(2);
        assert!(store.put("pe1", "Eth-Trunk1", "01AA".into()));
        assert!(store.put("pe1", "Eth-Trunk2", "02BB".into()));

        assert!(!store.put("pe2", "Eth-Trunk1", "03CC".into()));
        assert_eq!(store.get("pe2", "Eth-Trunk1"), None);
        assert_eq!(store.len(), 2);

        assert!(store.put("pe1", "Eth-Trunk1", "04DD".into()));
        assert_eq!(store.get("pe1", "Eth-Trunk1").as_deref(), Some("04DD"));

        store.remove("pe1", "Eth-Trunk2");
        assert!(store.put("pe2", "Eth-Trunk1", "03CC".into()));
    }
}
