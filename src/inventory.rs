use std::collections::HashMap;

use serde_json::Value;

use crate::intent::{self, Intent};

/// Read-only source of per-device fallback values.
pub trait Inventory {
    /// Default for `field_path` (dotted, spelling-insensitive) on `device`
    fn get_default(&self, device: &str, field_path: &str) -> Option<Value>;
}

/// Inventory with nothing in it
pub struct NoInventory;

impl Inventory for NoInventory {
    fn get_default(&self, _device: &str, _field_path: &str) -> Option<Value> {
        None
    }
}

/// In-memory inventory keyed by device name
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    devices: HashMap<String, Intent>,
}

impl StaticInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory holding the defaults of a single device
    pub fn for_device(device: &str, defaults: Intent) -> Self {
        let mut inv = Self::new();
        inv.insert(device, defaults);
        inv
    }

    pub fn insert(&mut self, device: &str, defaults: Intent) {
        self.devices
            .insert(device.to_string(), intent::normalize(&defaults));
    }
}

impl Inventory for StaticInventory {
    fn get_default(&self, device: &str, field_path: &str) -> Option<Value> {
        let defaults = self.devices.get(device)?;
        intent::get_path(defaults, field_path).cloned()
    }
}
