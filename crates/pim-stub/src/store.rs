//! In-memory storage backend using DashMap.
//!
//! Each doctype gets its own map keyed by record name. Mapping links are
//! keyed by `(vendor, vendor attribute)`; attribute values point at their
//! parent attribute. Inserts publish a [`DocUpdate`] on a broadcast channel,
//! mirroring the framework's realtime feed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use pim_client::attributes::AttributeValueRecord;
use pim_client::mapping::VendorAttributeRecord;
use pim_client::items::ItemRecord;
use pim_client::PimAttributeOption;
use pim_core::{ItemName, PimAttributeId, VendorAttributeId, VendorAuthType, VendorId};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

pub const VENDOR_DOCTYPE: &str = "PIM Vendor";
pub const VENDOR_ATTRIBUTE_DOCTYPE: &str = "PIM Vendor Attribute";
pub const PIM_ATTRIBUTE_DOCTYPE: &str = "PIM Attribute";
pub const PIM_ATTRIBUTE_VALUE_DOCTYPE: &str = "PIM Attribute Value";
pub const ITEM_DOCTYPE: &str = "PIM Item";

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// A stored `PIM Vendor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRecord {
    pub name: VendorId,
    pub vendor_name: String,
    pub vendor_code: String,
    pub vendor_active: bool,
    pub vendor_integration_enabled: bool,
    pub vendor_api_auth_type: VendorAuthType,
    pub modified: DateTime<Utc>,
}

/// A stored `PIM Item` with its modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredItem {
    pub record: ItemRecord,
    pub modified: DateTime<Utc>,
}

/// A stored `PIM Attribute` with its timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttribute {
    pub record: PimAttributeOption,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl StoredAttribute {
    /// A record created and last modified at `at`.
    pub fn new(record: PimAttributeOption, at: DateTime<Utc>) -> Self {
        Self {
            record,
            created: at,
            modified: at,
        }
    }
}

/// A stored `PIM Attribute Value`, a child row of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub record: AttributeValueRecord,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A record change, as pushed to realtime listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocUpdate {
    pub doctype: String,
    pub name: String,
    pub fields: Map<String, Value>,
}

struct Inner {
    vendors: DashMap<VendorId, VendorRecord>,
    vendor_attributes: DashMap<VendorAttributeId, VendorAttributeRecord>,
    pim_attributes: DashMap<PimAttributeId, StoredAttribute>,
    attribute_values: DashMap<String, StoredValue>,
    mappings: DashMap<(VendorId, VendorAttributeId), PimAttributeId>,
    items: DashMap<ItemName, StoredItem>,
    sequence: AtomicU64,
    updates: broadcast::Sender<DocUpdate>,
}

/// Shared application state holding all in-memory stores.
///
/// Cheaply cloneable via `Arc`; all clones share the same data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                vendors: DashMap::new(),
                vendor_attributes: DashMap::new(),
                pim_attributes: DashMap::new(),
                attribute_values: DashMap::new(),
                mappings: DashMap::new(),
                items: DashMap::new(),
                sequence: AtomicU64::new(0),
                updates,
            }),
        }
    }

    pub fn vendors(&self) -> &DashMap<VendorId, VendorRecord> {
        &self.inner.vendors
    }

    pub fn vendor_attributes(&self) -> &DashMap<VendorAttributeId, VendorAttributeRecord> {
        &self.inner.vendor_attributes
    }

    pub fn pim_attributes(&self) -> &DashMap<PimAttributeId, StoredAttribute> {
        &self.inner.pim_attributes
    }

    /// Attribute values keyed by record name.
    pub fn attribute_values(&self) -> &DashMap<String, StoredValue> {
        &self.inner.attribute_values
    }

    /// Number of values whose parent is `attribute`.
    pub fn value_count(&self, attribute: &PimAttributeId) -> u64 {
        self.inner
            .attribute_values
            .iter()
            .filter(|entry| &entry.record.pim_attribute == attribute)
            .count() as u64
    }

    pub fn mappings(&self) -> &DashMap<(VendorId, VendorAttributeId), PimAttributeId> {
        &self.inner.mappings
    }

    pub fn items(&self) -> &DashMap<ItemName, StoredItem> {
        &self.inner.items
    }

    /// Next autoname for `prefix`, e.g. `VA-0001`. Shared across prefixes.
    pub fn next_name(&self, prefix: &str) -> String {
        let n = self.inner.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n:04}")
    }

    /// Listen for record changes made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DocUpdate> {
        self.inner.updates.subscribe()
    }

    /// Announce a record change. Nobody listening is not an error.
    pub fn publish(&self, doctype: &str, name: &str, fields: Map<String, Value>) {
        let update = DocUpdate {
            doctype: doctype.to_string(),
            name: name.to_string(),
            fields,
        };
        let listeners = self.inner.updates.send(update).unwrap_or(0);
        tracing::debug!(doctype, name, listeners, "doc_update published");
    }
}
