//! # Item Calls
//!
//! SKU uniqueness, vendor lookup for SKU generation, filtered item listing
//! and item creation.

use pim_core::{ItemName, ItemSaveFields, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PimApiError;
use crate::rpc::RpcTransport;

pub const VALIDATE_SKU: &str = "imperium_pim.pim.doctype.pim_item.pim_item.validate_sku_uniqueness";
pub const GET_VENDOR_INFO: &str = "imperium_pim.pim.doctype.pim_item.pim_item.get_vendor_info";
pub const GET_ITEMS: &str = "imperium_pim.pim.doctype.pim_item.pim_item.get_items";
pub const INSERT_ITEM: &str = "imperium_pim.api.insert_item";

/// Filter keys `get_items` honours. Anything else is dropped.
pub const ALLOWED_ITEM_FILTERS: [&str; 8] = [
    "sku",
    "upc",
    "name1",
    "status",
    "item_type",
    "vendor_code",
    "vendor_sku",
    "brand",
];

/// Page size when the caller gives none.
pub const DEFAULT_ITEM_LIMIT: u32 = 100;

/// Whether a filter value counts as set: not null, empty, zero or false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Keep only allowed, non-empty filters.
pub fn clean_item_filters(filters: &Map<String, Value>) -> Map<String, Value> {
    filters
        .iter()
        .filter(|(k, v)| ALLOWED_ITEM_FILTERS.contains(&k.as_str()) && is_truthy(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Result of a SKU uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Vendor lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorInfo {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_code: Option<String>,
    #[serde(default, with = "crate::types::flag")]
    pub vendor_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A product item. Unmodelled columns (dimensions, weights, timestamps)
/// are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ItemName>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name1: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub vendor_code: Option<String>,
    #[serde(default)]
    pub vendor_sku: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemRecord {
    /// Run the save rules (SKU generation, then UPC validation) in place.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUpc`] for a malformed UPC; the
    /// record is left unchanged in that case.
    pub fn apply_save_rules(&mut self) -> Result<(), ValidationError> {
        let mut fields = ItemSaveFields {
            sku: self.sku.clone(),
            vendor_code: self.vendor_code.clone(),
            vendor_sku: self.vendor_sku.clone(),
            upc: self.upc.clone(),
        };
        fields.apply_save_rules()?;
        self.sku = fields.sku;
        self.upc = fields.upc;
        Ok(())
    }

    /// Value of an allowed filter column, for matching.
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        match key {
            "sku" => self.sku.as_deref(),
            "upc" => self.upc.as_deref(),
            "name1" => self.name1.as_deref(),
            "status" => self.status.as_deref(),
            "item_type" => self.item_type.as_deref(),
            "vendor_code" => self.vendor_code.as_deref(),
            "vendor_sku" => self.vendor_sku.as_deref(),
            "brand" => self.brand.as_deref(),
            _ => None,
        }
    }
}

/// Query for `get_items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemQuery {
    #[serde(default)]
    pub filters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// One page of items with pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ItemRecord>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub returned_count: u64,
    #[serde(default)]
    pub filters_applied: Map<String, Value>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
struct SkuParams<'a> {
    sku: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_name: Option<&'a ItemName>,
}

#[derive(Serialize)]
struct VendorInfoParams<'a> {
    vendor_code: &'a str,
}

/// Client for the item methods.
#[derive(Debug, Clone)]
pub struct ItemClient {
    rpc: RpcTransport,
}

impl ItemClient {
    pub(crate) fn new(rpc: RpcTransport) -> Self {
        Self { rpc }
    }

    /// Check whether `sku` is free, ignoring the item `current_name`.
    ///
    /// An empty SKU is always reported valid by the server. A server-side
    /// failure (`valid: false` with `error`) is returned as
    /// [`PimApiError::Rejected`] rather than as a taken SKU.
    pub async fn check_sku(
        &self,
        sku: &str,
        current_name: Option<&ItemName>,
    ) -> Result<SkuCheck, PimApiError> {
        let check: SkuCheck = self
            .rpc
            .call(VALIDATE_SKU, &SkuParams { sku, current_name })
            .await?;
        match check.error {
            Some(error) if !check.valid => Err(PimApiError::Rejected {
                method: VALIDATE_SKU.to_string(),
                message: error,
            }),
            _ => Ok(check),
        }
    }

    /// Look up a vendor by code. An unknown vendor is `success: false`.
    pub async fn vendor_info(&self, vendor_code: &str) -> Result<VendorInfo, PimApiError> {
        self.rpc
            .call(GET_VENDOR_INFO, &VendorInfoParams { vendor_code })
            .await
    }

    /// List items matching `query`.
    pub async fn list(&self, query: &ItemQuery) -> Result<ItemPage, PimApiError> {
        let page: ItemPage = self.rpc.call(GET_ITEMS, query).await?;
        if page.success {
            Ok(page)
        } else {
            Err(PimApiError::Rejected {
                method: GET_ITEMS.to_string(),
                message: page
                    .error
                    .or(page.message)
                    .unwrap_or_else(|| "An error occurred while retrieving items".to_string()),
            })
        }
    }

    /// Create an item. The server applies the save rules.
    pub async fn insert(&self, item: &ItemRecord) -> Result<ItemRecord, PimApiError> {
        self.rpc.call(INSERT_ITEM, item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_drop_unknown_keys_and_empty_values() {
        let raw = json!({
            "sku": "ACME-001",
            "brand": "",
            "status": null,
            "password": "hunter2",
            "vendor_code": "ACME"
        });
        let cleaned = clean_item_filters(raw.as_object().unwrap());
        assert_eq!(
            Value::Object(cleaned),
            json!({"sku": "ACME-001", "vendor_code": "ACME"})
        );
    }

    #[test]
    fn item_record_keeps_unmodelled_columns() {
        let item: ItemRecord = serde_json::from_value(json!({
            "name": "ACME-001",
            "sku": "ACME-001",
            "item_weight_lbs": 2.5
        }))
        .unwrap();
        assert_eq!(item.extra.get("item_weight_lbs"), Some(&json!(2.5)));
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["item_weight_lbs"], json!(2.5));
    }

    #[test]
    fn save_rules_on_record() {
        let mut item = ItemRecord {
            vendor_code: Some("ACME".into()),
            vendor_sku: Some("001".into()),
            upc: Some(" 012345678905 ".into()),
            ..Default::default()
        };
        item.apply_save_rules().unwrap();
        assert_eq!(item.sku.as_deref(), Some("ACME-001"));
        assert_eq!(item.upc.as_deref(), Some("012345678905"));

        let mut bad = ItemRecord {
            upc: Some("123".into()),
            ..Default::default()
        };
        assert!(bad.apply_save_rules().is_err());
        assert_eq!(bad.upc.as_deref(), Some("123"));
        assert!(bad.sku.is_none());
    }

    #[test]
    fn vendor_info_accepts_integer_flag() {
        let info: VendorInfo = serde_json::from_value(json!({
            "success": true,
            "vendor_name": "Acme",
            "vendor_code": "ACME",
            "vendor_active": 1
        }))
        .unwrap();
        assert!(info.vendor_active);
    }
}
