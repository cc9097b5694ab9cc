//! Demo dataset for local development.
//!
//! Two vendors, a handful of canonical attributes with some values, vendor
//! attributes for the active vendor with one link already in place, and a
//! couple of items.

use chrono::{Duration, Utc};
use pim_client::attributes::AttributeValueRecord;
use pim_client::items::ItemRecord;
use pim_client::mapping::VendorAttributeRecord;
use pim_client::PimAttributeOption;
use pim_core::{
    attribute_value_code, vendor_attribute_code, ItemName, PimAttributeId, ValidationError,
    VendorAttributeId, VendorAuthType, VendorId,
};

use crate::store::{AppState, StoredAttribute, StoredItem, StoredValue, VendorRecord};

const PIM_ATTRIBUTES: [(&str, &str); 5] = [
    ("color", "Color"),
    ("material", "Material"),
    ("finish", "Finish"),
    ("seat_height", "Seat Height"),
    ("assembly_required", "Assembly Required"),
];

const ATTRIBUTE_VALUES: [(&str, &[&str]); 2] = [
    ("color", &["Espresso", "Natural Oak", "White"]),
    ("finish", &["Matte", "High Gloss"]),
];

const ACME_ATTRIBUTES: [&str; 4] = ["Frame Colour", "Wood Species", "Seat Height (in)", "Finish Type"];

/// Load the demo dataset into `state`.
///
/// # Errors
///
/// Only if a built-in record name fails validation.
pub fn load(state: &AppState) -> Result<(), ValidationError> {
    let now = Utc::now();
    for (offset, (code, name, active, auth)) in [
        ("ACME", "Acme Furniture", true, VendorAuthType::Basic),
        ("GLOBEX", "Globex Home", false, VendorAuthType::ApiKey),
    ]
    .into_iter()
    .enumerate()
    {
        let id = VendorId::new(code)?;
        state.vendors().insert(
            id.clone(),
            VendorRecord {
                name: id,
                vendor_name: name.to_string(),
                vendor_code: code.to_string(),
                vendor_active: active,
                vendor_integration_enabled: active,
                vendor_api_auth_type: auth,
                modified: now - Duration::minutes(offset as i64),
            },
        );
    }

    for (code, label) in PIM_ATTRIBUTES {
        let id = PimAttributeId::new(code)?;
        state.pim_attributes().insert(
            id.clone(),
            StoredAttribute::new(
                PimAttributeOption {
                    name: id,
                    attribute_name: label.to_string(),
                    attribute_code: Some(code.to_string()),
                },
                now,
            ),
        );
    }

    let acme = VendorId::new("ACME")?;
    let mut first = None;
    for label in ACME_ATTRIBUTES {
        let name = VendorAttributeId::new(state.next_name("VA"))?;
        state.vendor_attributes().insert(
            name.clone(),
            VendorAttributeRecord {
                name: name.clone(),
                pim_vendor: acme.clone(),
                vendor_attribute_name: label.to_string(),
                vendor_attribute_code: vendor_attribute_code("ACME", label)?,
            },
        );
        if first.is_none() {
            first = Some(name);
        }
    }
    if let Some(row) = first {
        state
            .mappings()
            .insert((acme, row), PimAttributeId::new("color")?);
    }

    for (sku, title, upc) in [
        ("1001", "Windsor Side Chair", Some("012345678905")),
        ("1002", "Trestle Dining Table", None),
    ] {
        let mut record = ItemRecord {
            name1: Some(title.to_string()),
            brand: Some("Acme".to_string()),
            status: Some("Active".to_string()),
            vendor_code: Some("ACME".to_string()),
            vendor_sku: Some(sku.to_string()),
            upc: upc.map(str::to_string),
            ..Default::default()
        };
        record.apply_save_rules()?;
        let name = ItemName::new(record.sku.clone().unwrap_or_default())?;
        record.name = Some(name.clone());
        state.items().insert(
            name,
            StoredItem {
                record,
                modified: now,
            },
        );
    }

    for (parent, labels) in ATTRIBUTE_VALUES {
        let parent_id = PimAttributeId::new(parent)?;
        for label in labels {
            let name = state.next_name("PAV");
            state.attribute_values().insert(
                name.clone(),
                StoredValue {
                    record: AttributeValueRecord {
                        name,
                        pim_attribute: parent_id.clone(),
                        attribute_value_name: label.to_string(),
                        attribute_value_code: attribute_value_code(parent, label),
                    },
                    created: now,
                    modified: now,
                },
            );
        }
    }

    tracing::info!(
        vendors = state.vendors().len(),
        pim_attributes = state.pim_attributes().len(),
        attribute_values = state.attribute_values().len(),
        vendor_attributes = state.vendor_attributes().len(),
        items = state.items().len(),
        "demo data loaded"
    );
    Ok(())
}
