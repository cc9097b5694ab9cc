//! # Attribute Mapping Calls
//!
//! The remote Mapping Store: per-vendor links from vendor attributes to
//! canonical PIM attributes, plus record creation for both attribute kinds.
//!
//! | Method | Operation |
//! |--------|-----------|
//! | `...pim_vendor.get_attribute_mapping_data` | Rows, directory and current links for a vendor |
//! | `...pim_vendor.update_attribute_mapping` | Create, update or remove one link |
//! | `imperium_pim.api.insert_vendor_attribute` | Create a vendor attribute |
//! | `imperium_pim.api.insert_pim_attribute` | Create a PIM attribute |
//!
//! [`MappingStore`] is the seam the mapping table is written against;
//! [`MappingClient`] implements it over HTTP.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use pim_core::{PimAttributeId, VendorAttributeId, VendorId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PimApiError;
use crate::rpc::RpcTransport;

pub const GET_MAPPING_DATA: &str =
    "imperium_pim.pim.doctype.pim_vendor.pim_vendor.get_attribute_mapping_data";
pub const UPDATE_MAPPING: &str =
    "imperium_pim.pim.doctype.pim_vendor.pim_vendor.update_attribute_mapping";
pub const INSERT_VENDOR_ATTRIBUTE: &str = "imperium_pim.api.insert_vendor_attribute";
pub const INSERT_PIM_ATTRIBUTE: &str = "imperium_pim.api.insert_pim_attribute";

// -- Records -----------------------------------------------------------------

/// One vendor attribute, i.e. one row of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAttributeRow {
    pub name: VendorAttributeId,
    #[serde(default)]
    pub vendor_attribute_name: String,
    #[serde(default)]
    pub vendor_attribute_code: Option<String>,
}

impl VendorAttributeRow {
    /// Display text for the row.
    pub fn label(&self) -> &str {
        if self.vendor_attribute_name.is_empty() {
            self.name.as_str()
        } else {
            &self.vendor_attribute_name
        }
    }
}

/// One canonical attribute in the directory of mapping targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PimAttributeOption {
    pub name: PimAttributeId,
    #[serde(default)]
    pub attribute_name: String,
    #[serde(default)]
    pub attribute_code: Option<String>,
}

impl PimAttributeOption {
    /// Display text, falling back to the record name.
    pub fn label(&self) -> &str {
        if self.attribute_name.is_empty() {
            self.name.as_str()
        } else {
            &self.attribute_name
        }
    }
}

/// Everything the mapping table needs for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingData {
    #[serde(default)]
    pub vendor_attributes: Vec<VendorAttributeRow>,
    #[serde(default)]
    pub pim_attributes: Vec<PimAttributeOption>,
    /// Current links keyed by vendor attribute. Blank entries are dropped.
    #[serde(default, deserialize_with = "non_blank_links")]
    pub mappings: BTreeMap<VendorAttributeId, PimAttributeId>,
}

impl MappingData {
    /// Target the given row is linked to, if any.
    pub fn mapped_to(&self, row: &VendorAttributeId) -> Option<&PimAttributeId> {
        self.mappings.get(row)
    }

    /// Look up a directory entry.
    pub fn option(&self, id: &PimAttributeId) -> Option<&PimAttributeOption> {
        self.pim_attributes.iter().find(|o| &o.name == id)
    }
}

fn non_blank_links<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<VendorAttributeId, PimAttributeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| {
            let row = VendorAttributeId::new(k).ok()?;
            let target = PimAttributeId::new(v?).ok()?;
            Some((row, target))
        })
        .collect())
}

/// Result payload of `update_attribute_mapping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMappingResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateMappingResponse {
    /// A successful outcome carrying the server's message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    /// A failed outcome carrying the server's error text.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Convert to the success message, or [`PimApiError::Rejected`].
    pub fn into_result(self) -> Result<String, PimApiError> {
        if self.success {
            Ok(self.message.unwrap_or_default())
        } else {
            Err(PimApiError::Rejected {
                method: UPDATE_MAPPING.to_string(),
                message: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| "Error updating mapping".to_string()),
            })
        }
    }
}

/// Input of `insert_vendor_attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVendorAttribute {
    pub pim_vendor: VendorId,
    pub vendor_attribute_name: String,
    /// Generated from the vendor code and name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_attribute_code: Option<String>,
}

/// A stored vendor attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAttributeRecord {
    pub name: VendorAttributeId,
    pub pim_vendor: VendorId,
    pub vendor_attribute_name: String,
    pub vendor_attribute_code: String,
}

/// Input of `insert_pim_attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPimAttribute {
    pub attribute_name: String,
    pub attribute_code: String,
}

// -- Store seam --------------------------------------------------------------

/// Remote get/set of vendor-attribute → PIM-attribute links.
pub trait MappingStore: Send + Sync {
    /// Fetch rows, directory and current links for `vendor`.
    fn fetch_mapping_data(
        &self,
        vendor: &VendorId,
        show_unmapped_only: bool,
    ) -> impl Future<Output = Result<MappingData, PimApiError>> + Send;

    /// Link `vendor_attribute` to `pim_attribute`, or unlink it with `None`.
    ///
    /// Returns the server's confirmation message. A `success: false`
    /// payload is reported as [`PimApiError::Rejected`].
    fn update_mapping(
        &self,
        vendor: &VendorId,
        vendor_attribute: &VendorAttributeId,
        pim_attribute: Option<&PimAttributeId>,
    ) -> impl Future<Output = Result<String, PimApiError>> + Send;
}

impl<S: MappingStore> MappingStore for Arc<S> {
    fn fetch_mapping_data(
        &self,
        vendor: &VendorId,
        show_unmapped_only: bool,
    ) -> impl Future<Output = Result<MappingData, PimApiError>> + Send {
        (**self).fetch_mapping_data(vendor, show_unmapped_only)
    }

    fn update_mapping(
        &self,
        vendor: &VendorId,
        vendor_attribute: &VendorAttributeId,
        pim_attribute: Option<&PimAttributeId>,
    ) -> impl Future<Output = Result<String, PimApiError>> + Send {
        (**self).update_mapping(vendor, vendor_attribute, pim_attribute)
    }
}

// -- Client ------------------------------------------------------------------

#[derive(Serialize)]
struct MappingDataParams<'a> {
    vendor: &'a VendorId,
    show_unmapped_only: u8,
}

#[derive(Serialize)]
struct UpdateMappingParams<'a> {
    vendor: &'a VendorId,
    vendor_attribute: &'a VendorAttributeId,
    pim_attribute: &'a str,
}

/// Client for the attribute mapping methods.
#[derive(Debug, Clone)]
pub struct MappingClient {
    rpc: RpcTransport,
}

impl MappingClient {
    pub(crate) fn new(rpc: RpcTransport) -> Self {
        Self { rpc }
    }

    /// Create a vendor attribute.
    pub async fn insert_vendor_attribute(
        &self,
        new: &NewVendorAttribute,
    ) -> Result<VendorAttributeRecord, PimApiError> {
        self.rpc.call(INSERT_VENDOR_ATTRIBUTE, new).await
    }

    /// Create a PIM attribute. The code is validated server-side.
    pub async fn insert_pim_attribute(
        &self,
        new: &NewPimAttribute,
    ) -> Result<PimAttributeOption, PimApiError> {
        self.rpc.call(INSERT_PIM_ATTRIBUTE, new).await
    }
}

impl MappingStore for MappingClient {
    async fn fetch_mapping_data(
        &self,
        vendor: &VendorId,
        show_unmapped_only: bool,
    ) -> Result<MappingData, PimApiError> {
        let params = MappingDataParams {
            vendor,
            show_unmapped_only: u8::from(show_unmapped_only),
        };
        self.rpc.call(GET_MAPPING_DATA, &params).await
    }

    async fn update_mapping(
        &self,
        vendor: &VendorId,
        vendor_attribute: &VendorAttributeId,
        pim_attribute: Option<&PimAttributeId>,
    ) -> Result<String, PimApiError> {
        let params = UpdateMappingParams {
            vendor,
            vendor_attribute,
            pim_attribute: pim_attribute.map_or("", PimAttributeId::as_str),
        };
        let resp: UpdateMappingResponse = self.rpc.call(UPDATE_MAPPING, &params).await?;
        resp.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_data_drops_blank_links() {
        let data: MappingData = serde_json::from_value(json!({
            "vendor_attributes": [
                {"name": "VA-1", "vendor_attribute_name": "Colour", "vendor_attribute_code": "acme-colour"}
            ],
            "pim_attributes": [{"name": "color", "attribute_name": "Color"}],
            "mappings": {"VA-1": "color", "VA-2": "", "VA-3": null}
        }))
        .unwrap();
        assert_eq!(data.mappings.len(), 1);
        let row = VendorAttributeId::new("VA-1").unwrap();
        let target = data.mapped_to(&row).unwrap();
        assert_eq!(data.option(target).unwrap().label(), "Color");
    }

    #[test]
    fn labels_fall_back_to_names() {
        let opt = PimAttributeOption {
            name: PimAttributeId::new("size").unwrap(),
            attribute_name: String::new(),
            attribute_code: None,
        };
        assert_eq!(opt.label(), "size");
    }

    #[test]
    fn failed_update_becomes_rejected() {
        let err = UpdateMappingResponse::failed("Error updating mapping: nope")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PimApiError::Rejected { .. }));
        assert_eq!(err.user_message(), "Error updating mapping: nope");

        let ok = UpdateMappingResponse::ok("Attribute mapping created successfully");
        assert_eq!(
            ok.into_result().unwrap(),
            "Attribute mapping created successfully"
        );
    }

    #[test]
    fn update_params_send_empty_string_to_clear() {
        let vendor = VendorId::new("acme").unwrap();
        let row = VendorAttributeId::new("VA-1").unwrap();
        let params = UpdateMappingParams {
            vendor: &vendor,
            vendor_attribute: &row,
            pim_attribute: "",
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"vendor": "acme", "vendor_attribute": "VA-1", "pim_attribute": ""})
        );
    }
}
