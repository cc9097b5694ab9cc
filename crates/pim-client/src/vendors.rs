//! Vendor listing.

use pim_core::VendorId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PimApiError;
use crate::rpc::RpcTransport;

pub const GET_VENDOR_LIST: &str = "imperium_pim.api.vendors.get_vendor_list";

/// Default number of vendors returned.
pub const DEFAULT_VENDOR_LIMIT: u32 = 50;

/// A vendor as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorSummary {
    pub id: VendorId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, with = "crate::types::flag")]
    pub active: bool,
    #[serde(default, with = "crate::types::flag")]
    pub integration_enabled: bool,
}

#[derive(Serialize)]
struct VendorListParams {
    limit: u32,
    #[serde(skip_serializing_if = "Map::is_empty")]
    filters: Map<String, Value>,
}

/// Client for vendor methods.
#[derive(Debug, Clone)]
pub struct VendorClient {
    rpc: RpcTransport,
}

impl VendorClient {
    pub(crate) fn new(rpc: RpcTransport) -> Self {
        Self { rpc }
    }

    /// List up to `limit` vendors, optionally only active or inactive ones.
    pub async fn list(
        &self,
        limit: u32,
        active: Option<bool>,
    ) -> Result<Vec<VendorSummary>, PimApiError> {
        let mut filters = Map::new();
        if let Some(active) = active {
            filters.insert("vendor_active".into(), Value::from(u8::from(active)));
        }
        self.rpc
            .call(GET_VENDOR_LIST, &VendorListParams { limit, filters })
            .await
    }
}
