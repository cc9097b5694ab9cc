//! PIM attribute listing, details and values.
//!
//! Timestamps are passed through as the server formats them.

use pim_core::PimAttributeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PimApiError;
use crate::rpc::RpcTransport;

pub const GET_ATTRIBUTE_LIST: &str = "imperium_pim.api.attributes.get_attribute_list";
pub const GET_ATTRIBUTE_DETAILS: &str = "imperium_pim.api.attributes.get_attribute_details";
pub const GET_ATTRIBUTE_VALUES: &str = "imperium_pim.api.attributes.get_attribute_values";
pub const INSERT_ATTRIBUTE_VALUE: &str = "imperium_pim.api.insert_pim_attribute_value";

/// Default number of attributes returned.
pub const DEFAULT_ATTRIBUTE_LIMIT: u32 = 50;

/// Default number of attribute values returned.
pub const DEFAULT_VALUE_LIMIT: u32 = 100;

/// An attribute as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSummary {
    pub id: PimAttributeId,
    pub name: String,
    #[serde(default)]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub values_count: u64,
    /// Modification date formatted for display.
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub creation: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// A value as listed under its attribute's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRef {
    pub name: String,
    #[serde(default)]
    pub attribute_value_name: Option<String>,
    #[serde(default)]
    pub creation: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// One attribute with all of its values, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDetails {
    pub id: PimAttributeId,
    pub name: String,
    #[serde(default)]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub values: Vec<ValueRef>,
    #[serde(default)]
    pub values_count: u64,
    #[serde(default)]
    pub creation: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// An attribute value as shown in the value listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: String,
    pub name: String,
    /// The parent attribute.
    pub attribute_name: PimAttributeId,
    #[serde(default)]
    pub attribute_value_name: Option<String>,
    #[serde(default)]
    pub attribute_value_code: Option<String>,
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub creation: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// Input of `insert_pim_attribute_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttributeValue {
    pub pim_attribute: PimAttributeId,
    pub attribute_value_name: String,
    /// Generated from the parent code and value name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_value_code: Option<String>,
}

/// A stored attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValueRecord {
    pub name: String,
    pub pim_attribute: PimAttributeId,
    pub attribute_value_name: String,
    pub attribute_value_code: String,
}

#[derive(Serialize)]
struct AttributeListParams<'a> {
    limit: u32,
    #[serde(skip_serializing_if = "Map::is_empty")]
    filters: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct AttributeIdParams<'a> {
    attribute_id: &'a PimAttributeId,
}

#[derive(Serialize)]
struct ValueListParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute_id: Option<&'a PimAttributeId>,
    limit: u32,
}

/// Client for PIM attribute methods.
#[derive(Debug, Clone)]
pub struct AttributeClient {
    rpc: RpcTransport,
}

impl AttributeClient {
    pub(crate) fn new(rpc: RpcTransport) -> Self {
        Self { rpc }
    }

    /// List up to `limit` attributes, most recently modified first.
    ///
    /// The server answers an unusable filter with an empty list rather
    /// than an error.
    pub async fn list(
        &self,
        limit: u32,
        filters: &Map<String, Value>,
    ) -> Result<Vec<AttributeSummary>, PimApiError> {
        self.rpc
            .call(GET_ATTRIBUTE_LIST, &AttributeListParams { limit, filters })
            .await
    }

    /// Details of one attribute, or `None` when it does not exist.
    pub async fn details(
        &self,
        attribute: &PimAttributeId,
    ) -> Result<Option<AttributeDetails>, PimApiError> {
        self.rpc
            .call(
                GET_ATTRIBUTE_DETAILS,
                &AttributeIdParams {
                    attribute_id: attribute,
                },
            )
            .await
    }

    /// Values of one attribute, or of all attributes when `attribute` is `None`.
    pub async fn values(
        &self,
        attribute: Option<&PimAttributeId>,
        limit: u32,
    ) -> Result<Vec<AttributeValue>, PimApiError> {
        self.rpc
            .call(
                GET_ATTRIBUTE_VALUES,
                &ValueListParams {
                    attribute_id: attribute,
                    limit,
                },
            )
            .await
    }

    /// Create an attribute value.
    pub async fn insert_value(
        &self,
        new: &NewAttributeValue,
    ) -> Result<AttributeValueRecord, PimApiError> {
        self.rpc.call(INSERT_ATTRIBUTE_VALUE, new).await
    }
}
