//! # pim-client — Typed Rust client for the Imperium PIM API
//!
//! Every server operation is a whitelisted method reached at
//! `POST {base_url}/api/method/{dotted.method.path}` and answered with the
//! framework's envelope (see [`envelope`]).
//!
//! Sub-clients group the methods by record:
//! - **Mapping** ([`mapping`]): attribute mapping data and updates, plus
//!   the [`MappingStore`] seam the mapping table is written against.
//! - **Items** ([`items`]): SKU uniqueness, vendor info, item listing.
//! - **Vendors** ([`vendors`]): vendor listing.
//! - **Attributes** ([`attributes`]): attribute listing, details and values.
//!
//! ## Retries
//!
//! Connection failures are retried with exponential backoff. Timeouts and
//! responses are never retried, so a mapping update reaches the server at
//! most once per call.

pub mod attributes;
pub mod config;
pub mod envelope;
pub mod error;
pub mod items;
pub mod mapping;
pub(crate) mod retry;
pub(crate) mod rpc;
pub mod types;
pub mod vendors;

pub use config::{ConfigError, PimApiConfig};
pub use envelope::{decode_envelope, ExceptionBody, MessageBody};
pub use error::PimApiError;
pub use mapping::{MappingData, MappingStore, PimAttributeOption, VendorAttributeRow};

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const PING: &str = "imperium_pim.api.ping.ping";

/// Health payload of the ping method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Top-level PIM API client. Holds sub-clients for each record group.
#[derive(Debug, Clone)]
pub struct PimClient {
    rpc: rpc::RpcTransport,
    mapping: mapping::MappingClient,
    items: items::ItemClient,
    vendors: vendors::VendorClient,
    attributes: attributes::AttributeClient,
}

impl PimClient {
    /// Create a new client from configuration.
    pub fn new(config: PimApiConfig) -> Result<Self, PimApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = &config.api_token {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(token)
                    .map_err(|_| PimApiError::Config(ConfigError::InvalidToken))?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| PimApiError::Http {
                method: "client_init".into(),
                source: e,
            })?;

        let rpc = rpc::RpcTransport::new(
            http,
            config.base_url,
            retry::Backoff::new(config.max_retries),
        );
        Ok(Self {
            mapping: mapping::MappingClient::new(rpc.clone()),
            items: items::ItemClient::new(rpc.clone()),
            vendors: vendors::VendorClient::new(rpc.clone()),
            attributes: attributes::AttributeClient::new(rpc.clone()),
            rpc,
        })
    }

    /// Access the attribute mapping client.
    pub fn mapping(&self) -> &mapping::MappingClient {
        &self.mapping
    }

    /// Access the item client.
    pub fn items(&self) -> &items::ItemClient {
        &self.items
    }

    /// Access the vendor client.
    pub fn vendors(&self) -> &vendors::VendorClient {
        &self.vendors
    }

    /// Access the PIM attribute client.
    pub fn attributes(&self) -> &attributes::AttributeClient {
        &self.attributes
    }

    /// Check that the API is reachable.
    pub async fn ping(&self) -> Result<PingResponse, PimApiError> {
        self.rpc.call(PING, &serde_json::json!({})).await
    }
}
