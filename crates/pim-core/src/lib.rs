//! # pim-core — Foundational Types for Imperium PIM
//!
//! The leaf crate of the workspace. Everything that must behave identically
//! on the server (record save rules) and in the admin UI (live field
//! feedback) lives here.
//!
//! ## Contents
//!
//! - **Record names** ([`identity`]): `VendorId`, `VendorAttributeId`,
//!   `PimAttributeId`, `ItemName`. Non-empty by construction.
//! - **Field validators** ([`validation`]): attribute/vendor-attribute codes
//!   (`^[a-z0-9_]+$`) and 12-digit UPCs.
//! - **SKU derivation** ([`sku`]): `{vendor_code}-{vendor_sku}`, with the
//!   preview/committed display state of an item form.
//! - **Code slugs** ([`slug`]): generated codes for vendor attributes and
//!   attribute values.
//! - **Vendor auth fields** ([`vendor`]): which credential fields an auth
//!   type shows and requires.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pim-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod sku;
pub mod slug;
pub mod validation;
pub mod vendor;

pub use error::ValidationError;
pub use identity::{ItemName, PimAttributeId, VendorAttributeId, VendorId};
pub use sku::{derive_sku, ItemSaveFields, SkuDisplay, SkuField};
pub use slug::{attribute_value_code, slugify, vendor_attribute_code};
pub use validation::{code_feedback, invalid_code_chars, validate_code, validate_upc, FieldFeedback, Upc};
pub use vendor::{AuthFieldRules, VendorAuthType};
