//! # Return-To Navigation
//!
//! From the mapping table a user can jump to a new-record form for a
//! vendor attribute or a PIM attribute. After that record is saved the app
//! returns to the vendor's form. The continuation is carried in an
//! explicit [`NavigationContext`] owned by the router, and is consumed
//! only by a save of the matching record type.

use pim_core::VendorId;
use serde::{Deserialize, Serialize};

use crate::notify::Notification;

/// Record type created from the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreateTarget {
    #[serde(rename = "PIM Vendor Attribute")]
    VendorAttribute,
    #[serde(rename = "PIM Attribute")]
    PimAttribute,
}

impl CreateTarget {
    pub fn doctype(self) -> &'static str {
        match self {
            Self::VendorAttribute => "PIM Vendor Attribute",
            Self::PimAttribute => "PIM Attribute",
        }
    }

    fn saved_notice(self) -> &'static str {
        match self {
            Self::VendorAttribute => "Vendor Attribute created successfully. Returned to mapping table.",
            Self::PimAttribute => "PIM Attribute created successfully. Returned to mapping table.",
        }
    }
}

/// A screen to navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// The vendor's form, where the mapping table lives.
    VendorForm(VendorId),
    /// A blank form for a new record.
    NewRecord(CreateTarget),
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VendorForm(vendor) => write!(f, "Form/PIM Vendor/{vendor}"),
            Self::NewRecord(target) => write!(f, "Form/{}/new", target.doctype()),
        }
    }
}

/// Pending return to a vendor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnTo {
    pub vendor: VendorId,
    pub target: CreateTarget,
}

/// Where to go after a save, and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnNavigation {
    pub route: Route,
    pub notice: Notification,
}

/// Router-owned navigation memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationContext {
    return_to: Option<ReturnTo>,
}

impl NavigationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `vendor`'s mapping table to create a `target` record.
    /// Replaces any earlier continuation.
    pub fn begin_create(&mut self, vendor: VendorId, target: CreateTarget) -> Route {
        tracing::debug!(vendor = %vendor, doctype = target.doctype(), "remembering return-to");
        self.return_to = Some(ReturnTo { vendor, target });
        Route::NewRecord(target)
    }

    /// A `saved` record was stored. Consumes the continuation if it matches.
    pub fn after_save(&mut self, saved: CreateTarget) -> Option<ReturnNavigation> {
        match self.return_to.take() {
            Some(ret) if ret.target == saved => Some(ReturnNavigation {
                route: Route::VendorForm(ret.vendor),
                notice: Notification::success(saved.saved_notice()),
            }),
            other => {
                self.return_to = other;
                None
            }
        }
    }

    /// Abandon the continuation.
    pub fn cancel(&mut self) {
        self.return_to = None;
    }

    pub fn pending(&self) -> Option<&ReturnTo> {
        self.return_to.as_ref()
    }
}
