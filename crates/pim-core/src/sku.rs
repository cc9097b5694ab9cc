//! # SKU Derivation
//!
//! An item's SKU is derived, read-only, and always `{vendor_code}-{vendor_sku}`.
//!
//! While an item is unsaved the form shows the derived value as a
//! *preview*; once saved the same value becomes *committed* and the preview
//! styling goes away. Editing either source field on an unsaved item
//! recomputes the preview, and clearing either one clears it. A saved
//! item's SKU is never recomputed by the form.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::validate_upc;

/// Derive a SKU from its two sources. `None` if either source is empty.
pub fn derive_sku(vendor_code: &str, vendor_sku: &str) -> Option<String> {
    if vendor_code.is_empty() || vendor_sku.is_empty() {
        None
    } else {
        Some(format!("{vendor_code}-{vendor_sku}"))
    }
}

/// What the read-only SKU field displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", content = "value", rename_all = "snake_case")]
pub enum SkuDisplay {
    /// Nothing to show.
    Empty,
    /// Derived value on an unsaved item, rendered in the preview style.
    Preview(String),
    /// Persisted value, rendered normally.
    Committed(String),
}

impl SkuDisplay {
    /// The displayed text, regardless of style.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Preview(v) | Self::Committed(v) => Some(v),
        }
    }
}

/// Form state of the SKU field of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkuField {
    vendor_code: String,
    vendor_sku: String,
    value: Option<String>,
    is_preview: bool,
    saved: bool,
}

impl SkuField {
    /// Field state for a new, unsaved item.
    pub fn unsaved() -> Self {
        Self::default()
    }

    /// Field state for an item loaded from storage.
    pub fn saved(sku: Option<String>, vendor_code: &str, vendor_sku: &str) -> Self {
        Self {
            vendor_code: vendor_code.to_string(),
            vendor_sku: vendor_sku.to_string(),
            value: sku.filter(|s| !s.is_empty()),
            is_preview: false,
            saved: true,
        }
    }

    /// Update the vendor code source field.
    pub fn set_vendor_code(&mut self, vendor_code: impl Into<String>) {
        self.vendor_code = vendor_code.into();
        self.refresh_preview();
    }

    /// Update the vendor SKU source field.
    pub fn set_vendor_sku(&mut self, vendor_sku: impl Into<String>) {
        self.vendor_sku = vendor_sku.into();
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        if self.saved {
            return;
        }
        match derive_sku(&self.vendor_code, &self.vendor_sku) {
            Some(sku) => {
                self.value = Some(sku);
                self.is_preview = true;
            }
            None if self.is_preview => {
                self.value = None;
                self.is_preview = false;
            }
            None => {}
        }
    }

    /// Value to persist on save: the current value, or a freshly derived one.
    pub fn value_for_save(&self) -> Option<String> {
        self.value
            .clone()
            .or_else(|| derive_sku(&self.vendor_code, &self.vendor_sku))
    }

    /// Record a successful save. The value is kept and the preview style dropped.
    pub fn mark_saved(&mut self, persisted: Option<String>) {
        self.value = persisted.filter(|s| !s.is_empty());
        self.is_preview = false;
        self.saved = true;
    }

    /// Whether the item has been saved.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Current display state.
    pub fn display(&self) -> SkuDisplay {
        match (&self.value, self.is_preview) {
            (None, _) => SkuDisplay::Empty,
            (Some(v), true) => SkuDisplay::Preview(v.clone()),
            (Some(v), false) => SkuDisplay::Committed(v.clone()),
        }
    }
}

/// The item fields touched by the server-side save step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSaveFields {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub vendor_code: Option<String>,
    #[serde(default)]
    pub vendor_sku: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
}

impl ItemSaveFields {
    /// Apply the save rules in order: SKU generation, then UPC validation.
    ///
    /// A missing SKU is generated when both sources are present; an existing
    /// SKU is never overwritten. A non-empty UPC must validate and is stored
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUpc`] for a malformed UPC.
    pub fn apply_save_rules(&mut self) -> Result<(), ValidationError> {
        if self.sku.as_deref().map_or(true, str::is_empty) {
            if let Some(sku) = derive_sku(
                self.vendor_code.as_deref().unwrap_or_default(),
                self.vendor_sku.as_deref().unwrap_or_default(),
            ) {
                self.sku = Some(sku);
            }
        }
        if let Some(raw) = self.upc.as_deref().filter(|u| !u.is_empty()) {
            self.upc = Some(validate_upc(raw)?.as_str().to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_requires_both_sources() {
        assert_eq!(derive_sku("ACME", "001"), Some("ACME-001".to_string()));
        assert_eq!(derive_sku("", "001"), None);
        assert_eq!(derive_sku("ACME", ""), None);
    }

    #[test]
    fn unsaved_item_shows_preview() {
        let mut field = SkuField::unsaved();
        field.set_vendor_code("ACME");
        assert_eq!(field.display(), SkuDisplay::Empty);
        field.set_vendor_sku("001");
        assert_eq!(field.display(), SkuDisplay::Preview("ACME-001".into()));
    }

    #[test]
    fn preview_becomes_committed_after_save() {
        let mut field = SkuField::unsaved();
        field.set_vendor_code("ACME");
        field.set_vendor_sku("001");
        let value = field.value_for_save();
        field.mark_saved(value);
        assert_eq!(field.display(), SkuDisplay::Committed("ACME-001".into()));
        assert!(field.is_saved());
    }

    #[test]
    fn clearing_a_source_clears_the_preview() {
        let mut field = SkuField::unsaved();
        field.set_vendor_code("ACME");
        field.set_vendor_sku("001");
        field.set_vendor_code("");
        assert_eq!(field.display(), SkuDisplay::Empty);
        assert_eq!(field.display().value(), None);
    }

    #[test]
    fn preview_recomputes_on_each_change() {
        let mut field = SkuField::unsaved();
        field.set_vendor_code("ACME");
        field.set_vendor_sku("001");
        field.set_vendor_sku("002");
        assert_eq!(field.display(), SkuDisplay::Preview("ACME-002".into()));
    }

    #[test]
    fn saved_item_is_not_recomputed() {
        let mut field = SkuField::saved(Some("ACME-001".into()), "ACME", "001");
        field.set_vendor_code("");
        field.set_vendor_sku("999");
        assert_eq!(field.display(), SkuDisplay::Committed("ACME-001".into()));
    }

    #[test]
    fn save_rules_generate_missing_sku() {
        let mut item = ItemSaveFields {
            vendor_code: Some("ACME".into()),
            vendor_sku: Some("001".into()),
            ..Default::default()
        };
        item.apply_save_rules().unwrap();
        assert_eq!(item.sku.as_deref(), Some("ACME-001"));
    }

    #[test]
    fn save_rules_keep_existing_sku() {
        let mut item = ItemSaveFields {
            sku: Some("LEGACY-1".into()),
            vendor_code: Some("ACME".into()),
            vendor_sku: Some("001".into()),
            upc: None,
        };
        item.apply_save_rules().unwrap();
        assert_eq!(item.sku.as_deref(), Some("LEGACY-1"));
    }

    #[test]
    fn save_rules_trim_and_validate_upc() {
        let mut item = ItemSaveFields {
            upc: Some(" 123456789012 ".into()),
            ..Default::default()
        };
        item.apply_save_rules().unwrap();
        assert_eq!(item.upc.as_deref(), Some("123456789012"));

        let mut bad = ItemSaveFields {
            upc: Some("12345".into()),
            ..Default::default()
        };
        assert!(matches!(
            bad.apply_save_rules(),
            Err(ValidationError::InvalidUpc { length: 5, .. })
        ));
    }
}
