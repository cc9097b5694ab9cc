//! # Generated Codes
//!
//! Vendor attributes and attribute values get a URL-safe code derived from
//! their display name when the user leaves the code blank.
//!
//! `slugify` lowercases, turns every run of whitespace, `_` and `-` into a
//! single `-`, drops anything outside `[a-z0-9-]`, collapses repeated dashes
//! and trims dashes from both ends.

use crate::error::ValidationError;

/// Reduce a display name to a lowercase, dash-separated slug.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        }
        // Dropped characters neither break nor start a separator run.
    }
    out
}

/// `{prefix}-{slug}`. A name with no usable characters leaves a trailing dash.
fn prefixed(prefix: &str, name: &str) -> String {
    format!("{prefix}-{}", slugify(name))
}

/// Code for a vendor attribute: `{vendor_code}-{slug(name)}`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingCodeSource`] when the vendor code or
/// the attribute name is blank.
pub fn vendor_attribute_code(vendor_code: &str, name: &str) -> Result<String, ValidationError> {
    if vendor_code.trim().is_empty() || name.trim().is_empty() {
        return Err(ValidationError::MissingCodeSource(
            "Vendor and Vendor Attribute Name are required to generate code".to_string(),
        ));
    }
    Ok(prefixed(vendor_code.trim(), name))
}

/// Code for an attribute value: `{parent_code}-{slug(value_name)}`.
pub fn attribute_value_code(parent_code: &str, value_name: &str) -> String {
    prefixed(parent_code, value_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Primary Color"), "primary-color");
        assert_eq!(slugify("  Size_(US)  "), "size-us");
        assert_eq!(slugify("a -- b__c"), "a-b-c");
    }

    #[test]
    fn dropped_chars_do_not_split_words() {
        assert_eq!(slugify("Men's Wear"), "mens-wear");
        assert_eq!(slugify("50% off"), "50-off");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(slugify("--Weight--"), "weight");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn vendor_attribute_code_requires_sources() {
        assert_eq!(
            vendor_attribute_code("acme", "Primary Color").unwrap(),
            "acme-primary-color"
        );
        assert!(matches!(
            vendor_attribute_code("", "Color"),
            Err(ValidationError::MissingCodeSource(_))
        ));
        assert!(vendor_attribute_code("acme", "  ").is_err());
    }

    #[test]
    fn attribute_value_code_prefixes_parent() {
        assert_eq!(attribute_value_code("color", "Dark Blue"), "color-dark-blue");
    }

    #[test]
    fn unsluggable_name_keeps_separator() {
        assert_eq!(vendor_attribute_code("ACME", "!!!").unwrap(), "ACME-");
        assert_eq!(attribute_value_code("color", "%%"), "color-");
    }

    proptest! {
        #[test]
        fn slug_alphabet_and_shape(name in "\\PC{0,40}") {
            let slug = slugify(&name);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slugify_is_idempotent(name in "\\PC{0,40}") {
            let once = slugify(&name);
            prop_assert_eq!(slugify(&once), once);
        }
    }
}
