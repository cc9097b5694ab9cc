//! `pim slug`: generated code preview.

use clap::Args;
use pim_core::{slugify, vendor_attribute_code};

use crate::EXIT_OK;

#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Display name to slug.
    pub name: String,

    /// Vendor code to prefix, producing a vendor attribute code.
    #[arg(long)]
    pub prefix: Option<String>,
}

pub fn run_slug(args: &SlugArgs) -> anyhow::Result<u8> {
    println!("{}", render(args)?);
    Ok(EXIT_OK)
}

fn render(args: &SlugArgs) -> anyhow::Result<String> {
    Ok(match &args.prefix {
        Some(prefix) => vendor_attribute_code(prefix, &args.name)?,
        None => slugify(&args.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_slug() {
        let args = SlugArgs {
            name: "Seat Height (in)".into(),
            prefix: None,
        };
        assert_eq!(render(&args).unwrap(), "seat-height-in");
    }

    #[test]
    fn prefixed_slug() {
        let args = SlugArgs {
            name: "Frame_Colour".into(),
            prefix: Some("ACME".into()),
        };
        assert_eq!(render(&args).unwrap(), "ACME-frame-colour");
    }

    #[test]
    fn prefix_needs_a_name() {
        let args = SlugArgs {
            name: "  ".into(),
            prefix: Some("ACME".into()),
        };
        assert!(render(&args).is_err());
    }
}
