//! `pim sku`: derived SKU preview and remote uniqueness check.

use clap::{Args, Subcommand};
use pim_client::PimApiError;
use pim_core::{derive_sku, ItemName};

use crate::{connect, EXIT_INVALID, EXIT_OK};

#[derive(Args, Debug)]
pub struct SkuArgs {
    #[command(subcommand)]
    pub action: SkuAction,
}

#[derive(Subcommand, Debug)]
pub enum SkuAction {
    /// Print `{vendor_code}-{vendor_sku}`.
    Preview {
        #[arg(long)]
        vendor_code: String,
        #[arg(long)]
        vendor_sku: String,
    },
    /// Ask the server whether a SKU is free.
    Check {
        sku: String,
        /// Item to ignore, e.g. the one being edited.
        #[arg(long)]
        exclude: Option<String>,
    },
}

pub async fn run_sku(args: &SkuArgs, base_url: Option<&str>) -> anyhow::Result<u8> {
    match &args.action {
        SkuAction::Preview {
            vendor_code,
            vendor_sku,
        } => match derive_sku(vendor_code, vendor_sku) {
            Some(sku) => {
                println!("{sku}");
                Ok(EXIT_OK)
            }
            None => {
                println!("INVALID: vendor code and vendor SKU are both required");
                Ok(EXIT_INVALID)
            }
        },
        SkuAction::Check { sku, exclude } => {
            let client = connect(base_url)?;
            let exclude = exclude.as_deref().map(ItemName::new).transpose()?;
            match client.items().check_sku(sku, exclude.as_ref()).await {
                Ok(check) => {
                    let message = check.message.unwrap_or_else(|| "SKU is available".into());
                    if check.valid {
                        println!("OK: {message}");
                        Ok(EXIT_OK)
                    } else {
                        println!("TAKEN: {message}");
                        Ok(EXIT_INVALID)
                    }
                }
                Err(e @ PimApiError::Rejected { .. }) => {
                    println!("ERROR: {}", e.user_message());
                    Ok(EXIT_INVALID)
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
