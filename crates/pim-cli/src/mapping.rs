//! `pim mapping`: render and edit a vendor's attribute mapping table.

use clap::{Args, Subcommand};
use pim_core::{PimAttributeId, VendorAttributeId, VendorId};
use pim_state::{CommitOutcome, MappingTable, RowView};

use crate::{connect, EXIT_INVALID, EXIT_OK};

#[derive(Args, Debug)]
pub struct MappingArgs {
    #[command(subcommand)]
    pub action: MappingAction,
}

#[derive(Subcommand, Debug)]
pub enum MappingAction {
    /// Print the mapping table for a vendor.
    Show {
        #[arg(long)]
        vendor: String,
        /// Hide rows that already have a link.
        #[arg(long)]
        unmapped_only: bool,
        /// Emit JSON rows instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Link a vendor attribute to a PIM attribute, or clear the link.
    Set {
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        vendor_attribute: String,
        /// Target PIM attribute. Omit to clear.
        #[arg(long)]
        pim_attribute: Option<String>,
    },
}

pub async fn run_mapping(args: &MappingArgs, base_url: Option<&str>) -> anyhow::Result<u8> {
    let client = connect(base_url)?;
    match &args.action {
        MappingAction::Show {
            vendor,
            unmapped_only,
            json,
        } => {
            let mut table = MappingTable::new(client.mapping().clone(), VendorId::new(vendor.as_str())?);
            table.load(*unmapped_only).await?;
            let rows = table.view();
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_table(&rows));
            }
            Ok(EXIT_OK)
        }
        MappingAction::Set {
            vendor,
            vendor_attribute,
            pim_attribute,
        } => {
            let row = VendorAttributeId::new(vendor_attribute.as_str())?;
            let target = pim_attribute
                .as_deref()
                .map(PimAttributeId::new)
                .transpose()?;
            let mut table = MappingTable::new(client.mapping().clone(), VendorId::new(vendor.as_str())?);
            table.load(false).await?;
            let code = match table.select_and_commit(&row, target).await? {
                CommitOutcome::Committed { message } => {
                    println!("OK: {message}");
                    EXIT_OK
                }
                CommitOutcome::Failed { message } => {
                    println!("FAILED: {message}");
                    EXIT_INVALID
                }
                CommitOutcome::Stale => {
                    println!("FAILED: response arrived after the table was reloaded");
                    EXIT_INVALID
                }
            };
            for note in table.drain_notifications() {
                tracing::debug!(indicator = ?note.indicator, message = %note.message, "notification");
            }
            Ok(code)
        }
    }
}

/// Two-column text rendering: vendor attribute, then its PIM attribute.
fn render_table(rows: &[RowView]) -> String {
    if rows.is_empty() {
        return "No vendor attributes found.\n".to_string();
    }
    let width = rows
        .iter()
        .map(|r| r.vendor_attribute_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Vendor Attribute".len());
    let mut out = format!("{:<width$}  PIM Attribute\n", "Vendor Attribute");
    for row in rows {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            row.vendor_attribute_name, row.pim_attribute_label
        ));
    }
    out
}
