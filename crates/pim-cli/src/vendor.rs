//! `pim vendor`: vendor listing and credential field rules.

use clap::{Args, Subcommand};
use pim_client::vendors::DEFAULT_VENDOR_LIMIT;
use pim_core::{AuthFieldRules, VendorAuthType};

use crate::{connect, EXIT_OK};

#[derive(Args, Debug)]
pub struct VendorArgs {
    #[command(subcommand)]
    pub action: VendorAction,
}

#[derive(Subcommand, Debug)]
pub enum VendorAction {
    /// List vendors, most recently modified first.
    List {
        #[arg(long, default_value_t = DEFAULT_VENDOR_LIMIT)]
        limit: u32,
        /// Only active vendors.
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        /// Only inactive vendors.
        #[arg(long)]
        inactive: bool,
    },
    /// Show which credential fields an auth type uses.
    AuthFields {
        /// One of: None, Basic, "Bearer Token", "API Key", OAuth2.
        auth_type: String,
    },
}

pub async fn run_vendor(args: &VendorArgs, base_url: Option<&str>) -> anyhow::Result<u8> {
    match &args.action {
        VendorAction::List {
            limit,
            active,
            inactive,
        } => {
            let filter = match (active, inactive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let vendors = connect(base_url)?.vendors().list(*limit, filter).await?;
            for v in vendors {
                println!(
                    "{:<12} {:<28} {}",
                    v.id,
                    v.name.unwrap_or_default(),
                    if v.active { "active" } else { "inactive" }
                );
            }
            Ok(EXIT_OK)
        }
        VendorAction::AuthFields { auth_type } => {
            println!("{}", describe_auth_fields(auth_type));
            Ok(EXIT_OK)
        }
    }
}

fn describe_auth_fields(label: &str) -> String {
    let auth_type = VendorAuthType::from_label(label);
    let rules = AuthFieldRules::for_auth_type(auth_type);
    let state = match (rules.visible, rules.required) {
        (true, true) => "shown, required",
        (true, false) => "shown, optional",
        (false, _) => "hidden",
    };
    format!("{auth_type}: username/password {state}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_requires_credentials() {
        assert_eq!(
            describe_auth_fields("Basic"),
            "Basic: username/password shown, required"
        );
    }

    #[test]
    fn other_types_hide_credentials() {
        assert_eq!(
            describe_auth_fields("API Key"),
            "API Key: username/password hidden"
        );
        assert_eq!(describe_auth_fields("bogus"), "None: username/password hidden");
    }
}
