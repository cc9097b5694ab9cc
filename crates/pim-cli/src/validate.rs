//! `pim validate`: offline field checks.

use clap::{Args, Subcommand};
use pim_core::{validate_code, validate_upc};

use crate::{EXIT_INVALID, EXIT_OK};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub target: ValidateTarget,
}

#[derive(Subcommand, Debug)]
pub enum ValidateTarget {
    /// Check an attribute code against `[a-z0-9_]+`.
    Code { code: String },
    /// Check a 12-digit UPC. Surrounding whitespace is ignored.
    Upc { upc: String },
}

/// Print the verdict; exit 2 when the value is invalid.
pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<u8> {
    let verdict = match &args.target {
        ValidateTarget::Code { code } => validate_code(code).map(|()| code.clone()),
        ValidateTarget::Upc { upc } => validate_upc(upc).map(|u| u.as_str().to_string()),
    };
    match verdict {
        Ok(value) => {
            println!("OK: {value}");
            Ok(EXIT_OK)
        }
        Err(e) => {
            println!("INVALID: {e}");
            Ok(EXIT_INVALID)
        }
    }
}
