//! # pim CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Offline commands (`validate`, `slug`, `sku preview`, `vendor auth-fields`)
//! never touch the network; the rest talk to the API at `--base-url` or
//! `PIM_API_BASE_URL`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pim_cli::attribute::{run_attribute, AttributeArgs};
use pim_cli::mapping::{run_mapping, MappingArgs};
use pim_cli::sku::{run_sku, SkuArgs};
use pim_cli::slug::{run_slug, SlugArgs};
use pim_cli::validate::{run_validate, ValidateArgs};
use pim_cli::vendor::{run_vendor, VendorArgs};
use pim_cli::{connect, EXIT_OK};

/// Imperium PIM command line.
///
/// Field validation, code generation, SKU checks and vendor attribute
/// mapping against an Imperium PIM server.
#[derive(Parser, Debug)]
#[command(name = "pim", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Server base URL. Overrides PIM_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check an attribute code or UPC.
    Validate(ValidateArgs),

    /// Generate a code slug from a display name.
    Slug(SlugArgs),

    /// Preview a derived SKU or check it is unique.
    Sku(SkuArgs),

    /// Show or edit vendor attribute mappings.
    Mapping(MappingArgs),

    /// List vendors or show credential field rules.
    Vendor(VendorArgs),

    /// List PIM attributes or show one with its values.
    Attribute(AttributeArgs),

    /// Check the server is reachable.
    Ping,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base_url = cli.base_url.as_deref();
    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Slug(args) => run_slug(&args),
        Commands::Sku(args) => run_sku(&args, base_url).await,
        Commands::Mapping(args) => run_mapping(&args, base_url).await,
        Commands::Vendor(args) => run_vendor(&args, base_url).await,
        Commands::Attribute(args) => run_attribute(&args, base_url).await,
        Commands::Ping => run_ping(base_url).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run_ping(base_url: Option<&str>) -> anyhow::Result<u8> {
    let pong = connect(base_url)?.ping().await?;
    println!(
        "{}: {} (version {})",
        pong.status,
        pong.message,
        pong.version.as_deref().unwrap_or("unknown")
    );
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pim_cli::attribute::AttributeAction;
    use pim_cli::mapping::MappingAction;
    use pim_cli::sku::SkuAction;
    use pim_cli::validate::ValidateTarget;
    use pim_cli::vendor::VendorAction;

    #[test]
    fn cli_parse_validate_code() {
        let cli = Cli::try_parse_from(["pim", "validate", "code", "seat_height"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert!(matches!(args.target, ValidateTarget::Code { ref code } if code == "seat_height"));
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_slug_with_prefix() {
        let cli = Cli::try_parse_from(["pim", "slug", "Frame Colour", "--prefix", "ACME"]).unwrap();
        if let Commands::Slug(args) = cli.command {
            assert_eq!(args.name, "Frame Colour");
            assert_eq!(args.prefix.as_deref(), Some("ACME"));
        } else {
            panic!("expected slug");
        }
    }

    #[test]
    fn cli_parse_sku_check_with_exclude() {
        let cli =
            Cli::try_parse_from(["pim", "sku", "check", "ACME-001", "--exclude", "ACME-001"]).unwrap();
        if let Commands::Sku(args) = cli.command {
            assert!(matches!(
                args.action,
                SkuAction::Check { ref sku, exclude: Some(ref e) } if sku == "ACME-001" && e == "ACME-001"
            ));
        } else {
            panic!("expected sku");
        }
    }

    #[test]
    fn cli_parse_mapping_set_without_target_clears() {
        let cli = Cli::try_parse_from([
            "pim",
            "mapping",
            "set",
            "--vendor",
            "ACME",
            "--vendor-attribute",
            "VA-0001",
        ])
        .unwrap();
        if let Commands::Mapping(args) = cli.command {
            assert!(matches!(
                args.action,
                MappingAction::Set { pim_attribute: None, .. }
            ));
        } else {
            panic!("expected mapping");
        }
    }

    #[test]
    fn cli_parse_global_base_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pim",
            "mapping",
            "show",
            "--vendor",
            "ACME",
            "--unmapped-only",
            "--base-url",
            "http://localhost:9000",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.verbose, 2);
        if let Commands::Mapping(args) = cli.command {
            assert!(matches!(
                args.action,
                MappingAction::Show { unmapped_only: true, json: false, .. }
            ));
        }
    }

    #[test]
    fn cli_parse_vendor_list_flags_conflict() {
        assert!(Cli::try_parse_from(["pim", "vendor", "list", "--active", "--inactive"]).is_err());
        let cli = Cli::try_parse_from(["pim", "vendor", "list", "--inactive"]).unwrap();
        if let Commands::Vendor(args) = cli.command {
            assert!(matches!(
                args.action,
                VendorAction::List { inactive: true, active: false, limit: 50 }
            ));
        }
    }

    #[test]
    fn cli_parse_attribute_list_and_show() {
        let cli = Cli::try_parse_from(["pim", "attribute", "list", "--code", "color"]).unwrap();
        if let Commands::Attribute(args) = cli.command {
            assert!(matches!(
                args.action,
                AttributeAction::List { limit: 50, code: Some(ref c), json: false } if c == "color"
            ));
        } else {
            panic!("expected attribute");
        }

        let cli = Cli::try_parse_from(["pim", "attribute", "show", "finish", "--json"]).unwrap();
        if let Commands::Attribute(args) = cli.command {
            assert!(matches!(
                args.action,
                AttributeAction::Show { ref id, json: true } if id == "finish"
            ));
        } else {
            panic!("expected attribute");
        }
    }

    #[test]
    fn cli_parse_ping() {
        let cli = Cli::try_parse_from(["pim", "ping"]).unwrap();
        assert!(matches!(cli.command, Commands::Ping));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["pim"]).is_err());
    }
}
