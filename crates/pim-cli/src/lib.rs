//! # pim-cli — Imperium PIM Command Line
//!
//! Subcommand handlers for the `pim` binary. Each handler returns the
//! process exit code on success:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success, or the checked value is valid |
//! | 1 | Error (reported by the binary) |
//! | 2 | The checked value is invalid or the remote rejected the request |

pub mod attribute;
pub mod mapping;
pub mod sku;
pub mod slug;
pub mod validate;
pub mod vendor;

use pim_client::{PimApiConfig, PimClient};

pub const EXIT_OK: u8 = 0;
pub const EXIT_INVALID: u8 = 2;

/// Build a client from the environment, with an optional base URL override.
pub fn connect(base_url: Option<&str>) -> anyhow::Result<PimClient> {
    let mut config = PimApiConfig::from_env()?;
    if let Some(url) = base_url {
        config.base_url = PimApiConfig::for_base_url(url)?.base_url;
    }
    tracing::debug!(?config, "connecting");
    Ok(PimClient::new(config)?)
}
