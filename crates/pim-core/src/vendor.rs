//! Vendor API credential field rules.

use serde::{Deserialize, Serialize};

/// How a vendor's API authenticates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorAuthType {
    #[default]
    None,
    Basic,
    #[serde(rename = "Bearer Token")]
    BearerToken,
    #[serde(rename = "API Key")]
    ApiKey,
    #[serde(rename = "OAuth2")]
    OAuth2,
}

impl VendorAuthType {
    /// Parse the form's select value. Unknown or blank values mean `None`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Basic" => Self::Basic,
            "Bearer Token" | "Bearer" => Self::BearerToken,
            "API Key" | "ApiKey" => Self::ApiKey,
            "OAuth2" => Self::OAuth2,
            _ => Self::None,
        }
    }

    /// Whether this scheme uses a username and password.
    pub fn uses_basic_credentials(self) -> bool {
        matches!(self, Self::Basic)
    }
}

impl std::fmt::Display for VendorAuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "None",
            Self::Basic => "Basic",
            Self::BearerToken => "Bearer Token",
            Self::ApiKey => "API Key",
            Self::OAuth2 => "OAuth2",
        };
        f.write_str(s)
    }
}

/// Visibility and required-ness of the username/password fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFieldRules {
    pub visible: bool,
    pub required: bool,
}

impl AuthFieldRules {
    /// Rules for the credential fields under `auth_type`.
    pub fn for_auth_type(auth_type: VendorAuthType) -> Self {
        let basic = auth_type.uses_basic_credentials();
        Self {
            visible: basic,
            required: basic,
        }
    }
}
