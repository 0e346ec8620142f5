use serde::{Deserialize, Serialize};
use std::fmt;

/// A license as declared in a published artifact's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl License {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Stand-in for an artifact that declares no license at all.
    pub fn undeclared() -> Self {
        Self::new("")
    }
}

/// License family inferred from a license's name or URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LicenseType {
    Apache2,
    Bsd,
    Cddl,
    CreativeCommons,
    Eclipse,
    Gpl,
    Lgpl,
    Mit,
    Mpl,
    PublicDomain,
    Unknown,
}

impl LicenseType {
    /// SPDX identifier of the family's usual version, when there is one.
    pub fn spdx_id(&self) -> Option<&'static str> {
        match self {
            LicenseType::Apache2 => Some("Apache-2.0"),
            LicenseType::Cddl => Some("CDDL-1.0"),
            LicenseType::Eclipse => Some("EPL-2.0"),
            LicenseType::Mit => Some("MIT"),
            LicenseType::Mpl => Some("MPL-2.0"),
            _ => None,
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LicenseType::Apache2 => "Apache2",
            LicenseType::Bsd => "BSD",
            LicenseType::Cddl => "CDDL",
            LicenseType::CreativeCommons => "CreativeCommons",
            LicenseType::Eclipse => "Eclipse",
            LicenseType::Gpl => "GPL",
            LicenseType::Lgpl => "LGPL",
            LicenseType::Mit => "MIT",
            LicenseType::Mpl => "MPL",
            LicenseType::PublicDomain => "PublicDomain",
            LicenseType::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}
