// Region-scoped endpoint resolution
//
// The Akuvox cloud is sharded by region: each region code selects the
// cluster behind `api.{subdomain}.akuvox.com`. The set is closed --
// anything outside it fails at construction, before any network I/O.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::Error;

/// Fixed domain suffix shared by all regional clusters.
pub const BASE_DOMAIN: &str = "akuvox.com";

/// Region code selecting which cloud cluster serves a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subdomain {
    /// Americas cluster (`ucloud`).
    America,
    /// Asia-Pacific cluster (`scloud`).
    Asia,
    /// China cluster (`ccloud`).
    China,
    /// Europe cluster (`ecloud`).
    Europe,
    /// Vendor staging cluster (`dev39`).
    Dev,
}

impl Subdomain {
    /// Every known region code.
    pub const ALL: [Self; 5] = [
        Self::America,
        Self::Asia,
        Self::China,
        Self::Europe,
        Self::Dev,
    ];

    /// The wire-level subdomain segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::America => "ucloud",
            Self::Asia => "scloud",
            Self::China => "ccloud",
            Self::Europe => "ecloud",
            Self::Dev => "dev39",
        }
    }

    /// Resolve the cluster base URL: `https://api.{subdomain}.akuvox.com`.
    pub fn base_url(self) -> Url {
        let raw = format!("https://api.{}.{BASE_DOMAIN}", self.as_str());
        Url::parse(&raw).expect("region base URL is statically valid")
    }
}

impl FromStr for Subdomain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| Error::InvalidSubdomain {
                subdomain: s.to_owned(),
            })
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_for_every_region() {
        for region in Subdomain::ALL {
            assert_eq!(
                region.base_url().as_str(),
                format!("https://api.{}.akuvox.com/", region.as_str())
            );
        }
    }

    #[test]
    fn parse_round_trips() {
        for region in Subdomain::ALL {
            assert_eq!(region.as_str().parse::<Subdomain>().ok(), Some(region));
        }
    }

    #[test]
    fn parse_rejects_unknown_subdomain() {
        for bad in ["", "invalid", "ucloud ", "UCLOUD", "api.ucloud"] {
            let err = bad.parse::<Subdomain>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidSubdomain { ref subdomain } if subdomain == bad),
                "expected InvalidSubdomain for {bad:?}, got: {err:?}"
            );
        }
    }
}
