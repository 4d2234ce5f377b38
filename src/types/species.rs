//! Species identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Unique identifier for a species within the dex dataset.
///
/// Wraps the upstream numeric id and implements `Ord` for deterministic
/// ordering of families and registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(u32);

/// Error when a species id cannot be extracted from a resource URL.
#[derive(Debug, Clone, thiserror::Error)]
#[error("No numeric species id in resource URL: {url}")]
pub struct SpeciesIdParseError {
    /// The URL that failed to parse.
    pub url: String,
}

impl SpeciesId {
    /// Create a new SpeciesId from a raw numeric id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Extract the id from an upstream resource URL.
    ///
    /// Upstream references species as URLs with a trailing numeric path
    /// segment (`.../pokemon-species/1/`). The trailing slash is optional.
    pub fn from_resource_url(url: &str) -> Result<Self, SpeciesIdParseError> {
        static TRAILING_ID: OnceLock<regex_lite::Regex> = OnceLock::new();
        let re = TRAILING_ID.get_or_init(|| {
            regex_lite::Regex::new(r"/(\d+)/?$").unwrap()
        });

        re.captures(url)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .map(Self)
            .ok_or_else(|| SpeciesIdParseError {
                url: url.to_string(),
            })
    }

    /// Get the raw numeric id.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpeciesId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(SpeciesId::new(1) < SpeciesId::new(2));
        assert!(SpeciesId::new(151) < SpeciesId::new(152));
    }

    #[test]
    fn test_from_resource_url() {
        let id = SpeciesId::from_resource_url("https://example.test/api/v2/pokemon-species/25/")
            .unwrap();
        assert_eq!(id, SpeciesId::new(25));

        // Trailing slash is optional
        let id = SpeciesId::from_resource_url("/pokemon-species/133").unwrap();
        assert_eq!(id, SpeciesId::new(133));
    }

    #[test]
    fn test_from_resource_url_rejects_non_numeric() {
        let err = SpeciesId::from_resource_url("/pokemon-species/pikachu/").unwrap_err();
        assert!(err.to_string().contains("pikachu"));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&SpeciesId::new(7)).unwrap();
        assert_eq!(json, "7");
        let id: SpeciesId = serde_json::from_str("7").unwrap();
        assert_eq!(id, SpeciesId::new(7));
    }
}
