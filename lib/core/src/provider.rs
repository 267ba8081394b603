//! The closed set of third-party integrations the portal can connect to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a provider name fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderError {
    /// The input that did not name a provider.
    pub input: String,
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown integration provider '{}'", self.input)
    }
}

impl std::error::Error for ParseProviderError {}

/// A supported integration target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Notion,
    Airtable,
    Hubspot,
}

impl Provider {
    /// Every provider, in the order the selection control lists them.
    pub const ALL: [Provider; 3] = [Provider::Notion, Provider::Airtable, Provider::Hubspot];

    /// Human-readable name, also used as the credential bundle tag.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Notion => "Notion",
            Self::Airtable => "Airtable",
            Self::Hubspot => "Hubspot",
        }
    }

    /// Path segment used by the backend's `/integrations/{slug}` routes.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Airtable => "airtable",
            Self::Hubspot => "hubspot",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = ParseProviderError;

    /// Accepts either the display name or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|provider| {
                provider.display_name().eq_ignore_ascii_case(needle)
                    || provider.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ParseProviderError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_three_providers_in_menu_order() {
        let names: Vec<_> = Provider::ALL.iter().map(|p| p.display_name()).collect();
        assert_eq!(names, ["Notion", "Airtable", "Hubspot"]);
    }

    #[test]
    fn parse_display_name_and_slug() {
        assert_eq!("Hubspot".parse::<Provider>(), Ok(Provider::Hubspot));
        assert_eq!("airtable".parse::<Provider>(), Ok(Provider::Airtable));
        assert_eq!(" NOTION ".parse::<Provider>(), Ok(Provider::Notion));
    }

    #[test]
    fn parse_unknown_provider() {
        let err = "salesforce".parse::<Provider>().unwrap_err();
        assert_eq!(err.input, "salesforce");
        assert!(err.to_string().contains("salesforce"));
    }

    #[test]
    fn display_matches_tag() {
        assert_eq!(Provider::Airtable.to_string(), "Airtable");
        assert_eq!(Provider::Hubspot.slug(), "hubspot");
    }
}
