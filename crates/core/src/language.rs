//! Language tag attached to the subtitle stream.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A three-letter language code written into the subtitle stream metadata.
///
/// The value is passed to the engine verbatim. [`LanguageTag::is_well_formed`]
/// exists for callers that want to warn about unusual values, nothing rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Tag used when none is configured.
    pub const DEFAULT: &'static str = "chi";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag looks like an ISO 639-2 code (three ASCII letters).
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 3 && self.0.bytes().all(|b| b.is_ascii_alphabetic())
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl FromStr for LanguageTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
