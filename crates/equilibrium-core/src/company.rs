//! Company identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A company identifier.
///
/// Identifiers are lowercased on creation; they name the per-company data
/// directory and key the batch report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company(String);

impl Company {
    /// Creates a new company identifier, converting to lowercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_lowercase())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Company {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Company {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Company {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_is_lowercased() {
        assert_eq!(Company::new("Apple").as_str(), "apple");
        assert_eq!(Company::from("IBM").to_string(), "ibm");
    }
}
