//! Parsing of shared-expense split lists
//!
//! A split list looks like `"Bob:10,Alice:5"`. Parsing never fails as a
//! whole: tokens that cannot be understood are reported as skipped and the
//! rest are kept.

use std::fmt;

use super::money::Money;

/// One `name:amount` entry from a split list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareEntry {
    pub name: String,
    pub amount: Money,
}

/// A split entry that was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedShare {
    /// Token had no `:` separator
    Malformed(String),
    /// Token named a user that does not exist
    UnknownUser(String),
}

impl fmt::Display for SkippedShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(token) => write!(f, "malformed share entry '{}'", token),
            Self::UnknownUser(name) => write!(f, "unknown share recipient '{}'", name),
        }
    }
}

/// Result of parsing a split list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedShares {
    pub entries: Vec<ShareEntry>,
    pub skipped: Vec<SkippedShare>,
}

/// Parse a comma-separated list of `name:amount` tokens
///
/// Each token is trimmed and split on its first colon. Amounts that fail to
/// parse count as zero.
pub fn parse_shares(list: &str) -> ParsedShares {
    let mut parsed = ParsedShares::default();

    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let Some((name, amount)) = token.split_once(':') else {
            parsed.skipped.push(SkippedShare::Malformed(token.to_string()));
            continue;
        };

        let amount = Money::parse(amount).unwrap_or_default();
        parsed.entries.push(ShareEntry {
            name: name.trim().to_string(),
            amount,
        });
    }

    parsed
}
