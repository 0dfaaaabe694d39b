//! The Oracle: local substring search over intel cards.
//!
//! A card matches when the lowercased query occurs in its lowercased
//! `name`, `location` and `notes` joined together. Results keep source order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{IntelCard, ThreatLevel};

/// Answer given for an empty query.
pub const PROMPT: &str = "The Oracle awaits your question: name an asset, a city, or a lead.";

/// Answer given when nothing matches.
pub const NO_MATCH: &str = "The Oracle finds no trace of that in the archives.";

/// A single matching card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleMatch {
    /// Position of the card in the intel list
    pub index: usize,
    pub name: String,
    pub location: String,
    pub threat: ThreatLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleAnswer {
    Prompt,
    NoMatch,
    Matches(Vec<OracleMatch>),
}

impl OracleAnswer {
    pub fn matches(&self) -> &[OracleMatch] {
        match self {
            OracleAnswer::Matches(found) => found,
            _ => &[],
        }
    }
}

impl fmt::Display for OracleAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleAnswer::Prompt => f.write_str(PROMPT),
            OracleAnswer::NoMatch => f.write_str(NO_MATCH),
            OracleAnswer::Matches(found) => {
                let noun = if found.len() == 1 { "match" } else { "matches" };
                write!(f, "The Oracle found {} {}: ", found.len(), noun)?;
                for (i, m) in found.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} ({}, threat {})", m.name, m.location, m.threat.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// Answers `query` against `cards`.
pub fn answer(query: &str, cards: &[IntelCard]) -> OracleAnswer {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return OracleAnswer::Prompt;
    }

    let found: Vec<OracleMatch> = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            format!("{} {} {}", card.name, card.location, card.notes)
                .to_lowercase()
                .contains(&needle)
        })
        .map(|(index, card)| OracleMatch {
            index,
            name: card.name.clone(),
            location: card.location.clone(),
            threat: card.threat,
        })
        .collect();

    if found.is_empty() {
        OracleAnswer::NoMatch
    } else {
        OracleAnswer::Matches(found)
    }
}
