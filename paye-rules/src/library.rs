use std::collections::HashSet;
use std::io::Read;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{RuleCard, RuleTag};

const BUNDLED_RULES: &str = include_str!("../data/rules.csv");

/// Errors that can occur when loading rule cards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleLibraryError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Duplicate rule id {0}")]
    DuplicateId(u32),

    #[error("Rule {0} has an empty title")]
    EmptyTitle(u32),
}

impl From<csv::Error> for RuleLibraryError {
    fn from(err: csv::Error) -> Self {
        RuleLibraryError::CsvParse(err.to_string())
    }
}

/// A single row of the rules CSV.
///
/// - `id`: unique card number, also the display order
/// - `title`: card heading
/// - `description`: the plain-English explanation
/// - `primary_tag`: highlighted tag (may be empty)
/// - `secondary_tags`: `;`-separated list (may be empty)
#[derive(Debug, Deserialize)]
struct RuleRecord {
    id: u32,
    title: String,
    description: String,
    #[serde(default)]
    primary_tag: String,
    #[serde(default)]
    secondary_tags: String,
}

impl RuleRecord {
    fn into_card(self) -> Result<RuleCard, RuleLibraryError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(RuleLibraryError::EmptyTitle(self.id));
        }

        let mut tags = Vec::new();
        let primary = self.primary_tag.trim();
        if !primary.is_empty() {
            tags.push(RuleTag::primary(primary));
        }
        tags.extend(
            self.secondary_tags
                .split(';')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(RuleTag::secondary),
        );

        Ok(RuleCard {
            id: self.id,
            title: title.to_string(),
            description: self.description.trim().to_string(),
            tags,
        })
    }
}

/// The rule cards shown on the library page, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLibrary {
    cards: Vec<RuleCard>,
}

impl RuleLibrary {
    /// Parse rule cards from a CSV reader.
    ///
    /// Cards come back in file order. Ids must be unique and titles
    /// non-empty.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RuleCard>, RuleLibraryError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut seen = HashSet::new();
        let mut cards = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RuleRecord = result?;
            if !seen.insert(record.id) {
                return Err(RuleLibraryError::DuplicateId(record.id));
            }
            cards.push(record.into_card()?);
        }

        debug!(count = cards.len(), "parsed rule cards");
        Ok(cards)
    }

    /// Builds a library from already-parsed cards.
    pub fn new(mut cards: Vec<RuleCard>) -> Self {
        cards.sort_by_key(|card| card.id);
        Self { cards }
    }

    /// Loads a library from a CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RuleLibraryError> {
        Ok(Self::new(Self::parse(reader)?))
    }

    /// The catalog shipped with the binary.
    pub fn bundled() -> Result<Self, RuleLibraryError> {
        Self::from_reader(BUNDLED_RULES.as_bytes())
    }

    pub fn cards(&self) -> &[RuleCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&RuleCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Cards carrying `tag` as either a primary or secondary tag, ignoring case.
    pub fn filter_by_tag(&self, tag: &str) -> Vec<&RuleCard> {
        self.cards.iter().filter(|card| card.has_tag(tag)).collect()
    }
}
