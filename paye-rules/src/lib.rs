//! Plain-English catalog of Nigerian tax rules.

mod library;
mod models;

pub use library::{RuleLibrary, RuleLibraryError};
pub use models::{RuleCard, RuleTag, TagKind};
