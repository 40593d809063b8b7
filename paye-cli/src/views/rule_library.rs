use std::io::{self, Write};

use paye_rules::{RuleCard, RuleLibrary};

use super::write_header;
use crate::routes::Route;

pub const SUBTITLE: &str = "Nigerian tax laws translated into plain English.";

/// Renders every card, or only those carrying `tag`.
pub fn render(
    out: &mut impl Write,
    library: &RuleLibrary,
    tag: Option<&str>,
) -> io::Result<()> {
    write_header(out, Route::RuleLibrary, Some(SUBTITLE))?;

    let cards: Vec<&RuleCard> = match tag {
        Some(tag) => library.filter_by_tag(tag),
        None => library.cards().iter().collect(),
    };

    if cards.is_empty() {
        if let Some(tag) = tag {
            writeln!(out, "No rules tagged \"{tag}\".")?;
        }
        return Ok(());
    }

    for card in cards {
        render_card(out, card)?;
    }
    Ok(())
}

/// Renders the single card with `id`.
pub fn render_by_id(
    out: &mut impl Write,
    library: &RuleLibrary,
    id: u32,
) -> io::Result<()> {
    write_header(out, Route::RuleLibrary, Some(SUBTITLE))?;
    match library.get(id) {
        Some(card) => render_card(out, card),
        None => writeln!(out, "No rule with id {id}."),
    }
}

fn render_card(
    out: &mut impl Write,
    card: &RuleCard,
) -> io::Result<()> {
    let tags: Vec<String> = card
        .tags
        .iter()
        .map(|tag| {
            if tag.is_primary() {
                format!("[{}]", tag.label)
            } else {
                format!("({})", tag.label)
            }
        })
        .collect();

    if !tags.is_empty() {
        writeln!(out, "{}", tags.join(" "))?;
    }
    writeln!(out, "{}", card.title)?;
    writeln!(out, "  {}", card.description)?;
    writeln!(out)
}
