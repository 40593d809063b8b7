//! Text renderings of the three views. Each one writes to any
//! [`std::io::Write`] so the output can be captured in tests.

pub mod calculator;
pub mod rule_library;
pub mod status;

use std::io::{self, Write};

use crate::routes::Route;

/// Page heading followed by an optional subtitle and a blank line.
pub(crate) fn write_header(
    out: &mut impl Write,
    route: Route,
    subtitle: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "{}", route.title())?;
    writeln!(out, "{}", "=".repeat(route.title().chars().count()))?;
    if let Some(subtitle) = subtitle {
        writeln!(out, "{subtitle}")?;
    }
    writeln!(out)
}
