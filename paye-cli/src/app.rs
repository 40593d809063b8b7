//! Wiring between the command line, the result store and the views.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use paye_core::TaxResult;
use paye_core::calculations::BreakdownGeometry;
use paye_core::store::{
    HandoffState, MemoryResultStoreFactory, ResultHandoff, ResultStore, StoreConfig, StoreRegistry,
};
use paye_rules::RuleLibrary;
use paye_store_sqlite::SqliteResultStoreFactory;
use tracing::{debug, info, warn};

use crate::cli::{CalculatorArgs, Command};
use crate::config::AppConfig;
use crate::svg::render_donut;
use crate::views::calculator::CalculatorView;
use crate::views::{rule_library, status};

/// Registry with every backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteResultStoreFactory));
    registry.register(Box::new(MemoryResultStoreFactory));
    registry
}

pub async fn open_store(config: &StoreConfig) -> Result<Box<dyn ResultStore>> {
    debug!(backend = %config.backend, "opening result store");
    build_registry()
        .create(config)
        .await
        .with_context(|| format!("failed to open {} store", config.backend))
}

/// Opens the configured store without creating it. Used by readers.
pub async fn open_existing_store(config: &StoreConfig) -> Result<Box<dyn ResultStore>> {
    debug!(backend = %config.backend, "opening existing result store");
    build_registry()
        .open_existing(config)
        .await
        .with_context(|| format!("no readable {} store", config.backend))
}

/// Runs one view, writing to `out` and reading interactive input from `input`.
pub async fn run(
    command: &Command,
    config: &AppConfig,
    out: &mut impl Write,
    input: impl BufRead,
) -> Result<()> {
    info!(route = %command.route(), "opening view");
    match command {
        Command::RuleLibrary { tag, id } => {
            let library = RuleLibrary::bundled().context("failed to load rule library")?;
            match id {
                Some(id) => rule_library::render_by_id(out, &library, *id)?,
                None => rule_library::render(out, &library, tag.as_deref())?,
            }
        }
        Command::TaxCalculator(args) => run_calculator(args, config, out, input).await?,
        Command::Status { clear: true, .. } => clear_status(config, out).await?,
        Command::Status { svg, clear: false } => run_status(svg.as_deref(), config, out).await?,
    }
    out.flush()?;
    Ok(())
}

async fn run_calculator(
    args: &CalculatorArgs,
    config: &AppConfig,
    out: &mut impl Write,
    input: impl BufRead,
) -> Result<()> {
    let geometry = config.chart.geometry()?;
    let view = CalculatorView::new(geometry, args.period);

    let store = if args.no_save {
        None
    } else {
        Some(open_store(&config.store).await?)
    };
    let handoff = store.as_deref().map(ResultHandoff::new);

    if args.interactive {
        let computed = view
            .run_interactive(input, out, &args.pension_rate, handoff.as_ref())
            .await?;
        debug!(computed, "interactive session ended");
        return Ok(());
    }

    let income = args.income.as_deref().unwrap_or_default();
    let result = view
        .run_once(out, income, &args.pension_rate, handoff.as_ref())
        .await?;

    if let Some(path) = &args.svg {
        export_svg(path, &result, &geometry)?;
        writeln!(out, "Chart written to {}", path.display())?;
    }
    Ok(())
}

async fn run_status(
    svg: Option<&Path>,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<()> {
    let geometry = config.chart.geometry()?;

    let state = match open_existing_store(&config.store).await {
        Ok(store) => ResultHandoff::new(store.as_ref()).fetch().await,
        Err(e) => {
            info!(error = %format!("{e:#}"), "no saved result");
            Ok(HandoffState::Empty)
        }
    };
    let state = state.unwrap_or_else(|e| {
        warn!(error = %e, "could not read stored result");
        HandoffState::Empty
    });

    status::render(out, &state, &geometry)?;

    if let (Some(path), Some(result)) = (svg, state.result()) {
        export_svg(path, result, &geometry)?;
        writeln!(out, "Chart written to {}", path.display())?;
    }
    Ok(())
}

async fn clear_status(
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<()> {
    match open_existing_store(&config.store).await {
        Ok(store) => {
            ResultHandoff::new(store.as_ref())
                .clear()
                .await
                .context("failed to clear saved result")?;
            writeln!(out, "{}", status::CLEARED_MESSAGE)?;
        }
        Err(e) => {
            info!(error = %format!("{e:#}"), "nothing to clear");
            writeln!(out, "{}", status::NOTHING_TO_CLEAR_MESSAGE)?;
        }
    }
    Ok(())
}

fn export_svg(
    path: &Path,
    result: &TaxResult,
    geometry: &BreakdownGeometry,
) -> Result<()> {
    let document = render_donut(&geometry.derive(result));
    fs::write(path, document).with_context(|| format!("failed to write {}", path.display()))
}
