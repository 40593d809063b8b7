use std::io::{self, Write};

use chrono::Local;
use paye_core::TaxResult;
use paye_core::calculations::{BreakdownGeometry, BreakdownSegment};
use paye_core::format::format_naira;
use paye_core::store::HandoffState;

use super::write_header;
use crate::routes::Route;

pub const SUBTITLE: &str = "Breakdown of your tax estimation and insights.";

pub const NO_DATA_MESSAGE: &str = "No tax data found. Please use the Tax Estimator first.";

pub const CLEARED_MESSAGE: &str = "Saved result cleared.";

pub const NOTHING_TO_CLEAR_MESSAGE: &str = "No saved result to clear.";

pub const TIPS: [&str; 4] = [
    "Consider increasing your pension contribution for better retirement savings.",
    "Explore additional tax reliefs like NHF or Life Assurance to reduce your taxable income.",
    "Review your income sources to optimize your tax bracket.",
    "Consult a tax professional for personalized advice.",
];

pub const DISCLAIMER: &str =
    "*Estimates based on standard computations. Actual liability may vary.";

/// Renders whatever the hand-off slot held. Anything but a ready result
/// shows the prompt to run the calculator first.
pub fn render(
    out: &mut impl Write,
    state: &HandoffState,
    geometry: &BreakdownGeometry,
) -> io::Result<()> {
    match state {
        HandoffState::Ready { result, saved_at } => {
            write_header(out, Route::Status, Some(SUBTITLE))?;
            render_analysis(out, result)?;
            render_tips(out)?;
            render_breakdown(out, result, geometry)?;
            writeln!(out)?;
            writeln!(
                out,
                "Last calculated {}",
                saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            )?;
            writeln!(
                out,
                "Back to Tax Estimator: {} {}",
                crate::BIN_NAME,
                Route::TaxCalculator
            )
        }
        HandoffState::Empty | HandoffState::Invalid(_) => render_no_data(out),
    }
}

pub fn render_no_data(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{NO_DATA_MESSAGE}")?;
    writeln!(
        out,
        "Go to Tax Estimator: {} {}",
        crate::BIN_NAME,
        Route::TaxCalculator
    )
}

fn render_analysis(
    out: &mut impl Write,
    result: &TaxResult,
) -> io::Result<()> {
    writeln!(out, "Data Analysis")?;
    writeln!(out, "  Monthly Income:       {}", format_naira(result.monthly_income))?;
    writeln!(out, "  Annual Gross Income:  {}", format_naira(result.gross_income))?;
    writeln!(out, "  Annual Tax:           {}", format_naira(result.annual_tax))?;
    writeln!(out, "  Monthly Tax:          {}", format_naira(result.monthly_tax))?;
    writeln!(out, "  Net Monthly Income:   {}", format_naira(result.monthly_net))?;
    writeln!(
        out,
        "  Pension Contribution: {}% ({} annually)",
        result.pension_rate.normalize(),
        format_naira(result.annual_pension)
    )?;
    writeln!(
        out,
        "  Taxable Income:       {} (after CRA of {})",
        format_naira(result.taxable_income),
        format_naira(result.cra)
    )?;
    writeln!(out)
}

fn render_tips(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Tips and Suggestions")?;
    for tip in TIPS {
        writeln!(out, "  - {tip}")?;
    }
    writeln!(out)
}

fn render_breakdown(
    out: &mut impl Write,
    result: &TaxResult,
    geometry: &BreakdownGeometry,
) -> io::Result<()> {
    let chart = geometry.derive(result);

    writeln!(out, "Breakdown")?;
    for segment in BreakdownSegment::ALL {
        writeln!(
            out,
            "  {:<10} {:>5.1}%  {}",
            segment.label(),
            chart.percentages.get(segment),
            segment.color()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  Net Monthly Income  {}", format_naira(result.monthly_net))?;
    writeln!(out, "  Monthly Tax         {}", format_naira(result.monthly_tax))?;
    writeln!(out)?;
    writeln!(out, "{DISCLAIMER}")
}
