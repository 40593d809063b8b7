//! The tax calculator view: one-shot and interactive.
//!
//! Every computed result is published to the hand-off slot (when one is
//! given) so the status view can pick it up.

use std::io::{self, BufRead, Write};

use paye_core::calculations::{BreakdownGeometry, BreakdownSegment, PayeCalculator};
use paye_core::format::format_naira;
use paye_core::store::{ResultHandoff, StoreError};
use paye_core::{IncomePeriod, TaxInput, TaxInputError, TaxResult};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use super::write_header;
use crate::routes::Route;
use crate::utils::{ParseDecimalError, parse_decimal};

/// Pension rate used when none is given.
pub const DEFAULT_PENSION_RATE: &str = "8";

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("gross income: {0}")]
    Income(#[source] ParseDecimalError),

    #[error("pension rate: {0}")]
    PensionRate(#[source] ParseDecimalError),

    #[error(transparent)]
    Input(#[from] TaxInputError),

    #[error("could not save result: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Turns raw text fields into a [`TaxResult`] and renders it.
#[derive(Debug, Clone)]
pub struct CalculatorView {
    calculator: PayeCalculator,
    geometry: BreakdownGeometry,
    period: IncomePeriod,
}

impl CalculatorView {
    pub fn new(
        geometry: BreakdownGeometry,
        period: IncomePeriod,
    ) -> Self {
        Self {
            calculator: PayeCalculator::new(),
            geometry,
            period,
        }
    }

    pub fn period(&self) -> IncomePeriod {
        self.period
    }

    /// Parses and validates the two fields, then computes.
    ///
    /// `income` is read in the view's period and annualized first.
    pub fn evaluate(
        &self,
        income: &str,
        pension_rate: &str,
    ) -> Result<TaxResult, CalculatorError> {
        let amount = parse_decimal(income).map_err(CalculatorError::Income)?;
        let rate = parse_decimal(pension_rate).map_err(CalculatorError::PensionRate)?;
        let gross = self
            .period
            .annualize(amount)
            .ok_or(TaxInputError::IncomeTooLarge(amount))?;
        let input = TaxInput::new(gross, rate)?;
        Ok(self.calculator.calculate(&input))
    }

    /// Writes the summary, the per-band tax and the chart shares.
    pub fn render(
        &self,
        out: &mut impl Write,
        result: &TaxResult,
    ) -> io::Result<()> {
        writeln!(out, "{result}")?;
        writeln!(
            out,
            "Effective Tax Rate:   {}%",
            result.effective_rate().round_dp(2).normalize()
        )?;
        writeln!(out)?;

        let charges = self.calculator.band_breakdown(result.taxable_income);
        if !charges.is_empty() {
            writeln!(out, "Tax by band:")?;
            for charge in &charges {
                writeln!(
                    out,
                    "  Band {}  {:>3}% on {:>12} = {}",
                    charge.band,
                    (charge.rate * Decimal::ONE_HUNDRED).normalize().to_string(),
                    format_naira(charge.amount),
                    format_naira(charge.tax)
                )?;
            }
            writeln!(out)?;
        }

        let chart = self.geometry.derive(result);
        writeln!(out, "Breakdown:")?;
        for segment in BreakdownSegment::ALL {
            writeln!(
                out,
                "  {:<10} {:>5.1}%",
                segment.label(),
                chart.percentages.get(segment)
            )?;
        }
        Ok(())
    }

    /// Computes once, renders, and publishes when a hand-off is given.
    pub async fn run_once(
        &self,
        out: &mut impl Write,
        income: &str,
        pension_rate: &str,
        handoff: Option<&ResultHandoff<'_>>,
    ) -> Result<TaxResult, CalculatorError> {
        let result = self.evaluate(income, pension_rate)?;
        write_header(out, Route::TaxCalculator, None)?;
        self.render(out, &result)?;
        if let Some(handoff) = handoff {
            handoff.publish(&result).await?;
            writeln!(out)?;
            writeln!(
                out,
                "Saved. Run `{} {}` to see your insights.",
                crate::BIN_NAME,
                Route::Status
            )?;
        }
        Ok(result)
    }

    /// Reads `<income> [<pension rate>]` lines until end of input or a quit
    /// word, recomputing and publishing after each one.
    ///
    /// A pension rate given on one line carries over to later lines. Bad
    /// lines are reported and skipped. Returns the number of results computed.
    pub async fn run_interactive(
        &self,
        input: impl BufRead,
        out: &mut impl Write,
        initial_pension_rate: &str,
        handoff: Option<&ResultHandoff<'_>>,
    ) -> Result<usize, CalculatorError> {
        write_header(
            out,
            Route::TaxCalculator,
            Some(&format!(
                "Enter {} income and optional pension rate (e.g. `1,200,000 8`). `q` quits.",
                self.period.as_str()
            )),
        )?;

        let mut pension_rate = initial_pension_rate.to_string();
        let mut computed = 0;
        let mut lines = input.lines();

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };
            let mut fields = line.split_whitespace();
            let Some(income) = fields.next() else {
                continue;
            };
            if QUIT_WORDS.contains(&income.to_ascii_lowercase().as_str()) {
                break;
            }
            let rate = fields.next().unwrap_or(&pension_rate).to_string();

            let result = match self.evaluate(income, &rate) {
                Ok(result) => result,
                Err(e) => {
                    writeln!(out, "Error: {e}")?;
                    continue;
                }
            };
            pension_rate = rate;
            computed += 1;
            debug!(computed, "recomputed from interactive input");

            self.render(out, &result)?;
            if let Some(handoff) = handoff {
                if let Err(e) = handoff.publish(&result).await {
                    warn!(error = %e, "failed to save result");
                    writeln!(out, "Warning: result not saved ({e})")?;
                }
            }
        }

        Ok(computed)
    }
}

impl Default for CalculatorView {
    fn default() -> Self {
        Self::new(BreakdownGeometry::default(), IncomePeriod::Annual)
    }
}

#[cfg(test)]
mod tests {
    use paye_core::store::{HandoffState, MemoryResultStore};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    // =========================================================================
    // evaluate
    // =========================================================================

    #[test]
    fn evaluate_accepts_formatted_amounts() {
        let result = CalculatorView::default()
            .evaluate("₦1,200,000", "8%")
            .unwrap();

        assert_eq!(result.annual_tax, dec!(63600));
        assert_eq!(result.monthly_net, dec!(86700));
    }

    #[test]
    fn evaluate_annualizes_monthly_income() {
        let view = CalculatorView::new(BreakdownGeometry::default(), IncomePeriod::Monthly);

        let result = view.evaluate("100,000", "8").unwrap();

        assert_eq!(result.gross_income, dec!(1200000));
        assert_eq!(result.monthly_income, dec!(100000));
    }

    #[test]
    fn evaluate_empty_income_is_zero() {
        let result = CalculatorView::default().evaluate("", "8").unwrap();

        assert_eq!(result.annual_tax, dec!(0));
        assert_eq!(result.cra, dec!(200000));
    }

    #[test]
    fn evaluate_rejects_negative_income() {
        let err = CalculatorView::default().evaluate("-5", "8").unwrap_err();
        assert!(matches!(
            err,
            CalculatorError::Input(TaxInputError::NegativeIncome(_))
        ));
    }

    #[test]
    fn evaluate_rejects_rate_above_hundred() {
        let err = CalculatorView::default()
            .evaluate("1000000", "150")
            .unwrap_err();
        assert!(matches!(
            err,
            CalculatorError::Input(TaxInputError::PensionRateOutOfRange(_))
        ));
    }

    #[test]
    fn evaluate_rejects_income_too_large_to_compute() {
        let err = CalculatorView::default()
            .evaluate("10000000000000000000000000000", "8")
            .unwrap_err();
        assert!(matches!(
            err,
            CalculatorError::Input(TaxInputError::IncomeTooLarge(_))
        ));
    }

    #[test]
    fn evaluate_rejects_monthly_income_that_overflows_when_annualized() {
        let view = CalculatorView::new(BreakdownGeometry::default(), IncomePeriod::Monthly);

        let err = view.evaluate("7000000000000000000000000000", "8").unwrap_err();
        assert!(matches!(
            err,
            CalculatorError::Input(TaxInputError::IncomeTooLarge(_))
        ));
    }

    #[test]
    fn evaluate_names_the_bad_field() {
        let view = CalculatorView::default();

        assert!(matches!(
            view.evaluate("lots", "8"),
            Err(CalculatorError::Income(_))
        ));
        assert!(matches!(
            view.evaluate("1000", "eight"),
            Err(CalculatorError::PensionRate(_))
        ));
    }

    // =========================================================================
    // render
    // =========================================================================

    #[test]
    fn render_lists_bands_and_shares() {
        let view = CalculatorView::default();
        let result = view.evaluate("1200000", "8").unwrap();
        let mut out = Vec::new();

        view.render(&mut out, &result).unwrap();
        let text = text(out);

        assert!(text.contains("Net Monthly Income:   ₦86,700"));
        assert!(text.contains("Effective Tax Rate:   5.3%\n"));
        assert!(text.contains("  Band 1    7% on     ₦300,000 = ₦21,000\n"));
        assert!(text.contains("  Band 2   11% on     ₦300,000 = ₦33,000\n"));
        assert!(text.contains("  Band 3   15% on      ₦64,000 = ₦9,600\n"));
        assert!(!text.contains("Band 4"));
        assert!(text.contains("  Net Income  86.7%\n"));
        assert!(text.contains("  Pension      8.0%\n"));
        assert!(text.contains("  Tax          5.3%\n"));
    }

    #[test]
    fn render_skips_band_table_when_nothing_is_taxable() {
        let view = CalculatorView::default();
        let result = view.evaluate("200000", "0").unwrap();
        let mut out = Vec::new();

        view.render(&mut out, &result).unwrap();

        assert!(!text(out).contains("Tax by band:"));
    }

    // =========================================================================
    // run_once / run_interactive
    // =========================================================================

    #[tokio::test]
    async fn run_once_publishes_result() {
        let store = MemoryResultStore::new();
        let handoff = ResultHandoff::new(&store);
        let mut out = Vec::new();

        let result = CalculatorView::default()
            .run_once(&mut out, "1200000", "8", Some(&handoff))
            .await
            .unwrap();

        assert_eq!(handoff.fetch().await.unwrap().result(), Some(&result));
        assert!(text(out).contains("Run `taxclarity status`"));
    }

    #[tokio::test]
    async fn run_once_without_handoff_saves_nothing() {
        let mut out = Vec::new();

        CalculatorView::default()
            .run_once(&mut out, "1200000", "8", None)
            .await
            .unwrap();

        assert!(!text(out).contains("Saved."));
    }

    #[tokio::test]
    async fn run_once_bad_input_writes_nothing() {
        let store = MemoryResultStore::new();
        let handoff = ResultHandoff::new(&store);
        let mut out = Vec::new();

        let err = CalculatorView::default()
            .run_once(&mut out, "abc", "8", Some(&handoff))
            .await
            .unwrap_err();

        assert!(matches!(err, CalculatorError::Income(_)));
        assert!(out.is_empty());
        assert_eq!(handoff.fetch().await.unwrap(), HandoffState::Empty);
    }

    #[tokio::test]
    async fn interactive_republishes_each_line() {
        let store = MemoryResultStore::new();
        let handoff = ResultHandoff::new(&store);
        let input = "600000\n1,200,000 8\n\nnonsense\n1000000\nq\n2000000\n";
        let mut out = Vec::new();

        let computed = CalculatorView::default()
            .run_interactive(input.as_bytes(), &mut out, "0", Some(&handoff))
            .await
            .unwrap();

        assert_eq!(computed, 3);
        let latest = handoff.fetch().await.unwrap();
        let latest = latest.result().unwrap();
        // The rate from the second line carries over to the last one.
        assert_eq!(latest.gross_income, dec!(1000000));
        assert_eq!(latest.annual_pension, dec!(80000));
        assert!(text(out).contains("Error: gross income: invalid amount 'nonsense'"));
    }

    #[tokio::test]
    async fn interactive_stops_at_end_of_input() {
        let mut out = Vec::new();

        let computed = CalculatorView::default()
            .run_interactive("300000 10\n".as_bytes(), &mut out, DEFAULT_PENSION_RATE, None)
            .await
            .unwrap();

        assert_eq!(computed, 1);
        assert!(text(out).ends_with("> \n"));
    }

    #[tokio::test]
    async fn interactive_bad_rate_keeps_previous_rate() {
        let store = MemoryResultStore::new();
        let handoff = ResultHandoff::new(&store);
        let mut out = Vec::new();

        CalculatorView::default()
            .run_interactive("1000000 120\n1000000\n".as_bytes(), &mut out, "8", Some(&handoff))
            .await
            .unwrap();

        let state = handoff.fetch().await.unwrap();
        assert_eq!(state.result().unwrap().pension_rate, dec!(8));
        assert!(text(out).contains("pension rate must be between 0 and 100"));
    }
}
