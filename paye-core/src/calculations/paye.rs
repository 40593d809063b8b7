//! Nigerian Personal Income Tax (PAYE) computation.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Pension = gross × rate / 100 |
//! | 2    | CRA = max(₦200,000, 1% of gross) + 20% of gross |
//! | 3    | Taxable income = max(0, gross − pension − CRA) |
//! | 4    | Tax = bands applied in order, each on the income within its width |
//! | 5    | Monthly tax = annual tax / 12 |
//! | 6    | Net = gross − pension − tax; monthly net = net / 12 |
//!
//! # Rate table
//!
//! | Band | Width | Rate |
//! |------|-------|------|
//! | 1 | first ₦300,000 | 7% |
//! | 2 | next ₦300,000 | 11% |
//! | 3 | next ₦500,000 | 15% |
//! | 4 | next ₦500,000 | 19% |
//! | 5 | next ₦1,600,000 | 21% |
//! | 6 | remainder | 24% |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::compute;
//!
//! let result = compute(dec!(1000000), dec!(8));
//!
//! assert_eq!(result.annual_pension, dec!(80000));
//! assert_eq!(result.cra, dec!(400000));
//! assert_eq!(result.taxable_income, dec!(520000));
//! assert_eq!(result.annual_tax, dec!(45200));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{BandCharge, TaxBand, TaxInput, TaxResult};

/// Returns the PAYE rate table in application order.
pub fn paye_bands() -> [TaxBand; 6] {
    [
        TaxBand {
            width: Some(Decimal::from(300_000)),
            rate: Decimal::new(7, 2),
        },
        TaxBand {
            width: Some(Decimal::from(300_000)),
            rate: Decimal::new(11, 2),
        },
        TaxBand {
            width: Some(Decimal::from(500_000)),
            rate: Decimal::new(15, 2),
        },
        TaxBand {
            width: Some(Decimal::from(500_000)),
            rate: Decimal::new(19, 2),
        },
        TaxBand {
            width: Some(Decimal::from(1_600_000)),
            rate: Decimal::new(21, 2),
        },
        TaxBand {
            width: None,
            rate: Decimal::new(24, 2),
        },
    ]
}

/// Computes a [`TaxResult`] with the standard rate table.
///
/// Values are not validated; see [`TaxInput::new`] for the checks applied at
/// the input boundary.
pub fn compute(
    gross_income: Decimal,
    pension_rate_percent: Decimal,
) -> TaxResult {
    PayeCalculator::new().compute(gross_income, pension_rate_percent)
}

/// PAYE calculator over the fixed rate table.
#[derive(Debug, Clone)]
pub struct PayeCalculator {
    bands: [TaxBand; 6],
}

impl PayeCalculator {
    /// Minimum fixed part of the consolidated relief allowance.
    const CRA_FLOOR: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

    pub fn new() -> Self {
        Self { bands: paye_bands() }
    }

    /// The rate table this calculator applies.
    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    /// Computes the result for an already validated input.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        self.compute(input.gross_annual_income(), input.pension_rate_percent())
    }

    /// Computes the full result for a gross annual income and pension rate.
    pub fn compute(
        &self,
        gross_income: Decimal,
        pension_rate_percent: Decimal,
    ) -> TaxResult {
        let twelve = Decimal::from(12);

        let annual_pension = self.annual_pension(gross_income, pension_rate_percent);
        let cra = self.consolidated_relief(gross_income);
        let taxable_income = self.taxable_income(gross_income, annual_pension, cra);
        let annual_tax = self.tax_on_taxable_income(taxable_income);
        let annual_net = gross_income - annual_pension - annual_tax;

        trace!(%gross_income, %pension_rate_percent, %taxable_income, %annual_tax, "computed PAYE");

        TaxResult {
            gross_income,
            monthly_income: gross_income / twelve,
            pension_rate: pension_rate_percent,
            annual_pension,
            cra,
            taxable_income,
            annual_tax,
            monthly_tax: annual_tax / twelve,
            annual_net,
            monthly_net: annual_net / twelve,
        }
    }

    /// Pension contribution: gross × rate / 100.
    fn annual_pension(
        &self,
        gross_income: Decimal,
        pension_rate_percent: Decimal,
    ) -> Decimal {
        gross_income * pension_rate_percent / Decimal::ONE_HUNDRED
    }

    /// Consolidated relief allowance: the greater of ₦200,000 or 1% of gross,
    /// plus 20% of gross.
    pub fn consolidated_relief(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        let fixed_part = Self::CRA_FLOOR.max(gross_income * Decimal::new(1, 2));
        let variable_part = gross_income * Decimal::new(20, 2);
        fixed_part + variable_part
    }

    /// Income left after pension and relief, never below zero.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        annual_pension: Decimal,
        cra: Decimal,
    ) -> Decimal {
        (gross_income - annual_pension - cra).max(Decimal::ZERO)
    }

    /// Annual tax due on a taxable income.
    pub fn tax_on_taxable_income(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.band_breakdown(taxable_income)
            .iter()
            .map(|charge| charge.tax)
            .sum()
    }

    /// Splits a taxable income across the bands.
    ///
    /// Only bands that received income are returned, in table order.
    pub fn band_breakdown(
        &self,
        taxable_income: Decimal,
    ) -> Vec<BandCharge> {
        let mut remaining = taxable_income;
        let mut charges = Vec::with_capacity(self.bands.len());

        for (index, band) in self.bands.iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }
            let amount = match band.width {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            charges.push(BandCharge {
                band: index + 1,
                rate: band.rate,
                amount,
                tax: amount * band.rate,
            });
            remaining -= amount;
        }

        charges
    }
}

impl Default for PayeCalculator {
    fn default() -> Self {
        Self::new()
    }
}
