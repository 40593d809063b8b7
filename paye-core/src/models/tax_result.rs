use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::format_naira;

/// The outcome of a PAYE computation.
///
/// Serialized as a flat camelCase record of plain JSON numbers, which is the
/// shape the status view reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pension_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_pension: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cra: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_net: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_net: Decimal,
}

impl TaxResult {
    /// Checks `annual_net + annual_pension + annual_tax == gross_income`.
    ///
    /// A relative tolerance of one part per million (with a floor of
    /// 0.000001) absorbs the float conversion a stored record goes through.
    pub fn is_balanced(&self) -> bool {
        let tolerance = (self.gross_income.abs() * Decimal::new(1, 6)).max(Decimal::new(1, 6));
        let drift = self.annual_net + self.annual_pension + self.annual_tax - self.gross_income;
        drift.abs() <= tolerance
    }

    /// Tax as a percentage of gross income; zero when there is no income.
    pub fn effective_rate(&self) -> Decimal {
        if self.gross_income.is_zero() {
            return Decimal::ZERO;
        }
        self.annual_tax / self.gross_income * Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for TaxResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Annual Gross Income:  {}", format_naira(self.gross_income))?;
        writeln!(f, "Monthly Income:       {}", format_naira(self.monthly_income))?;
        writeln!(
            f,
            "Pension Contribution: {}% ({} annually)",
            self.pension_rate.normalize(),
            format_naira(self.annual_pension)
        )?;
        writeln!(f, "CRA:                  {}", format_naira(self.cra))?;
        writeln!(f, "Taxable Income:       {}", format_naira(self.taxable_income))?;
        writeln!(f, "Annual Tax:           {}", format_naira(self.annual_tax))?;
        writeln!(f, "Monthly Tax:          {}", format_naira(self.monthly_tax))?;
        writeln!(f, "Annual Net Income:    {}", format_naira(self.annual_net))?;
        write!(f, "Net Monthly Income:   {}", format_naira(self.monthly_net))
    }
}
