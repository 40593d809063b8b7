use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejections raised when user input is turned into a [`TaxInput`].
///
/// The calculator itself accepts any value and lets it propagate; these
/// checks only run at the input boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxInputError {
    #[error("gross income cannot be negative (got {0})")]
    NegativeIncome(Decimal),

    #[error("pension rate must be between 0 and 100 percent (got {0})")]
    PensionRateOutOfRange(Decimal),

    #[error("gross income is too large to compute (got {0})")]
    IncomeTooLarge(Decimal),
}

/// Validated calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInput {
    gross_annual_income: Decimal,
    pension_rate_percent: Decimal,
}

impl TaxInput {
    /// Builds an input, rejecting negative income, pension rates outside
    /// `[0, 100]` and incomes whose pension share would overflow a `Decimal`.
    pub fn new(
        gross_annual_income: Decimal,
        pension_rate_percent: Decimal,
    ) -> Result<Self, TaxInputError> {
        if gross_annual_income.is_sign_negative() && !gross_annual_income.is_zero() {
            return Err(TaxInputError::NegativeIncome(gross_annual_income));
        }
        if pension_rate_percent < Decimal::ZERO || pension_rate_percent > Decimal::ONE_HUNDRED {
            return Err(TaxInputError::PensionRateOutOfRange(pension_rate_percent));
        }
        if gross_annual_income.checked_mul(Decimal::ONE_HUNDRED).is_none() {
            return Err(TaxInputError::IncomeTooLarge(gross_annual_income));
        }
        Ok(Self {
            gross_annual_income,
            pension_rate_percent,
        })
    }

    pub fn gross_annual_income(&self) -> Decimal {
        self.gross_annual_income
    }

    pub fn pension_rate_percent(&self) -> Decimal {
        self.pension_rate_percent
    }
}
