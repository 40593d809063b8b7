use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Period a gross income figure was entered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomePeriod {
    #[default]
    Annual,
    Monthly,
}

impl IncomePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" | "a" | "y" => Some(Self::Annual),
            "monthly" | "m" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Converts an amount entered for this period into an annual amount.
    ///
    /// Returns `None` when the annual amount does not fit in a `Decimal`.
    pub fn annualize(
        &self,
        amount: Decimal,
    ) -> Option<Decimal> {
        match self {
            Self::Annual => Some(amount),
            Self::Monthly => amount.checked_mul(Decimal::from(12)),
        }
    }
}
