use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of the PAYE rate table.
///
/// Bands are consumed in order; each taxes at most `width` of the remaining
/// taxable income. The last band has no width and takes whatever remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

/// Portion of taxable income that fell into a band and the tax it attracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCharge {
    /// 1-based position of the band in the rate table.
    pub band: usize,
    pub rate: Decimal,
    pub amount: Decimal,
    pub tax: Decimal,
}
