mod income_period;
mod tax_band;
mod tax_input;
mod tax_result;

pub use income_period::IncomePeriod;
pub use tax_band::{BandCharge, TaxBand};
pub use tax_input::{TaxInput, TaxInputError};
pub use tax_result::TaxResult;
