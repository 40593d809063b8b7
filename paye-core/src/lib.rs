pub mod calculations;
pub mod format;
pub mod models;
pub mod store;

pub use calculations::{
    BreakdownGeometry, ChartGeometry, PayeCalculator, compute, derive_chart_geometry,
};
pub use models::*;
pub use store::{ResultStore, StoreError};
