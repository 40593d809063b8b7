//! PAYE calculation and chart derivation.
//!
//! [`paye`] holds the rate table, relief formula and the bracket waterfall;
//! [`breakdown`] turns a finished [`crate::TaxResult`] into ring-chart
//! geometry.

pub mod breakdown;
pub mod paye;

pub use breakdown::{
    ArcGeometry, BreakdownGeometry, BreakdownSegment, ChartGeometry, GeometryError, SegmentArcs,
    SegmentShares, derive_chart_geometry,
};
pub use paye::{PayeCalculator, compute, paye_bands};
