//! Ring-chart geometry for the net / pension / tax split.
//!
//! The ring is drawn with the stroke-dash technique: every segment is a full
//! circle whose dash offset hides all but its share of the circumference,
//! rotated so it starts where the previous segment ended. Segments are always
//! laid out net, then pension, then tax, starting at 12 o'clock.

use std::f64::consts::PI;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use thiserror::Error;

use crate::models::TaxResult;

/// Ring radius used by the reference chart.
pub const DEFAULT_RING_RADIUS: f64 = 70.0;

/// Angle of the first segment's start (12 o'clock).
pub const START_ANGLE_DEGREES: f64 = -90.0;

/// One percentage point of the ring, in degrees.
pub const DEGREES_PER_PERCENT: f64 = 3.6;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("ring radius must be a positive finite number (got {0})")]
    InvalidRadius(f64),
}

/// The three slices of the chart, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BreakdownSegment {
    Net,
    Pension,
    Tax,
}

impl BreakdownSegment {
    /// Drawing and legend order.
    pub const ALL: [BreakdownSegment; 3] = [Self::Net, Self::Pension, Self::Tax];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Net => "Net Income",
            Self::Pension => "Pension",
            Self::Tax => "Tax",
        }
    }

    /// Fill colour as a hex triplet.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Net => "#00D64F",
            Self::Pension => "#FFC107",
            Self::Tax => "#FF5252",
        }
    }

    fn amount(
        &self,
        result: &TaxResult,
    ) -> Decimal {
        match self {
            Self::Net => result.annual_net,
            Self::Pension => result.annual_pension,
            Self::Tax => result.annual_tax,
        }
    }
}

/// Percentage share of each segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentShares {
    pub net: f64,
    pub pension: f64,
    pub tax: f64,
}

impl SegmentShares {
    pub fn get(
        &self,
        segment: BreakdownSegment,
    ) -> f64 {
        match segment {
            BreakdownSegment::Net => self.net,
            BreakdownSegment::Pension => self.pension,
            BreakdownSegment::Tax => self.tax,
        }
    }

    pub fn total(&self) -> f64 {
        self.net + self.pension + self.tax
    }
}

/// Placement of one segment on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcGeometry {
    /// Dash offset: the part of the circumference left undrawn.
    pub stroke_offset: f64,
    /// Rotation of the segment's start, in degrees.
    pub start_angle: f64,
}

impl ArcGeometry {
    /// Visible arc length for a ring of the given circumference.
    pub fn arc_length(
        &self,
        circumference: f64,
    ) -> f64 {
        circumference - self.stroke_offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentArcs {
    pub net: ArcGeometry,
    pub pension: ArcGeometry,
    pub tax: ArcGeometry,
}

impl SegmentArcs {
    pub fn get(
        &self,
        segment: BreakdownSegment,
    ) -> ArcGeometry {
        match segment {
            BreakdownSegment::Net => self.net,
            BreakdownSegment::Pension => self.pension,
            BreakdownSegment::Tax => self.tax,
        }
    }
}

/// Everything needed to draw the ring for one result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub radius: f64,
    pub circumference: f64,
    pub percentages: SegmentShares,
    pub arcs: SegmentArcs,
}

/// Derives [`ChartGeometry`] for a ring of fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakdownGeometry {
    radius: f64,
}

impl BreakdownGeometry {
    pub fn new(radius: f64) -> Result<Self, GeometryError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Derives the chart for a result.
    ///
    /// A non-positive total falls back to a denominator of 1, which yields
    /// empty arcs instead of a division by zero.
    pub fn derive(
        &self,
        result: &TaxResult,
    ) -> ChartGeometry {
        let total = result.annual_net + result.annual_pension + result.annual_tax;
        let safe_total = if total > Decimal::ZERO {
            total
        } else {
            Decimal::ONE
        };
        let safe_total = safe_total.to_f64().unwrap_or(1.0);

        let share = |segment: BreakdownSegment| -> f64 {
            segment.amount(result).to_f64().unwrap_or(0.0) / safe_total * 100.0
        };
        let percentages = SegmentShares {
            net: share(BreakdownSegment::Net),
            pension: share(BreakdownSegment::Pension),
            tax: share(BreakdownSegment::Tax),
        };

        let circumference = self.circumference();
        let offset = |pct: f64| circumference - (pct / 100.0) * circumference;

        let net_start = START_ANGLE_DEGREES;
        let pension_start = net_start + percentages.net * DEGREES_PER_PERCENT;
        let tax_start = pension_start + percentages.pension * DEGREES_PER_PERCENT;

        ChartGeometry {
            radius: self.radius,
            circumference,
            percentages,
            arcs: SegmentArcs {
                net: ArcGeometry {
                    stroke_offset: offset(percentages.net),
                    start_angle: net_start,
                },
                pension: ArcGeometry {
                    stroke_offset: offset(percentages.pension),
                    start_angle: pension_start,
                },
                tax: ArcGeometry {
                    stroke_offset: offset(percentages.tax),
                    start_angle: tax_start,
                },
            },
        }
    }
}

impl Default for BreakdownGeometry {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RING_RADIUS,
        }
    }
}

/// Derives chart geometry with the default ring radius.
pub fn derive_chart_geometry(result: &TaxResult) -> ChartGeometry {
    BreakdownGeometry::default().derive(result)
}
