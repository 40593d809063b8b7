//! Donut chart export.

use std::fmt;

use paye_core::calculations::{BreakdownSegment, ChartGeometry};

pub const VIEW_BOX_SIZE: f64 = 160.0;
pub const TRACK_COLOR: &str = "#1F2937";
pub const STROKE_WIDTH: f64 = 20.0;

/// The ring as a standalone SVG document.
///
/// Every segment is a full-circumference dash shifted by its stroke offset
/// and rotated to its start angle around the centre of the view box.
pub struct DonutSvg<'a>(pub &'a ChartGeometry);

impl fmt::Display for DonutSvg<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let chart = self.0;
        let centre = VIEW_BOX_SIZE / 2.0;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            size = VIEW_BOX_SIZE
        )?;
        writeln!(
            f,
            r#"  <circle cx="{centre}" cy="{centre}" r="{r}" fill="transparent" stroke="{TRACK_COLOR}" stroke-width="{STROKE_WIDTH}"/>"#,
            r = chart.radius
        )?;

        for segment in BreakdownSegment::ALL {
            let arc = chart.arcs.get(segment);
            writeln!(
                f,
                r#"  <circle cx="{centre}" cy="{centre}" r="{r}" fill="transparent" stroke="{color}" stroke-width="{STROKE_WIDTH}" stroke-dasharray="{dash:.3}" stroke-dashoffset="{offset:.3}" transform="rotate({angle:.3} {centre} {centre})"><title>{label} {pct:.1}%</title></circle>"#,
                r = chart.radius,
                color = segment.color(),
                dash = chart.circumference,
                offset = arc.stroke_offset,
                angle = arc.start_angle,
                label = segment.label(),
                pct = chart.percentages.get(segment),
            )?;
        }

        writeln!(f, "</svg>")
    }
}

/// Renders the ring as a standalone SVG document.
pub fn render_donut(chart: &ChartGeometry) -> String {
    DonutSvg(chart).to_string()
}
