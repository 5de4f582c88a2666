//! Thick line segments between consecutive markers of one line.
//!
//! Segments are filled quads rather than stroked lines so a two-color gradient
//! can run along them. A segment is only built between rows whose periods are
//! adjacent leaves; a missing period breaks the line.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::color::{GradientKey, HexColor};
use super::data::{DataRow, RowId};
use super::types::Point;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentFill {
    Solid(HexColor),
    Gradient(GradientKey),
}

impl SegmentFill {
    #[must_use]
    pub fn between(from: HexColor, to: HexColor) -> Self {
        if from == to {
            Self::Solid(from)
        } else {
            Self::Gradient(GradientKey::from_pair(from, to))
        }
    }
}

/// Two-stop linear gradient definition shared by all segments with its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientDef {
    pub key: GradientKey,
    pub from: HexColor,
    pub to: HexColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: RowId,
    pub to: RowId,
    pub polygon: [Point; 4],
    pub fill: SegmentFill,
}

impl LineSegment {
    /// Reconciliation key within one line.
    #[must_use]
    pub fn key(&self) -> (RowId, RowId) {
        (self.from, self.to)
    }
}

/// Caps the line width at the marker diameter so the edge offset stays real.
#[must_use]
pub fn clamp_line_width(line_width: f64, marker_radius: f64) -> f64 {
    if !line_width.is_finite() || !marker_radius.is_finite() || marker_radius <= 0.0 {
        return 0.0;
    }
    line_width.clamp(0.0, marker_radius * 2.0)
}

/// Quad from the edge of the marker at `a` to the edge of the marker at `b`.
///
/// Vertex order: start-left, end-left, end-right, start-right.
#[must_use]
pub fn segment_polygon(a: Point, b: Point, marker_radius: f64, line_width: f64) -> [Point; 4] {
    let line_width = clamp_line_width(line_width, marker_radius);
    let half_width = line_width * 0.5;
    let radius = marker_radius.max(0.0);

    let angle = (b.x - a.x).atan2(b.y - a.y);
    let (sin, cos) = angle.sin_cos();
    let h = (radius * radius - half_width * half_width).max(0.0).sqrt();

    let dx = h * sin;
    let dy = h * cos;
    let dxx = half_width * cos;
    let dyy = half_width * sin;

    [
        Point::new(a.x + dx + dxx, a.y + dy - dyy),
        Point::new(b.x - dx + dxx, b.y - dy - dyy),
        Point::new(b.x - dx - dxx, b.y - dy + dyy),
        Point::new(a.x + dx - dxx, a.y + dy + dyy),
    ]
}

/// Consecutive row pairs whose period leaf indices differ by exactly one.
pub fn adjacent_pairs<'a>(
    rows: &'a [&'a DataRow],
) -> impl Iterator<Item = (&'a DataRow, &'a DataRow)> + 'a {
    rows.windows(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(a, b)| b.period.leaf_index.checked_sub(a.period.leaf_index) == Some(1))
}

/// Builds every segment of one line.
///
/// `rows` must be ordered by period. `position` resolves a row's marker
/// center; rows it cannot place are skipped along with their segments.
pub fn build_line_segments<F>(
    rows: &[&DataRow],
    position: F,
    marker_radius: f64,
    line_width: f64,
) -> Vec<LineSegment>
where
    F: Fn(&DataRow) -> Option<Point>,
{
    adjacent_pairs(rows)
        .filter_map(|(a, b)| {
            let start = position(a)?;
            let end = position(b)?;
            Some(LineSegment {
                from: a.id,
                to: b.id,
                polygon: segment_polygon(start, end, marker_radius, line_width),
                fill: SegmentFill::between(a.color, b.color),
            })
        })
        .collect()
}

/// Distinct gradients referenced by `segments`, in first-use order.
pub fn collect_gradients<'a, I>(segments: I) -> IndexMap<GradientKey, GradientDef>
where
    I: IntoIterator<Item = &'a LineSegment>,
{
    let mut gradients = IndexMap::new();
    for segment in segments {
        let SegmentFill::Gradient(key) = &segment.fill else {
            continue;
        };
        if gradients.contains_key(key) {
            continue;
        }
        if let Ok((from, to)) = key.stops() {
            gradients.insert(
                key.clone(),
                GradientDef {
                    key: key.clone(),
                    from,
                    to,
                },
            );
        }
    }
    gradients
}
