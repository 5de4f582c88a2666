//! Label footprint estimates and decimation stride.
//!
//! No text is measured: a character is assumed to be half the font size wide,
//! which keeps the stride deterministic for identical inputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl LabelOrientation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }
}

/// Estimated pixel width of `text` rendered at `font_size_px`.
#[must_use]
pub fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * 0.5
}

/// Estimated width of the longest label in `labels`; zero when empty.
#[must_use]
pub fn longest_label_width<'a, I>(labels: I, font_size_px: f64) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(|label| estimate_text_width(label, font_size_px))
        .fold(0.0, f64::max)
}

/// Pixel footprint of one label along the axis it is spread on.
///
/// Horizontal labels occupy their text width, rotated labels one line height.
#[must_use]
pub fn label_footprint(
    orientation: LabelOrientation,
    max_text_width: f64,
    font_size_px: f64,
) -> f64 {
    match orientation {
        LabelOrientation::Horizontal => max_text_width,
        LabelOrientation::Vertical => font_size_px,
    }
}

/// Every `stride`-th label is drawn, starting with index 0.
///
/// `ceil(footprint * count / available)`, never below 1. A non-positive or
/// non-finite budget leaves room for the first label only.
#[must_use]
pub fn label_stride(footprint_px: f64, count: usize, available_px: f64) -> usize {
    let count_floor = count.max(1);
    if !footprint_px.is_finite() || footprint_px <= 0.0 || count == 0 {
        return 1;
    }
    if !available_px.is_finite() || available_px <= 0.0 {
        return count_floor;
    }
    let stride = (footprint_px * count as f64 / available_px).ceil();
    if stride >= count_floor as f64 {
        count_floor
    } else {
        (stride as usize).max(1)
    }
}

/// Items kept by a stride.
pub fn decimate<T>(items: &[T], stride: usize) -> impl Iterator<Item = (usize, &T)> {
    let stride = stride.max(1);
    items
        .iter()
        .enumerate()
        .filter(move |(index, _)| index % stride == 0)
}

#[cfg(test)]
mod tests {
    use super::{LabelOrientation, decimate, estimate_text_width, label_footprint, label_stride};

    #[test]
    fn text_width_is_half_font_size_per_char() {
        assert_eq!(estimate_text_width("2021-Q1", 12.0), 42.0);
        assert_eq!(estimate_text_width("", 12.0), 0.0);
    }

    #[test]
    fn footprint_depends_on_orientation() {
        assert_eq!(label_footprint(LabelOrientation::Horizontal, 40.0, 12.0), 40.0);
        assert_eq!(label_footprint(LabelOrientation::Vertical, 40.0, 12.0), 12.0);
    }

    #[test]
    fn stride_is_one_when_labels_fit() {
        assert_eq!(label_stride(10.0, 10, 500.0), 1);
    }

    #[test]
    fn stride_rounds_up() {
        assert_eq!(label_stride(30.0, 10, 100.0), 3);
    }

    #[test]
    fn collapsed_axis_shows_first_label_only() {
        assert_eq!(label_stride(12.0, 7, 0.0), 7);
        let shown: Vec<usize> = decimate(&[0; 7], 7).map(|(index, _)| index).collect();
        assert_eq!(shown, vec![0]);
    }

    #[test]
    fn decimate_always_keeps_index_zero() {
        let shown: Vec<char> = decimate(&['a', 'b', 'c', 'd', 'e'], 2)
            .map(|(_, c)| *c)
            .collect();
        assert_eq!(shown, vec!['a', 'c', 'e']);
    }
}
