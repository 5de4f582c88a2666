use indexmap::IndexSet;

use crate::core::data::ChartAxis;
use crate::error::{ChartError, ChartResult};

/// Outer padding, in steps, applied on both ends of a point scale by default.
pub const DEFAULT_POINT_PADDING: f64 = 0.5;

/// Ordinal scale placing each distinct domain value at an evenly spaced pixel.
///
/// With `n` values and padding `p`, the step is `(end - start) / (n - 1 + 2p)`
/// and the first value sits `p` steps inside `start`. A single value maps to
/// the middle of the range.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: IndexSet<String>,
    range: (f64, f64),
    padding: f64,
}

impl PointScale {
    /// Builds a scale for `axis`; fails with `EmptyDomain` when there is nothing to place.
    pub fn new<I, S>(axis: ChartAxis, domain: I, range: (f64, f64)) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: IndexSet<String> = domain.into_iter().map(Into::into).collect();
        if domain.is_empty() {
            return Err(ChartError::EmptyDomain { axis });
        }
        Ok(Self {
            domain,
            range,
            padding: DEFAULT_POINT_PADDING,
        })
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_finite() {
            padding.max(0.0)
        } else {
            DEFAULT_POINT_PADDING
        };
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        let slots = (self.domain.len() as f64 - 1.0 + 2.0 * self.padding).max(1.0);
        (self.range.1 - self.range.0) / slots
    }

    /// Pixel coordinate of `value`, or `None` when it is not part of the domain.
    #[must_use]
    pub fn map(&self, value: &str) -> Option<f64> {
        let index = self.domain.get_index_of(value)?;
        Some(self.position(index))
    }

    #[must_use]
    pub fn position(&self, index: usize) -> f64 {
        let step = self.step();
        let used = step * (self.domain.len() as f64 - 1.0);
        let offset = ((self.range.1 - self.range.0) - used) * 0.5;
        self.range.0 + offset + step * index as f64
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::PointScale;
    use crate::core::data::ChartAxis;

    #[test]
    fn half_step_padding_keeps_extremes_off_the_boundary() {
        let scale = PointScale::new(ChartAxis::Period, ["a", "b", "c", "d"], (0.0, 100.0))
            .expect("scale");
        assert_relative_eq!(scale.map("a").expect("a"), 12.5);
        assert_relative_eq!(scale.map("d").expect("d"), 87.5);
        assert_relative_eq!(scale.step(), 25.0);
    }

    #[test]
    fn zero_padding_is_flush_with_range() {
        let scale = PointScale::new(ChartAxis::Ranking, ["1", "2", "3"], (10.0, 30.0))
            .expect("scale")
            .with_padding(0.0);
        assert_relative_eq!(scale.map("1").expect("1"), 10.0);
        assert_relative_eq!(scale.map("3").expect("3"), 30.0);
    }

    #[test]
    fn single_value_is_centered() {
        let scale = PointScale::new(ChartAxis::Period, ["only"], (0.0, 50.0)).expect("scale");
        assert_relative_eq!(scale.map("only").expect("only"), 25.0);
    }

    #[test]
    fn unknown_values_map_to_none() {
        let scale = PointScale::new(ChartAxis::Period, ["a"], (0.0, 1.0)).expect("scale");
        assert_eq!(scale.map("z"), None);
    }

    #[test]
    fn duplicate_domain_values_collapse() {
        let scale =
            PointScale::new(ChartAxis::Period, ["a", "b", "a"], (0.0, 100.0)).expect("scale");
        assert_eq!(scale.len(), 2);
    }
}
