//! Per-pass data snapshot handed in by the host's data view.
//!
//! Everything here is rebuilt on each render pass. The only mutation path
//! back to the host is [`MarkingSink`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::color::HexColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub u64);

/// The three categorical axes a bump chart is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartAxis {
    Period,
    Ranking,
    LineBy,
}

impl ChartAxis {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Period => "Period",
            Self::Ranking => "Ranking",
            Self::LineBy => "Line By",
        }
    }
}

impl fmt::Display for ChartAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row's position on one categorical axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafValue {
    pub formatted: String,
    pub leaf_index: usize,
}

impl LeafValue {
    #[must_use]
    pub fn new(formatted: impl Into<String>, leaf_index: usize) -> Self {
        Self {
            formatted: formatted.into(),
            leaf_index,
        }
    }
}

/// Value of a named extra axis (tooltip/display axes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisValue {
    Categorical(String),
    Continuous { value: f64, formatted: String },
}

impl AxisValue {
    #[must_use]
    pub fn formatted_value(&self) -> &str {
        match self {
            Self::Categorical(formatted) | Self::Continuous { formatted, .. } => formatted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub id: RowId,
    pub period: LeafValue,
    pub ranking: LeafValue,
    pub line_by: LeafValue,
    pub color: HexColor,
    #[serde(default)]
    pub marked: bool,
    #[serde(default)]
    pub values: IndexMap<String, AxisValue>,
}

impl DataRow {
    #[must_use]
    pub fn categorical(&self, axis: ChartAxis) -> &LeafValue {
        match axis {
            ChartAxis::Period => &self.period,
            ChartAxis::Ranking => &self.ranking,
            ChartAxis::LineBy => &self.line_by,
        }
    }

    /// Continuous accessor for a named extra axis.
    #[must_use]
    pub fn continuous(&self, axis_name: &str) -> Option<f64> {
        match self.values.get(axis_name)? {
            AxisValue::Continuous { value, .. } => Some(*value),
            AxisValue::Categorical(_) => None,
        }
    }

    /// Formatted value by axis name, covering the three chart axes and any extra axis.
    #[must_use]
    pub fn formatted_value(&self, axis_name: &str) -> Option<&str> {
        for axis in [ChartAxis::Period, ChartAxis::Ranking, ChartAxis::LineBy] {
            if axis.name() == axis_name {
                return Some(&self.categorical(axis).formatted);
            }
        }
        self.values.get(axis_name).map(AxisValue::formatted_value)
    }
}

/// Terminal node of an axis hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLeaf {
    /// Stable identity across passes; used as the reconciliation key.
    pub key: String,
    pub formatted_path: String,
    pub leaf_index: usize,
    pub rows: Vec<RowId>,
}

impl AxisLeaf {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        formatted_path: impl Into<String>,
        leaf_index: usize,
    ) -> Self {
        Self {
            key: key.into(),
            formatted_path: formatted_path.into(),
            leaf_index,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SnapshotParts {
    periods: Vec<AxisLeaf>,
    rankings: Vec<AxisLeaf>,
    lines: Vec<AxisLeaf>,
    rows: Vec<DataRow>,
}

/// Immutable data view for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotParts", into = "SnapshotParts")]
pub struct BumpChartSnapshot {
    periods: Vec<AxisLeaf>,
    rankings: Vec<AxisLeaf>,
    lines: Vec<AxisLeaf>,
    rows: IndexMap<RowId, DataRow>,
}

impl BumpChartSnapshot {
    #[must_use]
    pub fn new(
        periods: Vec<AxisLeaf>,
        rankings: Vec<AxisLeaf>,
        lines: Vec<AxisLeaf>,
        rows: Vec<DataRow>,
    ) -> Self {
        Self {
            periods,
            rankings,
            lines,
            rows: rows.into_iter().map(|row| (row.id, row)).collect(),
        }
    }

    /// Leaves of `axis` in hierarchy order.
    #[must_use]
    pub fn leaves(&self, axis: ChartAxis) -> &[AxisLeaf] {
        match axis {
            ChartAxis::Period => &self.periods,
            ChartAxis::Ranking => &self.rankings,
            ChartAxis::LineBy => &self.lines,
        }
    }

    #[must_use]
    pub fn leaf(&self, axis: ChartAxis, leaf_index: usize) -> Option<&AxisLeaf> {
        self.leaves(axis).get(leaf_index)
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&DataRow> {
        self.rows.get(&id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.values()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows of a leaf in the leaf's order; ids missing from the snapshot are skipped.
    pub fn leaf_rows<'a>(&'a self, leaf: &'a AxisLeaf) -> impl Iterator<Item = &'a DataRow> {
        leaf.rows.iter().filter_map(|id| self.rows.get(id))
    }

    #[must_use]
    pub fn marked_row_count(&self, leaf: &AxisLeaf) -> usize {
        self.leaf_rows(leaf).filter(|row| row.marked).count()
    }
}

impl From<SnapshotParts> for BumpChartSnapshot {
    fn from(parts: SnapshotParts) -> Self {
        Self::new(parts.periods, parts.rankings, parts.lines, parts.rows)
    }
}

impl From<BumpChartSnapshot> for SnapshotParts {
    fn from(snapshot: BumpChartSnapshot) -> Self {
        Self {
            periods: snapshot.periods,
            rankings: snapshot.rankings,
            lines: snapshot.lines,
            rows: snapshot.rows.into_values().collect(),
        }
    }
}

/// Builds a snapshot from flat `(line, period, rank)` records.
///
/// Period and rank leaves keep the order they are declared in; lines are
/// created on first use. Line keys are the line labels.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    periods: IndexMap<String, AxisLeaf>,
    rankings: IndexMap<String, AxisLeaf>,
    lines: IndexMap<String, AxisLeaf>,
    rows: Vec<DataRow>,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_periods<I, S>(mut self, periods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for period in periods {
            let period = period.into();
            let index = self.periods.len();
            self.periods
                .entry(period.clone())
                .or_insert_with(|| AxisLeaf::new(period.clone(), period, index));
        }
        self
    }

    #[must_use]
    pub fn with_rankings<I, S>(mut self, rankings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for rank in rankings {
            let rank = rank.into();
            let index = self.rankings.len();
            self.rankings
                .entry(rank.clone())
                .or_insert_with(|| AxisLeaf::new(rank.clone(), rank, index));
        }
        self
    }

    /// Adds one row; unknown periods and ranks are appended as new leaves.
    #[must_use]
    pub fn with_row(
        mut self,
        line: &str,
        period: &str,
        rank: &str,
        color: HexColor,
        marked: bool,
    ) -> Self {
        let id = RowId(self.rows.len() as u64);
        let period = Self::attach(&mut self.periods, period, id);
        let ranking = Self::attach(&mut self.rankings, rank, id);
        let line_by = Self::attach(&mut self.lines, line, id);
        self.rows.push(DataRow {
            id,
            period,
            ranking,
            line_by,
            color,
            marked,
            values: IndexMap::new(),
        });
        self
    }

    fn attach(leaves: &mut IndexMap<String, AxisLeaf>, label: &str, id: RowId) -> LeafValue {
        let index = leaves.len();
        let leaf = leaves
            .entry(label.to_owned())
            .or_insert_with(|| AxisLeaf::new(label, label, index));
        leaf.rows.push(id);
        LeafValue::new(label, leaf.leaf_index)
    }

    #[must_use]
    pub fn build(self) -> BumpChartSnapshot {
        let mut snapshot = BumpChartSnapshot::new(
            self.periods.into_values().collect(),
            self.rankings.into_values().collect(),
            self.lines.into_values().collect(),
            self.rows,
        );
        // Line rows follow period order regardless of insertion order.
        let rows = &snapshot.rows;
        for line in &mut snapshot.lines {
            line.rows.sort_by_key(|id| {
                rows.get(id)
                    .map_or(usize::MAX, |row| row.period.leaf_index)
            });
        }
        snapshot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkingOperation {
    Replace,
    ToggleOrAdd,
}

impl MarkingOperation {
    /// `ToggleOrAdd` while ctrl/meta is held, `Replace` otherwise.
    #[must_use]
    pub fn from_toggle(toggle: bool) -> Self {
        if toggle {
            Self::ToggleOrAdd
        } else {
            Self::Replace
        }
    }
}

/// Selection mutations delegated to the host's data view.
pub trait MarkingSink {
    fn mark_row(&mut self, row: RowId, operation: MarkingOperation);
    /// Marks every row under one leaf, e.g. a whole line.
    fn mark_leaf(&mut self, axis: ChartAxis, leaf_index: usize, operation: MarkingOperation);
    fn clear_marking(&mut self);
}

/// One recorded marking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkingCommand {
    MarkRow {
        row: RowId,
        operation: MarkingOperation,
    },
    MarkLeaf {
        axis: ChartAxis,
        leaf_index: usize,
        operation: MarkingOperation,
    },
    Clear,
}

/// Collects commands for hosts that apply marking asynchronously, and for tests.
impl MarkingSink for Vec<MarkingCommand> {
    fn mark_row(&mut self, row: RowId, operation: MarkingOperation) {
        self.push(MarkingCommand::MarkRow { row, operation });
    }

    fn mark_leaf(&mut self, axis: ChartAxis, leaf_index: usize, operation: MarkingOperation) {
        self.push(MarkingCommand::MarkLeaf {
            axis,
            leaf_index,
            operation,
        });
    }

    fn clear_marking(&mut self) {
        self.push(MarkingCommand::Clear);
    }
}
