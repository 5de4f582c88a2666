pub mod color;
pub mod data;
pub mod geometry;
pub mod grid;
pub mod label_density;
pub mod scale;
pub mod segments;
pub mod types;

pub use color::{GradientKey, HexColor, contrast_color, contrast_ratio, relative_luminance};
pub use data::{
    AxisLeaf, AxisValue, BumpChartSnapshot, ChartAxis, DataRow, LeafValue, MarkingCommand,
    MarkingOperation, MarkingSink, RowId, SnapshotBuilder,
};
pub use geometry::{Circle, MarkerShape, Rect, circle_in_rect, point_in_polygon};
pub use grid::{Grid, GridAddress, GridArea, SizeTemplate, SizeToken};
pub use label_density::{
    LabelOrientation, decimate, estimate_text_width, label_footprint, label_stride,
    longest_label_width,
};
pub use scale::{DEFAULT_POINT_PADDING, PointScale};
pub use segments::{
    GradientDef, LineSegment, SegmentFill, adjacent_pairs, build_line_segments, clamp_line_width,
    collect_gradients, segment_polygon,
};
pub use types::{Point, Viewport};
