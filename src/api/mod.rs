mod config;
mod engine;
mod layout;
mod pointer;
mod render_pass;
mod tooltip;

pub use config::{BumpChartConfig, ChartStyle, DEFAULT_MAX_ROWS};
pub use engine::BumpChart;
pub use layout::ChartLayout;
pub use pointer::ClickOutcome;
pub use render_pass::{PassStatus, RenderPassReport};
pub use tooltip::{HoverOutcome, TooltipAxis, tooltip_text};
