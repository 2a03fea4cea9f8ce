//! Report rendering: ECharts option construction and HTML page composition.

pub mod charts;
pub mod page;

pub use charts::Chart;
pub use page::{render_page, write_report, ReportError};
