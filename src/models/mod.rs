pub mod chart;
pub mod group;
pub mod loaders;
pub mod markers;
pub mod report;
pub mod table;

pub use chart::{BarChartData, GroupChartData, GroupChartRow, PieChartData, Series};
pub use group::sanitize_group_stem;
pub use loaders::{load_chart_rows, load_table_data};
pub use markers::TemplateMarkers;
pub use report::{BatchSummary, GroupOutcome};
pub use table::TableData;
