pub mod chart_service;
pub mod report_writer;
pub mod table_service;
pub mod text_service;

pub use chart_service::ChartService;
pub use report_writer::ReportWriter;
pub use table_service::TableService;
pub use text_service::TextService;
