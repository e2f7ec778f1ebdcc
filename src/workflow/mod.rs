pub mod edit_flow;
pub mod report_ctx;

pub use edit_flow::{edit_document, EditFlow};
pub use report_ctx::ReportCtx;
