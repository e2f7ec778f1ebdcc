//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量报告处理器
//! - 管理应用生命周期（初始化、运行、汇总）
//! - 批量加载图表数据（Vec<GroupChartRow>）
//! - 控制并发数量（Semaphore + spawn_blocking）
//! - 收集每组结局，不因单组失败而中断
//! - 写出结果日志和 JSON 汇总
//!
//! ### `report_processor` - 单份报告处理器
//! - 组装单个分组的输入（图表数据、结果表、路径）
//! - 校验分组名并推导输出文件名
//! - 调用 workflow::EditFlow 完成编辑
//! - 输出单份报告的状态信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<GroupChartRow>)
//!     ↓
//! report_processor (处理单个分组)
//!     ↓
//! workflow::EditFlow (编辑单份演示文稿)
//!     ↓
//! services (能力层：text / chart / table / report)
//!     ↓
//! infrastructure (基础设施：PptxPackage)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，report_processor 管单份
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和汇总，不做具体编辑判断

pub mod batch_processor;
pub mod report_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use report_processor::process_report;
