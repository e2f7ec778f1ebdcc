//! # PPT Report Generator
//!
//! 一个用于批量生成分组 PPTX 报告的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 PPTX 包内容，只暴露能力
//! - `PptxPackage` - 内存中的 ZIP 包，提供读写部件能力
//! - `xml` - 字符串级的 XML 定位与转义工具
//! - `scaffold` - 生成演示用模板文件
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 XML 部件
//! - `TextService` - 按可见文本定位并替换形状文字
//! - `ChartService` - 按标题定位图表、重建系列数据
//! - `TableService` - 整表校验与填充
//! - `ReportWriter` - 追加结果日志能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份报告"的完整编辑流程
//! - `ReportCtx` - 上下文封装（组名 + 报告编号 + 路径）
//! - `EditFlow` - 流程编排（标题页 → 图表页 → 表格页 → 保存）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量报告处理器，管理并发和汇总
//! - `orchestrator/report_processor` - 单份报告处理器，组装输入并委托流程层
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::PptxPackage;
pub use models::{
    BarChartData, BatchSummary, GroupChartData, GroupChartRow, GroupOutcome, PieChartData,
    TableData, TemplateMarkers,
};
pub use orchestrator::{process_report, App};
pub use workflow::{edit_document, EditFlow, ReportCtx};
