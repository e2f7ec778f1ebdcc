//! 单个报告处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责为单个分组生成一份报告，是报告级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **路径推导**：清洗分组名，拼出输出文件路径
//! 2. **数据装载**：读取该组的结果表 CSV
//! 3. **数据展开**：把 CSV 数据行展开为图表数据
//! 4. **流程调度**：创建并执行 `EditFlow`
//! 5. **统计输出**：记录单份报告的处理结果

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, DataError};
use crate::models::loaders::load_table_data;
use crate::models::{sanitize_group_stem, GroupChartRow};
use crate::workflow::{EditFlow, ReportCtx};

/// 处理单个分组的报告
///
/// # 参数
/// - `row`: 该分组的图表数据行
/// - `report_index`: 报告索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 成功时返回状态消息
pub fn process_report(row: &GroupChartRow, report_index: usize, config: &Config) -> Result<String> {
    let group = &row.group;
    log_report_start(report_index, group);

    // 清洗分组名，推导输出路径
    let stem =
        sanitize_group_stem(group).with_context(|| format!("分组名不合法: \"{}\"", group))?;
    let output_path =
        PathBuf::from(&config.output_dir).join(format!("{}{}.pptx", config.output_prefix, stem));

    // 该组的结果表文件按原始分组名查找
    let table_path = PathBuf::from(&config.data_dir)
        .join(format!("{}{}.csv", config.table_file_prefix, group));
    if !table_path.exists() {
        return Err(AppError::Data(DataError::TableDataMissing {
            group: group.clone(),
            path: table_path.display().to_string(),
        })
        .into());
    }
    let table_data = load_table_data(&table_path)
        .with_context(|| format!("读取组 \"{}\" 的结果表失败", group))?;

    // 展开图表数据
    let chart_data = row.chart_data()?;

    // 执行编辑流程（委托给 EditFlow）
    let ctx = ReportCtx::new(
        group.clone(),
        report_index,
        PathBuf::from(&config.template_path),
        output_path,
    );
    let status = EditFlow::new(config).run(&ctx, &chart_data, &table_data)?;

    log_report_complete(report_index, group, &status);
    Ok(status)
}

// ========== 日志辅助函数 ==========

fn log_report_start(report_index: usize, group: &str) {
    info!("[报告 {}] 开始处理", report_index);
    info!("[报告 {}] 分组: {}", report_index, group);
}

fn log_report_complete(report_index: usize, group: &str, status: &str) {
    info!("[报告 {}] 状态: {}", report_index, status);
    info!("\n[报告 {}] ✅ 组 {} 处理完成\n", report_index, group);
}
