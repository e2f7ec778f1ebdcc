//! 批量报告处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量报告的生成和结果汇总。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、确保输出目录存在（幂等）
//! 2. **批量加载**：读取图表数据 CSV（`Vec<GroupChartRow>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将分组分批次处理，每批完成后再开始下一批
//! 5. **结果汇总**：收集每组结局，追加结果日志并写出 JSON 汇总
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单份报告的细节
//! - **不短路**：单组失败记入结局，不中断其余分组
//! - **阻塞任务隔离**：编辑流程是同步 CPU/IO 工作，放进 spawn_blocking
//! - **向下委托**：委托 report_processor 处理单份报告

use crate::config::Config;
use crate::models::{load_chart_rows, BatchSummary, GroupChartRow, GroupOutcome};
use crate::orchestrator::report_processor;
use crate::services::ReportWriter;
use crate::utils::logging;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    report_writer: ReportWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化结果日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_reports);

        // 确保输出目录存在，重复创建无副作用
        tokio::fs::create_dir_all(&config.output_dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", config.output_dir))?;

        let report_writer = ReportWriter::with_path(&config.output_log_file);

        Ok(Self {
            config,
            report_writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchSummary> {
        // 加载所有分组的图表数据
        let all_rows = self.load_rows().await?;

        if all_rows.is_empty() {
            warn!("⚠️ 图表数据中没有任何分组，程序结束");
            return Ok(BatchSummary::from_outcomes(Vec::new()));
        }

        let total_rows = all_rows.len();
        logging::log_reports_loaded(total_rows, self.config.max_concurrent_reports);

        // 处理所有分组
        let outcomes = self.process_all_reports(all_rows).await?;

        // 汇总并写出 JSON
        let summary = BatchSummary::from_outcomes(outcomes);
        self.write_summary(&summary).await?;

        logging::print_final_stats(
            summary.success,
            summary.failed,
            summary.total,
            &self.config.output_log_file,
        );

        Ok(summary)
    }

    /// 加载图表数据
    async fn load_rows(&self) -> Result<Vec<GroupChartRow>> {
        info!("\n📁 正在读取图表数据...");
        let path = PathBuf::from(&self.config.data_dir).join(&self.config.chart_data_file);
        let rows = tokio::task::spawn_blocking(move || load_chart_rows(&path)).await??;
        Ok(rows)
    }

    /// 处理所有报告
    async fn process_all_reports(
        &self,
        all_rows: Vec<GroupChartRow>,
    ) -> Result<Vec<GroupOutcome>> {
        let max_concurrent = self.config.max_concurrent_reports;
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let total_rows = all_rows.len();
        let mut outcomes = Vec::with_capacity(total_rows);

        // 分批处理
        for batch_start in (0..total_rows).step_by(max_concurrent) {
            let batch_end = (batch_start + max_concurrent).min(total_rows);
            let batch_rows = &all_rows[batch_start..batch_end];
            let batch_num = (batch_start / max_concurrent) + 1;
            let total_batches = (total_rows + max_concurrent - 1) / max_concurrent;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_rows,
            );

            // 处理本批
            let batch_outcomes = self
                .process_batch(batch_rows, batch_start, semaphore.clone())
                .await?;

            let batch_success = batch_outcomes.iter().filter(|o| o.success).count();
            logging::log_batch_complete(batch_num, batch_success, batch_outcomes.len());

            outcomes.extend(batch_outcomes);
        }

        Ok(outcomes)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_rows: &[GroupChartRow],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<Vec<GroupOutcome>> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, row) in batch_rows.iter().enumerate() {
            let report_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let row_clone = row.clone();
            let config_clone = self.config.clone();

            // 编辑流程全程是同步的文件和字符串操作，放进阻塞线程池
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                report_processor::process_report(&row_clone, report_index, &config_clone)
            });
            batch_handles.push((report_index, row.group.clone(), handle));
        }

        // 等待本批所有任务完成，逐个收集结局
        let mut outcomes = Vec::with_capacity(batch_handles.len());

        for (report_index, group, handle) in batch_handles {
            let outcome = match handle.await {
                Ok(Ok(status)) => GroupOutcome::success(&group, status),
                Ok(Err(e)) => {
                    error!("[报告 {}] ❌ 处理过程中发生错误: {:#}", report_index, e);
                    GroupOutcome::failure(&group, format!("{:#}", e))
                }
                Err(e) => {
                    error!("[报告 {}] 任务执行失败: {}", report_index, e);
                    GroupOutcome::failure(&group, format!("任务执行失败: {}", e))
                }
            };

            // 逐条追加到结果日志
            self.report_writer.write(&outcome).await?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// 写出 JSON 汇总文件
    async fn write_summary(&self, summary: &BatchSummary) -> Result<()> {
        let json = serde_json::to_string_pretty(summary)?;
        tokio::fs::write(&self.config.summary_file, json)
            .await
            .with_context(|| format!("无法写出汇总文件: {}", self.config.summary_file))?;
        info!("📄 汇总已写出: {}", self.config.summary_file);
        Ok(())
    }
}
