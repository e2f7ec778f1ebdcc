//! 报告编辑流程 - 流程层
//!
//! 核心职责：定义"一份报告"的完整编辑流程
//!
//! 流程顺序：
//! 1. 打开模板，按演示顺序取幻灯片
//! 2. 标题页：主标题 + 副标题
//! 3. 图表页：页标题 → 按标题定位图表 → 整体重建柱状图/饼图
//! 4. 表格页：页标题 → 填充结果表
//! 5. 盖修改时间戳，一次性落盘

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, DataError, TemplateError};
use crate::infrastructure::PptxPackage;
use crate::models::markers::TemplateMarkers;
use crate::models::{GroupChartData, TableData};
use crate::services::{ChartService, TableService, TextService};
use crate::workflow::report_ctx::ReportCtx;

/// 报告编辑流程
///
/// - 编排完整的单报告编辑流程
/// - 决定何时替换文本、何时重建图表、何时落盘
/// - 全程在内存中构建，只在最后一步写文件
/// - 只依赖业务能力（services）
pub struct EditFlow {
    text_service: TextService,
    chart_service: ChartService,
    table_service: TableService,
    markers: TemplateMarkers,
    verbose_logging: bool,
}

impl EditFlow {
    /// 创建新的报告编辑流程
    pub fn new(config: &Config) -> Self {
        Self {
            text_service: TextService::new(),
            chart_service: ChartService::new(),
            table_service: TableService::new(),
            markers: TemplateMarkers::default(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 执行完整的编辑流程
    ///
    /// # 参数
    /// - `ctx`: 报告上下文（分组名、模板路径、输出路径）
    /// - `chart_data`: 两张图表的数据
    /// - `table_data`: 结果表数据
    ///
    /// # 返回
    /// 成功时返回状态消息；任何一步失败都不会产生输出文件
    pub fn run(
        &self,
        ctx: &ReportCtx,
        chart_data: &GroupChartData,
        table_data: &TableData,
    ) -> AppResult<String> {
        if ctx.group.trim().is_empty() {
            return Err(DataError::EmptyGroupName.into());
        }

        // ========== 步骤 1/5: 打开模板 ==========
        info!(
            "[报告 {}] 📦 打开模板: {}",
            ctx.report_index,
            ctx.template_path.display()
        );
        let mut package = PptxPackage::open(&ctx.template_path)?;
        let slides = package.slide_parts()?;
        let title_slide = slide_at(&slides, 0)?.to_string();
        let chart_slide = slide_at(&slides, 1)?.to_string();
        let table_slide = slide_at(&slides, 2)?.to_string();

        // ========== 步骤 2/5: 标题页 ==========
        info!("[报告 {}] ✏️ 替换标题页文本", ctx.report_index);
        let title_text = format!("Presentation for Group {}", ctx.group);
        let subtitle_text = format!("Financial Information for Group {}", ctx.group);

        let slide_xml = package.part_string(&title_slide)?;
        let slide_xml = self.text_service.replace_shape_text(
            &title_slide,
            &slide_xml,
            &self.markers.title,
            &title_text,
        )?;
        let slide_xml = self.text_service.replace_shape_text(
            &title_slide,
            &slide_xml,
            &self.markers.subtitle,
            &subtitle_text,
        )?;
        package.set_part(&title_slide, slide_xml);

        // ========== 步骤 3/5: 图表页 ==========
        info!("[报告 {}] 📊 重建图表", ctx.report_index);
        let heading = format!("Financial Results Summary for Group {}", ctx.group);
        let slide_xml = package.part_string(&chart_slide)?;
        let slide_xml = self.text_service.replace_shape_text(
            &chart_slide,
            &slide_xml,
            &self.markers.chart_heading,
            &heading,
        )?;
        package.set_part(&chart_slide, slide_xml);

        let chart_parts = package.chart_parts_of_slide(&chart_slide)?;
        if self.verbose_logging {
            self.log_chart_parts(ctx.report_index, &chart_parts);
        }
        let mut charts = Vec::with_capacity(chart_parts.len());
        for part in &chart_parts {
            charts.push((part.clone(), package.part_string(part)?));
        }

        let bar_index = self
            .chart_service
            .find_by_title(&charts, &self.markers.bar_chart_title)?;
        let pie_index = self
            .chart_service
            .find_by_title(&charts, &self.markers.pie_chart_title)?;

        let bar_title = format!("Sales by Category: Group {}", ctx.group);
        let bar_xml = self
            .chart_service
            .replace_bar_series(&charts[bar_index].1, &chart_data.bar)?;
        let bar_xml = self.chart_service.set_title(&bar_xml, &bar_title)?;
        package.set_part(&charts[bar_index].0, bar_xml);

        let pie_title = format!("Sales by Quarter: Group {}", ctx.group);
        let pie_xml = self
            .chart_service
            .replace_pie_series(&charts[pie_index].1, &chart_data.pie)?;
        let pie_xml = self.chart_service.set_title(&pie_xml, &pie_title)?;
        package.set_part(&charts[pie_index].0, pie_xml);

        // ========== 步骤 4/5: 表格页 ==========
        info!("[报告 {}] 📋 填充结果表", ctx.report_index);
        let heading = format!("Results Table for Group {}", ctx.group);
        let slide_xml = package.part_string(&table_slide)?;
        let slide_xml = self.text_service.replace_shape_text(
            &table_slide,
            &slide_xml,
            &self.markers.table_heading,
            &heading,
        )?;
        let slide_xml = self.table_service.fill_table(&slide_xml, table_data)?;
        package.set_part(&table_slide, slide_xml);

        // ========== 步骤 5/5: 落盘 ==========
        if let Some(parent) = ctx.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::file_write_failed(parent.display().to_string(), e)
                })?;
            }
        }
        package.stamp_modified(&chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string())?;
        package.save(&ctx.output_path)?;
        info!(
            "[报告 {}] 💾 已保存: {}",
            ctx.report_index,
            ctx.output_path.display()
        );

        Ok(format!("Successfully saved version {}!", ctx.group))
    }

    // ========== 日志辅助方法 ==========

    /// 显示幻灯片引用的图表部件
    fn log_chart_parts(&self, report_index: usize, chart_parts: &[String]) {
        for (i, part) in chart_parts.iter().enumerate() {
            debug!("[报告 {}]   图表部件 {}: {}", report_index, i + 1, part);
        }
    }
}

/// 按下标取幻灯片部件名，错误信息里下标从 1 开始计
fn slide_at(slides: &[String], index: usize) -> AppResult<&str> {
    slides.get(index).map(|s| s.as_str()).ok_or_else(|| {
        TemplateError::SlideMissing {
            index: index + 1,
            found: slides.len(),
        }
        .into()
    })
}

/// 按分组数据编辑模板并另存为新文件
///
/// # 参数
/// - `group`: 分组名
/// - `chart_data`: 两张图表的数据
/// - `table_data`: 结果表数据
/// - `input_path`: 模板路径
/// - `output_path`: 输出路径
///
/// # 返回
/// 成功时返回状态消息 "Successfully saved version {group}!"
pub fn edit_document(
    group: &str,
    chart_data: &GroupChartData,
    table_data: &TableData,
    input_path: &Path,
    output_path: &Path,
) -> AppResult<String> {
    let ctx = ReportCtx::new(
        group.to_string(),
        1,
        input_path.to_path_buf(),
        output_path.to_path_buf(),
    );
    EditFlow::new(&Config::default()).run(&ctx, chart_data, table_data)
}
