//! 图表重建服务 - 业务能力层
//!
//! 只负责"按标题定位图表、整体重建系列、改写标题"能力，不关心流程

use crate::error::{AppError, AppResult, ChartError};
use crate::infrastructure::xml;
use crate::models::chart::{BarChartData, PieChartData};

/// 图表重建服务
///
/// 职责：
/// - 在图表部件列表中按标题文本唯一定位目标图表
/// - 一次性重建柱状图/饼图的全部系列（类别与数值成对写入）
/// - 改写图表标题
/// - 重建时保留模板原有的坐标轴 ID
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// 读取图表自身的标题文本（plotArea 之后的轴标题不算）
    pub fn chart_title(&self, chart_xml: &str) -> String {
        match title_range(chart_xml) {
            Some((start, end)) => xml::visible_text(&chart_xml[start..end]).trim().to_string(),
            None => String::new(),
        }
    }

    /// 在 (部件名, 内容) 列表中按标题文本唯一定位图表
    ///
    /// # 参数
    /// - `charts`: 幻灯片引用的全部图表部件
    /// - `title_marker`: 模板标题文本，按"包含"匹配
    ///
    /// # 返回
    /// 命中的下标；匹配数不等于 1 时报错
    pub fn find_by_title(
        &self,
        charts: &[(String, String)],
        title_marker: &str,
    ) -> AppResult<usize> {
        let hits: Vec<usize> = charts
            .iter()
            .enumerate()
            .filter(|(_, (_, content))| self.chart_title(content).contains(title_marker))
            .map(|(i, _)| i)
            .collect();

        if hits.len() != 1 {
            return Err(AppError::chart_not_found(title_marker, hits.len()));
        }
        Ok(hits[0])
    }

    /// 整体重建柱状图的系列：类别加全部系列一次写入
    ///
    /// 模板里的 c:axId 原样保留，图表的其余部分（坐标轴、图例等）不动。
    pub fn replace_bar_series(&self, chart_xml: &str, data: &BarChartData) -> AppResult<String> {
        let blocks = xml::element_blocks(chart_xml, "c:barChart");
        if blocks.len() != 1 {
            return Err(ChartError::KindMismatch {
                expected_element: "c:barChart".to_string(),
                found: blocks.len(),
            }
            .into());
        }
        let (start, end) = blocks[0];
        let old_block = &chart_xml[start..end];

        let ids = axis_ids(old_block);
        if ids.len() < 2 {
            return Err(ChartError::AxisIdsMissing { found: ids.len() }.into());
        }

        let mut sers = String::new();
        for (i, series) in data.series().iter().enumerate() {
            sers.push_str(&series_xml(i, &series.name, data.categories(), &series.values));
        }
        let mut axes = String::new();
        for id in &ids {
            axes.push_str(&format!("<c:axId val=\"{}\"/>", id));
        }

        let new_block = format!(
            "<c:barChart><c:barDir val=\"col\"/><c:grouping val=\"clustered\"/><c:varyColors val=\"0\"/>\
             {}<c:gapWidth val=\"150\"/>{}</c:barChart>",
            sers, axes
        );
        Ok(splice(chart_xml, start, end, &new_block))
    }

    /// 整体重建饼图的唯一系列
    pub fn replace_pie_series(&self, chart_xml: &str, data: &PieChartData) -> AppResult<String> {
        let blocks = xml::element_blocks(chart_xml, "c:pieChart");
        if blocks.len() != 1 {
            return Err(ChartError::KindMismatch {
                expected_element: "c:pieChart".to_string(),
                found: blocks.len(),
            }
            .into());
        }
        let (start, end) = blocks[0];

        let series = data.series();
        let ser = series_xml(0, &series.name, data.categories(), &series.values);
        let new_block = format!(
            "<c:pieChart><c:varyColors val=\"1\"/>{}<c:firstSliceAng val=\"0\"/></c:pieChart>",
            ser
        );
        Ok(splice(chart_xml, start, end, &new_block))
    }

    /// 改写图表标题为给定文本
    pub fn set_title(&self, chart_xml: &str, title: &str) -> AppResult<String> {
        let (start, end) = title_range(chart_xml).ok_or(ChartError::TitleMissing)?;
        let new_title = format!(
            "<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/>{}</c:rich></c:tx><c:overlay val=\"0\"/></c:title>",
            xml::text_paragraph(title)
        );
        Ok(splice(chart_xml, start, end, &new_title))
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// 图表自身标题的范围：第一个 c:title 且必须位于 plotArea 之前
fn title_range(chart_xml: &str) -> Option<(usize, usize)> {
    let blocks = xml::element_blocks(chart_xml, "c:title");
    let (start, end) = *blocks.first()?;
    if let Some(plot_start) = chart_xml.find("<c:plotArea") {
        if start > plot_start {
            return None;
        }
    }
    Some((start, end))
}

/// 收集块内全部 c:axId 的 val
fn axis_ids(block: &str) -> Vec<String> {
    let mut ids = Vec::new();
    for (start, end) in xml::element_blocks(block, "c:axId") {
        if let Some(value) = xml::attr_value(&block[start..end], "val") {
            ids.push(value.to_string());
        }
    }
    ids
}

/// 生成一个字面量数据系列（类别 strLit + 数值 numLit）
fn series_xml(index: usize, name: &str, categories: &[String], values: &[f64]) -> String {
    let count = categories.len();

    let mut cat_points = String::new();
    for (i, category) in categories.iter().enumerate() {
        cat_points.push_str(&format!(
            "<c:pt idx=\"{}\"><c:v>{}</c:v></c:pt>",
            i,
            xml::escape(category)
        ));
    }

    let mut val_points = String::new();
    for (i, value) in values.iter().enumerate() {
        val_points.push_str(&format!("<c:pt idx=\"{}\"><c:v>{}</c:v></c:pt>", i, value));
    }

    format!(
        "<c:ser><c:idx val=\"{index}\"/><c:order val=\"{index}\"/>\
         <c:tx><c:v>{name}</c:v></c:tx>\
         <c:cat><c:strLit><c:ptCount val=\"{count}\"/>{cat_points}</c:strLit></c:cat>\
         <c:val><c:numLit><c:formatCode>General</c:formatCode><c:ptCount val=\"{count}\"/>{val_points}</c:numLit></c:val>\
         </c:ser>",
        index = index,
        name = xml::escape(name),
        count = count,
        cat_points = cat_points,
        val_points = val_points,
    )
}

fn splice(original: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut result = String::with_capacity(original.len() + replacement.len());
    result.push_str(&original[..start]);
    result.push_str(replacement);
    result.push_str(&original[end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scaffold;
    use crate::models::chart::GroupChartRow;

    fn demo_chart(part: &str) -> String {
        scaffold::demo_parts()
            .into_iter()
            .find(|(name, _)| name == part)
            .map(|(_, content)| content)
            .unwrap()
    }

    fn demo_row() -> GroupChartRow {
        GroupChartRow {
            group: "7".to_string(),
            bar_values: [
                [4.3, 2.5, 3.5, 4.5],
                [2.4, 4.4, 1.8, 2.8],
                [2.0, 2.0, 3.0, 5.0],
            ],
            pie_values: [8.2, 3.2, 1.4, 1.2],
        }
    }

    #[test]
    fn test_chart_title_reads_template_text() {
        let service = ChartService::new();
        let bar = demo_chart("ppt/charts/chart1.xml");
        let pie = demo_chart("ppt/charts/chart2.xml");
        assert_eq!(service.chart_title(&bar), "Category Statistics");
        assert_eq!(service.chart_title(&pie), "Quarterly Statistics");
    }

    #[test]
    fn test_find_by_title_picks_unique_match() {
        let service = ChartService::new();
        let charts = vec![
            ("c1".to_string(), demo_chart("ppt/charts/chart1.xml")),
            ("c2".to_string(), demo_chart("ppt/charts/chart2.xml")),
        ];
        assert_eq!(service.find_by_title(&charts, "Category Statistics").unwrap(), 0);
        assert_eq!(service.find_by_title(&charts, "Quarterly Statistics").unwrap(), 1);
    }

    #[test]
    fn test_find_by_title_rejects_zero_and_many() {
        let service = ChartService::new();
        let bar = demo_chart("ppt/charts/chart1.xml");

        let none = vec![("c1".to_string(), bar.clone())];
        let err = service.find_by_title(&none, "No Such Title").unwrap_err();
        assert!(matches!(
            err,
            AppError::Chart(ChartError::NotFound { matches: 0, .. })
        ));

        let both = vec![("c1".to_string(), bar.clone()), ("c2".to_string(), bar)];
        let err = service.find_by_title(&both, "Category Statistics").unwrap_err();
        assert!(matches!(
            err,
            AppError::Chart(ChartError::NotFound { matches: 2, .. })
        ));
    }

    #[test]
    fn test_replace_bar_series_rebuilds_all_series() {
        let service = ChartService::new();
        let bar = demo_chart("ppt/charts/chart1.xml");
        let data = demo_row().chart_data().unwrap();

        let rebuilt = service.replace_bar_series(&bar, &data.bar).unwrap();

        let sers = xml::element_blocks(&rebuilt, "c:ser");
        assert_eq!(sers.len(), 3);
        assert!(rebuilt.contains("<c:v>Series 3</c:v>"));
        assert!(rebuilt.contains("<c:v>Category 4</c:v>"));
        assert!(rebuilt.contains("<c:v>4.3</c:v>"));
        // 模板的坐标轴 ID 原样保留
        assert!(rebuilt.contains("<c:axId val=\"111111111\"/>"));
        assert!(rebuilt.contains("<c:axId val=\"222222222\"/>"));
        // 坐标轴定义本身不动
        assert!(rebuilt.contains("<c:catAx>"));
    }

    #[test]
    fn test_replace_pie_series_writes_single_series() {
        let service = ChartService::new();
        let pie = demo_chart("ppt/charts/chart2.xml");
        let data = demo_row().chart_data().unwrap();

        let rebuilt = service.replace_pie_series(&pie, &data.pie).unwrap();

        assert_eq!(xml::element_blocks(&rebuilt, "c:ser").len(), 1);
        assert!(rebuilt.contains("<c:v>1st Qtr</c:v>"));
        assert!(rebuilt.contains("<c:v>8.2</c:v>"));
    }

    #[test]
    fn test_bar_rebuild_on_pie_chart_is_kind_mismatch() {
        let service = ChartService::new();
        let pie = demo_chart("ppt/charts/chart2.xml");
        let data = demo_row().chart_data().unwrap();

        let err = service.replace_bar_series(&pie, &data.bar).unwrap_err();
        assert!(matches!(
            err,
            AppError::Chart(ChartError::KindMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_set_title_replaces_and_reads_back() {
        let service = ChartService::new();
        let bar = demo_chart("ppt/charts/chart1.xml");

        let titled = service
            .set_title(&bar, "Sales by Category: Group 7")
            .unwrap();
        assert_eq!(service.chart_title(&titled), "Sales by Category: Group 7");
        assert!(!titled.contains("Category Statistics"));
    }

    #[test]
    fn test_missing_axis_ids_is_an_error() {
        let service = ChartService::new();
        let bar = demo_chart("ppt/charts/chart1.xml");
        let gutted = bar.replace("<c:axId val=\"111111111\"/>", "")
            .replace("<c:axId val=\"222222222\"/>", "");
        let data = demo_row().chart_data().unwrap();

        let err = service.replace_bar_series(&gutted, &data.bar).unwrap_err();
        assert!(matches!(
            err,
            AppError::Chart(ChartError::AxisIdsMissing { .. })
        ));
    }
}
