/// 模板占位文本约定
///
/// 编辑流程完全按"现有文本内容"定位模板里的区域：
/// 标题页的两个占位符、图表页/表格页的标题占位符，
/// 以及两张图表各自的模板标题。这里集中声明这些标记文本。
#[derive(Debug, Clone)]
pub struct TemplateMarkers {
    /// 标题页主标题占位文本
    pub title: String,
    /// 标题页副标题占位文本
    pub subtitle: String,
    /// 图表页标题占位文本
    pub chart_heading: String,
    /// 表格页标题占位文本
    pub table_heading: String,
    /// 柱状图在模板中的标题文本
    pub bar_chart_title: String,
    /// 饼图在模板中的标题文本
    pub pie_chart_title: String,
}

impl Default for TemplateMarkers {
    fn default() -> Self {
        Self {
            title: "Presentation title".to_string(),
            subtitle: "Subtitle".to_string(),
            chart_heading: "Chart".to_string(),
            table_heading: "Table".to_string(),
            bar_chart_title: "Category Statistics".to_string(),
            pie_chart_title: "Quarterly Statistics".to_string(),
        }
    }
}
