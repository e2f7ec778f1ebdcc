use crate::error::{AppResult, DataError};

/// 柱状图固定的四个类别
pub const BAR_CATEGORIES: [&str; 4] = ["Category 1", "Category 2", "Category 3", "Category 4"];

/// 柱状图固定的三个系列名
pub const BAR_SERIES_NAMES: [&str; 3] = ["Series 1", "Series 2", "Series 3"];

/// 饼图固定的四个季度类别
pub const PIE_CATEGORIES: [&str; 4] = ["1st Qtr", "2nd Qtr", "3rd Qtr", "4th Qtr"];

/// 饼图唯一系列的名称
pub const PIE_SERIES_NAME: &str = "Series 1";

/// 一个数据系列：名称加一组数值
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// 柱状图数据：类别加若干系列
///
/// 字段私有，只能通过 `new` 构造，保证每个系列的值数量与类别数一致。
#[derive(Debug, Clone)]
pub struct BarChartData {
    categories: Vec<String>,
    series: Vec<Series>,
}

impl BarChartData {
    pub fn new(categories: Vec<String>, series: Vec<Series>) -> AppResult<Self> {
        for s in &series {
            if s.values.len() != categories.len() {
                return Err(DataError::SeriesLengthMismatch {
                    series: s.name.clone(),
                    expected: categories.len(),
                    actual: s.values.len(),
                }
                .into());
            }
        }
        Ok(Self { categories, series })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }
}

/// 饼图数据：类别加单个系列
#[derive(Debug, Clone)]
pub struct PieChartData {
    categories: Vec<String>,
    series: Series,
}

impl PieChartData {
    pub fn new(categories: Vec<String>, series: Series) -> AppResult<Self> {
        if series.values.len() != categories.len() {
            return Err(DataError::SeriesLengthMismatch {
                series: series.name.clone(),
                expected: categories.len(),
                actual: series.values.len(),
            }
            .into());
        }
        Ok(Self { categories, series })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn series(&self) -> &Series {
        &self.series
    }
}

/// 一个分组要写入的两张图表数据
#[derive(Debug, Clone)]
pub struct GroupChartData {
    pub bar: BarChartData,
    pub pie: PieChartData,
}

/// 图表数据 CSV 中的一行，对应一个分组
#[derive(Debug, Clone)]
pub struct GroupChartRow {
    pub group: String,
    /// 柱状图数值，按 [系列][类别] 排列
    pub bar_values: [[f64; 4]; 3],
    /// 饼图四个季度的数值
    pub pie_values: [f64; 4],
}

impl GroupChartRow {
    /// 按固定的类别/系列约定展开为图表数据
    pub fn chart_data(&self) -> AppResult<GroupChartData> {
        let categories = BAR_CATEGORIES.iter().map(|s| s.to_string()).collect();
        let series = self
            .bar_values
            .iter()
            .zip(BAR_SERIES_NAMES.iter())
            .map(|(values, name)| Series {
                name: name.to_string(),
                values: values.to_vec(),
            })
            .collect();
        let bar = BarChartData::new(categories, series)?;

        let pie = PieChartData::new(
            PIE_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            Series {
                name: PIE_SERIES_NAME.to_string(),
                values: self.pie_values.to_vec(),
            },
        )?;

        Ok(GroupChartData { bar, pie })
    }
}
