//! 集成测试共用的临时目录与数据装置

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ppt_report_generator::infrastructure::scaffold;
use ppt_report_generator::models::{BarChartData, GroupChartData, PieChartData, Series, TableData};
use ppt_report_generator::Config;
use tempfile::TempDir;

/// 图表数据 CSV 的表头，列顺序与加载器的约定一致
const CHART_CSV_HEADER: &str = "group,cat1_1,cat2_1,cat3_1,cat4_1,cat1_2,cat2_2,cat3_2,cat4_2,cat1_3,cat2_3,cat3_3,cat4_3,pie1,pie2,pie3,pie4";

/// 一套完整的临时工作目录：模板、数据目录、输出目录
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// 创建临时目录并生成演示模板
    pub fn new() -> Self {
        let dir = TempDir::new().expect("创建临时目录失败");
        let fixture = Self { dir };
        scaffold::write_demo_template(&fixture.template_path()).expect("生成演示模板失败");
        fs::create_dir_all(fixture.data_dir()).expect("创建数据目录失败");
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn template_path(&self) -> PathBuf {
        self.root().join("ppt-template.pptx")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("outputs")
    }

    /// 全部路径都指向临时目录的配置
    pub fn config(&self) -> Config {
        Config {
            template_path: self.template_path().display().to_string(),
            data_dir: self.data_dir().display().to_string(),
            output_dir: self.output_dir().display().to_string(),
            output_log_file: self.root().join("output.txt").display().to_string(),
            summary_file: self.root().join("batch_summary.json").display().to_string(),
            max_concurrent_reports: 4,
            ..Config::default()
        }
    }

    /// 写入图表数据 CSV，每个分组一行
    pub fn write_chart_csv(&self, groups: &[&str]) {
        let mut content = String::from(CHART_CSV_HEADER);
        content.push('\n');
        for (i, group) in groups.iter().enumerate() {
            content.push_str(&chart_csv_row(group, i as f64 + 1.0));
        }
        fs::write(self.data_dir().join("chart_df.csv"), content).expect("写入图表数据失败");
    }

    /// 写入某分组的结果表 CSV，形状与演示模板的 5 列 10 行表格匹配
    pub fn write_table_csv(&self, group: &str) {
        let mut content = String::from("A,B,C,D,E\n");
        for row in 0..8 {
            let cells: Vec<String> = (0..5)
                .map(|col| ((row * 5 + col) as f64 / 2.0).to_string())
                .collect();
            content.push_str(&cells.join(","));
            content.push('\n');
        }
        fs::write(
            self.data_dir().join(format!("table_{}.csv", group)),
            content,
        )
        .expect("写入结果表失败");
    }
}

fn chart_csv_row(group: &str, seed: f64) -> String {
    let mut fields = vec![group.to_string()];
    for i in 0..12 {
        fields.push((seed * 100.0 + i as f64).to_string());
    }
    for i in 0..4 {
        fields.push((seed * 10.0 + i as f64).to_string());
    }
    let mut line = fields.join(",");
    line.push('\n');
    line
}

/// 固定的示例图表数据，类别与系列命名跟演示模板一致
pub fn sample_chart_data() -> GroupChartData {
    let categories: Vec<String> = (1..=4).map(|i| format!("Category {}", i)).collect();
    let series: Vec<Series> = (1..=3)
        .map(|s| Series {
            name: format!("Series {}", s),
            values: (1..=4).map(|c| (s * 10 + c) as f64).collect(),
        })
        .collect();
    let bar = BarChartData::new(categories, series).expect("柱状图数据不合法");

    let quarters: Vec<String> = ["1st Qtr", "2nd Qtr", "3rd Qtr", "4th Qtr"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let pie = PieChartData::new(
        quarters,
        Series {
            name: "Series 1".to_string(),
            values: vec![8.2, 3.2, 1.4, 1.2],
        },
    )
    .expect("饼图数据不合法");

    GroupChartData { bar, pie }
}

/// 与演示模板 5 列 10 行表格匹配的示例表数据
pub fn sample_table_data() -> TableData {
    let columns: Vec<String> = ["A", "B", "C", "D", "E"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<f64>> = (0..8)
        .map(|r| (0..5).map(|c| (r * 5 + c) as f64 / 2.0).collect())
        .collect();
    TableData::new(columns, rows).expect("表格数据不合法")
}
