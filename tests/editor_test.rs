//! 单份报告编辑流程的集成测试
//!
//! 从演示模板出发，验证编辑后的各个部件内容和各类失败场景

mod common;

use common::{sample_chart_data, sample_table_data, Fixture};
use ppt_report_generator::error::{AppError, ChartError, DataError, TableError, TemplateError};
use ppt_report_generator::infrastructure::scaffold;
use ppt_report_generator::models::TableData;
use ppt_report_generator::{edit_document, logger, PptxPackage};

#[test]
fn test_edit_document_produces_full_report() {
    // 初始化日志
    logger::init();

    let fixture = Fixture::new();
    let output = fixture.output_dir().join("results_group_01.pptx");

    let status = edit_document(
        "01",
        &sample_chart_data(),
        &sample_table_data(),
        &fixture.template_path(),
        &output,
    )
    .expect("编辑演示模板失败");

    assert_eq!(status, "Successfully saved version 01!");
    assert!(output.exists(), "应该生成输出文件");

    let package = PptxPackage::open(&output).expect("打开输出文件失败");

    // 标题页：两个占位文本都被替换，组名恰好出现一次
    let slide1 = package.part_string("ppt/slides/slide1.xml").unwrap();
    assert_eq!(slide1.matches("Presentation for Group 01").count(), 1);
    assert!(slide1.contains("<a:t>Financial Information for Group 01</a:t>"));
    assert!(!slide1.contains("<a:t>Presentation title</a:t>"));
    assert!(!slide1.contains("<a:t>Subtitle</a:t>"));

    // 图表页：页标题被替换
    let slide2 = package.part_string("ppt/slides/slide2.xml").unwrap();
    assert!(slide2.contains("<a:t>Financial Results Summary for Group 01</a:t>"));
    assert!(!slide2.contains("<a:t>Chart</a:t>"));

    // 柱状图：整体重建后系列数和类别数与输入一致，坐标轴 ID 保留
    let bar = package.part_string("ppt/charts/chart1.xml").unwrap();
    assert!(bar.contains("<a:t>Sales by Category: Group 01</a:t>"));
    assert!(!bar.contains("Category Statistics"));
    assert!(bar.contains("<c:barChart>"));
    assert_eq!(bar.matches("<c:ser>").count(), 3);
    assert_eq!(bar.matches("<c:v>Category ").count(), 3 * 4);
    assert!(bar.contains("<c:v>Series 3</c:v>"));
    assert!(bar.contains("<c:v>11</c:v>"));
    assert!(bar.contains("<c:axId val=\"111111111\"/>"));
    assert!(bar.contains("<c:axId val=\"222222222\"/>"));

    // 饼图：单系列、四个季度数值
    let pie = package.part_string("ppt/charts/chart2.xml").unwrap();
    assert!(pie.contains("<a:t>Sales by Quarter: Group 01</a:t>"));
    assert!(!pie.contains("Quarterly Statistics"));
    assert!(pie.contains("<c:pieChart>"));
    assert_eq!(pie.matches("<c:ser>").count(), 1);
    assert!(pie.contains("<c:v>1st Qtr</c:v>"));
    assert!(pie.contains("<c:v>8.2</c:v>"));

    // 表格页：页标题、表头、数据、合计
    let slide3 = package.part_string("ppt/slides/slide3.xml").unwrap();
    assert!(slide3.contains("<a:t>Results Table for Group 01</a:t>"));
    assert!(slide3.contains("<a:t>Product A</a:t>"));
    assert!(slide3.contains("<a:t>0.5</a:t>"));
    assert!(slide3.contains("<a:t>70.0</a:t>"));
    assert!(!slide3.contains("<a:t>Table</a:t>"));
    assert!(!slide3.contains("<a:t>Header</a:t>"));

    // 修改时间戳被更新
    let core = package.part_string("docProps/core.xml").unwrap();
    assert!(!core.contains("2024-01-01T00:00:00Z"));
}

#[test]
fn test_edit_document_keeps_unrelated_parts_untouched() {
    logger::init();

    let fixture = Fixture::new();
    let output = fixture.output_dir().join("results_group_07.pptx");

    edit_document(
        "07",
        &sample_chart_data(),
        &sample_table_data(),
        &fixture.template_path(),
        &output,
    )
    .expect("编辑演示模板失败");

    let original_theme = scaffold::demo_parts()
        .into_iter()
        .find(|(name, _)| name == "ppt/theme/theme1.xml")
        .map(|(_, content)| content)
        .unwrap();

    let package = PptxPackage::open(&output).expect("打开输出文件失败");
    let theme = package.part_string("ppt/theme/theme1.xml").unwrap();
    assert_eq!(theme, original_theme, "未编辑的部件应该原样保留");
}

#[test]
fn test_edit_document_overwrites_existing_output() {
    logger::init();

    let fixture = Fixture::new();
    let output = fixture.output_dir().join("results_group_02.pptx");

    // 连续运行两次，第二次覆盖第一次的输出
    for _ in 0..2 {
        edit_document(
            "02",
            &sample_chart_data(),
            &sample_table_data(),
            &fixture.template_path(),
            &output,
        )
        .expect("编辑演示模板失败");
    }

    assert!(output.exists());
}

#[test]
fn test_totals_row_handles_negative_and_zero_values() {
    logger::init();

    let fixture = Fixture::new();
    let output = fixture.output_dir().join("results_group_08.pptx");

    // A 列是已知合计 29.5 的数据，B 列含负数，C 列全零
    let a = [2.2, 3.1, 1.6, 5.4, 4.8, 5.3, 2.4, 4.7];
    let b = [-1.0, -2.5, 0.5, 1.0, -3.0, 2.0, 1.5, 0.0];
    let columns: Vec<String> = ["A", "B", "C", "D", "E"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<f64>> = (0..8)
        .map(|r| vec![a[r], b[r], 0.0, 1.0, 2.0])
        .collect();
    let table = TableData::new(columns, rows).unwrap();

    edit_document(
        "08",
        &sample_chart_data(),
        &table,
        &fixture.template_path(),
        &output,
    )
    .expect("编辑演示模板失败");

    let package = PptxPackage::open(&output).expect("打开输出文件失败");
    let slide3 = package.part_string("ppt/slides/slide3.xml").unwrap();
    // 合计保留 1 位小数
    assert!(slide3.contains("<a:t>29.5</a:t>"));
    assert!(slide3.contains("<a:t>-1.5</a:t>"));
    assert!(slide3.contains("<a:t>0.0</a:t>"));
    assert!(slide3.contains("<a:t>16.0</a:t>"));
}

#[test]
fn test_same_inputs_produce_identical_content() {
    logger::init();

    let fixture = Fixture::new();
    let first = fixture.output_dir().join("first.pptx");
    let second = fixture.output_dir().join("second.pptx");

    for output in [&first, &second] {
        edit_document(
            "09",
            &sample_chart_data(),
            &sample_table_data(),
            &fixture.template_path(),
            output,
        )
        .expect("编辑演示模板失败");
    }

    // 两次编辑的内容部件完全一致（时间戳元数据除外）
    let package1 = PptxPackage::open(&first).unwrap();
    let package2 = PptxPackage::open(&second).unwrap();
    for part in [
        "ppt/slides/slide1.xml",
        "ppt/slides/slide2.xml",
        "ppt/slides/slide3.xml",
        "ppt/charts/chart1.xml",
        "ppt/charts/chart2.xml",
    ] {
        assert_eq!(
            package1.part_string(part).unwrap(),
            package2.part_string(part).unwrap(),
            "部件 {} 的内容应该一致",
            part
        );
    }
}

#[test]
fn test_empty_group_name_is_rejected() {
    logger::init();

    let fixture = Fixture::new();
    let output = fixture.output_dir().join("results_group_.pptx");

    let err = edit_document(
        "   ",
        &sample_chart_data(),
        &sample_table_data(),
        &fixture.template_path(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Data(DataError::EmptyGroupName)));
    assert!(!output.exists(), "失败时不应该产生输出文件");
}

#[test]
fn test_grid_mismatch_leaves_no_output_file() {
    logger::init();

    let fixture = Fixture::new();
    let output = fixture.output_dir().join("results_group_03.pptx");

    // 两列数据对不上模板里 5 列的表格
    let columns: Vec<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
    let narrow = TableData::new(columns, vec![vec![1.0, 2.0]]).unwrap();

    let err = edit_document(
        "03",
        &sample_chart_data(),
        &narrow,
        &fixture.template_path(),
        &output,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        AppError::Table(TableError::GridMismatch { .. })
    ));
    assert!(!output.exists(), "失败时不应该产生输出文件");
}

#[test]
fn test_duplicate_marker_is_rejected() {
    logger::init();

    let fixture = Fixture::new();

    // 把副标题也改成主标题文本，使占位文本出现两次
    let mut parts = scaffold::demo_parts();
    for (name, content) in &mut parts {
        if name == "ppt/slides/slide1.xml" {
            *content = content.replace("<a:t>Subtitle</a:t>", "<a:t>Presentation title</a:t>");
        }
    }
    let template = fixture.root().join("dup-template.pptx");
    PptxPackage::from_parts(parts)
        .save(&template)
        .expect("写入篡改模板失败");

    let output = fixture.output_dir().join("results_group_04.pptx");
    let err = edit_document(
        "04",
        &sample_chart_data(),
        &sample_table_data(),
        &template,
        &output,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        AppError::Template(TemplateError::RegionNotFound { matches: 2, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_missing_marker_is_rejected() {
    logger::init();

    let fixture = Fixture::new();

    // 去掉副标题占位文本
    let mut parts = scaffold::demo_parts();
    for (name, content) in &mut parts {
        if name == "ppt/slides/slide1.xml" {
            *content = content.replace("<a:t>Subtitle</a:t>", "<a:t>Intro</a:t>");
        }
    }
    let template = fixture.root().join("bare-template.pptx");
    PptxPackage::from_parts(parts)
        .save(&template)
        .expect("写入篡改模板失败");

    let output = fixture.output_dir().join("results_group_05.pptx");
    let err = edit_document(
        "05",
        &sample_chart_data(),
        &sample_table_data(),
        &template,
        &output,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        AppError::Template(TemplateError::RegionNotFound { matches: 0, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_ambiguous_chart_title_is_rejected() {
    logger::init();

    let fixture = Fixture::new();

    // 让两张图表的标题相同，按标题定位必须报歧义
    let mut parts = scaffold::demo_parts();
    for (name, content) in &mut parts {
        if name == "ppt/charts/chart2.xml" {
            *content = content.replace("Quarterly Statistics", "Category Statistics");
        }
    }
    let template = fixture.root().join("twin-template.pptx");
    PptxPackage::from_parts(parts)
        .save(&template)
        .expect("写入篡改模板失败");

    let output = fixture.output_dir().join("results_group_06.pptx");
    let err = edit_document(
        "06",
        &sample_chart_data(),
        &sample_table_data(),
        &template,
        &output,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        AppError::Chart(ChartError::NotFound { matches: 2, .. })
    ));
    assert!(!output.exists());
}
