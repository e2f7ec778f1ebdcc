//! 演示模板生成器
//!
//! ## 职责
//! 在没有正式设计模板的环境（开发机、CI）下，生成一份结构完整、
//! 可被编辑流程处理的最小 PPTX 模板。
//!
//! ## 核心功能
//! - `demo_parts`：产出全部 OOXML 部件（演示文稿、三张幻灯片、两张图表、表格）
//! - `write_demo_template`：把演示模板打包成 .pptx 写到磁盘
//!
//! 模板内容与正式模板遵循同一套占位文本约定：标题页两个文本占位符、
//! 图表页一个标题占位符加柱图/饼图、表格页一个标题占位符加 5 列 10 行表格。

use std::path::Path;

use crate::error::AppResult;
use crate::infrastructure::package::PptxPackage;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_RELS_DOC: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// 标题页主标题占位文本
pub const DEMO_TITLE_TEXT: &str = "Presentation title";
/// 标题页副标题占位文本
pub const DEMO_SUBTITLE_TEXT: &str = "Subtitle";
/// 图表页标题占位文本
pub const DEMO_CHART_HEADING: &str = "Chart";
/// 表格页标题占位文本
pub const DEMO_TABLE_HEADING: &str = "Table";
/// 柱状图的模板标题（图表按标题文本定位）
pub const DEMO_BAR_CHART_TITLE: &str = "Category Statistics";
/// 饼图的模板标题
pub const DEMO_PIE_CHART_TITLE: &str = "Quarterly Statistics";

/// 演示表格的列数（1 列表头前缀 + 数据列）
pub const DEMO_TABLE_COLS: usize = 5;
/// 演示表格的总行数（表头 + 8 行数据 + 合计行）
pub const DEMO_TABLE_ROWS: usize = 10;

/// 生成演示模板的全部部件，返回 (部件名, XML 内容) 列表
pub fn demo_parts() -> Vec<(String, String)> {
    vec![
        ("[Content_Types].xml".to_string(), content_types_xml()),
        ("_rels/.rels".to_string(), root_rels_xml()),
        ("docProps/core.xml".to_string(), core_props_xml()),
        ("docProps/app.xml".to_string(), app_props_xml()),
        ("ppt/presentation.xml".to_string(), presentation_xml()),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            presentation_rels_xml(),
        ),
        (
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            slide_master_xml(),
        ),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            slide_master_rels_xml(),
        ),
        (
            "ppt/slideLayouts/slideLayout1.xml".to_string(),
            slide_layout_xml(),
        ),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
            slide_layout_rels_xml(),
        ),
        ("ppt/theme/theme1.xml".to_string(), theme_xml()),
        ("ppt/slides/slide1.xml".to_string(), title_slide_xml()),
        (
            "ppt/slides/_rels/slide1.xml.rels".to_string(),
            layout_only_rels_xml(),
        ),
        ("ppt/slides/slide2.xml".to_string(), chart_slide_xml()),
        (
            "ppt/slides/_rels/slide2.xml.rels".to_string(),
            chart_slide_rels_xml(),
        ),
        ("ppt/slides/slide3.xml".to_string(), table_slide_xml()),
        (
            "ppt/slides/_rels/slide3.xml.rels".to_string(),
            layout_only_rels_xml(),
        ),
        ("ppt/charts/chart1.xml".to_string(), bar_chart_xml()),
        ("ppt/charts/chart2.xml".to_string(), pie_chart_xml()),
    ]
}

/// 把演示模板写到指定路径（父目录需已存在）
pub fn write_demo_template(path: &Path) -> AppResult<()> {
    PptxPackage::from_parts(demo_parts()).save(path)
}

// ========== 包级部件 ==========

fn content_types_xml() -> String {
    let mut overrides = String::new();
    let entries = [
        (
            "/ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        (
            "/ppt/slides/slide1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
        ),
        (
            "/ppt/slides/slide2.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
        ),
        (
            "/ppt/slides/slide3.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
        ),
        (
            "/ppt/charts/chart1.xml",
            "application/vnd.openxmlformats-officedocument.drawingml.chart+xml",
        ),
        (
            "/ppt/charts/chart2.xml",
            "application/vnd.openxmlformats-officedocument.drawingml.chart+xml",
        ),
        (
            "/ppt/theme/theme1.xml",
            "application/vnd.openxmlformats-officedocument.theme+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part, content_type) in entries {
        overrides.push_str(&format!(
            r#"<Override PartName="{part}" ContentType="{content_type}"/>"#
        ));
    }
    format!(
        "{XML_DECL}\n<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>{overrides}</Types>"
    )
}

fn rels_xml(entries: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (id, rel_type, target) in entries {
        body.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{rel_type}" Target="{target}"/>"#
        ));
    }
    format!(
        "{XML_DECL}\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{body}</Relationships>"
    )
}

fn root_rels_xml() -> String {
    rels_xml(&[
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            "ppt/presentation.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml",
        ),
        (
            "rId3",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            "docProps/app.xml",
        ),
    ])
}

fn core_props_xml() -> String {
    format!(
        "{XML_DECL}\n<cp:coreProperties \
xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
<dc:title>Demo Report Template</dc:title>\
<dc:creator>ppt_report_generator</dc:creator>\
<dcterms:created xsi:type=\"dcterms:W3CDTF\">2024-01-01T00:00:00Z</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">2024-01-01T00:00:00Z</dcterms:modified>\
</cp:coreProperties>"
    )
}

fn app_props_xml() -> String {
    format!(
        "{XML_DECL}\n<Properties \
xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
<Application>ppt_report_generator</Application><Slides>3</Slides></Properties>"
    )
}

fn presentation_xml() -> String {
    format!(
        "{XML_DECL}\n<p:presentation xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELS_DOC}\" xmlns:p=\"{NS_PRESENTATION}\">\
<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
<p:sldIdLst>\
<p:sldId id=\"256\" r:id=\"rId2\"/>\
<p:sldId id=\"257\" r:id=\"rId3\"/>\
<p:sldId id=\"258\" r:id=\"rId4\"/>\
</p:sldIdLst>\
<p:sldSz cx=\"9144000\" cy=\"6858000\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
</p:presentation>"
    )
}

fn presentation_rels_xml() -> String {
    rels_xml(&[
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
            "slideMasters/slideMaster1.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
            "slides/slide1.xml",
        ),
        (
            "rId3",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
            "slides/slide2.xml",
        ),
        (
            "rId4",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
            "slides/slide3.xml",
        ),
    ])
}

// ========== 母版 / 版式 / 主题 ==========

fn slide_master_xml() -> String {
    format!(
        "{XML_DECL}\n<p:sldMaster xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELS_DOC}\" xmlns:p=\"{NS_PRESENTATION}\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
</p:spTree></p:cSld>\
<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
<p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
</p:sldMaster>"
    )
}

fn slide_master_rels_xml() -> String {
    rels_xml(&[
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
            "../slideLayouts/slideLayout1.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
            "../theme/theme1.xml",
        ),
    ])
}

fn slide_layout_xml() -> String {
    format!(
        "{XML_DECL}\n<p:sldLayout xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELS_DOC}\" xmlns:p=\"{NS_PRESENTATION}\" type=\"blank\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sldLayout>"
    )
}

fn slide_layout_rels_xml() -> String {
    rels_xml(&[(
        "rId1",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
        "../slideMasters/slideMaster1.xml",
    )])
}

fn theme_xml() -> String {
    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = format!(r#"<a:ln>{fill}</a:ln>"#);
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    format!(
        "{XML_DECL}\n<a:theme xmlns:a=\"{NS_DRAWING}\" name=\"Office\"><a:themeElements>\
<a:clrScheme name=\"Office\">\
<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2><a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
<a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1><a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3><a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
<a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5><a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink><a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
</a:clrScheme>\
<a:fontScheme name=\"Office\">\
<a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
</a:fontScheme>\
<a:fmtScheme name=\"Office\">\
<a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>\
<a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>\
<a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>\
<a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>\
</a:fmtScheme>\
</a:themeElements></a:theme>"
    )
}

// ========== 幻灯片 ==========

fn slide_xml(shapes: &str) -> String {
    format!(
        "{XML_DECL}\n<p:sld xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELS_DOC}\" xmlns:p=\"{NS_PRESENTATION}\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
{shapes}\
</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sld>"
    )
}

fn text_shape(id: u32, name: &str, placeholder: &str, text: &str, offset_y: u64) -> String {
    format!(
        "<p:sp><p:nvSpPr>\
<p:cNvPr id=\"{id}\" name=\"{name}\"/>\
<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
<p:nvPr>{placeholder}</p:nvPr>\
</p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"685800\" y=\"{offset_y}\"/><a:ext cx=\"7772400\" cy=\"1143000\"/></a:xfrm></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody>\
</p:sp>"
    )
}

fn title_slide_xml() -> String {
    let title = text_shape(
        2,
        "Title 1",
        r#"<p:ph type="ctrTitle"/>"#,
        DEMO_TITLE_TEXT,
        1122363,
    );
    let subtitle = text_shape(
        3,
        "Subtitle 2",
        r#"<p:ph type="subTitle" idx="1"/>"#,
        DEMO_SUBTITLE_TEXT,
        2879912,
    );
    slide_xml(&format!("{title}{subtitle}"))
}

fn layout_only_rels_xml() -> String {
    rels_xml(&[(
        "rId1",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
        "../slideLayouts/slideLayout1.xml",
    )])
}

fn chart_frame(id: u32, name: &str, rel_id: &str, offset_x: u64) -> String {
    format!(
        "<p:graphicFrame><p:nvGraphicFramePr>\
<p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvGraphicFramePr/><p:nvPr/>\
</p:nvGraphicFramePr>\
<p:xfrm><a:off x=\"{offset_x}\" y=\"1600200\"/><a:ext cx=\"4038600\" cy=\"4038600\"/></p:xfrm>\
<a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/chart\">\
<c:chart xmlns:c=\"{NS_CHART}\" r:id=\"{rel_id}\"/>\
</a:graphicData></a:graphic>\
</p:graphicFrame>"
    )
}

fn chart_slide_xml() -> String {
    let heading = text_shape(
        2,
        "Title 1",
        r#"<p:ph type="title"/>"#,
        DEMO_CHART_HEADING,
        274638,
    );
    let bar_frame = chart_frame(3, "Bar Chart 2", "rId2", 457200);
    let pie_frame = chart_frame(4, "Pie Chart 3", "rId3", 4648200);
    slide_xml(&format!("{heading}{bar_frame}{pie_frame}"))
}

fn chart_slide_rels_xml() -> String {
    rels_xml(&[
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
            "../slideLayouts/slideLayout1.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart",
            "../charts/chart1.xml",
        ),
        (
            "rId3",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart",
            "../charts/chart2.xml",
        ),
    ])
}

fn table_cell(text: &str) -> String {
    format!(
        "<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{text}</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>"
    )
}

fn table_row(cells: &str) -> String {
    format!("<a:tr h=\"370840\">{cells}</a:tr>")
}

fn demo_table_xml() -> String {
    let mut grid = String::new();
    for _ in 0..DEMO_TABLE_COLS {
        grid.push_str(r#"<a:gridCol w="1600200"/>"#);
    }
    let mut rows = String::new();
    for row_index in 0..DEMO_TABLE_ROWS {
        let label = if row_index == 0 {
            "Header"
        } else if row_index == DEMO_TABLE_ROWS - 1 {
            "Total"
        } else {
            "Cell"
        };
        let cells: String = (0..DEMO_TABLE_COLS).map(|_| table_cell(label)).collect();
        rows.push_str(&table_row(&cells));
    }
    format!(
        "<a:tbl><a:tblPr firstRow=\"1\" bandRow=\"1\"/><a:tblGrid>{grid}</a:tblGrid>{rows}</a:tbl>"
    )
}

fn table_slide_xml() -> String {
    let heading = text_shape(
        2,
        "Title 1",
        r#"<p:ph type="title"/>"#,
        DEMO_TABLE_HEADING,
        274638,
    );
    let table = demo_table_xml();
    let frame = format!(
        "<p:graphicFrame><p:nvGraphicFramePr>\
<p:cNvPr id=\"3\" name=\"Table 2\"/><p:cNvGraphicFramePr/><p:nvPr/>\
</p:nvGraphicFramePr>\
<p:xfrm><a:off x=\"571500\" y=\"1371600\"/><a:ext cx=\"8001000\" cy=\"3708400\"/></p:xfrm>\
<a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/table\">\
{table}\
</a:graphicData></a:graphic>\
</p:graphicFrame>"
    );
    slide_xml(&format!("{heading}{frame}"))
}

// ========== 图表部件 ==========

fn chart_title_xml(title: &str) -> String {
    format!(
        "<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{title}</a:t></a:r></a:p></c:rich></c:tx>\
<c:overlay val=\"0\"/></c:title><c:autoTitleDeleted val=\"0\"/>"
    )
}

fn literal_series_xml(index: usize, name: &str, categories: &[&str], values: &[f64]) -> String {
    let mut cat_points = String::new();
    for (i, category) in categories.iter().enumerate() {
        cat_points.push_str(&format!("<c:pt idx=\"{i}\"><c:v>{category}</c:v></c:pt>"));
    }
    let mut val_points = String::new();
    for (i, value) in values.iter().enumerate() {
        val_points.push_str(&format!("<c:pt idx=\"{i}\"><c:v>{value}</c:v></c:pt>"));
    }
    let count = categories.len();
    format!(
        "<c:ser><c:idx val=\"{index}\"/><c:order val=\"{index}\"/>\
<c:tx><c:v>{name}</c:v></c:tx>\
<c:cat><c:strLit><c:ptCount val=\"{count}\"/>{cat_points}</c:strLit></c:cat>\
<c:val><c:numLit><c:formatCode>General</c:formatCode><c:ptCount val=\"{count}\"/>{val_points}</c:numLit></c:val>\
</c:ser>"
    )
}

fn chart_space_xml(body: &str) -> String {
    format!(
        "{XML_DECL}\n<c:chartSpace xmlns:c=\"{NS_CHART}\" xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELS_DOC}\">\
<c:chart>{body}<c:plotVisOnly val=\"1\"/></c:chart>\
</c:chartSpace>"
    )
}

fn bar_chart_xml() -> String {
    let categories = ["Category 1", "Category 2", "Category 3", "Category 4"];
    let mut sers = String::new();
    for (i, name) in ["Series 1", "Series 2", "Series 3"].iter().enumerate() {
        let base = (i + 1) as f64;
        let values = [base, base + 1.0, base + 0.5, base + 2.0];
        sers.push_str(&literal_series_xml(i, name, &categories, &values));
    }
    let title = chart_title_xml(DEMO_BAR_CHART_TITLE);
    let plot_area = format!(
        "<c:plotArea><c:layout/>\
<c:barChart><c:barDir val=\"col\"/><c:grouping val=\"clustered\"/><c:varyColors val=\"0\"/>\
{sers}\
<c:gapWidth val=\"150\"/><c:axId val=\"111111111\"/><c:axId val=\"222222222\"/></c:barChart>\
<c:catAx><c:axId val=\"111111111\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling>\
<c:delete val=\"0\"/><c:axPos val=\"b\"/><c:crossAx val=\"222222222\"/></c:catAx>\
<c:valAx><c:axId val=\"222222222\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling>\
<c:delete val=\"0\"/><c:axPos val=\"l\"/><c:crossAx val=\"111111111\"/></c:valAx>\
</c:plotArea>"
    );
    chart_space_xml(&format!("{title}{plot_area}"))
}

fn pie_chart_xml() -> String {
    let categories = ["1st Qtr", "2nd Qtr", "3rd Qtr", "4th Qtr"];
    let values = [8.2, 3.2, 1.4, 1.2];
    let ser = literal_series_xml(0, "Series 1", &categories, &values);
    let title = chart_title_xml(DEMO_PIE_CHART_TITLE);
    let plot_area = format!(
        "<c:plotArea><c:layout/>\
<c:pieChart><c:varyColors val=\"1\"/>{ser}<c:firstSliceAng val=\"0\"/></c:pieChart>\
</c:plotArea>"
    );
    chart_space_xml(&format!("{title}{plot_area}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::xml;

    #[test]
    fn test_demo_parts_cover_required_names() {
        let parts = demo_parts();
        let names: Vec<&str> = parts.iter().map(|(name, _)| name.as_str()).collect();
        for required in [
            "[Content_Types].xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml",
            "ppt/charts/chart1.xml",
            "ppt/charts/chart2.xml",
            "docProps/core.xml",
        ] {
            assert!(names.contains(&required), "缺少部件: {}", required);
        }
    }

    #[test]
    fn test_title_slide_contains_both_markers() {
        let slide = title_slide_xml();
        let shapes = xml::element_blocks(&slide, "p:sp");
        assert_eq!(shapes.len(), 2);
        assert!(xml::visible_text(&slide).contains(DEMO_TITLE_TEXT));
        assert!(xml::visible_text(&slide).contains(DEMO_SUBTITLE_TEXT));
    }

    #[test]
    fn test_demo_table_grid_is_full() {
        let slide = table_slide_xml();
        let rows = xml::element_blocks(&slide, "a:tr");
        assert_eq!(rows.len(), DEMO_TABLE_ROWS);
        let (start, end) = rows[0];
        let cells = xml::element_blocks(&slide[start..end], "a:tc");
        assert_eq!(cells.len(), DEMO_TABLE_COLS);
    }

    #[test]
    fn test_bar_chart_has_three_series_and_axes() {
        let chart = bar_chart_xml();
        assert_eq!(xml::element_blocks(&chart, "c:ser").len(), 3);
        assert!(chart.contains(r#"<c:axId val="111111111"/>"#));
        assert!(chart.contains(r#"<c:axId val="222222222"/>"#));
        assert!(chart.contains(DEMO_BAR_CHART_TITLE));
    }
}
