//! 结果表填充服务 - 业务能力层
//!
//! 只负责"把结果表数据写入幻灯片表格"能力，不关心流程

use crate::error::{AppError, AppResult, TableError};
use crate::infrastructure::xml;
use crate::models::table::TableData;

/// 表头单元格的固定前缀
const HEADER_PREFIX: &str = "Product ";

/// 结果表填充服务
///
/// 职责：
/// - 在单张幻灯片上唯一定位表格
/// - 先整体校验网格形状（表头 + 数据行 + 合计行 x 列数），再改写单元格
/// - 表头写 "Product {列名}"，数据行写原值，合计行保留 1 位小数
pub struct TableService;

impl TableService {
    pub fn new() -> Self {
        Self
    }

    /// 把结果表数据填入幻灯片上唯一的表格
    ///
    /// # 参数
    /// - `slide_xml`: 幻灯片部件内容
    /// - `data`: 结果表数据
    ///
    /// # 返回
    /// 改写后的幻灯片 XML；表格不唯一或网格形状不符时报错，不做部分改写
    pub fn fill_table(&self, slide_xml: &str, data: &TableData) -> AppResult<String> {
        let tables = xml::element_blocks(slide_xml, "a:tbl");
        if tables.len() != 1 {
            return Err(AppError::table_not_found(tables.len()));
        }
        let (tbl_start, tbl_end) = tables[0];
        let table = &slide_xml[tbl_start..tbl_end];

        // 期望网格：表头 + 数据行 + 合计行
        let expected_rows = data.rows().len() + 2;
        let expected_cols = data.columns().len();

        let row_blocks = xml::element_blocks(table, "a:tr");
        let row_cell_counts: Vec<usize> = row_blocks
            .iter()
            .map(|(start, end)| xml::element_blocks(&table[*start..*end], "a:tc").len())
            .collect();

        let cols_ok = row_cell_counts.iter().all(|&count| count == expected_cols);
        if row_blocks.len() != expected_rows || !cols_ok {
            let found_cols = row_cell_counts
                .iter()
                .copied()
                .find(|&count| count != expected_cols)
                .or_else(|| row_cell_counts.first().copied())
                .unwrap_or(0);
            return Err(TableError::GridMismatch {
                expected_rows,
                expected_cols,
                found_rows: row_blocks.len(),
                found_cols,
            }
            .into());
        }

        let texts = cell_texts(data);

        // 从后往前改写，保持前面块的偏移有效
        let mut new_table = table.to_string();
        for (r, (row_start, row_end)) in row_blocks.iter().enumerate().rev() {
            let row_xml = &table[*row_start..*row_end];
            let cells = xml::element_blocks(row_xml, "a:tc");

            let mut new_row = row_xml.to_string();
            for (c, (cell_start, cell_end)) in cells.iter().enumerate().rev() {
                let cell_xml = &row_xml[*cell_start..*cell_end];
                let bodies = xml::element_blocks(cell_xml, "a:txBody");
                if bodies.len() != 1 {
                    return Err(TableError::CellBodyMissing {
                        row: r + 1,
                        col: c + 1,
                    }
                    .into());
                }
                let (body_start, body_end) = bodies[0];
                let new_body = format!(
                    "<a:txBody><a:bodyPr/><a:lstStyle/>{}</a:txBody>",
                    xml::text_paragraph(&texts[r][c])
                );
                new_row.replace_range(cell_start + body_start..cell_start + body_end, &new_body);
            }
            new_table.replace_range(*row_start..*row_end, &new_row);
        }

        let mut result = String::with_capacity(slide_xml.len() + new_table.len());
        result.push_str(&slide_xml[..tbl_start]);
        result.push_str(&new_table);
        result.push_str(&slide_xml[tbl_end..]);
        Ok(result)
    }
}

impl Default for TableService {
    fn default() -> Self {
        Self::new()
    }
}

/// 展开每个单元格要写入的文本：表头、数据行、合计行
fn cell_texts(data: &TableData) -> Vec<Vec<String>> {
    let mut texts = Vec::with_capacity(data.rows().len() + 2);
    texts.push(
        data.columns()
            .iter()
            .map(|column| format!("{}{}", HEADER_PREFIX, column))
            .collect(),
    );
    for row in data.rows() {
        texts.push(row.iter().map(|value| value.to_string()).collect());
    }
    texts.push(
        data.totals()
            .iter()
            .map(|total| format!("{:.1}", total))
            .collect(),
    );
    texts
}
