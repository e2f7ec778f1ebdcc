//! CSV 数据装载
//!
//! ## 职责
//! - 从图表数据 CSV（chart_df.csv）读取全部分组的数据行
//! - 从分组结果表 CSV（table_{group}.csv）读取表格数据
//!
//! 列按表头名定位而不是按位置，分组名为空的行告警后跳过。

use std::path::Path;

use tracing::warn;

use crate::error::{AppError, AppResult, DataError, FileError};
use crate::models::chart::GroupChartRow;
use crate::models::table::TableData;

/// 图表 CSV 的分组列名
pub const GROUP_COLUMN: &str = "group";

/// 柱状图数值列，按 [系列][类别] 排列
pub const BAR_COLUMNS: [[&str; 4]; 3] = [
    ["cat1_1", "cat2_1", "cat3_1", "cat4_1"],
    ["cat1_2", "cat2_2", "cat3_2", "cat4_2"],
    ["cat1_3", "cat2_3", "cat3_3", "cat4_3"],
];

/// 饼图数值列，按季度顺序排列
pub const PIE_COLUMNS: [&str; 4] = ["pie1", "pie2", "pie3", "pie4"];

/// 读取图表数据 CSV，返回全部有效的分组数据行
pub fn load_chart_rows(path: &Path) -> AppResult<Vec<GroupChartRow>> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| AppError::csv_read_failed(path.display().to_string(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::csv_read_failed(path.display().to_string(), e))?
        .clone();

    let group_index = find_column(&headers, GROUP_COLUMN, path)?;
    let mut bar_indexes = [[0usize; 4]; 3];
    for (s, columns) in BAR_COLUMNS.iter().enumerate() {
        for (c, column) in columns.iter().enumerate() {
            bar_indexes[s][c] = find_column(&headers, column, path)?;
        }
    }
    let mut pie_indexes = [0usize; 4];
    for (c, column) in PIE_COLUMNS.iter().enumerate() {
        pie_indexes[c] = find_column(&headers, column, path)?;
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| AppError::csv_read_failed(path.display().to_string(), e))?;
        // 数据行号从 2 起算，第 1 行是表头
        let line = i + 2;

        let group = record.get(group_index).unwrap_or("").trim().to_string();
        if group.is_empty() {
            warn!("⚠️ 第 {} 行缺少分组名，跳过该行", line);
            continue;
        }

        let mut bar_values = [[0.0f64; 4]; 3];
        for (s, indexes) in bar_indexes.iter().enumerate() {
            for (c, index) in indexes.iter().enumerate() {
                bar_values[s][c] = parse_value(&record, *index, BAR_COLUMNS[s][c], line, path)?;
            }
        }
        let mut pie_values = [0.0f64; 4];
        for (c, index) in pie_indexes.iter().enumerate() {
            pie_values[c] = parse_value(&record, *index, PIE_COLUMNS[c], line, path)?;
        }

        rows.push(GroupChartRow {
            group,
            bar_values,
            pie_values,
        });
    }

    Ok(rows)
}

/// 读取分组结果表 CSV，表头原样作为列名，所有单元格按 f64 解析
pub fn load_table_data(path: &Path) -> AppResult<TableData> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| AppError::csv_read_failed(path.display().to_string(), e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::csv_read_failed(path.display().to_string(), e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| AppError::csv_read_failed(path.display().to_string(), e))?;
        let line = i + 2;

        let mut row = Vec::with_capacity(columns.len());
        for (c, value) in record.iter().enumerate() {
            let parsed = value.trim().parse::<f64>().map_err(|_| {
                DataError::ValueParseFailed {
                    column: columns
                        .get(c)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", c + 1)),
                    row: line,
                    path: path.display().to_string(),
                }
            })?;
            row.push(parsed);
        }
        rows.push(row);
    }

    TableData::new(columns, rows)
}

/// 按表头名（忽略大小写）定位列下标
fn find_column(headers: &csv::StringRecord, column: &str, path: &Path) -> AppResult<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| {
            DataError::ColumnMissing {
                column: column.to_string(),
                path: path.display().to_string(),
            }
            .into()
        })
}

fn parse_value(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    row: usize,
    path: &Path,
) -> AppResult<f64> {
    record
        .get(index)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            DataError::ValueParseFailed {
                column: column.to_string(),
                row,
                path: path.display().to_string(),
            }
            .into()
        })
}
