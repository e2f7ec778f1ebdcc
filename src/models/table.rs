use crate::error::{AppResult, DataError};

/// 结果表数据：列名加数值行
///
/// 字段私有，只能通过 `new` 构造，保证每一行的宽度与列数一致。
/// 行序号在错误信息里从 1 开始计。
#[derive(Debug, Clone)]
pub struct TableData {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TableData {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> AppResult<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DataError::RowWidthMismatch {
                    row: i + 1,
                    expected: columns.len(),
                    actual: row.len(),
                }
                .into());
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// 每列的合计值，顺序与 `columns` 一致
    pub fn totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.columns.len()];
        for row in &self.rows {
            for (total, value) in totals.iter_mut().zip(row.iter()) {
                *total += value;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_row_width_is_checked() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = TableData::new(columns, rows).unwrap_err();
        assert!(matches!(
            err,
            AppError::Data(DataError::RowWidthMismatch {
                row: 2,
                expected: 2,
                actual: 1,
            })
        ));
    }

    #[test]
    fn test_totals_sum_each_column() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let rows = vec![vec![1.5, 2.0], vec![2.5, 3.0]];
        let data = TableData::new(columns, rows).unwrap();
        assert_eq!(data.totals(), vec![4.0, 5.0]);
    }
}
