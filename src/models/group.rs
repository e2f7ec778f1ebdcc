use crate::error::{AppResult, DataError};

/// 把分组名转换为可安全嵌入文件名的形式
///
/// 保留字母数字和 `-`、`_`、`.`，其余字符一律替换为 `_`，
/// 并去掉首尾的 `.`（防止 `..` 之类的路径片段进入输出文件名）。
pub fn sanitize_group_stem(group: &str) -> AppResult<String> {
    if group.trim().is_empty() {
        return Err(DataError::EmptyGroupName.into());
    }

    let cleaned: String = group
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = cleaned.trim_matches('.');
    if stem.is_empty() {
        return Err(DataError::UnsafeGroupName {
            group: group.to_string(),
        }
        .into());
    }

    Ok(stem.to_string())
}
