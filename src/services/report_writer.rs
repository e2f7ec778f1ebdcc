//! 结果日志写入服务 - 业务能力层
//!
//! 只负责"把分组结局追加到 output.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::models::report::GroupOutcome;

/// 结果日志写入服务
///
/// 职责：
/// - 把单个分组的处理结局追加到结果文件
/// - 只处理单条结局
/// - 不出现 Vec<GroupOutcome>
/// - 不关心处理顺序
pub struct ReportWriter {
    output_file_path: String,
}

impl ReportWriter {
    /// 创建新的结果日志写入服务
    pub fn new() -> Self {
        Self {
            output_file_path: "output.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            output_file_path: path.into(),
        }
    }

    /// 追加一条分组结局
    ///
    /// # 参数
    /// - `outcome`: 分组处理结局
    ///
    /// # 返回
    /// 返回是否成功写入
    pub async fn write(&self, outcome: &GroupOutcome) -> Result<()> {
        debug!(
            "写入结果: 组 {} | 成功: {} | 消息长度: {}",
            outcome.group,
            outcome.success,
            outcome.message.len()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_file_path)?;

        let status = if outcome.success { "成功" } else { "失败" };
        let line = format!("组 {} | {} | {}\n", outcome.group, status, outcome.message);

        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
