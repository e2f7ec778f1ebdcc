//! 报告处理上下文
//!
//! 封装"我正在为哪个分组生成哪份报告"这一信息

use std::fmt::Display;
use std::path::PathBuf;

/// 报告处理上下文
///
/// 包含编辑单份报告所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct ReportCtx {
    /// 分组名（原样保留，用于写入文本和状态消息）
    pub group: String,

    /// 报告索引（仅用于日志显示）
    pub report_index: usize,

    /// 模板文件路径
    pub template_path: PathBuf,

    /// 输出文件路径
    pub output_path: PathBuf,
}

impl ReportCtx {
    /// 创建新的报告上下文
    pub fn new(
        group: String,
        report_index: usize,
        template_path: PathBuf,
        output_path: PathBuf,
    ) -> Self {
        Self {
            group,
            report_index,
            template_path,
            output_path,
        }
    }
}

impl Display for ReportCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[组#{} 报告#{} 输出#{}]",
            self.group,
            self.report_index,
            self.output_path.display()
        )
    }
}
