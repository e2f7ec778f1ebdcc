use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名（可选，位于工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "ppt_report.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时处理的报告数量
    pub max_concurrent_reports: usize,
    /// 模板文件路径
    pub template_path: String,
    /// 数据文件存放目录
    pub data_dir: String,
    /// 图表数据文件名（所有组共用一份）
    pub chart_data_file: String,
    /// 各组表格数据文件名前缀（后接组名与 .csv）
    pub table_file_prefix: String,
    /// 输出目录
    pub output_dir: String,
    /// 输出文件名前缀
    pub output_prefix: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 批处理摘要文件（JSON）
    pub summary_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_reports: 8,
            template_path: "templates/ppt-template.pptx".to_string(),
            data_dir: "data".to_string(),
            chart_data_file: "chart_df.csv".to_string(),
            table_file_prefix: "table_".to_string(),
            output_dir: "outputs".to_string(),
            output_prefix: "results_group_".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            summary_file: "batch_summary.json".to_string(),
        }
    }
}

impl Config {
    /// 加载配置
    ///
    /// 优先级：环境变量 > TOML 配置文件 > 默认值
    pub fn load() -> Self {
        let base = match Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE)) {
            Ok(config) => config,
            Err(AppError::File(FileError::NotFound { .. })) => Self::default(),
            Err(e) => {
                tracing::warn!("⚠️ 配置文件加载失败，使用默认值: {}", e);
                Self::default()
            }
        };
        Self::overlay_env(base)
    }

    /// 仅从环境变量加载（默认值兜底）
    pub fn from_env() -> Self {
        Self::overlay_env(Self::default())
    }

    /// 从 TOML 文件加载，缺失的键使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    fn overlay_env(base: Self) -> Self {
        Self {
            max_concurrent_reports: std::env::var("MAX_CONCURRENT_REPORTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.max_concurrent_reports),
            template_path: std::env::var("TEMPLATE_PATH").unwrap_or(base.template_path),
            data_dir: std::env::var("DATA_DIR").unwrap_or(base.data_dir),
            chart_data_file: std::env::var("CHART_DATA_FILE").unwrap_or(base.chart_data_file),
            table_file_prefix: std::env::var("TABLE_FILE_PREFIX").unwrap_or(base.table_file_prefix),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(base.output_dir),
            output_prefix: std::env::var("OUTPUT_PREFIX").unwrap_or(base.output_prefix),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(base.output_log_file),
            summary_file: std::env::var("SUMMARY_FILE").unwrap_or(base.summary_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config =
            toml::from_str("max_concurrent_reports = 2\noutput_dir = \"out\"").unwrap();

        assert_eq!(config.max_concurrent_reports, 2);
        assert_eq!(config.output_dir, "out");
        // 未出现的键保持默认
        assert_eq!(config.template_path, "templates/ppt-template.pptx");
        assert_eq!(config.table_file_prefix, "table_");
    }
}
