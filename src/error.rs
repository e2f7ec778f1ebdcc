use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 模板文档错误
    Template(TemplateError),
    /// 图表处理错误
    Chart(ChartError),
    /// 表格处理错误
    Table(TableError),
    /// 数据形状或取值错误
    Data(DataError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "模板错误: {}", e),
            AppError::Chart(e) => write!(f, "图表错误: {}", e),
            AppError::Table(e) => write!(f, "表格错误: {}", e),
            AppError::Data(e) => write!(f, "数据错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Template(e) => Some(e),
            AppError::Chart(e) => Some(e),
            AppError::Table(e) => Some(e),
            AppError::Data(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

/// 模板文档错误
#[derive(Debug)]
pub enum TemplateError {
    /// 模板文件不存在或不可读
    NotFound {
        path: String,
    },
    /// 读取 ZIP 容器失败
    ArchiveReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写出 ZIP 容器失败
    ArchiveWriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 包内部件缺失
    PartMissing {
        part: String,
    },
    /// 部件内容不是合法 UTF-8
    PartNotUtf8 {
        part: String,
    },
    /// 部件结构不符合预期
    Malformed {
        part: String,
        detail: String,
    },
    /// 幻灯片数量不足
    SlideMissing {
        index: usize,
        found: usize,
    },
    /// 按内容定位的区域缺失或不唯一
    RegionNotFound {
        region: String,
        matches: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::NotFound { path } => write!(f, "模板文件不存在: {}", path),
            TemplateError::ArchiveReadFailed { path, source } => {
                write!(f, "读取文档包失败 ({}): {}", path, source)
            }
            TemplateError::ArchiveWriteFailed { path, source } => {
                write!(f, "写出文档包失败 ({}): {}", path, source)
            }
            TemplateError::PartMissing { part } => write!(f, "文档部件缺失: {}", part),
            TemplateError::PartNotUtf8 { part } => {
                write!(f, "文档部件不是合法 UTF-8: {}", part)
            }
            TemplateError::Malformed { part, detail } => {
                write!(f, "文档部件结构异常 ({}): {}", part, detail)
            }
            TemplateError::SlideMissing { index, found } => {
                write!(f, "缺少第 {} 张幻灯片 (共 {} 张)", index, found)
            }
            TemplateError::RegionNotFound { region, matches } => {
                write!(
                    f,
                    "找不到唯一匹配的文本区域 (标记: \"{}\", 匹配数: {})",
                    region, matches
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::ArchiveReadFailed { source, .. }
            | TemplateError::ArchiveWriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 图表处理错误
#[derive(Debug)]
pub enum ChartError {
    /// 按标题定位的图表缺失或不唯一
    NotFound {
        title: String,
        matches: usize,
    },
    /// 图表类型与预期不符
    KindMismatch {
        expected_element: String,
        found: usize,
    },
    /// 图表缺少标题元素
    TitleMissing,
    /// 坐标轴 ID 缺失，无法重建绘图区
    AxisIdsMissing {
        found: usize,
    },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::NotFound { title, matches } => {
                write!(
                    f,
                    "找不到唯一匹配的图表 (标题标记: \"{}\", 匹配数: {})",
                    title, matches
                )
            }
            ChartError::KindMismatch {
                expected_element,
                found,
            } => {
                write!(
                    f,
                    "图表类型不符 (期望元素: {}, 找到: {})",
                    expected_element, found
                )
            }
            ChartError::TitleMissing => write!(f, "图表缺少标题元素"),
            ChartError::AxisIdsMissing { found } => {
                write!(f, "图表坐标轴 ID 不完整 (找到: {})", found)
            }
        }
    }
}

impl std::error::Error for ChartError {}

/// 表格处理错误
#[derive(Debug)]
pub enum TableError {
    /// 表格缺失或不唯一
    NotFound {
        matches: usize,
    },
    /// 表格网格与数据形状不符
    GridMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
    /// 单元格缺少文本体
    CellBodyMissing {
        row: usize,
        col: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::NotFound { matches } => {
                write!(f, "找不到唯一的表格 (匹配数: {})", matches)
            }
            TableError::GridMismatch {
                expected_rows,
                expected_cols,
                found_rows,
                found_cols,
            } => {
                write!(
                    f,
                    "表格网格与数据不符 (期望 {}x{}, 实际 {}x{})",
                    expected_rows, expected_cols, found_rows, found_cols
                )
            }
            TableError::CellBodyMissing { row, col } => {
                write!(f, "单元格缺少文本体 (行 {}, 列 {})", row, col)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// 数据形状或取值错误
#[derive(Debug)]
pub enum DataError {
    /// 系列长度与类别数不符
    SeriesLengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },
    /// 数据行宽度与列数不符
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// 数据文件缺少必需的列
    ColumnMissing {
        column: String,
        path: String,
    },
    /// 单元格数值解析失败
    ValueParseFailed {
        column: String,
        row: usize,
        path: String,
    },
    /// 某组缺少表格数据文件
    TableDataMissing {
        group: String,
        path: String,
    },
    /// 组名为空
    EmptyGroupName,
    /// 组名无法转换为安全的文件名
    UnsafeGroupName {
        group: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::SeriesLengthMismatch {
                series,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "系列 \"{}\" 的值数量与类别数不符 (期望 {}, 实际 {})",
                    series, expected, actual
                )
            }
            DataError::RowWidthMismatch {
                row,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "第 {} 行宽度与列数不符 (期望 {}, 实际 {})",
                    row, expected, actual
                )
            }
            DataError::ColumnMissing { column, path } => {
                write!(f, "数据文件缺少列 \"{}\" ({})", column, path)
            }
            DataError::ValueParseFailed { column, row, path } => {
                write!(
                    f,
                    "数值解析失败 (列 \"{}\", 行 {}, 文件 {})",
                    column, row, path
                )
            }
            DataError::TableDataMissing { group, path } => {
                write!(f, "组 \"{}\" 缺少表格数据文件: {}", group, path)
            }
            DataError::EmptyGroupName => write!(f, "组名不能为空"),
            DataError::UnsafeGroupName { group } => {
                write!(f, "组名无法转换为安全的文件名: \"{}\"", group)
            }
        }
    }
}

impl std::error::Error for DataError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// CSV 读取或解析失败
    CsvReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::CsvReadFailed { path, source } => {
                write!(f, "CSV 读取失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::CsvReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// TOML 配置解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TomlParseFailed { path, source } => {
                write!(f, "TOML 配置解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 从子错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        AppError::Template(err)
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::Chart(err)
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        AppError::Table(err)
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::Data(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(ConfigError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建模板缺失错误
    pub fn template_not_found(path: impl Into<String>) -> Self {
        AppError::Template(TemplateError::NotFound { path: path.into() })
    }

    /// 创建文本区域定位失败错误
    pub fn region_not_found(region: impl Into<String>, matches: usize) -> Self {
        AppError::Template(TemplateError::RegionNotFound {
            region: region.into(),
            matches,
        })
    }

    /// 创建图表定位失败错误
    pub fn chart_not_found(title: impl Into<String>, matches: usize) -> Self {
        AppError::Chart(ChartError::NotFound {
            title: title.into(),
            matches,
        })
    }

    /// 创建表格定位失败错误
    pub fn table_not_found(matches: usize) -> Self {
        AppError::Table(TableError::NotFound { matches })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 CSV 读取错误
    pub fn csv_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::CsvReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
