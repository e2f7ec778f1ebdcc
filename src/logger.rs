//! 日志初始化
//!
//! 基于 tracing-subscriber，日志级别通过 RUST_LOG 环境变量控制

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 未设置 RUST_LOG 时默认输出 info 级别。
/// 重复调用（例如在测试中）不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
