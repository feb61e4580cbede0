//! 日志初始化
//!
//! 日志写到标准错误，标准输出只留给查询结果

use tracing::Level;

use crate::env::{core, EnvVar};

/// 根据环境变量初始化全局 tracing 订阅器
///
/// 日志级别无效时回退到 info 并给出警告。
pub fn init() {
    let (level, invalid) = match core::LogLevel::get() {
        Ok(level) => (parse_level(&level), None),
        Err(e) => (Level::INFO, Some(e)),
    };
    let no_color = core::NoColor::get_or_default(false);

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init()
        .is_ok();

    if let (true, Some(e)) = (installed, invalid) {
        tracing::warn!("{}; falling back to info", e);
    }
}

fn parse_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
