//! # Book Catalog Library
//!
//! 在 MongoDB 书目集合上写入样例数据，并演示查询、修改、聚合管道和索引对执行计划的影响。
//!
//! ## 模块组织
//!
//! - `catalog` - 书目集合上的全部操作和结果输出
//! - `cli` - 命令行参数（可选）
//! - `config` - 连接配置
//! - `env` - 类型安全的环境变量
//! - `error` - 统一错误类型
//! - `logging` - 日志初始化

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;

// Re-export commonly used items for convenience
pub use catalog::{CatalogStore, RunPlan, RunReport};
pub use config::MongoConfig;
pub use error::{CatalogError, CatalogResult};
