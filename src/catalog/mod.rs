//! # Catalog模块
//!
//! 书目集合上的全部操作：
//!
//! - 样例数据写入（有序批量插入）
//! - 按字段过滤、投影、排序和分页的查询
//! - 按书名修改价格、按书名删除
//! - 聚合管道（类型平均价格、最多产作者、年代直方图）
//! - 二级索引与 explain 执行统计对比
//!
//! ## 模块组织
//!
//! - `types` - 数据类型定义
//! - `fixture` - 样例书目
//! - `store` - 连接句柄
//! - `seeder` - 样例数据写入
//! - `queries` - 查询与修改
//! - `pipelines` - 聚合管道
//! - `indexing` - 索引与执行计划
//! - `runner` - 按固定顺序执行全部操作
//! - `report` - 文本/JSON 输出
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use book_catalog::catalog::{queries, CatalogStore};
//! use book_catalog::config::MongoConfig;
//!
//! # async fn demo() -> book_catalog::error::CatalogResult<()> {
//! let store = CatalogStore::connect(&MongoConfig::default()).await?;
//! let result = queries::find_by_genre(store.books(), "Fiction").await;
//! store.close().await;
//! for book in result? {
//!     println!("{} - {}", book.title, book.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod fixture;
pub mod indexing;
pub mod pipelines;
pub mod queries;
pub mod report;
pub mod runner;
pub mod seeder;
pub mod store;
pub mod types;

pub use fixture::{sample_books, SAMPLE_BOOK_COUNT};
pub use runner::{run_battery, RunPlan, RunReport};
pub use store::CatalogStore;
pub use types::*;
