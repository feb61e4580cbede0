//! # 目录模块类型定义
//!
//! 定义了书目记录、查询投影视图、聚合结果以及执行计划摘要

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// MongoDB中存储的书目记录
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    /// 书名（在样例数据中唯一）
    pub title: String,
    /// 作者
    pub author: String,
    /// 类型
    pub genre: String,
    /// 出版年份
    pub published_year: i32,
    /// 价格
    pub price: f64,
    /// 是否有库存
    pub in_stock: bool,
    /// 页数
    pub pages: i32,
    /// 出版社
    pub publisher: String,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        published_year: i32,
        price: f64,
        in_stock: bool,
        pages: i32,
        publisher: &str,
    ) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year,
            price,
            in_stock,
            pages,
            publisher: publisher.to_string(),
        }
    }
}

/// 投影 {title, author, price}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookListing {
    pub title: String,
    pub author: String,
    pub price: f64,
}

/// 投影 {title, published_year}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookYear {
    pub title: String,
    pub published_year: i32,
}

/// 投影 {title, genre, price}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthorBook {
    pub title: String,
    pub genre: String,
    pub price: f64,
}

/// 投影 {title, price}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookPrice {
    pub title: String,
    pub price: f64,
}

/// 投影 {title, author}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookTitleAuthor {
    pub title: String,
    pub author: String,
}

/// 全量扫描使用的固定投影
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookOverview {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: f64,
    pub in_stock: bool,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// MongoDB 排序文档中的方向值
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// 种子写入结果
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// 成功插入的文档数量
    pub inserted: usize,
}

/// 按类型统计的平均价格
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenrePriceStats {
    #[serde(rename(deserialize = "_id"))]
    pub genre: String,
    /// 没有任何价格字段的分组为 None
    pub avg_price: Option<f64>,
    pub count: i64,
}

/// 作者的书目数量
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthorBookCount {
    #[serde(rename(deserialize = "_id"))]
    pub author: String,
    pub count: i64,
}

/// 按年代分组的直方图条目
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecadeBucket {
    #[serde(rename(deserialize = "_id"))]
    pub decade: i32,
    pub count: i64,
    pub titles: Vec<String>,
}

/// 服务器返回的执行统计摘要
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ExplainSummary {
    /// totalDocsExamined
    pub docs_examined: i64,
    /// totalKeysExamined
    pub keys_examined: i64,
    /// executionTimeMillis
    pub execution_time_ms: i64,
    /// 获胜计划的阶段链，例如 "FETCH > IXSCAN"
    pub winning_plan: String,
    /// 获胜计划使用的索引
    pub index_name: Option<String>,
}

impl ExplainSummary {
    /// 获胜计划是否使用了索引扫描
    pub fn uses_index(&self) -> bool {
        self.index_name.is_some()
    }
}

/// 建索引前后的执行计划对比
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct IndexComparison {
    /// 建索引前的书名查询
    pub before: ExplainSummary,
    /// 建索引后的同一查询
    pub after: ExplainSummary,
    /// 作者 + 出版年份范围查询
    pub compound: ExplainSummary,
    /// 本次创建的索引名称
    pub created_indexes: Vec<String>,
}
