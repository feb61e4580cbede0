//! # 索引与执行计划
//!
//! 建立二级索引并对比建索引前后的执行统计。统计数据全部来自服务器的
//! `explain` 命令（`executionStats` 级别），这里只负责提取和展示。

use bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use super::store::CatalogStore;
use super::types::{Book, ExplainSummary, IndexComparison};
use crate::error::{CatalogError, CatalogResult};

/// 书名单字段升序索引
pub const TITLE_INDEX: &str = "title_1";
/// 作者升序 + 出版年份降序的复合索引
pub const AUTHOR_YEAR_INDEX: &str = "author_1_published_year_-1";

// 服务器错误码
const NAMESPACE_NOT_FOUND: i32 = 26;
const INDEX_NOT_FOUND: i32 = 27;

pub fn title_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "title": 1 })
        .options(IndexOptions::builder().name(TITLE_INDEX.to_string()).build())
        .build()
}

pub fn author_year_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "author": 1, "published_year": -1 })
        .options(
            IndexOptions::builder()
                .name(AUTHOR_YEAR_INDEX.to_string())
                .build(),
        )
        .build()
}

/// 书名精确匹配条件
pub fn title_filter(title: &str) -> Document {
    doc! { "title": title }
}

/// 作者精确匹配 + 出版年份下限
pub fn author_since_filter(author: &str, since_year: i32) -> Document {
    doc! { "author": author, "published_year": { "$gte": since_year } }
}

/// 构造 `explain` 数据库命令
pub fn explain_command(collection_name: &str, filter: Document) -> Document {
    doc! {
        "explain": { "find": collection_name, "filter": filter },
        "verbosity": "executionStats"
    }
}

/// 创建索引，返回服务器确认的索引名称
pub async fn create_index(collection: &Collection<Book>, model: IndexModel) -> CatalogResult<String> {
    let result = collection
        .create_index(model)
        .await
        .map_err(|e| CatalogError::from_mongo("create_index", e))?;

    tracing::info!("Created index {} on {}", result.index_name, collection.name());
    Ok(result.index_name)
}

/// 删除演示用的两个索引，不存在的索引直接跳过
pub async fn drop_demo_indexes(collection: &Collection<Book>) -> CatalogResult<()> {
    for name in [TITLE_INDEX, AUTHOR_YEAR_INDEX] {
        match collection.drop_index(name).await {
            Ok(()) => tracing::info!("Dropped index {}", name),
            Err(e) if is_missing(&e) => {
                tracing::warn!("Index {} not present on {}, skipping", name, collection.name())
            }
            Err(e) => return Err(CatalogError::from_mongo("drop_index", e)),
        }
    }
    Ok(())
}

fn is_missing(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => {
            command.code == INDEX_NOT_FOUND || command.code == NAMESPACE_NOT_FOUND
        }
        _ => false,
    }
}

/// 对一个 find 条件执行 explain 并提取执行统计
pub async fn explain_find(store: &CatalogStore, filter: Document) -> CatalogResult<ExplainSummary> {
    let command = explain_command(store.collection_name(), filter);
    tracing::debug!("explain: {}", command);

    let response = store
        .database()
        .run_command(command)
        .await
        .map_err(|e| CatalogError::from_mongo("explain", e))?;

    let summary = parse_explain(&response)?;
    tracing::info!(
        "explain: plan={} docs={} keys={} time={}ms",
        summary.winning_plan,
        summary.docs_examined,
        summary.keys_examined,
        summary.execution_time_ms
    );
    Ok(summary)
}

/// 依次执行：建索引前 explain、建两个索引、建索引后 explain、复合条件 explain
pub async fn compare_index_plans(
    store: &CatalogStore,
    title: &str,
    author: &str,
    since_year: i32,
) -> CatalogResult<IndexComparison> {
    let before = explain_find(store, title_filter(title)).await?;

    let created_indexes = vec![
        create_index(store.books(), title_index()).await?,
        create_index(store.books(), author_year_index()).await?,
    ];

    let after = explain_find(store, title_filter(title)).await?;
    let compound = explain_find(store, author_since_filter(author, since_year)).await?;

    Ok(IndexComparison {
        before,
        after,
        compound,
        created_indexes,
    })
}

/// 从 explain 响应中提取执行统计
pub fn parse_explain(response: &Document) -> CatalogResult<ExplainSummary> {
    let stats = response
        .get_document("executionStats")
        .map_err(|_| CatalogError::Decode("explain response has no executionStats".to_string()))?;
    let planner = response
        .get_document("queryPlanner")
        .map_err(|_| CatalogError::Decode("explain response has no queryPlanner".to_string()))?;
    let winning = planner
        .get_document("winningPlan")
        .map_err(|_| CatalogError::Decode("explain response has no winningPlan".to_string()))?;

    // 基于 slot 的执行引擎把经典计划树包在 queryPlan 里
    let root = winning.get_document("queryPlan").unwrap_or(winning);

    let mut stages = Vec::new();
    let mut index_name = None;
    let mut current = Some(root);
    while let Some(stage) = current {
        if let Ok(name) = stage.get_str("stage") {
            stages.push(name.to_string());
        }
        if index_name.is_none() {
            index_name = stage.get_str("indexName").ok().map(str::to_string);
        }
        current = child_stage(stage);
    }

    Ok(ExplainSummary {
        docs_examined: read_count(stats, "totalDocsExamined")?,
        keys_examined: read_count(stats, "totalKeysExamined")?,
        execution_time_ms: read_count(stats, "executionTimeMillis")?,
        winning_plan: stages.join(" > "),
        index_name,
    })
}

fn child_stage(stage: &Document) -> Option<&Document> {
    if let Ok(input) = stage.get_document("inputStage") {
        return Some(input);
    }
    match stage.get_array("inputStages") {
        Ok(inputs) => inputs.iter().find_map(Bson::as_document),
        Err(_) => None,
    }
}

fn read_count(stats: &Document, key: &str) -> CatalogResult<i64> {
    match stats.get(key) {
        Some(Bson::Int32(value)) => Ok(i64::from(*value)),
        Some(Bson::Int64(value)) => Ok(*value),
        Some(Bson::Double(value)) => Ok(*value as i64),
        _ => Err(CatalogError::Decode(format!(
            "executionStats.{} missing or not numeric",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collscan_response() -> Document {
        doc! {
            "queryPlanner": {
                "namespace": "library.books",
                "winningPlan": {
                    "stage": "COLLSCAN",
                    "filter": { "title": { "$eq": "The Silent Orchard" } },
                    "direction": "forward"
                },
                "rejectedPlans": []
            },
            "executionStats": {
                "executionSuccess": true,
                "nReturned": 1,
                "executionTimeMillis": 0,
                "totalKeysExamined": 0,
                "totalDocsExamined": 12
            },
            "ok": 1.0
        }
    }

    fn sbe_ixscan_response() -> Document {
        doc! {
            "queryPlanner": {
                "winningPlan": {
                    "queryPlan": {
                        "stage": "FETCH",
                        "inputStage": {
                            "stage": "IXSCAN",
                            "keyPattern": { "title": 1 },
                            "indexName": "title_1"
                        }
                    },
                    "slotBasedPlan": { "slots": "..." }
                }
            },
            "executionStats": {
                "nReturned": 1,
                "executionTimeMillis": 2_i64,
                "totalKeysExamined": 1,
                "totalDocsExamined": 1
            }
        }
    }

    #[test]
    fn test_parse_collection_scan() {
        let summary = parse_explain(&collscan_response()).unwrap();
        assert_eq!(summary.winning_plan, "COLLSCAN");
        assert_eq!(summary.docs_examined, 12);
        assert_eq!(summary.keys_examined, 0);
        assert_eq!(summary.execution_time_ms, 0);
        assert!(!summary.uses_index());
    }

    #[test]
    fn test_parse_slot_based_index_scan() {
        let summary = parse_explain(&sbe_ixscan_response()).unwrap();
        assert_eq!(summary.winning_plan, "FETCH > IXSCAN");
        assert_eq!(summary.index_name.as_deref(), Some("title_1"));
        assert_eq!(summary.keys_examined, 1);
        assert_eq!(summary.execution_time_ms, 2);
    }

    #[test]
    fn test_parse_follows_input_stages_array() {
        let response = doc! {
            "queryPlanner": {
                "winningPlan": {
                    "stage": "FETCH",
                    "inputStage": {
                        "stage": "OR",
                        "inputStages": [
                            { "stage": "IXSCAN", "indexName": "author_1_published_year_-1" }
                        ]
                    }
                }
            },
            "executionStats": {
                "executionTimeMillis": 1,
                "totalKeysExamined": 2,
                "totalDocsExamined": 2
            }
        };

        let summary = parse_explain(&response).unwrap();
        assert_eq!(summary.winning_plan, "FETCH > OR > IXSCAN");
        assert_eq!(summary.index_name.as_deref(), Some(AUTHOR_YEAR_INDEX));
    }

    #[test]
    fn test_parse_rejects_missing_stats() {
        let response = doc! { "queryPlanner": { "winningPlan": { "stage": "EOF" } } };
        assert!(matches!(
            parse_explain(&response),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn test_explain_command_shape() {
        let command = explain_command("books", author_since_filter("Amara Lindqvist", 2015));
        assert_eq!(command.get_str("verbosity").unwrap(), "executionStats");

        let explain = command.get_document("explain").unwrap();
        assert_eq!(explain.get_str("find").unwrap(), "books");
        assert_eq!(
            explain.get_document("filter").unwrap(),
            &doc! { "author": "Amara Lindqvist", "published_year": { "$gte": 2015 } }
        );
    }

    #[test]
    fn test_index_definitions() {
        let title = title_index();
        assert_eq!(title.keys, doc! { "title": 1 });

        let compound = author_year_index();
        assert_eq!(compound.keys, doc! { "author": 1, "published_year": -1 });
        assert_eq!(
            compound.options.and_then(|o| o.name).as_deref(),
            Some(AUTHOR_YEAR_INDEX)
        );
    }
}
