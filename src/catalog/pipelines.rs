//! # 聚合管道
//!
//! 三条独立的管道都作用于整个集合，每次调用都完整重新计算。

use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::Collection;
use serde::de::DeserializeOwned;

use super::types::*;
use crate::error::{CatalogError, CatalogResult};

/// 按类型分组，计算平均价格与数量，按平均价格降序
///
/// `$avg` 会忽略缺失的价格字段，没有任何价格的分组得到 null。
pub fn average_price_by_genre_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$genre",
                "avg_price": { "$avg": "$price" },
                "count": { "$sum": 1 }
            }
        },
        doc! { "$sort": { "avg_price": -1, "_id": 1 } },
    ]
}

/// 书目最多的作者
///
/// 数量相同时按作者名字典序取最小者。
pub fn top_author_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$author",
                "count": { "$sum": 1 }
            }
        },
        doc! { "$sort": { "count": -1, "_id": 1 } },
        doc! { "$limit": 1 },
    ]
}

/// 年代直方图：decade = floor(published_year / 10) * 10
pub fn books_by_decade_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$project": {
                "_id": 0,
                "title": 1,
                "decade": {
                    "$toInt": {
                        "$multiply": [
                            { "$floor": { "$divide": ["$published_year", 10] } },
                            10
                        ]
                    }
                }
            }
        },
        doc! {
            "$group": {
                "_id": "$decade",
                "count": { "$sum": 1 },
                "titles": { "$push": "$title" }
            }
        },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// 执行管道并把每个输出文档解码为结果行
pub async fn run_pipeline<T>(
    collection: &Collection<Book>,
    operation: &'static str,
    pipeline: Vec<Document>,
) -> CatalogResult<Vec<T>>
where
    T: DeserializeOwned,
{
    tracing::debug!("{}: {} stage(s)", operation, pipeline.len());

    let cursor = collection
        .aggregate(pipeline)
        .await
        .map_err(|e| CatalogError::from_mongo(operation, e))?;
    let documents: Vec<Document> = cursor
        .try_collect()
        .await
        .map_err(|e| CatalogError::from_mongo(operation, e))?;

    let rows = documents
        .into_iter()
        .map(bson::from_document::<T>)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!("{} produced {} group(s)", operation, rows.len());
    Ok(rows)
}

pub async fn average_price_by_genre(
    collection: &Collection<Book>,
) -> CatalogResult<Vec<GenrePriceStats>> {
    run_pipeline(
        collection,
        "average_price_by_genre",
        average_price_by_genre_pipeline(),
    )
    .await
}

/// 空集合返回 `None`
pub async fn top_author(collection: &Collection<Book>) -> CatalogResult<Option<AuthorBookCount>> {
    let rows = run_pipeline(collection, "top_author", top_author_pipeline()).await?;
    Ok(rows.into_iter().next())
}

pub async fn books_by_decade(collection: &Collection<Book>) -> CatalogResult<Vec<DecadeBucket>> {
    run_pipeline(collection, "books_by_decade", books_by_decade_pipeline()).await
}
