//! # 样例数据写入
//!
//! 一次有序批量插入：遇到第一个失败（例如唯一索引冲突）即停止。
//! 重复运行会产生重复书名，这是样例数据的预期行为。

use bson::doc;
use mongodb::Collection;

use super::types::{Book, SeedOutcome};
use crate::error::{CatalogError, CatalogResult};

/// 有序批量插入书目
pub async fn seed_books(collection: &Collection<Book>, books: &[Book]) -> CatalogResult<SeedOutcome> {
    if books.is_empty() {
        tracing::warn!("No books to insert into {}", collection.name());
        return Ok(SeedOutcome { inserted: 0 });
    }

    let result = collection
        .insert_many(books)
        .ordered(true)
        .await
        .map_err(|e| CatalogError::from_mongo("insert_many", e))?;

    let inserted = result.inserted_ids.len();
    tracing::info!("Inserted {} books into {}", inserted, collection.name());

    Ok(SeedOutcome { inserted })
}

/// 删除整个集合
pub async fn reset_collection(collection: &Collection<Book>) -> CatalogResult<()> {
    collection
        .drop()
        .await
        .map_err(|e| CatalogError::from_mongo("drop", e))?;

    tracing::info!("Dropped collection {}", collection.name());
    Ok(())
}

/// 集合中的记录总数
pub async fn count_books(collection: &Collection<Book>) -> CatalogResult<u64> {
    collection
        .count_documents(doc! {})
        .await
        .map_err(|e| CatalogError::from_mongo("count_documents", e))
}
