//! # 查询与修改操作
//!
//! 每个读取操作由过滤条件和投影组成，投影总是去掉 `_id`。
//! 查询描述（[`FindSpec`]）与执行分离，便于不连接数据库时检查查询形状。

use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde::de::DeserializeOwned;

use super::types::*;
use crate::error::{CatalogError, CatalogResult};

/// 分页大小
pub const PAGE_SIZE: u64 = 5;

/// 一次 find 调用的完整描述
#[derive(Debug, Clone, PartialEq)]
pub struct FindSpec {
    pub filter: Document,
    pub projection: Document,
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl FindSpec {
    fn new(filter: Document, projection: Document) -> Self {
        Self {
            filter,
            projection,
            sort: None,
            skip: None,
            limit: None,
        }
    }

    fn sorted(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// 按类型精确匹配
pub fn genre_query(genre: &str) -> FindSpec {
    FindSpec::new(
        doc! { "genre": genre },
        doc! { "_id": 0, "title": 1, "author": 1, "price": 1 },
    )
}

/// 出版年份严格大于给定年份
pub fn published_after_query(year: i32) -> FindSpec {
    FindSpec::new(
        doc! { "published_year": { "$gt": year } },
        doc! { "_id": 0, "title": 1, "published_year": 1 },
    )
}

/// 按作者精确匹配
pub fn author_query(author: &str) -> FindSpec {
    FindSpec::new(
        doc! { "author": author },
        doc! { "_id": 0, "title": 1, "genre": 1, "price": 1 },
    )
}

/// 有库存且出版年份大于给定年份
pub fn in_stock_published_after_query(year: i32) -> FindSpec {
    FindSpec::new(
        doc! { "in_stock": true, "published_year": { "$gt": year } },
        doc! { "_id": 0, "title": 1, "author": 1, "price": 1 },
    )
}

/// 全量扫描
pub fn overview_query() -> FindSpec {
    FindSpec::new(
        doc! {},
        doc! { "_id": 0, "title": 1, "author": 1, "genre": 1, "price": 1, "in_stock": 1 },
    )
}

/// 按价格排序，价格相同时按书名升序保证结果稳定
pub fn price_sorted_query(order: SortOrder) -> FindSpec {
    FindSpec::new(doc! {}, doc! { "_id": 0, "title": 1, "price": 1 })
        .sorted(doc! { "price": order.direction(), "title": 1 })
}

/// 按书名升序分页，页码从 1 开始
pub fn page_query(page: u64) -> CatalogResult<FindSpec> {
    if page == 0 {
        return Err(CatalogError::InvalidArgument(
            "page numbers start at 1".to_string(),
        ));
    }

    // skip 由服务器按 int64 处理
    let skip = (page - 1)
        .checked_mul(PAGE_SIZE)
        .filter(|s| *s <= i64::MAX as u64)
        .ok_or_else(|| CatalogError::InvalidArgument(format!("page {} is out of range", page)))?;

    let mut spec = FindSpec::new(doc! {}, doc! { "_id": 0, "title": 1, "author": 1 })
        .sorted(doc! { "title": 1 });
    spec.skip = Some(skip);
    spec.limit = Some(PAGE_SIZE as i64);
    Ok(spec)
}

/// 执行查询并把结果解码为投影视图
pub async fn run_find<T>(
    collection: &Collection<Book>,
    operation: &'static str,
    spec: FindSpec,
) -> CatalogResult<Vec<T>>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    tracing::debug!("{}: filter={} projection={}", operation, spec.filter, spec.projection);

    let typed = collection.clone_with_type::<T>();
    let mut find = typed.find(spec.filter).projection(spec.projection);
    if let Some(sort) = spec.sort {
        find = find.sort(sort);
    }
    if let Some(skip) = spec.skip {
        find = find.skip(skip);
    }
    if let Some(limit) = spec.limit {
        find = find.limit(limit);
    }

    let cursor = find
        .await
        .map_err(|e| CatalogError::from_mongo(operation, e))?;
    let rows: Vec<T> = cursor
        .try_collect()
        .await
        .map_err(|e| CatalogError::from_mongo(operation, e))?;

    tracing::info!("{} returned {} documents", operation, rows.len());
    Ok(rows)
}

pub async fn find_by_genre(
    collection: &Collection<Book>,
    genre: &str,
) -> CatalogResult<Vec<BookListing>> {
    run_find(collection, "find_by_genre", genre_query(genre)).await
}

pub async fn find_published_after(
    collection: &Collection<Book>,
    year: i32,
) -> CatalogResult<Vec<BookYear>> {
    run_find(collection, "find_published_after", published_after_query(year)).await
}

pub async fn find_by_author(
    collection: &Collection<Book>,
    author: &str,
) -> CatalogResult<Vec<AuthorBook>> {
    run_find(collection, "find_by_author", author_query(author)).await
}

pub async fn find_in_stock_published_after(
    collection: &Collection<Book>,
    year: i32,
) -> CatalogResult<Vec<BookListing>> {
    run_find(
        collection,
        "find_in_stock_published_after",
        in_stock_published_after_query(year),
    )
    .await
}

pub async fn list_books(collection: &Collection<Book>) -> CatalogResult<Vec<BookOverview>> {
    run_find(collection, "list_books", overview_query()).await
}

pub async fn list_by_price(
    collection: &Collection<Book>,
    order: SortOrder,
) -> CatalogResult<Vec<BookPrice>> {
    run_find(collection, "list_by_price", price_sorted_query(order)).await
}

pub async fn list_page(
    collection: &Collection<Book>,
    page: u64,
) -> CatalogResult<Vec<BookTitleAuthor>> {
    run_find(collection, "list_page", page_query(page)?).await
}

/// 按书名读取单条完整记录
pub async fn find_by_title(
    collection: &Collection<Book>,
    title: &str,
) -> CatalogResult<Option<Book>> {
    collection
        .find_one(doc! { "title": title })
        .await
        .map_err(|e| CatalogError::from_mongo("find_one", e))
}

/// 修改第一条匹配书名的价格，返回修改后的记录
///
/// 没有匹配时返回 `None`，不会插入新记录。
pub async fn update_price(
    collection: &Collection<Book>,
    title: &str,
    price: f64,
) -> CatalogResult<Option<Book>> {
    let updated = collection
        .find_one_and_update(doc! { "title": title }, doc! { "$set": { "price": price } })
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| CatalogError::from_mongo("find_one_and_update", e))?;

    match updated {
        Some(_) => tracing::info!("Updated price of '{}' to {}", title, price),
        None => tracing::info!("No document found with title '{}'", title),
    }

    Ok(updated)
}

/// 删除至多一条匹配书名的记录，返回删除数量（0 或 1）
pub async fn delete_by_title(collection: &Collection<Book>, title: &str) -> CatalogResult<u64> {
    let result = collection
        .delete_one(doc! { "title": title })
        .await
        .map_err(|e| CatalogError::from_mongo("delete_one", e))?;

    tracing::info!("Deleted {} document(s) with title '{}'", result.deleted_count, title);
    Ok(result.deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_projection_hides_id() {
        let specs = vec![
            genre_query("Fiction"),
            published_after_query(2015),
            author_query("Amara Lindqvist"),
            in_stock_published_after_query(2017),
            overview_query(),
            price_sorted_query(SortOrder::Asc),
            page_query(1).unwrap(),
        ];

        for spec in specs {
            assert_eq!(spec.projection.get_i32("_id").unwrap(), 0, "{:?}", spec);
        }
    }

    #[test]
    fn test_range_filters() {
        let spec = published_after_query(2015);
        assert_eq!(
            spec.filter,
            doc! { "published_year": { "$gt": 2015 } }
        );

        let spec = in_stock_published_after_query(2017);
        assert_eq!(
            spec.filter,
            doc! { "in_stock": true, "published_year": { "$gt": 2017 } }
        );
        assert_eq!(spec.projection, doc! { "_id": 0, "title": 1, "author": 1, "price": 1 });
    }

    #[test]
    fn test_price_sort_is_stable() {
        let asc = price_sorted_query(SortOrder::Asc);
        assert_eq!(asc.sort, Some(doc! { "price": 1, "title": 1 }));

        let desc = price_sorted_query(SortOrder::Desc);
        assert_eq!(desc.sort, Some(doc! { "price": -1, "title": 1 }));
        assert!(desc.filter.is_empty());
    }

    #[test]
    fn test_page_offsets() {
        let first = page_query(1).unwrap();
        assert_eq!(first.skip, Some(0));
        assert_eq!(first.limit, Some(5));
        assert_eq!(first.sort, Some(doc! { "title": 1 }));

        let third = page_query(3).unwrap();
        assert_eq!(third.skip, Some(10));
        assert_eq!(third.limit, Some(5));
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let err = page_query(0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn test_huge_page_is_rejected() {
        let err = page_query(u64::MAX / 2).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));

        let err = page_query(u64::MAX).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));

        // 最后一个可表示的 skip
        let last = i64::MAX as u64 / PAGE_SIZE + 1;
        let spec = page_query(last).unwrap();
        assert_eq!(spec.skip, Some((last - 1) * PAGE_SIZE));
    }
}
