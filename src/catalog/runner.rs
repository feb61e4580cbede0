//! # 查询演示流程
//!
//! 按固定顺序执行读取、修改、聚合和索引对比，并把全部结果收集到 [`RunReport`]。
//! 每个操作都等待上一个完成后才开始。

use serde::Serialize;

use super::indexing;
use super::pipelines;
use super::queries;
use super::store::CatalogStore;
use super::types::*;
use crate::error::CatalogResult;

/// 演示流程的参数
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub genre: String,
    pub published_after: i32,
    pub author: String,
    pub in_stock_published_after: i32,
    pub update_title: String,
    pub new_price: f64,
    pub delete_title: String,
    pub pages: Vec<u64>,
    pub explain_title: String,
    pub explain_author: String,
    pub explain_since_year: i32,
    /// 在 "before" 测量之前删除演示索引
    pub reset_indexes: bool,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            genre: "Fiction".to_string(),
            published_after: 2015,
            author: "Amara Lindqvist".to_string(),
            in_stock_published_after: 2017,
            update_title: "The Silent Orchard".to_string(),
            new_price: 12.49,
            delete_title: "Memoirs of a Voyager".to_string(),
            pages: vec![1, 2],
            explain_title: "The Silent Orchard".to_string(),
            explain_author: "Amara Lindqvist".to_string(),
            explain_since_year: 2015,
            reset_indexes: false,
        }
    }
}

/// 一页分页结果
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageResult {
    pub page: u64,
    pub books: Vec<BookTitleAuthor>,
}

/// 修改操作结果
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UpdateResult {
    pub title: String,
    pub price: f64,
    /// 没有匹配记录时为 None
    pub updated: Option<Book>,
}

/// 删除操作结果
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DeleteResult {
    pub title: String,
    pub deleted_count: u64,
}

/// 整个演示流程的结构化结果
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RunReport {
    pub by_genre: Vec<BookListing>,
    pub published_after: Vec<BookYear>,
    pub by_author: Vec<AuthorBook>,
    pub in_stock_recent: Vec<BookListing>,
    pub all_books: Vec<BookOverview>,
    pub cheapest_first: Vec<BookPrice>,
    pub most_expensive_first: Vec<BookPrice>,
    pub pages: Vec<PageResult>,
    pub update: UpdateResult,
    pub delete: DeleteResult,
    pub genre_prices: Vec<GenrePriceStats>,
    pub top_author: Option<AuthorBookCount>,
    pub decades: Vec<DecadeBucket>,
    pub indexes: IndexComparison,
}

/// 执行完整的演示流程
pub async fn run_battery(store: &CatalogStore, plan: &RunPlan) -> CatalogResult<RunReport> {
    let books = store.books();

    let by_genre = queries::find_by_genre(books, &plan.genre).await?;
    let published_after = queries::find_published_after(books, plan.published_after).await?;
    let by_author = queries::find_by_author(books, &plan.author).await?;
    let in_stock_recent =
        queries::find_in_stock_published_after(books, plan.in_stock_published_after).await?;
    let all_books = queries::list_books(books).await?;
    let cheapest_first = queries::list_by_price(books, SortOrder::Asc).await?;
    let most_expensive_first = queries::list_by_price(books, SortOrder::Desc).await?;

    let mut pages = Vec::with_capacity(plan.pages.len());
    for &page in &plan.pages {
        pages.push(PageResult {
            page,
            books: queries::list_page(books, page).await?,
        });
    }

    let update = UpdateResult {
        title: plan.update_title.clone(),
        price: plan.new_price,
        updated: queries::update_price(books, &plan.update_title, plan.new_price).await?,
    };
    let delete = DeleteResult {
        title: plan.delete_title.clone(),
        deleted_count: queries::delete_by_title(books, &plan.delete_title).await?,
    };

    let genre_prices = pipelines::average_price_by_genre(books).await?;
    let top_author = pipelines::top_author(books).await?;
    let decades = pipelines::books_by_decade(books).await?;

    if plan.reset_indexes {
        indexing::drop_demo_indexes(books).await?;
    }
    let indexes = indexing::compare_index_plans(
        store,
        &plan.explain_title,
        &plan.explain_author,
        plan.explain_since_year,
    )
    .await?;

    Ok(RunReport {
        by_genre,
        published_after,
        by_author,
        in_stock_recent,
        all_books,
        cheapest_first,
        most_expensive_first,
        pages,
        update,
        delete,
        genre_prices,
        top_author,
        decades,
        indexes,
    })
}
