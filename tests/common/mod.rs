// 集成测试公共模块
//
// 每个测试使用独立的临时集合，测试结束时删除

use std::collections::BTreeSet;

use book_catalog::catalog::{sample_books, seeder, Book, CatalogStore};
use book_catalog::config::MongoConfig;

/// 连接到测试数据库上的一个全新集合
pub struct TestCatalog {
    pub store: CatalogStore,
}

impl TestCatalog {
    /// 连接但不写入数据
    pub async fn empty(label: &str) -> Self {
        let collection = format!("books_{}_{}", label, bson::oid::ObjectId::new().to_hex());
        let config = MongoConfig::from_env()
            .expect("valid MongoDB environment")
            .with_overrides(None, Some("book_catalog_tests"), Some(&collection))
            .expect("valid test collection name");

        let store = CatalogStore::connect(&config)
            .await
            .expect("MongoDB reachable at MONGODB_URL");
        Self { store }
    }

    /// 连接并写入一份样例数据
    pub async fn seeded(label: &str) -> Self {
        let catalog = Self::empty(label).await;
        let outcome = seeder::seed_books(catalog.store.books(), &sample_books())
            .await
            .expect("seed sample books");
        assert_eq!(outcome.inserted, sample_books().len());
        catalog
    }

    /// 删除临时集合并关闭连接
    pub async fn teardown(self) {
        seeder::reset_collection(self.store.books())
            .await
            .expect("drop test collection");
        self.store.close().await;
    }
}

/// 样例数据中满足条件的书名集合
pub fn fixture_titles(predicate: impl Fn(&Book) -> bool) -> BTreeSet<String> {
    sample_books()
        .into_iter()
        .filter(|book| predicate(book))
        .map(|book| book.title)
        .collect()
}

/// 样例数据按书名排序
pub fn fixture_titles_sorted() -> Vec<String> {
    let mut titles: Vec<String> = sample_books().into_iter().map(|b| b.title).collect();
    titles.sort();
    titles
}

/// 浮点数比较
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
