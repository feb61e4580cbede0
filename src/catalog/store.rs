//! # 数据库连接句柄
//!
//! 每次运行只建立一次连接，所有操作显式接收该句柄，运行结束时调用 [`CatalogStore::close`] 释放

use bson::doc;
use mongodb::{Client, Collection, Database};

use super::types::Book;
use crate::config::MongoConfig;
use crate::error::{CatalogError, CatalogResult};

/// 书目集合的连接句柄
pub struct CatalogStore {
    /// MongoDB客户端
    client: Client,
    /// 目标数据库
    db: Database,
    /// 书目集合
    collection: Collection<Book>,
}

impl CatalogStore {
    /// 连接数据库并用 ping 确认服务器可达
    pub async fn connect(config: &MongoConfig) -> CatalogResult<Self> {
        config.validate()?;

        let client = Client::with_uri_str(&config.connection_string)
            .await
            .map_err(|e| CatalogError::Connection(format!("connect: {}", e)))?;

        // 客户端是惰性连接的，ping 之前不会真正访问服务器
        if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(CatalogError::Connection(format!("ping: {}", e)));
        }

        tracing::info!("Connected to MongoDB, using {}", config.namespace());

        let db = client.database(&config.database_name);
        let collection = db.collection::<Book>(&config.collection_name);
        Ok(Self {
            client,
            db,
            collection,
        })
    }

    /// 书目集合
    pub fn books(&self) -> &Collection<Book> {
        &self.collection
    }

    /// 目标数据库（用于 explain 等数据库命令）
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// 集合名称
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// 关闭连接
    pub async fn close(self) {
        self.client.shutdown().await;
        tracing::debug!("MongoDB client shut down");
    }
}
