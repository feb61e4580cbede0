//! 连接配置
//!
//! 使用类型安全的环境变量系统进行配置管理，命令行参数可以覆盖环境变量

use crate::env::{EnvError, EnvResult, EnvVar};

/// MongoDB 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// MongoDB 连接字符串
    pub connection_string: String,
    /// 数据库名称
    pub database_name: String,
    /// 集合名称
    pub collection_name: String,
}

impl MongoConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::mongodb;

        Ok(Self {
            connection_string: mongodb::ConnectionString::get()?,
            database_name: mongodb::DatabaseName::get()?,
            collection_name: mongodb::CollectionName::get()?,
        })
    }

    /// 用命令行提供的值覆盖环境配置
    ///
    /// 覆盖值经过与环境变量相同的校验。
    pub fn with_overrides(
        mut self,
        uri: Option<&str>,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> EnvResult<Self> {
        use crate::env::mongodb;

        if let Some(uri) = uri {
            self.connection_string = mongodb::ConnectionString::parse(uri)?;
        }
        if let Some(database) = database {
            self.database_name = mongodb::DatabaseName::parse(database)?;
        }
        if let Some(collection) = collection {
            self.collection_name = mongodb::CollectionName::parse(collection)?;
        }
        Ok(self)
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.connection_string.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_URL".to_string(),
                message: "Connection string cannot be empty".to_string(),
            });
        }

        if self.database_name.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_DATABASE".to_string(),
                message: "Database name cannot be empty".to_string(),
            });
        }

        if self.collection_name.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_COLLECTION".to_string(),
                message: "Collection name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// 用于日志的命名空间 `database.collection`
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database_name, self.collection_name)
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        use crate::env::mongodb::{DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_URL};

        Self {
            connection_string: DEFAULT_URL.to_string(),
            database_name: DEFAULT_DATABASE.to_string(),
            collection_name: DEFAULT_COLLECTION.to_string(),
        }
    }
}
