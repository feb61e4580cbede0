//! 统一错误处理
//!
//! 区分连接失败和单个操作失败，未找到记录不属于错误

use thiserror::Error;

use crate::env::EnvError;

/// 目录操作错误类型
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] EnvError),

    /// 无法连接数据库
    #[error("连接错误: {0}")]
    Connection(String),

    /// 数据库拒绝了某个操作
    #[error("操作 {operation} 失败: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },

    /// 文档结构与预期不符
    #[error("解码错误: {0}")]
    Decode(String),

    /// 参数无效
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    /// 报告序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Connection,
    Operation,
    Input,
}

impl CatalogError {
    /// 把驱动错误归类为连接错误或操作错误
    pub fn from_mongo(operation: &'static str, err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => {
                CatalogError::Connection(format!("{}: {}", operation, err))
            }
            _ => CatalogError::Operation {
                operation,
                message: err.to_string(),
            },
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::Config(_) => ErrorCategory::Configuration,
            CatalogError::Connection(_) => ErrorCategory::Connection,
            CatalogError::Operation { .. } => ErrorCategory::Operation,
            CatalogError::Decode(_) => ErrorCategory::Operation,
            CatalogError::Serialization(_) => ErrorCategory::Operation,
            CatalogError::InvalidArgument(_) => ErrorCategory::Input,
        }
    }

    /// 是否属于连接级别的失败
    pub fn is_connection_failure(&self) -> bool {
        self.category() == ErrorCategory::Connection
    }
}

impl From<bson::de::Error> for CatalogError {
    fn from(err: bson::de::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let env_err = EnvError {
            variable: "MONGODB_URL".to_string(),
            message: "MongoDB URL must start with mongodb:// or mongodb+srv://".to_string(),
        };
        let err: CatalogError = env_err.into();

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("MONGODB_URL"));
        assert!(!err.is_connection_failure());
    }

    #[test]
    fn test_categories() {
        assert!(CatalogError::Connection("ping: timed out".to_string()).is_connection_failure());
        assert_eq!(
            CatalogError::Operation {
                operation: "insert_many",
                message: "E11000 duplicate key".to_string(),
            }
            .category(),
            ErrorCategory::Operation
        );
        assert_eq!(
            CatalogError::InvalidArgument("page must be >= 1".to_string()).category(),
            ErrorCategory::Input
        );
    }

    #[test]
    fn test_operation_display_names_the_operation() {
        let err = CatalogError::Operation {
            operation: "aggregate",
            message: "unknown group operator".to_string(),
        };
        assert_eq!(err.to_string(), "操作 aggregate 失败: unknown group operator");
    }

    #[test]
    fn test_decode_error_conversion() {
        let doc = bson::doc! { "title": 42 };
        let err: CatalogError = bson::from_document::<crate::catalog::BookPrice>(doc)
            .unwrap_err()
            .into();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
