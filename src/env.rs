//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，供连接配置和日志初始化使用

use std::env;
use std::fmt;
use std::path::PathBuf;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 加载工作目录下的 `.env` 文件（如果存在）
///
/// 已经存在于进程环境中的变量不会被覆盖。返回实际加载的文件路径，
/// 由调用方在日志初始化之后记录。
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "CATALOG_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// MongoDB相关环境变量
pub mod mongodb {
    use super::*;

    /// 默认数据库名称
    pub const DEFAULT_DATABASE: &str = "library";
    /// 默认集合名称
    pub const DEFAULT_COLLECTION: &str = "books";
    /// 默认连接地址
    pub const DEFAULT_URL: &str = "mongodb://localhost:27017";

    /// MongoDB连接字符串
    pub struct ConnectionString;
    impl EnvVar<String> for ConnectionString {
        const NAME: &'static str = "MONGODB_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(DEFAULT_URL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB connection string";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "MongoDB URL must start with mongodb:// or mongodb+srv://".to_string(),
                })
            }
        }
    }

    /// 数据库名称
    pub struct DatabaseName;
    impl EnvVar<String> for DatabaseName {
        const NAME: &'static str = "MONGODB_DATABASE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(DEFAULT_DATABASE.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB database name";

        fn parse(value: &str) -> EnvResult<String> {
            parse_name(value, Self::NAME, "Database name cannot be empty")
        }
    }

    /// 集合名称
    pub struct CollectionName;
    impl EnvVar<String> for CollectionName {
        const NAME: &'static str = "MONGODB_COLLECTION";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(DEFAULT_COLLECTION.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB collection name";

        fn parse(value: &str) -> EnvResult<String> {
            parse_name(value, Self::NAME, "Collection name cannot be empty")
        }
    }
}

fn parse_name(value: &str, var_name: &str, empty_message: &str) -> EnvResult<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: empty_message.to_string(),
        });
    }
    Ok(name.to_string())
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("Environment variables:\n");

    let entries = [
        (
            mongodb::ConnectionString::NAME,
            mongodb::ConnectionString::DESCRIPTION,
            mongodb::DEFAULT_URL,
        ),
        (
            mongodb::DatabaseName::NAME,
            mongodb::DatabaseName::DESCRIPTION,
            mongodb::DEFAULT_DATABASE,
        ),
        (
            mongodb::CollectionName::NAME,
            mongodb::CollectionName::DESCRIPTION,
            mongodb::DEFAULT_COLLECTION,
        ),
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION, "info"),
        (core::NoColor::NAME, core::NoColor::DESCRIPTION, "unset"),
    ];

    for (name, description, default) in entries {
        docs.push_str(&format!("  {:<20} {} (default: {})\n", name, description, default));
    }

    docs
}
