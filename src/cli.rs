//! 两个命令行工具共用的参数

use clap::{Args, Command, CommandFactory, FromArgMatches};

use crate::config::MongoConfig;
use crate::env::{generate_env_docs, EnvResult};

/// 连接参数，未提供时使用环境变量
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// MongoDB connection string [env: MONGODB_URL]
    #[arg(long, value_name = "URI")]
    pub uri: Option<String>,

    /// Database name [env: MONGODB_DATABASE]
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Collection name [env: MONGODB_COLLECTION]
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,
}

impl ConnectionArgs {
    /// 环境变量 + 命令行覆盖后的最终配置
    pub fn resolve(&self) -> EnvResult<MongoConfig> {
        let config = MongoConfig::from_env()?.with_overrides(
            self.uri.as_deref(),
            self.database.as_deref(),
            self.collection.as_deref(),
        )?;
        config.validate()?;
        Ok(config)
    }
}

/// 解析命令行参数，帮助信息末尾附带环境变量说明
pub fn parse_args<T>() -> T
where
    T: CommandFactory + FromArgMatches,
{
    let matches = with_env_help(T::command()).get_matches();
    T::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn with_env_help(command: Command) -> Command {
    command.after_help(generate_env_docs())
}
