//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::{LogFormat, ObservabilityConfig};

/// 默认数据库文件名（相对于当前工作目录）
pub const DEFAULT_DB_PATH: &str = "classquest.db";

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 文件路径
    pub path: String,
    /// 文件不存在时是否自动创建
    pub create_if_missing: bool,
    /// 数据库被锁定时的等待时间
    pub busy_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            create_if_missing: true,
            busy_timeout_seconds: 5,
        }
    }
}

impl DatabaseConfig {
    /// 以指定文件路径构造配置，其余项取默认值
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database: DatabaseConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. 环境变量（CLASSQUEST_ 前缀，层级用双下划线，如 CLASSQUEST_DATABASE__PATH -> database.path）
    ///
    /// 环境名取自 CLASSQUEST_ENV，配置目录取自 CONFIG_DIR。
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("CLASSQUEST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), &env)
    }

    /// 从指定目录加载配置
    pub fn load_from(config_dir: &Path, env: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                Environment::with_prefix("CLASSQUEST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        // 生产环境统一输出 JSON 日志
        if config.is_production() {
            config.observability.log_format = LogFormat::Json;
        }
        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, DEFAULT_DB_PATH);
        assert!(config.database.create_if_missing);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.is_production());
    }

    #[test]
    fn test_with_path_keeps_defaults() {
        let config = DatabaseConfig::with_path("/tmp/other.db");
        assert_eq!(config.path, "/tmp/other.db");
        assert_eq!(config.busy_timeout_seconds, 5);
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent"), "test").unwrap();
        assert_eq!(config.environment, "test");
        assert_eq!(config.database.path, DEFAULT_DB_PATH);
    }

    #[test]
    fn test_environment_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\npath = \"base.db\"\nbusy_timeout_seconds = 9\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("production.toml"),
            "[database]\npath = \"prod.db\"\n\n[observability]\nlog_format = \"json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "production").unwrap();
        assert!(config.is_production());
        assert_eq!(config.database.path, "prod.db");
        assert_eq!(config.database.busy_timeout_seconds, 9);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_production_forces_json_logs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[observability]\nlog_format = \"pretty\"\n",
        )
        .unwrap();

        let production = AppConfig::load_from(dir.path(), "production").unwrap();
        assert_eq!(production.observability.log_format, LogFormat::Json);

        let development = AppConfig::load_from(dir.path(), "development").unwrap();
        assert_eq!(development.observability.log_format, LogFormat::Pretty);
    }
}
