//! 基础设施错误类型
//!
//! 连接、配置、日志初始化等与业务无关的错误，业务错误由 core crate 自行定义。

use thiserror::Error;

/// 基础设施错误
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("日志初始化失败: {0}")]
    Logging(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

impl SharedError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Logging(_) => "LOGGING_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = SharedError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.code(), "DATABASE_ERROR");

        let err = SharedError::Logging("already set".to_string());
        assert_eq!(err.code(), "LOGGING_ERROR");
        assert!(err.to_string().contains("already set"));
    }
}
