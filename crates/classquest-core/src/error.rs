//! 存储层错误类型
//!
//! 定义业务错误（参数非法、记录不存在）和系统错误（数据库、基础设施）

use classquest_shared::error::SharedError;
use thiserror::Error;

/// 存储层错误类型
#[derive(Debug, Error)]
pub enum StoreError {
    // === 业务错误 ===
    #[error("无效的参数: {field} - {message}")]
    InvalidArgument { field: String, message: String },

    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: &'static str, id: i64 },

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("无法解析时间戳: {0}")]
    InvalidTimestamp(String),

    #[error("基础设施错误: {0}")]
    Infrastructure(#[from] SharedError),
}

/// 存储层 Result 类型别名
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn student_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Student",
            id,
        }
    }

    pub fn reward_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Reward",
            id,
        }
    }

    /// 经验值为负数
    pub fn negative_xp(amount: i64) -> Self {
        Self::InvalidArgument {
            field: "amount".to_string(),
            message: format!("XP amount must be non-negative, got {}", amount),
        }
    }

    /// 经验值累加溢出
    pub fn xp_overflow(current: i64, amount: i64) -> Self {
        Self::InvalidArgument {
            field: "amount".to_string(),
            message: format!("XP overflow: {} + {}", current, amount),
        }
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::NotFound { .. })
    }

    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            Self::Infrastructure(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(StoreError::student_not_found(1).error_code(), "NOT_FOUND");
        assert_eq!(StoreError::negative_xp(-5).error_code(), "INVALID_ARGUMENT");
        assert_eq!(
            StoreError::Database(sqlx::Error::RowNotFound).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            StoreError::from(SharedError::Logging("x".to_string())).error_code(),
            "LOGGING_ERROR"
        );
    }

    #[test]
    fn test_is_business_error() {
        assert!(StoreError::reward_not_found(3).is_business_error());
        assert!(StoreError::negative_xp(-1).is_business_error());
        assert!(!StoreError::Database(sqlx::Error::PoolClosed).is_business_error());
        assert!(!StoreError::InvalidTimestamp("nope".to_string()).is_business_error());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::student_not_found(42);
        assert!(err.to_string().contains("Student"));
        assert!(err.to_string().contains("42"));

        let err = StoreError::negative_xp(-7);
        assert!(err.to_string().contains("-7"));
    }
}
