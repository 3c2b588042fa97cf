//! 数据库仓储层
//!
//! 每张表一个仓储，封装 SQL 细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 使用 SQLx 访问 SQLite
//! - 定义 trait 接口以支持 mock 测试

mod badge_repo;
mod reward_repo;
pub mod schema;
mod student_repo;
mod traits;

pub use badge_repo::BadgeRepository;
pub use reward_repo::RewardRepository;
pub use schema::ensure_schema;
pub use student_repo::StudentRepository;
pub use traits::*;
