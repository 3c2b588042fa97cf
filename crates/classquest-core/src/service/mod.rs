//! 服务层
//!
//! 实现业务逻辑，协调各仓储。
//!
//! ## 模块结构
//!
//! - `grant_service`: 经验值、奖励、徽章发放
//! - `query_service`: 只读查询（花名册、徽章墙、奖励列表）
//! - `seed_service`: 首次启动的默认数据

pub mod grant_service;
pub mod query_service;
pub mod seed_service;

pub use grant_service::GrantService;
pub use query_service::QueryService;
pub use seed_service::{DEFAULT_AVATAR, DEFAULT_REWARDS, DEMO_STUDENT_NAME, SeedService};
