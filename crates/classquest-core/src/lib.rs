//! ClassQuest 数据核心
//!
//! 课堂游戏化看板的本地数据层：学生、徽章、奖励存放在单个 SQLite 文件中，
//! 界面层通过 [`ClassQuestStore`] 读写。
//!
//! ## 核心功能
//!
//! - **学生管理**：新建、覆盖更新、按名称排序的花名册
//! - **经验值发放**：单个、批量、按奖励模板发放；等级随经验值自动重算
//! - **徽章授予**：只追加的授予记录，按授予时间倒序展示
//! - **奖励模板**：可重复使用的经验值数额，首次启动写入默认模板
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层
//! - `store`: 对外门面

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;

pub use error::{Result, StoreError};
pub use models::*;
pub use store::ClassQuestStore;
