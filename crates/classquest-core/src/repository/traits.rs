//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Badge, NewReward, Reward, Student};

/// 学生仓储接口
///
/// 返回的学生均不含徽章，徽章由查询服务另行挂载。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepositoryTrait: Send + Sync {
    async fn create_student(&self, display_name: &str, avatar: &str) -> Result<Student>;
    async fn update_student(&self, student: &Student) -> Result<()>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn count_students(&self) -> Result<i64>;

    /// 原子地增加经验值并重算等级，学生不存在时返回 `None`
    async fn increment_xp(&self, id: i64, amount: i64) -> Result<Option<Student>>;

    /// 在单个事务内为多名学生增加经验值，任一学生不存在则整体回滚并返回 `NotFound`
    async fn increment_xp_all(&self, ids: &[i64], amount: i64) -> Result<Vec<Student>>;
}

/// 徽章仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepositoryTrait: Send + Sync {
    async fn create_badge(
        &self,
        student_id: i64,
        name: &str,
        description: &str,
        icon: &str,
        awarded_at: DateTime<Utc>,
    ) -> Result<Badge>;

    /// 按授予时间倒序
    async fn list_badges_for_student(&self, student_id: i64) -> Result<Vec<Badge>>;

    /// 全部徽章，按学生分组、组内按授予时间倒序
    async fn list_all_badges(&self) -> Result<Vec<Badge>>;
}

/// 奖励仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardRepositoryTrait: Send + Sync {
    async fn create_reward(&self, reward: &NewReward) -> Result<Reward>;
    async fn get_reward(&self, id: i64) -> Result<Option<Reward>>;
    /// 按经验值升序
    async fn list_rewards(&self) -> Result<Vec<Reward>>;
    async fn count_rewards(&self) -> Result<i64>;
}
