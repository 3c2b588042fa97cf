//! 经验值与徽章发放服务
//!
//! 处理发放相关的业务逻辑：
//! - 单个学生的经验值发放（负数拒绝，学生不存在报 NotFound）
//! - 批量发放（逐个执行，遇错即停，已执行的发放不回滚）
//! - 事务性批量发放（全部成功或全部不生效）
//! - 按奖励模板发放
//! - 徽章授予
//!
//! ## 批量发放的部分失败
//!
//! `bulk_grant_xp` 在第一个失败的 ID 处中止并返回该错误，之前的发放保持生效，
//! 也不报告哪些已成功。需要全有或全无语义时使用 `bulk_grant_xp_atomic`。

use std::sync::Arc;

use chrono::Utc;
use classquest_shared::observability::metrics;
use tracing::{info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::models::{Badge, Student, validate_xp_amount};
use crate::repository::{BadgeRepositoryTrait, RewardRepositoryTrait, StudentRepositoryTrait};

/// 发放服务
pub struct GrantService<SR, BR, RR>
where
    SR: StudentRepositoryTrait,
    BR: BadgeRepositoryTrait,
    RR: RewardRepositoryTrait,
{
    student_repo: Arc<SR>,
    badge_repo: Arc<BR>,
    reward_repo: Arc<RR>,
}

impl<SR, BR, RR> GrantService<SR, BR, RR>
where
    SR: StudentRepositoryTrait,
    BR: BadgeRepositoryTrait,
    RR: RewardRepositoryTrait,
{
    pub fn new(student_repo: Arc<SR>, badge_repo: Arc<BR>, reward_repo: Arc<RR>) -> Self {
        Self {
            student_repo,
            badge_repo,
            reward_repo,
        }
    }

    /// 为单个学生发放经验值
    ///
    /// 参数校验在访问存储之前完成，负数不会改变任何已存储的数据。
    #[instrument(skip(self))]
    pub async fn grant_xp(&self, student_id: i64, amount: i64) -> Result<Student> {
        validate_xp_amount(amount)?;

        let mut student = self
            .student_repo
            .increment_xp(student_id, amount)
            .await?
            .ok_or_else(|| StoreError::student_not_found(student_id))?;
        student.badges = self.badge_repo.list_badges_for_student(student_id).await?;

        metrics::record_xp_granted(amount);
        info!(xp = student.xp, level = student.level, "XP granted");

        Ok(student)
    }

    /// 按顺序为多名学生发放经验值，遇错即停
    #[instrument(skip(self, student_ids), fields(count = student_ids.len()))]
    pub async fn bulk_grant_xp(&self, student_ids: &[i64], amount: i64) -> Result<Vec<Student>> {
        let mut updated = Vec::with_capacity(student_ids.len());

        for (index, &student_id) in student_ids.iter().enumerate() {
            match self.grant_xp(student_id, amount).await {
                Ok(student) => updated.push(student),
                Err(e) => {
                    warn!(
                        student_id,
                        applied = index,
                        skipped = student_ids.len() - index - 1,
                        error = %e,
                        "Bulk XP grant aborted, earlier grants stay applied"
                    );
                    return Err(e);
                }
            }
        }

        Ok(updated)
    }

    /// 在单个事务内为多名学生发放经验值，任一失败则全部不生效
    #[instrument(skip(self, student_ids), fields(count = student_ids.len()))]
    pub async fn bulk_grant_xp_atomic(
        &self,
        student_ids: &[i64],
        amount: i64,
    ) -> Result<Vec<Student>> {
        validate_xp_amount(amount)?;

        let mut updated = self.student_repo.increment_xp_all(student_ids, amount).await?;
        for student in &mut updated {
            student.badges = self.badge_repo.list_badges_for_student(student.id).await?;
            metrics::record_xp_granted(amount);
        }

        info!(count = updated.len(), "Atomic bulk XP grant committed");
        Ok(updated)
    }

    /// 按奖励模板为多名学生发放经验值
    ///
    /// 奖励不存在返回 NotFound；发放部分沿用 `bulk_grant_xp` 的遇错即停语义。
    #[instrument(skip(self, student_ids), fields(count = student_ids.len()))]
    pub async fn grant_reward(&self, reward_id: i64, student_ids: &[i64]) -> Result<Vec<Student>> {
        let reward = self
            .reward_repo
            .get_reward(reward_id)
            .await?
            .ok_or_else(|| StoreError::reward_not_found(reward_id))?;

        info!(label = %reward.label, xp_amount = reward.xp_amount, "Granting reward");
        self.bulk_grant_xp(student_ids, reward.xp_amount).await
    }

    /// 授予徽章，授予时间取当前 UTC 时间
    ///
    /// 不检查学生是否存在。
    #[instrument(skip(self, description, icon))]
    pub async fn award_badge(
        &self,
        student_id: i64,
        name: &str,
        description: &str,
        icon: &str,
    ) -> Result<Badge> {
        let badge = self
            .badge_repo
            .create_badge(student_id, name, description, icon, Utc::now())
            .await?;

        metrics::record_badge_awarded();
        info!(badge_id = badge.id, "Badge awarded");

        Ok(badge)
    }
}
