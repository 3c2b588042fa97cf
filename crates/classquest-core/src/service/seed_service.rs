//! 初始数据服务
//!
//! 首次启动时写入默认奖励和示例学生，已有数据时不做任何操作，可在每次启动时调用。

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::Result;
use crate::models::{NewReward, Reward, Student};
use crate::repository::{RewardRepositoryTrait, StudentRepositoryTrait};

/// 示例学生名称
pub const DEMO_STUDENT_NAME: &str = "Alex Abenteuer";

/// 示例学生使用的默认头像
pub const DEFAULT_AVATAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><circle cx="32" cy="32" r="30" fill="#ffd166"/><circle cx="23" cy="26" r="4" fill="#073b4c"/><circle cx="41" cy="26" r="4" fill="#073b4c"/><path d="M20 40 Q32 50 44 40" stroke="#073b4c" stroke-width="4" fill="none" stroke-linecap="round"/></svg>"##;

/// 默认奖励：(名称, 经验值, 颜色角色, 描述)
pub const DEFAULT_REWARDS: [(&str, i64, &str, &str); 3] = [
    ("Mutiger Beitrag", 10, "primary", "Für eine mutige Wortmeldung"),
    ("Teamgeist", 20, "success", "Hilft einem Teamkameraden"),
    ("Goldstern", 50, "warning", "Außergewöhnliche Leistung"),
];

/// 初始数据服务
pub struct SeedService<SR, RR>
where
    SR: StudentRepositoryTrait,
    RR: RewardRepositoryTrait,
{
    student_repo: Arc<SR>,
    reward_repo: Arc<RR>,
}

impl<SR, RR> SeedService<SR, RR>
where
    SR: StudentRepositoryTrait,
    RR: RewardRepositoryTrait,
{
    pub fn new(student_repo: Arc<SR>, reward_repo: Arc<RR>) -> Self {
        Self {
            student_repo,
            reward_repo,
        }
    }

    /// 奖励表为空时写入默认奖励，返回本次写入的奖励
    #[instrument(skip(self))]
    pub async fn ensure_default_rewards(&self) -> Result<Vec<Reward>> {
        if self.reward_repo.count_rewards().await? > 0 {
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(DEFAULT_REWARDS.len());
        for (label, xp_amount, color_role, description) in DEFAULT_REWARDS {
            let reward = NewReward::new(label, xp_amount)
                .with_color_role(color_role)
                .with_description(description);
            created.push(self.reward_repo.create_reward(&reward).await?);
        }

        info!(count = created.len(), "Default rewards seeded");
        Ok(created)
    }

    /// 学生表为空时创建示例学生并写入默认奖励
    #[instrument(skip(self))]
    pub async fn ensure_demo_student(&self) -> Result<Option<Student>> {
        if self.student_repo.count_students().await? > 0 {
            return Ok(None);
        }

        let student = self
            .student_repo
            .create_student(DEMO_STUDENT_NAME, DEFAULT_AVATAR)
            .await?;
        self.ensure_default_rewards().await?;

        info!(student_id = student.id, "Demo student created");
        Ok(Some(student))
    }
}
