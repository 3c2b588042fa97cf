//! 查询服务
//!
//! 只读操作：学生花名册、学生详情、徽章墙、奖励列表。
//! 学生记录从仓储取出后在此挂载徽章，徽章一律按授予时间倒序。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::{Badge, Reward, Student};
use crate::repository::{BadgeRepositoryTrait, RewardRepositoryTrait, StudentRepositoryTrait};

/// 查询服务
pub struct QueryService<SR, BR, RR>
where
    SR: StudentRepositoryTrait,
    BR: BadgeRepositoryTrait,
    RR: RewardRepositoryTrait,
{
    student_repo: Arc<SR>,
    badge_repo: Arc<BR>,
    reward_repo: Arc<RR>,
}

impl<SR, BR, RR> QueryService<SR, BR, RR>
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

    /// 获取学生详情（含徽章）
    #[instrument(skip(self))]
    pub async fn get_student(&self, student_id: i64) -> Result<Option<Student>> {
        let Some(mut student) = self.student_repo.get_student(student_id).await? else {
            debug!("Student not found");
            return Ok(None);
        };

        student.badges = self.badge_repo.list_badges_for_student(student_id).await?;
        Ok(Some(student))
    }

    /// 花名册：按显示名称（不区分大小写）升序，每名学生附带徽章
    #[instrument(skip(self))]
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        let mut students = self.student_repo.list_students().await?;

        let mut grouped: HashMap<i64, Vec<Badge>> = HashMap::new();
        for badge in self.badge_repo.list_all_badges().await? {
            grouped.entry(badge.student_id).or_default().push(badge);
        }

        for student in &mut students {
            if let Some(badges) = grouped.remove(&student.id) {
                student.badges = badges;
            }
        }

        debug!(count = students.len(), "Students listed");
        Ok(students)
    }

    pub async fn list_badges_for_student(&self, student_id: i64) -> Result<Vec<Badge>> {
        self.badge_repo.list_badges_for_student(student_id).await
    }

    /// 徽章墙：按花名册顺序展开所有学生的徽章
    ///
    /// 不属于任何现存学生的徽章不会出现。
    pub async fn list_all_badges(&self) -> Result<Vec<Badge>> {
        let badges = self
            .list_students()
            .await?
            .into_iter()
            .flat_map(|student| student.badges)
            .collect();
        Ok(badges)
    }

    pub async fn get_reward(&self, reward_id: i64) -> Result<Option<Reward>> {
        self.reward_repo.get_reward(reward_id).await
    }

    /// 奖励列表，按经验值升序
    pub async fn list_rewards(&self) -> Result<Vec<Reward>> {
        self.reward_repo.list_rewards().await
    }
}
