//! 奖励仓储

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::traits::RewardRepositoryTrait;
use crate::error::Result;
use crate::models::{NewReward, Reward};

/// 奖励仓储
pub struct RewardRepository {
    pool: SqlitePool,
}

impl RewardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RewardRepositoryTrait for RewardRepository {
    async fn create_reward(&self, reward: &NewReward) -> Result<Reward> {
        let result = sqlx::query(
            "INSERT INTO rewards (label, xp_amount, color_role, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&reward.label)
        .bind(reward.xp_amount)
        .bind(&reward.color_role)
        .bind(reward.description.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(Reward {
            id: result.last_insert_rowid(),
            label: reward.label.clone(),
            xp_amount: reward.xp_amount,
            color_role: reward.color_role.clone(),
            description: reward.description.clone(),
        })
    }

    async fn get_reward(&self, id: i64) -> Result<Option<Reward>> {
        let reward = sqlx::query_as::<_, Reward>(
            r#"
            SELECT reward_id AS id, label, xp_amount, color_role, description
            FROM rewards
            WHERE reward_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reward)
    }

    async fn list_rewards(&self) -> Result<Vec<Reward>> {
        let rewards = sqlx::query_as::<_, Reward>(
            r#"
            SELECT reward_id AS id, label, xp_amount, color_role, description
            FROM rewards
            ORDER BY xp_amount ASC, reward_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rewards)
    }

    async fn count_rewards(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rewards")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
