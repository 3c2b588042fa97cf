//! 存储门面
//!
//! `ClassQuestStore` 是界面层访问本地数据的唯一入口：
//! 打开时建立唯一的数据库连接并确保表结构存在，之后提供学生、徽章、奖励的全部操作，
//! 最后通过 `close` 显式释放连接。
//!
//! ```ignore
//! let store = ClassQuestStore::open("classquest.db").await?;
//! store.ensure_default_rewards().await?;
//! let mia = store.create_student("Mia", avatar).await?;
//! store.grant_xp(mia.id, 30).await?;
//! store.close().await;
//! ```

use std::sync::Arc;

use classquest_shared::config::DatabaseConfig;
use classquest_shared::database::Database;
use classquest_shared::observability::metrics;
use tracing::{info, instrument};

use crate::error::Result;
use crate::models::{Badge, NewReward, Reward, Student};
use crate::repository::{
    BadgeRepository, RewardRepository, RewardRepositoryTrait, StudentRepository,
    StudentRepositoryTrait, ensure_schema,
};
use crate::service::{GrantService, QueryService, SeedService};

type Grants = GrantService<StudentRepository, BadgeRepository, RewardRepository>;
type Queries = QueryService<StudentRepository, BadgeRepository, RewardRepository>;
type Seeds = SeedService<StudentRepository, RewardRepository>;

/// ClassQuest 本地存储
pub struct ClassQuestStore {
    db: Database,
    students: Arc<StudentRepository>,
    rewards: Arc<RewardRepository>,
    grants: Grants,
    queries: Queries,
    seeds: Seeds,
}

impl ClassQuestStore {
    /// 打开指定路径的数据库文件（不存在则创建）
    pub async fn open(path: impl Into<String>) -> Result<Self> {
        Self::open_with(&DatabaseConfig::with_path(path)).await
    }

    /// 按完整配置打开
    #[instrument(skip(config), fields(path = %config.path))]
    pub async fn open_with(config: &DatabaseConfig) -> Result<Self> {
        let db = Database::connect(config).await?;
        Self::from_database(db).await
    }

    /// 打开内存数据库，关闭后数据即丢失
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::connect_in_memory().await?;
        Self::from_database(db).await
    }

    /// 在已有连接上初始化表结构并组装仓储和服务
    pub async fn from_database(db: Database) -> Result<Self> {
        ensure_schema(db.pool()).await?;

        let pool = db.pool().clone();
        let students = Arc::new(StudentRepository::new(pool.clone()));
        let badges = Arc::new(BadgeRepository::new(pool.clone()));
        let rewards = Arc::new(RewardRepository::new(pool));

        let grants = GrantService::new(students.clone(), badges.clone(), rewards.clone());
        let queries = QueryService::new(students.clone(), badges, rewards.clone());
        let seeds = SeedService::new(students.clone(), rewards.clone());

        info!("ClassQuest store ready");

        Ok(Self {
            db,
            students,
            rewards,
            grants,
            queries,
            seeds,
        })
    }

    /// 关闭连接
    pub async fn close(self) {
        self.db.close().await;
        info!("ClassQuest store closed");
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        self.db.health_check().await?;
        Ok(())
    }

    // ==================== 学生 ====================

    /// 新建学生，经验值 0、等级 1；名称不做校验
    #[instrument(skip(self, avatar))]
    pub async fn create_student(&self, display_name: &str, avatar: &str) -> Result<Student> {
        let student = self.students.create_student(display_name, avatar).await?;
        metrics::record_student_created();
        info!(student_id = student.id, "Student created");
        Ok(student)
    }

    /// 整行覆盖名称、头像、经验值、等级；ID 不存在时静默忽略
    #[instrument(skip(self, student), fields(student_id = student.id))]
    pub async fn update_student(&self, student: &Student) -> Result<()> {
        self.students.update_student(student).await
    }

    pub async fn get_student(&self, student_id: i64) -> Result<Option<Student>> {
        self.queries.get_student(student_id).await
    }

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.queries.list_students().await
    }

    pub async fn count_students(&self) -> Result<i64> {
        self.students.count_students().await
    }

    // ==================== 经验值 ====================

    pub async fn grant_xp(&self, student_id: i64, amount: i64) -> Result<Student> {
        self.grants.grant_xp(student_id, amount).await
    }

    /// 逐个发放，遇错即停，已发放的不回滚
    pub async fn bulk_grant_xp(&self, student_ids: &[i64], amount: i64) -> Result<Vec<Student>> {
        self.grants.bulk_grant_xp(student_ids, amount).await
    }

    /// 全有或全无的批量发放
    pub async fn bulk_grant_xp_atomic(
        &self,
        student_ids: &[i64],
        amount: i64,
    ) -> Result<Vec<Student>> {
        self.grants.bulk_grant_xp_atomic(student_ids, amount).await
    }

    pub async fn grant_reward(&self, reward_id: i64, student_ids: &[i64]) -> Result<Vec<Student>> {
        self.grants.grant_reward(reward_id, student_ids).await
    }

    // ==================== 徽章 ====================

    pub async fn award_badge(
        &self,
        student_id: i64,
        name: &str,
        description: &str,
        icon: &str,
    ) -> Result<Badge> {
        self.grants
            .award_badge(student_id, name, description, icon)
            .await
    }

    pub async fn list_badges_for_student(&self, student_id: i64) -> Result<Vec<Badge>> {
        self.queries.list_badges_for_student(student_id).await
    }

    /// 徽章墙
    pub async fn list_all_badges(&self) -> Result<Vec<Badge>> {
        self.queries.list_all_badges().await
    }

    // ==================== 奖励 ====================

    #[instrument(skip(self, reward), fields(label = %reward.label))]
    pub async fn add_reward(&self, reward: NewReward) -> Result<Reward> {
        let reward = self.rewards.create_reward(&reward).await?;
        info!(reward_id = reward.id, "Reward added");
        Ok(reward)
    }

    pub async fn get_reward(&self, reward_id: i64) -> Result<Option<Reward>> {
        self.queries.get_reward(reward_id).await
    }

    pub async fn list_rewards(&self) -> Result<Vec<Reward>> {
        self.queries.list_rewards().await
    }

    pub async fn count_rewards(&self) -> Result<i64> {
        self.rewards.count_rewards().await
    }

    // ==================== 初始数据 ====================

    pub async fn ensure_default_rewards(&self) -> Result<Vec<Reward>> {
        self.seeds.ensure_default_rewards().await
    }

    pub async fn ensure_demo_student(&self) -> Result<Option<Student>> {
        self.seeds.ensure_demo_student().await
    }
}
