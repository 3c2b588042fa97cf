//! ClassQuest 启动入口
//!
//! 加载配置、初始化日志、打开本地存储并完成首次启动的数据准备，
//! 随后输出花名册和奖励概览。图形界面不在本 crate 范围内。

use anyhow::Result;
use classquest_shared::{config::AppConfig, observability};
use tracing::{info, warn};

use classquest_core::ClassQuestStore;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载配置，失败时退回默认值
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // 2. 初始化可观测性
    observability::init(&config.observability)?;
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        environment = %config.environment,
        database = %config.database.path,
        "Starting classquest..."
    );

    // 3. 打开存储
    let store = ClassQuestStore::open_with(&config.database).await?;

    // 4. 首次启动数据
    if let Some(student) = store.ensure_demo_student().await? {
        info!(student_id = student.id, name = %student.display_name, "首次启动，已创建示例学生");
    }
    store.ensure_default_rewards().await?;

    // 5. 概览
    for student in store.list_students().await? {
        info!(
            student_id = student.id,
            name = %student.display_name,
            level = student.level,
            xp = student.xp,
            badges = student.badges.len(),
            "Student"
        );
    }
    for reward in store.list_rewards().await? {
        info!(
            reward_id = reward.id,
            label = %reward.label,
            xp_amount = reward.xp_amount,
            color_role = %reward.color_role,
            "Reward"
        );
    }

    store.close().await;
    info!("Shutdown complete");
    Ok(())
}
