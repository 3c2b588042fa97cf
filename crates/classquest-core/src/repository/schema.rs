//! 表结构初始化
//!
//! 每次打开存储都会执行，全部语句为 `IF NOT EXISTS`，重复执行无副作用。
//! 外键约束不开启，引用一致性由上层负责。

use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::error::Result;

const STUDENTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    display_name TEXT NOT NULL,
    avatar_svg TEXT NOT NULL,
    xp INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1
)
"#;

const BADGES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS badges (
    badge_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    svg_icon TEXT NOT NULL,
    awarded_at TEXT NOT NULL,
    FOREIGN KEY(student_id) REFERENCES students(student_id)
)
"#;

const BADGES_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_badges_student_awarded
    ON badges (student_id, awarded_at)
"#;

const REWARDS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rewards (
    reward_id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL,
    xp_amount INTEGER NOT NULL,
    color_role TEXT NOT NULL,
    description TEXT
)
"#;

/// 确保三张表存在
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    for statement in [STUDENTS_SCHEMA, BADGES_SCHEMA, BADGES_INDEX, REWARDS_SCHEMA] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Database schema ensured");
    Ok(())
}
