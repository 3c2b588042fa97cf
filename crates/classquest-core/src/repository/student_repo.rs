//! 学生仓储
//!
//! 提供学生表的数据访问，经验值变更在事务内完成读取、溢出检查和写入

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use super::traits::StudentRepositoryTrait;
use crate::error::{Result, StoreError};
use crate::models::{Student, level_for_xp};

const SELECT_STUDENT: &str = r#"
SELECT student_id AS id, display_name, avatar_svg AS avatar, xp, level
FROM students
"#;

/// 学生仓储
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 在指定连接上增加经验值（事务内使用）
    ///
    /// 先读取当前经验值做溢出检查，溢出时返回 `InvalidArgument` 且不写入。
    /// 等级由 [`level_for_xp`] 计算，与内存模型保持一致。
    pub async fn increment_xp_in_tx(
        conn: &mut SqliteConnection,
        id: i64,
        amount: i64,
    ) -> Result<Option<Student>> {
        let current: Option<i64> =
            sqlx::query_scalar("SELECT xp FROM students WHERE student_id = ?")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        let Some(current) = current else {
            return Ok(None);
        };
        let xp = current
            .checked_add(amount)
            .ok_or_else(|| StoreError::xp_overflow(current, amount))?;

        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET xp = ?1, level = ?2
            WHERE student_id = ?3
            RETURNING student_id AS id, display_name, avatar_svg AS avatar, xp, level
            "#,
        )
        .bind(xp)
        .bind(level_for_xp(xp))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(student)
    }
}

#[async_trait]
impl StudentRepositoryTrait for StudentRepository {
    async fn create_student(&self, display_name: &str, avatar: &str) -> Result<Student> {
        let result = sqlx::query(
            "INSERT INTO students (display_name, avatar_svg, xp, level) VALUES (?, ?, 0, 1)",
        )
        .bind(display_name)
        .bind(avatar)
        .execute(&self.pool)
        .await?;

        Ok(Student::new(
            result.last_insert_rowid(),
            display_name,
            avatar,
        ))
    }

    async fn update_student(&self, student: &Student) -> Result<()> {
        // 不存在的 ID 影响 0 行，静默忽略
        sqlx::query(
            r#"
            UPDATE students
            SET display_name = ?, avatar_svg = ?, xp = ?, level = ?
            WHERE student_id = ?
            "#,
        )
        .bind(&student.display_name)
        .bind(&student.avatar)
        .bind(student.xp)
        .bind(student.level)
        .bind(student.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        let student =
            sqlx::query_as::<_, Student>(&format!("{} WHERE student_id = ?", SELECT_STUDENT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(student)
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "{} ORDER BY display_name COLLATE NOCASE ASC, student_id ASC",
            SELECT_STUDENT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn count_students(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn increment_xp(&self, id: i64, amount: i64) -> Result<Option<Student>> {
        let mut tx = self.pool.begin().await?;
        let student = Self::increment_xp_in_tx(&mut tx, id, amount).await?;
        tx.commit().await?;
        Ok(student)
    }

    async fn increment_xp_all(&self, ids: &[i64], amount: i64) -> Result<Vec<Student>> {
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(ids.len());

        for &id in ids {
            match Self::increment_xp_in_tx(&mut tx, id, amount).await? {
                Some(student) => updated.push(student),
                // tx 被 drop 时自动回滚
                None => return Err(StoreError::student_not_found(id)),
            }
        }

        tx.commit().await?;
        Ok(updated)
    }
}
