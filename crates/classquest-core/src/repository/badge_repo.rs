//! 徽章仓储
//!
//! 徽章只插入不更新。授予时间以固定格式文本存储；旧数据可能是其他 ISO-8601 写法，
//! 因此排序在解析后的时间上进行，同一时刻按 ID 倒序。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use sqlx::SqlitePool;

use super::traits::BadgeRepositoryTrait;
use crate::error::{Result, StoreError};
use crate::models::Badge;
use crate::models::badge::{format_awarded_at, parse_awarded_at};

/// 徽章行（授予时间为原始文本）
#[derive(sqlx::FromRow)]
struct BadgeRow {
    badge_id: i64,
    student_id: i64,
    name: String,
    description: String,
    svg_icon: String,
    awarded_at: String,
}

impl TryFrom<BadgeRow> for Badge {
    type Error = StoreError;

    fn try_from(row: BadgeRow) -> Result<Self> {
        Ok(Badge {
            id: row.badge_id,
            student_id: row.student_id,
            name: row.name,
            description: row.description,
            icon: row.svg_icon,
            awarded_at: parse_awarded_at(&row.awarded_at)?,
        })
    }
}

fn into_badges(rows: Vec<BadgeRow>) -> Result<Vec<Badge>> {
    rows.into_iter().map(Badge::try_from).collect()
}

/// 授予时间倒序，同一时刻后插入的在前
fn newest_first(a: &Badge, b: &Badge) -> Ordering {
    b.awarded_at
        .cmp(&a.awarded_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// 徽章仓储
pub struct BadgeRepository {
    pool: SqlitePool,
}

impl BadgeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BadgeRepositoryTrait for BadgeRepository {
    async fn create_badge(
        &self,
        student_id: i64,
        name: &str,
        description: &str,
        icon: &str,
        awarded_at: DateTime<Utc>,
    ) -> Result<Badge> {
        // 存储精度为微秒，返回值与读回的值保持一致
        let raw = format_awarded_at(awarded_at);
        let result = sqlx::query(
            r#"
            INSERT INTO badges (student_id, name, description, svg_icon, awarded_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(student_id)
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(&raw)
        .execute(&self.pool)
        .await?;

        Ok(Badge {
            id: result.last_insert_rowid(),
            student_id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            awarded_at: parse_awarded_at(&raw)?,
        })
    }

    async fn list_badges_for_student(&self, student_id: i64) -> Result<Vec<Badge>> {
        let rows = sqlx::query_as::<_, BadgeRow>(
            r#"
            SELECT badge_id, student_id, name, description, svg_icon, awarded_at
            FROM badges
            WHERE student_id = ?
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        let mut badges = into_badges(rows)?;
        badges.sort_by(newest_first);
        Ok(badges)
    }

    async fn list_all_badges(&self) -> Result<Vec<Badge>> {
        let rows = sqlx::query_as::<_, BadgeRow>(
            r#"
            SELECT badge_id, student_id, name, description, svg_icon, awarded_at
            FROM badges
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut badges = into_badges(rows)?;
        badges.sort_by(|a, b| {
            a.student_id
                .cmp(&b.student_id)
                .then_with(|| newest_first(a, b))
        });
        Ok(badges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::schema::ensure_schema;
    use chrono::{Duration, TimeZone};
    use classquest_shared::database::Database;

    async fn setup() -> (Database, BadgeRepository) {
        let db = Database::connect_in_memory().await.unwrap();
        ensure_schema(db.pool()).await.unwrap();
        let repo = BadgeRepository::new(db.pool().clone());
        (db, repo)
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let (_db, repo) = setup().await;
        let badge = repo
            .create_badge(1, "Star", "desc", "icon", base_time())
            .await
            .unwrap();

        let listed = repo.list_badges_for_student(1).await.unwrap();
        assert_eq!(listed, vec![badge]);
    }

    #[tokio::test]
    async fn test_list_newest_first_regardless_of_insert_order() {
        let (_db, repo) = setup().await;
        let t = base_time();
        repo.create_badge(1, "middle", "", "", t).await.unwrap();
        repo.create_badge(1, "oldest", "", "", t - Duration::days(1))
            .await
            .unwrap();
        repo.create_badge(1, "newest", "", "", t + Duration::hours(1))
            .await
            .unwrap();

        let names: Vec<_> = repo
            .list_badges_for_student(1)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_same_timestamp_later_insert_first() {
        let (_db, repo) = setup().await;
        let first = repo.create_badge(1, "a", "", "", base_time()).await.unwrap();
        let second = repo.create_badge(1, "b", "", "", base_time()).await.unwrap();

        let ids: Vec<_> = repo
            .list_badges_for_student(1)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_all_groups_by_student() {
        let (_db, repo) = setup().await;
        let t = base_time();
        repo.create_badge(2, "b-old", "", "", t).await.unwrap();
        repo.create_badge(1, "a-old", "", "", t).await.unwrap();
        repo.create_badge(2, "b-new", "", "", t + Duration::minutes(5))
            .await
            .unwrap();

        let badges: Vec<_> = repo
            .list_all_badges()
            .await
            .unwrap()
            .into_iter()
            .map(|b| (b.student_id, b.name))
            .collect();
        assert_eq!(
            badges,
            vec![
                (1, "a-old".to_string()),
                (2, "b-new".to_string()),
                (2, "b-old".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_mixed_timestamp_formats_sorted_by_time() {
        let (db, repo) = setup().await;
        for (name, raw) in [
            ("offset", "2024-03-01T10:30:00+02:00"),
            ("utc", "2024-03-01T09:00:00.000000Z"),
            ("naive", "2024-03-01T08:45:00.5"),
        ] {
            sqlx::query(
                "INSERT INTO badges (student_id, name, description, svg_icon, awarded_at) VALUES (1, ?, '', '', ?)",
            )
            .bind(name)
            .bind(raw)
            .execute(db.pool())
            .await
            .unwrap();
        }

        let badges = repo.list_badges_for_student(1).await.unwrap();
        let names: Vec<_> = badges.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["utc", "naive", "offset"]);
        assert_eq!(
            badges[2].awarded_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
        );

        let all: Vec<_> = repo
            .list_all_badges()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(all, vec!["utc", "naive", "offset"]);
    }

    #[tokio::test]
    async fn test_corrupt_timestamp_surfaces_error() {
        let (db, repo) = setup().await;
        sqlx::query(
            "INSERT INTO badges (student_id, name, description, svg_icon, awarded_at) VALUES (1, 'x', '', '', 'not a date')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = repo.list_badges_for_student(1).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidTimestamp(_)));
    }
}
