//! 学生实体
//!
//! 等级由经验值派生：`level = 1 + xp / 100`。等级随经验值一同持久化，
//! 但只能经由经验值变更重新计算，从不单独设置。

use serde::{Deserialize, Serialize};

use super::badge::Badge;
use crate::error::{Result, StoreError};

/// 每升一级所需经验值
pub const XP_PER_LEVEL: i64 = 100;

/// 根据经验值计算等级
pub fn level_for_xp(xp: i64) -> i64 {
    1 + xp.max(0) / XP_PER_LEVEL
}

/// 校验发放的经验值
pub fn validate_xp_amount(amount: i64) -> Result<()> {
    if amount < 0 {
        return Err(StoreError::negative_xp(amount));
    }
    Ok(())
}

/// 学生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    /// 显示名称
    pub display_name: String,
    /// 头像资源（如 SVG 源码），对存储层不透明
    pub avatar: String,
    pub xp: i64,
    pub level: i64,
    /// 已获得的徽章，从存储加载时按授予时间倒序
    #[sqlx(skip)]
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl Student {
    /// 新建学生：经验值 0，等级 1
    pub fn new(id: i64, display_name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar: avatar.into(),
            xp: 0,
            level: 1,
            badges: Vec::new(),
        }
    }

    /// 增加经验值并重新计算等级
    ///
    /// 负数返回 `InvalidArgument`，此时自身状态不变。
    pub fn add_xp(&mut self, amount: i64) -> Result<()> {
        validate_xp_amount(amount)?;
        let xp = self
            .xp
            .checked_add(amount)
            .ok_or_else(|| StoreError::xp_overflow(self.xp, amount))?;

        self.xp = xp;
        self.level = level_for_xp(xp);
        Ok(())
    }

    /// 追加徽章到内存集合，不做持久化
    pub fn award_badge(&mut self, badge: Badge) {
        self.badges.push(badge);
    }

    /// 当前等级内已获得的经验值
    pub fn level_progress(&self) -> i64 {
        self.xp.max(0) % XP_PER_LEVEL
    }

    /// 距下一级还差的经验值
    pub fn xp_to_next_level(&self) -> i64 {
        XP_PER_LEVEL - self.level_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_student_starts_at_level_one() {
        let student = Student::new(1, "Mia", "A");
        assert_eq!(student.xp, 0);
        assert_eq!(student.level, 1);
        assert!(student.badges.is_empty());
    }

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(105), 2);
        assert_eq!(level_for_xp(1_000), 11);
    }

    #[test]
    fn test_add_xp_recomputes_level() {
        let mut student = Student::new(1, "Mia", "A");
        student.add_xp(30).unwrap();
        assert_eq!((student.xp, student.level), (30, 1));

        student.add_xp(75).unwrap();
        assert_eq!((student.xp, student.level), (105, 2));
        assert_eq!(student.level_progress(), 5);
        assert_eq!(student.xp_to_next_level(), 95);
    }

    #[test]
    fn test_add_xp_zero_is_allowed() {
        let mut student = Student::new(1, "Mia", "A");
        student.add_xp(0).unwrap();
        assert_eq!((student.xp, student.level), (0, 1));
    }

    #[test]
    fn test_negative_xp_rejected_without_change() {
        let mut student = Student::new(1, "Mia", "A");
        student.add_xp(40).unwrap();

        let err = student.add_xp(-1).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument { .. }));
        assert_eq!((student.xp, student.level), (40, 1));
    }

    #[test]
    fn test_overflow_rejected_without_change() {
        let mut student = Student::new(1, "Mia", "A");
        student.xp = i64::MAX - 1;
        let err = student.add_xp(5).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument { .. }));
        assert_eq!(student.xp, i64::MAX - 1);
    }

    #[test]
    fn test_award_badge_appends() {
        let mut student = Student::new(1, "Mia", "A");
        for name in ["Star", "Moon"] {
            student.award_badge(Badge {
                id: 0,
                student_id: 1,
                name: name.to_string(),
                description: String::new(),
                icon: String::new(),
                awarded_at: Utc::now(),
            });
        }
        let names: Vec<_> = student.badges.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Star", "Moon"]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let student = Student::new(3, "Mia", "A");
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["displayName"], "Mia");
        assert_eq!(json["level"], 1);
    }
}
