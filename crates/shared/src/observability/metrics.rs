//! 业务指标
//!
//! 基于 metrics facade 记录计数，指标名集中定义在此处。

/// 学生创建数
pub const STUDENTS_CREATED_TOTAL: &str = "classquest_students_created_total";
/// 累计发放的经验值
pub const XP_GRANTED_TOTAL: &str = "classquest_xp_granted_total";
/// 经验值发放次数
pub const XP_GRANTS_TOTAL: &str = "classquest_xp_grants_total";
/// 徽章授予数
pub const BADGES_AWARDED_TOTAL: &str = "classquest_badges_awarded_total";

/// 注册指标描述
pub fn describe_metrics() {
    metrics::describe_counter!(STUDENTS_CREATED_TOTAL, "Total number of students created");
    metrics::describe_counter!(XP_GRANTED_TOTAL, "Total amount of xp granted to students");
    metrics::describe_counter!(XP_GRANTS_TOTAL, "Total number of xp grant operations");
    metrics::describe_counter!(BADGES_AWARDED_TOTAL, "Total number of badges awarded");
}

pub fn record_student_created() {
    metrics::counter!(STUDENTS_CREATED_TOTAL).increment(1);
}

/// 记录一次经验值发放，负数按 0 计
pub fn record_xp_granted(amount: i64) {
    metrics::counter!(XP_GRANTS_TOTAL).increment(1);
    metrics::counter!(XP_GRANTED_TOTAL).increment(u64::try_from(amount).unwrap_or(0));
}

pub fn record_badge_awarded() {
    metrics::counter!(BADGES_AWARDED_TOTAL).increment(1);
}
