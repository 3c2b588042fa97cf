//! 徽章实体
//!
//! 徽章只追加不修改：授予后归属学生和授予时间都不再变化。

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// 已授予的徽章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: i64,
    /// 所属学生 ID
    pub student_id: i64,
    pub name: String,
    pub description: String,
    /// 图标资源，对存储层不透明
    pub icon: String,
    /// 授予时间（UTC）
    pub awarded_at: DateTime<Utc>,
}

/// 将授予时间格式化为存储文本
///
/// 固定微秒精度和 `Z` 后缀，保证文本顺序与时间顺序一致。
pub fn format_awarded_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 不带时区的旧格式，按 UTC 解释
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 解析存储中的授予时间
///
/// 优先按 RFC 3339 解析；旧数据文件中的无时区 ISO-8601 文本视为 UTC。
pub fn parse_awarded_at(raw: &str) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| StoreError::InvalidTimestamp(format!("{}: {}", raw, e))),
    }
}
