//! 奖励模板
//!
//! 奖励描述一次可重复发放的经验值数额，发放时不会被消耗。

use serde::{Deserialize, Serialize};

/// 默认颜色角色
pub const DEFAULT_COLOR_ROLE: &str = "primary";

/// 奖励
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: i64,
    /// 按钮上显示的名称
    pub label: String,
    /// 发放的经验值
    pub xp_amount: i64,
    /// 界面颜色角色（primary / success / warning ...）
    pub color_role: String,
    #[sqlx(default)]
    #[serde(default)]
    pub description: Option<String>,
}

/// 新建奖励请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReward {
    pub label: String,
    pub xp_amount: i64,
    pub color_role: String,
    pub description: Option<String>,
}

impl NewReward {
    /// 使用默认颜色角色、无描述
    pub fn new(label: impl Into<String>, xp_amount: i64) -> Self {
        Self {
            label: label.into(),
            xp_amount,
            color_role: DEFAULT_COLOR_ROLE.to_string(),
            description: None,
        }
    }

    pub fn with_color_role(mut self, color_role: impl Into<String>) -> Self {
        self.color_role = color_role.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
