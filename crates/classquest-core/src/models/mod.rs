//! 领域模型
//!
//! 学生、徽章、奖励三类实体

pub mod badge;
pub mod reward;
pub mod student;

pub use badge::Badge;
pub use reward::{DEFAULT_COLOR_ROLE, NewReward, Reward};
pub use student::{Student, XP_PER_LEVEL, level_for_xp, validate_xp_amount};
