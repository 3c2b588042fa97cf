//! 共享库
//!
//! 包含 ClassQuest 各组件共用的配置加载、错误类型、SQLite 连接管理和可观测性初始化代码。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
