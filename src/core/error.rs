//! 编排器错误类型
//!
//! 协作者缺席与失败同等对待：在调用点记 warn 并降级为 None，不会越过编排器边界。

use thiserror::Error;

/// 编排过程中可能出现的错误（协作者缺席 / 失败 / panic、输入形状非法、会话已关闭）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Collaborator {service} failed: {reason}")]
    CollaboratorFailed { service: String, reason: String },

    #[error("Collaborator panicked: {0}")]
    CollaboratorPanicked(String),

    /// 练习 / 读数 / 命令形状非法；识别器回退到默认分类
    #[error("Invalid input shape: {0}")]
    InvalidShape(String),

    #[error("Session closed")]
    SessionClosed,
}

impl QuantumError {
    pub fn failed(service: impl Into<String>, reason: impl Into<String>) -> Self {
        QuantumError::CollaboratorFailed {
            service: service.into(),
            reason: reason.into(),
        }
    }
}
