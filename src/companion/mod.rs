//! 学习伙伴：短时效的建议消息，随模式切换整体重建

pub mod generator;

pub use generator::generate;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanionKind {
    CognitiveHint,
    Audio,
    Visual,
    Progress,
    Motivation,
    ModeSpecific,
    Ocr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionPriority {
    Low,
    Medium,
    High,
}

/// 单条学习伙伴消息；生成后不再原地修改
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Companion {
    pub id: String,
    pub kind: CompanionKind,
    pub message: String,
    pub action: Option<String>,
    pub priority: CompanionPriority,
    pub timestamp: DateTime<Utc>,
    /// 关联的练习 ID
    pub context_ref: Option<String>,
}

impl Companion {
    pub fn new(
        id: impl Into<String>,
        kind: CompanionKind,
        message: impl Into<String>,
        priority: CompanionPriority,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            message: message.into(),
            action: None,
            priority,
            timestamp: Utc::now(),
            context_ref: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_context(mut self, exercise_id: impl Into<String>) -> Self {
        self.context_ref = Some(exercise_id.into());
        self
    }
}
