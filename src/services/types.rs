//! 协作者契约中的数据类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 指标源的一次读数（百分比）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    pub consciousness: f64,
    pub coherence: f64,
    pub health: f64,
}

/// 一次练习作答的进度记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub exercise_id: String,
    pub subject: String,
    pub time_spent_secs: u64,
    /// 0–100
    pub score: f64,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// 发往通知服务的消息
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingNotification {
    Progress {
        exercises_completed: u32,
        streak: u32,
        average_score: f64,
        subject: String,
        improvement: f64,
    },
    Guidance {
        user_action: String,
        current_page: String,
        time_spent_secs: u64,
    },
}

/// 宿主上报的一次用户交互
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInteraction {
    pub action: String,
    pub page: String,
    pub time_spent_secs: u64,
    pub success: bool,
}

/// 引导服务判断是否需要帮助的信号
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpSignal {
    pub current_page: String,
    pub time_spent_secs: u64,
    pub clicks_without_progress: u32,
    pub error_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncKind {
    FocusSync,
    ModeSync,
    ExerciseEnriched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPriority {
    Low,
    Medium,
    High,
}

/// 同步通道上的一次操作
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncOperation {
    pub kind: SyncKind,
    pub user_id: String,
    pub priority: SyncPriority,
    pub data: serde_json::Value,
    pub at: DateTime<Utc>,
}
