//! 协作者 trait
//!
//! 异步协作者用 async_trait；SyncChannel 是同步的「最多一次、非阻塞」通知，调用方不等待确认。

use async_trait::async_trait;

use super::types::{
    HelpSignal, Notification, OutgoingNotification, ProgressRecord, SyncOperation, VitalReading,
};
use crate::content::{Exercise, GenerationRequest};
use crate::core::state::{CalendarSummary, GuidanceSummary};
use crate::core::QuantumError;
use crate::modes::LearningMode;

/// 练习生成服务；Ok(None) 表示服务没有产出
#[async_trait]
pub trait ExerciseGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<Exercise>, QuantumError>;
}

/// 教学建议服务
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn recommend(&self, exercise: &Exercise) -> Result<String, QuantumError>;
}

/// 生理 / 系统指标源，读数为 0–100 的百分比
#[async_trait]
pub trait BioMetricsSource: Send + Sync {
    async fn sample(&self) -> Result<VitalReading, QuantumError>;
}

/// 进度 / 日历服务
#[async_trait]
pub trait ProgressService: Send + Sync {
    async fn summary(&self, user_id: &str) -> Result<CalendarSummary, QuantumError>;

    async fn track_progress(&self, user_id: &str, record: &ProgressRecord) -> Result<(), QuantumError>;
}

/// 通知服务
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 最近的 limit 条通知，新的在前
    async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<Notification>, QuantumError>;

    async fn notify(&self, user_id: &str, notification: &OutgoingNotification) -> Result<(), QuantumError>;
}

/// 引导服务
#[async_trait]
pub trait GuidanceService: Send + Sync {
    async fn summary(&self, user_id: &str) -> Result<GuidanceSummary, QuantumError>;

    /// 返回是否需要主动帮助
    async fn detect_help_needed(&self, user_id: &str, signal: &HelpSignal) -> Result<bool, QuantumError>;
}

/// 旁白 / 音频合成；返回是否成功生成了可播放的音频
#[async_trait]
pub trait NarrationService: Send + Sync {
    async fn narrate(&self, exercise: &Exercise, mode: LearningMode) -> Result<bool, QuantumError>;
}

/// 跨组件同步通道（也承载低优先级遥测）
pub trait SyncChannel: Send + Sync {
    fn queue(&self, operation: SyncOperation) -> Result<(), QuantumError>;
}
