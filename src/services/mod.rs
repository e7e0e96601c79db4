//! 外部协作者：编排器只通过这些注入的能力访问外部系统
//!
//! 每个协作者都可能缺席（Services 中为 None）或失败；调用方统一经 guarded 包装，
//! 失败转为 None 并记 warn，不会越过编排器边界。

pub mod mock;
pub mod traits;
pub mod types;

pub use mock::{
    LoggingSyncChannel, MockAdvisor, MockBioMetrics, MockExerciseGenerator, MockGuidance,
    MockNarration, MockNotifications, MockProgress,
};
pub use traits::{
    Advisor, BioMetricsSource, ExerciseGenerator, GuidanceService, NarrationService,
    NotificationService, ProgressService, SyncChannel,
};
pub use types::{
    HelpSignal, Notification, OutgoingNotification, ProgressRecord, SyncKind, SyncOperation,
    SyncPriority, UserInteraction, VitalReading,
};

use std::sync::Arc;

/// 会话开始时注入的协作者集合
#[derive(Clone, Default)]
pub struct Services {
    pub generator: Option<Arc<dyn ExerciseGenerator>>,
    pub advisor: Option<Arc<dyn Advisor>>,
    pub biometrics: Option<Arc<dyn BioMetricsSource>>,
    pub progress: Option<Arc<dyn ProgressService>>,
    pub notifications: Option<Arc<dyn NotificationService>>,
    pub guidance: Option<Arc<dyn GuidanceService>>,
    pub narration: Option<Arc<dyn NarrationService>>,
    pub sync: Option<Arc<dyn SyncChannel>>,
}

impl Services {
    /// 全部使用本地 Mock（演示 / 离线运行）
    pub fn mock() -> Self {
        Self {
            generator: Some(Arc::new(MockExerciseGenerator::default())),
            advisor: Some(Arc::new(MockAdvisor)),
            biometrics: Some(Arc::new(MockBioMetrics::default())),
            progress: Some(Arc::new(MockProgress::default())),
            notifications: Some(Arc::new(MockNotifications::default())),
            guidance: Some(Arc::new(MockGuidance)),
            narration: Some(Arc::new(MockNarration)),
            sync: Some(Arc::new(LoggingSyncChannel)),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("generator", &self.generator.is_some())
            .field("advisor", &self.advisor.is_some())
            .field("biometrics", &self.biometrics.is_some())
            .field("progress", &self.progress.is_some())
            .field("notifications", &self.notifications.is_some())
            .field("guidance", &self.guidance.is_some())
            .field("narration", &self.narration.is_some())
            .field("sync", &self.sync.is_some())
            .finish()
    }
}
