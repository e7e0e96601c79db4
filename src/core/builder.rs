//! 会话构建器：配置与协作者在构建时注入
//!
//! 协作者缺省为 None；编排器把缺席当作失败处理，因此任意子集都能构建出可用会话。

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::QuantumConfig;
use crate::core::Orchestrator;
use crate::modes::{Focus, LearningMode};
use crate::services::{
    Advisor, BioMetricsSource, ExerciseGenerator, GuidanceService, NarrationService,
    NotificationService, ProgressService, Services, SyncChannel,
};

pub struct SessionBuilder {
    config: QuantumConfig,
    services: Services,
}

impl SessionBuilder {
    pub fn new(config: QuantumConfig) -> Self {
        Self {
            config,
            services: Services::default(),
        }
    }

    /// 整体替换协作者集合
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.config.session.user_id = user_id.into();
        self
    }

    /// 固定随机种子，回退指标与指标快照可复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.session.seed = Some(seed);
        self
    }

    pub fn with_initial_focus(mut self, focus: Focus) -> Self {
        self.config.session.default_focus = focus;
        self
    }

    pub fn with_initial_mode(mut self, mode: LearningMode) -> Self {
        self.config.session.default_mode = mode;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn ExerciseGenerator>) -> Self {
        self.services.generator = Some(generator);
        self
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn Advisor>) -> Self {
        self.services.advisor = Some(advisor);
        self
    }

    pub fn with_biometrics(mut self, source: Arc<dyn BioMetricsSource>) -> Self {
        self.services.biometrics = Some(source);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressService>) -> Self {
        self.services.progress = Some(progress);
        self
    }

    pub fn with_notifications(mut self, notifications: Arc<dyn NotificationService>) -> Self {
        self.services.notifications = Some(notifications);
        self
    }

    pub fn with_guidance(mut self, guidance: Arc<dyn GuidanceService>) -> Self {
        self.services.guidance = Some(guidance);
        self
    }

    pub fn with_narration(mut self, narration: Arc<dyn NarrationService>) -> Self {
        self.services.narration = Some(narration);
        self
    }

    pub fn with_sync(mut self, sync: Arc<dyn SyncChannel>) -> Self {
        self.services.sync = Some(sync);
        self
    }

    pub fn config(&self) -> &QuantumConfig {
        &self.config
    }

    pub fn build(self) -> Orchestrator {
        tracing::debug!("Building session with {:?}", self.services);
        Orchestrator::new(self.config, self.services)
    }
}

/// 便捷函数：从默认路径加载配置并创建 SessionBuilder
pub fn create_session_builder(config_path: Option<PathBuf>) -> SessionBuilder {
    let config = crate::config::load_config(config_path).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        QuantumConfig::default()
    });
    SessionBuilder::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockAdvisor;

    #[test]
    fn test_builder_overrides_session() {
        let builder = SessionBuilder::new(QuantumConfig::default())
            .with_user("ana")
            .with_seed(9)
            .with_initial_focus(Focus::Visual)
            .with_initial_mode(LearningMode::Diagnostic)
            .with_advisor(Arc::new(MockAdvisor));
        assert_eq!(builder.config().session.user_id, "ana");
        assert_eq!(builder.config().session.seed, Some(9));

        let orch = builder.build();
        let state = orch.snapshot();
        assert_eq!(state.active_focus(), Focus::Visual);
        assert!(state.focus_flags.visual);
        assert_eq!(state.learning.mode(), LearningMode::Diagnostic);
    }
}
