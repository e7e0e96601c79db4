//! 会话编排器
//!
//! 持有 OrchestratorState（watch 通道发布快照）、注入的协作者、SessionSupervisor 与可播种随机源。
//! 负责两台模式状态机（焦点 / 学习模式）、练习↔上下文双向桥、学习体验、进度追踪与指标采样。
//! 所有协作者调用都经 guarded：错误或 panic 记 warn 后降级为 None，公开操作从不返回协作者错误。

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use futures_util::FutureExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use tokio::sync::watch;

use crate::arsenal::Arsenal;
use crate::companion;
use crate::config::QuantumConfig;
use crate::content::{
    enrich, ContentRecord, ContentType, Exercise, ExerciseContext, GenerationRequest, Subject,
    SynergyOptions,
};
use crate::core::state::{
    CalendarSummary, GuidanceSummary, NotificationSummary, OrchestratorState, VitalSigns,
};
use crate::core::transition::ModeMachine;
use crate::core::{QuantumError, SessionSupervisor};
use crate::experience::{AdaptiveMetrics, LearningExperience, MetricsDelta};
use crate::modes::{Focus, FocusFlags, LearningMode};
use crate::services::{
    HelpSignal, OutgoingNotification, ProgressRecord, Services, SyncKind, SyncOperation,
    SyncPriority, UserInteraction,
};
use crate::vitals::VitalsSampler;

/// 启动时读取的最近通知条数
const RECENT_NOTIFICATIONS: usize = 5;
/// 进度通知中的基准分
const IMPROVEMENT_BASELINE: f64 = 70.0;

/// 执行协作者调用：错误与 panic 都记 warn 并转为 None
pub(crate) async fn guarded<T, F>(service: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, QuantumError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            tracing::warn!("{} call failed ({}), continuing without it", service, e);
            None
        }
        Err(_) => {
            tracing::warn!(
                "{}, continuing without it",
                QuantumError::CollaboratorPanicked(service.to_string())
            );
            None
        }
    }
}

fn unavailable<T>(service: &str) -> Option<T> {
    tracing::warn!(
        "{}, continuing without it",
        QuantumError::CollaboratorUnavailable(service.to_string())
    );
    None
}

/// 由同一个状态机驱动的模式（焦点 / 学习模式）
trait Switchable: Copy + PartialEq + std::fmt::Display + Send + Sync + 'static {
    const SYNC: SyncKind;

    fn machine(state: &mut OrchestratorState) -> &mut ModeMachine<Self>;

    /// exiting 阶段的清理
    fn on_exit(_state: &mut OrchestratorState) {}

    /// settle 时写入新模式的派生字段
    fn on_enter(state: &mut OrchestratorState, target: Self);

    fn sync_payload(self) -> serde_json::Value;
}

impl Switchable for Focus {
    const SYNC: SyncKind = SyncKind::FocusSync;

    fn machine(state: &mut OrchestratorState) -> &mut ModeMachine<Self> {
        &mut state.focus
    }

    fn on_exit(state: &mut OrchestratorState) {
        state.focus_flags = FocusFlags::default();
    }

    fn on_enter(state: &mut OrchestratorState, target: Self) {
        state.focus_flags = FocusFlags::only(target);
    }

    fn sync_payload(self) -> serde_json::Value {
        json!({ "focus": self.as_str() })
    }
}

impl Switchable for LearningMode {
    const SYNC: SyncKind = SyncKind::ModeSync;

    fn machine(state: &mut OrchestratorState) -> &mut ModeMachine<Self> {
        &mut state.learning.machine
    }

    fn on_enter(state: &mut OrchestratorState, target: Self) {
        state.learning.companions = companion::generate(target, None);
        state.learning.active_dimensions = target.dimensions();
    }

    fn sync_payload(self) -> serde_json::Value {
        json!({ "new_mode": self.as_str() })
    }
}

struct Inner {
    config: QuantumConfig,
    services: Services,
    state_tx: watch::Sender<OrchestratorState>,
    supervisor: SessionSupervisor,
    sampler: VitalsSampler,
    rng: Mutex<ChaCha8Rng>,
    started: AtomicBool,
}

/// 会话句柄；克隆共享同一会话。计时任务持有句柄，必须调用 shutdown 才会停止。
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("user_id", &self.inner.config.session.user_id)
            .field("services", &self.inner.services)
            .finish()
    }
}

impl Orchestrator {
    pub fn new(config: QuantumConfig, services: Services) -> Self {
        let rng = match config.session.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (state_tx, _) = watch::channel(OrchestratorState::new(&config));
        Self {
            inner: Arc::new(Inner {
                sampler: VitalsSampler::new(&config.vitals),
                config,
                services,
                state_tx,
                supervisor: SessionSupervisor::new(),
                rng: Mutex::new(rng),
                started: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &QuantumConfig {
        &self.inner.config
    }

    fn user_id(&self) -> &str {
        &self.inner.config.session.user_id
    }

    /// 当前状态的一致快照
    pub fn snapshot(&self) -> OrchestratorState {
        self.inner.state_tx.borrow().clone()
    }

    /// 按当前学生目标派生的武器库视图；只读，不写状态
    pub fn arsenal(&self) -> Arsenal {
        let goal = self.inner.state_tx.borrow().student_goal.clone();
        Arsenal::from_goal(&goal, Utc::now())
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.inner.state_tx.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state_tx.borrow().closed
    }

    /// 整字段写入；会话关闭后一律拒绝。返回是否发生修改。
    fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut OrchestratorState) -> bool,
    {
        self.inner
            .state_tx
            .send_if_modified(|state| if state.closed { false } else { f(state) })
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.inner.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    /// 至多一次、不等待确认的同步通知
    fn queue_sync(&self, kind: SyncKind, priority: SyncPriority, data: serde_json::Value) {
        let Some(sync) = self.inner.services.sync.as_ref() else {
            tracing::debug!("No sync channel, dropping {:?}", kind);
            return;
        };
        let operation = SyncOperation {
            kind,
            user_id: self.user_id().to_string(),
            priority,
            data,
            at: Utc::now(),
        };
        match std::panic::catch_unwind(AssertUnwindSafe(|| sync.queue(operation))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Sync {:?} dropped ({})", kind, e),
            Err(_) => tracing::warn!(
                "Sync {:?} dropped ({})",
                kind,
                QuantumError::CollaboratorPanicked("sync channel".to_string())
            ),
        }
    }

    // ---- 会话生命周期 ----

    /// 并发加载日历 / 通知 / 引导摘要并启动指标采样；重复调用无效果
    pub async fn start(&self) {
        if self.is_closed() || self.inner.started.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!("Starting learning session for {}", self.user_id());

        let user = self.user_id().to_string();
        let services = &self.inner.services;
        let calendar = async {
            match services.progress.as_ref() {
                Some(p) => guarded("progress service", p.summary(&user)).await,
                None => unavailable("progress service"),
            }
        };
        let notifications = async {
            match services.notifications.as_ref() {
                Some(n) => {
                    guarded("notification service", n.recent(&user, RECENT_NOTIFICATIONS)).await
                }
                None => unavailable("notification service"),
            }
        };
        let guidance = async {
            match services.guidance.as_ref() {
                Some(g) => guarded("guidance service", g.summary(&user)).await,
                None => unavailable("guidance service"),
            }
        };
        let (calendar, notifications, guidance) = tokio::join!(calendar, notifications, guidance);

        self.update(|state| {
            if let Some(calendar) = calendar {
                state.calendar = calendar;
            }
            if let Some(list) = notifications {
                state.notifications = NotificationSummary {
                    unread: list.iter().filter(|n| !n.read).count(),
                    last_title: list.first().map(|n| n.title.clone()),
                };
            }
            if let Some(guidance) = guidance {
                state.guidance = guidance;
            }
            true
        });

        self.spawn_vitals_loop();
    }

    fn spawn_vitals_loop(&self) {
        let this = self.clone();
        let period = self.inner.config.timing.vitals_interval();
        let spawned = self.inner.supervisor.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // 首个 tick 立即返回，跳过
            interval.tick().await;
            loop {
                interval.tick().await;
                this.sample_vitals().await;
            }
        });
        if let Err(e) = spawned {
            tracing::debug!("Vitals loop not started: {}", e);
        }
    }

    /// 采样一次指标并写入状态
    pub async fn sample_vitals(&self) -> Option<VitalSigns> {
        if self.is_closed() {
            return None;
        }
        let reading = match self.inner.services.biometrics.as_ref() {
            Some(source) => guarded("bio-metrics source", source.sample()).await,
            None => unavailable("bio-metrics source"),
        };
        let prev = self.snapshot().vitals;
        let next = self.with_rng(|rng| self.inner.sampler.tick(&prev, reading, rng));
        self.update(|state| {
            state.vitals = next;
            true
        })
        .then_some(next)
    }

    /// 取消采样与所有挂起的计时任务；之后的写入全部被拒绝
    pub async fn shutdown(&self) {
        self.inner.state_tx.send_modify(|state| state.closed = true);
        self.inner.supervisor.shutdown().await;
        tracing::info!("Learning session for {} closed", self.user_id());
    }

    // ---- 模式控制 ----

    /// 切换焦点；目标相同或已有切换在进行时返回 false（不排队）
    pub fn activate_focus(&self, focus: Focus) -> bool {
        self.switch(focus)
    }

    /// 切换学习模式；语义同 activate_focus
    pub fn switch_mode(&self, mode: LearningMode) -> bool {
        self.switch(mode)
    }

    fn switch<M: Switchable>(&self, target: M) -> bool {
        let began = self.update(|state| {
            if !M::machine(state).begin(target) {
                return false;
            }
            M::on_exit(state);
            true
        });
        if !began {
            tracing::debug!("Switch to {} ignored", target);
            return false;
        }
        tracing::info!("Switching to {}", target);

        let this = self.clone();
        let timing = &self.inner.config.timing;
        let (exit, enter) = (timing.exit(), timing.enter());
        let spawned = self.inner.supervisor.spawn(async move {
            tokio::time::sleep(exit).await;
            this.update(|state| M::machine(state).enter().is_some());
            tokio::time::sleep(enter).await;
            let settled = this.update(|state| match M::machine(state).settle() {
                Some(mode) => {
                    M::on_enter(state, mode);
                    true
                }
                None => false,
            });
            if settled {
                this.queue_sync(M::SYNC, SyncPriority::High, target.sync_payload());
                tracing::info!("{} active", target);
            }
        });
        match spawned {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Switch to {} abandoned: {}", target, e);
                false
            }
        }
    }

    // ---- 练习 ↔ 上下文 ----

    async fn recommendation(&self, exercise: &Exercise) -> Option<String> {
        match self.inner.services.advisor.as_ref() {
            Some(advisor) => guarded("advisor", advisor.recommend(exercise)).await,
            None => unavailable("advisor"),
        }
    }

    /// 由练习派生上下文并刷新上下文内容；科目仅在练习声明时更新
    pub async fn enrich_from_exercise(&self, exercise: &Exercise) -> Option<ExerciseContext> {
        if self.is_closed() {
            return None;
        }
        let recommendation = self.recommendation(exercise).await;

        let state = self.snapshot();
        let focus = state.active_focus();
        let context = ExerciseContext::derive(exercise, state.current_subject, recommendation);
        tracing::debug!(
            "Enriching context from exercise {} ({}, {})",
            context.exercise_id,
            context.content_type,
            context.cognitive_level
        );

        let options = SynergyOptions {
            cognitive_level: Some(context.cognitive_level),
            agent_insight: context.agent_recommendation.clone(),
            ocr_ready: exercise.has_visual_content,
            auto_generate_exercise: false,
            visual_enhancement: focus == Focus::Visual,
        };
        let record = self.with_rng(|rng| {
            enrich(
                context.content_type,
                context.subject,
                focus,
                &state.student_goal,
                &options,
                rng,
            )
        });
        let declared = exercise.declared_subject();

        let stored = self.update(|state| {
            state.contextual_content = Some(record);
            if let Some(subject) = declared {
                state.current_subject = subject;
            }
            true
        });
        if !stored {
            return None;
        }

        self.queue_sync(
            SyncKind::ExerciseEnriched,
            SyncPriority::Low,
            json!({
                "exercise_id": context.exercise_id,
                "content_type": context.content_type.label(),
                "cognitive_level": context.cognitive_level.to_string(),
            }),
        );
        Some(context)
    }

    /// 请求生成服务出题；成功后延迟回灌 enrich_from_exercise。失败返回 None，不重试。
    pub async fn generate_from_context(
        &self,
        content_type: ContentType,
        subject: Subject,
        options: SynergyOptions,
    ) -> Option<Exercise> {
        if self.is_closed() {
            return None;
        }
        let request = GenerationRequest::build(content_type, subject, &options);
        tracing::debug!("Generation request: {}", request.prompt);

        let generated = match self.inner.services.generator.as_ref() {
            Some(generator) => guarded("exercise generator", generator.generate(&request)).await,
            None => unavailable("exercise generator"),
        }?;
        let Some(exercise) = generated else {
            tracing::warn!(
                "Exercise generator returned no exercise for {} / {}",
                subject.key(),
                content_type
            );
            return None;
        };
        tracing::info!(
            "Exercise {} generated from {} context",
            exercise.id.as_deref().unwrap_or("<unnamed>"),
            content_type
        );

        let this = self.clone();
        let generated = exercise.clone();
        let scheduled = self
            .inner
            .supervisor
            .spawn_after(self.inner.config.timing.regenerate_delay(), async move {
                this.enrich_from_exercise(&generated).await;
            });
        if let Err(e) = scheduled {
            tracing::debug!("Follow-up enrichment skipped: {}", e);
        }
        Some(exercise)
    }

    /// 直接合成上下文内容（不经练习往返）；可选延迟自动出题
    pub fn load_contextual_content(
        &self,
        content_type: ContentType,
        subject: Subject,
        options: SynergyOptions,
    ) -> Option<ContentRecord> {
        let state = self.snapshot();
        let record = self.with_rng(|rng| {
            enrich(
                content_type,
                subject,
                state.active_focus(),
                &state.student_goal,
                &options,
                rng,
            )
        });
        let stored = self.update(|state| {
            state.contextual_content = Some(record.clone());
            state.current_subject = subject;
            true
        });
        if !stored {
            return None;
        }

        if options.auto_generate_exercise {
            let this = self.clone();
            let scheduled = self
                .inner
                .supervisor
                .spawn_after(self.inner.config.timing.auto_generate_delay(), async move {
                    this.generate_from_context(content_type, subject, options)
                        .await;
                });
            if let Err(e) = scheduled {
                tracing::debug!("Auto generation skipped: {}", e);
            }
        }
        Some(record)
    }

    // ---- 学习体验 ----

    async fn narrate(&self, exercise: &Exercise, mode: LearningMode) -> bool {
        match self.inner.services.narration.as_ref() {
            Some(narration) => guarded("narration service", narration.narrate(exercise, mode))
                .await
                .unwrap_or(false),
            None => unavailable::<bool>("narration service").unwrap_or(false),
        }
    }

    /// 在指定（缺省为当前）学习模式下为练习创建体验，整体替换上一份
    pub async fn create_experience(
        &self,
        exercise: &Exercise,
        mode: Option<LearningMode>,
    ) -> Option<LearningExperience> {
        if self.is_closed() {
            return None;
        }
        let state = self.snapshot();
        let mode = mode.unwrap_or_else(|| state.learning.mode());
        let mode_config = state.learning.config_for(mode);

        let recommendation = self.recommendation(exercise).await;
        let context = ExerciseContext::derive(exercise, state.current_subject, recommendation);
        let companions = companion::generate(mode, Some(&context));

        let narration_enabled = if mode_config.narration {
            self.narrate(exercise, mode).await
        } else {
            mode_config.sound_effects
        };
        let visuals_enhanced = mode_config.enhanced_visuals
            || (mode_config.visuals_follow_content && exercise.has_visual_content);

        let experience = LearningExperience {
            exercise: exercise.clone(),
            mode,
            context,
            companions,
            dimensions: mode.dimensions(),
            narration_enabled,
            visuals_enhanced,
            metrics: AdaptiveMetrics::default(),
            created_at: Utc::now(),
        };

        let stored = self.update(|state| {
            state.learning.companions = experience.companions.clone();
            state.learning.current_experience = Some(experience.clone());
            true
        });
        if !stored {
            return None;
        }
        tracing::info!(
            "Learning experience for {} created in {} mode",
            experience.context.exercise_id,
            mode
        );
        Some(experience)
    }

    /// 累加交互指标；没有当前体验时不做任何事
    pub fn record_interaction(&self, delta: MetricsDelta) -> Option<AdaptiveMetrics> {
        let mut updated = None;
        self.update(|state| {
            let Some(current) = state.learning.current_experience.as_ref() else {
                return false;
            };
            let next = current.with_metrics(&delta);
            updated = Some(next.metrics);
            state.learning.current_experience = Some(next);
            true
        });
        updated
    }

    // ---- 进度与引导 ----

    /// 记录一次作答：进度写入与通知均为尽力而为，今日计数无论结果如何都加一
    pub async fn track_exercise_progress(&self, record: ProgressRecord) {
        if self.is_closed() {
            return;
        }
        let user = self.user_id().to_string();
        let services = &self.inner.services;

        match services.progress.as_ref() {
            Some(progress) => {
                guarded("progress service", progress.track_progress(&user, &record)).await;
            }
            None => {
                unavailable::<()>("progress service");
            }
        }

        if record.is_correct && record.score > 80.0 {
            let calendar = self.snapshot().calendar;
            let notification = OutgoingNotification::Progress {
                exercises_completed: calendar.today_events + 1,
                streak: calendar.streak,
                average_score: record.score,
                subject: record.subject.clone(),
                improvement: record.score - IMPROVEMENT_BASELINE,
            };
            match services.notifications.as_ref() {
                Some(n) => {
                    guarded("notification service", n.notify(&user, &notification)).await;
                }
                None => {
                    unavailable::<()>("notification service");
                }
            }
        }

        self.update(|state| {
            state.calendar = CalendarSummary {
                today_events: state.calendar.today_events + 1,
                ..state.calendar.clone()
            };
            true
        });
    }

    /// 请求帮助检测；首次访问时额外发送引导通知
    pub async fn handle_user_interaction(&self, interaction: UserInteraction) {
        if self.is_closed() {
            return;
        }
        let user = self.user_id().to_string();
        let services = &self.inner.services;
        let misses = u32::from(!interaction.success);
        let signal = HelpSignal {
            current_page: interaction.page.clone(),
            time_spent_secs: interaction.time_spent_secs,
            clicks_without_progress: misses,
            error_count: misses,
        };

        let needs_help = match services.guidance.as_ref() {
            Some(g) => guarded("guidance service", g.detect_help_needed(&user, &signal)).await,
            None => unavailable("guidance service"),
        };
        if let Some(needs_help) = needs_help {
            self.update(|state| {
                if state.guidance.needs_help == needs_help {
                    return false;
                }
                state.guidance = GuidanceSummary {
                    needs_help,
                    ..state.guidance.clone()
                };
                true
            });
        }

        if interaction.action == "first_visit" {
            let notification = OutgoingNotification::Guidance {
                user_action: interaction.action.clone(),
                current_page: interaction.page.clone(),
                time_spent_secs: 0,
            };
            match services.notifications.as_ref() {
                Some(n) => {
                    guarded("notification service", n.notify(&user, &notification)).await;
                }
                None => {
                    unavailable::<()>("notification service");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EnhancementKind;
    use std::time::Duration;

    fn seeded() -> QuantumConfig {
        let mut config = QuantumConfig::default();
        config.session.seed = Some(42);
        config
    }

    #[tokio::test]
    async fn test_guarded_converts_failure_and_panic() {
        let ok = guarded("svc", async { Ok::<_, QuantumError>(3) }).await;
        assert_eq!(ok, Some(3));
        let failed = guarded("svc", async { Err::<u8, _>(QuantumError::failed("svc", "boom")) }).await;
        assert_eq!(failed, None);
        let panicked: Option<u8> = guarded("svc", async {
            if true {
                panic!("collaborator exploded");
            }
            Ok::<u8, QuantumError>(1)
        })
        .await;
        assert_eq!(panicked, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_switch_phases() {
        let orch = Orchestrator::new(seeded(), Services::default());
        assert!(orch.activate_focus(Focus::Metrics));

        let s = orch.snapshot();
        assert!(s.is_transitioning());
        assert!(!s.focus_flags.any());
        assert_eq!(s.active_focus(), Focus::Neural);

        tokio::time::sleep(Duration::from_millis(350)).await;
        let s = orch.snapshot();
        assert!(!s.is_transitioning());
        assert_eq!(s.active_focus(), Focus::Metrics);
        assert_eq!(s.focus_flags, FocusFlags::only(Focus::Metrics));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_switch_regenerates_companions() {
        let orch = Orchestrator::new(seeded(), Services::default());
        assert!(orch.switch_mode(LearningMode::Gamified));
        tokio::time::sleep(Duration::from_millis(350)).await;
        let s = orch.snapshot();
        assert_eq!(s.learning.mode(), LearningMode::Gamified);
        let ids: Vec<_> = s.learning.companions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["gamified-motivation", "gamified-visual"]);
        assert_eq!(s.learning.active_dimensions, LearningMode::Gamified.dimensions());
    }

    #[tokio::test]
    async fn test_load_contextual_content_follows_focus() {
        let orch = Orchestrator::new(seeded(), Services::default());
        let record = orch
            .load_contextual_content(ContentType::Table, Subject::MathM2, SynergyOptions::default())
            .expect("record stored");
        assert_eq!(record.enhancement_kind(), EnhancementKind::AiInsight);
        let s = orch.snapshot();
        assert_eq!(s.current_subject, Subject::MathM2);
        assert_eq!(s.contextual_content, Some(record));
    }

    #[tokio::test]
    async fn test_record_interaction_without_experience_is_noop() {
        let orch = Orchestrator::new(seeded(), Services::default());
        assert_eq!(orch.record_interaction(MetricsDelta::engagement(10.0)), None);
    }

    #[tokio::test]
    async fn test_experience_without_collaborators() {
        let orch = Orchestrator::new(seeded(), Services::default());
        let exercise = Exercise::new("Evalúa la validez del argumento").with_id("ex-1");
        let exp = orch
            .create_experience(&exercise, Some(LearningMode::AudioPaced))
            .await
            .expect("experience");
        assert!(!exp.narration_enabled);
        assert!(!exp.visuals_enhanced);
        assert_eq!(exp.context.agent_recommendation, None);
        let ids: Vec<_> = exp.companions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["audio-paced-narration", "audio-paced-rhythm", "advanced-bloom"]);

        let metrics = orch
            .record_interaction(MetricsDelta {
                engagement: 15.0,
                comprehension: 5.0,
                retention: 0.0,
            })
            .expect("metrics");
        assert_eq!(metrics.engagement, 15.0);
        assert_eq!(metrics.comprehension, 5.0);
    }

    #[tokio::test]
    async fn test_closed_session_rejects_writes() {
        let orch = Orchestrator::new(seeded(), Services::default());
        orch.shutdown().await;
        assert!(!orch.activate_focus(Focus::Visual));
        assert!(orch
            .load_contextual_content(ContentType::Chart, Subject::MathM1, SynergyOptions::default())
            .is_none());
        assert!(orch.enrich_from_exercise(&Exercise::new("Explica")).await.is_none());
        assert!(orch.snapshot().contextual_content.is_none());
    }

    #[tokio::test]
    async fn test_arsenal_follows_student_goal() {
        let mut config = seeded();
        config.student.strengths = vec!["Física".to_string()];
        config.student.target_score = 820;
        config.student.weekly_hours = 10;
        let orch = Orchestrator::new(config, Services::default());
        let before = orch.snapshot();

        let arsenal = orch.arsenal();
        assert_eq!(arsenal.scores.target, 820);
        assert_eq!(arsenal.scores.estimated_weeks, 12);
        assert_eq!(arsenal.progress.percent_for(Subject::MathM1), Some(60));
        assert_eq!(arsenal.progress.percent_for(Subject::History), Some(40));
        assert_eq!(orch.snapshot().student_goal, before.student_goal);
    }
}
