//! 会话状态：OrchestratorState 及各摘要
//!
//! 只有模式控制器与 Exercise↔Context 桥写入；所有写入都是整字段替换，读者拿到的是一致快照。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::companion::Companion;
use crate::config::QuantumConfig;
use crate::content::{ContentRecord, StudentGoal, Subject};
use crate::core::transition::ModeMachine;
use crate::experience::LearningExperience;
use crate::modes::{Focus, FocusFlags, LearningDimension, LearningMode, ModeConfig};

/// 三个 0–100 指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VitalSigns {
    pub consciousness: f64,
    pub coherence: f64,
    pub health: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarSummary {
    pub today_events: u32,
    pub next_milestone: Option<DateTime<Utc>>,
    pub streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSummary {
    pub unread: usize,
    pub last_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceSummary {
    pub is_active: bool,
    pub completed_tours: u32,
    pub needs_help: bool,
}

/// 学习模式子状态
#[derive(Debug, Clone, Serialize)]
pub struct LearningState {
    pub machine: ModeMachine<LearningMode>,
    pub available_modes: Vec<ModeConfig>,
    pub active_dimensions: Vec<LearningDimension>,
    pub companions: Vec<Companion>,
    pub current_experience: Option<LearningExperience>,
}

impl LearningState {
    pub fn mode(&self) -> LearningMode {
        self.machine.current()
    }

    pub fn config_for(&self, mode: LearningMode) -> ModeConfig {
        self.available_modes
            .iter()
            .find(|c| c.mode == mode)
            .cloned()
            .unwrap_or_else(|| ModeConfig::for_mode(mode))
    }
}

/// 每个会话一份；由编排器持有，经 watch 通道向读者发布快照
#[derive(Debug, Clone, Serialize)]
pub struct OrchestratorState {
    pub focus: ModeMachine<Focus>,
    pub focus_flags: FocusFlags,
    pub learning: LearningState,
    pub current_subject: Subject,
    pub contextual_content: Option<ContentRecord>,
    pub student_goal: StudentGoal,
    pub vitals: VitalSigns,
    pub calendar: CalendarSummary,
    pub notifications: NotificationSummary,
    pub guidance: GuidanceSummary,
    /// 会话已拆除；此后不再接受任何写入
    pub closed: bool,
}

impl OrchestratorState {
    pub fn new(config: &QuantumConfig) -> Self {
        let session = &config.session;
        let initial = &config.vitals.initial;
        Self {
            focus: ModeMachine::new(session.default_focus),
            focus_flags: FocusFlags::only(session.default_focus),
            learning: LearningState {
                machine: ModeMachine::new(session.default_mode),
                available_modes: ModeConfig::defaults(),
                active_dimensions: session.default_mode.dimensions(),
                companions: Vec::new(),
                current_experience: None,
            },
            current_subject: session.default_subject,
            contextual_content: None,
            student_goal: config.student.clone(),
            vitals: VitalSigns {
                consciousness: initial.consciousness,
                coherence: initial.coherence,
                health: initial.health,
            },
            calendar: CalendarSummary::default(),
            notifications: NotificationSummary::default(),
            guidance: GuidanceSummary::default(),
            closed: false,
        }
    }

    pub fn active_focus(&self) -> Focus {
        self.focus.current()
    }

    /// 焦点切换是否在进行中
    pub fn is_transitioning(&self) -> bool {
        self.focus.is_transitioning()
    }
}
