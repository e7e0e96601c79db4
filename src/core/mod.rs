//! 核心编排层：错误、会话状态、模式状态机、会话监管、编排器与构建器

pub mod builder;
pub mod command;
pub mod error;
pub mod orchestrator;
pub mod state;
pub mod supervisor;
pub mod transition;

pub use builder::{create_session_builder, SessionBuilder};
pub use command::Command;
pub use error::QuantumError;
pub use orchestrator::Orchestrator;
pub use state::{
    CalendarSummary, GuidanceSummary, LearningState, NotificationSummary, OrchestratorState,
    VitalSigns,
};
pub use supervisor::SessionSupervisor;
pub use transition::{ModeMachine, TransitionPhase};
