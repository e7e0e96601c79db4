//! 模式切换状态机：idle → exiting → entering → idle
//!
//! 纯状态转换，不含计时；计时由编排器在 SessionSupervisor 下驱动，测试可用虚拟时钟推进。
//! 切换进行中收到的新请求直接拒绝，不排队。

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    Idle,
    Exiting,
    Entering,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeMachine<M> {
    current: M,
    phase: TransitionPhase,
    target: Option<M>,
}

impl<M: Copy + PartialEq> ModeMachine<M> {
    pub fn new(initial: M) -> Self {
        Self {
            current: initial,
            phase: TransitionPhase::Idle,
            target: None,
        }
    }

    pub fn current(&self) -> M {
        self.current
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn target(&self) -> Option<M> {
        self.target
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// idle → exiting；目标与当前相同或已有切换在进行时返回 false
    pub fn begin(&mut self, target: M) -> bool {
        if self.is_transitioning() || self.current == target {
            return false;
        }
        self.phase = TransitionPhase::Exiting;
        self.target = Some(target);
        true
    }

    /// exiting → entering
    pub fn enter(&mut self) -> Option<M> {
        if self.phase != TransitionPhase::Exiting {
            return None;
        }
        self.phase = TransitionPhase::Entering;
        self.target
    }

    /// entering → idle，返回新的当前模式
    pub fn settle(&mut self) -> Option<M> {
        if self.phase != TransitionPhase::Entering {
            return None;
        }
        let target = self.target.take()?;
        self.current = target;
        self.phase = TransitionPhase::Idle;
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Light {
        Red,
        Green,
        Blue,
    }

    #[test]
    fn test_full_cycle() {
        let mut m = ModeMachine::new(Light::Red);
        assert!(m.begin(Light::Green));
        assert_eq!(m.phase(), TransitionPhase::Exiting);
        assert_eq!(m.current(), Light::Red);
        assert_eq!(m.enter(), Some(Light::Green));
        assert_eq!(m.phase(), TransitionPhase::Entering);
        assert_eq!(m.settle(), Some(Light::Green));
        assert_eq!(m.current(), Light::Green);
        assert!(!m.is_transitioning());
        assert_eq!(m.target(), None);
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut m = ModeMachine::new(Light::Red);
        assert!(!m.begin(Light::Red));
        assert_eq!(m.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn test_in_flight_request_rejected() {
        let mut m = ModeMachine::new(Light::Red);
        assert!(m.begin(Light::Green));
        assert!(!m.begin(Light::Blue));
        m.enter();
        assert!(!m.begin(Light::Blue));
        m.settle();
        assert_eq!(m.current(), Light::Green);
    }

    #[test]
    fn test_out_of_order_steps_ignored() {
        let mut m = ModeMachine::new(Light::Red);
        assert_eq!(m.enter(), None);
        assert_eq!(m.settle(), None);
        m.begin(Light::Blue);
        assert_eq!(m.settle(), None);
        assert_eq!(m.phase(), TransitionPhase::Exiting);
    }
}
