//! 学习体验：一道练习在当前学习模式下的聚合视图
//!
//! 创建时整体替换上一份体验；adaptive 指标只经 MetricsDelta 加法更新并钳制到 0–100。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::companion::Companion;
use crate::content::{Exercise, ExerciseContext};
use crate::modes::{LearningDimension, LearningMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveMetrics {
    pub engagement: f64,
    pub comprehension: f64,
    pub retention: f64,
}

/// 交互事件带来的指标增量（可为负）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsDelta {
    pub engagement: f64,
    pub comprehension: f64,
    pub retention: f64,
}

impl MetricsDelta {
    pub fn engagement(value: f64) -> Self {
        Self {
            engagement: value,
            ..Self::default()
        }
    }
}

fn gauge_add(current: f64, delta: f64) -> f64 {
    if !delta.is_finite() {
        return current;
    }
    (current + delta).clamp(0.0, 100.0)
}

impl AdaptiveMetrics {
    /// 返回新值，不原地修改
    pub fn applied(&self, delta: &MetricsDelta) -> Self {
        Self {
            engagement: gauge_add(self.engagement, delta.engagement),
            comprehension: gauge_add(self.comprehension, delta.comprehension),
            retention: gauge_add(self.retention, delta.retention),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningExperience {
    pub exercise: Exercise,
    pub mode: LearningMode,
    pub context: ExerciseContext,
    pub companions: Vec<Companion>,
    pub dimensions: Vec<LearningDimension>,
    pub narration_enabled: bool,
    pub visuals_enhanced: bool,
    pub metrics: AdaptiveMetrics,
    pub created_at: DateTime<Utc>,
}

impl LearningExperience {
    pub fn with_metrics(&self, delta: &MetricsDelta) -> Self {
        Self {
            metrics: self.metrics.applied(delta),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_additive_and_clamped() {
        let m = AdaptiveMetrics::default();
        let m = m.applied(&MetricsDelta {
            engagement: 30.0,
            comprehension: 120.0,
            retention: -5.0,
        });
        assert_eq!(m.engagement, 30.0);
        assert_eq!(m.comprehension, 100.0);
        assert_eq!(m.retention, 0.0);

        let m = m.applied(&MetricsDelta::engagement(25.5));
        assert_eq!(m.engagement, 55.5);
        assert_eq!(m.comprehension, 100.0);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let m = AdaptiveMetrics {
            engagement: 40.0,
            ..AdaptiveMetrics::default()
        };
        let m = m.applied(&MetricsDelta::engagement(f64::NAN));
        assert_eq!(m.engagement, 40.0);
    }
}
