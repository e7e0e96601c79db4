//! 呈现模式：焦点（visual / metrics / neural / benchmark）与学习模式（五种）
//!
//! 两者都由 core::transition 的同一个状态机驱动；ModeConfig 是只读的每模式默认值。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::CognitiveLevel;
use crate::core::QuantumError;

/// 焦点：决定 ContentRecord 接受哪一种增强
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Focus {
    Visual,
    Metrics,
    Neural,
    Benchmark,
}

impl Focus {
    pub const ALL: [Focus; 4] = [Focus::Visual, Focus::Metrics, Focus::Neural, Focus::Benchmark];

    pub fn as_str(self) -> &'static str {
        match self {
            Focus::Visual => "visual",
            Focus::Metrics => "metrics",
            Focus::Neural => "neural",
            Focus::Benchmark => "benchmark",
        }
    }
}

/// 学习模式：决定生成哪些学习伙伴、启用哪些维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LearningMode {
    Classic,
    AudioPaced,
    Immersive,
    Diagnostic,
    Gamified,
}

impl LearningMode {
    pub const ALL: [LearningMode; 5] = [
        LearningMode::Classic,
        LearningMode::AudioPaced,
        LearningMode::Immersive,
        LearningMode::Diagnostic,
        LearningMode::Gamified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LearningMode::Classic => "classic",
            LearningMode::AudioPaced => "audio-paced",
            LearningMode::Immersive => "immersive",
            LearningMode::Diagnostic => "diagnostic",
            LearningMode::Gamified => "gamified",
        }
    }

    /// 进入该模式后启用的学习维度
    pub fn dimensions(self) -> Vec<LearningDimension> {
        use LearningDimension::*;
        match self {
            LearningMode::Classic => vec![Temporal],
            LearningMode::AudioPaced | LearningMode::Diagnostic => vec![Temporal, Analytics],
            LearningMode::Immersive | LearningMode::Gamified => vec![Temporal, Analytics, Social],
        }
    }
}

macro_rules! impl_mode_text {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = QuantumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                <$ty>::ALL
                    .into_iter()
                    .find(|m| m.as_str() == wanted)
                    .ok_or_else(|| QuantumError::InvalidShape(format!("unknown {} '{}'", $label, s)))
            }
        }
    };
}

impl_mode_text!(Focus, "focus");
impl_mode_text!(LearningMode, "learning mode");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningDimension {
    Temporal,
    Analytics,
    Social,
}

/// 每个焦点一个「激活」标记；切换的 exiting 阶段全部清零
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FocusFlags {
    pub visual: bool,
    pub metrics: bool,
    pub neural: bool,
    pub benchmark: bool,
}

impl FocusFlags {
    pub fn only(focus: Focus) -> Self {
        let mut flags = Self::default();
        match focus {
            Focus::Visual => flags.visual = true,
            Focus::Metrics => flags.metrics = true,
            Focus::Neural => flags.neural = true,
            Focus::Benchmark => flags.benchmark = true,
        }
        flags
    }

    pub fn any(&self) -> bool {
        self.visual || self.metrics || self.neural || self.benchmark
    }
}

/// 学习模式的静态默认值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeConfig {
    pub mode: LearningMode,
    pub enabled: bool,
    /// 需要旁白服务成功才算开启音频
    pub narration: bool,
    /// 无需外部服务的音效
    pub sound_effects: bool,
    pub enhanced_visuals: bool,
    /// 练习自带视觉内容时才增强视觉
    pub visuals_follow_content: bool,
    pub adaptive_speed: bool,
    pub preferred_level: Option<CognitiveLevel>,
}

impl ModeConfig {
    fn base(mode: LearningMode) -> Self {
        Self {
            mode,
            enabled: true,
            narration: false,
            sound_effects: false,
            enhanced_visuals: false,
            visuals_follow_content: false,
            adaptive_speed: false,
            preferred_level: None,
        }
    }

    pub fn for_mode(mode: LearningMode) -> Self {
        let base = Self::base(mode);
        match mode {
            LearningMode::Classic => Self {
                preferred_level: Some(CognitiveLevel::Comprehend),
                ..base
            },
            LearningMode::AudioPaced => Self {
                narration: true,
                visuals_follow_content: true,
                ..base
            },
            LearningMode::Immersive => Self {
                narration: true,
                enhanced_visuals: true,
                ..base
            },
            LearningMode::Diagnostic => Self {
                adaptive_speed: true,
                visuals_follow_content: true,
                ..base
            },
            LearningMode::Gamified => Self {
                sound_effects: true,
                enhanced_visuals: true,
                preferred_level: Some(CognitiveLevel::Apply),
                ..base
            },
        }
    }

    pub fn defaults() -> Vec<ModeConfig> {
        LearningMode::ALL.into_iter().map(Self::for_mode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("audio-paced".parse::<LearningMode>().unwrap(), LearningMode::AudioPaced);
        assert_eq!("Visual".parse::<Focus>().unwrap(), Focus::Visual);
        assert!("spotify".parse::<LearningMode>().is_err());
    }

    #[test]
    fn test_focus_flags_only() {
        let flags = FocusFlags::only(Focus::Metrics);
        assert!(flags.metrics && !flags.visual && !flags.neural && !flags.benchmark);
        assert!(!FocusFlags::default().any());
    }

    #[test]
    fn test_mode_configs_cover_all_modes() {
        let configs = ModeConfig::defaults();
        assert_eq!(configs.len(), 5);
        assert!(configs.iter().all(|c| c.enabled));
        let gamified = ModeConfig::for_mode(LearningMode::Gamified);
        assert!(gamified.sound_effects && gamified.enhanced_visuals);
        assert_eq!(gamified.preferred_level, Some(CognitiveLevel::Apply));
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(LearningMode::Classic.dimensions(), vec![LearningDimension::Temporal]);
        assert_eq!(LearningMode::Immersive.dimensions().len(), 3);
    }
}
