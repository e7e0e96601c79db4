//! 会话配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `QUANTUM__*` 覆盖（双下划线表示嵌套，如 `QUANTUM__SESSION__DEFAULT_MODE=immersive`）。

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::content::{StudentGoal, Subject};
use crate::modes::{Focus, LearningMode};

/// 配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QuantumConfig {
    pub session: SessionSection,
    pub timing: TimingSection,
    pub vitals: VitalsSection,
    /// 学生目标；缺省时使用内置的默认画像
    pub student: StudentGoal,
}

/// [session] 段：用户、初始模式与初始科目
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub user_id: String,
    pub default_focus: Focus,
    pub default_mode: LearningMode,
    pub default_subject: Subject,
    /// 随机源种子；未设置时每个会话取随机种子
    pub seed: Option<u64>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            default_focus: Focus::Neural,
            default_mode: LearningMode::Classic,
            default_subject: Subject::ReadingCompetence,
            seed: None,
        }
    }
}

/// [timing] 段：切换动画窗口、反馈回路延迟、采样周期
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingSection {
    /// exiting 阶段时长（毫秒）
    pub exit_ms: u64,
    /// entering 阶段时长（毫秒）
    pub enter_ms: u64,
    /// 生成练习后回灌上下文的延迟（毫秒）
    pub regenerate_delay_ms: u64,
    /// load_contextual_content 自动生成练习的延迟（毫秒）
    pub auto_generate_delay_ms: u64,
    pub vitals_interval_secs: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            exit_ms: 100,
            enter_ms: 200,
            regenerate_delay_ms: 1000,
            auto_generate_delay_ms: 500,
            vitals_interval_secs: 3,
        }
    }
}

impl TimingSection {
    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }

    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn regenerate_delay(&self) -> Duration {
        Duration::from_millis(self.regenerate_delay_ms)
    }

    pub fn auto_generate_delay(&self) -> Duration {
        Duration::from_millis(self.auto_generate_delay_ms)
    }

    /// 采样周期至少 1 秒
    pub fn vitals_interval(&self) -> Duration {
        Duration::from_secs(self.vitals_interval_secs.max(1))
    }
}

/// 三个指标各一份的数值组
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct GaugeTriple {
    pub consciousness: f64,
    pub coherence: f64,
    pub health: f64,
}

/// [vitals] 段：初始值、回退下限、每次回退的最大增量
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VitalsSection {
    pub initial: GaugeTriple,
    pub floor: GaugeTriple,
    pub max_increment: GaugeTriple,
}

impl Default for VitalsSection {
    fn default() -> Self {
        Self {
            initial: GaugeTriple {
                consciousness: 75.0,
                coherence: 85.0,
                health: 90.0,
            },
            floor: GaugeTriple {
                consciousness: 75.0,
                coherence: 80.0,
                health: 85.0,
            },
            max_increment: GaugeTriple {
                consciousness: 3.0,
                coherence: 2.0,
                health: 1.5,
            },
        }
    }
}

/// 从 config 目录加载配置，环境变量 QUANTUM__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 QUANTUM__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<QuantumConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("QUANTUM")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_transition_windows() {
        let cfg = QuantumConfig::default();
        assert_eq!(cfg.timing.exit() + cfg.timing.enter(), Duration::from_millis(300));
        assert_eq!(cfg.timing.vitals_interval(), Duration::from_secs(3));
        assert_eq!(cfg.session.default_focus, Focus::Neural);
        assert_eq!(cfg.student.target_score, 750);
    }

    #[test]
    fn test_vitals_interval_never_zero() {
        let timing = TimingSection {
            vitals_interval_secs: 0,
            ..TimingSection::default()
        };
        assert_eq!(timing.vitals_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_explicit_file_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[session]
user_id = "ana"
default_mode = "audio-paced"
default_subject = "historia"
seed = 7

[vitals.floor]
consciousness = 10.0
coherence = 20.0
health = 30.0
"#
        )
        .unwrap();

        let cfg = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.session.user_id, "ana");
        assert_eq!(cfg.session.default_mode, LearningMode::AudioPaced);
        assert_eq!(cfg.session.default_subject, Subject::History);
        assert_eq!(cfg.session.seed, Some(7));
        assert_eq!(cfg.vitals.floor.health, 30.0);
    }
}
