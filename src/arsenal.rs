//! 学习武器库：由学生目标画像派生的静态规划视图
//!
//! 包含微认证、职业方向洞察、评估日程、分数预测与分科进度。全部为纯函数，
//! 强项 / 弱项按名称匹配（忽略大小写与首尾空白）决定各项取值。

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::content::{StudentGoal, Subject};

const READING_WEAKNESS: &str = "Comprensión Lectora";
const MATH_STRENGTH: &str = "Matemáticas";
const HISTORY_WEAKNESS: &str = "Historia";

/// 目标分数缺省（为 0）时使用的分数
const FALLBACK_TARGET_SCORE: u32 = 750;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Microcertification {
    pub id: String,
    pub name: String,
    /// 完成进度（百分比）
    pub progress: u32,
    pub relevance: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocationalInsight {
    pub target_career: String,
    pub compatibility: u32,
    pub recommendations: Vec<String>,
    /// 录取概率（百分比）
    pub admission_probability: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Assessment,
    Study,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub date: DateTime<Utc>,
    pub title: String,
    pub kind: EventKind,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreProjection {
    pub current: u32,
    pub target: u32,
    pub projected: u32,
    pub probability: u32,
    /// 预计所需周数：每周学时 × 1.2 向上取整
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubjectProgress {
    pub subject: Subject,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressOverview {
    pub global: u32,
    pub per_subject: Vec<SubjectProgress>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressOverview {
    pub fn percent_for(&self, subject: Subject) -> Option<u32> {
        self.per_subject
            .iter()
            .find(|p| p.subject == subject)
            .map(|p| p.percent)
    }
}

/// 武器库整体视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arsenal {
    pub subjects: Vec<Subject>,
    pub microcertifications: Vec<Microcertification>,
    pub vocational: VocationalInsight,
    pub calendar: Vec<CalendarEvent>,
    pub scores: ScoreProjection,
    pub progress: ProgressOverview,
}

impl Arsenal {
    pub fn from_goal(goal: &StudentGoal, now: DateTime<Utc>) -> Self {
        Self {
            subjects: Subject::ALL.to_vec(),
            microcertifications: microcertifications(goal),
            vocational: vocational_insight(goal),
            calendar: calendar(now),
            scores: score_projection(goal),
            progress: progress_overview(goal, now),
        }
    }
}

fn listed(items: &[String], name: &str) -> bool {
    items
        .iter()
        .any(|item| item.trim().to_lowercase() == name.to_lowercase())
}

fn relevance(matched: bool) -> Priority {
    if matched {
        Priority::High
    } else {
        Priority::Medium
    }
}

pub fn microcertifications(goal: &StudentGoal) -> Vec<Microcertification> {
    vec![
        Microcertification {
            id: "cert-001".to_string(),
            name: "Especialista en Competencia Lectora".to_string(),
            progress: 75,
            relevance: relevance(listed(&goal.weaknesses, READING_WEAKNESS)),
        },
        Microcertification {
            id: "cert-002".to_string(),
            name: "Maestro Matemático PAES".to_string(),
            progress: 60,
            relevance: relevance(listed(&goal.strengths, MATH_STRENGTH)),
        },
    ]
}

fn first_or<'a>(items: &'a [String], fallback: &'a str) -> &'a str {
    items
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or(fallback)
}

pub fn vocational_insight(goal: &StudentGoal) -> VocationalInsight {
    let weakness = first_or(&goal.weaknesses, "áreas de mejora");
    let strength = first_or(&goal.strengths, "habilidades");
    let university = match goal.preferred_university.trim() {
        "" => "tu universidad objetivo",
        name => name,
    };
    let score = match goal.target_score {
        0 => FALLBACK_TARGET_SCORE,
        score => score,
    };
    VocationalInsight {
        target_career: goal.target_career.clone(),
        compatibility: 85,
        recommendations: vec![
            format!("Enfócate en {weakness} para alcanzar {score} puntos"),
            format!("Tu fortaleza en {strength} te da ventaja competitiva"),
            format!("{university} requiere preparación específica en estas áreas"),
        ],
        admission_probability: 78,
    }
}

/// 一周后的个性化模拟考与两周后的弱项强化课
pub fn calendar(now: DateTime<Utc>) -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            date: now + Duration::days(7),
            title: "Simulacro PAES Personalizado".to_string(),
            kind: EventKind::Assessment,
            priority: Priority::High,
        },
        CalendarEvent {
            date: now + Duration::days(14),
            title: "Sesión de refuerzo en áreas débiles".to_string(),
            kind: EventKind::Study,
            priority: Priority::Medium,
        },
    ]
}

pub fn score_projection(goal: &StudentGoal) -> ScoreProjection {
    let target = goal.target_score;
    ScoreProjection {
        current: target.saturating_sub(50),
        target,
        projected: target.saturating_sub(20),
        probability: 82,
        estimated_weeks: goal.weekly_hours.saturating_mul(6).div_ceil(5),
    }
}

pub fn progress_overview(goal: &StudentGoal, now: DateTime<Utc>) -> ProgressOverview {
    let strong_math = listed(&goal.strengths, MATH_STRENGTH);
    let percent = |subject: Subject| match subject {
        Subject::ReadingCompetence if listed(&goal.weaknesses, READING_WEAKNESS) => 45,
        Subject::ReadingCompetence => 75,
        Subject::MathM1 if strong_math => 85,
        Subject::MathM1 => 60,
        Subject::MathM2 if strong_math => 80,
        Subject::MathM2 => 55,
        Subject::History if listed(&goal.weaknesses, HISTORY_WEAKNESS) => 40,
        Subject::History => 70,
        Subject::Science => 65,
    };
    ProgressOverview {
        global: 68,
        per_subject: Subject::ALL
            .iter()
            .map(|&subject| SubjectProgress {
                subject,
                percent: percent(subject),
            })
            .collect(),
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(strengths: &[&str], weaknesses: &[&str]) -> StudentGoal {
        StudentGoal {
            strengths: strengths.iter().map(|s| s.to_string()).collect(),
            weaknesses: weaknesses.iter().map(|s| s.to_string()).collect(),
            ..StudentGoal::default()
        }
    }

    #[test]
    fn test_default_goal_strength_and_weakness_branches() {
        let goal = StudentGoal::default();
        let certs = microcertifications(&goal);
        assert_eq!(certs[0].relevance, Priority::High);
        assert_eq!(certs[1].relevance, Priority::High);

        let progress = progress_overview(&goal, Utc::now());
        assert_eq!(progress.percent_for(Subject::ReadingCompetence), Some(45));
        assert_eq!(progress.percent_for(Subject::MathM1), Some(85));
        assert_eq!(progress.percent_for(Subject::MathM2), Some(80));
        assert_eq!(progress.percent_for(Subject::History), Some(40));
        assert_eq!(progress.percent_for(Subject::Science), Some(65));
    }

    #[test]
    fn test_goal_without_listed_strengths_or_weaknesses() {
        let goal = goal(&["Física"], &["Química"]);
        let certs = microcertifications(&goal);
        assert!(certs.iter().all(|c| c.relevance == Priority::Medium));

        let progress = progress_overview(&goal, Utc::now());
        assert_eq!(progress.percent_for(Subject::ReadingCompetence), Some(75));
        assert_eq!(progress.percent_for(Subject::MathM1), Some(60));
        assert_eq!(progress.percent_for(Subject::MathM2), Some(55));
        assert_eq!(progress.percent_for(Subject::History), Some(70));
    }

    #[test]
    fn test_name_matching_ignores_case_and_padding() {
        let goal = goal(&[" matemáticas "], &["comprensión lectora"]);
        let certs = microcertifications(&goal);
        assert!(certs.iter().all(|c| c.relevance == Priority::High));
    }

    #[test]
    fn test_vocational_recommendations() {
        let insight = vocational_insight(&StudentGoal::default());
        assert_eq!(insight.target_career, "Ingeniería Civil Industrial");
        assert_eq!(
            insight.recommendations,
            vec![
                "Enfócate en Comprensión Lectora para alcanzar 750 puntos",
                "Tu fortaleza en Matemáticas te da ventaja competitiva",
                "Universidad de Chile requiere preparación específica en estas áreas",
            ]
        );
    }

    #[test]
    fn test_vocational_fallbacks_for_empty_goal() {
        let empty = StudentGoal {
            target_score: 0,
            preferred_university: String::new(),
            ..goal(&[], &[])
        };
        let insight = vocational_insight(&empty);
        assert_eq!(
            insight.recommendations,
            vec![
                "Enfócate en áreas de mejora para alcanzar 750 puntos",
                "Tu fortaleza en habilidades te da ventaja competitiva",
                "tu universidad objetivo requiere preparación específica en estas áreas",
            ]
        );
    }

    #[test]
    fn test_score_projection() {
        let goal = StudentGoal {
            target_score: 800,
            weekly_hours: 11,
            ..StudentGoal::default()
        };
        let scores = score_projection(&goal);
        assert_eq!((scores.current, scores.target, scores.projected), (750, 800, 780));
        // 11 × 1.2 = 13.2 → 14
        assert_eq!(scores.estimated_weeks, 14);
        assert_eq!(score_projection(&StudentGoal::default()).estimated_weeks, 30);

        let low = StudentGoal {
            target_score: 30,
            ..StudentGoal::default()
        };
        assert_eq!(score_projection(&low).current, 0);
    }

    #[test]
    fn test_calendar_is_relative_to_now() {
        let now = Utc::now();
        let events = calendar(now);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date - now, Duration::days(7));
        assert_eq!(events[0].kind, EventKind::Assessment);
        assert_eq!(events[1].date - now, Duration::days(14));
        assert_eq!(events[1].priority, Priority::Medium);
    }

    #[test]
    fn test_arsenal_covers_every_subject() {
        let arsenal = Arsenal::from_goal(&StudentGoal::default(), Utc::now());
        assert_eq!(arsenal.subjects.len(), Subject::ALL.len());
        assert_eq!(arsenal.progress.per_subject.len(), Subject::ALL.len());
        assert_eq!(arsenal.progress.global, 68);
    }
}
