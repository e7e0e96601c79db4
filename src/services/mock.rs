//! 本地 Mock 协作者（用于演示与测试，无需后端）
//!
//! 生成器按请求拼出一道确定性的练习；建议服务按题干长度轮换固定建议；其余服务只在内存里计数。

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use super::traits::{
    Advisor, BioMetricsSource, ExerciseGenerator, GuidanceService, NarrationService,
    NotificationService, ProgressService, SyncChannel,
};
use super::types::{
    HelpSignal, Notification, OutgoingNotification, ProgressRecord, SyncOperation, VitalReading,
};
use crate::content::{CognitiveLevel, ContentType, Exercise, GenerationRequest};
use crate::core::state::{CalendarSummary, GuidanceSummary};
use crate::core::QuantumError;
use crate::modes::LearningMode;

/// 确定性练习生成器
#[derive(Debug, Default)]
pub struct MockExerciseGenerator {
    issued: AtomicU32,
}

fn stem_for(level: CognitiveLevel) -> &'static str {
    match level {
        CognitiveLevel::Recall => "Identifica",
        CognitiveLevel::Comprehend => "Explica",
        CognitiveLevel::Apply => "Calcula",
        CognitiveLevel::Analyze => "Compara",
        CognitiveLevel::Evaluate => "Evalúa",
        CognitiveLevel::Create => "Diseña",
    }
}

#[async_trait]
impl ExerciseGenerator for MockExerciseGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<Exercise>, QuantumError> {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        let material = match request.content_type {
            ContentType::Chart => " a partir del gráfico",
            ContentType::Table => " usando la tabla adjunta",
            _ => "",
        };
        let question = format!(
            "{} el concepto central de {}{}",
            stem_for(request.level),
            request.subject.display_name(),
            material
        );

        Ok(Some(Exercise {
            id: Some(format!("mock-{}-{n}", request.subject.key())),
            title: Some(format!("Ejercicio {n}")),
            question: Some(question),
            text: None,
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            subject: Some(request.subject.key().to_string()),
            difficulty: Some(
                serde_json::to_value(request.difficulty)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| "INTERMEDIO".to_string()),
            ),
            has_visual_content: request.include_visuals,
        }))
    }
}

/// 轮换固定建议
#[derive(Debug, Default)]
pub struct MockAdvisor;

const ADVICE: [&str; 5] = [
    "Enfócate en la comprensión conceptual antes de resolver",
    "Utiliza técnicas de visualización para este tipo de problema",
    "Conecta este ejercicio con conocimientos previos",
    "Practica la estrategia paso a paso",
    "Identifica patrones similares en otros ejercicios",
];

#[async_trait]
impl Advisor for MockAdvisor {
    async fn recommend(&self, exercise: &Exercise) -> Result<String, QuantumError> {
        let len = exercise.question.as_deref().map_or(0, str::len);
        Ok(ADVICE[len % ADVICE.len()].to_string())
    }
}

/// 固定读数
#[derive(Debug)]
pub struct MockBioMetrics {
    pub reading: VitalReading,
}

impl Default for MockBioMetrics {
    fn default() -> Self {
        Self {
            reading: VitalReading {
                consciousness: 78.0,
                coherence: 86.0,
                health: 92.0,
            },
        }
    }
}

#[async_trait]
impl BioMetricsSource for MockBioMetrics {
    async fn sample(&self) -> Result<VitalReading, QuantumError> {
        Ok(self.reading)
    }
}

#[derive(Debug, Default)]
pub struct MockProgress {
    tracked: AtomicU32,
}

impl MockProgress {
    pub fn tracked(&self) -> u32 {
        self.tracked.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ProgressService for MockProgress {
    async fn summary(&self, _user_id: &str) -> Result<CalendarSummary, QuantumError> {
        Ok(CalendarSummary {
            today_events: self.tracked(),
            next_milestone: Some(Utc::now() + chrono::Duration::days(7)),
            streak: 3,
        })
    }

    async fn track_progress(&self, user_id: &str, record: &ProgressRecord) -> Result<(), QuantumError> {
        self.tracked.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Tracked {} for {} (score {})", record.exercise_id, user_id, record.score);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockNotifications {
    sent: AtomicU32,
}

impl MockNotifications {
    pub fn sent(&self) -> u32 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NotificationService for MockNotifications {
    async fn recent(&self, _user_id: &str, limit: usize) -> Result<Vec<Notification>, QuantumError> {
        let all = vec![
            Notification {
                title: "Simulacro PAES Personalizado".to_string(),
                read: false,
                created_at: Utc::now(),
            },
            Notification {
                title: "Sesión de refuerzo en áreas débiles".to_string(),
                read: true,
                created_at: Utc::now() - chrono::Duration::hours(5),
            },
        ];
        Ok(all.into_iter().take(limit).collect())
    }

    async fn notify(&self, user_id: &str, notification: &OutgoingNotification) -> Result<(), QuantumError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Notification for {}: {:?}", user_id, notification);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockGuidance;

#[async_trait]
impl GuidanceService for MockGuidance {
    async fn summary(&self, _user_id: &str) -> Result<GuidanceSummary, QuantumError> {
        Ok(GuidanceSummary {
            is_active: true,
            completed_tours: 1,
            needs_help: false,
        })
    }

    async fn detect_help_needed(&self, _user_id: &str, signal: &HelpSignal) -> Result<bool, QuantumError> {
        Ok(signal.error_count > 0 && signal.time_spent_secs > 120)
    }
}

/// 音频 / 沉浸模式可以合成旁白
#[derive(Debug, Default)]
pub struct MockNarration;

#[async_trait]
impl NarrationService for MockNarration {
    async fn narrate(&self, exercise: &Exercise, mode: LearningMode) -> Result<bool, QuantumError> {
        Ok(exercise.question.is_some()
            && matches!(mode, LearningMode::AudioPaced | LearningMode::Immersive))
    }
}

/// 只写日志的同步通道
#[derive(Debug, Default)]
pub struct LoggingSyncChannel;

impl SyncChannel for LoggingSyncChannel {
    fn queue(&self, operation: SyncOperation) -> Result<(), QuantumError> {
        tracing::debug!(
            "Sync {:?} ({:?}) for {}: {}",
            operation.kind,
            operation.priority,
            operation.user_id,
            operation.data
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{detect_cognitive_level, Subject, SynergyOptions};

    #[tokio::test]
    async fn test_mock_generator_round_trips_subject_and_level() {
        let generator = MockExerciseGenerator::default();
        let options = SynergyOptions::default().with_level(CognitiveLevel::Analyze);
        let request = GenerationRequest::build(ContentType::Table, Subject::History, &options);
        let exercise = generator.generate(&request).await.unwrap().unwrap();

        assert_eq!(exercise.declared_subject(), Some(Subject::History));
        assert_eq!(detect_cognitive_level(&exercise), CognitiveLevel::Analyze);
        assert_eq!(exercise.difficulty.as_deref(), Some("INTERMEDIO"));
        assert_eq!(exercise.id.as_deref(), Some("mock-historia-1"));
    }

    #[tokio::test]
    async fn test_mock_notifications_limit() {
        let notes = MockNotifications::default();
        assert_eq!(notes.recent("u", 1).await.unwrap().len(), 1);
        assert_eq!(notes.recent("u", 5).await.unwrap().len(), 2);
    }
}
