//! 学习伙伴生成：每个模式 1–2 条固定模板，再按练习上下文追加 0–2 条
//!
//! 不去重；调用方应整体替换上一份列表而不是合并。

use super::{Companion, CompanionKind, CompanionPriority};
use crate::content::ExerciseContext;
use crate::modes::LearningMode;

fn base_companions(mode: LearningMode) -> Vec<Companion> {
    use CompanionKind::*;
    use CompanionPriority::*;

    match mode {
        LearningMode::Classic => vec![Companion::new(
            "classic-guide",
            CognitiveHint,
            "Enfócate en la comprensión paso a paso",
            Medium,
        )],
        LearningMode::AudioPaced => vec![
            Companion::new(
                "audio-paced-narration",
                ModeSpecific,
                "Audio contextual activado para mejor retención",
                High,
            ),
            Companion::new("audio-paced-rhythm", Audio, "Ritmo de aprendizaje sincronizado", Medium),
        ],
        LearningMode::Immersive => vec![
            Companion::new(
                "immersive-visual",
                Visual,
                "Experiencia 3D activada para máxima inmersión",
                High,
            ),
            Companion::new("immersive-ocr", Ocr, "Análisis visual inteligente disponible", Medium)
                .with_action("scan"),
        ],
        LearningMode::Diagnostic => vec![
            Companion::new(
                "diagnostic-progress",
                Progress,
                "Monitoreo adaptativo de progreso activo",
                High,
            ),
            Companion::new("diagnostic-bloom", CognitiveHint, "Análisis cognitivo en tiempo real", Medium),
        ],
        LearningMode::Gamified => vec![
            Companion::new(
                "gamified-motivation",
                Motivation,
                "¡Desafío activado! Gana puntos por cada respuesta correcta",
                High,
            )
            .with_action("start-challenge"),
            Companion::new("gamified-visual", Visual, "Efectos visuales de gamificación activos", Medium),
        ],
    }
}

/// 模式基础伙伴在前，上下文伙伴追加在后
pub fn generate(mode: LearningMode, context: Option<&ExerciseContext>) -> Vec<Companion> {
    let mut companions = base_companions(mode);

    if let Some(ctx) = context {
        if ctx.has_visual_content {
            companions.push(
                Companion::new(
                    "visual-context",
                    CompanionKind::Visual,
                    "Contenido visual detectado - análisis mejorado disponible",
                    CompanionPriority::Medium,
                )
                .with_context(&ctx.exercise_id),
            );
        }
        if ctx.cognitive_level.is_advanced() {
            companions.push(
                Companion::new(
                    "advanced-bloom",
                    CompanionKind::CognitiveHint,
                    format!("Nivel cognitivo avanzado: {}", ctx.cognitive_level),
                    CompanionPriority::High,
                )
                .with_context(&ctx.exercise_id),
            );
        }
    }

    companions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CognitiveLevel, ContentType, Subject};

    fn context(visual: bool, level: CognitiveLevel) -> ExerciseContext {
        ExerciseContext {
            exercise_id: "ex-1".to_string(),
            content_type: ContentType::PlainText,
            cognitive_level: level,
            difficulty: "INTERMEDIO".to_string(),
            subject: Subject::History,
            has_visual_content: visual,
            agent_recommendation: None,
        }
    }

    #[test]
    fn test_base_counts_per_mode() {
        for mode in LearningMode::ALL {
            let n = generate(mode, None).len();
            assert!((1..=2).contains(&n), "{mode}: {n}");
        }
        assert_eq!(generate(LearningMode::Classic, None).len(), 1);
    }

    #[test]
    fn test_contextual_companions_appended() {
        let ctx = context(true, CognitiveLevel::Create);
        let companions = generate(LearningMode::Classic, Some(&ctx));
        let ids: Vec<_> = companions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["classic-guide", "visual-context", "advanced-bloom"]);
        assert_eq!(companions[2].context_ref.as_deref(), Some("ex-1"));
        assert!(companions[2].message.contains("create"));
    }

    #[test]
    fn test_no_contextual_for_plain_mid_level() {
        let ctx = context(false, CognitiveLevel::Analyze);
        assert_eq!(generate(LearningMode::Gamified, Some(&ctx)).len(), 2);
    }

    #[test]
    fn test_repeated_calls_are_not_merged() {
        let first = generate(LearningMode::Diagnostic, None);
        let second = generate(LearningMode::Diagnostic, None);
        let ids = |v: &[Companion]| v.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
