//! 生成请求：把 (科目, 内容类型, 认知层级, 教学建议) 组装成外部练习生成服务的请求

use serde::Serialize;

use super::types::{CognitiveLevel, ContentType, Subject, SynergyOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Intermedio,
    Avanzado,
}

/// 发往练习生成服务的请求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub subject: Subject,
    pub content_type: ContentType,
    pub level: CognitiveLevel,
    pub difficulty: Difficulty,
    pub include_visuals: bool,
    /// 自然语言提示词
    pub prompt: String,
}

impl GenerationRequest {
    /// 未指定层级时按 Comprehend 处理；Create 层级使用高阶难度
    pub fn build(content_type: ContentType, subject: Subject, options: &SynergyOptions) -> Self {
        let level = options.cognitive_level.unwrap_or(CognitiveLevel::Comprehend);
        let difficulty = if level == CognitiveLevel::Create {
            Difficulty::Avanzado
        } else {
            Difficulty::Intermedio
        };

        let mut prompt = format!(
            "Genera un ejercicio PAES de {} que requiera {} y esté relacionado con contenido de tipo {}.",
            subject.display_name(),
            level.action_phrase(),
            content_type.label()
        );
        if let Some(insight) = &options.agent_insight {
            prompt.push_str(&format!("\nConsideración pedagógica: {insight}"));
        }
        prompt.push_str("\nEl ejercicio debe ser auténtico y seguir el formato oficial PAES.");

        Self {
            subject,
            content_type,
            level,
            difficulty,
            include_visuals: options.ocr_ready,
            prompt,
        }
    }
}
