//! 内容层：练习与上下文数据类型、内容类型 / 认知层级识别、上下文内容增强、生成请求

pub mod detect;
pub mod enrich;
pub mod prompt;
pub mod types;

pub use detect::{detect_cognitive_level, detect_content_type, detect_level_from_text};
pub use enrich::enrich;
pub use prompt::{Difficulty, GenerationRequest};
pub use types::{
    AiInsightBundle, CognitiveInsight, CognitiveLevel, ContentRecord, ContentType, Enhancement,
    EnhancementKind, Exercise, ExerciseContext, MetricSnapshot, StudentGoal, Subject,
    SynergyOptions, VisualEnhancement,
};
