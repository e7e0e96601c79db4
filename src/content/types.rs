//! 内容数据类型
//!
//! Exercise 是外部生成服务给出的松散记录（字段均可缺省）；ExerciseContext、ContentRecord 由本层派生，
//! ContentRecord 的增强载荷是封闭的 tagged union，保证「恰好一种增强」。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::QuantumError;

/// PAES 科目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "competencia_lectora")]
    ReadingCompetence,
    #[serde(rename = "matematica_m1")]
    MathM1,
    #[serde(rename = "matematica_m2")]
    MathM2,
    #[serde(rename = "historia")]
    History,
    #[serde(rename = "ciencias_tp")]
    Science,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::ReadingCompetence,
        Subject::MathM1,
        Subject::MathM2,
        Subject::History,
        Subject::Science,
    ];

    /// 配置与练习记录里使用的键
    pub fn key(self) -> &'static str {
        match self {
            Subject::ReadingCompetence => "competencia_lectora",
            Subject::MathM1 => "matematica_m1",
            Subject::MathM2 => "matematica_m2",
            Subject::History => "historia",
            Subject::Science => "ciencias_tp",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Subject::ReadingCompetence => "Competencia Lectora",
            Subject::MathM1 => "Matemática M1",
            Subject::MathM2 => "Matemática M2",
            Subject::History => "Historia y Ciencias Sociales",
            Subject::Science => "Ciencias TP",
        }
    }

    /// 数学类科目默认需要图表
    pub fn is_numeric(self) -> bool {
        matches!(self, Subject::MathM1 | Subject::MathM2)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Subject {
    type Err = QuantumError;

    /// 同时接受小写键与生成服务使用的大写枚举名（如 `MATEMATICA_1`）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "competencia_lectora" | "lectura" => Ok(Subject::ReadingCompetence),
            "matematica_m1" | "matematica_1" | "m1" => Ok(Subject::MathM1),
            "matematica_m2" | "matematica_2" | "m2" => Ok(Subject::MathM2),
            "historia" | "historia_geografia" => Ok(Subject::History),
            "ciencias_tp" | "ciencias" => Ok(Subject::Science),
            other => Err(QuantumError::InvalidShape(format!("unknown subject '{other}'"))),
        }
    }
}

/// 呈现类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    PlainText,
    Chart,
    Table,
    OcrSourced,
    ExerciseSheet,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::PlainText => "texto",
            ContentType::Chart => "grafico",
            ContentType::Table => "tabla",
            ContentType::OcrSourced => "ocr",
            ContentType::ExerciseSheet => "ejercicio",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "texto" | "text" | "plain_text" => Ok(ContentType::PlainText),
            "grafico" | "gráfico" | "chart" => Ok(ContentType::Chart),
            "tabla" | "table" => Ok(ContentType::Table),
            "ocr" | "ocr_sourced" => Ok(ContentType::OcrSourced),
            "ejercicio" | "exercise" | "exercise_sheet" => Ok(ContentType::ExerciseSheet),
            other => Err(QuantumError::InvalidShape(format!("unknown content type '{other}'"))),
        }
    }
}

/// 六级认知层级（Bloom），按 recall → create 递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveLevel {
    Recall,
    Comprehend,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl CognitiveLevel {
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Recall,
        CognitiveLevel::Comprehend,
        CognitiveLevel::Apply,
        CognitiveLevel::Analyze,
        CognitiveLevel::Evaluate,
        CognitiveLevel::Create,
    ];

    pub fn description(self) -> &'static str {
        match self {
            CognitiveLevel::Recall => "Recordar información y conceptos básicos",
            CognitiveLevel::Comprehend => "Comprender significados y relaciones",
            CognitiveLevel::Apply => "Aplicar conocimientos en situaciones nuevas",
            CognitiveLevel::Analyze => "Analizar y descomponer información",
            CognitiveLevel::Evaluate => "Evaluar y emitir juicios fundamentados",
            CognitiveLevel::Create => "Crear y sintetizar nuevas ideas",
        }
    }

    pub fn suggested_actions(self) -> &'static [&'static str] {
        match self {
            CognitiveLevel::Recall => &["Memorizar", "Reconocer", "Identificar", "Listar"],
            CognitiveLevel::Comprehend => &["Explicar", "Interpretar", "Resumir", "Clasificar"],
            CognitiveLevel::Apply => &["Resolver", "Implementar", "Ejecutar", "Usar"],
            CognitiveLevel::Analyze => &["Comparar", "Contrastar", "Examinar", "Categorizar"],
            CognitiveLevel::Evaluate => &["Juzgar", "Criticar", "Validar", "Defender"],
            CognitiveLevel::Create => &["Diseñar", "Construir", "Planificar", "Producir"],
        }
    }

    /// 生成提示词里的动作短语
    pub fn action_phrase(self) -> &'static str {
        match self {
            CognitiveLevel::Recall => "recordar y reconocer",
            CognitiveLevel::Comprehend => "comprender y explicar",
            CognitiveLevel::Apply => "aplicar y resolver",
            CognitiveLevel::Analyze => "analizar y descomponer",
            CognitiveLevel::Evaluate => "evaluar y juzgar",
            CognitiveLevel::Create => "crear y sintetizar",
        }
    }

    /// 相对难度 1..=3
    pub fn relative_difficulty(self) -> u8 {
        match self {
            CognitiveLevel::Recall => 1,
            CognitiveLevel::Comprehend | CognitiveLevel::Apply => 2,
            CognitiveLevel::Analyze | CognitiveLevel::Evaluate | CognitiveLevel::Create => 3,
        }
    }

    /// 最高两级（evaluate / create）
    pub fn is_advanced(self) -> bool {
        self >= CognitiveLevel::Evaluate
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CognitiveLevel::Recall => "recall",
            CognitiveLevel::Comprehend => "comprehend",
            CognitiveLevel::Apply => "apply",
            CognitiveLevel::Analyze => "analyze",
            CognitiveLevel::Evaluate => "evaluate",
            CognitiveLevel::Create => "create",
        };
        f.write_str(name)
    }
}

impl FromStr for CognitiveLevel {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CognitiveLevel::ALL
            .into_iter()
            .find(|level| level.to_string() == s.trim().to_lowercase())
            .ok_or_else(|| QuantumError::InvalidShape(format!("unknown cognitive level '{s}'")))
    }
}

/// 外部生成服务产出的练习；所有字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exercise {
    pub id: Option<String>,
    pub title: Option<String>,
    pub question: Option<String>,
    pub text: Option<String>,
    pub options: Vec<String>,
    /// 原始科目字符串，解析失败时视为缺省
    #[serde(rename = "prueba", alias = "subject")]
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "hasVisualContent", alias = "has_visual_content")]
    pub has_visual_content: bool,
}

impl Exercise {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_visual_content(mut self, visual: bool) -> Self {
        self.has_visual_content = visual;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// 已声明且可识别的科目
    pub fn declared_subject(&self) -> Option<Subject> {
        let raw = self.subject.as_deref()?;
        match raw.parse() {
            Ok(subject) => Some(subject),
            Err(e) => {
                tracing::debug!("Ignoring exercise subject: {}", e);
                None
            }
        }
    }
}

/// 从单个练习派生的元数据；不持久化，每次增强重新计算
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseContext {
    pub exercise_id: String,
    pub content_type: ContentType,
    pub cognitive_level: CognitiveLevel,
    pub difficulty: String,
    pub subject: Subject,
    pub has_visual_content: bool,
    pub agent_recommendation: Option<String>,
}

impl ExerciseContext {
    /// 由练习派生上下文；科目缺省时使用 fallback_subject
    pub fn derive(
        exercise: &Exercise,
        fallback_subject: Subject,
        agent_recommendation: Option<String>,
    ) -> Self {
        Self {
            exercise_id: exercise
                .id
                .clone()
                .unwrap_or_else(|| format!("exercise-{}", uuid::Uuid::new_v4())),
            content_type: super::detect_content_type(exercise),
            cognitive_level: super::detect_cognitive_level(exercise),
            difficulty: exercise
                .difficulty
                .clone()
                .unwrap_or_else(|| "INTERMEDIO".to_string()),
            subject: exercise.declared_subject().unwrap_or(fallback_subject),
            has_visual_content: exercise.has_visual_content,
            agent_recommendation,
        }
    }
}

/// 学生目标画像（会话开始时给出，缺省使用默认画像）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentGoal {
    pub target_career: String,
    pub target_score: u32,
    pub preferred_university: String,
    /// 每周可用学习时长（小时）
    pub weekly_hours: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl Default for StudentGoal {
    fn default() -> Self {
        Self {
            target_career: "Ingeniería Civil Industrial".to_string(),
            target_score: 750,
            preferred_university: "Universidad de Chile".to_string(),
            weekly_hours: 25,
            strengths: vec![
                "Matemáticas".to_string(),
                "Física".to_string(),
                "Análisis Lógico".to_string(),
            ],
            weaknesses: vec![
                "Comprensión Lectora".to_string(),
                "Historia".to_string(),
                "Redacción".to_string(),
            ],
        }
    }
}

/// 增强 / 生成时的可选参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergyOptions {
    pub cognitive_level: Option<CognitiveLevel>,
    /// 原样附加到 ContentRecord 的建议
    pub agent_insight: Option<String>,
    pub ocr_ready: bool,
    pub auto_generate_exercise: bool,
    pub visual_enhancement: bool,
}

impl SynergyOptions {
    pub fn with_level(mut self, level: CognitiveLevel) -> Self {
        self.cognitive_level = Some(level);
        self
    }

    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.agent_insight = Some(insight.into());
        self
    }

    pub fn with_auto_generate(mut self, enabled: bool) -> Self {
        self.auto_generate_exercise = enabled;
        self
    }
}

/// 增强类别（判别字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementKind {
    Visual,
    Metrics,
    AiInsight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEnhancement {
    pub has_3d: bool,
    pub interactive_models: bool,
    pub complexity: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    /// 当前进度 0..100
    pub progress: u32,
    pub projected_score: u32,
    pub estimated_minutes: u32,
    /// 1..=3
    pub relative_difficulty: u8,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiInsightBundle {
    pub recommendation: String,
    pub adaptation: String,
    pub prediction: String,
    pub personalization: String,
    pub features: Vec<String>,
}

/// 三种互斥的增强载荷
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "enhancement_kind", rename_all = "snake_case")]
pub enum Enhancement {
    Visual(VisualEnhancement),
    Metrics(MetricSnapshot),
    AiInsight(AiInsightBundle),
}

impl Enhancement {
    pub fn kind(&self) -> EnhancementKind {
        match self {
            Enhancement::Visual(_) => EnhancementKind::Visual,
            Enhancement::Metrics(_) => EnhancementKind::Metrics,
            Enhancement::AiInsight(_) => EnhancementKind::AiInsight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CognitiveInsight {
    pub level: CognitiveLevel,
    pub description: String,
    pub suggested_actions: Vec<String>,
}

/// 合成的上下文内容记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub content_type: ContentType,
    pub subject: Subject,
    pub subject_display_name: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub enhancement: Enhancement,
    pub cognitive_insight: Option<CognitiveInsight>,
    pub agent_recommendation: Option<String>,
}

impl ContentRecord {
    pub fn enhancement_kind(&self) -> EnhancementKind {
        self.enhancement.kind()
    }
}
