//! 内容类型与认知层级识别（纯函数，无错误路径）
//!
//! 关键词按「词前缀」匹配：文本先小写、按非字母数字切词，词以关键词开头即命中，
//! 避免 "paragraph" 误命中 "graph" 之类的子串问题。以 `$` 结尾的线索要求整词相同。
//! 同时覆盖西语与英语题干。

use super::types::{CognitiveLevel, ContentType, Exercise};

/// 图形 / 图片类线索
const VISUAL_CUES: &[&str] = &[
    "gráfic", "grafic", "imagen", "imágen", "diagrama", "graph", "chart", "image", "diagram", "plot",
];

/// 表格类线索
const TABLE_CUES: &[&str] = &["tabla", "table", "cuadro"];

/// 按特异性从高到低排列；第一组命中即返回
const LEVEL_RULES: &[(CognitiveLevel, &[&str])] = &[
    (
        CognitiveLevel::Create,
        &[
            "crear", "crea$", "create", "creating", "creativ", "diseñ", "design", "propon",
            "propón", "propose", "proposing", "construi", "construct", "invent$", "inventa$",
            "inventar$", "inventen$", "invente$",
        ],
    ),
    (
        CognitiveLevel::Evaluate,
        &[
            "evalu", "evalú", "juzg", "judg", "critic", "crític", "critiq", "justif", "valora",
            "assess",
        ],
    ),
    (
        CognitiveLevel::Analyze,
        &[
            "analiz", "anális", "analy", "compar", "contrast", "diferenci", "differentiat",
            "distingu", "descompon", "decompos", "examin",
        ],
    ),
    (
        CognitiveLevel::Apply,
        &[
            "aplic", "apply", "resolv", "solve", "calcul", "comput", "ejecut", "execut", "determin",
            "utiliz",
        ],
    ),
    (
        CognitiveLevel::Comprehend,
        &[
            "explic", "explain", "interpret", "resum", "summar", "describ", "parafrase",
            "paraphras", "clasific", "classif",
        ],
    ),
];

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_cue(tokens: &[String], cues: &[&str]) -> bool {
    tokens
        .iter()
        .any(|token| cues.iter().any(|cue| cue_matches(token, cue)))
}

/// 以 `$` 结尾的线索只做整词匹配（"crea$" 不命中 "creature"，"invent$" 不命中 "inventory"）
fn cue_matches(token: &str, cue: &str) -> bool {
    match cue.strip_suffix('$') {
        Some(word) => token == word,
        None => token.starts_with(cue),
    }
}

fn fold_accents(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// 数学类科目：可解析的科目看 is_numeric，否则对原始科目名做宽松匹配
fn is_numeric_subject(exercise: &Exercise) -> bool {
    match exercise.declared_subject() {
        Some(subject) => subject.is_numeric(),
        None => exercise
            .subject
            .as_deref()
            .is_some_and(|raw| fold_accents(raw).contains("matematic")),
    }
}

/// 内容类型识别，规则按顺序首个命中：
/// 1. 显式视觉标记，或文本含图形线索 → Chart
/// 2. 文本或选项含表格线索 → Table
/// 3. 数学类科目 → Chart
/// 4. 其余 → PlainText
pub fn detect_content_type(exercise: &Exercise) -> ContentType {
    let body = [exercise.text.as_deref(), exercise.question.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let body_tokens = tokens(&body);

    if exercise.has_visual_content || has_cue(&body_tokens, VISUAL_CUES) {
        return ContentType::Chart;
    }

    let option_tokens = tokens(&exercise.options.join(" "));
    if has_cue(&body_tokens, TABLE_CUES) || has_cue(&option_tokens, TABLE_CUES) {
        return ContentType::Table;
    }

    if is_numeric_subject(exercise) {
        return ContentType::Chart;
    }

    ContentType::PlainText
}

/// 认知层级识别：优先读 question，缺省时读 text
pub fn detect_cognitive_level(exercise: &Exercise) -> CognitiveLevel {
    let question = exercise
        .question
        .as_deref()
        .or(exercise.text.as_deref())
        .unwrap_or_default();
    detect_level_from_text(question)
}

/// 对任意文本做层级识别；无命中时回退到 Recall
pub fn detect_level_from_text(text: &str) -> CognitiveLevel {
    let words = tokens(text);
    LEVEL_RULES
        .iter()
        .find(|(_, cues)| has_cue(&words, cues))
        .map(|(level, _)| *level)
        .unwrap_or(CognitiveLevel::Recall)
}
