//! 交互式会话命令（演示 REPL 使用）

use std::str::FromStr;

use crate::content::{CognitiveLevel, ContentType, Subject};
use crate::core::QuantumError;
use crate::experience::MetricsDelta;
use crate::modes::{Focus, LearningMode};

pub const HELP: &str = "\
commands:
  focus <visual|metrics|neural|benchmark>
  mode <classic|audio-paced|immersive|diagnostic|gamified>
  enrich <question>
  experience <question>
  generate <content-type> <subject> [level]
  load <content-type> <subject> [auto]
  metrics <engagement> <comprehension> <retention>
  progress <score> <correct|wrong>
  visit <page>
  vitals | state | arsenal | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Focus(Focus),
    Mode(LearningMode),
    /// 以题干构造练习并增强上下文
    Enrich(String),
    Experience(String),
    Generate {
        content_type: ContentType,
        subject: Subject,
        level: Option<CognitiveLevel>,
    },
    Load {
        content_type: ContentType,
        subject: Subject,
        auto_generate: bool,
    },
    Metrics(MetricsDelta),
    Progress {
        score: f64,
        correct: bool,
    },
    Visit(String),
    Vitals,
    State,
    Arsenal,
    Help,
    Quit,
}

fn invalid(msg: impl Into<String>) -> QuantumError {
    QuantumError::InvalidShape(msg.into())
}

fn number(raw: Option<&str>, name: &str) -> Result<f64, QuantumError> {
    let raw = raw.ok_or_else(|| invalid(format!("missing {name}")))?;
    raw.parse()
        .map_err(|_| invalid(format!("{name} must be a number, got '{raw}'")))
}

fn text(rest: &str, name: &str) -> Result<String, QuantumError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(invalid(format!("missing {name}")));
    }
    Ok(rest.to_string())
}

impl FromStr for Command {
    type Err = QuantumError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = rest.split_whitespace();

        match head.to_lowercase().as_str() {
            "focus" => Ok(Command::Focus(args.next().unwrap_or_default().parse()?)),
            "mode" => Ok(Command::Mode(args.next().unwrap_or_default().parse()?)),
            "enrich" => Ok(Command::Enrich(text(rest, "question")?)),
            "experience" | "exp" => Ok(Command::Experience(text(rest, "question")?)),
            "generate" | "gen" => {
                let content_type = args.next().unwrap_or_default().parse()?;
                let subject = args.next().unwrap_or_default().parse()?;
                let level = args.next().map(str::parse).transpose()?;
                Ok(Command::Generate {
                    content_type,
                    subject,
                    level,
                })
            }
            "load" => {
                let content_type = args.next().unwrap_or_default().parse()?;
                let subject = args.next().unwrap_or_default().parse()?;
                let auto_generate = matches!(args.next(), Some("auto"));
                Ok(Command::Load {
                    content_type,
                    subject,
                    auto_generate,
                })
            }
            "metrics" => Ok(Command::Metrics(MetricsDelta {
                engagement: number(args.next(), "engagement")?,
                comprehension: number(args.next(), "comprehension")?,
                retention: number(args.next(), "retention")?,
            })),
            "progress" => {
                let score = number(args.next(), "score")?;
                let correct = match args.next() {
                    Some("correct") | Some("ok") => true,
                    Some("wrong") | Some("fail") => false,
                    other => return Err(invalid(format!("expected correct|wrong, got {other:?}"))),
                };
                Ok(Command::Progress { score, correct })
            }
            "visit" => Ok(Command::Visit(text(rest, "page")?)),
            "vitals" => Ok(Command::Vitals),
            "state" => Ok(Command::State),
            "arsenal" => Ok(Command::Arsenal),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(invalid("empty command")),
            other => Err(invalid(format!("unknown command '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switches() {
        assert_eq!("focus metrics".parse::<Command>().unwrap(), Command::Focus(Focus::Metrics));
        assert_eq!(
            "mode audio-paced".parse::<Command>().unwrap(),
            Command::Mode(LearningMode::AudioPaced)
        );
        assert!("focus".parse::<Command>().is_err());
        assert_eq!("arsenal".parse::<Command>().unwrap(), Command::Arsenal);
    }

    #[test]
    fn test_parse_generate_with_level() {
        let cmd: Command = "generate tabla historia analyze".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                content_type: ContentType::Table,
                subject: Subject::History,
                level: Some(CognitiveLevel::Analyze),
            }
        );
    }

    #[test]
    fn test_parse_free_text_keeps_spacing() {
        let cmd: Command = "enrich  Compara  los gráficos ".parse().unwrap();
        assert_eq!(cmd, Command::Enrich("Compara  los gráficos".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "progress 90 maybe".parse::<Command>(),
            Err(QuantumError::InvalidShape(_))
        ));
        assert!("metrics 1 x 2".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_load_auto() {
        let cmd: Command = "load grafico matematica_m1 auto".parse().unwrap();
        assert!(matches!(cmd, Command::Load { auto_generate: true, .. }));
    }
}
