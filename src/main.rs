//! Quantum - 学习会话演示
//!
//! 入口：初始化日志、以本地 Mock 协作者构建会话，并从 stdin 逐行读取命令驱动编排器。

use anyhow::Context;
use quantum::content::{Exercise, SynergyOptions};
use quantum::core::command::HELP;
use quantum::core::{Command, Orchestrator};
use quantum::services::{ProgressRecord, Services, UserInteraction};
use quantum::{create_session_builder, observability};
use tokio::io::{AsyncBufReadExt, BufReader};

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to render state")?
    );
    Ok(())
}

/// 执行一条命令；返回 false 表示退出
async fn dispatch(orch: &Orchestrator, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Focus(focus) => {
            if !orch.activate_focus(focus) {
                println!("focus unchanged (same target or switch in flight)");
            }
        }
        Command::Mode(mode) => {
            if !orch.switch_mode(mode) {
                println!("mode unchanged (same target or switch in flight)");
            }
        }
        Command::Enrich(question) => {
            let exercise = Exercise::new(question);
            match orch.enrich_from_exercise(&exercise).await {
                Some(context) => print_json(&context)?,
                None => println!("no context"),
            }
        }
        Command::Experience(question) => {
            let exercise = Exercise::new(question);
            match orch.create_experience(&exercise, None).await {
                Some(experience) => print_json(&experience)?,
                None => println!("no experience"),
            }
        }
        Command::Generate {
            content_type,
            subject,
            level,
        } => {
            let options = SynergyOptions {
                cognitive_level: level,
                ..SynergyOptions::default()
            };
            match orch.generate_from_context(content_type, subject, options).await {
                Some(exercise) => print_json(&exercise)?,
                None => println!("generation failed"),
            }
        }
        Command::Load {
            content_type,
            subject,
            auto_generate,
        } => {
            let options = SynergyOptions::default().with_auto_generate(auto_generate);
            if let Some(record) = orch.load_contextual_content(content_type, subject, options) {
                print_json(&record)?;
            }
        }
        Command::Metrics(delta) => match orch.record_interaction(delta) {
            Some(metrics) => print_json(&metrics)?,
            None => println!("no active experience"),
        },
        Command::Progress { score, correct } => {
            let state = orch.snapshot();
            let exercise_id = state
                .learning
                .current_experience
                .as_ref()
                .map(|e| e.context.exercise_id.clone())
                .unwrap_or_else(|| "manual".to_string());
            orch.track_exercise_progress(ProgressRecord {
                exercise_id,
                subject: state.current_subject.key().to_string(),
                time_spent_secs: 60,
                score,
                is_correct: correct,
            })
            .await;
            println!("today: {}", orch.snapshot().calendar.today_events);
        }
        Command::Visit(page) => {
            orch.handle_user_interaction(UserInteraction {
                action: "first_visit".to_string(),
                page,
                time_spent_secs: 0,
                success: true,
            })
            .await;
        }
        Command::Vitals => print_json(&orch.snapshot().vitals)?,
        Command::State => print_json(&orch.snapshot())?,
        Command::Arsenal => print_json(&orch.arsenal())?,
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let config_path = std::env::args().nth(1).map(Into::into);
    let orch = create_session_builder(config_path)
        .with_services(Services::mock())
        .build();
    orch.start().await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if !dispatch(&orch, command).await? {
                            break;
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    orch.shutdown().await;
    Ok(())
}
