use anyhow::{Context, Result};
use std::io::Write;
use stride_core::convo::{restore, ATTACHMENT_PLACEHOLDER};
use stride_core::{Assembler, ChatSession, Fragment, PromptInput, Role, Settings};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::commands::{self, CommandResult};

pub async fn run_chat(settings: &Settings) -> Result<()> {
    let model = settings
        .build_chat_model()
        .context("failed to build chat model")?;

    let log = restore(&settings.paths.history_file);
    if !log.is_empty() {
        info!(turns = log.len(), "restored conversation history");
        println!(
            "Resuming your conversation ({} turns on record).",
            log.len()
        );
    }

    let mut session = ChatSession::new(model, log, settings.paths.history_file.clone());
    let assembler = Assembler::new(settings.paths.template_file.clone());

    println!("Stride running coach - type a question, /help for commands, /quit to leave.");

    // The loop result is bound and persistence runs unconditionally after it,
    // so an interrupt or a loop error still writes the history file.
    let outcome = tokio::select! {
        res = chat_loop(&mut session, &assembler, settings) => res,
        _ = tokio::signal::ctrl_c() => {
            println!();
            info!("interrupt received, shutting down");
            Ok(())
        }
    };

    session
        .persist()
        .context("failed to persist conversation history")?;
    println!(
        "Conversation saved to {}. Have a great run!",
        session.history_path().display()
    );

    outcome
}

async fn chat_loop(
    session: &mut ChatSession,
    assembler: &Assembler,
    settings: &Settings,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // EOF on stdin ends the session like /quit does.
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match commands::handle_command(input) {
            CommandResult::Quit => break,
            CommandResult::Message(msg) => println!("{msg}"),
            CommandResult::ShowHistory => print_history(session),
            CommandResult::ShowStatus => print_status(session, settings),
            CommandResult::Submit {
                image,
                metrics,
                note,
            } => {
                let input = PromptInput {
                    note,
                    metrics_path: metrics.map(Into::into),
                    image_path: image.map(Into::into),
                };
                submit(session, assembler, input).await;
            }
            CommandResult::NotACommand => {
                submit(session, assembler, PromptInput::from_note(input)).await;
            }
        }
    }

    Ok(())
}

/// One submission attempt. Errors abort this attempt only; the loop keeps
/// running.
async fn submit(session: &mut ChatSession, assembler: &Assembler, input: PromptInput) {
    let fragments = match assembler.assemble(&input) {
        Ok(fragments) => fragments,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };

    match session.submit(fragments).await {
        Ok(reply) => println!("\ncoach> {reply}\n"),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn print_history(session: &ChatSession) {
    if session.log().is_empty() {
        println!("No conversation yet.");
        return;
    }
    for turn in session.log().turns() {
        let speaker = match turn.role {
            Role::User => "you",
            Role::Assistant => "coach",
        };
        for fragment in &turn.fragments {
            match fragment {
                Fragment::Text(text) => println!("{speaker}> {text}"),
                Fragment::Image { .. } => println!("{speaker}> {ATTACHMENT_PLACEHOLDER}"),
            }
        }
    }
}

fn print_status(session: &ChatSession, settings: &Settings) {
    println!("Model:        {}", settings.llm.model);
    println!(
        "History file: {}",
        session.history_path().display()
    );
    println!("Template:     {}", settings.paths.template_file.display());
    println!("Turns:        {}", session.log().len());
}
