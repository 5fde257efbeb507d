/// Result of processing one line of input.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Print the conversation so far.
    ShowHistory,
    /// Show status (model, history file, turn count).
    ShowStatus,
    /// Submit the given inputs as one conversational turn.
    Submit {
        image: Option<String>,
        metrics: Option<String>,
        note: Option<String>,
    },
    /// Not a command - treat the line as a plain chat note.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/history" => CommandResult::ShowHistory,
        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("Stride CLI v{}", env!("CARGO_PKG_VERSION"))),

        "/image" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /image <path> [note]".into())
            } else {
                let (path, note) = split_path_and_note(arg);
                CommandResult::Submit {
                    image: Some(path),
                    metrics: None,
                    note,
                }
            }
        }
        "/metrics" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /metrics <path> [note]".into())
            } else {
                let (path, note) = split_path_and_note(arg);
                CommandResult::Submit {
                    image: None,
                    metrics: Some(path),
                    note,
                }
            }
        }
        "/review" => {
            let mut tokens = arg.split_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some(image), Some(metrics)) => {
                    let note = tokens.collect::<Vec<_>>().join(" ");
                    CommandResult::Submit {
                        image: Some(image.to_string()),
                        metrics: Some(metrics.to_string()),
                        note: if note.is_empty() { None } else { Some(note) },
                    }
                }
                _ => CommandResult::Message(
                    "Usage: /review <image-path> <metrics-path> [note]".into(),
                ),
            }
        }

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

/// First whitespace-separated token is the path; anything after it is an
/// optional free-text note.
fn split_path_and_note(arg: &str) -> (String, Option<String>) {
    let mut tokens = arg.split_whitespace();
    let path = tokens.next().unwrap_or_default().to_string();
    let note = tokens.collect::<Vec<_>>().join(" ");
    let note = if note.is_empty() { None } else { Some(note) };
    (path, note)
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ Stride Commands ──────────────────────────────────────────────╮

  CHAT
    <any text>                Ask the coach a question or log a note
    /image <path> [note]      Get feedback on a workout screenshot
    /metrics <path> [note]    Get feedback on a JSON metrics file
    /review <image> <metrics> [note]
                              Submit a screenshot and metrics together

  SESSION
    /history                  Print the conversation so far
    /status                   Show model, history file, and turn count

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit (the conversation is saved on exit)

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
