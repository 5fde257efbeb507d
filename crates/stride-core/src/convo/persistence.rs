use crate::convo::ConversationLog;
use crate::error::Result;
use crate::llm::{Fragment, Role, Turn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Written in place of non-textual fragments. Uploaded file bytes are not
/// kept across restarts; the marker records that something was attached.
pub const ATTACHMENT_PLACEHOLDER: &str = "[uploaded file]";

/// One record of the durable conversation file: a role tag plus the turn's
/// fragments reduced to plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTurn {
    pub role: String,
    pub parts: Vec<String>,
}

impl SavedTurn {
    fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str().to_string(),
            parts: turn
                .fragments
                .iter()
                .map(|f| match f {
                    Fragment::Text(s) => s.clone(),
                    Fragment::Image { .. } => ATTACHMENT_PLACEHOLDER.to_string(),
                })
                .collect(),
        }
    }

    fn into_turn(self) -> Turn {
        let role = match self.role.as_str() {
            "assistant" => Role::Assistant,
            _ => Role::User,
        };
        Turn {
            role,
            fragments: self.parts.into_iter().map(Fragment::Text).collect(),
        }
    }
}

/// Serialize the full log to `path`. Written temp-then-rename so a crash
/// mid-write cannot leave a truncated history file behind.
pub fn persist(log: &ConversationLog, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let records: Vec<SavedTurn> = log.turns().iter().map(SavedTurn::from_turn).collect();
    let contents = serde_json::to_string_pretty(&records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Rebuild a log from `path`. A missing or malformed file yields an empty
/// log: history is a convenience, and a corrupt file must not block startup.
pub fn restore(path: impl AsRef<Path>) -> ConversationLog {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return ConversationLog::new(),
    };

    let records: Vec<SavedTurn> = match serde_json::from_str(&contents) {
        Ok(r) => r,
        Err(e) => {
            warn!(
                "malformed history file {}: {e}; starting a fresh conversation",
                path.display()
            );
            return ConversationLog::new();
        }
    };

    let mut log = ConversationLog::new();
    for record in records {
        log.append(record.into_turn());
    }
    log
}
