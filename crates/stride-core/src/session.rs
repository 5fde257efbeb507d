use crate::convo::{self, ConversationLog};
use crate::error::Result;
use crate::llm::{ChatModel, Fragment, Turn};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Owns the single long-lived conversation with the remote model.
///
/// Constructed once per process, preloaded with whatever history was
/// restored from disk so the model keeps context across restarts. There is
/// no retry and no concurrency: one submission is in flight at a time, and
/// the caller persists the log on the way out.
pub struct ChatSession {
    model: Box<dyn ChatModel>,
    log: ConversationLog,
    history_path: PathBuf,
}

impl ChatSession {
    pub fn new(
        model: Box<dyn ChatModel>,
        log: ConversationLog,
        history_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model,
            log,
            history_path: history_path.into(),
        }
    }

    /// Submit one assembled user turn and return the model's reply.
    ///
    /// The user turn is appended before the remote call so the log records
    /// intent even when the call fails; a failure propagates unchanged and
    /// appends no assistant turn.
    pub async fn submit(&mut self, fragments: Vec<Fragment>) -> Result<String> {
        debug!(fragments = fragments.len(), "submitting user turn");
        self.log.append(Turn::user(fragments));

        let response = self.model.chat(self.log.turns()).await?;

        self.log
            .append(Turn::assistant(vec![Fragment::text(response.text.clone())]));
        if let Some(usage) = response.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "received reply"
            );
        }
        Ok(response.text)
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Write the conversation to its durable file. Called exactly once, on
    /// every exit path.
    pub fn persist(&self) -> Result<()> {
        convo::persist(&self.log, &self.history_path)
    }
}
