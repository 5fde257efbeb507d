use crate::error::CoachError;
use base64::Engine as _;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One atomic piece of turn content - plain text or an inline image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Image { media_type: String, data: String },
}

impl Fragment {
    pub fn text(content: impl Into<String>) -> Self {
        Fragment::Text(content.into())
    }

    /// Read an image file and wrap it as a base64 inline fragment.
    pub fn image_from_file(path: impl AsRef<Path>) -> Result<Self, CoachError> {
        let path = path.as_ref();
        let bytes = crate::loader::load_bytes(path)?;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Fragment::Image {
            media_type: guess_media_type(path),
            data,
        })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Fragment::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(s) => Some(s),
            Fragment::Image { .. } => None,
        }
    }
}

fn guess_media_type(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mt = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    };
    mt.to_string()
}

/// One role-tagged exchange unit. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub fragments: Vec<Fragment>,
}

impl Turn {
    pub fn user(fragments: Vec<Fragment>) -> Self {
        Self {
            role: Role::User,
            fragments,
        }
    }

    pub fn assistant(fragments: Vec<Fragment>) -> Self {
        Self {
            role: Role::Assistant,
            fragments,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Copy)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The remote chat-model boundary. One implementation per provider;
/// the session driver only sees this trait.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync + std::fmt::Debug {
    /// Submit the full conversation and get the next reply.
    async fn chat(&self, turns: &[Turn]) -> Result<ChatResponse, CoachError>;
}
