mod log;
pub mod persistence;

pub use log::ConversationLog;
pub use persistence::{persist, restore, SavedTurn, ATTACHMENT_PLACEHOLDER};
