// Library interface for stride-cli
// This allows integration tests to access internal modules

#[path = "commands.rs"]
pub mod commands;

// Re-export commonly used items for easier testing
pub use commands::{handle_command, CommandResult};
