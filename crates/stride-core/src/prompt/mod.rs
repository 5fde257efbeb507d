mod assembler;
pub mod template;

pub use assembler::{Assembler, PromptInput, DEFAULT_IMAGE_PROMPT};
