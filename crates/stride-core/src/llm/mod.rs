mod gemini;
mod traits;

pub use gemini::GeminiClient;
pub use traits::*;
