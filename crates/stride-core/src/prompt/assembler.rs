use crate::error::{CoachError, Result};
use crate::llm::Fragment;
use crate::loader;
use crate::prompt::template;
use std::collections::HashMap;
use std::path::PathBuf;

/// Sent ahead of the image when the user attached a screenshot and nothing
/// else - the model needs at least one instruction to act on.
pub const DEFAULT_IMAGE_PROMPT: &str = "Analyze this image.";

/// What the user handed us for one submission. All parts are optional;
/// assembly fails only when all three are absent.
#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    pub note: Option<String>,
    pub metrics_path: Option<PathBuf>,
    pub image_path: Option<PathBuf>,
}

impl PromptInput {
    pub fn from_note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Default::default()
        }
    }
}

/// Turns a [`PromptInput`] into the ordered fragments of one user turn.
pub struct Assembler {
    template_path: PathBuf,
}

impl Assembler {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    /// Composition rules, in precedence order:
    ///
    /// 1. A metrics file is loaded and rendered through the feedback
    ///    template together with the note, and leads the turn. The note is
    ///    consumed here and must not reappear verbatim later.
    /// 2. An image becomes an inline fragment; an image with no note and no
    ///    metrics gets [`DEFAULT_IMAGE_PROMPT`] prepended.
    /// 3. A note that rule 1 did not consume trails the turn.
    /// 4. Nothing at all is an error, not an empty submission.
    pub fn assemble(&self, input: &PromptInput) -> Result<Vec<Fragment>> {
        let mut fragments = Vec::new();
        let mut note_consumed = false;

        if let Some(ref metrics_path) = input.metrics_path {
            let run_data = loader::load_metrics(metrics_path)?;
            let mut vars = HashMap::new();
            vars.insert(
                "run_data".to_string(),
                serde_json::to_string_pretty(&run_data)?,
            );
            vars.insert(
                "custom_note".to_string(),
                input.note.clone().unwrap_or_default(),
            );
            let rendered = template::render(&self.template_path, &vars)?;
            fragments.push(Fragment::Text(rendered));
            note_consumed = true;
        }

        if let Some(ref image_path) = input.image_path {
            if fragments.is_empty() && input.note.is_none() {
                fragments.push(Fragment::text(DEFAULT_IMAGE_PROMPT));
            }
            fragments.push(Fragment::image_from_file(image_path)?);
        }

        if let Some(ref note) = input.note {
            if !note_consumed {
                fragments.push(Fragment::text(note.clone()));
            }
        }

        if fragments.is_empty() {
            return Err(CoachError::NoInput);
        }
        Ok(fragments)
    }
}
