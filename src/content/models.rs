//! Data models for generated topic content

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest options a checkpoint question may offer
pub const MIN_OPTIONS: usize = 2;

/// Most options a checkpoint question may offer
pub const MAX_OPTIONS: usize = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContentError {
    #[error("Checkpoint needs 2-4 options, got {0}")]
    OptionCount(usize),

    #[error("Correct answer index {index} is out of range for {options} options")]
    AnswerOutOfRange { index: usize, options: usize },
}

/// Everything generated for one topic, produced wholesale by one remote call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    /// Study notes in markdown
    pub notes: String,
    #[serde(default)]
    pub visuals: Vec<VisualPrompt>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    pub lab: LabGuide,
}

impl ContentBundle {
    /// A bundle with nothing a student could study from
    pub fn is_empty(&self) -> bool {
        self.notes.trim().is_empty()
            && self.visuals.is_empty()
            && self.flashcards.is_empty()
            && self.checkpoints.is_empty()
            && self.lab.procedure.is_empty()
    }
}

/// A description of a diagram to generate, with the caption shown under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualPrompt {
    pub prompt: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// The term or concept
    pub front: String,
    /// The definition or explanation
    pub back: String,
}

/// Unvalidated checkpoint as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointRecord {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: i64,
    #[serde(default)]
    pub explanation: String,
}

/// A multiple choice question whose correct answer is always a valid option.
///
/// Only constructible through [`Checkpoint::new`] (or deserialization, which
/// goes through the same checks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CheckpointRecord", into = "CheckpointRecord")]
pub struct Checkpoint {
    question: String,
    options: Vec<String>,
    correct_answer_index: usize,
    explanation: String,
}

impl Checkpoint {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, ContentError> {
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(ContentError::OptionCount(options.len()));
        }
        if correct_answer_index >= options.len() {
            return Err(ContentError::AnswerOutOfRange {
                index: correct_answer_index,
                options: options.len(),
            });
        }

        Ok(Self {
            question: question.into(),
            options,
            correct_answer_index,
            explanation: explanation.into(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer_index
    }
}

impl TryFrom<CheckpointRecord> for Checkpoint {
    type Error = ContentError;

    fn try_from(record: CheckpointRecord) -> Result<Self, Self::Error> {
        let options = record.options.len();
        let index = usize::try_from(record.correct_answer_index)
            .map_err(|_| ContentError::AnswerOutOfRange { index: usize::MAX, options })?;
        Checkpoint::new(record.question, record.options, index, record.explanation)
    }
}

impl From<Checkpoint> for CheckpointRecord {
    fn from(checkpoint: Checkpoint) -> Self {
        Self {
            question: checkpoint.question,
            options: checkpoint.options,
            correct_answer_index: checkpoint.correct_answer_index as i64,
            explanation: checkpoint.explanation,
        }
    }
}

/// A virtual lab experiment guide
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabGuide {
    pub title: String,
    pub objective: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub procedure: Vec<String>,
    #[serde(default)]
    pub safety: String,
}

/// A generated diagram, paired with the caption of the prompt it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    /// Data URI or remote URL
    pub url: String,
    pub caption: String,
}

impl ResolvedImage {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }

    /// Short description of where the image lives, for text-only displays.
    ///
    /// Data URIs are summarised as `image/png, 12 KB` instead of dumping the payload.
    pub fn describe_source(&self) -> String {
        match self.url.strip_prefix("data:") {
            Some(rest) => {
                let (mime, payload) = rest.split_once(',').unwrap_or((rest, ""));
                let mime = mime.trim_end_matches(";base64");
                // base64 encodes 3 bytes in 4 characters
                let bytes = payload.len() / 4 * 3;
                format!("{}, {} KB", mime, bytes.div_ceil(1024))
            }
            None => self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Option {}", i)).collect()
    }

    #[test]
    fn test_checkpoint_accepts_valid_index() {
        let cp = Checkpoint::new("Powerhouse of the cell?", options(4), 3, "Mitochondria").unwrap();
        assert_eq!(cp.correct_answer_index(), 3);
        assert!(cp.is_correct(3));
        assert!(!cp.is_correct(0));
    }

    #[test]
    fn test_checkpoint_rejects_out_of_range_index() {
        let err = Checkpoint::new("Q", options(3), 3, "").unwrap_err();
        assert_eq!(err, ContentError::AnswerOutOfRange { index: 3, options: 3 });
    }

    #[test]
    fn test_checkpoint_rejects_option_count() {
        assert_eq!(
            Checkpoint::new("Q", options(1), 0, "").unwrap_err(),
            ContentError::OptionCount(1)
        );
        assert_eq!(
            Checkpoint::new("Q", options(5), 0, "").unwrap_err(),
            ContentError::OptionCount(5)
        );
    }

    #[test]
    fn test_checkpoint_deserialize_validates() {
        let bad = r#"{"question":"Q","options":["a","b"],"correctAnswerIndex":-1,"explanation":""}"#;
        assert!(serde_json::from_str::<Checkpoint>(bad).is_err());

        let bad = r#"{"question":"Q","options":["a","b"],"correctAnswerIndex":2,"explanation":""}"#;
        assert!(serde_json::from_str::<Checkpoint>(bad).is_err());

        let good = r#"{"question":"Q","options":["a","b"],"correctAnswerIndex":1,"explanation":"b"}"#;
        let cp: Checkpoint = serde_json::from_str(good).unwrap();
        assert_eq!(cp.options(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_bundle_is_empty() {
        let mut bundle = ContentBundle {
            notes: "  \n".to_string(),
            visuals: Vec::new(),
            flashcards: Vec::new(),
            checkpoints: Vec::new(),
            lab: LabGuide::default(),
        };
        assert!(bundle.is_empty());

        bundle.notes = "# Osmosis".to_string();
        assert!(!bundle.is_empty());
    }

    #[test]
    fn test_describe_source() {
        let image = ResolvedImage::new("data:image/png;base64,AAAAAAAA", "Cell");
        assert_eq!(image.describe_source(), "image/png, 1 KB");

        let remote = ResolvedImage::new("https://example.com/cell.png", "Cell");
        assert_eq!(remote.describe_source(), "https://example.com/cell.png");
    }
}
