//! Request and response bodies of the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{Checkpoint, CheckpointRecord, ContentBundle, Flashcard, LabGuide, VisualPrompt};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent::user(prompt)],
            system_instruction: None,
            generation_config: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<RequestPart>,
}

impl RequestContent {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![RequestPart { text: text.into() }],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![RequestPart { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of the first candidate, if it has any
    pub fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image of the first candidate as a data URI
    pub fn image_data_uri(&self) -> Option<String> {
        self.parts()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| d.mime_type.starts_with("image/") && !d.data.is_empty())
            .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
    }
}

/// Error body returned by the provider on non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl ErrorEnvelope {
    /// "STATUS: message" from a raw error body, falling back to the body itself
    pub fn describe(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.status.is_empty() => {
                format!("{}: {}", envelope.error.status, envelope.error.message)
            }
            Ok(envelope) => envelope.error.message,
            Err(_) => body.trim().to_string(),
        }
    }
}

/// Topic content exactly as the model returns it.
///
/// Checkpoints stay unvalidated here; [`TopicContentPayload::into_bundle`]
/// drops the ones whose answer index does not point at an option.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicContentPayload {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub visuals: Vec<VisualPrompt>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointRecord>,
    #[serde(default)]
    pub lab: LabGuide,
}

impl TopicContentPayload {
    pub fn into_bundle(self) -> ContentBundle {
        let checkpoints = self
            .checkpoints
            .into_iter()
            .filter_map(|record| {
                let question = record.question.clone();
                match Checkpoint::try_from(record) {
                    Ok(checkpoint) => Some(checkpoint),
                    Err(e) => {
                        log::warn!("Dropping invalid checkpoint {:?}: {}", question, e);
                        None
                    }
                }
            })
            .collect();

        ContentBundle {
            notes: self.notes,
            visuals: self.visuals,
            flashcards: self.flashcards,
            checkpoints,
            lab: self.lab,
        }
    }
}
