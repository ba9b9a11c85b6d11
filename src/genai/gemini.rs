use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::error::GenerationError;
use super::prompts::{content_schema, image_prompt, topic_prompt, SYSTEM_INSTRUCTION};
use super::wire::{
    ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    RequestContent, TopicContentPayload,
};
use super::ContentGenerator;
use crate::config::GenAiConfig;
use crate::content::ContentBundle;

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new client. Fails fast when no API key is configured.
    pub fn new(config: &GenAiConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .require_api_key()
            .map_err(|_| GenerationError::MissingCredential)?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = endpoint(&self.base_url, model);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS {
                log::warn!("Rate limited by provider on {}", model);
            }
            return Err(GenerationError::Remote {
                status: status.as_u16(),
                message: ErrorEnvelope::describe(&body),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn endpoint(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model)
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_topic_content(
        &self,
        unit_name: &str,
        topic_name: &str,
    ) -> Result<Option<ContentBundle>, GenerationError> {
        let mut request = GenerateContentRequest::text(topic_prompt(unit_name, topic_name));
        request.system_instruction = Some(RequestContent::system(SYSTEM_INSTRUCTION));
        request.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(content_schema()),
            ..Default::default()
        });

        let response = self.generate(&self.text_model, &request).await?;
        let Some(text) = response.text() else {
            log::warn!(
                "No text content for topic '{}' (finish reason: {:?})",
                topic_name,
                response.candidates.first().and_then(|c| c.finish_reason.as_deref())
            );
            return Ok(None);
        };

        let payload: TopicContentPayload = serde_json::from_str(&text)?;
        Ok(Some(payload.into_bundle()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GenerationError> {
        let mut request = GenerateContentRequest::text(image_prompt(prompt));
        request.generation_config = Some(GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            ..Default::default()
        });

        let response = self.generate(&self.image_model, &request).await?;
        Ok(response.image_data_uri())
    }
}
