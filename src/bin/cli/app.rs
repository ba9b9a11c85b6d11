use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use biolens_lib::cache::{CacheEntry, TopicContentCache};
use biolens_lib::curriculum::{find_topic_by_id, find_unit, Topic, Unit};
use biolens_lib::{AppConfig, GeminiClient, TopicContentOrchestrator, TopicSelection, CURRICULUM};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
}

impl App {
    /// Load configuration from `config_path` or the default location
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("Failed to load configuration")?;
        Ok(Self { config })
    }

    /// Build an orchestrator over the Gemini client with an empty cache.
    ///
    /// Fails here, before any request, when no API key is configured.
    pub fn orchestrator(&self) -> Result<Arc<TopicContentOrchestrator>> {
        self.config.genai.require_api_key()?;
        let client = GeminiClient::new(&self.config.genai)
            .context("Failed to create the content generation client")?;

        Ok(Arc::new(TopicContentOrchestrator::new(
            Arc::new(client),
            TopicContentCache::shared(),
            self.config.fetch.to_settings(),
        )))
    }

    /// Resolve `query` and fetch its content, for the one-shot commands
    pub async fn load_topic(&self, query: &str) -> Result<(TopicSelection, Arc<CacheEntry>)> {
        let (unit, topic) = resolve_topic(query)?;
        let selection = TopicSelection::new(unit, topic);
        let orchestrator = self.orchestrator()?;

        eprintln!("Generating study materials for {}...", selection.topic_name);
        let entry = orchestrator
            .select(selection.clone())
            .await
            .with_context(|| format!("Error loading content for '{}'", selection.topic_name))?;
        Ok((selection, entry))
    }
}

/// Find a topic by id (`2.4`) or by name (case-insensitive, exact then prefix match)
pub fn resolve_topic(query: &str) -> Result<(&'static Unit, &'static Topic)> {
    let query = query.trim();

    if let Ok(selection) = find_topic_by_id(query) {
        let unit = find_unit(&selection.unit_id)?;
        if let Some(topic) = unit.topic(&selection.topic_id) {
            return Ok((unit, topic));
        }
    }

    let topics: Vec<(&'static Unit, &'static Topic)> = CURRICULUM
        .iter()
        .flat_map(|unit| unit.topics.iter().map(move |topic| (unit, topic)))
        .collect();

    let query_lower = query.to_lowercase();

    // Exact match first
    if let Some(found) = topics.iter().find(|(_, t)| t.name.to_lowercase() == query_lower) {
        return Ok(*found);
    }

    // Prefix match
    let matches: Vec<&(&Unit, &Topic)> = topics
        .iter()
        .filter(|(_, t)| t.name.to_lowercase().starts_with(&query_lower))
        .collect();

    match matches.len() {
        0 => bail!("No topic matching '{}'. Run `biolens units` to list topics", query),
        1 => Ok(*matches[0]),
        _ => bail!(
            "Ambiguous topic name '{}'. Matches:\n{}",
            query,
            matches
                .iter()
                .map(|(_, t)| format!("  - {} {}", t.id, t.name))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_id() {
        let (unit, topic) = resolve_topic("2.4").unwrap();
        assert_eq!(unit.id, "unit-2");
        assert_eq!(topic.name, "Cellular Respiration");
    }

    #[test]
    fn test_resolve_by_name() {
        let (_, topic) = resolve_topic("photosynthesis").unwrap();
        assert_eq!(topic.id, "2.5");

        let (_, topic) = resolve_topic("Bioeth").unwrap();
        assert_eq!(topic.id, "7.3");
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let err = resolve_topic("Cell").unwrap_err().to_string();
        assert!(err.contains("Ambiguous"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(resolve_topic("Astrophysics").is_err());
    }
}
