pub mod cache;
pub mod config;
pub mod content;
pub mod curriculum;
pub mod genai;
pub mod orchestrator;
pub mod study;

pub use cache::{CacheEntry, CacheKey, SharedCache, TopicContentCache};
pub use config::{AppConfig, ConfigError};
pub use content::ContentBundle;
pub use curriculum::{Topic, TopicSelection, Unit, CURRICULUM};
pub use genai::{ContentGenerator, GeminiClient, GenerationError};
pub use orchestrator::{FetchError, FetchPhase, TopicContentOrchestrator, TopicViewState};
