//! Topic content fetching.
//!
//! This module provides:
//! - The orchestrator that turns a topic selection into published view states
//! - Cache hits without remote calls, bounded backoff on rate limits
//! - Image resolution that tolerates individual failures
//! - Staleness detection so a superseded fetch never reaches the views

mod delay;
mod engine;
mod error;
mod settings;
mod state;

pub use delay::{Delay, TokioDelay};
pub use engine::TopicContentOrchestrator;
pub use error::FetchError;
pub use settings::{FetchSettings, ImageStrategy};
pub use state::{FetchPhase, TopicViewState};
