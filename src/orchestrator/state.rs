use serde::Serialize;

use crate::cache::CacheEntry;
use crate::content::{ContentBundle, ResolvedImage};
use crate::curriculum::TopicSelection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchPhase {
    /// Nothing selected yet
    #[default]
    Idle,
    FetchingText,
    /// Text is shown, diagrams are still being generated
    ImagesFetching,
    Ready,
    Failed,
}

/// What the views render for the active selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicViewState {
    /// Selection generation this state was published for
    pub generation: u64,
    pub selection: Option<TopicSelection>,
    pub phase: FetchPhase,
    pub content: Option<ContentBundle>,
    pub images: Vec<ResolvedImage>,
    pub loading: bool,
    pub image_loading: bool,
    pub error: Option<String>,
}

impl TopicViewState {
    pub(crate) fn fetching(generation: u64, selection: TopicSelection) -> Self {
        Self {
            generation,
            selection: Some(selection),
            phase: FetchPhase::FetchingText,
            loading: true,
            ..Self::default()
        }
    }

    pub(crate) fn ready(generation: u64, selection: TopicSelection, entry: &CacheEntry) -> Self {
        Self {
            generation,
            selection: Some(selection),
            phase: FetchPhase::Ready,
            content: Some(entry.bundle.clone()),
            images: entry.images.clone(),
            ..Self::default()
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == FetchPhase::Ready
    }

    pub fn is_failed(&self) -> bool {
        self.phase == FetchPhase::Failed
    }

    /// Whether anything is still being generated
    pub fn is_busy(&self) -> bool {
        self.loading || self.image_loading
    }
}
