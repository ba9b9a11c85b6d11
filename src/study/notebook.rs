use chrono::NaiveDate;

use crate::content::ResolvedImage;
use crate::orchestrator::TopicViewState;

/// Number of placeholder figures shown while diagrams are generated
pub const PLACEHOLDER_FIGURES: usize = 2;

/// What the figure area of a notebook page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gallery<'a> {
    Generating { placeholders: usize },
    Figures(&'a [ResolvedImage]),
    Empty,
}

/// The notes tab: a titled, dated page of markdown with its figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookPage<'a> {
    pub title: &'a str,
    pub notes: &'a str,
    pub images: &'a [ResolvedImage],
    pub image_loading: bool,
}

impl<'a> NotebookPage<'a> {
    /// Page for the published state, once its text content has arrived
    pub fn from_state(state: &'a TopicViewState) -> Option<Self> {
        let selection = state.selection.as_ref()?;
        let content = state.content.as_ref()?;
        Some(Self {
            title: &selection.topic_name,
            notes: &content.notes,
            images: &state.images,
            image_loading: state.image_loading,
        })
    }

    pub fn gallery(&self) -> Gallery<'a> {
        if self.image_loading {
            Gallery::Generating {
                placeholders: PLACEHOLDER_FIGURES,
            }
        } else if self.images.is_empty() {
            Gallery::Empty
        } else {
            Gallery::Figures(self.images)
        }
    }

    /// Date line printed under the title
    pub fn date_label(date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBundle, LabGuide};
    use crate::curriculum::find_topic_by_id;
    use crate::orchestrator::FetchPhase;

    fn view_state(image_loading: bool, images: Vec<ResolvedImage>) -> TopicViewState {
        TopicViewState {
            selection: Some(find_topic_by_id("2.1").unwrap()),
            phase: if image_loading {
                FetchPhase::ImagesFetching
            } else {
                FetchPhase::Ready
            },
            content: Some(ContentBundle {
                notes: "# Cells".to_string(),
                visuals: Vec::new(),
                flashcards: Vec::new(),
                checkpoints: Vec::new(),
                lab: LabGuide::default(),
            }),
            images,
            image_loading,
            ..TopicViewState::default()
        }
    }

    #[test]
    fn test_no_page_before_content() {
        assert!(NotebookPage::from_state(&TopicViewState::default()).is_none());
    }

    #[test]
    fn test_placeholder_while_generating() {
        let state = view_state(true, Vec::new());
        let page = NotebookPage::from_state(&state).unwrap();
        assert_eq!(page.title, "Cell Structure & Function");
        assert_eq!(page.gallery(), Gallery::Generating { placeholders: 2 });
    }

    #[test]
    fn test_figures_when_ready() {
        let state = view_state(false, vec![ResolvedImage::new("data:image/png;base64,AA", "Nucleus")]);
        let page = NotebookPage::from_state(&state).unwrap();
        assert!(matches!(page.gallery(), Gallery::Figures(images) if images.len() == 1));

        let state = view_state(false, Vec::new());
        assert_eq!(NotebookPage::from_state(&state).unwrap().gallery(), Gallery::Empty);
    }

    #[test]
    fn test_date_label() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(NotebookPage::date_label(date), "March 7, 2026");
    }
}
