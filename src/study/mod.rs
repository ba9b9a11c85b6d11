//! Local state of the study views.
//!
//! Each view is a small synchronous state machine over content produced by
//! the orchestrator. None of them talk to the network.

mod checkpoint_quiz;
mod flashcard_deck;
mod notebook;
mod sidebar;
mod virtual_lab;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::content::ContentBundle;

pub use checkpoint_quiz::{CheckpointQuiz, QuestionFeedback, QuizError, QuizScore};
pub use flashcard_deck::FlashcardDeck;
pub use notebook::{Gallery, NotebookPage, PLACEHOLDER_FIGURES};
pub use sidebar::{Sidebar, SidebarRow};
pub use virtual_lab::{LabError, VirtualLab};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyTab {
    #[default]
    Notes,
    Flashcards,
    Checkpoints,
    Lab,
}

impl StudyTab {
    pub const ALL: [StudyTab; 4] = [
        StudyTab::Notes,
        StudyTab::Flashcards,
        StudyTab::Checkpoints,
        StudyTab::Lab,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StudyTab::Notes => "notes",
            StudyTab::Flashcards => "flashcards",
            StudyTab::Checkpoints => "checkpoints",
            StudyTab::Lab => "lab",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StudyTab::Notes => "Notes",
            StudyTab::Flashcards => "Flashcards",
            StudyTab::Checkpoints => "Checkpoints",
            StudyTab::Lab => "Virtual Lab",
        }
    }
}

impl fmt::Display for StudyTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StudyTab {
    type Err = String;

    /// Accepts the id or the label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        StudyTab::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(needle) || tab.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("Unknown tab: {}", s))
    }
}

/// The interactive views of one topic, rebuilt whenever its content changes
#[derive(Debug, Clone)]
pub struct StudyViews {
    pub deck: FlashcardDeck,
    pub quiz: CheckpointQuiz,
    pub lab: VirtualLab,
}

impl StudyViews {
    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        Self {
            deck: FlashcardDeck::new(bundle.flashcards.clone()),
            quiz: CheckpointQuiz::new(bundle.checkpoints.clone()),
            lab: VirtualLab::new(bundle.lab.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_labels() {
        let labels: Vec<&str> = StudyTab::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["Notes", "Flashcards", "Checkpoints", "Virtual Lab"]);
        assert_eq!(StudyTab::default(), StudyTab::Notes);
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("lab".parse::<StudyTab>(), Ok(StudyTab::Lab));
        assert_eq!("Virtual Lab".parse::<StudyTab>(), Ok(StudyTab::Lab));
        assert_eq!(" CHECKPOINTS ".parse::<StudyTab>(), Ok(StudyTab::Checkpoints));
        assert!("quiz".parse::<StudyTab>().is_err());
    }
}
