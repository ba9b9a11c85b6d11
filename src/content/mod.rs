//! Study material generated per topic
//!
//! This module provides:
//! - The content bundle (notes, visual prompts, flashcards, checkpoints, lab)
//! - Checkpoint validation, so a correct answer always points at an option
//! - Resolved diagram images paired with their captions

mod models;

pub use models::*;
