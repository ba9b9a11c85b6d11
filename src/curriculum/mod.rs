//! Static biology curriculum: units, topics and topic selections.

mod catalog;
mod models;

pub use catalog::{find_topic_by_id, find_unit, CatalogError, CURRICULUM};
pub use models::{Topic, TopicSelection, Unit};
