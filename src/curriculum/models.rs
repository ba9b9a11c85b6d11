use serde::Serialize;

/// A unit of the curriculum with its ordered topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: &'static str,
    pub name: &'static str,
    pub topics: &'static [Topic],
}

impl Unit {
    /// Look up a topic of this unit by id
    pub fn topic(&self, topic_id: &str) -> Option<&'static Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: &'static str,
    pub name: &'static str,
}

/// The (unit, topic) pair a student is looking at.
///
/// Names are what the content generator is prompted with; ids key the cache
/// and decide whether a fetch still belongs to the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSelection {
    pub unit_id: String,
    pub unit_name: String,
    pub topic_id: String,
    pub topic_name: String,
}

impl TopicSelection {
    pub fn new(unit: &Unit, topic: &Topic) -> Self {
        Self {
            unit_id: unit.id.to_string(),
            unit_name: unit.name.to_string(),
            topic_id: topic.id.to_string(),
            topic_name: topic.name.to_string(),
        }
    }
}
