use thiserror::Error;

use super::models::{Topic, TopicSelection, Unit};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(String),
}

macro_rules! topic {
    ($id:literal, $name:literal) => {
        Topic { id: $id, name: $name }
    };
}

pub static CURRICULUM: &[Unit] = &[
    Unit {
        id: "unit-1",
        name: "1. Foundations of Biology",
        topics: &[
            topic!("1.1", "The Scientific Method"),
            topic!("1.2", "Chemistry of Life"),
            topic!("1.3", "Properties of Water"),
            topic!("1.4", "Carbon & Macromolecules"),
            topic!("1.5", "Enzymes & Reactions"),
        ],
    },
    Unit {
        id: "unit-2",
        name: "2. Cellular Processes",
        topics: &[
            topic!("2.1", "Cell Structure & Function"),
            topic!("2.2", "Cell Membrane Transport"),
            topic!("2.3", "ATP & Energy"),
            topic!("2.4", "Cellular Respiration"),
            topic!("2.5", "Photosynthesis"),
        ],
    },
    Unit {
        id: "unit-3",
        name: "3. Genetics",
        topics: &[
            topic!("3.1", "DNA & RNA Structure"),
            topic!("3.2", "Protein Synthesis"),
            topic!("3.3", "Meiosis & Mitosis"),
            topic!("3.4", "Mendelian Genetics"),
            topic!("3.5", "Genetic Mutations"),
        ],
    },
    Unit {
        id: "unit-4",
        name: "4. Evolution",
        topics: &[
            topic!("4.1", "Natural Selection"),
            topic!("4.2", "Evidence for Evolution"),
            topic!("4.3", "Population Genetics"),
            topic!("4.4", "Speciation"),
            topic!("4.5", "Phylogeny"),
        ],
    },
    Unit {
        id: "unit-5",
        name: "5. Ecology",
        topics: &[
            topic!("5.1", "Ecosystems & Biomes"),
            topic!("5.2", "Energy Flow"),
            topic!("5.3", "Population Ecology"),
            topic!("5.4", "Community Interactions"),
            topic!("5.5", "Human Impact"),
        ],
    },
    Unit {
        id: "unit-6",
        name: "6. Human Biology",
        topics: &[
            topic!("6.1", "Nervous System"),
            topic!("6.2", "Immune System"),
            topic!("6.3", "Circulatory System"),
            topic!("6.4", "Digestive System"),
            topic!("6.5", "Homeostasis"),
        ],
    },
    Unit {
        id: "unit-7",
        name: "7. Applied Biology",
        topics: &[
            topic!("7.1", "Biotechnology"),
            topic!("7.2", "Genetic Engineering"),
            topic!("7.3", "Bioethics"),
            topic!("7.4", "Medicine & Disease"),
            topic!("7.5", "Future of Biology"),
        ],
    },
];

/// Find a unit by its id
pub fn find_unit(unit_id: &str) -> Result<&'static Unit, CatalogError> {
    CURRICULUM
        .iter()
        .find(|u| u.id == unit_id)
        .ok_or_else(|| CatalogError::UnitNotFound(unit_id.to_string()))
}

/// Find a topic anywhere in the curriculum by its id (e.g. "2.4")
pub fn find_topic_by_id(topic_id: &str) -> Result<TopicSelection, CatalogError> {
    CURRICULUM
        .iter()
        .find_map(|unit| unit.topic(topic_id).map(|topic| TopicSelection::new(unit, topic)))
        .ok_or_else(|| CatalogError::TopicNotFound(topic_id.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_curriculum_shape() {
        assert_eq!(CURRICULUM.len(), 7);
        for unit in CURRICULUM {
            assert_eq!(unit.topics.len(), 5, "unit {} should have 5 topics", unit.id);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let unit_ids: HashSet<_> = CURRICULUM.iter().map(|u| u.id).collect();
        assert_eq!(unit_ids.len(), CURRICULUM.len());

        for unit in CURRICULUM {
            let topic_ids: HashSet<_> = unit.topics.iter().map(|t| t.id).collect();
            assert_eq!(topic_ids.len(), unit.topics.len());
        }
    }

    #[test]
    fn test_find_topic_by_id() {
        let selection = find_topic_by_id("2.4").unwrap();
        assert_eq!(selection.unit_id, "unit-2");
        assert_eq!(selection.unit_name, "2. Cellular Processes");
        assert_eq!(selection.topic_name, "Cellular Respiration");

        assert_eq!(
            find_topic_by_id("9.9"),
            Err(CatalogError::TopicNotFound("9.9".to_string()))
        );
    }

    #[test]
    fn test_find_unit() {
        assert_eq!(find_unit("unit-5").unwrap().name, "5. Ecology");
        assert!(find_unit("unit-0").is_err());
    }
}
