use std::collections::HashSet;

use crate::curriculum::{Topic, TopicSelection, Unit};

/// One visible line of the curriculum sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    Unit {
        unit: &'static Unit,
        expanded: bool,
        current: bool,
    },
    Topic {
        unit: &'static Unit,
        topic: &'static Topic,
        current: bool,
    },
}

/// Curriculum navigation with collapsible units.
///
/// The unit holding the current topic is always shown expanded, whatever its
/// toggle says.
#[derive(Debug, Clone)]
pub struct Sidebar {
    units: &'static [Unit],
    toggled_open: HashSet<&'static str>,
    current: Option<TopicSelection>,
}

impl Sidebar {
    pub fn new(units: &'static [Unit]) -> Self {
        Self {
            units,
            toggled_open: HashSet::new(),
            current: None,
        }
    }

    pub fn units(&self) -> &'static [Unit] {
        self.units
    }

    pub fn toggle_unit(&mut self, unit_id: &str) {
        let Some(unit) = self.units.iter().find(|u| u.id == unit_id) else {
            log::debug!("Ignoring toggle of unknown unit {}", unit_id);
            return;
        };
        if !self.toggled_open.remove(unit.id) {
            self.toggled_open.insert(unit.id);
        }
    }

    pub fn is_current_unit(&self, unit_id: &str) -> bool {
        self.current.as_ref().is_some_and(|s| s.unit_id == unit_id)
    }

    pub fn is_expanded(&self, unit_id: &str) -> bool {
        self.toggled_open.contains(unit_id) || self.is_current_unit(unit_id)
    }

    pub fn current(&self) -> Option<&TopicSelection> {
        self.current.as_ref()
    }

    /// Mark a topic as current and return the selection for it
    pub fn select(&mut self, unit: &'static Unit, topic: &'static Topic) -> TopicSelection {
        let selection = TopicSelection::new(unit, topic);
        self.current = Some(selection.clone());
        selection
    }

    /// Rows in display order: every unit, followed by its topics when expanded
    pub fn rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for unit in self.units {
            let expanded = self.is_expanded(unit.id);
            rows.push(SidebarRow::Unit {
                unit,
                expanded,
                current: self.is_current_unit(unit.id),
            });
            if expanded {
                for topic in unit.topics {
                    let current = self
                        .current
                        .as_ref()
                        .is_some_and(|s| s.unit_id == unit.id && s.topic_id == topic.id);
                    rows.push(SidebarRow::Topic {
                        unit,
                        topic,
                        current,
                    });
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::CURRICULUM;

    #[test]
    fn test_collapsed_by_default() {
        let sidebar = Sidebar::new(CURRICULUM);
        assert_eq!(sidebar.rows().len(), CURRICULUM.len());
        assert!(!sidebar.is_expanded("unit-1"));
    }

    #[test]
    fn test_toggle_unit() {
        let mut sidebar = Sidebar::new(CURRICULUM);
        sidebar.toggle_unit("unit-3");
        assert!(sidebar.is_expanded("unit-3"));
        assert_eq!(sidebar.rows().len(), CURRICULUM.len() + 5);

        sidebar.toggle_unit("unit-3");
        assert!(!sidebar.is_expanded("unit-3"));
    }

    #[test]
    fn test_current_unit_always_expanded() {
        let mut sidebar = Sidebar::new(CURRICULUM);
        let unit = &CURRICULUM[1];
        let selection = sidebar.select(unit, &unit.topics[3]);
        assert_eq!(selection.topic_id, "2.4");
        assert!(sidebar.is_expanded("unit-2"));

        // toggling the current unit closed has no visible effect
        sidebar.toggle_unit("unit-2");
        sidebar.toggle_unit("unit-2");
        sidebar.toggle_unit("unit-2");
        assert!(sidebar.is_expanded("unit-2"));

        let current: Vec<_> = sidebar
            .rows()
            .into_iter()
            .filter(|row| matches!(row, SidebarRow::Topic { current: true, .. }))
            .collect();
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn test_unknown_unit_ignored() {
        let mut sidebar = Sidebar::new(CURRICULUM);
        sidebar.toggle_unit("unit-99");
        assert_eq!(sidebar.rows().len(), CURRICULUM.len());
    }
}
