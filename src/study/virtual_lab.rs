use std::collections::BTreeSet;

use thiserror::Error;

use crate::content::LabGuide;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    #[error("Step {step} does not exist, the procedure has {steps} step(s)")]
    StepOutOfRange { step: usize, steps: usize },
}

/// Checklist over a lab procedure.
///
/// Steps are ticked independently and in any order. The start flag only
/// records that the student got past the materials and safety briefing.
#[derive(Debug, Clone, Default)]
pub struct VirtualLab {
    guide: LabGuide,
    completed: BTreeSet<usize>,
    started: bool,
}

impl VirtualLab {
    pub fn new(guide: LabGuide) -> Self {
        Self {
            guide,
            completed: BTreeSet::new(),
            started: false,
        }
    }

    pub fn guide(&self) -> &LabGuide {
        &self.guide
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Flip a step between done and not done, returning its new state
    pub fn toggle_step(&mut self, step: usize) -> Result<bool, LabError> {
        let steps = self.guide.procedure.len();
        if step >= steps {
            return Err(LabError::StepOutOfRange { step, steps });
        }
        if self.completed.remove(&step) {
            Ok(false)
        } else {
            self.completed.insert(step);
            Ok(true)
        }
    }

    pub fn is_step_done(&self, step: usize) -> bool {
        self.completed.contains(&step)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Percentage of completed steps, rounded half up; 0 without a procedure
    pub fn progress(&self) -> u8 {
        let total = self.guide.procedure.len();
        if total == 0 {
            return 0;
        }
        ((self.completed.len() * 100 + total / 2) / total) as u8
    }

    pub fn is_complete(&self) -> bool {
        !self.guide.procedure.is_empty() && self.completed.len() == self.guide.procedure.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_of(steps: usize) -> VirtualLab {
        VirtualLab::new(LabGuide {
            title: "Leaf disk assay".to_string(),
            objective: "Measure photosynthesis rate".to_string(),
            materials: vec!["spinach".to_string(), "syringe".to_string()],
            procedure: (0..steps).map(|i| format!("Step {}", i + 1)).collect(),
            safety: "Wear goggles".to_string(),
        })
    }

    #[test]
    fn test_all_steps_complete() {
        let mut lab = lab_of(3);
        for step in 0..3 {
            assert_eq!(lab.toggle_step(step), Ok(true));
        }
        assert_eq!(lab.progress(), 100);
        assert!(lab.is_complete());

        assert_eq!(lab.toggle_step(1), Ok(false));
        assert!(lab.progress() < 100);
        assert!(!lab.is_complete());
    }

    #[test]
    fn test_progress_rounds() {
        let mut lab = lab_of(3);
        lab.toggle_step(2).unwrap();
        assert_eq!(lab.progress(), 33);
        lab.toggle_step(0).unwrap();
        assert_eq!(lab.progress(), 67);

        let mut lab = lab_of(8);
        lab.toggle_step(5).unwrap();
        assert_eq!(lab.progress(), 13);
    }

    #[test]
    fn test_empty_procedure_never_completes() {
        let lab = lab_of(0);
        assert_eq!(lab.progress(), 0);
        assert!(!lab.is_complete());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut lab = lab_of(2);
        assert_eq!(
            lab.toggle_step(2),
            Err(LabError::StepOutOfRange { step: 2, steps: 2 })
        );
        assert_eq!(lab.completed_count(), 0);
    }

    #[test]
    fn test_start_flag() {
        let mut lab = lab_of(2);
        assert!(!lab.is_started());
        lab.start();
        assert!(lab.is_started());
    }
}
