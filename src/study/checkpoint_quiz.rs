use std::fmt;

use thiserror::Error;

use crate::content::Checkpoint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Answers are locked until the quiz is reset")]
    Submitted,

    #[error("No question {0}")]
    QuestionOutOfRange(usize),

    #[error("Question {question} has no option {option}")]
    OptionOutOfRange { question: usize, option: usize },

    #[error("{0} question(s) still unanswered")]
    Incomplete(usize),

    #[error("This topic has no checkpoint questions")]
    NoQuestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {} / {}", self.correct, self.total)
    }
}

/// How one question went, available once the quiz is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFeedback<'a> {
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: &'a str,
}

/// Multiple choice quiz over a topic's checkpoints.
///
/// Answers can be changed freely until submission, which requires every
/// question to be answered and locks them until [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct CheckpointQuiz {
    questions: Vec<Checkpoint>,
    answers: Vec<Option<usize>>,
    submitted: bool,
}

impl CheckpointQuiz {
    pub fn new(questions: Vec<Checkpoint>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            submitted: false,
        }
    }

    pub fn questions(&self) -> &[Checkpoint] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    pub fn select(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        if self.submitted {
            return Err(QuizError::Submitted);
        }
        let checkpoint = self
            .questions
            .get(question)
            .ok_or(QuizError::QuestionOutOfRange(question))?;
        if option >= checkpoint.options().len() {
            return Err(QuizError::OptionOutOfRange { question, option });
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    pub fn unanswered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_none()).count()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitted && !self.questions.is_empty() && self.unanswered() == 0
    }

    pub fn submit(&mut self) -> Result<QuizScore, QuizError> {
        if self.submitted {
            return Err(QuizError::Submitted);
        }
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let unanswered = self.unanswered();
        if unanswered > 0 {
            return Err(QuizError::Incomplete(unanswered));
        }
        self.submitted = true;
        Ok(self.score())
    }

    /// Number of answers matching the correct option
    pub fn score(&self) -> QuizScore {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| a.is_some_and(|a| q.is_correct(a)))
            .count();
        QuizScore {
            correct,
            total: self.questions.len(),
        }
    }

    pub fn feedback(&self, question: usize) -> Option<QuestionFeedback<'_>> {
        if !self.submitted {
            return None;
        }
        let checkpoint = self.questions.get(question)?;
        let selected = self.answer(question);
        Some(QuestionFeedback {
            selected,
            correct_index: checkpoint.correct_answer_index(),
            is_correct: selected.is_some_and(|s| checkpoint.is_correct(s)),
            explanation: checkpoint.explanation(),
        })
    }

    /// Clear every answer and unlock the quiz
    pub fn reset(&mut self) {
        self.answers = vec![None; self.questions.len()];
        self.submitted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> CheckpointQuiz {
        let question = |q: &str, correct: usize| {
            Checkpoint::new(
                q,
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                correct,
                format!("{} is right", correct),
            )
            .unwrap()
        };
        CheckpointQuiz::new(vec![question("One", 0), question("Two", 2), question("Three", 1)])
    }

    #[test]
    fn test_unanswered_quiz_cannot_submit() {
        let mut quiz = quiz();
        assert!(!quiz.can_submit());
        quiz.select(0, 0).unwrap();
        assert_eq!(quiz.submit(), Err(QuizError::Incomplete(2)));
        assert!(!quiz.is_submitted());
    }

    #[test]
    fn test_empty_quiz_cannot_submit() {
        let mut quiz = CheckpointQuiz::new(Vec::new());
        assert!(!quiz.can_submit());
        assert_eq!(quiz.submit(), Err(QuizError::NoQuestions));
        assert!(!quiz.is_submitted());
    }

    #[test]
    fn test_all_correct_scores_full() {
        let mut quiz = quiz();
        quiz.select(0, 0).unwrap();
        quiz.select(1, 2).unwrap();
        quiz.select(2, 1).unwrap();
        assert!(quiz.can_submit());

        let score = quiz.submit().unwrap();
        assert_eq!(score, QuizScore { correct: 3, total: 3 });
        assert!(score.is_perfect());
        assert_eq!(score.to_string(), "Score: 3 / 3");
    }

    #[test]
    fn test_answers_lock_after_submit() {
        let mut quiz = quiz();
        quiz.select(0, 1).unwrap();
        quiz.select(1, 2).unwrap();
        quiz.select(2, 2).unwrap();
        assert_eq!(quiz.submit().unwrap().correct, 1);

        assert_eq!(quiz.select(0, 0), Err(QuizError::Submitted));
        assert_eq!(quiz.submit(), Err(QuizError::Submitted));
        assert_eq!(quiz.answer(0), Some(1));
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let mut quiz = quiz();
        assert_eq!(quiz.select(3, 0), Err(QuizError::QuestionOutOfRange(3)));
        assert_eq!(
            quiz.select(0, 3),
            Err(QuizError::OptionOutOfRange { question: 0, option: 3 })
        );
    }

    #[test]
    fn test_feedback_after_submit() {
        let mut quiz = quiz();
        quiz.select(0, 2).unwrap();
        quiz.select(1, 2).unwrap();
        quiz.select(2, 1).unwrap();
        assert!(quiz.feedback(0).is_none());

        quiz.submit().unwrap();
        let feedback = quiz.feedback(0).unwrap();
        assert_eq!(feedback.selected, Some(2));
        assert_eq!(feedback.correct_index, 0);
        assert!(!feedback.is_correct);
        assert_eq!(feedback.explanation, "0 is right");
        assert!(quiz.feedback(1).unwrap().is_correct);
    }

    #[test]
    fn test_reset_clears_and_unlocks() {
        let mut quiz = quiz();
        quiz.select(0, 0).unwrap();
        quiz.select(1, 0).unwrap();
        quiz.select(2, 0).unwrap();
        quiz.submit().unwrap();

        quiz.reset();
        assert!(!quiz.is_submitted());
        assert_eq!(quiz.unanswered(), 3);
        assert!(quiz.select(1, 1).is_ok());
    }
}
