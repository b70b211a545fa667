use crate::api::QuizQuestion;
use crate::error::QuizError;

/// Where the round currently is. Loading happens before construction, in
/// [`QuizRound::load`](super::load); `Done` is reached exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Active(usize),
    Results,
    Done,
}

/// Outcome of an [`QuizRound::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// The active question is unanswered; nothing happened.
    Blocked,
    /// Moved to the next question.
    Next(usize),
    /// Last question answered; the round is showing results.
    Completed { score: f64 },
}

/// Per-question entry for the results view.
#[derive(Debug, Clone, Copy)]
pub struct QuestionReview<'a> {
    pub question: &'a QuizQuestion,
    pub selected: Option<usize>,
    pub correct: bool,
}

#[derive(Debug)]
pub struct QuizRound {
    questions: Vec<QuizQuestion>,
    /// One slot per question; `None` is the unanswered sentinel.
    answers: Vec<Option<usize>>,
    state: QuizState,
}

impl QuizRound {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            state: QuizState::Active(0),
        })
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn active_question(&self) -> Option<(usize, &QuizQuestion)> {
        match self.state {
            QuizState::Active(index) => Some((index, &self.questions[index])),
            _ => None,
        }
    }

    /// Overwrite the answer slot for the active question. Idempotent; allowed
    /// only while that question is the active one.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        let QuizState::Active(active) = self.state else {
            return Err(QuizError::NotActive);
        };
        if question != active {
            return Err(QuizError::NotActiveQuestion {
                requested: question,
                active,
            });
        }
        if option >= self.questions[question].options.len() {
            return Err(QuizError::OptionOutOfRange { question, option });
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Move on: to the next question if the active one is answered, or into
    /// the results view after the last. A no-op while unanswered.
    pub fn advance(&mut self) -> Advance {
        let QuizState::Active(active) = self.state else {
            return Advance::Blocked;
        };
        if self.answers[active].is_none() {
            return Advance::Blocked;
        }
        if active + 1 < self.questions.len() {
            self.state = QuizState::Active(active + 1);
            Advance::Next(active + 1)
        } else {
            self.state = QuizState::Results;
            Advance::Completed {
                score: self.score(),
            }
        }
    }

    /// Percentage of answers matching their question's correct index.
    pub fn score(&self) -> f64 {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_index))
            .count();
        (correct as f64 / self.questions.len() as f64) * 100.0
    }

    pub fn review(&self) -> impl Iterator<Item = QuestionReview<'_>> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, selected)| QuestionReview {
                question,
                selected: *selected,
                correct: *selected == Some(question.correct_index),
            })
    }

    /// Leave the results view. Returns the final score the first time only.
    pub fn finish(&mut self) -> Option<f64> {
        if self.state == QuizState::Results {
            self.state = QuizState::Done;
            Some(self.score())
        } else {
            None
        }
    }
}
