//! Per-session progress: questions, answers, score and time.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::models::{Difficulty, Question, Selection};

/// One finished question as shown in the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub question: &'a Question,
    /// `None` when the question timed out.
    pub answer: Option<u32>,
    pub correct: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    difficulty: Difficulty,
    operands: BTreeSet<u32>,
    questions: Vec<Question>,
    index: usize,
    results: Vec<bool>,
    answers: Vec<Option<u32>>,
    score: usize,
    elapsed: Duration,
    started_at: Option<Instant>,
    last_result: Option<bool>,
}

impl Session {
    pub(crate) fn start(selection: &Selection, questions: Vec<Question>, now: Instant) -> Self {
        let capacity = questions.len();
        Self {
            difficulty: selection.difficulty(),
            operands: selection.operands().clone(),
            questions,
            index: 0,
            results: Vec::with_capacity(capacity),
            answers: Vec::with_capacity(capacity),
            score: 0,
            elapsed: Duration::ZERO,
            started_at: Some(now),
            last_result: None,
        }
    }

    /// Move to the next question and start its clock.
    pub(crate) fn advance(&mut self, now: Instant) {
        self.index += 1;
        self.started_at = Some(now);
        self.last_result = None;
    }

    /// Close the in-flight question. `None` records a timeout.
    pub(crate) fn finalize(&mut self, answer: Option<u32>, now: Instant) -> bool {
        let correct = match (self.current_question(), answer) {
            (Some(question), Some(answer)) => question.is_correct(answer),
            _ => false,
        };

        self.elapsed += self.question_elapsed(now);
        self.started_at = None;
        self.results.push(correct);
        self.answers.push(answer);
        self.last_result = Some(correct);
        if correct {
            self.score += 1;
        }

        correct
    }

    pub(crate) fn has_more(&self) -> bool {
        self.index + 1 < self.questions.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn operands(&self) -> &BTreeSet<u32> {
        &self.operands
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Correctness of each finished question, in order.
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Total time spent on finished questions.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Outcome of the question just finished, cleared when the next one starts.
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    /// The answer given to the question just finished.
    pub fn last_answer(&self) -> Option<u32> {
        self.answers.last().copied().flatten()
    }

    /// Time spent on the in-flight question, zero when none is open.
    pub fn question_elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default()
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.questions
            .iter()
            .zip(self.answers.iter().zip(self.results.iter()))
            .map(|(question, (&answer, &correct))| Record {
                question,
                answer,
                correct,
            })
    }
}
