use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::content::models::QuizQuestion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Correct,
    Wrong,
}

/// Short-answer quiz over a shuffled question selection.
///
/// Per question the session moves ANSWERING -> REVEALED on `submit`, then
/// either back to ANSWERING for the next question or to the terminal
/// finished state. Score only ever increments, at most once per question.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    user_answer: String,
    outcome: Outcome,
    score: usize,
    finished: bool,
    show_answer: bool,
}

impl QuizSession {
    /// Shuffle the candidate pool uniformly and keep at most `limit`
    /// questions. Pools smaller than the limit are used whole.
    pub fn start(mut pool: Vec<QuizQuestion>, limit: usize, rng: &mut impl Rng) -> Self {
        pool.shuffle(rng);
        pool.truncate(limit);
        Self {
            questions: pool,
            current_index: 0,
            user_answer: String::new(),
            outcome: Outcome::Pending,
            score: 0,
            finished: false,
            show_answer: false,
        }
    }

    /// Retry with the same question set, reshuffled. No refetch.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.questions.shuffle(rng);
        self.current_index = 0;
        self.user_answer.clear();
        self.outcome = Outcome::Pending;
        self.score = 0;
        self.finished = false;
        self.show_answer = false;
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn user_answer(&self) -> &str {
        &self.user_answer
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.current_index as f64 / self.questions.len() as f64
    }

    /// Editing the answer buffer is only allowed before submission; callers
    /// that miss the reveal guard are ignored here rather than trusted.
    pub fn update_answer(&mut self, answer: &str) {
        if self.outcome != Outcome::Pending || self.finished {
            return;
        }
        self.user_answer = answer.to_string();
    }

    pub fn push_answer_char(&mut self, ch: char) {
        if self.outcome != Outcome::Pending || self.finished {
            return;
        }
        self.user_answer.push(ch);
    }

    pub fn pop_answer_char(&mut self) {
        if self.outcome != Outcome::Pending || self.finished {
            return;
        }
        self.user_answer.pop();
    }

    /// Evaluate the current answer. No-op with no current question or when
    /// already revealed. The answer buffer stays visible until `next`.
    pub fn submit(&mut self) {
        if self.show_answer {
            return;
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return;
        };
        if answer_matches(&self.user_answer, &question.correct_answers) {
            self.outcome = Outcome::Correct;
            self.score += 1;
        } else {
            self.outcome = Outcome::Wrong;
        }
        self.show_answer = true;
    }

    /// Advance past a revealed question. At the last question this finishes
    /// the session, leaving the final answer/outcome intact for display.
    pub fn next(&mut self) {
        if !self.show_answer || self.finished {
            return;
        }
        if self.current_index + 1 >= self.questions.len() {
            self.finished = true;
            self.current_index = self.questions.len();
        } else {
            self.current_index += 1;
            self.user_answer.clear();
            self.outcome = Outcome::Pending;
            self.show_answer = false;
        }
    }
}

/// Any listed correct answer may match; comparison trims both ends and is
/// case-insensitive. Internal whitespace must match exactly.
fn answer_matches(answer: &str, accepted: &[String]) -> bool {
    let given = answer.trim().to_lowercase();
    accepted
        .iter()
        .any(|candidate| candidate.trim().to_lowercase() == given)
}

/// Grade-band cutoffs as integer percentages. A product policy, carried in
/// config rather than hard-coded in the state machine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeThresholds {
    #[serde(default = "default_top_pct")]
    pub top_pct: u8,
    #[serde(default = "default_high_pct")]
    pub high_pct: u8,
    #[serde(default = "default_mid_pct")]
    pub mid_pct: u8,
}

fn default_top_pct() -> u8 {
    90
}
fn default_high_pct() -> u8 {
    75
}
fn default_mid_pct() -> u8 {
    60
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            top_pct: default_top_pct(),
            high_pct: default_high_pct(),
            mid_pct: default_mid_pct(),
        }
    }
}

impl GradeThresholds {
    /// Cutoffs must be descending and at most 100; anything else reverts to
    /// the defaults rather than producing unreachable bands.
    pub fn normalize(&mut self) {
        let ordered = self.top_pct > self.high_pct && self.high_pct > self.mid_pct;
        if !ordered || self.top_pct > 100 {
            *self = Self::default();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeBand {
    Top,
    High,
    Mid,
    Low,
}

/// Classify a finished quiz. Integer percentage, so 17/20 is 85%.
pub fn grade(score: usize, total: usize, thresholds: &GradeThresholds) -> GradeBand {
    let percent = if total == 0 { 0 } else { score * 100 / total };
    if percent >= thresholds.top_pct as usize {
        GradeBand::Top
    } else if percent >= thresholds.high_pct as usize {
        GradeBand::High
    } else if percent >= thresholds.mid_pct as usize {
        GradeBand::Mid
    } else {
        GradeBand::Low
    }
}
