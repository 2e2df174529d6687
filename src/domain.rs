//! Domain models used by the backend: difficulty/question-type enums, the
//! generated question, the player's game state, and the generation request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty band of a question. Also the advisory suggestion sent to the
/// generator; the generator may answer with a different band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Difficulty::Easy => write!(f, "easy"),
      Difficulty::Medium => write!(f, "medium"),
      Difficulty::Hard => write!(f, "hard"),
    }
  }
}

/// What kind of question is presented to the player?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
  MultipleChoice,
  Calculation,
  Understanding,
  Application,
}

impl fmt::Display for QuestionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QuestionType::MultipleChoice => write!(f, "multiple-choice"),
      QuestionType::Calculation => write!(f, "calculation"),
      QuestionType::Understanding => write!(f, "understanding"),
      QuestionType::Application => write!(f, "application"),
    }
  }
}

/// One generated question. Produced by the external generator, held by the
/// caller until answered or replaced, then discarded. Never mutated.
///
/// Field names follow the frontend contract (camelCase on the wire).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  /// Echo of the goal the question was generated for. Informational only.
  pub learning_goal: String,
  pub question_type: QuestionType,
  pub question: String,
  /// Empty means free-text input; non-empty means multiple choice.
  #[serde(default)]
  pub options: Vec<String>,
  pub correct_answer: String,
  /// Shown to the player regardless of correctness.
  pub explanation: String,
  pub difficulty: Difficulty,
}

impl Question {
  pub fn is_free_text(&self) -> bool {
    self.options.is_empty()
  }
}

/// The player's progression state. A value type: every transition returns a
/// fresh instance, nothing is mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
  pub current_goal_index: usize,
  /// Correct answers accumulated toward mastering the current goal.
  pub correct_answers_in_goal: u32,
  /// Lifetime counter, monotonically non-decreasing.
  pub total_correct: u32,
  /// Increments once per goal advancement, not per correct answer.
  pub player_level: u32,
  /// Consecutive incorrect answers since the last correct one.
  pub consecutive_wrong: u32,
}

/// Result descriptor of one answer submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
  pub correct: bool,
  pub explanation: String,
  pub goal_advanced: bool,
  /// Terminal: once observed, no further questions should be requested.
  pub game_finished: bool,
}

/// Request contract sent to the external question generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
  pub learning_goal: String,
  pub correct_answers_in_goal: u32,
  pub player_level: u32,
  pub suggested_difficulty: Difficulty,
}
