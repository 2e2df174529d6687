//! Pure progression state machine: goal advancement, mastery counting,
//! difficulty suggestion, and win detection.
//!
//! No I/O, no randomness, no clocks. Every operation is a deterministic
//! function of its arguments; state values are returned fresh, never mutated
//! in place. The only stateful thing here is the fixed goal list, set once at
//! construction.

use crate::domain::{AnswerOutcome, Difficulty, GameState, Question};
use crate::util::normalize_answer;

/// Correct answers required to advance past a learning goal.
pub const MASTERY_THRESHOLD: u32 = 3;

/// Owns the ordered learning-goal list and the transition rules.
pub struct ProgressEngine {
  goals: Vec<String>,
}

impl ProgressEngine {
  pub fn new(goals: Vec<String>) -> Self {
    assert!(!goals.is_empty(), "learning-goal list must not be empty");
    Self { goals }
  }

  pub fn goals(&self) -> &[String] {
    &self.goals
  }

  pub fn goal_count(&self) -> usize {
    self.goals.len()
  }

  /// Text of the active goal. Expects a state that passed `validate_state`;
  /// an out-of-range index is a caller contract violation.
  pub fn goal_text(&self, state: &GameState) -> &str {
    &self.goals[state.current_goal_index]
  }

  /// Starting state: first goal, all counters zero, level 1.
  pub fn initial_state(&self) -> GameState {
    GameState {
      current_goal_index: 0,
      correct_answers_in_goal: 0,
      total_correct: 0,
      player_level: 1,
      consecutive_wrong: 0,
    }
  }

  /// Advisory difficulty for the next question. Remediation (two or more
  /// consecutive wrong answers) takes precedence over the pre-mastery
  /// stretch band.
  pub fn suggest_difficulty(&self, state: &GameState) -> Difficulty {
    if state.consecutive_wrong >= 2 {
      Difficulty::Easy
    } else if state.correct_answers_in_goal >= 2 {
      Difficulty::Hard
    } else {
      Difficulty::Medium
    }
  }

  /// True once the last goal has been mastered. Terminal: no further
  /// questions should be requested for such a state.
  pub fn is_finished(&self, state: &GameState) -> bool {
    state.current_goal_index == self.goals.len() - 1
      && state.correct_answers_in_goal >= MASTERY_THRESHOLD
  }

  /// Boundary check for states arriving over the wire. The transition
  /// functions themselves assume a valid state.
  pub fn validate_state(&self, state: &GameState) -> Result<(), String> {
    if state.current_goal_index >= self.goals.len() {
      return Err(format!(
        "currentGoalIndex {} out of range ({} goals)",
        state.current_goal_index,
        self.goals.len()
      ));
    }
    if state.correct_answers_in_goal > MASTERY_THRESHOLD {
      return Err(format!(
        "correctAnswersInGoal {} exceeds mastery threshold {}",
        state.correct_answers_in_goal, MASTERY_THRESHOLD
      ));
    }
    if state.player_level < 1 {
      return Err("playerLevel must be at least 1".into());
    }
    Ok(())
  }

  /// Apply one submitted answer and return the next state plus an outcome
  /// descriptor. Matching is case-insensitive and trims surrounding
  /// whitespace on both sides.
  pub fn apply_answer(
    &self,
    state: &GameState,
    question: &Question,
    submitted: &str,
  ) -> (GameState, AnswerOutcome) {
    let correct = normalize_answer(submitted) == normalize_answer(&question.correct_answer);

    if !correct {
      let next = GameState {
        consecutive_wrong: state.consecutive_wrong + 1,
        ..*state
      };
      let outcome = AnswerOutcome {
        correct: false,
        explanation: question.explanation.clone(),
        goal_advanced: false,
        game_finished: false,
      };
      return (next, outcome);
    }

    let mut next = GameState {
      correct_answers_in_goal: state.correct_answers_in_goal + 1,
      total_correct: state.total_correct + 1,
      consecutive_wrong: 0,
      ..*state
    };
    let mut goal_advanced = false;
    let mut game_finished = false;

    if next.correct_answers_in_goal >= MASTERY_THRESHOLD {
      if next.current_goal_index < self.goals.len() - 1 {
        next.current_goal_index += 1;
        next.correct_answers_in_goal = 0;
        next.player_level += 1;
        goal_advanced = true;
      } else {
        // Last goal mastered: index and in-goal count keep their mastered
        // values; this state is terminal.
        game_finished = true;
      }
    }

    let outcome = AnswerOutcome {
      correct: true,
      explanation: question.explanation.clone(),
      goal_advanced,
      game_finished,
    };
    (next, outcome)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionType;

  fn engine() -> ProgressEngine {
    ProgressEngine::new(crate::goals::default_learning_goals())
  }

  fn state(
    current_goal_index: usize,
    correct_answers_in_goal: u32,
    total_correct: u32,
    player_level: u32,
    consecutive_wrong: u32,
  ) -> GameState {
    GameState {
      current_goal_index,
      correct_answers_in_goal,
      total_correct,
      player_level,
      consecutive_wrong,
    }
  }

  fn question(correct_answer: &str) -> Question {
    Question {
      learning_goal: "Substitutiegoederen uitleggen".into(),
      question_type: QuestionType::Understanding,
      question: "Wat gebeurt er met de vraag naar thee als koffie duurder wordt?".into(),
      options: vec![],
      correct_answer: correct_answer.into(),
      explanation: "Thee is een substituut voor koffie.".into(),
      difficulty: Difficulty::Medium,
    }
  }

  #[test]
  fn remediation_takes_precedence_over_stretch() {
    let eng = engine();
    for in_goal in 0..=MASTERY_THRESHOLD {
      for wrong in 2..5 {
        let s = state(0, in_goal, 0, 1, wrong);
        assert_eq!(eng.suggest_difficulty(&s), Difficulty::Easy);
      }
    }
  }

  #[test]
  fn stretch_band_before_mastery() {
    let eng = engine();
    for wrong in 0..2 {
      let s = state(3, 2, 10, 4, wrong);
      assert_eq!(eng.suggest_difficulty(&s), Difficulty::Hard);
    }
  }

  #[test]
  fn default_band_is_medium() {
    let eng = engine();
    assert_eq!(eng.suggest_difficulty(&eng.initial_state()), Difficulty::Medium);
    assert_eq!(eng.suggest_difficulty(&state(5, 1, 9, 3, 1)), Difficulty::Medium);
  }

  #[test]
  fn suggestion_is_deterministic() {
    let eng = engine();
    let s = state(2, 2, 7, 3, 1);
    assert_eq!(eng.suggest_difficulty(&s), eng.suggest_difficulty(&s));
  }

  #[test]
  fn apply_answer_is_deterministic_and_does_not_mutate() {
    let eng = engine();
    let s = state(1, 1, 4, 2, 0);
    let q = question("de vraag stijgt");
    let first = eng.apply_answer(&s, &q, "De vraag stijgt");
    let second = eng.apply_answer(&s, &q, "De vraag stijgt");
    assert_eq!(first, second);
    assert_eq!(s, state(1, 1, 4, 2, 0));
  }

  #[test]
  fn matching_ignores_case_and_surrounding_whitespace() {
    let eng = engine();
    let s = eng.initial_state();
    let q = question("Paris");
    let (with_padding, _) = eng.apply_answer(&s, &q, "  paris  ");
    let (plain, _) = eng.apply_answer(&s, &q, "Paris");
    assert_eq!(with_padding, plain);
    assert_eq!(with_padding.total_correct, 1);
  }

  #[test]
  fn internal_whitespace_is_significant() {
    let eng = engine();
    let s = eng.initial_state();
    let q = question("de prijs daalt");
    let (next, outcome) = eng.apply_answer(&s, &q, "de  prijs daalt");
    assert!(!outcome.correct);
    assert_eq!(next.consecutive_wrong, 1);
  }

  #[test]
  fn wrong_answer_touches_only_the_streak() {
    let eng = engine();
    let s = state(4, 2, 14, 5, 0);
    let q = question("ja");
    let (next, outcome) = eng.apply_answer(&s, &q, "nee");
    assert!(!outcome.correct);
    assert_eq!(outcome.explanation, q.explanation);
    assert_eq!(next, state(4, 2, 14, 5, 1));
  }

  #[test]
  fn three_wrong_in_a_row_accumulate() {
    let eng = engine();
    let q = question("ja");
    let mut s = state(2, 1, 6, 3, 0);
    for expected in 1..=3 {
      let (next, outcome) = eng.apply_answer(&s, &q, "nee");
      assert!(!outcome.correct);
      assert_eq!(next.consecutive_wrong, expected);
      s = next;
    }
    assert_eq!(s.current_goal_index, 2);
    assert_eq!(s.correct_answers_in_goal, 1);
  }

  #[test]
  fn correct_answer_increments_totals_and_clears_streak() {
    let eng = engine();
    let s = state(0, 0, 0, 1, 2);
    let q = question("ja");
    let (next, outcome) = eng.apply_answer(&s, &q, "ja");
    assert!(outcome.correct);
    assert!(!outcome.goal_advanced);
    assert!(!outcome.game_finished);
    assert_eq!(next, state(0, 1, 1, 1, 0));
  }

  #[test]
  fn mastering_a_goal_advances_and_levels_up() {
    let eng = engine();
    let s = state(0, 2, 7, 1, 0);
    let q = question("ja");
    let (next, outcome) = eng.apply_answer(&s, &q, "ja");
    assert!(outcome.correct);
    assert!(outcome.goal_advanced);
    assert!(!outcome.game_finished);
    assert_eq!(next, state(1, 0, 8, 2, 0));
  }

  #[test]
  fn mastering_the_last_goal_finishes_the_game() {
    let eng = engine();
    let last = eng.goal_count() - 1;
    let s = state(last, 2, 80, 27, 0);
    let q = question("ja");
    let (next, outcome) = eng.apply_answer(&s, &q, "ja");
    assert!(outcome.correct);
    assert!(outcome.game_finished);
    assert!(!outcome.goal_advanced);
    // Index and in-goal count keep their mastered values.
    assert_eq!(next.current_goal_index, last);
    assert_eq!(next.correct_answers_in_goal, MASTERY_THRESHOLD);
    assert_eq!(next.total_correct, 81);
    assert_eq!(next.player_level, 27);
    assert!(eng.is_finished(&next));
  }

  #[test]
  fn not_finished_before_the_last_goal() {
    let eng = engine();
    assert!(!eng.is_finished(&eng.initial_state()));
    assert!(!eng.is_finished(&state(eng.goal_count() - 1, 2, 80, 27, 0)));
  }

  #[test]
  fn initial_state_shape() {
    let eng = engine();
    assert_eq!(eng.initial_state(), state(0, 0, 0, 1, 0));
    assert_eq!(eng.goal_count(), 27);
  }

  #[test]
  fn validate_rejects_out_of_domain_states() {
    let eng = engine();
    assert!(eng.validate_state(&state(27, 0, 0, 1, 0)).is_err());
    assert!(eng.validate_state(&state(0, 4, 0, 1, 0)).is_err());
    assert!(eng.validate_state(&state(0, 0, 0, 0, 0)).is_err());
    // A finished state (mastered values) is still in-domain.
    assert!(eng.validate_state(&state(26, 3, 81, 27, 0)).is_ok());
    assert!(eng.validate_state(&eng.initial_state()).is_ok());
  }
}
