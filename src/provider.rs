//! QuestionProvider: bridges pure game state to the external question
//! generator and validates its output.
//!
//! The generator is a capability (`GenerateQuestion`) so the request and
//! validation contracts can be exercised against a deterministic stand-in.
//! This layer does not retry: every failure is recoverable and the caller
//! decides whether to re-invoke.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::Prompts;
use crate::domain::{GameState, GenerationRequest, Question};
use crate::engine::ProgressEngine;
use crate::util::trunc_for_log;

/// Failure modes of one generation attempt. None of these is fatal; the
/// caller surfaces "no question available" and may request again.
#[derive(Debug, Error)]
pub enum GenerationError {
  /// The collaborator answered, but not with a valid question shape.
  /// Carries the raw payload for diagnostics.
  #[error("invalid generator response: {reason}")]
  InvalidResponse { reason: String, payload: String },
  /// The collaborator could not be reached or returned a failure status.
  #[error("generator transport failure: {0}")]
  TransportFailure(String),
  /// No generator is configured (missing OPENAI_API_KEY).
  #[error("no question generator configured")]
  NotConfigured,
}

/// The external question-generation collaborator. Takes the structured
/// request contract and returns raw response text, expected to be one JSON
/// object in the `Question` shape. Untrusted regarding structure: callers
/// always validate.
#[async_trait]
pub trait GenerateQuestion: Send + Sync {
  async fn generate(
    &self,
    prompts: &Prompts,
    request: &GenerationRequest,
  ) -> Result<String, GenerationError>;
}

/// Derive the generation request for `state` and fetch one validated
/// question. The difficulty suggestion is advisory context for the
/// generator; whatever valid difficulty comes back is kept.
#[instrument(level = "info", skip(engine, generator, prompts, state),
             fields(goal_index = state.current_goal_index, player_level = state.player_level))]
pub async fn request_question(
  engine: &ProgressEngine,
  generator: &dyn GenerateQuestion,
  prompts: &Prompts,
  state: &GameState,
) -> Result<Question, GenerationError> {
  let suggested = engine.suggest_difficulty(state);
  let request = GenerationRequest {
    learning_goal: engine.goal_text(state).to_string(),
    correct_answers_in_goal: state.correct_answers_in_goal,
    player_level: state.player_level,
    suggested_difficulty: suggested,
  };

  let request_id = Uuid::new_v4();
  let start = std::time::Instant::now();
  let raw = generator.generate(prompts, &request).await?;
  let elapsed = start.elapsed();

  match parse_question(&raw) {
    Ok(q) => {
      info!(target: "question", %request_id, ?elapsed, suggested = %suggested,
            returned = %q.difficulty, question_type = %q.question_type,
            free_text = q.is_free_text(), "Question generated");
      Ok(q)
    }
    Err(e) => {
      warn!(target: "question", %request_id, ?elapsed, error = %e,
            payload = %trunc_for_log(&raw, 200), "Generator returned an invalid question");
      Err(e)
    }
  }
}

/// Decode and validate one raw generator response. Either every required
/// field is present and in-domain, or this is an `InvalidResponse` — never a
/// partially-populated question. A missing `options` field defaults to the
/// empty list; an explicitly empty list is equally valid and means free-text.
pub fn parse_question(raw: &str) -> Result<Question, GenerationError> {
  let invalid = |reason: String| GenerationError::InvalidResponse {
    reason,
    payload: raw.to_string(),
  };

  let q: Question =
    serde_json::from_str(raw).map_err(|e| invalid(format!("decode error: {e}")))?;

  if q.question.trim().is_empty() {
    return Err(invalid("empty question text".into()));
  }
  if q.correct_answer.trim().is_empty() {
    return Err(invalid("empty correctAnswer".into()));
  }
  if q.explanation.trim().is_empty() {
    return Err(invalid("empty explanation".into()));
  }
  Ok(q)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, QuestionType};
  use crate::goals::default_learning_goals;
  use std::sync::Mutex;

  /// Replies with a canned payload and records every request it sees.
  struct StubGenerator {
    reply: String,
    seen: Mutex<Vec<GenerationRequest>>,
  }

  impl StubGenerator {
    fn new(reply: &str) -> Self {
      Self { reply: reply.into(), seen: Mutex::new(Vec::new()) }
    }
  }

  #[async_trait]
  impl GenerateQuestion for StubGenerator {
    async fn generate(
      &self,
      _prompts: &Prompts,
      request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
      self.seen.lock().unwrap().push(request.clone());
      Ok(self.reply.clone())
    }
  }

  struct UnreachableGenerator;

  #[async_trait]
  impl GenerateQuestion for UnreachableGenerator {
    async fn generate(
      &self,
      _prompts: &Prompts,
      _request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
      Err(GenerationError::TransportFailure("connection refused".into()))
    }
  }

  fn engine() -> ProgressEngine {
    ProgressEngine::new(default_learning_goals())
  }

  fn game(goal_index: usize, in_goal: u32, wrong: u32) -> GameState {
    GameState {
      current_goal_index: goal_index,
      correct_answers_in_goal: in_goal,
      total_correct: in_goal,
      player_level: 1,
      consecutive_wrong: wrong,
    }
  }

  const VALID: &str = r#"{
    "learningGoal": "Substitutiegoederen uitleggen",
    "questionType": "multiple-choice",
    "question": "De prijs van koffie stijgt fors. Wat gebeurt er met de vraag naar thee?",
    "options": ["De vraag stijgt", "De vraag daalt", "De vraag blijft gelijk"],
    "correctAnswer": "De vraag stijgt",
    "explanation": "Thee is een substituut voor koffie.",
    "difficulty": "medium"
  }"#;

  #[tokio::test]
  async fn valid_response_round_trips() {
    let stub = StubGenerator::new(VALID);
    let q = request_question(&engine(), &stub, &Prompts::default(), &game(2, 0, 0))
      .await
      .unwrap();
    assert_eq!(q.question_type, QuestionType::MultipleChoice);
    assert_eq!(q.options.len(), 3);
    assert_eq!(q.correct_answer, "De vraag stijgt");
    assert!(!q.is_free_text());
  }

  #[tokio::test]
  async fn request_carries_goal_text_and_suggested_difficulty() {
    let stub = StubGenerator::new(VALID);
    let eng = engine();
    // Two in-goal correct answers and no wrong streak: stretch band.
    let state = game(2, 2, 0);
    request_question(&eng, &stub, &Prompts::default(), &state).await.unwrap();

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].learning_goal, eng.goals()[2]);
    assert_eq!(seen[0].correct_answers_in_goal, 2);
    assert_eq!(seen[0].player_level, 1);
    assert_eq!(seen[0].suggested_difficulty, Difficulty::Hard);
  }

  #[tokio::test]
  async fn suggestion_is_advisory_returned_difficulty_wins() {
    let reply = VALID.replace("\"medium\"", "\"hard\"");
    let stub = StubGenerator::new(&reply);
    let eng = engine();
    // Remediation state: suggestion is easy, generator answers hard anyway.
    let state = game(0, 0, 2);
    let q = request_question(&eng, &stub, &Prompts::default(), &state).await.unwrap();
    assert_eq!(stub.seen.lock().unwrap()[0].suggested_difficulty, Difficulty::Easy);
    assert_eq!(q.difficulty, Difficulty::Hard);
  }

  #[tokio::test]
  async fn transport_failure_passes_through() {
    let err = request_question(&engine(), &UnreachableGenerator, &Prompts::default(), &game(0, 0, 0))
      .await
      .unwrap_err();
    assert!(matches!(err, GenerationError::TransportFailure(_)));
  }

  #[test]
  fn missing_correct_answer_is_invalid_response() {
    let raw = r#"{
      "learningGoal": "x",
      "questionType": "understanding",
      "question": "Wat is vraag?",
      "options": [],
      "explanation": "uitleg",
      "difficulty": "easy"
    }"#;
    let err = parse_question(raw).unwrap_err();
    match err {
      GenerationError::InvalidResponse { payload, .. } => assert_eq!(payload, raw),
      other => panic!("expected InvalidResponse, got {other:?}"),
    }
  }

  #[test]
  fn empty_options_means_free_text() {
    let raw = VALID.replace(
      r#"["De vraag stijgt", "De vraag daalt", "De vraag blijft gelijk"]"#,
      "[]",
    );
    let q = parse_question(&raw).unwrap();
    assert!(q.is_free_text());
  }

  #[test]
  fn absent_options_defaults_to_free_text() {
    let raw = r#"{
      "learningGoal": "x",
      "questionType": "calculation",
      "question": "Bereken de omzet bij p = 2 en q = 10.",
      "correctAnswer": "20",
      "explanation": "Omzet = p maal q.",
      "difficulty": "hard"
    }"#;
    let q = parse_question(raw).unwrap();
    assert!(q.is_free_text());
    assert_eq!(q.question_type, QuestionType::Calculation);
  }

  #[test]
  fn out_of_domain_enum_is_invalid_response() {
    let raw = VALID.replace("\"medium\"", "\"extreme\"");
    assert!(matches!(
      parse_question(&raw),
      Err(GenerationError::InvalidResponse { .. })
    ));
  }

  #[test]
  fn blank_required_text_is_invalid_response() {
    let raw = VALID.replace("Thee is een substituut voor koffie.", "  ");
    assert!(matches!(
      parse_question(&raw),
      Err(GenerationError::InvalidResponse { .. })
    ));
  }

  #[test]
  fn non_string_options_are_invalid_response() {
    let raw = VALID.replace(
      r#"["De vraag stijgt", "De vraag daalt", "De vraag blijft gelijk"]"#,
      "[1, 2, 3]",
    );
    assert!(matches!(
      parse_question(&raw),
      Err(GenerationError::InvalidResponse { .. })
    ));
  }
}
