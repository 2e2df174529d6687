//! HTTP endpoint handlers. Thin wrappers over the engine and provider; each
//! handler is instrumented and logs parameters plus basic result info.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::{info, instrument, warn};

use crate::protocol::*;
use crate::provider::GenerationError;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(app))]
pub async fn http_get_goals(State(app): State<Arc<AppState>>) -> impl IntoResponse {
  Json(GoalsOut { goals: app.engine.goals().to_vec() })
}

#[instrument(level = "info", skip(app))]
pub async fn http_init_state(State(app): State<Arc<AppState>>) -> impl IntoResponse {
  Json(StateOut { state: app.engine.initial_state() })
}

#[instrument(level = "info", skip(app, body),
             fields(goal_index = body.state.current_goal_index, player_level = body.state.player_level))]
pub async fn http_post_question(
  State(app): State<Arc<AppState>>,
  Json(body): Json<QuestionIn>,
) -> Response {
  if let Err(reason) = app.engine.validate_state(&body.state) {
    warn!(target: "question", %reason, "Rejecting question request: invalid state");
    return (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorOut { error: reason })).into_response();
  }
  if app.engine.is_finished(&body.state) {
    warn!(target: "question", "Rejecting question request: game already finished");
    return (
      StatusCode::CONFLICT,
      Json(ErrorOut { error: "game already finished".into() }),
    )
      .into_response();
  }

  match app.request_question(&body.state).await {
    Ok(question) => {
      info!(target: "question", difficulty = %question.difficulty,
            question_type = %question.question_type, "HTTP question served");
      Json(QuestionOut { question }).into_response()
    }
    Err(e) => {
      let status = match &e {
        GenerationError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
      };
      (status, Json(ErrorOut { error: e.to_string() })).into_response()
    }
  }
}

#[instrument(level = "info", skip(app, body),
             fields(goal_index = body.state.current_goal_index, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(app): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Response {
  if let Err(reason) = app.engine.validate_state(&body.state) {
    warn!(target: "question", %reason, "Rejecting answer: invalid state");
    return (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorOut { error: reason })).into_response();
  }

  let (next, outcome) = app.engine.apply_answer(&body.state, &body.question, &body.answer);
  info!(target: "question", correct = outcome.correct, goal_advanced = outcome.goal_advanced,
        game_finished = outcome.game_finished, "HTTP submit_answer evaluated");
  Json(AnswerOut { state: next, outcome }).into_response()
}
