//! WebSocket upgrade + message loop. Each client message is parsed as JSON
//! and answered with a single JSON message. Messages are handled one at a
//! time, so a client never has two generation calls in flight.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "economeester_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "economeester_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target = "economeester_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "economeester_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "economeester_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(msg, app))]
async fn handle_client_ws(msg: ClientWsMessage, app: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::InitState => ServerWsMessage::State { state: app.engine.initial_state() },

    ClientWsMessage::Goals => ServerWsMessage::Goals { goals: app.engine.goals().to_vec() },

    ClientWsMessage::NewQuestion { state } => {
      if let Err(reason) = app.engine.validate_state(&state) {
        return ServerWsMessage::Error { message: reason };
      }
      if app.engine.is_finished(&state) {
        return ServerWsMessage::Error { message: "game already finished".into() };
      }
      match app.request_question(&state).await {
        Ok(question) => {
          tracing::info!(target: "question", difficulty = %question.difficulty, "WS question served");
          ServerWsMessage::Question { question }
        }
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::SubmitAnswer { state, question, answer } => {
      if let Err(reason) = app.engine.validate_state(&state) {
        return ServerWsMessage::Error { message: reason };
      }
      let (next, outcome) = app.engine.apply_answer(&state, &question, &answer);
      tracing::info!(target: "question", correct = outcome.correct,
                     game_finished = outcome.game_finished, "WS submit_answer evaluated");
      ServerWsMessage::AnswerResult { state: next, outcome }
    }
  }
}
