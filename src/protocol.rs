//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerOutcome, GameState, Question};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    /// Ask for the starting game state.
    InitState,
    /// Ask for the ordered learning-goal list (progress display).
    Goals,
    NewQuestion {
        state: GameState,
    },
    SubmitAnswer {
        state: GameState,
        question: Question,
        answer: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    State {
        state: GameState,
    },
    Goals {
        goals: Vec<String>,
    },
    Question {
        question: Question,
    },
    AnswerResult {
        state: GameState,
        outcome: AnswerOutcome,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct StateOut {
    pub state: GameState,
}

#[derive(Serialize)]
pub struct GoalsOut {
    pub goals: Vec<String>,
}

#[derive(Deserialize)]
pub struct QuestionIn {
    pub state: GameState,
}

#[derive(Serialize)]
pub struct QuestionOut {
    pub question: Question,
}

#[derive(Deserialize)]
pub struct AnswerIn {
    pub state: GameState,
    pub question: Question,
    pub answer: String,
}

#[derive(Serialize)]
pub struct AnswerOut {
    pub state: GameState,
    pub outcome: AnswerOutcome,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
