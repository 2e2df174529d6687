//! Shared application state: the progression engine (curriculum owner),
//! prompt templates, and the optional OpenAI client.
//!
//! Game state itself is NOT held here: every request carries the caller's
//! `GameState` and every response returns fresh values, so there is exactly
//! one writer (the caller) and nothing to lock.

use tracing::{info, instrument, warn};

use crate::config::{load_game_config_from_env, Prompts};
use crate::domain::{GameState, Question};
use crate::engine::ProgressEngine;
use crate::goals::default_learning_goals;
use crate::openai::OpenAI;
use crate::provider::{self, GenerationError};

pub struct AppState {
    pub engine: ProgressEngine,
    pub prompts: Prompts,
    pub openai: Option<OpenAI>,
}

impl AppState {
    /// Build state from env: load config, resolve the curriculum, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_game_config_from_env().unwrap_or_default();

        let goals = if cfg.goals.is_empty() {
            default_learning_goals()
        } else {
            cfg.goals
        };
        let engine = ProgressEngine::new(goals);
        info!(target: "question", goal_count = engine.goal_count(), "Curriculum loaded");

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "economeester_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
        } else {
            warn!(target: "economeester_backend", "OpenAI disabled (no OPENAI_API_KEY). Question requests will fail until configured.");
        }

        Self { engine, prompts: cfg.prompts, openai }
    }

    /// One question for the caller's state, or a recoverable error. No
    /// retry here; the caller re-invokes on an explicit retry action.
    #[instrument(level = "info", skip(self, game), fields(goal_index = game.current_goal_index))]
    pub async fn request_question(&self, game: &GameState) -> Result<Question, GenerationError> {
        match &self.openai {
            Some(oa) => provider::request_question(&self.engine, oa, &self.prompts, game).await,
            None => Err(GenerationError::NotConfigured),
        }
    }
}
