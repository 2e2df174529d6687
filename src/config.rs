//! Loading game configuration (prompts + optional curriculum) from TOML.
//!
//! See `GameConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub prompts: Prompts,
  /// Optional replacement curriculum. Order is the progression order; the
  /// list is fixed for the lifetime of the process.
  #[serde(default)]
  pub goals: Vec<String>,
}

/// Prompts used by the question generator. The defaults mirror the original
/// Economeester prompt; override them in TOML to tune tone or language.
///
/// The user template understands these placeholders: {learning_goal},
/// {correct_answers_in_goal}, {mastery_threshold}, {player_level},
/// {suggested_difficulty}.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub question_system: String,
  pub question_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      question_system: "You are an educational game engine for an economics quiz. \
        Respond ONLY with one strict JSON object with exactly these fields: \
        learningGoal (string), \
        questionType (one of \"multiple-choice\", \"calculation\", \"understanding\", \"application\"), \
        question (string), \
        options (array of strings; empty array for a free-text question, otherwise the multiple-choice options), \
        correctAnswer (string; for multiple-choice it must equal one of the options), \
        explanation (string), \
        difficulty (one of \"easy\", \"medium\", \"hard\"). \
        All player-facing text is in Dutch."
        .into(),
      question_user_template: "Huidig leerdoel: {learning_goal}\n\
        Huidige voortgang in dit doel: {correct_answers_in_goal} / {mastery_threshold}\n\
        Spelerniveau: {player_level}\n\
        Aanbevolen moeilijkheid: {suggested_difficulty}\n\n\
        Genereer één unieke economische vraag over het leerdoel in een realistische context \
        (bijv. brood, telefoons, benzine). Wissel af tussen meerkeuze, berekening, begrip en toepassing."
        .into(),
    }
  }
}

/// Attempt to load `GameConfig` from GAME_CONFIG_PATH. On any parsing/IO
/// error, returns None and the built-in defaults apply.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GameConfig>(&s) {
      Ok(cfg) => {
        info!(target: "economeester_backend", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "economeester_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "economeester_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
