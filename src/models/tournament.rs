//! Tournament and TournamentError.

use crate::models::bracket::{BracketDescriptor, SeedingOverride};
use crate::models::game::{Game, GameNumber, ResultType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors from fixture import and tournament mutation. Bracket resolution itself never fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No game with this number in the tournament.
    GameNotFound(GameNumber),
    /// Two fixture games share a number.
    DuplicateGameNumber(GameNumber),
    /// A fixture game has no number.
    MissingGameNumber,
    /// Fixture JSON has no "schedule" array.
    MissingSchedule,
    /// Score sheet result type not one of REG / OT / SO.
    InvalidResultType(String),
    /// Fixture could not be parsed.
    Json(String),
    /// Score sheet could not be parsed.
    Csv(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::GameNotFound(n) => write!(f, "Game {} not found", n),
            TournamentError::DuplicateGameNumber(n) => write!(f, "Duplicate game number {} in schedule", n),
            TournamentError::MissingGameNumber => write!(f, "Schedule contains a game without a game number"),
            TournamentError::MissingSchedule => write!(f, "Fixture must contain a \"schedule\" array"),
            TournamentError::InvalidResultType(code) => {
                write!(f, "Unknown result type \"{}\" (expected REG, OT or SO)", code)
            }
            TournamentError::Json(msg) => write!(f, "Invalid fixture: {}", msg),
            TournamentError::Csv(msg) => write!(f, "Invalid score sheet: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<serde_json::Error> for TournamentError {
    fn from(e: serde_json::Error) -> Self {
        TournamentError::Json(e.to_string())
    }
}

impl From<csv::Error> for TournamentError {
    fn from(e: csv::Error) -> Self {
        TournamentError::Csv(e.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// One championship: its schedule, playoff shape and optional seeding override.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// All games, group stage and playoffs, ordered by game number.
    pub games: Vec<Game>,
    pub bracket: BracketDescriptor,
    /// At most one active override.
    pub seeding_override: Option<SeedingOverride>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament from games and a descriptor. Games are sorted by number.
    pub fn new(name: impl Into<String>, mut games: Vec<Game>, bracket: BracketDescriptor) -> Self {
        games.sort_by_key(|g| g.game_number);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            games,
            bracket,
            seeding_override: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn game(&self, game_number: GameNumber) -> Option<&Game> {
        self.games.iter().find(|g| g.game_number == game_number)
    }

    pub fn game_mut(&mut self, game_number: GameNumber) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.game_number == game_number)
    }

    /// Enter (or correct) a game's result.
    pub fn set_score(
        &mut self,
        game_number: GameNumber,
        team1_score: u32,
        team2_score: u32,
        result_type: Option<ResultType>,
    ) -> Result<(), TournamentError> {
        self.game_mut(game_number)
            .ok_or(TournamentError::GameNotFound(game_number))?
            .set_score(team1_score, team2_score, result_type);
        self.touch();
        Ok(())
    }

    /// Reset a game to unplayed.
    pub fn clear_score(&mut self, game_number: GameNumber) -> Result<(), TournamentError> {
        self.game_mut(game_number)
            .ok_or(TournamentError::GameNotFound(game_number))?
            .clear_score();
        self.touch();
        Ok(())
    }

    /// Replace the active seeding override. Validity is judged at resolution time.
    pub fn set_seeding_override(&mut self, seeding: SeedingOverride) {
        log::info!(
            "Tournament {}: seeding override set to {:?}",
            self.id,
            seeding.seeds()
        );
        self.seeding_override = Some(seeding);
        self.touch();
    }

    pub fn clear_seeding_override(&mut self) {
        self.seeding_override = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
