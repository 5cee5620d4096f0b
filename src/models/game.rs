//! Game, Round, ResultType and Side for group-stage and playoff games.

use crate::models::team_code::TeamSlot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Game number, unique within a tournament.
pub type GameNumber = u32;

/// Which of the two team slots of a game.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

/// Phase of the tournament this game belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    GroupStage,
    Quarterfinal,
    Semifinal,
    Bronze,
    Gold,
}

impl Round {
    /// Recognize a fixture round name, case-insensitively by substring.
    ///
    /// "Semifinals" and "Quarterfinals" are checked before "final" so they are not
    /// taken for the gold medal game.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("quarterfinal") || name.contains("quarter-final") {
            Some(Round::Quarterfinal)
        } else if name.contains("semifinal") || name.contains("semi-final") {
            Some(Round::Semifinal)
        } else if name.contains("bronze") || name.contains("3rd place") {
            Some(Round::Bronze)
        } else if name.contains("gold") || name.contains("final") {
            Some(Round::Gold)
        } else if name.contains("preliminary") || name.contains("group") || name.contains("round robin") {
            Some(Round::GroupStage)
        } else {
            None
        }
    }

    pub fn is_playoff(self) -> bool {
        self != Round::GroupStage
    }
}

/// How a decided game was decided. Overtime and shootout decisions split the points.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    #[default]
    Regulation,
    Overtime,
    Shootout,
}

impl ResultType {
    /// Parse the score-sheet abbreviations `REG`, `OT` and `SO`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "REG" | "REGULATION" => Some(ResultType::Regulation),
            "OT" | "OVERTIME" => Some(ResultType::Overtime),
            "SO" | "SHOOTOUT" => Some(ResultType::Shootout),
            _ => None,
        }
    }

    /// (winner points, loser points).
    pub fn points(self) -> (u32, u32) {
        match self {
            ResultType::Regulation => (3, 0),
            ResultType::Overtime | ResultType::Shootout => (2, 1),
        }
    }
}

/// A single scheduled game. Team slots hold a literal code or a placeholder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_number: GameNumber,
    pub round: Round,
    /// Group name for group-stage games ("Group A" or "A").
    pub group: Option<String>,
    pub team1: TeamSlot,
    pub team2: TeamSlot,
    /// None if not yet played.
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub result_type: Option<ResultType>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl Game {
    pub fn new(game_number: GameNumber, round: Round, team1: TeamSlot, team2: TeamSlot) -> Self {
        Self {
            game_number,
            round,
            group: None,
            team1,
            team2,
            team1_score: None,
            team2_score: None,
            result_type: None,
            date: None,
            start_time: None,
            location: None,
            venue: None,
        }
    }

    /// Builder-style group assignment.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Builder-style result assignment.
    pub fn with_score(mut self, team1_score: u32, team2_score: u32, result_type: ResultType) -> Self {
        self.set_score(team1_score, team2_score, Some(result_type));
        self
    }

    pub fn set_score(&mut self, team1_score: u32, team2_score: u32, result_type: Option<ResultType>) {
        self.team1_score = Some(team1_score);
        self.team2_score = Some(team2_score);
        self.result_type = result_type;
    }

    pub fn clear_score(&mut self) {
        self.team1_score = None;
        self.team2_score = None;
        self.result_type = None;
    }

    /// Both scores, if the game has been played.
    pub fn score(&self) -> Option<(u32, u32)> {
        Some((self.team1_score?, self.team2_score?))
    }

    pub fn slot(&self, side: Side) -> &TeamSlot {
        match side {
            Side::One => &self.team1,
            Side::Two => &self.team2,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut TeamSlot {
        match side {
            Side::One => &mut self.team1,
            Side::Two => &mut self.team2,
        }
    }

    /// Winning side of a played game. None if unplayed or tied.
    pub fn winning_side(&self) -> Option<Side> {
        let (s1, s2) = self.score()?;
        match s1.cmp(&s2) {
            std::cmp::Ordering::Greater => Some(Side::One),
            std::cmp::Ordering::Less => Some(Side::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}
