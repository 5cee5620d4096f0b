//! BracketDescriptor and SeedingOverride: the playoff shape of one tournament.

use crate::models::game::{Game, GameNumber, Round};
use serde::{Deserialize, Serialize};

/// Game numbers of each playoff role plus the host countries.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketDescriptor {
    pub quarterfinal_game_numbers: Vec<GameNumber>,
    /// Declared order; the first entry is "SF1".
    pub semifinal_game_numbers: Vec<GameNumber>,
    pub bronze_game_number: Option<GameNumber>,
    pub gold_game_number: Option<GameNumber>,
    /// Checked in this order for the host adjustment.
    pub host_country_codes: Vec<String>,
}

impl BracketDescriptor {
    /// Derive the playoff roles from the games' rounds.
    ///
    /// Quarterfinals keep game order; semifinals are sorted ascending. If a round
    /// appears more than once for bronze/gold, the last game wins.
    pub fn from_games<'a>(games: impl IntoIterator<Item = &'a Game>, hosts: Vec<String>) -> Self {
        let mut descriptor = Self {
            host_country_codes: hosts,
            ..Self::default()
        };
        for game in games {
            match game.round {
                Round::GroupStage => {}
                Round::Quarterfinal => descriptor.quarterfinal_game_numbers.push(game.game_number),
                Round::Semifinal => descriptor.semifinal_game_numbers.push(game.game_number),
                Round::Bronze => descriptor.bronze_game_number = Some(game.game_number),
                Round::Gold => descriptor.gold_game_number = Some(game.game_number),
            }
        }
        descriptor.semifinal_game_numbers.sort_unstable();
        descriptor
    }

    /// `SF1` / `SF2` lookup (1-based).
    pub fn semifinal(&self, index: u8) -> Option<GameNumber> {
        let i = usize::from(index).checked_sub(1)?;
        self.semifinal_game_numbers.get(i).copied()
    }

    /// Exactly 4 quarterfinals and 2 semifinals: semifinal pairing can be derived.
    pub fn has_seeding_shape(&self) -> bool {
        self.quarterfinal_game_numbers.len() == 4 && self.semifinal_game_numbers.len() == 2
    }

    /// Exactly 2 semifinals plus a bronze and a gold game.
    pub fn has_medal_shape(&self) -> bool {
        self.semifinal_game_numbers.len() == 2
            && self.bronze_game_number.is_some()
            && self.gold_game_number.is_some()
    }
}

/// Manual semifinal seeding: seed1 (strongest) to seed4.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingOverride {
    pub seed1: String,
    pub seed2: String,
    pub seed3: String,
    pub seed4: String,
}

impl SeedingOverride {
    pub fn new(seeds: [&str; 4]) -> Self {
        let [seed1, seed2, seed3, seed4] = seeds.map(str::to_string);
        Self {
            seed1,
            seed2,
            seed3,
            seed4,
        }
    }

    /// Seeds in order, seed1 first.
    pub fn seeds(&self) -> [&str; 4] {
        [&self.seed1, &self.seed2, &self.seed3, &self.seed4]
    }
}
