//! Data structures for the championship: games, team codes, bracket shape, standings.

mod bracket;
mod game;
mod placeholder_map;
mod standing;
mod team_code;
mod tournament;

pub use bracket::{BracketDescriptor, SeedingOverride};
pub use game::{Game, GameNumber, ResultType, Round, Side};
pub use placeholder_map::{Binding, Chain, PlaceholderMap};
pub use standing::{GroupStandings, TeamStanding};
pub use team_code::{group_key, is_final_code, GameRef, Placeholder, TeamSlot};
pub use tournament::{Tournament, TournamentError, TournamentId};
