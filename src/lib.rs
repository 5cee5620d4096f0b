//! Championship bracket: group standings, playoff placeholder resolution and seeding.

pub mod fixture;
pub mod logic;
pub mod models;

pub use fixture::{apply_scores, parse_fixture, read_scores, Fixture, ScoreEntry};
pub use logic::{
    assign_medal_games, assign_seeding, calculate_standings, find_team, max_passes,
    resolve_bracket, resolve_placeholders, seed_group_positions, DependencyGraph, Pairing,
    Resolution, ResolutionIssue, ResolvedGame, Seeding, SeedingAssignment, SeedingSource,
    Standings, MIN_PASSES,
};
pub use models::{
    group_key, is_final_code, Binding, BracketDescriptor, Chain, Game, GameNumber, GameRef,
    GroupStandings, Placeholder, PlaceholderMap, ResultType, Round, SeedingOverride, Side,
    TeamSlot, TeamStanding, Tournament, TournamentError, TournamentId,
};
