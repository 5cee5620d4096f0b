//! Bracket logic: standings, placeholder resolution, seeding and medal games.

mod dependencies;
mod medals;
mod resolver;
mod seeding;
mod standings;

pub use dependencies::DependencyGraph;
pub use medals::assign_medal_games;
pub use resolver::{
    max_passes, resolve_bracket, resolve_placeholders, Resolution, ResolutionIssue, ResolvedGame,
    MIN_PASSES,
};
pub use seeding::{assign_seeding, Pairing, Seeding, SeedingAssignment, SeedingSource};
pub use standings::{calculate_standings, find_team, seed_group_positions, Standings};
