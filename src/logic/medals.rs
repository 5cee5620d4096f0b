//! Medal games: bronze is played by the semifinal losers, gold by the winners.

use crate::models::{BracketDescriptor, Game, Placeholder, Side, TeamSlot};

/// Map entries pointing the bronze and gold slots at `L(..)` / `W(..)` of the semifinals.
///
/// Empty unless two semifinals, a bronze and a gold game are declared and both medal
/// games exist.
pub fn assign_medal_games(bracket: &BracketDescriptor, games: &[Game]) -> Vec<(Placeholder, TeamSlot)> {
    let (Some(bronze), Some(gold)) = (bracket.bronze_game_number, bracket.gold_game_number) else {
        return Vec::new();
    };
    if bracket.semifinal_game_numbers.len() != 2 {
        return Vec::new();
    }
    let exists = |n| games.iter().any(|g| g.game_number == n);
    if !exists(bronze) || !exists(gold) {
        log::debug!("Medal games {} / {} not in schedule; skipped", bronze, gold);
        return Vec::new();
    }

    let (sf1, sf2) = (bracket.semifinal_game_numbers[0], bracket.semifinal_game_numbers[1]);
    let slot = |game_number, side| Placeholder::GameSlot { game_number, side };
    vec![
        (slot(bronze, Side::One), Placeholder::loser_of(sf1).into()),
        (slot(bronze, Side::Two), Placeholder::loser_of(sf2).into()),
        (slot(gold, Side::One), Placeholder::winner_of(sf1).into()),
        (slot(gold, Side::Two), Placeholder::winner_of(sf2).into()),
    ]
}
