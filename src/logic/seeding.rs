//! Semifinal seeding: rank the quarterfinal winners, apply a manual override and the
//! host-country rule, and pair the seeds into the two semifinals.

use crate::logic::standings::{find_team, Standings};
use crate::models::{
    BracketDescriptor, GameNumber, Placeholder, PlaceholderMap, SeedingOverride, Side, TeamSlot,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Where the seed order came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingSource {
    /// Ranked from group standings.
    Standings,
    /// Manual override matching the quarterfinal winners.
    Override,
    /// Quarterfinal declaration order; no semifinal pairing could be derived.
    QuarterfinalOrder,
}

/// One semifinal game with its two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub game_number: GameNumber,
    pub team1: String,
    pub team2: String,
}

/// Seeds 1..4 and, when derivable, the semifinal pairings in declared semifinal order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seeding {
    pub seeds: [String; 4],
    pub source: SeedingSource,
    pub semifinals: Option<[Pairing; 2]>,
}

/// A seeding plus the map entries that express it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeedingAssignment {
    pub seeding: Seeding,
    pub bindings: Vec<(Placeholder, TeamSlot)>,
}

/// Derive seeding from the resolved quarterfinal winners.
///
/// Returns None until exactly four quarterfinals are declared and all four winners are
/// known. With two semifinals declared and standings for every winner, the winners are
/// ranked (rank in group, then points, goal difference, goals for) and paired
/// 1v4 / 2v3; otherwise they are labelled `Q1..Q4` in quarterfinal order.
pub fn assign_seeding(
    map: &PlaceholderMap,
    bracket: &BracketDescriptor,
    standings: &Standings,
    seeding_override: Option<&SeedingOverride>,
) -> Option<SeedingAssignment> {
    if bracket.quarterfinal_game_numbers.len() != 4 {
        return None;
    }
    let winners: Vec<String> = bracket
        .quarterfinal_game_numbers
        .iter()
        .map(|&n| map.team_for(&Placeholder::winner_of(n)))
        .collect::<Option<_>>()?;
    let winners: [String; 4] = winners.try_into().ok()?;

    if bracket.has_seeding_shape() {
        if let Some(ranked) = rank_winners(&winners, standings) {
            return Some(pair_semifinals(ranked, bracket, seeding_override));
        }
        log::debug!("Quarterfinal winners {:?} lack group standings; seeding by game order", winners);
    }

    let bindings = seed_bindings(&winners);
    Some(SeedingAssignment {
        seeding: Seeding {
            seeds: winners,
            source: SeedingSource::QuarterfinalOrder,
            semifinals: None,
        },
        bindings,
    })
}

/// Winners ordered strongest first, or None if a winner has no group standing.
fn rank_winners(winners: &[String; 4], standings: &Standings) -> Option<[String; 4]> {
    let mut ranked = winners
        .iter()
        .map(|code| find_team(standings, code))
        .collect::<Option<Vec<_>>>()?;
    ranked.sort_by_key(|t| {
        (
            t.rank_in_group,
            Reverse(t.points),
            Reverse(t.goal_diff),
            Reverse(t.goals_for),
            t.team_code.clone(),
        )
    });
    let codes: Vec<String> = ranked.into_iter().map(|t| t.team_code.clone()).collect();
    codes.try_into().ok()
}

/// True if the override names exactly the four winners, each once.
fn override_matches(seeding_override: &SeedingOverride, winners: &[String; 4]) -> bool {
    let chosen: BTreeSet<&str> = seeding_override.seeds().into_iter().collect();
    let expected: BTreeSet<&str> = winners.iter().map(String::as_str).collect();
    chosen.len() == 4 && chosen == expected
}

fn pair_semifinals(
    computed: [String; 4],
    bracket: &BracketDescriptor,
    seeding_override: Option<&SeedingOverride>,
) -> SeedingAssignment {
    let (seeds, source) = match seeding_override {
        Some(o) if override_matches(o, &computed) => {
            (o.seeds().map(str::to_string), SeedingSource::Override)
        }
        Some(o) => {
            log::debug!(
                "Seeding override {:?} does not match quarterfinal winners {:?}; ignored",
                o.seeds(),
                computed
            );
            (computed, SeedingSource::Standings)
        }
        None => (computed, SeedingSource::Standings),
    };

    let low = (seeds[0].clone(), seeds[3].clone());
    let high = (seeds[1].clone(), seeds[2].clone());
    let host = bracket
        .host_country_codes
        .iter()
        .find(|h| seeds.contains(*h));
    let (first, second) = match host {
        Some(h) if *h == high.0 || *h == high.1 => (high, low),
        _ => (low, high),
    };

    let [sf1, sf2] = [
        bracket.semifinal_game_numbers[0],
        bracket.semifinal_game_numbers[1],
    ];
    let mut bindings = Vec::with_capacity(8);
    for (game_number, (team1, team2)) in [(sf1, &first), (sf2, &second)] {
        bindings.push((
            Placeholder::GameSlot {
                game_number,
                side: Side::One,
            },
            TeamSlot::team(team1.clone()),
        ));
        bindings.push((
            Placeholder::GameSlot {
                game_number,
                side: Side::Two,
            },
            TeamSlot::team(team2.clone()),
        ));
    }
    bindings.extend(seed_bindings(&seeds));

    let semifinals = [
        Pairing {
            game_number: sf1,
            team1: first.0,
            team2: first.1,
        },
        Pairing {
            game_number: sf2,
            team1: second.0,
            team2: second.1,
        },
    ];
    SeedingAssignment {
        seeding: Seeding {
            seeds,
            source,
            semifinals: Some(semifinals),
        },
        bindings,
    }
}

/// `Q1..Q4` -> seeds.
fn seed_bindings(seeds: &[String; 4]) -> Vec<(Placeholder, TeamSlot)> {
    (1u8..)
        .zip(seeds)
        .map(|(i, code)| (Placeholder::Seed(i), TeamSlot::team(code.clone())))
        .collect()
}
