//! Placeholder resolution: substitute placeholders in every game until nothing changes.
//!
//! This is the single entry point for resolved brackets. It is pure: all state lives in
//! one call, so any number of views may call it on the same tournament.

use crate::logic::dependencies::DependencyGraph;
use crate::logic::medals::assign_medal_games;
use crate::logic::seeding::{assign_seeding, Seeding};
use crate::logic::standings::{calculate_standings, seed_group_positions, Standings};
use crate::models::{
    Binding, BracketDescriptor, Chain, Game, GameNumber, GameRef, Placeholder, PlaceholderMap,
    SeedingOverride, Side, TeamSlot, Tournament,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A game as shown to users: slots replaced by team codes where known.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGame {
    /// The game with resolved slots; unresolvable slots keep their fixture placeholder.
    #[serde(flatten)]
    pub game: Game,
    pub original_team1: TeamSlot,
    pub original_team2: TeamSlot,
}

/// Non-fatal findings of a resolution run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionIssue {
    /// These games wait on each other and can never resolve.
    DependencyCycle { games: Vec<GameNumber> },
    /// The pass limit was reached while the last pass still made changes.
    NotConverged { passes: usize },
    /// A placeholder already bound to a final code was offered a different value.
    ConflictingBinding {
        placeholder: Placeholder,
        kept: TeamSlot,
        rejected: TeamSlot,
    },
    /// Group teams no tiebreaker separates.
    UnresolvedTie { group: String, teams: Vec<String> },
    /// Playoff game numbers missing or miscounted; dependent steps are skipped.
    MalformedBracket { detail: String },
}

/// Everything one run produces.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Ordered like the input games.
    pub games: Vec<ResolvedGame>,
    pub standings: Standings,
    /// Settled map, including `Q1..Q4`.
    pub placeholders: PlaceholderMap,
    /// Semifinal seeding once the quarterfinal winners are known.
    pub seeding: Option<Seeding>,
    pub passes: usize,
    pub issues: Vec<ResolutionIssue>,
}

impl Resolution {
    pub fn game(&self, game_number: GameNumber) -> Option<&ResolvedGame> {
        self.games.iter().find(|g| g.game.game_number == game_number)
    }

    /// Team code a placeholder text currently stands for, e.g. `"W(57)"` or `"Q1"`.
    pub fn team_for(&self, placeholder: &str) -> Option<String> {
        match TeamSlot::parse(placeholder) {
            TeamSlot::Team(code) => Some(code),
            TeamSlot::Pending(p) => self.placeholders.team_for(&p),
        }
    }
}

/// Standings, then placeholder resolution, for one tournament's games.
pub fn resolve_bracket(
    games: &[Game],
    bracket: &BracketDescriptor,
    seeding_override: Option<&SeedingOverride>,
) -> Resolution {
    let standings = calculate_standings(games);
    let map = seed_group_positions(&standings, &bracket.host_country_codes);
    resolve_placeholders(games, standings, map, bracket, seeding_override)
}

impl Tournament {
    /// Resolve this tournament's bracket with its active seeding override.
    pub fn resolve(&self) -> Resolution {
        resolve_bracket(&self.games, &self.bracket, self.seeding_override.as_ref())
    }
}

/// Passes always run, even once nothing changes.
pub const MIN_PASSES: usize = 3;

/// Upper bound on resolution passes.
pub fn max_passes(total_games: usize) -> usize {
    (total_games / 2).max(MIN_PASSES)
}

#[derive(Clone, Debug)]
struct WorkingSlot {
    /// Fixture value, or the value assigned to this slot by seeding / medal assignment.
    source: TeamSlot,
    current: TeamSlot,
}

struct WorkingGame<'a> {
    game: &'a Game,
    slots: [WorkingSlot; 2],
}

impl WorkingGame<'_> {
    fn slot(&self, side: Side) -> &WorkingSlot {
        match side {
            Side::One => &self.slots[0],
            Side::Two => &self.slots[1],
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut WorkingSlot {
        match side {
            Side::One => &mut self.slots[0],
            Side::Two => &mut self.slots[1],
        }
    }
}

/// Run the fixed-point iteration over a map pre-seeded with group positions.
///
/// Each pass substitutes every slot one step, records winners and losers of decided
/// playoff games, and lets the seeding and medal assigners add entries. Iteration stops
/// after a pass that changes nothing (but never before [`MIN_PASSES`]) or after
/// [`max_passes`]. A last pass then resolves every slot through the settled map; slots
/// that still end in a placeholder keep their fixture text.
pub fn resolve_placeholders(
    games: &[Game],
    standings: Standings,
    mut map: PlaceholderMap,
    bracket: &BracketDescriptor,
    seeding_override: Option<&SeedingOverride>,
) -> Resolution {
    let mut issues = bracket_issues(games, bracket);
    for (group, table) in &standings {
        for tie in &table.unresolved_ties {
            issues.push(ResolutionIssue::UnresolvedTie {
                group: group.clone(),
                teams: tie.clone(),
            });
        }
    }
    for cycle in DependencyGraph::build(games, bracket).cycles() {
        log::warn!("Games {:?} depend on each other and cannot be resolved", cycle);
        issues.push(ResolutionIssue::DependencyCycle { games: cycle });
    }

    for (index, &game_number) in (1u8..).zip(&bracket.semifinal_game_numbers) {
        map.bind(
            Placeholder::Winner(GameRef::SemifinalSlot(index)),
            Placeholder::winner_of(game_number).into(),
        );
        map.bind(
            Placeholder::Loser(GameRef::SemifinalSlot(index)),
            Placeholder::loser_of(game_number).into(),
        );
    }

    let mut working: Vec<WorkingGame<'_>> = games
        .iter()
        .map(|game| WorkingGame {
            game,
            slots: [Side::One, Side::Two].map(|side| WorkingSlot {
                source: game.slot(side).clone(),
                current: game.slot(side).clone(),
            }),
        })
        .collect();

    let limit = max_passes(games.len());
    let mut passes = 0;
    let mut settled = false;
    let mut seeding = None;
    while passes < limit {
        passes += 1;
        let mut changes = 0;

        for wg in &mut working {
            for side in [Side::One, Side::Two] {
                if substitute(wg, side, &map) {
                    changes += 1;
                }
            }
        }

        for wg in working.iter().filter(|wg| wg.game.round.is_playoff()) {
            let (Some(t1), Some(t2)) = (
                wg.slot(Side::One).current.team_code(),
                wg.slot(Side::Two).current.team_code(),
            ) else {
                continue;
            };
            let (winner, loser) = match wg.game.winning_side() {
                Some(Side::One) => (t1, t2),
                Some(Side::Two) => (t2, t1),
                None => continue,
            };
            let n = wg.game.game_number;
            changes += bind(&mut map, Placeholder::winner_of(n), TeamSlot::team(winner), &mut issues);
            changes += bind(&mut map, Placeholder::loser_of(n), TeamSlot::team(loser), &mut issues);
        }

        if let Some(assignment) = assign_seeding(&map, bracket, &standings, seeding_override) {
            for (key, value) in assignment.bindings {
                changes += bind(&mut map, key, value, &mut issues);
            }
            seeding = Some(assignment.seeding);
        }
        for (key, value) in assign_medal_games(bracket, games) {
            changes += bind(&mut map, key, value, &mut issues);
        }

        log::debug!("Resolution pass {}: {} change(s)", passes, changes);
        settled = changes == 0;
        if settled && passes >= MIN_PASSES {
            break;
        }
    }
    if !settled {
        log::warn!("Bracket resolution stopped after {} passes without settling", passes);
        issues.push(ResolutionIssue::NotConverged { passes });
    }

    let mut memo = BTreeMap::new();
    let games = working
        .iter()
        .map(|wg| {
            let mut game = wg.game.clone();
            for side in [Side::One, Side::Two] {
                let source = slot_source(wg.game, side, &map);
                if let Some(code) = final_code(&source, &map, &mut memo) {
                    *game.slot_mut(side) = TeamSlot::Team(code);
                }
            }
            ResolvedGame {
                original_team1: wg.game.team1.clone(),
                original_team2: wg.game.team2.clone(),
                game,
            }
        })
        .collect();

    Resolution {
        games,
        standings,
        placeholders: map,
        seeding,
        passes,
        issues,
    }
}

/// Assigned slot value if one exists, else the fixture value.
fn slot_source(game: &Game, side: Side, map: &PlaceholderMap) -> TeamSlot {
    let key = Placeholder::GameSlot {
        game_number: game.game_number,
        side,
    };
    map.get(&key).cloned().unwrap_or_else(|| game.slot(side).clone())
}

/// One substitution step for one slot. Returns true if the slot changed.
///
/// A newly assigned source restarts the slot from that source.
fn substitute(wg: &mut WorkingGame<'_>, side: Side, map: &PlaceholderMap) -> bool {
    let source = slot_source(wg.game, side, map);
    let slot = wg.slot_mut(side);
    let mut changed = false;
    if slot.source != source {
        slot.current = source.clone();
        slot.source = source;
        changed = true;
    }
    let next = slot
        .current
        .placeholder()
        .and_then(|p| map.get(p))
        .filter(|next| **next != slot.current)
        .cloned();
    if let Some(next) = next {
        slot.current = next;
        changed = true;
    }
    changed
}

/// Bind and record conflicts. Returns 1 for a change, else 0.
fn bind(
    map: &mut PlaceholderMap,
    key: Placeholder,
    value: TeamSlot,
    issues: &mut Vec<ResolutionIssue>,
) -> usize {
    match map.bind(key.clone(), value.clone()) {
        Binding::Inserted | Binding::Updated => 1,
        Binding::Unchanged => 0,
        Binding::Rejected { existing } => {
            let issue = ResolutionIssue::ConflictingBinding {
                placeholder: key,
                kept: existing,
                rejected: value,
            };
            if !issues.contains(&issue) {
                log::warn!("Conflicting placeholder binding ignored: {:?}", issue);
                issues.push(issue);
            }
            0
        }
    }
}

/// Team code at the end of the chain from `slot`, memoized per placeholder.
fn final_code(
    slot: &TeamSlot,
    map: &PlaceholderMap,
    memo: &mut BTreeMap<Placeholder, Option<String>>,
) -> Option<String> {
    let placeholder = match slot {
        TeamSlot::Team(code) => return Some(code.clone()),
        TeamSlot::Pending(p) => p,
    };
    if let Some(known) = memo.get(placeholder) {
        return known.clone();
    }
    let code = match map.follow(placeholder) {
        Chain::Team(code) => Some(code),
        Chain::Pending(_) => None,
        Chain::Cycle(path) => {
            log::warn!("Placeholder chain loops: {:?}", path);
            None
        }
    };
    memo.insert(placeholder.clone(), code.clone());
    code
}

/// Descriptor problems that make seeding or medal assignment impossible.
fn bracket_issues(games: &[Game], bracket: &BracketDescriptor) -> Vec<ResolutionIssue> {
    let mut details = Vec::new();
    let qf = bracket.quarterfinal_game_numbers.len();
    if qf != 0 && qf != 4 {
        details.push(format!("expected 4 quarterfinal games, found {}", qf));
    }
    let sf = bracket.semifinal_game_numbers.len();
    if sf != 0 && sf != 2 {
        details.push(format!("expected 2 semifinal games, found {}", sf));
    }
    if bracket.bronze_game_number.is_some() != bracket.gold_game_number.is_some() {
        details.push("only one of bronze and gold game declared".to_string());
    }
    let known: BTreeSet<GameNumber> = games.iter().map(|g| g.game_number).collect();
    let declared = bracket
        .quarterfinal_game_numbers
        .iter()
        .chain(&bracket.semifinal_game_numbers)
        .chain(&bracket.bronze_game_number)
        .chain(&bracket.gold_game_number);
    for n in declared {
        if !known.contains(n) {
            details.push(format!("declared game {} is not scheduled", n));
        }
    }
    details
        .into_iter()
        .map(|detail| {
            log::debug!("Bracket descriptor: {}", detail);
            ResolutionIssue::MalformedBracket { detail }
        })
        .collect()
}
