//! Game dependency graph: which games must be decided before a game's slots resolve.

use crate::models::{BracketDescriptor, Game, GameNumber, GameRef, Placeholder, Round, TeamSlot};
use std::collections::{BTreeMap, BTreeSet};

/// Edges game -> games whose outcome it waits on.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<GameNumber, BTreeSet<GameNumber>>,
}

impl DependencyGraph {
    pub fn build(games: &[Game], bracket: &BracketDescriptor) -> Self {
        let mut edges: BTreeMap<GameNumber, BTreeSet<GameNumber>> = BTreeMap::new();
        for game in games {
            let deps = edges.entry(game.game_number).or_default();
            for slot in [&game.team1, &game.team2] {
                deps.extend(slot_dependencies(slot, bracket));
            }
            // Assigned slots: semifinals wait on the quarterfinals, medal games on the semifinals.
            match game.round {
                Round::Semifinal if bracket.has_seeding_shape() => {
                    deps.extend(bracket.quarterfinal_game_numbers.iter().copied())
                }
                Round::Bronze | Round::Gold if bracket.has_medal_shape() => {
                    deps.extend(bracket.semifinal_game_numbers.iter().copied())
                }
                _ => {}
            }
        }
        Self { edges }
    }

    pub fn dependencies(&self, game_number: GameNumber) -> impl Iterator<Item = GameNumber> + '_ {
        self.edges.get(&game_number).into_iter().flatten().copied()
    }

    /// Every cycle found by a depth-first walk, each listed from its first repeated game.
    pub fn cycles(&self) -> Vec<Vec<GameNumber>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Active,
            Done,
        }

        let mut marks: BTreeMap<GameNumber, Mark> = BTreeMap::new();
        let mut cycles = Vec::new();
        for &start in self.edges.keys() {
            if marks.contains_key(&start) {
                continue;
            }
            // (node, remaining dependencies)
            let mut stack: Vec<(GameNumber, Vec<GameNumber>)> =
                vec![(start, self.dependencies(start).collect())];
            marks.insert(start, Mark::Active);
            while let Some((node, pending)) = stack.last_mut() {
                let node = *node;
                match pending.pop() {
                    Some(next) => match marks.get(&next) {
                        None if self.edges.contains_key(&next) => {
                            marks.insert(next, Mark::Active);
                            stack.push((next, self.dependencies(next).collect()));
                        }
                        Some(Mark::Active) => {
                            let from = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                            cycles.push(stack[from..].iter().map(|(n, _)| *n).collect());
                        }
                        _ => {}
                    },
                    None => {
                        marks.insert(node, Mark::Done);
                        stack.pop();
                    }
                }
            }
        }
        cycles
    }
}

/// Games a single slot value waits on.
fn slot_dependencies(slot: &TeamSlot, bracket: &BracketDescriptor) -> Vec<GameNumber> {
    let game_ref = |r: &GameRef| match r {
        GameRef::Number(n) => Some(*n),
        GameRef::SemifinalSlot(i) => bracket.semifinal(*i),
    };
    match slot.placeholder() {
        Some(Placeholder::Winner(r) | Placeholder::Loser(r)) => game_ref(r).into_iter().collect(),
        Some(Placeholder::Seed(_)) => bracket.quarterfinal_game_numbers.clone(),
        Some(Placeholder::GameSlot { game_number, .. }) => vec![*game_number],
        Some(Placeholder::GroupPosition { .. } | Placeholder::Named(_)) | None => Vec::new(),
    }
}
