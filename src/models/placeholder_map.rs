//! PlaceholderMap: placeholder -> current value, built fresh for every resolution run.

use crate::models::team_code::{Placeholder, TeamSlot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of [`PlaceholderMap::bind`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Binding {
    Inserted,
    Updated,
    Unchanged,
    /// The key already maps to a final code; the map was left as it was.
    Rejected { existing: TeamSlot },
}

/// End of a chain of map lookups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Chain {
    Team(String),
    /// Last placeholder reached; nothing further is mapped.
    Pending(Placeholder),
    /// The chain revisits a placeholder.
    Cycle(Vec<Placeholder>),
}

/// Placeholder -> value. Ordered so that iteration and serialized output are deterministic.
///
/// Once a placeholder maps to a final code it is never remapped to anything else.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderMap {
    entries: BTreeMap<Placeholder, TeamSlot>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, placeholder: &Placeholder) -> Option<&TeamSlot> {
        self.entries.get(placeholder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Placeholder, &TeamSlot)> {
        self.entries.iter()
    }

    /// Write `key -> value`, refusing to remap a final code and ignoring self-references.
    pub fn bind(&mut self, key: Placeholder, value: TeamSlot) -> Binding {
        if value.placeholder() == Some(&key) {
            return Binding::Unchanged;
        }
        match self.entries.get(&key) {
            Some(existing) if *existing == value => Binding::Unchanged,
            Some(existing) if existing.is_final() => Binding::Rejected {
                existing: existing.clone(),
            },
            Some(_) => {
                self.entries.insert(key, value);
                Binding::Updated
            }
            None => {
                self.entries.insert(key, value);
                Binding::Inserted
            }
        }
    }

    /// Follow map entries from `placeholder` until a final code or an unmapped placeholder.
    pub fn follow(&self, placeholder: &Placeholder) -> Chain {
        let mut seen = BTreeSet::new();
        let mut path = Vec::new();
        let mut current = placeholder;
        loop {
            if !seen.insert(current) {
                path.push(current.clone());
                return Chain::Cycle(path);
            }
            path.push(current.clone());
            match self.entries.get(current) {
                None => return Chain::Pending(current.clone()),
                Some(TeamSlot::Team(code)) => return Chain::Team(code.clone()),
                Some(TeamSlot::Pending(next)) => current = next,
            }
        }
    }

    /// Final team code for `placeholder`, if the chain ends in one.
    pub fn team_for(&self, placeholder: &Placeholder) -> Option<String> {
        match self.follow(placeholder) {
            Chain::Team(code) => Some(code),
            Chain::Pending(_) | Chain::Cycle(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_codes_are_never_remapped() {
        let mut map = PlaceholderMap::new();
        let w57 = Placeholder::winner_of(57);
        assert_eq!(map.bind(w57.clone(), TeamSlot::team("SWE")), Binding::Inserted);
        assert_eq!(map.bind(w57.clone(), TeamSlot::team("SWE")), Binding::Unchanged);
        assert_eq!(
            map.bind(w57.clone(), TeamSlot::team("FIN")),
            Binding::Rejected {
                existing: TeamSlot::team("SWE")
            }
        );
        assert_eq!(map.get(&w57), Some(&TeamSlot::team("SWE")));
    }

    #[test]
    fn pending_values_may_be_refined() {
        let mut map = PlaceholderMap::new();
        let q1 = Placeholder::Seed(1);
        map.bind(q1.clone(), Placeholder::winner_of(57).into());
        assert_eq!(map.bind(q1.clone(), TeamSlot::team("CAN")), Binding::Updated);
        assert_eq!(map.team_for(&q1).as_deref(), Some("CAN"));
    }

    #[test]
    fn follow_walks_chains_and_detects_cycles() {
        let mut map = PlaceholderMap::new();
        let a = Placeholder::Named("x".into());
        let b = Placeholder::Named("y".into());
        map.bind(Placeholder::loser_of(63), Placeholder::loser_of(61).into());
        map.bind(Placeholder::loser_of(61), TeamSlot::team("USA"));
        assert_eq!(
            map.follow(&Placeholder::loser_of(63)),
            Chain::Team("USA".into())
        );

        map.bind(a.clone(), b.clone().into());
        map.bind(b.clone(), a.clone().into());
        assert!(matches!(map.follow(&a), Chain::Cycle(_)));
        assert_eq!(map.bind(a.clone(), a.clone().into()), Binding::Unchanged);
    }
}
