//! Team-slot codes: literal team codes and the placeholder grammar.
//!
//! Fixture text is parsed once into [`TeamSlot`]; everything downstream matches on
//! the variants instead of re-reading the text.

use crate::models::game::{GameNumber, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// True if `code` is a literal team code: exactly three ASCII uppercase letters.
pub fn is_final_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Strip a "Group " prefix: "Group A" -> "A".
pub fn group_key(group: &str) -> &str {
    let group = group.trim();
    group.strip_prefix("Group ").map(str::trim).unwrap_or(group)
}

/// The game a winner/loser placeholder refers to.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum GameRef {
    /// `W(57)`
    Number(GameNumber),
    /// `W(SF1)`: the n-th declared semifinal (1-based).
    SemifinalSlot(u8),
}

/// A not-yet-determined participant.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Placeholder {
    /// `A1`: rank 1 of group A.
    GroupPosition { group: String, rank: u32 },
    /// `W(57)`
    Winner(GameRef),
    /// `L(57)`
    Loser(GameRef),
    /// `Q1`..`Q4`: playoff seed (1 strongest).
    Seed(u8),
    /// One team slot of a specific game, written by the seeding and medal assigners.
    GameSlot { game_number: GameNumber, side: Side },
    /// Any other text. Only resolvable through an explicit map entry.
    Named(String),
}

impl Placeholder {
    pub fn group_position(group: &str, rank: u32) -> Self {
        Placeholder::GroupPosition {
            group: group_key(group).to_string(),
            rank,
        }
    }

    pub fn winner_of(game_number: GameNumber) -> Self {
        Placeholder::Winner(GameRef::Number(game_number))
    }

    pub fn loser_of(game_number: GameNumber) -> Self {
        Placeholder::Loser(GameRef::Number(game_number))
    }

    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(inner) = text.strip_prefix("W(").and_then(|t| t.strip_suffix(')')) {
            if let Some(game) = parse_game_ref(inner) {
                return Placeholder::Winner(game);
            }
        }
        if let Some(inner) = text.strip_prefix("L(").and_then(|t| t.strip_suffix(')')) {
            if let Some(game) = parse_game_ref(inner) {
                return Placeholder::Loser(game);
            }
        }
        if let Some(inner) = text.strip_prefix("slot(").and_then(|t| t.strip_suffix(')')) {
            if let Some((number, side)) = inner.split_once(',') {
                let side = match side.trim() {
                    "1" => Some(Side::One),
                    "2" => Some(Side::Two),
                    _ => None,
                };
                if let (Ok(game_number), Some(side)) = (number.trim().parse(), side) {
                    return Placeholder::GameSlot { game_number, side };
                }
            }
        }
        let mut chars = text.chars();
        if let Some(letter) = chars.next().filter(char::is_ascii_uppercase) {
            let digits = chars.as_str();
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(n) = digits.parse::<u32>() {
                    if letter == 'Q' {
                        if let Ok(index) = u8::try_from(n) {
                            return Placeholder::Seed(index);
                        }
                    } else {
                        return Placeholder::GroupPosition {
                            group: letter.to_string(),
                            rank: n,
                        };
                    }
                }
            }
        }
        Placeholder::Named(text.to_string())
    }
}

fn parse_game_ref(inner: &str) -> Option<GameRef> {
    let inner = inner.trim();
    if let Ok(n) = inner.parse() {
        return Some(GameRef::Number(n));
    }
    let index: u8 = inner.strip_prefix("SF")?.parse().ok()?;
    Some(GameRef::SemifinalSlot(index))
}

impl fmt::Display for GameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameRef::Number(n) => write!(f, "{n}"),
            GameRef::SemifinalSlot(i) => write!(f, "SF{i}"),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::GroupPosition { group, rank } => write!(f, "{group}{rank}"),
            Placeholder::Winner(game) => write!(f, "W({game})"),
            Placeholder::Loser(game) => write!(f, "L({game})"),
            Placeholder::Seed(index) => write!(f, "Q{index}"),
            Placeholder::GameSlot { game_number, side } => {
                let side = match side {
                    Side::One => 1,
                    Side::Two => 2,
                };
                write!(f, "slot({game_number},{side})")
            }
            Placeholder::Named(text) => f.write_str(text),
        }
    }
}

impl From<String> for Placeholder {
    fn from(text: String) -> Self {
        Placeholder::parse(&text)
    }
}

impl From<Placeholder> for String {
    fn from(p: Placeholder) -> Self {
        p.to_string()
    }
}

impl Serialize for Placeholder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Placeholder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Placeholder::from)
    }
}

/// Value of a game's team slot: a literal team code or a placeholder.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamSlot {
    Team(String),
    Pending(Placeholder),
}

impl TeamSlot {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if is_final_code(text) {
            TeamSlot::Team(text.to_string())
        } else {
            TeamSlot::Pending(Placeholder::parse(text))
        }
    }

    pub fn team(code: impl Into<String>) -> Self {
        TeamSlot::Team(code.into())
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TeamSlot::Team(_))
    }

    /// The literal team code, if resolved.
    pub fn team_code(&self) -> Option<&str> {
        match self {
            TeamSlot::Team(code) => Some(code),
            TeamSlot::Pending(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            TeamSlot::Team(_) => None,
            TeamSlot::Pending(p) => Some(p),
        }
    }
}

impl From<Placeholder> for TeamSlot {
    fn from(p: Placeholder) -> Self {
        TeamSlot::Pending(p)
    }
}

impl From<&str> for TeamSlot {
    fn from(text: &str) -> Self {
        TeamSlot::parse(text)
    }
}

impl From<String> for TeamSlot {
    fn from(text: String) -> Self {
        TeamSlot::parse(&text)
    }
}

impl From<TeamSlot> for String {
    fn from(slot: TeamSlot) -> Self {
        slot.to_string()
    }
}

impl fmt::Display for TeamSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSlot::Team(code) => f.write_str(code),
            TeamSlot::Pending(p) => p.fmt(f),
        }
    }
}
