//! Shared builders: a two-group championship with the usual 8-team playoff.
#![allow(dead_code)]

use championship_bracket::{BracketDescriptor, Game, ResultType, Round, TeamSlot, Tournament};

pub const GROUP_A: [&str; 4] = ["SWE", "FIN", "CAN", "SUI"];
pub const GROUP_B: [&str; 4] = ["USA", "DEN", "CZE", "GER"];

/// Six games where the team listed earlier always wins `winner_goals`-1 in regulation,
/// so final ranks follow list order.
pub fn round_robin(first_number: u32, group: &str, teams: [&str; 4], winner_goals: u32) -> Vec<Game> {
    [(0, 1), (2, 3), (0, 2), (1, 3), (0, 3), (1, 2)]
        .into_iter()
        .zip(first_number..)
        .map(|((i, j), n)| {
            Game::new(n, Round::GroupStage, TeamSlot::team(teams[i]), TeamSlot::team(teams[j]))
                .in_group(format!("Group {group}"))
                .with_score(winner_goals, 1, ResultType::Regulation)
        })
        .collect()
}

pub fn playoff(n: u32, round: Round, team1: &str, team2: &str) -> Game {
    Game::new(n, round, TeamSlot::parse(team1), TeamSlot::parse(team2))
}

/// Group A won 2-1 every time, group B 4-1, so B's teams carry the larger goal difference.
/// Quarterfinals 57-60 cross the groups, semifinals 61-62, bronze 63, gold 64.
/// Group stage complete, playoffs unplayed.
pub fn championship(hosts: &[&str]) -> Tournament {
    let mut games = round_robin(1, "A", GROUP_A, 2);
    games.extend(round_robin(7, "B", GROUP_B, 4));
    games.extend([
        playoff(57, Round::Quarterfinal, "A1", "B4"),
        playoff(58, Round::Quarterfinal, "A2", "B3"),
        playoff(59, Round::Quarterfinal, "B1", "A4"),
        playoff(60, Round::Quarterfinal, "B2", "A3"),
        playoff(61, Round::Semifinal, "W(57)", "W(60)"),
        playoff(62, Round::Semifinal, "W(58)", "W(59)"),
        playoff(63, Round::Bronze, "L(SF1)", "L(SF2)"),
        playoff(64, Round::Gold, "W(SF1)", "W(SF2)"),
    ]);
    let hosts = hosts.iter().map(|h| h.to_string()).collect();
    let bracket = BracketDescriptor::from_games(&games, hosts);
    Tournament::new("Championship", games, bracket)
}

/// Team 1 wins every quarterfinal 3-1: SWE, FIN, USA and DEN go through.
pub fn play_quarterfinals(t: &mut Tournament) {
    for n in 57..=60 {
        t.set_score(n, 3, 1, Some(ResultType::Regulation)).unwrap();
    }
}
