//! Group stage: standings tables with tiebreakers.

use crate::models::{
    group_key, Binding, Game, GroupStandings, Placeholder, PlaceholderMap, Round, TeamSlot,
    TeamStanding,
};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Per-group standings, keyed by group key ("A", "B", ...).
pub type Standings = BTreeMap<String, GroupStandings>;

/// Compute ranked standings from all completed group-stage games.
///
/// Only games with both scores and two literal team codes count. Teams are ordered by
/// points, goal difference and goals for (all descending); teams still level are split
/// by a head-to-head table over the games among themselves. A group with no completed
/// games does not appear.
pub fn calculate_standings(games: &[Game]) -> Standings {
    let mut tables: BTreeMap<String, BTreeMap<String, TeamStanding>> = BTreeMap::new();
    let mut group_games: BTreeMap<String, Vec<&Game>> = BTreeMap::new();

    for game in games.iter().filter(|g| g.round == Round::GroupStage) {
        let (Some((s1, s2)), Some(t1), Some(t2)) =
            (game.score(), game.team1.team_code(), game.team2.team_code())
        else {
            continue;
        };
        let Some(group) = game.group.as_deref().map(group_key) else {
            log::debug!("Game {} has no group; left out of standings", game.game_number);
            continue;
        };
        let result_type = game.result_type.unwrap_or_default();
        let table = tables.entry(group.to_string()).or_default();
        table
            .entry(t1.to_string())
            .or_insert_with(|| TeamStanding::new(group, t1))
            .record(s1, s2, result_type);
        table
            .entry(t2.to_string())
            .or_insert_with(|| TeamStanding::new(group, t2))
            .record(s2, s1, result_type);
        group_games.entry(group.to_string()).or_default().push(game);
    }

    tables
        .into_iter()
        .map(|(group, table)| {
            let games = group_games.remove(&group).unwrap_or_default();
            let ranked = rank_group(&group, table, &games);
            (group, ranked)
        })
        .collect()
}

/// Pre-seed a placeholder map with group positions: `A1` -> rank-1 team of group A.
///
/// Hosts also get `H{rank}` for their rank within their own group. The first listed host
/// keeps a contested `H` code, and a real group named "H" takes precedence over both.
pub fn seed_group_positions(standings: &Standings, hosts: &[String]) -> PlaceholderMap {
    let mut map = PlaceholderMap::new();
    for (group, table) in standings {
        for team in &table.teams {
            map.bind(
                Placeholder::group_position(group, team.rank_in_group),
                TeamSlot::team(team.team_code.clone()),
            );
        }
    }
    if standings.contains_key(HOST_GROUP) {
        log::debug!("Group {} exists; host placeholders not bound", HOST_GROUP);
        return map;
    }
    for host in hosts {
        let Some(team) = find_team(standings, host) else {
            continue;
        };
        let key = Placeholder::group_position(HOST_GROUP, team.rank_in_group);
        if let Binding::Rejected { existing } = map.bind(key, TeamSlot::team(host.clone())) {
            log::debug!(
                "Host {} also ranked {} in its group; H{} stays {}",
                host,
                team.rank_in_group,
                team.rank_in_group,
                existing
            );
        }
    }
    map
}

/// Group letter of host placeholders (`H1`, `H2`).
const HOST_GROUP: &str = "H";

/// Look a team up across all groups.
pub fn find_team<'a>(standings: &'a Standings, team_code: &str) -> Option<&'a TeamStanding> {
    standings.values().find_map(|g| g.team(team_code))
}

fn rank_group(group: &str, table: BTreeMap<String, TeamStanding>, games: &[&Game]) -> GroupStandings {
    let mut teams: Vec<TeamStanding> = table.into_values().collect();
    // BTreeMap order already gives code order as the last key.
    teams.sort_by_key(|t| Reverse(t.primary_key()));

    let mut order = Vec::with_capacity(teams.len());
    let mut unresolved_ties = Vec::new();
    for block in teams.chunk_by(|a, b| a.primary_key() == b.primary_key()) {
        if block.len() == 1 {
            order.push(block[0].team_code.clone());
            continue;
        }
        let codes: Vec<String> = block.iter().map(|t| t.team_code.clone()).collect();
        break_tie(&codes, games, block, &mut order, &mut unresolved_ties);
    }

    for tie in &unresolved_ties {
        log::warn!("Group {}: tie between {:?} not broken by any tiebreaker", group, tie);
    }

    let mut by_code: BTreeMap<String, TeamStanding> =
        teams.into_iter().map(|t| (t.team_code.clone(), t)).collect();
    let teams = order
        .iter()
        .enumerate()
        .filter_map(|(i, code)| {
            let mut team = by_code.remove(code)?;
            team.rank_in_group = i as u32 + 1;
            Some(team)
        })
        .collect();

    GroupStandings {
        group: group.to_string(),
        teams,
        unresolved_ties,
    }
}

/// Order `tied` (level on points, goal difference and goals for) by a head-to-head table.
///
/// Sub-blocks the table cannot separate are broken again with their own, smaller
/// head-to-head table. A block that no longer shrinks falls back to the full-group goal
/// difference and goals for, then to team code, and is reported as unresolved.
fn break_tie(
    tied: &[String],
    games: &[&Game],
    overall: &[TeamStanding],
    order: &mut Vec<String>,
    unresolved: &mut Vec<Vec<String>>,
) {
    let mini = head_to_head_table(tied, games);
    let key = |code: &String| {
        let h2h = mini.get(code).map(TeamStanding::primary_key).unwrap_or_default();
        let full = overall
            .iter()
            .find(|t| &t.team_code == code)
            .map(|t| (t.goal_diff, t.goals_for))
            .unwrap_or_default();
        (h2h, full)
    };

    let mut sorted: Vec<String> = tied.to_vec();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)).then_with(|| a.cmp(b)));

    for block in sorted.chunk_by(|a, b| key(a) == key(b)) {
        if block.len() == 1 {
            order.push(block[0].clone());
        } else if block.len() < tied.len() {
            break_tie(block, games, overall, order, unresolved);
        } else {
            order.extend(block.iter().cloned());
            unresolved.push(block.to_vec());
        }
    }
}

/// Points, goal difference and goals for counting only games among `teams`.
fn head_to_head_table(teams: &[String], games: &[&Game]) -> BTreeMap<String, TeamStanding> {
    let mut table: BTreeMap<String, TeamStanding> = teams
        .iter()
        .map(|code| (code.clone(), TeamStanding::new("", code.clone())))
        .collect();
    for game in games {
        let (Some((s1, s2)), Some(t1), Some(t2)) =
            (game.score(), game.team1.team_code(), game.team2.team_code())
        else {
            continue;
        };
        if !(table.contains_key(t1) && table.contains_key(t2)) {
            continue;
        }
        let result_type = game.result_type.unwrap_or_default();
        if let Some(t) = table.get_mut(t1) {
            t.record(s1, s2, result_type);
        }
        if let Some(t) = table.get_mut(t2) {
            t.record(s2, s1, result_type);
        }
    }
    table
}
