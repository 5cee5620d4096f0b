//! TeamStanding and GroupStandings: derived group tables, never stored.

use crate::models::game::ResultType;
use serde::{Deserialize, Serialize};

/// One team's line in a group table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// Group key ("A"), without a "Group " prefix.
    pub group: String,
    pub team_code: String,
    pub games_played: u32,
    pub wins: u32,
    pub overtime_wins: u32,
    pub shootout_wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
    pub shootout_losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub points: u32,
    /// 1-based; 0 until ranked.
    pub rank_in_group: u32,
}

impl TeamStanding {
    pub fn new(group: impl Into<String>, team_code: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            team_code: team_code.into(),
            ..Self::default()
        }
    }

    /// Record one decided game from this team's point of view.
    pub fn record(&mut self, goals_for: u32, goals_against: u32, result_type: ResultType) {
        self.games_played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        self.goal_diff = self.goals_for as i32 - self.goals_against as i32;
        let (win_points, loss_points) = result_type.points();
        if goals_for > goals_against {
            self.points += win_points;
            match result_type {
                ResultType::Regulation => self.wins += 1,
                ResultType::Overtime => self.overtime_wins += 1,
                ResultType::Shootout => self.shootout_wins += 1,
            }
        } else if goals_for < goals_against {
            self.points += loss_points;
            match result_type {
                ResultType::Regulation => self.losses += 1,
                ResultType::Overtime => self.overtime_losses += 1,
                ResultType::Shootout => self.shootout_losses += 1,
            }
        }
    }

    /// (points, goal_diff, goals_for), the primary sort key (higher is better).
    pub fn primary_key(&self) -> (u32, i32, u32) {
        (self.points, self.goal_diff, self.goals_for)
    }
}

/// Ranked table of one group.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings {
    pub group: String,
    /// Ordered by rank, best first.
    pub teams: Vec<TeamStanding>,
    /// Blocks of team codes that no tiebreaker could separate; ordered by code.
    pub unresolved_ties: Vec<Vec<String>>,
}

impl GroupStandings {
    pub fn team(&self, team_code: &str) -> Option<&TeamStanding> {
        self.teams.iter().find(|t| t.team_code == team_code)
    }

    /// Team at a 1-based rank.
    pub fn at_rank(&self, rank: u32) -> Option<&TeamStanding> {
        self.teams.iter().find(|t| t.rank_in_group == rank)
    }
}
