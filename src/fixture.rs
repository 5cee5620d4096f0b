//! Fixture import: schedule JSON to games and bracket shape, CSV score sheets to results.

use crate::models::{
    BracketDescriptor, Game, GameNumber, ResultType, Round, TeamSlot, Tournament, TournamentError,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default, alias = "host_teams")]
    hosts: Vec<String>,
    #[serde(default)]
    qf_game_numbers: Option<Vec<GameNumber>>,
    #[serde(default)]
    sf_game_numbers: Option<Vec<GameNumber>>,
    schedule: Option<Vec<FixtureGame>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureGame {
    game_number: Option<GameNumber>,
    round: String,
    #[serde(default)]
    group: Option<String>,
    team1: String,
    team2: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    venue: Option<String>,
}

/// Games and playoff shape read from one fixture document.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub games: Vec<Game>,
    pub bracket: BracketDescriptor,
}

/// Parse a fixture document.
///
/// Round names are matched by substring (see [`Round::from_name`]); names that match no
/// round are non-bracket games and read as group stage. Explicit, non-empty
/// `qf_game_numbers` / `sf_game_numbers` lists take precedence over the round names.
pub fn parse_fixture(json: &str) -> Result<Fixture, TournamentError> {
    let file: FixtureFile = serde_json::from_str(json)?;
    let schedule = file.schedule.ok_or(TournamentError::MissingSchedule)?;

    let mut seen = HashSet::new();
    let mut games = Vec::with_capacity(schedule.len());
    for entry in schedule {
        let game_number = entry.game_number.ok_or(TournamentError::MissingGameNumber)?;
        if !seen.insert(game_number) {
            return Err(TournamentError::DuplicateGameNumber(game_number));
        }
        let round = Round::from_name(&entry.round).unwrap_or_else(|| {
            log::debug!(
                "Game {}: round \"{}\" is not a playoff round; treated as group stage",
                game_number,
                entry.round
            );
            Round::GroupStage
        });
        let mut game = Game::new(
            game_number,
            round,
            TeamSlot::parse(&entry.team1),
            TeamSlot::parse(&entry.team2),
        );
        game.group = entry.group;
        game.date = entry.date;
        game.start_time = entry.start_time;
        game.location = entry.location;
        game.venue = entry.venue;
        games.push(game);
    }
    games.sort_by_key(|g| g.game_number);

    let mut bracket = BracketDescriptor::from_games(&games, file.hosts);
    if let Some(qf) = file.qf_game_numbers.filter(|v| !v.is_empty()) {
        bracket.quarterfinal_game_numbers = qf;
    }
    if let Some(sf) = file.sf_game_numbers.filter(|v| !v.is_empty()) {
        bracket.semifinal_game_numbers = sf;
    }
    log::debug!(
        "Fixture: {} games, quarterfinals {:?}, semifinals {:?}, bronze {:?}, gold {:?}",
        games.len(),
        bracket.quarterfinal_game_numbers,
        bracket.semifinal_game_numbers,
        bracket.bronze_game_number,
        bracket.gold_game_number
    );
    Ok(Fixture { games, bracket })
}

impl Tournament {
    /// Create a tournament from a fixture document.
    pub fn from_fixture(name: impl Into<String>, json: &str) -> Result<Self, TournamentError> {
        let Fixture { games, bracket } = parse_fixture(json)?;
        Ok(Tournament::new(name, games, bracket))
    }
}

/// One row of a score sheet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreEntry {
    pub game_number: GameNumber,
    pub team1_score: u32,
    pub team2_score: u32,
    pub result_type: Option<ResultType>,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    game_number: GameNumber,
    team1_score: u32,
    team2_score: u32,
    #[serde(default)]
    result_type: Option<String>,
}

/// Read a CSV score sheet with header `game_number,team1_score,team2_score,result_type`.
pub fn read_scores<R: std::io::Read>(reader: R) -> Result<Vec<ScoreEntry>, TournamentError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();
    for row in csv_reader.deserialize::<ScoreRow>() {
        let row = row?;
        let result_type = match row.result_type.as_deref().filter(|c| !c.is_empty()) {
            None => None,
            Some(code) => Some(
                ResultType::from_code(code)
                    .ok_or_else(|| TournamentError::InvalidResultType(code.to_string()))?,
            ),
        };
        entries.push(ScoreEntry {
            game_number: row.game_number,
            team1_score: row.team1_score,
            team2_score: row.team2_score,
            result_type,
        });
    }
    Ok(entries)
}

/// Apply a score sheet. Nothing is applied if any row names an unknown game.
pub fn apply_scores<R: std::io::Read>(
    tournament: &mut Tournament,
    reader: R,
) -> Result<usize, TournamentError> {
    let entries = read_scores(reader)?;
    if let Some(missing) = entries.iter().find(|e| tournament.game(e.game_number).is_none()) {
        return Err(TournamentError::GameNotFound(missing.game_number));
    }
    for e in &entries {
        tournament.set_score(e.game_number, e.team1_score, e.team2_score, e.result_type)?;
    }
    log::info!("Tournament {}: applied {} score(s)", tournament.id, entries.len());
    Ok(entries.len())
}
