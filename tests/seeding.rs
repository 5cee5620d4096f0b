//! Integration tests for semifinal seeding: standings order, host rule and manual override.

mod common;

use championship_bracket::{
    assign_seeding, BracketDescriptor, Pairing, Placeholder, PlaceholderMap, SeedingOverride,
    SeedingSource, Standings, TeamSlot,
};
use common::{championship, play_quarterfinals};

fn pairing(game_number: u32, team1: &str, team2: &str) -> Pairing {
    Pairing {
        game_number,
        team1: team1.into(),
        team2: team2.into(),
    }
}

#[test]
fn winners_are_ranked_by_group_standing() {
    let mut t = championship(&[]);
    play_quarterfinals(&mut t);
    let r = t.resolve();
    let seeding = r.seeding.as_ref().unwrap();

    // Both group winners first, B's on goal difference; then both runners-up.
    assert_eq!(seeding.seeds, ["USA", "SWE", "DEN", "FIN"]);
    assert_eq!(seeding.source, SeedingSource::Standings);
    assert_eq!(
        seeding.semifinals,
        Some([pairing(61, "USA", "FIN"), pairing(62, "SWE", "DEN")])
    );
    assert_eq!(r.team_for("Q1").as_deref(), Some("USA"));
    assert_eq!(r.team_for("Q4").as_deref(), Some("FIN"));
}

#[test]
fn host_pairing_moves_to_first_semifinal() {
    let mut t = championship(&["SWE", "DEN"]);
    play_quarterfinals(&mut t);
    let r = t.resolve();

    let semifinals = r.seeding.as_ref().and_then(|s| s.semifinals.clone()).unwrap();
    assert_eq!(semifinals, [pairing(61, "SWE", "DEN"), pairing(62, "USA", "FIN")]);
    let sf1 = &r.game(61).unwrap().game;
    assert_eq!(sf1.team1, TeamSlot::team("SWE"));
    assert_eq!(sf1.team2, TeamSlot::team("DEN"));
    // Fixture text is kept alongside.
    assert_eq!(r.game(61).unwrap().original_team1.to_string(), "W(57)");
}

#[test]
fn first_listed_host_among_seeds_decides() {
    // FIN (seed 4) is listed first, so the 1v4 pairing stays on SF1 although SWE is a host too.
    let mut t = championship(&["NOR", "FIN", "SWE"]);
    play_quarterfinals(&mut t);
    let semifinals = t.resolve().seeding.unwrap().semifinals.unwrap();
    assert_eq!(semifinals[0], pairing(61, "USA", "FIN"));
}

#[test]
fn matching_override_replaces_computed_seeds() {
    let mut t = championship(&["SWE", "DEN"]);
    play_quarterfinals(&mut t);
    t.set_seeding_override(SeedingOverride::new(["FIN", "DEN", "SWE", "USA"]));
    let r = t.resolve();

    let seeding = r.seeding.as_ref().unwrap();
    assert_eq!(seeding.source, SeedingSource::Override);
    assert_eq!(seeding.seeds, ["FIN", "DEN", "SWE", "USA"]);
    // 1v4 is FIN-USA, 2v3 is DEN-SWE; the host pairing goes first.
    assert_eq!(
        seeding.semifinals,
        Some([pairing(61, "DEN", "SWE"), pairing(62, "FIN", "USA")])
    );
    assert_eq!(r.team_for("Q1").as_deref(), Some("FIN"));
}

#[test]
fn foreign_override_is_ignored() {
    let mut t = championship(&["SWE", "DEN"]);
    play_quarterfinals(&mut t);
    let plain = t.resolve();

    t.set_seeding_override(SeedingOverride::new(["USA", "SWE", "DEN", "NOR"]));
    assert_eq!(t.resolve(), plain);

    t.set_seeding_override(SeedingOverride::new(["USA", "USA", "DEN", "FIN"]));
    assert_eq!(t.resolve(), plain);

    t.clear_seeding_override();
    assert_eq!(t.resolve(), plain);
}

#[test]
fn no_seeding_until_all_quarterfinals_decided() {
    let mut t = championship(&[]);
    play_quarterfinals(&mut t);
    t.clear_score(60).unwrap();
    let r = t.resolve();
    assert!(r.seeding.is_none());
    assert_eq!(r.team_for("Q1"), None);
}

#[test]
fn winners_without_standings_keep_quarterfinal_order() {
    let bracket = BracketDescriptor {
        quarterfinal_game_numbers: vec![57, 58, 59, 60],
        semifinal_game_numbers: vec![61, 62],
        ..BracketDescriptor::default()
    };
    let mut map = PlaceholderMap::new();
    for (n, code) in (57..).zip(["CAN", "SWE", "FIN", "USA"]) {
        map.bind(Placeholder::winner_of(n), TeamSlot::team(code));
    }

    let assignment = assign_seeding(&map, &bracket, &Standings::new(), None).unwrap();
    assert_eq!(assignment.seeding.seeds, ["CAN", "SWE", "FIN", "USA"]);
    assert_eq!(assignment.seeding.source, SeedingSource::QuarterfinalOrder);
    assert!(assignment.seeding.semifinals.is_none());
    assert_eq!(
        assignment.bindings,
        vec![
            (Placeholder::Seed(1), TeamSlot::team("CAN")),
            (Placeholder::Seed(2), TeamSlot::team("SWE")),
            (Placeholder::Seed(3), TeamSlot::team("FIN")),
            (Placeholder::Seed(4), TeamSlot::team("USA")),
        ]
    );
}

#[test]
fn three_quarterfinals_give_no_seeding() {
    let bracket = BracketDescriptor {
        quarterfinal_game_numbers: vec![57, 58, 59],
        ..BracketDescriptor::default()
    };
    let mut map = PlaceholderMap::new();
    for n in 57..=59 {
        map.bind(Placeholder::winner_of(n), TeamSlot::team("SWE"));
    }
    assert!(assign_seeding(&map, &bracket, &Standings::new(), None).is_none());
}
