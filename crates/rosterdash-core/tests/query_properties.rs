//! Property tests for the collection query engine and summary builder.
//!
//! Generated rosters exercise the ordering guarantees that the example
//! based unit tests only spot-check: filtering never invents or loses
//! records, sorting is stable, and missing values always sink.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use rosterdash_core::query::{Query, apply};
use rosterdash_core::summary::SummaryBuilder;
use rosterdash_types::{Player, PlayerField, PlayerId, SortDirection, TeamId};

fn player(
    id: i32,
    first: String,
    age: u32,
    rating: f64,
    team: Option<i32>,
    jersey: Option<i32>,
) -> Player {
    Player {
        id: PlayerId(id),
        first_name: first,
        last_name: String::from("Smith"),
        age,
        position: String::from("Guard"),
        rating,
        team_id: team.map(TeamId),
        jersey_number: jersey,
        created_at: None,
        updated_at: None,
    }
}

fn roster() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(
        (
            "[a-z]{1,8}",
            20_u32..23,
            0.0_f64..10.0,
            prop::option::of(1_i32..6),
            prop::option::of(0_i32..100),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .zip(1_i32..)
            .map(|((first, age, rating, team, jersey), id)| player(id, first, age, rating, team, jersey))
            .collect()
    })
}

fn ids(rows: &[&Player]) -> Vec<i32> {
    rows.iter().map(|p| p.id.0).collect()
}

proptest! {
    #[test]
    fn empty_search_keeps_every_record(players in roster()) {
        let rows = apply(&players, &Query::<PlayerField>::default());
        let mut got = ids(&rows);
        got.sort_unstable();
        let want: Vec<i32> = players.iter().map(|p| p.id.0).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn unmatched_search_yields_nothing(players in roster()) {
        let mut query = Query::<PlayerField>::default();
        query.search = String::from("#");
        prop_assert!(apply(&players, &query).is_empty());
    }

    #[test]
    fn search_results_all_match(players in roster(), needle in "[a-z]{1,2}") {
        let mut query = Query::<PlayerField>::default();
        query.search = needle.to_uppercase();
        for row in apply(&players, &query) {
            let hay = format!("{} {}", row.full_name(), row.position).to_lowercase();
            prop_assert!(hay.contains(&needle));
        }
    }

    #[test]
    fn distinct_keys_reverse_between_directions(jerseys in prop::collection::btree_set(0_i32..1000, 0..20)) {
        let players: Vec<Player> = jerseys
            .iter()
            .rev()
            .zip(1_i32..)
            .map(|(jersey, id)| player(id, String::from("p"), 21, 5.0, None, Some(*jersey)))
            .collect();
        let asc = apply(&players, &Query::sorted_by(PlayerField::JerseyNumber, SortDirection::Ascending));
        let desc = apply(&players, &Query::sorted_by(PlayerField::JerseyNumber, SortDirection::Descending));
        let mut reversed = ids(&desc);
        reversed.reverse();
        prop_assert_eq!(ids(&asc), reversed);
        let sorted: Vec<i32> = asc.iter().filter_map(|p| p.jersey_number).collect();
        prop_assert_eq!(sorted, jerseys.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn missing_values_sort_last_in_both_directions(players in roster(), descending in any::<bool>()) {
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let rows = apply(&players, &Query::sorted_by(PlayerField::JerseyNumber, direction));
        let first_missing = rows.iter().position(|p| p.jersey_number.is_none()).unwrap_or(rows.len());
        prop_assert!(rows.iter().skip(first_missing).all(|p| p.jersey_number.is_none()));
    }

    #[test]
    fn equal_keys_keep_input_order(players in roster(), descending in any::<bool>()) {
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let rows = apply(&players, &Query::sorted_by(PlayerField::Age, direction));
        prop_assert_eq!(rows.len(), players.len());
        for pair in rows.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.age == b.age {
                prop_assert!(a.id.0 < b.id.0, "ids {} and {} swapped at age {}", a.id, b.id, a.age);
            } else if descending {
                prop_assert!(a.age > b.age);
            } else {
                prop_assert!(a.age < b.age);
            }
        }
    }

    #[test]
    fn summary_counts_are_consistent(players in roster()) {
        let summary = SummaryBuilder::default().build(&[], &players);
        let free = players.iter().filter(|p| p.team_id.is_none()).count();
        prop_assert_eq!(summary.free_agents_count, free);
        prop_assert_eq!(summary.total_players, players.len());
        prop_assert!(summary.top_players.len() <= 5);
        prop_assert!(summary.free_agent_preview.len() <= 4);
        let by_position: usize = summary.players_by_position.0.iter().map(|g| g.count).sum();
        prop_assert_eq!(by_position, players.len());
        let tiers: usize = summary.rating_distribution.iter().map(|b| b.count).sum();
        prop_assert_eq!(tiers, players.len());
        prop_assert!(
            summary.top_players.windows(2).all(|w| w[0].rating >= w[1].rating)
        );
        let unique: BTreeSet<i32> = summary.top_players.iter().map(|p| p.id.0).collect();
        prop_assert_eq!(unique.len(), summary.top_players.len());
    }
}
