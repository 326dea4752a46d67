//! Dashboard overview payload produced by the summary builder.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::RatingTier;
use crate::structs::Player;

/// Name used for the highest rated player when there are no players.
pub const NO_PLAYER: &str = "None";

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// One group of a group-by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GroupCount {
    /// The grouping key (a position, sport, or location).
    pub key: String,
    /// Number of records with that key.
    pub count: usize,
}

/// Group-by counts in first-seen order of each key.
///
/// Kept as an ordered list rather than a map so the overview renders the
/// groups in the same order every time for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct GroupCounts(pub Vec<GroupCount>);

impl GroupCounts {
    /// Count one occurrence of `key`, appending it if unseen.
    pub fn bump(&mut self, key: &str) {
        if let Some(group) = self.0.iter_mut().find(|g| g.key == key) {
            group.count = group.count.saturating_add(1);
        } else {
            self.0.push(GroupCount {
                key: key.to_owned(),
                count: 1,
            });
        }
    }

    /// Count for `key`, zero if absent.
    pub fn get(&self, key: &str) -> usize {
        self.0
            .iter()
            .find(|g| g.key == key)
            .map_or(0, |g| g.count)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|g| g.key.as_str())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key has been counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for GroupCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::default();
        for key in iter {
            counts.bump(key);
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Rating distribution
// ---------------------------------------------------------------------------

/// Number of players within one rating tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RatingBucket {
    /// The tier.
    pub tier: RatingTier,
    /// Display label of the tier, e.g. `Good (8.0-8.9)`.
    pub label: String,
    /// Number of players in the tier.
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Synthesized match and tournament counts.
///
/// These have no backing data; they are derived from the team count only
/// and are produced only when explicitly enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlaceholderMetrics {
    /// `teams * 4 + 2`.
    pub total_matches: usize,
    /// `max(1, teams / 2)`.
    pub total_tournaments: usize,
}

/// Derived statistics for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DashboardSummary {
    /// Number of teams.
    pub total_teams: usize,
    /// Number of players.
    pub total_players: usize,
    /// Mean player rating, 0 when there are no players.
    pub average_rating: f64,
    /// Mean player age rounded to the nearest year, 0 when there are no players.
    pub average_age: u32,
    /// Players without a team, in input order.
    pub free_agents: Vec<Player>,
    /// Size of [`free_agents`](Self::free_agents).
    pub free_agents_count: usize,
    /// The first few free agents, for the overview card.
    pub free_agent_preview: Vec<Player>,
    /// Highest rated players, best first, ties in input order.
    pub top_players: Vec<Player>,
    /// Full name of the best player, or [`NO_PLAYER`].
    pub highest_rated_player: String,
    /// Rating of the best player.
    pub highest_rating: Option<f64>,
    /// Position to player count, first-seen order.
    pub players_by_position: GroupCounts,
    /// Sport to team count, first-seen order.
    pub teams_by_sport: GroupCounts,
    /// Location to team count, first-seen order.
    pub teams_by_location: GroupCounts,
    /// Mean founded year over teams that have one, 0 when none do.
    pub average_founded_year: f64,
    /// Name of the team with the earliest founded year.
    pub oldest_team: Option<String>,
    /// Player counts per rating tier, best tier first, all tiers present.
    pub rating_distribution: Vec<RatingBucket>,
    /// Synthesized counts, present only when enabled.
    pub placeholder: Option<PlaceholderMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_counts_keep_first_seen_order() {
        let counts: GroupCounts = ["Guard", "Forward", "Guard", "Center", "Forward", "Guard"]
            .into_iter()
            .collect();
        let keys: Vec<&str> = counts.keys().collect();
        assert_eq!(keys, vec!["Guard", "Forward", "Center"]);
        assert_eq!(counts.get("Guard"), 3);
        assert_eq!(counts.get("Forward"), 2);
        assert_eq!(counts.get("Goalkeeper"), 0);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn group_counts_serialize_as_ordered_list() {
        let counts: GroupCounts = ["b", "a", "b"].into_iter().collect();
        let json = serde_json::to_string(&counts).unwrap_or_default();
        assert_eq!(json, r#"[{"key":"b","count":2},{"key":"a","count":1}]"#);
    }
}
