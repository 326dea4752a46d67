//! Aggregate summary builder for the dashboard overview.
//!
//! Derives every overview statistic from the full, unfiltered team and
//! player collections. All averages are guarded: an empty collection
//! yields 0, never NaN.

use rosterdash_types::{
    DashboardSummary, GroupCounts, NO_PLAYER, PlaceholderMetrics, Player, PlayerField,
    RatingBucket, RatingTier, SortDirection, Team,
};
use serde_json::Value;
use tracing::debug;

use crate::config::SummaryConfig;
use crate::normalize::records_or_empty;
use crate::query::{SortState, sort_rows};

/// Builds [`DashboardSummary`] values from team and player collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBuilder {
    top_players_limit: usize,
    free_agent_preview: usize,
    placeholder_metrics: bool,
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::new(&SummaryConfig::default())
    }
}

impl SummaryBuilder {
    /// Create a builder from configuration.
    pub const fn new(config: &SummaryConfig) -> Self {
        Self {
            top_players_limit: config.top_players_limit,
            free_agent_preview: config.free_agent_preview,
            placeholder_metrics: config.placeholder_metrics,
        }
    }

    /// Override the size of the top-players list.
    #[must_use]
    pub const fn with_top_players_limit(mut self, limit: usize) -> Self {
        self.top_players_limit = limit;
        self
    }

    /// Enable or disable the synthesized match/tournament counts.
    #[must_use]
    pub const fn with_placeholder_metrics(mut self, enabled: bool) -> Self {
        self.placeholder_metrics = enabled;
        self
    }

    /// Build the summary from raw API payloads.
    ///
    /// A payload that is not a list (or an envelope around one) counts as
    /// an empty collection.
    pub fn build_from_payloads(&self, teams: &Value, players: &Value) -> DashboardSummary {
        let teams: Vec<Team> = records_or_empty(teams);
        let players: Vec<Player> = records_or_empty(players);
        self.build(&teams, &players)
    }

    /// Build the summary from decoded collections.
    pub fn build(&self, teams: &[Team], players: &[Player]) -> DashboardSummary {
        let ranked = rank_by_rating(players);
        let best = ranked.first().copied();

        let free_agents: Vec<Player> = players
            .iter()
            .filter(|p| p.is_free_agent())
            .cloned()
            .collect();
        let free_agent_preview = free_agents
            .iter()
            .take(self.free_agent_preview)
            .cloned()
            .collect();

        let summary = DashboardSummary {
            total_teams: teams.len(),
            total_players: players.len(),
            average_rating: mean(players.iter().map(|p| p.rating).filter(|r| r.is_finite())),
            average_age: rounded_mean_age(players),
            free_agents_count: free_agents.len(),
            free_agents,
            free_agent_preview,
            top_players: ranked
                .iter()
                .take(self.top_players_limit)
                .map(|p| (*p).clone())
                .collect(),
            highest_rated_player: best.map_or_else(|| NO_PLAYER.to_owned(), Player::full_name),
            highest_rating: best.map(|p| p.rating).filter(|r| r.is_finite()),
            players_by_position: players.iter().map(|p| p.position.as_str()).collect(),
            teams_by_sport: teams.iter().map(|t| t.sport.as_str()).collect(),
            teams_by_location: teams.iter().map(|t| t.location.as_str()).collect(),
            average_founded_year: mean(founded_years(teams).map(f64::from)),
            oldest_team: oldest_team(teams).map(|t| t.name.clone()),
            rating_distribution: rating_distribution(players),
            placeholder: self
                .placeholder_metrics
                .then(|| placeholder_metrics(teams.len())),
        };

        debug!(
            teams = summary.total_teams,
            players = summary.total_players,
            free_agents = summary.free_agents_count,
            "dashboard summary built"
        );

        summary
    }
}

/// Players ordered by rating, best first, ties in input order.
fn rank_by_rating(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    sort_rows(
        &mut ranked,
        SortState::new(PlayerField::Rating, SortDirection::Descending),
    );
    ranked
}

/// Arithmetic mean, 0 for an empty sequence.
#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0_f64, 0_usize), |(sum, count), v| {
        (sum + v, count.saturating_add(1))
    });
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Mean age rounded to the nearest year, 0 with no players.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_mean_age(players: &[Player]) -> u32 {
    let average = mean(players.iter().map(|p| f64::from(p.age)));
    average.round() as u32
}

/// Founded years that are actually known (the backend uses 0 for unknown).
fn founded_years(teams: &[Team]) -> impl Iterator<Item = i32> + '_ {
    teams
        .iter()
        .filter_map(|t| t.founded_year)
        .filter(|year| *year != 0)
}

/// The team with the earliest known founded year; the first one on ties.
fn oldest_team(teams: &[Team]) -> Option<&Team> {
    teams
        .iter()
        .filter(|t| t.founded_year.is_some_and(|year| year != 0))
        .fold(None, |oldest: Option<&Team>, team| match oldest {
            Some(current) if current.founded_year <= team.founded_year => Some(current),
            _ => Some(team),
        })
}

/// Player counts for every rating tier, best tier first.
fn rating_distribution(players: &[Player]) -> Vec<RatingBucket> {
    let tiers: GroupCounts = players
        .iter()
        .map(|p| RatingTier::from_rating(p.rating).label())
        .collect();

    RatingTier::ALL
        .into_iter()
        .map(|tier| RatingBucket {
            tier,
            label: tier.label().to_owned(),
            count: tiers.get(tier.label()),
        })
        .collect()
}

/// Synthesized counts derived from the number of teams alone.
fn placeholder_metrics(team_count: usize) -> PlaceholderMetrics {
    PlaceholderMetrics {
        total_matches: team_count.saturating_mul(4).saturating_add(2),
        total_tournaments: (team_count / 2).max(1),
    }
}
