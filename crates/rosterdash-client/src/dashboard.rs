//! Joined loading of the dashboard overview.

use rosterdash_core::SummaryBuilder;
use rosterdash_types::{DashboardSummary, Player, Team};
use tracing::info;

use crate::error::ClientError;
use crate::gateway::ApiClient;

/// Everything the overview page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// All teams.
    pub teams: Vec<Team>,
    /// All players.
    pub players: Vec<Player>,
    /// Statistics over both collections.
    pub summary: DashboardSummary,
}

/// Fetch teams and players concurrently and summarize them.
///
/// Both fetches must succeed. If either fails, no summary is built and
/// the first error is returned.
///
/// # Errors
///
/// The first failure of either fetch.
pub async fn load_dashboard(
    api: &ApiClient,
    builder: &SummaryBuilder,
) -> Result<Dashboard, ClientError> {
    let (teams, players) = tokio::try_join!(api.list::<Team>(), api.list::<Player>())?;
    let summary = builder.build(&teams, &players);
    info!(
        teams = summary.total_teams,
        players = summary.total_players,
        free_agents = summary.free_agents_count,
        "Dashboard loaded"
    );
    Ok(Dashboard {
        teams,
        players,
        summary,
    })
}
