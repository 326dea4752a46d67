//! Subcommand implementations.
//!
//! Every request failure is logged with its full detail and surfaced to
//! the user as a single short message.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context as _, Result, anyhow};
use rosterdash_client::{ApiClient, ClientConfig, ClientError, editor, load_dashboard};
use rosterdash_core::{
    DashboardConfig, FormSession, PlayerForm, Query, SortState, SummaryBuilder, TeamForm,
    ViewState,
};
use rosterdash_types::{
    Player, PlayerField, PlayerId, SortDirection, Team, TeamField, TeamId, UnknownField,
};
use tracing::{info, warn};

use crate::render;
use crate::{PlayerFields, TableArgs, TeamFields};

/// Shared state of one CLI invocation.
pub struct Context {
    api: ApiClient,
    builder: SummaryBuilder,
}

impl Context {
    /// Load dashboard settings and build the API client.
    pub fn new(config_path: Option<&Path>, api_url: Option<String>) -> Result<Self> {
        let dashboard = match config_path {
            Some(path) => DashboardConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DashboardConfig::default(),
        };

        let mut client_config = ClientConfig::from_env()?;
        if let Some(url) = api_url {
            client_config.api_url = url.trim_end_matches('/').to_owned();
        }
        info!(
            api_url = client_config.api_url,
            timeout_ms = client_config.timeout.as_millis(),
            "configuration loaded"
        );

        Ok(Self {
            api: ApiClient::new(&client_config)?,
            builder: SummaryBuilder::new(&dashboard.summary),
        })
    }
}

/// Log a request failure and replace it with its user-facing message.
fn user_facing(action: &'static str) -> impl Fn(ClientError) -> anyhow::Error {
    move |e| {
        warn!(action, error = %e, transport = e.is_transport(), "request failed");
        anyhow!(e.user_message(action))
    }
}

/// Build a table query from command-line flags.
///
/// `--sort` picks the column, ascending unless `--desc` is given. Without
/// `--sort` the table's default order is kept and `--desc` forces it
/// descending.
fn table_query<F>(mut query: Query<F>, args: &TableArgs) -> Result<Query<F>>
where
    F: FromStr<Err = UnknownField> + Copy + Eq,
{
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    if let Some(field) = args.sort.as_deref() {
        query.sort = SortState::new(field.parse()?, direction);
    } else if args.desc {
        query.sort.direction = SortDirection::Descending;
    }
    query.search = args.search.clone().unwrap_or_default();
    Ok(query)
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// `rosterdash overview`
pub async fn overview(ctx: &Context) -> Result<()> {
    let dashboard = load_dashboard(&ctx.api, &ctx.builder)
        .await
        .map_err(user_facing("load dashboard"))?;
    print!("{}", render::overview(&dashboard.summary, &dashboard.teams));
    Ok(())
}

/// `rosterdash teams`
pub async fn teams(ctx: &Context, args: &TableArgs, sport: Option<&str>) -> Result<()> {
    let mut view = ViewState::new(table_query(Query::<TeamField>::default(), args)?);
    match sport {
        Some(sport) => {
            let teams = ctx
                .api
                .teams_by_sport(sport)
                .await
                .map_err(user_facing("load teams"))?;
            view.loaded(teams);
        }
        None => editor::refresh(&ctx.api, &mut view)
            .await
            .map_err(user_facing("load teams"))?,
    }
    print!("{}", render::teams_table(&view.rows()));
    Ok(())
}

/// `rosterdash players`
pub async fn players(ctx: &Context, args: &TableArgs, team: Option<TeamId>) -> Result<()> {
    let mut view = ViewState::new(table_query(Query::<PlayerField>::default(), args)?);
    let teams = match team {
        Some(team_id) => {
            let (teams, players) = tokio::try_join!(
                ctx.api.list::<Team>(),
                ctx.api.players_by_team(team_id)
            )
            .map_err(user_facing("load players"))?;
            view.loaded(players);
            teams
        }
        None => {
            let (teams, ()) = tokio::try_join!(
                ctx.api.list::<Team>(),
                editor::refresh(&ctx.api, &mut view)
            )
            .map_err(user_facing("load players"))?;
            teams
        }
    };
    print!("{}", render::players_table(&view.rows(), &teams));
    Ok(())
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// `rosterdash add-team` / `rosterdash edit-team`
pub async fn save_team(ctx: &Context, id: Option<TeamId>, fields: &TeamFields) -> Result<()> {
    let mut view: ViewState<Team> = ViewState::default();
    let (mut session, mut form) = match id {
        Some(id) => {
            editor::refresh(&ctx.api, &mut view)
                .await
                .map_err(user_facing("load teams"))?;
            let team = view
                .collection()
                .get(id)
                .ok_or_else(|| anyhow!("Team {id} not found"))?;
            (FormSession::edit(id), TeamForm::from_team(team))
        }
        None => (FormSession::create(), TeamForm::default()),
    };
    fields.apply_to(&mut form);

    let team = editor::submit(&ctx.api, &mut view, &mut session, &form)
        .await
        .map_err(user_facing("save team"))?;
    println!("Saved team {} ({})", team.name, team.id);
    Ok(())
}

/// `rosterdash add-player` / `rosterdash edit-player`
pub async fn save_player(
    ctx: &Context,
    id: Option<PlayerId>,
    fields: &PlayerFields,
) -> Result<()> {
    let mut view: ViewState<Player> = ViewState::default();
    let (mut session, mut form) = match id {
        Some(id) => {
            editor::refresh(&ctx.api, &mut view)
                .await
                .map_err(user_facing("load players"))?;
            let player = view
                .collection()
                .get(id)
                .ok_or_else(|| anyhow!("Player {id} not found"))?;
            (FormSession::edit(id), PlayerForm::from_player(player))
        }
        None => (FormSession::create(), PlayerForm::default()),
    };
    fields.apply_to(&mut form);

    let player = editor::submit(&ctx.api, &mut view, &mut session, &form)
        .await
        .map_err(user_facing("save player"))?;
    println!("Saved player {} ({})", player.full_name(), player.id);
    Ok(())
}

/// `rosterdash delete-team`
pub async fn delete_team(ctx: &Context, id: TeamId) -> Result<()> {
    let mut view: ViewState<Team> = ViewState::default();
    editor::delete(&ctx.api, &mut view, id)
        .await
        .map_err(user_facing("delete team"))?;
    println!("Deleted team {id}");
    Ok(())
}

/// `rosterdash delete-player`
pub async fn delete_player(ctx: &Context, id: PlayerId) -> Result<()> {
    let mut view: ViewState<Player> = ViewState::default();
    editor::delete(&ctx.api, &mut view, id)
        .await
        .map_err(user_facing("delete player"))?;
    println!("Deleted player {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(search: Option<&str>, sort: Option<&str>, desc: bool) -> TableArgs {
        TableArgs {
            search: search.map(str::to_owned),
            sort: sort.map(str::to_owned),
            desc,
        }
    }

    #[test]
    fn default_player_order_is_kept_without_flags() {
        let query = table_query(Query::<PlayerField>::default(), &args(None, None, false)).ok();
        assert_eq!(query, Some(Query::<PlayerField>::default()));
    }

    #[test]
    fn sort_flag_selects_column() {
        let query = table_query(
            Query::<TeamField>::default(),
            &args(Some("ice"), Some("founded-year"), true),
        )
        .ok();
        assert_eq!(
            query,
            Some(Query {
                search: String::from("ice"),
                sort: SortState::new(TeamField::FoundedYear, SortDirection::Descending),
            })
        );
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let query = table_query(Query::<TeamField>::default(), &args(None, Some("mascot"), false));
        assert!(query.is_err());
    }
}
