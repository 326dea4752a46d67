//! Terminal front end for the Rosterdash team and player dashboard.
//!
//! Talks to the roster REST API (`ROSTERDASH_API_URL`, default
//! `http://localhost:8080/api`) and prints the overview, the team and
//! player tables, or the result of a create, edit, or delete.
//!
//! Errors print one short message and exit non-zero. Full details go to
//! the log on stderr (`RUST_LOG`, default `info`).

mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rosterdash_core::{PlayerForm, TeamForm};
use rosterdash_types::{PlayerId, TeamId};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

/// Sports team and player dashboard.
#[derive(Parser, Debug)]
#[command(name = "rosterdash", version, about = "Sports team and player dashboard")]
pub struct Cli {
    /// Dashboard settings file (YAML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// REST API base URL (overrides `ROSTERDASH_API_URL`).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Search and sort flags of a table view.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Case-insensitive search text.
    #[arg(long)]
    pub search: Option<String>,

    /// Column to sort by, e.g. `name` or `founded-year`.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

/// Team form fields. Omitted fields keep their current (edit) or empty
/// (add) value.
#[derive(Args, Debug, Clone, Default)]
pub struct TeamFields {
    /// Team name.
    #[arg(long)]
    pub name: Option<String>,
    /// Sport category.
    #[arg(long)]
    pub sport: Option<String>,
    /// Head coach.
    #[arg(long)]
    pub coach: Option<String>,
    /// Home location.
    #[arg(long)]
    pub location: Option<String>,
    /// Year founded.
    #[arg(long)]
    pub founded_year: Option<String>,
}

impl TeamFields {
    /// Overwrite the form fields that were given.
    pub fn apply_to(&self, form: &mut TeamForm) {
        set(&mut form.name, self.name.as_ref());
        set(&mut form.sport, self.sport.as_ref());
        set(&mut form.coach, self.coach.as_ref());
        set(&mut form.location, self.location.as_ref());
        set(&mut form.founded_year, self.founded_year.as_ref());
    }
}

/// Player form fields. Omitted fields keep their current (edit) or empty
/// (add) value.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayerFields {
    /// Given name.
    #[arg(long)]
    pub first_name: Option<String>,
    /// Family name.
    #[arg(long)]
    pub last_name: Option<String>,
    /// Age in years.
    #[arg(long)]
    pub age: Option<String>,
    /// Playing position.
    #[arg(long)]
    pub position: Option<String>,
    /// Rating, 0-10.
    #[arg(long)]
    pub rating: Option<String>,
    /// Team id, or `free` for a free agent.
    #[arg(long)]
    pub team: Option<String>,
    /// Jersey number.
    #[arg(long)]
    pub jersey_number: Option<String>,
}

impl PlayerFields {
    /// Overwrite the form fields that were given.
    pub fn apply_to(&self, form: &mut PlayerForm) {
        set(&mut form.first_name, self.first_name.as_ref());
        set(&mut form.last_name, self.last_name.as_ref());
        set(&mut form.age, self.age.as_ref());
        set(&mut form.position, self.position.as_ref());
        set(&mut form.rating, self.rating.as_ref());
        set(&mut form.team, self.team.as_ref());
        set(&mut form.jersey_number, self.jersey_number.as_ref());
    }
}

fn set(slot: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show summary statistics, top players, and free agents.
    Overview,

    /// List teams.
    Teams {
        /// Search and sort.
        #[command(flatten)]
        table: TableArgs,
        /// Only teams of this sport (filtered by the server).
        #[arg(long)]
        sport: Option<String>,
    },

    /// List players.
    Players {
        /// Search and sort.
        #[command(flatten)]
        table: TableArgs,
        /// Only players on this team (filtered by the server).
        #[arg(long)]
        team: Option<TeamId>,
    },

    /// Create a team.
    AddTeam(TeamFields),

    /// Edit a team.
    EditTeam {
        /// Team to edit.
        id: TeamId,
        /// New values.
        #[command(flatten)]
        fields: TeamFields,
    },

    /// Delete a team.
    DeleteTeam {
        /// Team to delete.
        id: TeamId,
    },

    /// Create a player.
    AddPlayer(PlayerFields),

    /// Edit a player.
    EditPlayer {
        /// Player to edit.
        id: PlayerId,
        /// New values.
        #[command(flatten)]
        fields: PlayerFields,
    },

    /// Delete a player.
    DeletePlayer {
        /// Player to delete.
        id: PlayerId,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(cli.config.as_deref(), cli.api_url)?;
    match cli.command {
        Command::Overview => commands::overview(&ctx).await,
        Command::Teams { table, sport } => commands::teams(&ctx, &table, sport.as_deref()).await,
        Command::Players { table, team } => commands::players(&ctx, &table, team).await,
        Command::AddTeam(fields) => commands::save_team(&ctx, None, &fields).await,
        Command::EditTeam { id, fields } => commands::save_team(&ctx, Some(id), &fields).await,
        Command::DeleteTeam { id } => commands::delete_team(&ctx, id).await,
        Command::AddPlayer(fields) => commands::save_player(&ctx, None, &fields).await,
        Command::EditPlayer { id, fields } => commands::save_player(&ctx, Some(id), &fields).await,
        Command::DeletePlayer { id } => commands::delete_player(&ctx, id).await,
    }
}

/// Application entry point.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_table_flags() {
        let cli = Cli::try_parse_from([
            "rosterdash", "players", "--search", "guard", "--sort", "jersey-number", "--desc",
            "--team", "3",
        ]);
        let Ok(Cli { command: Command::Players { table, team }, .. }) = cli else {
            panic!("players subcommand did not parse");
        };
        assert_eq!(table.search.as_deref(), Some("guard"));
        assert_eq!(table.sort.as_deref(), Some("jersey-number"));
        assert!(table.desc);
        assert_eq!(team, Some(TeamId(3)));
    }

    #[test]
    fn edit_fields_only_override_given_values() {
        let mut form = PlayerForm {
            first_name: String::from("Ada"),
            age: String::from("24"),
            ..PlayerForm::default()
        };
        let fields = PlayerFields {
            age: Some(String::from("25")),
            team: Some(String::from("free")),
            ..PlayerFields::default()
        };
        fields.apply_to(&mut form);
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.age, "25");
        assert_eq!(form.team, "free");
    }
}
