//! Client-side record store and per-table view state.
//!
//! A [`ViewState`] owns the loaded records of one table together with its
//! search text, sort, and load status. Server results are applied through
//! the `record_*` transitions only after the request succeeded, so a
//! failed call leaves the table exactly as it was.

use rosterdash_types::{Player, PlayerId, Team, TeamId};

use crate::query::{Query, Record, apply};

/// A record with a server-assigned identifier.
pub trait Identified {
    /// The identifier type.
    type Id: Copy + Eq + core::fmt::Debug;

    /// The record's identifier.
    fn id(&self) -> Self::Id;
}

impl Identified for Team {
    type Id = TeamId;

    fn id(&self) -> TeamId {
        self.id
    }
}

impl Identified for Player {
    type Id = PlayerId;

    fn id(&self) -> PlayerId {
        self.id
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Ordered list of loaded records.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Identified> Collection<R> {
    /// Wrap an already-loaded list.
    pub const fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// All records in load order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace everything with a fresh load.
    pub fn replace_all(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Append a record the server just created.
    pub fn push_created(&mut self, record: R) {
        self.records.push(record);
    }

    /// Swap in the server's version of an updated record.
    ///
    /// Returns `false` if no record with that id is loaded.
    pub fn replace_updated(&mut self, record: R) -> bool {
        let id = record.id();
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Drop the record with `id`. Returns `false` if it was not loaded.
    pub fn remove(&mut self, id: R::Id) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }

    /// Look up a record by id.
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Load status of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// The initial fetch has not completed.
    #[default]
    Loading,
    /// Records are loaded.
    Ready,
    /// The fetch failed; the message is shown to the user.
    Failed(String),
}

/// Everything one table shows: records, query, and status.
#[derive(Debug, Clone)]
pub struct ViewState<R: Record> {
    collection: Collection<R>,
    query: Query<R::Field>,
    status: LoadStatus,
}

impl<R> Default for ViewState<R>
where
    R: Record + Identified,
    Query<R::Field>: Default,
{
    fn default() -> Self {
        Self::new(Query::default())
    }
}

impl<R: Record + Identified> ViewState<R> {
    /// An empty, loading table with the given initial query.
    pub fn new(query: Query<R::Field>) -> Self {
        Self {
            collection: Collection::default(),
            query,
            status: LoadStatus::Loading,
        }
    }

    /// The loaded records.
    pub const fn collection(&self) -> &Collection<R> {
        &self.collection
    }

    /// The current search and sort.
    pub const fn query(&self) -> &Query<R::Field> {
        &self.query
    }

    /// The load status.
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// A fetch completed.
    pub fn loaded(&mut self, records: Vec<R>) {
        self.collection.replace_all(records);
        self.status = LoadStatus::Ready;
    }

    /// A fetch failed. Previously loaded records are kept but not shown
    /// until the next successful load.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Failed(message.into());
    }

    /// The server created `record`.
    pub fn record_created(&mut self, record: R) {
        self.collection.push_created(record);
    }

    /// The server updated `record`.
    pub fn record_updated(&mut self, record: R) -> bool {
        self.collection.replace_updated(record)
    }

    /// The server deleted the record with `id`.
    pub fn record_deleted(&mut self, id: R::Id) -> bool {
        self.collection.remove(id)
    }

    /// Replace the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Apply a column-header click.
    pub fn toggle_sort(&mut self, field: R::Field) {
        self.query.sort.toggle(field);
    }

    /// The rows to display, filtered and sorted. Empty while the last
    /// load failed.
    pub fn rows(&self) -> Vec<&R> {
        if matches!(self.status, LoadStatus::Failed(_)) {
            return Vec::new();
        }
        apply(self.collection.records(), &self.query)
    }
}

// ---------------------------------------------------------------------------
// Team lookup
// ---------------------------------------------------------------------------

/// What to show in a player's team column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamLabel<'a> {
    /// The player has no team.
    FreeAgent,
    /// The player's team is loaded.
    Known(&'a str),
    /// The player references a team that is not loaded.
    Unknown,
}

impl TeamLabel<'_> {
    /// Display text.
    pub const fn as_str(&self) -> &str {
        match self {
            Self::FreeAgent => "Free Agent",
            Self::Known(name) => *name,
            Self::Unknown => "Unknown",
        }
    }
}

/// Resolve a player's team reference against the loaded teams.
pub fn team_label<'a>(teams: &'a [Team], team_id: Option<TeamId>) -> TeamLabel<'a> {
    let Some(id) = team_id else {
        return TeamLabel::FreeAgent;
    };
    teams
        .iter()
        .find(|t| t.id == id)
        .map_or(TeamLabel::Unknown, |t| TeamLabel::Known(&t.name))
}
