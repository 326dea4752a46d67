//! Collection query engine: free-text filtering plus stable, direction-aware
//! sorting of team and player tables.
//!
//! The engine is a pure function of `(records, search, sort)`. It never
//! mutates its input; it returns a new ordered view of borrowed records.
//!
//! # Comparison policy
//!
//! | left | right | result |
//! |------|-------|--------|
//! | text | text | [`locale_cmp`], negated for descending |
//! | number | number | arithmetic order, negated for descending |
//! | number | text | number first, negated for descending |
//! | missing | present | missing last, **in both directions** |
//! | missing | missing | equal |
//!
//! The missing-last rule does not reverse: flipping the
//! direction reverses present values only. Descending order negates the
//! comparison instead of reversing the sorted output, so equal keys keep
//! their input order in both directions.

use std::borrow::Cow;
use std::cmp::Ordering;

use rosterdash_types::{Player, PlayerField, SortDirection, Team, TeamField};

use crate::collate::locale_cmp;

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// The value of one sortable field of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// A text field.
    Text(Cow<'a, str>),
    /// A numeric field. Never NaN; see [`FieldValue::number`].
    Number(f64),
    /// No value.
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Wrap a number, treating NaN as missing so the ordering stays total.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Number(value)
        }
    }

    /// Borrow a text value.
    pub const fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// Wrap an optional integer.
    pub fn optional_int(value: Option<i32>) -> Self {
        value.map_or(Self::Missing, |v| Self::Number(f64::from(v)))
    }
}

/// Compare two field values under a sort direction.
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>, direction: SortDirection) -> Ordering {
    let directed = |ord: Ordering| match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    };

    match (a, b) {
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Greater,
        (_, FieldValue::Missing) => Ordering::Less,
        (FieldValue::Text(x), FieldValue::Text(y)) => directed(locale_cmp(x, y)),
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            directed(x.partial_cmp(y).unwrap_or(Ordering::Equal))
        }
        (FieldValue::Number(_), FieldValue::Text(_)) => directed(Ordering::Less),
        (FieldValue::Text(_), FieldValue::Number(_)) => directed(Ordering::Greater),
    }
}

// ---------------------------------------------------------------------------
// Queryable records
// ---------------------------------------------------------------------------

/// A record type the query engine can filter and sort.
pub trait Record {
    /// The sortable columns of this record type.
    type Field: Copy + Eq + core::fmt::Debug;

    /// Value of a sortable field.
    fn field(&self, field: Self::Field) -> FieldValue<'_>;

    /// Whether any searchable field contains `needle`.
    ///
    /// `needle` is already lowercased and non-empty.
    fn matches(&self, needle: &str) -> bool;
}

/// Case-insensitive substring test against an already-lowercased needle.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Record for Team {
    type Field = TeamField;

    fn field(&self, field: TeamField) -> FieldValue<'_> {
        match field {
            TeamField::Id => FieldValue::Number(f64::from(self.id.0)),
            TeamField::Name => FieldValue::text(&self.name),
            TeamField::Sport => FieldValue::text(&self.sport),
            TeamField::Coach => FieldValue::text(&self.coach),
            TeamField::Location => FieldValue::text(&self.location),
            TeamField::FoundedYear => FieldValue::optional_int(self.founded_year),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.sport, &self.coach, &self.location]
            .into_iter()
            .any(|text| contains_folded(text, needle))
    }
}

impl Record for Player {
    type Field = PlayerField;

    fn field(&self, field: PlayerField) -> FieldValue<'_> {
        match field {
            PlayerField::Id => FieldValue::Number(f64::from(self.id.0)),
            PlayerField::FirstName => FieldValue::text(&self.first_name),
            PlayerField::LastName => FieldValue::text(&self.last_name),
            PlayerField::Age => FieldValue::Number(f64::from(self.age)),
            PlayerField::Position => FieldValue::text(&self.position),
            PlayerField::Rating => FieldValue::number(self.rating),
            PlayerField::TeamId => FieldValue::optional_int(self.team_id.map(i32::from)),
            PlayerField::JerseyNumber => FieldValue::optional_int(self.jersey_number),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.full_name(), needle) || contains_folded(&self.position, needle)
    }
}

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

/// Active sort column and direction of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    /// The column being sorted on.
    pub field: F,
    /// The sort direction.
    pub direction: SortDirection,
}

impl<F: Copy + Eq> SortState<F> {
    /// Create a sort state.
    pub const fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Apply a column-header click.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column selects it ascending.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Search text plus sort state: everything that determines a table's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<F> {
    /// Free-text search; empty matches every record.
    pub search: String,
    /// Sort column and direction.
    pub sort: SortState<F>,
}

impl<F> Query<F> {
    /// A query with no search text.
    pub const fn sorted_by(field: F, direction: SortDirection) -> Self {
        Self {
            search: String::new(),
            sort: SortState { field, direction },
        }
    }
}

impl Default for Query<TeamField> {
    /// Teams table opens sorted by name, A to Z.
    fn default() -> Self {
        Self::sorted_by(TeamField::Name, SortDirection::Ascending)
    }
}

impl Default for Query<PlayerField> {
    /// Players table opens sorted by rating, best first.
    fn default() -> Self {
        Self::sorted_by(PlayerField::Rating, SortDirection::Descending)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Keep the records whose searchable fields contain `search`, ignoring case.
pub fn filter<'a, R: Record>(records: &'a [R], search: &str) -> Vec<&'a R> {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(&needle)).collect()
}

/// Stable-sort rows in place by one field.
pub fn sort_rows<R: Record>(rows: &mut [&R], sort: SortState<R::Field>) {
    rows.sort_by(|a, b| compare_values(&a.field(sort.field), &b.field(sort.field), sort.direction));
}

/// Filter then sort: the displayed rows of a table.
pub fn apply<'a, R: Record>(records: &'a [R], query: &Query<R::Field>) -> Vec<&'a R> {
    let mut rows = filter(records, &query.search);
    sort_rows(&mut rows, query.sort);
    rows
}
