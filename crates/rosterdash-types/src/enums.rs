//! Enumeration types shared between the query engine, the summary builder
//! and the presentation layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

/// Direction of a table sort.
///
/// Serialized as `"asc"` / `"desc"` to match the dashboard's column state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Short label used in table headers and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

// ---------------------------------------------------------------------------
// Sortable fields
// ---------------------------------------------------------------------------

/// Error returned when a field name does not name a sortable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl core::fmt::Display for UnknownField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

/// Normalize a field name for lookup: lowercase, separators dropped, so
/// `foundedYear`, `founded_year` and `founded-year` all resolve alike.
fn field_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A sortable column of the teams table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum TeamField {
    /// Team identifier.
    Id,
    /// Team name.
    Name,
    /// Sport category.
    Sport,
    /// Head coach.
    Coach,
    /// Home location.
    Location,
    /// Year the team was founded.
    FoundedYear,
}

impl TeamField {
    /// Every team field, in table column order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Sport,
        Self::Coach,
        Self::Location,
        Self::FoundedYear,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Sport => "sport",
            Self::Coach => "coach",
            Self::Location => "location",
            Self::FoundedYear => "foundedYear",
        }
    }
}

impl core::str::FromStr for TeamField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = field_key(s);
        Self::ALL
            .into_iter()
            .find(|field| field_key(field.as_str()) == key)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// A sortable column of the players table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PlayerField {
    /// Player identifier.
    Id,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Age in years.
    Age,
    /// Playing position.
    Position,
    /// Rating on the 0-10 scale.
    Rating,
    /// Team reference (absent for free agents).
    TeamId,
    /// Shirt number.
    JerseyNumber,
}

impl PlayerField {
    /// Every player field, in table column order.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::Age,
        Self::Position,
        Self::Rating,
        Self::TeamId,
        Self::JerseyNumber,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Age => "age",
            Self::Position => "position",
            Self::Rating => "rating",
            Self::TeamId => "teamId",
            Self::JerseyNumber => "jerseyNumber",
        }
    }
}

impl core::str::FromStr for PlayerField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = field_key(s);
        Self::ALL
            .into_iter()
            .find(|field| field_key(field.as_str()) == key)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Rating tiers
// ---------------------------------------------------------------------------

/// Rating band used for row colouring and the rating distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RatingTier {
    /// 9.0 and above.
    Excellent,
    /// 8.0 up to 9.0.
    Good,
    /// 7.0 up to 8.0.
    Average,
    /// Below 7.0.
    BelowAverage,
}

impl RatingTier {
    /// Every tier, best first.
    pub const ALL: [Self; 4] = [Self::Excellent, Self::Good, Self::Average, Self::BelowAverage];

    /// Classify a rating.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 9.0 {
            Self::Excellent
        } else if rating >= 8.0 {
            Self::Good
        } else if rating >= 7.0 {
            Self::Average
        } else {
            Self::BelowAverage
        }
    }

    /// Human-readable bucket label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent (9.0+)",
            Self::Good => "Good (8.0-8.9)",
            Self::Average => "Average (7.0-7.9)",
            Self::BelowAverage => "Below Average (<7.0)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_flips() {
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
    }

    #[test]
    fn direction_wire_names() {
        let json = serde_json::to_string(&SortDirection::Descending).unwrap_or_default();
        assert_eq!(json, "\"desc\"");
    }

    #[test]
    fn field_names_parse_loosely() {
        assert_eq!("foundedYear".parse::<TeamField>().ok(), Some(TeamField::FoundedYear));
        assert_eq!("founded_year".parse::<TeamField>().ok(), Some(TeamField::FoundedYear));
        assert_eq!("JERSEY-NUMBER".parse::<PlayerField>().ok(), Some(PlayerField::JerseyNumber));
        assert!("salary".parse::<PlayerField>().is_err());
    }

    #[test]
    fn rating_tier_boundaries() {
        assert_eq!(RatingTier::from_rating(9.0), RatingTier::Excellent);
        assert_eq!(RatingTier::from_rating(8.99), RatingTier::Good);
        assert_eq!(RatingTier::from_rating(7.0), RatingTier::Average);
        assert_eq!(RatingTier::from_rating(6.9), RatingTier::BelowAverage);
        assert_eq!(RatingTier::from_rating(f64::NAN), RatingTier::BelowAverage);
    }
}
