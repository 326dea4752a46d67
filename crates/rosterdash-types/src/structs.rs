//! Record structs exchanged with the REST API.
//!
//! Field names follow the API's camelCase JSON. Text fields tolerate
//! `null` or absence (decoded as empty strings) because the dashboard
//! treats missing text as empty everywhere it searches or displays.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::ids::{PlayerId, TeamId};

/// Decode `null` the same way as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a team reference. The backend encodes "no team" as either
/// `null` or `0`.
fn team_ref<'de, D>(deserializer: D) -> Result<Option<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TeamId>::deserialize(deserializer)?.filter(|id| id.0 != 0))
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A sports team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Team {
    /// Identifier assigned by the API.
    pub id: TeamId,
    /// Team name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Sport category (open set, e.g. `Football`).
    #[serde(default, deserialize_with = "nullable")]
    pub sport: String,
    /// Head coach.
    #[serde(default, deserialize_with = "nullable")]
    pub coach: String,
    /// Home location.
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    /// Year the team was founded, when known.
    #[serde(default)]
    pub founded_year: Option<i32>,
    /// Server-side creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Server-side last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Editable team fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TeamDraft {
    /// Team name.
    pub name: String,
    /// Sport category.
    pub sport: String,
    /// Head coach.
    pub coach: String,
    /// Home location.
    pub location: String,
    /// Year the team was founded.
    pub founded_year: i32,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player, optionally attached to a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Identifier assigned by the API.
    pub id: PlayerId,
    /// Given name.
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: String,
    /// Age in years.
    #[serde(default, deserialize_with = "nullable")]
    pub age: u32,
    /// Playing position (open set, e.g. `Forward`).
    #[serde(default, deserialize_with = "nullable")]
    pub position: String,
    /// Rating, observed domain 0-10.
    #[serde(default, deserialize_with = "nullable")]
    pub rating: f64,
    /// Team the player belongs to. `None` means free agent.
    #[serde(default, deserialize_with = "team_ref")]
    pub team_id: Option<TeamId>,
    /// Shirt number, unique within a team (not enforced here).
    #[serde(default)]
    pub jersey_number: Option<i32>,
    /// Server-side creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Server-side last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Player {
    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the player has no team.
    pub const fn is_free_agent(&self) -> bool {
        self.team_id.is_none()
    }
}

/// Editable player fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlayerDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Age in years.
    pub age: u32,
    /// Playing position.
    pub position: String,
    /// Rating on the 0-10 scale.
    pub rating: f64,
    /// Team reference; serialized as `null` for a free agent.
    pub team_id: Option<TeamId>,
    /// Shirt number.
    pub jersey_number: i32,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn team_decodes_with_missing_and_null_text() {
        let team: Team =
            serde_json::from_str(r#"{"id": 3, "name": "Real Madrid", "coach": null}"#).unwrap();
        assert_eq!(team.id, TeamId(3));
        assert_eq!(team.name, "Real Madrid");
        assert_eq!(team.coach, "");
        assert_eq!(team.sport, "");
        assert_eq!(team.founded_year, None);
    }

    #[test]
    fn team_decodes_local_timestamps() {
        let team: Team = serde_json::from_str(
            r#"{"id": 1, "name": "A", "sport": "Football", "coach": "C", "location": "L",
                "foundedYear": 1878, "createdAt": "2024-05-01T10:15:30"}"#,
        )
        .unwrap();
        assert_eq!(team.founded_year, Some(1878));
        assert!(team.created_at.is_some());
        assert!(team.updated_at.is_none());
    }

    #[test]
    fn zero_team_reference_is_a_free_agent() {
        let player: Player = serde_json::from_str(
            r#"{"id": 10, "firstName": "Kobe", "lastName": "Bryant", "age": 25,
                "position": "Guard", "rating": 9.7, "teamId": 0, "jerseyNumber": 24}"#,
        )
        .unwrap();
        assert!(player.is_free_agent());
        assert_eq!(player.full_name(), "Kobe Bryant");
        assert_eq!(player.jersey_number, Some(24));
    }

    #[test]
    fn player_draft_sends_null_team_for_free_agent() {
        let draft = PlayerDraft {
            first_name: String::from("Kobe"),
            last_name: String::from("Bryant"),
            age: 25,
            position: String::from("Guard"),
            rating: 9.7,
            team_id: None,
            jersey_number: 24,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value["teamId"].is_null());
        assert_eq!(value["firstName"], "Kobe");
        assert_eq!(value["jerseyNumber"], 24);
    }
}
