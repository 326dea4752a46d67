//! Entity form controller: raw form text, the coercion schema that turns
//! it into typed drafts, and the per-session submitting gate.
//!
//! Every numeric form field has a declared fallback. A field that is
//! empty, unparsable, zero, or outside its body type takes its fallback.
//! [`PLAYER_FORM`] and [`TEAM_FORM`] drive [`PlayerForm::to_draft`] and
//! [`TeamForm::to_draft`], so the coercion table below is the whole contract:
//!
//! | Entity | Field | Parser | Fallback |
//! |--------|-------|--------|----------|
//! | player | `age` | leading integer | 18 |
//! | player | `rating` | leading decimal | 5.0 |
//! | player | `jerseyNumber` | leading integer | 0 |
//! | player | `teamId` | team selection | free agent |
//! | team | `foundedYear` | leading integer | 2024 |

use rosterdash_types::{Player, PlayerDraft, Team, TeamDraft, TeamId};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Team selector value meaning "no team".
pub const FREE_AGENT_OPTION: &str = "free";

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Split an optional leading sign off `s`.
fn split_sign(s: &str) -> (&str, &str) {
    match s.as_bytes().first() {
        Some(b'+' | b'-') => s.split_at(1),
        _ => ("", s),
    }
}

/// Length of the run of ASCII digits at the start of `s`.
fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parse the leading integer of `text`, ignoring anything after it.
///
/// `" 42abc"` parses as 42; `"abc"` and `""` do not parse.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = split_sign(trimmed);
    let digits = rest.get(..digit_run(rest))?;
    if digits.is_empty() {
        return None;
    }
    format!("{sign}{digits}").parse().ok()
}

/// Parse the leading decimal number of `text`, ignoring anything after it.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent: `"7.5 stars"` parses as 7.5, `".5"` as 0.5.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (sign, rest) = split_sign(trimmed);

    let int_len = digit_run(rest);
    let mut end = int_len;
    let mut frac_len = 0;
    if rest.as_bytes().get(end) == Some(&b'.') {
        frac_len = digit_run(rest.get(end.saturating_add(1)..).unwrap_or(""));
        end = end.saturating_add(1).saturating_add(frac_len);
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    if let Some(b'e' | b'E') = rest.as_bytes().get(end) {
        let after_e = rest.get(end.saturating_add(1)..).unwrap_or("");
        let (exp_sign, exp_rest) = split_sign(after_e);
        let exp_len = digit_run(exp_rest);
        if exp_len > 0 {
            end = end
                .saturating_add(1)
                .saturating_add(exp_sign.len())
                .saturating_add(exp_len);
        }
    }

    let number = rest.get(..end)?;
    format!("{sign}{number}").parse().ok()
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Integer range a coerced value must fit, matching the request body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntRange {
    /// Fits a `u32`.
    Unsigned32,
    /// Fits an `i32`.
    Signed32,
}

impl IntRange {
    /// Whether `value` fits the range.
    pub fn contains(self, value: i64) -> bool {
        match self {
            Self::Unsigned32 => u32::try_from(value).is_ok(),
            Self::Signed32 => i32::try_from(value).is_ok(),
        }
    }
}

/// An integer form field with its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntField {
    /// Wire name of the field.
    pub name: &'static str,
    /// Value used when the text is empty, unparsable, zero, or out of range.
    pub default: i64,
    /// Accepted range.
    pub range: IntRange,
}

impl IntField {
    /// Coerce raw form text.
    pub fn coerce(&self, raw: &str) -> i64 {
        parse_int_prefix(raw)
            .filter(|v| *v != 0 && self.range.contains(*v))
            .unwrap_or(self.default)
    }
}

/// A decimal form field with its fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalField {
    /// Wire name of the field.
    pub name: &'static str,
    /// Value used when the text is empty, unparsable, zero, or not finite.
    pub default: f64,
}

impl DecimalField {
    /// Coerce raw form text.
    pub fn coerce(&self, raw: &str) -> f64 {
        parse_float_prefix(raw)
            .filter(|v| v.is_finite() && *v != 0.0)
            .unwrap_or(self.default)
    }
}

/// How one form field is turned into a request body value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSpec {
    /// Free text, passed through unchanged.
    Text(&'static str),
    /// Integer with fallback.
    Int(IntField),
    /// Decimal with fallback.
    Decimal(DecimalField),
    /// Team selector; [`FREE_AGENT_OPTION`] or empty means no team.
    TeamRef(&'static str),
}

impl FieldSpec {
    /// Wire name of the field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text(name) | Self::TeamRef(name) => *name,
            Self::Int(field) => field.name,
            Self::Decimal(field) => field.name,
        }
    }

    /// Coerce raw form text into the field's JSON value.
    pub fn coerce(&self, raw: &str) -> Value {
        match self {
            Self::Text(_) => Value::String(raw.to_owned()),
            Self::Int(field) => Value::from(field.coerce(raw)),
            Self::Decimal(field) => Value::from(field.coerce(raw)),
            Self::TeamRef(_) => {
                coerce_team_ref(raw).map_or(Value::Null, |id| Value::from(id.into_inner()))
            }
        }
    }
}

/// Player age field.
pub const PLAYER_AGE: IntField = IntField {
    name: "age",
    default: 18,
    range: IntRange::Unsigned32,
};
/// Player rating field.
pub const PLAYER_RATING: DecimalField = DecimalField {
    name: "rating",
    default: 5.0,
};
/// Player jersey number field.
pub const PLAYER_JERSEY_NUMBER: IntField = IntField {
    name: "jerseyNumber",
    default: 0,
    range: IntRange::Signed32,
};
/// Team founded-year field.
pub const TEAM_FOUNDED_YEAR: IntField = IntField {
    name: "foundedYear",
    default: 2024,
    range: IntRange::Signed32,
};

/// Coercion schema of the player form, in form order.
pub const PLAYER_FORM: [FieldSpec; 7] = [
    FieldSpec::Text("firstName"),
    FieldSpec::Text("lastName"),
    FieldSpec::Int(PLAYER_AGE),
    FieldSpec::Text("position"),
    FieldSpec::Decimal(PLAYER_RATING),
    FieldSpec::TeamRef("teamId"),
    FieldSpec::Int(PLAYER_JERSEY_NUMBER),
];

/// Coercion schema of the team form, in form order.
pub const TEAM_FORM: [FieldSpec; 5] = [
    FieldSpec::Text("name"),
    FieldSpec::Text("sport"),
    FieldSpec::Text("coach"),
    FieldSpec::Text("location"),
    FieldSpec::Int(TEAM_FOUNDED_YEAR),
];

/// Resolve a team selector value.
pub fn coerce_team_ref(raw: &str) -> Option<TeamId> {
    let raw = raw.trim();
    if raw.is_empty() || raw == FREE_AGENT_OPTION {
        return None;
    }
    parse_int_prefix(raw)
        .and_then(|id| i32::try_from(id).ok())
        .filter(|id| *id != 0)
        .map(TeamId)
}

/// Raw text of a form, looked up by wire field name.
pub trait FormText {
    /// The text entered for `field`; empty for a field the form lacks.
    fn raw(&self, field: &str) -> &str;
}

/// Run every field of `schema` over `form` and decode the result as `T`.
pub fn coerce_form<T: DeserializeOwned>(
    schema: &[FieldSpec],
    form: &impl FormText,
) -> Result<T, CoreError> {
    let body: Map<String, Value> = schema
        .iter()
        .map(|spec| (spec.name().to_owned(), spec.coerce(form.raw(spec.name()))))
        .collect();
    Ok(T::deserialize(Value::Object(body))?)
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Raw text of the player form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Age text.
    pub age: String,
    /// Position.
    pub position: String,
    /// Rating text.
    pub rating: String,
    /// Team selector value: a team id or [`FREE_AGENT_OPTION`].
    pub team: String,
    /// Jersey number text.
    pub jersey_number: String,
}

impl FormText for PlayerForm {
    fn raw(&self, field: &str) -> &str {
        match field {
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "age" => &self.age,
            "position" => &self.position,
            "rating" => &self.rating,
            "teamId" => &self.team,
            "jerseyNumber" => &self.jersey_number,
            _ => "",
        }
    }
}

impl PlayerForm {
    /// Pre-fill the form for editing an existing player.
    pub fn from_player(player: &Player) -> Self {
        Self {
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            age: player.age.to_string(),
            position: player.position.clone(),
            rating: player.rating.to_string(),
            team: player
                .team_id
                .map_or_else(|| FREE_AGENT_OPTION.to_owned(), |id| id.to_string()),
            jersey_number: player.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
        }
    }

    /// Coerce the form into a request body through [`PLAYER_FORM`].
    pub fn to_draft(&self) -> Result<PlayerDraft, CoreError> {
        coerce_form(&PLAYER_FORM, self)
    }
}

/// Raw text of the team form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamForm {
    /// Team name.
    pub name: String,
    /// Sport category.
    pub sport: String,
    /// Head coach.
    pub coach: String,
    /// Home location.
    pub location: String,
    /// Founded year text.
    pub founded_year: String,
}

impl FormText for TeamForm {
    fn raw(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "sport" => &self.sport,
            "coach" => &self.coach,
            "location" => &self.location,
            "foundedYear" => &self.founded_year,
            _ => "",
        }
    }
}

impl TeamForm {
    /// Pre-fill the form for editing an existing team.
    pub fn from_team(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            sport: team.sport.clone(),
            coach: team.coach.clone(),
            location: team.location.clone(),
            founded_year: team.founded_year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }

    /// Coerce the form into a request body through [`TEAM_FORM`].
    pub fn to_draft(&self) -> Result<TeamDraft, CoreError> {
        coerce_form(&TEAM_FORM, self)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    /// Submitting creates a record (`POST`).
    Create,
    /// Submitting updates the record with this id (`PUT`).
    Edit(Id),
}

/// One open add/edit form.
///
/// At most one submission may be outstanding per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession<Id> {
    mode: FormMode<Id>,
    submitting: bool,
}

impl<Id: Copy> FormSession<Id> {
    /// Open a form for a new record.
    pub const fn create() -> Self {
        Self {
            mode: FormMode::Create,
            submitting: false,
        }
    }

    /// Open a form editing the record `id`.
    pub const fn edit(id: Id) -> Self {
        Self {
            mode: FormMode::Edit(id),
            submitting: false,
        }
    }

    /// The form's mode.
    pub const fn mode(&self) -> FormMode<Id> {
        self.mode
    }

    /// Whether a submission is in flight.
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mark a submission as started.
    ///
    /// Fails with [`CoreError::SubmissionInFlight`] if one already is.
    pub fn begin_submit(&mut self) -> Result<FormMode<Id>, CoreError> {
        if self.submitting {
            return Err(CoreError::SubmissionInFlight);
        }
        self.submitting = true;
        Ok(self.mode)
    }

    /// Mark the in-flight submission as finished, whatever its outcome.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use rosterdash_types::PlayerId;

    use super::*;

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  42abc"), Some(42));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn float_prefix_parsing() {
        assert_eq!(parse_float_prefix("7.5"), Some(7.5));
        assert_eq!(parse_float_prefix("7.5 stars"), Some(7.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("8."), Some(8.0));
        assert_eq!(parse_float_prefix("1e1x"), Some(10.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("nine"), None);
    }

    #[test]
    fn empty_age_coerces_to_eighteen() {
        let form = PlayerForm {
            first_name: String::from("Jude"),
            last_name: String::from("Bellingham"),
            position: String::from("Midfielder"),
            ..PlayerForm::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.age, 18);
        assert!((draft.rating - 5.0).abs() < f64::EPSILON);
        assert_eq!(draft.jersey_number, 0);
        assert_eq!(draft.team_id, None);
    }

    #[test]
    fn zero_and_garbage_fall_back() {
        assert_eq!(PLAYER_AGE.coerce("0"), 18);
        assert_eq!(PLAYER_AGE.coerce("old"), 18);
        assert_eq!(PLAYER_AGE.coerce("27 years"), 27);
        assert!((PLAYER_RATING.coerce("0.0") - 5.0).abs() < f64::EPSILON);
        assert!((PLAYER_RATING.coerce("9.25") - 9.25).abs() < f64::EPSILON);
        assert_eq!(TEAM_FOUNDED_YEAR.coerce(""), 2024);
        assert_eq!(TEAM_FOUNDED_YEAR.coerce("1902"), 1902);
    }

    #[test]
    fn out_of_range_integers_fall_back() {
        assert_eq!(PLAYER_AGE.coerce("-5"), 18);
        assert_eq!(TEAM_FOUNDED_YEAR.coerce("99999999999"), 2024);
        let form = PlayerForm {
            age: String::from("-5"),
            jersey_number: String::from("4294967296"),
            ..PlayerForm::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.age, 18);
        assert_eq!(draft.jersey_number, 0);
    }

    #[test]
    fn team_selector_resolution() {
        assert_eq!(coerce_team_ref(FREE_AGENT_OPTION), None);
        assert_eq!(coerce_team_ref(""), None);
        assert_eq!(coerce_team_ref("0"), None);
        assert_eq!(coerce_team_ref("x"), None);
        assert_eq!(coerce_team_ref("4"), Some(TeamId(4)));
    }

    #[test]
    fn edit_prefill_round_trips_through_coercion() {
        let player = Player {
            id: PlayerId(10),
            first_name: String::from("Kobe"),
            last_name: String::from("Bryant"),
            age: 25,
            position: String::from("Guard"),
            rating: 9.7,
            team_id: None,
            jersey_number: Some(24),
            created_at: None,
            updated_at: None,
        };
        let form = PlayerForm::from_player(&player);
        assert_eq!(form.team, FREE_AGENT_OPTION);
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.age, 25);
        assert!((draft.rating - 9.7).abs() < f64::EPSILON);
        assert_eq!(draft.jersey_number, 24);
        assert_eq!(draft.team_id, None);
    }

    #[test]
    fn schema_lists_every_form_field() {
        let names: Vec<&str> = PLAYER_FORM.iter().map(FieldSpec::name).collect();
        assert_eq!(
            names,
            vec!["firstName", "lastName", "age", "position", "rating", "teamId", "jerseyNumber"]
        );
        assert_eq!(TEAM_FORM.len(), 5);
    }

    #[test]
    fn drafts_follow_the_schema_defaults() {
        let custom = [
            FieldSpec::Text("name"),
            FieldSpec::Text("sport"),
            FieldSpec::Text("coach"),
            FieldSpec::Text("location"),
            FieldSpec::Int(IntField {
                name: "foundedYear",
                default: 1900,
                range: IntRange::Signed32,
            }),
        ];
        let form = TeamForm {
            name: String::from("Ajax"),
            ..TeamForm::default()
        };
        let draft: TeamDraft = coerce_form(&custom, &form).unwrap();
        assert_eq!(draft.name, "Ajax");
        assert_eq!(draft.founded_year, 1900);
        assert_eq!(form.to_draft().unwrap().founded_year, 2024);
    }

    #[test]
    fn schema_without_a_body_field_is_rejected() {
        let partial = [FieldSpec::Text("name")];
        let result: Result<TeamDraft, CoreError> = coerce_form(&partial, &TeamForm::default());
        assert!(matches!(result, Err(CoreError::Draft(_))));
    }

    #[test]
    fn session_gates_double_submit() {
        let mut session = FormSession::edit(PlayerId(3));
        assert_eq!(session.begin_submit().ok(), Some(FormMode::Edit(PlayerId(3))));
        assert!(session.is_submitting());
        assert!(matches!(session.begin_submit(), Err(CoreError::SubmissionInFlight)));
        session.finish_submit();
        assert!(session.begin_submit().is_ok());
    }
}
