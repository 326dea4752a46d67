//! REST API gateway.
//!
//! One [`ApiClient`] speaks to both resources. Every response body passes
//! through `rosterdash_core::normalize`, which accepts both a bare payload
//! and the backend's `{success, message, data, timestamp}` envelope.

use std::fmt::Display;

use reqwest::{RequestBuilder, StatusCode};
use rosterdash_core::normalize::{envelope_message, record_value, records_or_empty};
use rosterdash_core::{Identified, Record};
use rosterdash_types::{Player, PlayerDraft, Team, TeamDraft, TeamId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A record type served under its own REST collection.
pub trait Resource:
    Record + Identified<Id: Display> + DeserializeOwned + Clone + Send + 'static
{
    /// Collection path below the API base, e.g. `teams`.
    const PATH: &'static str;

    /// Create/update request body.
    type Draft: Serialize + Sync;
}

impl Resource for Team {
    const PATH: &'static str = "teams";
    type Draft = TeamDraft;
}

impl Resource for Player {
    const PATH: &'static str = "players";
    type Draft = PlayerDraft;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the roster REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn record_url<R: Resource>(&self, id: R::Id) -> String {
        format!("{}/{}/{id}", self.base_url, R::PATH)
    }

    /// `GET /{resource}`: every record.
    ///
    /// A success response that is not a list counts as an empty one.
    ///
    /// # Errors
    ///
    /// Transport failure or a non-success status.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        let payload = send(self.client.get(self.collection_url::<R>())).await?;
        let records = records_or_empty(&payload);
        debug!(resource = R::PATH, count = records.len(), "Listed records");
        Ok(records)
    }

    /// `GET /{resource}?{key}={value}`: a server-side filtered list.
    ///
    /// # Errors
    ///
    /// Transport failure or a non-success status.
    pub async fn list_where<R: Resource>(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<R>, ClientError> {
        let request = self.client.get(self.collection_url::<R>()).query(&[(key, value)]);
        let payload = send(request).await?;
        Ok(records_or_empty(&payload))
    }

    /// Teams playing `sport`.
    ///
    /// # Errors
    ///
    /// See [`Self::list_where`].
    pub async fn teams_by_sport(&self, sport: &str) -> Result<Vec<Team>, ClientError> {
        self.list_where::<Team>("sport", sport).await
    }

    /// Players on the team `team_id`.
    ///
    /// # Errors
    ///
    /// See [`Self::list_where`].
    pub async fn players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, ClientError> {
        self.list_where::<Player>("teamId", &team_id.to_string()).await
    }

    /// `GET /{resource}/{id}`: one record.
    ///
    /// # Errors
    ///
    /// Transport failure, a non-success status, or a body that is not a
    /// record.
    pub async fn get<R: Resource>(&self, id: R::Id) -> Result<R, ClientError> {
        let payload = send(self.client.get(self.record_url::<R>(id))).await?;
        decode_record(&payload)
    }

    /// `POST /{resource}`: create a record and return the server's copy.
    ///
    /// # Errors
    ///
    /// Transport failure, a non-success status, or an echo that is not a
    /// record with an id.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, ClientError> {
        let request = self.client.post(self.collection_url::<R>()).json(draft);
        let record: R = decode_record(&send(request).await?)?;
        debug!(resource = R::PATH, id = %record.id(), "Created record");
        Ok(record)
    }

    /// `PUT /{resource}/{id}`: replace a record and return the server's copy.
    ///
    /// # Errors
    ///
    /// As for [`Self::create`].
    pub async fn update<R: Resource>(&self, id: R::Id, draft: &R::Draft) -> Result<R, ClientError> {
        let request = self.client.put(self.record_url::<R>(id)).json(draft);
        let record: R = decode_record(&send(request).await?)?;
        if record.id() != id {
            warn!(resource = R::PATH, requested = %id, returned = %record.id(), "Update echoed a different id");
        }
        Ok(record)
    }

    /// `DELETE /{resource}/{id}`. Any success status counts; the body is
    /// drained and never parsed.
    ///
    /// # Errors
    ///
    /// Transport failure or a non-success status.
    pub async fn delete<R: Resource>(&self, id: R::Id) -> Result<(), ClientError> {
        send_checked(self.client.delete(self.record_url::<R>(id))).await?;
        debug!(resource = R::PATH, %id, "Deleted record");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Send a request and return its raw body once the status is a success.
async fn send_checked(request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = status_message(status, &body);
        warn!(status = status.as_u16(), %message, "API request rejected");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(body.to_vec())
}

/// Send a request and return its JSON body (`null` when empty).
async fn send(request: RequestBuilder) -> Result<Value, ClientError> {
    let body = send_checked(request).await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&body).map_err(|e| ClientError::Malformed(format!("invalid JSON body: {e}")))
}

/// Best description of a rejected request: the envelope message, the raw
/// body, or the status reason.
fn status_message(status: StatusCode, body: &[u8]) -> String {
    let parsed = serde_json::from_slice::<Value>(body).ok();
    if let Some(message) = parsed.as_ref().and_then(envelope_message) {
        return message.to_owned();
    }
    let text = String::from_utf8_lossy(body).trim().to_owned();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_owned()
    } else {
        text
    }
}

/// Decode a single record from a bare or enveloped payload.
fn decode_record<R: DeserializeOwned>(payload: &Value) -> Result<R, ClientError> {
    R::deserialize(record_value(payload))
        .map_err(|e| ClientError::Malformed(format!("response is not a record: {e}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_message_prefers_envelope() {
        let body = br#"{"success": false, "message": "Team not found", "data": null}"#;
        assert_eq!(status_message(StatusCode::NOT_FOUND, body), "Team not found");
    }

    #[test]
    fn status_message_falls_back_to_body_then_reason() {
        assert_eq!(status_message(StatusCode::BAD_GATEWAY, b"upstream down"), "upstream down");
        assert_eq!(status_message(StatusCode::NOT_FOUND, b""), "Not Found");
    }

    #[test]
    fn record_without_id_is_malformed() {
        let payload = json!({"data": {"name": "Lakers"}});
        let result: Result<Team, _> = decode_record(&payload);
        assert!(matches!(result, Err(ClientError::Malformed(_))));
    }

    #[test]
    fn enveloped_record_decodes() {
        let payload = json!({"success": true, "data": {"id": 4, "name": "Lakers"}});
        let team: Result<Team, _> = decode_record(&payload);
        assert_eq!(team.ok().map(|t| t.id), Some(TeamId(4)));
    }
}
