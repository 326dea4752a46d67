//! Mutations that keep a table's view state in step with the server.
//!
//! Local state changes only after the server confirmed the request. A
//! failed call returns its error and leaves the [`ViewState`] untouched.

use rosterdash_core::{CoreError, FormMode, FormSession, Identified, PlayerForm, TeamForm, ViewState};
use rosterdash_types::{Player, Team};
use tracing::{info, warn};

use crate::error::ClientError;
use crate::gateway::{ApiClient, Resource};

/// A form that produces a request body for one resource.
pub trait EntityForm {
    /// The resource the form edits.
    type Record: Resource;

    /// Coerce the form's raw text into a request body.
    ///
    /// # Errors
    ///
    /// [`CoreError::Draft`] if the coerced values do not decode.
    fn draft(&self) -> Result<<Self::Record as Resource>::Draft, CoreError>;
}

impl EntityForm for TeamForm {
    type Record = Team;

    fn draft(&self) -> Result<rosterdash_types::TeamDraft, CoreError> {
        self.to_draft()
    }
}

impl EntityForm for PlayerForm {
    type Record = Player;

    fn draft(&self) -> Result<rosterdash_types::PlayerDraft, CoreError> {
        self.to_draft()
    }
}

/// Reload a table from the server.
///
/// On failure the view is marked failed with the user-facing message.
///
/// # Errors
///
/// The fetch error.
pub async fn refresh<R: Resource>(
    api: &ApiClient,
    view: &mut ViewState<R>,
) -> Result<(), ClientError> {
    match api.list::<R>().await {
        Ok(records) => {
            view.loaded(records);
            Ok(())
        }
        Err(e) => {
            warn!(resource = R::PATH, error = %e, "Failed to load records");
            view.failed(e.user_message(&format!("load {}", R::PATH)));
            Err(e)
        }
    }
}

/// Submit a create or edit form.
///
/// Refuses to start while the session already has a submission in
/// flight. On success the server's record is appended (create) or
/// replaces the old one (edit).
///
/// # Errors
///
/// [`ClientError::Core`] for a double submit or an undecodable draft, or
/// the request error.
pub async fn submit<F: EntityForm>(
    api: &ApiClient,
    view: &mut ViewState<F::Record>,
    session: &mut FormSession<<F::Record as Identified>::Id>,
    form: &F,
) -> Result<F::Record, ClientError> {
    let mode = session.begin_submit()?;
    let result = send_form(api, mode, form).await;
    session.finish_submit();
    let record = result?;

    match mode {
        FormMode::Create => view.record_created(record.clone()),
        FormMode::Edit(_) => {
            if !view.record_updated(record.clone()) {
                warn!(resource = <F::Record as Resource>::PATH, id = %record.id(), "Updated record was not loaded; appending");
                view.record_created(record.clone());
            }
        }
    }
    info!(resource = <F::Record as Resource>::PATH, id = %record.id(), "Saved record");
    Ok(record)
}

async fn send_form<F: EntityForm>(
    api: &ApiClient,
    mode: FormMode<<F::Record as Identified>::Id>,
    form: &F,
) -> Result<F::Record, ClientError> {
    let draft = form.draft()?;
    match mode {
        FormMode::Create => api.create::<F::Record>(&draft).await,
        FormMode::Edit(id) => api.update::<F::Record>(id, &draft).await,
    }
}

/// Delete a record, then drop it from the view.
///
/// # Errors
///
/// The request error; the view keeps the record.
pub async fn delete<R: Resource>(
    api: &ApiClient,
    view: &mut ViewState<R>,
    id: R::Id,
) -> Result<(), ClientError> {
    api.delete::<R>(id).await?;
    view.record_deleted(id);
    info!(resource = R::PATH, %id, "Deleted record");
    Ok(())
}
