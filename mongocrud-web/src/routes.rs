use std::sync::Arc;

use axum::{
    extract::{FromRequest, Path, Request, State},
    http::header::CONTENT_TYPE,
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use mongocrud::{
    query::Update,
    record::{Field, Record, RecordId},
};

use crate::{error::AppError, views, AppState};

/// Body of the create and edit requests, urlencoded or JSON.
///
/// Every field is optional: create fills the gaps with empty text, edit only
/// sets what was submitted.
#[derive(Debug, Default, Deserialize)]
pub struct RecordForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
}

impl RecordForm {
    fn into_record(self) -> Record {
        Record::new(
            self.name.unwrap_or_default(),
            self.email.unwrap_or_default(),
            self.age.unwrap_or_default(),
        )
    }

    fn into_update(self) -> Update {
        [(Field::Name, self.name), (Field::Email, self.email), (Field::Age, self.age)]
            .into_iter()
            .fold(Update::set(), |update, (field, value)| match value {
                Some(value) => update.with(field, value),
                None => update,
            })
    }
}

/// Extracts a [`RecordForm`] as JSON when the request says so, as a form otherwise.
pub struct RecordBody(pub RecordForm);

impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(form) = Json::<RecordForm>::from_request(req, state).await?;
            Ok(RecordBody(form))
        } else {
            let Form(form) = Form::<RecordForm>::from_request(req, state).await?;
            Ok(RecordBody(form))
        }
    }
}

fn parse_id(raw: &str) -> Result<RecordId, AppError> {
    Ok(raw.parse::<RecordId>()?)
}

/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let records = state.records().find_all().await?;

    Ok(Html(views::index(&records)))
}

/// `GET /create`
pub async fn show_create() -> Html<String> {
    Html(views::create())
}

/// `POST /create`
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<RecordBody, AppError>,
) -> Result<Redirect, AppError> {
    let RecordBody(form) = body?;

    let id = state.records().insert(&form.into_record()).await?;
    info!(%id, "inserted record");

    Ok(Redirect::to("/"))
}

/// `GET /edit/{id}`
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;

    match state.records().find_by_id(id).await? {
        Some(record) => Ok(Html(views::edit(&record))),
        None => Err(AppError::NotFound(id.to_hex())),
    }
}

/// `POST /edit/{id}`
pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<RecordBody, AppError>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let RecordBody(form) = body?;

    let modified = state.records().update_by_id(id, &form.into_update()).await?;
    info!(%id, modified, "updated record");

    Ok(Redirect::to("/"))
}

/// `POST /delete/{id}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;

    let deleted = state.records().delete_by_id(id).await?;
    info!(%id, deleted, "deleted record");

    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_form_fields_become_empty_text_on_create() {
        let record = RecordForm { name: Some("John".into()), ..Default::default() }.into_record();

        assert_eq!(record, Record::new("John", "", ""));
    }

    #[test]
    fn edit_only_sets_submitted_fields() {
        let update = RecordForm { age: Some("39".into()), ..Default::default() }.into_update();

        assert_eq!(update, Update::set().age("39"));
        assert!(RecordForm::default().into_update().is_empty());
    }
}
