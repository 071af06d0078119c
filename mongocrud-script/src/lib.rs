//! A linear CRUD walkthrough against a record collection.
//!
//! [`run_scenario`] performs, in order:
//!
//! 1. insert `John` / `test@example.com` / `38`
//! 2. find every record
//! 3. rename `John` to `Johnny`
//! 4. delete one record named `Johnny`
//! 5. find every record whose name matches `^J`
//!
//! Each step logs its result and the first failure stops the run.

use tracing::info;

use mongocrud::{
    backend::StoreBackend,
    collection::RecordCollection,
    error::StoreResult,
    query::{Filter, Update},
    record::{Field, Record, RecordId},
};

pub mod config;

/// Results of every step of [`run_scenario`].
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub inserted_id: RecordId,
    pub all_records: Vec<Record>,
    pub modified: u64,
    pub deleted: u64,
    pub j_records: Vec<Record>,
}

pub async fn run_scenario<B: StoreBackend>(users: &RecordCollection<'_, B>) -> StoreResult<ScenarioReport> {
    let inserted_id = users
        .insert(&Record::new("John", "test@example.com", "38"))
        .await?;
    info!(id = %inserted_id, "inserted document");

    let all_records = users.find_all().await?;
    for record in &all_records {
        info!(?record, "found document");
    }

    let modified = users
        .update(&Filter::eq(Field::Name, "John"), &Update::set().name("Johnny"))
        .await?;
    info!(modified, "updated documents");

    let deleted = users.delete(&Filter::eq(Field::Name, "Johnny")).await?;
    info!(deleted, "deleted documents");

    let j_records = users.find(&Filter::matches(Field::Name, "^J")).await?;
    for record in &j_records {
        info!(?record, "found document matching ^J");
    }

    Ok(ScenarioReport { inserted_id, all_records, modified, deleted, j_records })
}
