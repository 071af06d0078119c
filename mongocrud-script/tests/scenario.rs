use mongocrud::{
    error::StoreError,
    memory::InMemoryStore,
    record::Record,
    store::RecordStore,
};
use mongocrud_script::run_scenario;

#[tokio::test]
async fn scenario_on_an_empty_collection() {
    let store = RecordStore::new(InMemoryStore::new());
    let users = store.collection("users");

    let report = run_scenario(&users).await.unwrap();

    assert_eq!(report.all_records.len(), 1);
    assert_eq!(report.all_records[0].id, Some(report.inserted_id));
    assert_eq!(report.all_records[0].name, "John");
    assert_eq!(report.all_records[0].email, "test@example.com");
    assert_eq!(report.all_records[0].age, "38");
    assert_eq!(report.modified, 1);
    assert_eq!(report.deleted, 1);
    assert!(report.j_records.is_empty());
    assert!(users.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn regex_step_sees_surviving_records() {
    let store = RecordStore::new(InMemoryStore::new());
    let users = store.collection("users");

    for name in ["Jane", "Mark", "jack"] {
        users.insert(&Record::new(name, "x@example.com", "30")).await.unwrap();
    }

    let report = run_scenario(&users).await.unwrap();

    assert_eq!(report.all_records.len(), 4);
    let names: Vec<_> = report.j_records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Jane"]);
}

#[tokio::test]
async fn scenario_stops_at_the_first_store_failure() {
    let backend = InMemoryStore::new();
    let store = RecordStore::new(backend.clone());
    backend.set_available(false);

    let result = run_scenario(&store.collection("users")).await;

    assert!(matches!(result, Err(StoreError::Backend(_))));
    backend.set_available(true);
    assert_eq!(backend.document_count("users").await, 0);
}
