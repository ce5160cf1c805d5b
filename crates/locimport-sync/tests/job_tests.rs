//! Tests for the job host contract: `execute` and `stop`

use locimport_ingest::InputSource;
use locimport_storage::{FileStore, MemoryStore};
use locimport_sync::{
    CancelFlag, ImportConfig, LocationImportJob, SyncError, DEFAULT_ROOT_GUID, DEFAULT_ROOT_KEY,
};
use tempfile::tempdir;

const DATASET: &str = r#"[
    {"region": "East", "name": "Harbor Office", "city": "Boston", "postalCode": "02110", "country": "US"},
    {"region": "West", "name": "Bay Office", "city": "Oakland", "country": "US"},
    {"region": "East", "name": "Mill Office", "city": "Lowell", "country": "US"}
]"#;

fn memory_job(json: &str) -> LocationImportJob<MemoryStore> {
    let (store, _root) = MemoryStore::with_root(DEFAULT_ROOT_KEY);
    LocationImportJob::new(InputSource::bytes(json.as_bytes()), store)
}

#[test]
fn test_execute_reports_success() {
    let job = memory_job(DATASET);
    assert_eq!(
        job.execute().unwrap(),
        "Success: 2 folders and 3 locations imported."
    );
}

#[test]
fn test_stop_before_execute() {
    let job = memory_job(DATASET);
    job.stop();
    job.stop();

    assert_eq!(
        job.execute().unwrap(),
        "Stopped before any records were imported."
    );
    assert_eq!(job.store().snapshot().len(), 1);
}

#[test]
fn test_stop_after_finish_has_no_effect_on_next_run() {
    let job = memory_job(DATASET);
    assert_eq!(
        job.execute().unwrap(),
        "Success: 2 folders and 3 locations imported."
    );

    job.stop();
    assert!(!job.cancel_flag().is_cancelled());
    assert_eq!(
        job.execute().unwrap(),
        "Success: 0 folders and 0 locations imported."
    );
}

#[test]
fn test_flag_tripped_between_runs_is_cleared() {
    let flag = CancelFlag::new();
    let job = memory_job(DATASET).with_cancel_flag(flag.clone());
    job.execute().unwrap();

    flag.cancel();
    assert_eq!(
        job.execute().unwrap(),
        "Success: 0 folders and 0 locations imported."
    );
}

#[test]
fn test_stopped_run_can_be_executed_again() {
    let job = memory_job(DATASET);
    job.stop();
    assert_eq!(
        job.execute().unwrap(),
        "Stopped before any records were imported."
    );

    assert_eq!(
        job.execute().unwrap(),
        "Success: 2 folders and 3 locations imported."
    );
}

#[test]
fn test_shared_cancel_flag_stops_job() {
    let flag = CancelFlag::new();
    let job = memory_job(DATASET).with_cancel_flag(flag.clone());
    flag.cancel();

    assert_eq!(
        job.execute().unwrap(),
        "Stopped before any records were imported."
    );
}

#[test]
fn test_malformed_input_fails_before_any_write() {
    let job = memory_job(r#"[{"region": "East", "name": "A"}, {"region": "West"}]"#);

    let err = job.execute().unwrap_err();
    assert!(matches!(err, SyncError::Decode(_)));
    assert_eq!(job.store().snapshot().len(), 1);
}

#[test]
fn test_missing_input_file_is_reported() {
    let dir = tempdir().unwrap();
    let (store, _root) = MemoryStore::with_root(DEFAULT_ROOT_KEY);
    let job = LocationImportJob::new(InputSource::file(dir.path().join("missing.json")), store);

    assert!(matches!(job.execute(), Err(SyncError::Input { .. })));
}

#[test]
fn test_custom_root_key() {
    let (store, _root) = MemoryStore::with_root("Venues");
    let job = LocationImportJob::new(InputSource::bytes(DATASET.as_bytes()), store);
    assert!(matches!(
        job.execute(),
        Err(SyncError::Configuration { .. })
    ));

    let (store, _root) = MemoryStore::with_root("Venues");
    let job =
        LocationImportJob::new(InputSource::bytes(DATASET.as_bytes()), store).with_root_key("Venues");
    assert_eq!(job.root_key(), "Venues");
    assert!(job.execute().is_ok());
}

#[test]
fn test_file_backed_run_is_resumable_across_processes() {
    let dir = tempdir().unwrap();
    let config = ImportConfig {
        input_path: dir.path().join("locations.json"),
        store_path: dir.path().join("content.json"),
        ..Default::default()
    };
    std::fs::write(&config.input_path, DATASET).unwrap();

    {
        let store = FileStore::open(&config.store_path).unwrap();
        store
            .register_root(&config.root_key, DEFAULT_ROOT_GUID, &config.root_key)
            .unwrap();
    }

    let run = || {
        let store = FileStore::open(&config.store_path).unwrap();
        LocationImportJob::new(InputSource::file(&config.input_path), store)
            .with_root_key(config.root_key.clone())
            .execute()
            .unwrap()
    };

    assert_eq!(run(), "Success: 2 folders and 3 locations imported.");
    assert_eq!(run(), "Success: 0 folders and 0 locations imported.");
}
