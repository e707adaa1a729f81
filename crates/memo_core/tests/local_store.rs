use memo_core::{
    DataService, FolderDeleteMode, FolderService, LocalStore, MemoService, StoreConfig,
    StoreError, DB_FILE_NAME,
};
use std::sync::Arc;

fn services(store: &Arc<LocalStore>) -> (FolderService, MemoService) {
    (
        FolderService::new(Arc::clone(store)),
        MemoService::new(Arc::clone(store)),
    )
}

#[test]
fn store_opens_lazily_on_first_operation() {
    let store = Arc::new(LocalStore::in_memory());
    assert!(!store.is_open());

    let (folders, _) = services(&store);
    assert!(folders.list_all().unwrap().is_empty());
    assert!(store.is_open());

    store.close();
    assert!(!store.is_open());
}

#[test]
fn deleting_folder_leaves_orphaned_memos_listable() {
    let store = Arc::new(LocalStore::in_memory());
    let (folders, memos) = services(&store);

    let folder_id = folders.create("Work").unwrap();
    assert_eq!(folder_id, 1);
    let memo_id = memos.create(folder_id, "Note", "").unwrap();
    assert_eq!(memo_id, 1);

    let listed = memos.list_by_folder(1).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 1);
    assert_eq!(listed[0].title, "Note");
    assert_eq!(listed[0].folder_id, 1);

    let report = folders.delete(1, FolderDeleteMode::KeepMemos).unwrap();
    assert!(report.folder_removed);
    assert_eq!(report.memos_removed, 0);
    assert!(folders.list_all().unwrap().is_empty());

    // No cascade: the memo is orphaned but still reachable by folder id.
    let orphaned = memos.list_by_folder(1).unwrap();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].id, memo_id);
}

#[test]
fn delete_memos_mode_cascades_to_owned_memos_only() {
    let store = Arc::new(LocalStore::in_memory());
    let (folders, memos) = services(&store);

    let doomed = folders.create("Doomed").unwrap();
    let kept = folders.create("Kept").unwrap();
    memos.create(doomed, "a", "").unwrap();
    memos.create(doomed, "b", "").unwrap();
    let survivor = memos.create(kept, "c", "").unwrap();

    let report = folders.delete(doomed, FolderDeleteMode::DeleteMemos).unwrap();
    assert!(report.folder_removed);
    assert_eq!(report.memos_removed, 2);

    assert!(memos.list_by_folder(doomed).unwrap().is_empty());
    let remaining: Vec<_> = memos
        .list_all()
        .unwrap()
        .into_iter()
        .map(|memo| memo.id)
        .collect();
    assert_eq!(remaining, vec![survivor]);
}

#[test]
fn reset_on_file_store_empties_collections_and_stays_openable() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalStore::new(StoreConfig::file(dir.path())));
    let (folders, memos) = services(&store);

    let folder_id = folders.create("Work").unwrap();
    memos.create(folder_id, "Note", "body").unwrap();
    assert!(dir.path().join(DB_FILE_NAME).exists());

    store.reset().unwrap();

    assert!(folders.list_all().unwrap().is_empty());
    assert!(memos.list_all().unwrap().is_empty());
    assert!(dir.path().join(DB_FILE_NAME).exists());

    let new_folder = folders.create("Fresh").unwrap();
    assert_eq!(folders.get(new_folder).unwrap().unwrap().name, "Fresh");
}

#[test]
fn reset_reports_delete_failure_and_store_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalStore::new(StoreConfig::file(dir.path())));
    let (folders, _) = services(&store);
    folders.create("Work").unwrap();

    let mut sidecar = dir.path().join(DB_FILE_NAME).into_os_string();
    sidecar.push("-shm");
    std::fs::create_dir(&sidecar).unwrap();

    let err = store.reset().unwrap_err();
    assert!(matches!(err, StoreError::Reset(_)));
    assert!(!store.is_open());

    std::fs::remove_dir(&sidecar).unwrap();
    store.reset().unwrap();
    assert!(store.is_open());
    assert!(folders.list_all().unwrap().is_empty());
    assert_eq!(folders.create("Fresh").unwrap(), 1);
}

#[test]
fn reset_on_in_memory_store_empties_collections() {
    let store = Arc::new(LocalStore::in_memory());
    let (folders, memos) = services(&store);
    let folder_id = folders.create("Work").unwrap();
    memos.create(folder_id, "Note", "").unwrap();

    store.reset().unwrap();

    assert!(folders.list_all().unwrap().is_empty());
    assert!(memos.list_all().unwrap().is_empty());
}

#[test]
fn missing_collection_triggers_automatic_reset() {
    let store = Arc::new(LocalStore::in_memory());
    let (folders, memos) = services(&store);
    folders.create("Work").unwrap();

    store
        .with_connection(|conn| Ok(conn.execute_batch("DROP TABLE memos;")?))
        .unwrap();

    assert!(store.ensure_schema().unwrap());
    assert!(!store.ensure_schema().unwrap());
    assert!(folders.list_all().unwrap().is_empty());
    assert!(memos.list_all().unwrap().is_empty());
}

#[test]
fn repository_calls_repair_partial_schema_before_running() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalStore::new(StoreConfig::file(dir.path())));
    let (folders, memos) = services(&store);
    folders.create("Work").unwrap();

    store
        .with_connection(|conn| Ok(conn.execute_batch("DROP TABLE folders;")?))
        .unwrap();
    store.close();

    // The next call reopens, sees the missing table and rebuilds the database.
    assert!(memos.list_all().unwrap().is_empty());
    assert!(folders.list_all().unwrap().is_empty());
    assert_eq!(folders.create("Again").unwrap(), 1);
}

#[test]
fn open_failure_is_reported_without_reset() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();

    let store = LocalStore::new(StoreConfig::file(&blocker));
    let err = store.open().unwrap_err();
    assert!(matches!(err, StoreError::Open(_)));
    assert!(blocker.is_file());
}

#[test]
fn wipe_all_deletes_memos_then_folders() {
    let store = Arc::new(LocalStore::in_memory());
    let (folders, memos) = services(&store);
    let work = folders.create("Work").unwrap();
    let home = folders.create("Home").unwrap();
    memos.create(work, "a", "").unwrap();
    memos.create(home, "b", "").unwrap();
    memos.create(404, "orphan", "").unwrap();

    let report = DataService::new(Arc::clone(&store)).wipe_all().unwrap();
    assert_eq!(report.memos_deleted, 3);
    assert_eq!(report.folders_deleted, 2);
    assert!(folders.list_all().unwrap().is_empty());
    assert!(memos.list_all().unwrap().is_empty());

    // Record-by-record deletion keeps the id sequence intact.
    assert!(folders.create("Next").unwrap() > home);
}

#[test]
fn records_serialize_with_camel_case_fields() {
    let store = Arc::new(LocalStore::in_memory());
    let (folders, memos) = services(&store);
    let folder_id = folders.create("Work").unwrap();
    let memo_id = memos.create(folder_id, "Note", "").unwrap();

    let folder = serde_json::to_value(folders.get(folder_id).unwrap().unwrap()).unwrap();
    assert_eq!(folder["name"], "Work");
    assert!(folder.get("createdAt").is_some());

    let memo = serde_json::to_value(memos.get(memo_id).unwrap().unwrap()).unwrap();
    assert_eq!(memo["folderId"], folder_id);
    assert!(memo.get("updatedAt").is_some());
    assert!(memo.get("folder_id").is_none());
}
