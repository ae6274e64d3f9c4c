use keynotes::layer::Layer;
use keynotes::layout::{LayoutRegistry, DEFAULT_LAYOUT_NAME};
use keynotes::model::{Note, NoteStatus};
use keynotes::store::{FileStore, MemoryStore, Persister, Storage, STORAGE_KEY};

fn registry() -> LayoutRegistry {
    LayoutRegistry::builtin()
}

#[test]
fn test_load_absent_snapshot_starts_fresh() {
    let mut persister = Persister::new(MemoryStore::default());
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);

    assert_eq!(state.current_profile().name, "Default");
    assert_eq!(state.current_layer, Layer::Base);
}

#[test]
fn test_load_corrupt_snapshot_starts_fresh() {
    let mut store = MemoryStore::default();
    store.set(STORAGE_KEY, "{\"profiles\": oops").unwrap();

    let mut persister = Persister::new(store);
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);
    assert_eq!(state.current_profile().name, "Default");
}

#[test]
fn test_load_shape_failure_starts_fresh() {
    // Valid JSON, but neither 'profiles' nor 'keyData'.
    let mut store = MemoryStore::default();
    store.set(STORAGE_KEY, r#"{"version": 3}"#).unwrap();

    let mut persister = Persister::new(store);
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);
    assert_eq!(state.current_profile().name, "Default");
}

#[test]
fn test_first_save_after_load_is_suppressed() {
    let mut persister = Persister::new(MemoryStore::default());
    let mut state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);

    persister.save(&state);
    assert!(
        persister.storage().entries.is_empty(),
        "a bare load must not rewrite the snapshot"
    );

    state.set_note("KeyA", Layer::Base, Note::new("hi", NoteStatus::Used), "A");
    persister.save(&state);
    assert!(persister.storage().entries.contains_key(STORAGE_KEY));
}

#[test]
fn test_suppression_is_one_shot_per_load() {
    let mut persister = Persister::new(MemoryStore::default());
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);

    persister.save(&state); // suppressed
    persister.save(&state); // real
    let written = persister.storage().entries[STORAGE_KEY].clone();

    let restored = persister.load(&registry(), DEFAULT_LAYOUT_NAME);
    assert_eq!(restored, state);

    persister.save(&restored); // suppressed again after the re-load
    assert_eq!(persister.storage().entries[STORAGE_KEY], written);
}

#[test]
fn test_write_failure_never_propagates() {
    let store = MemoryStore {
        fail_writes: true,
        ..Default::default()
    };
    let mut persister = Persister::new(store);
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);

    persister.save(&state);
    persister.save(&state); // write fails; only a warning is logged
    assert!(persister.storage().entries.is_empty());
}

#[test]
fn test_save_then_load_round_trips() {
    let reg = registry();
    let mut persister = Persister::new(MemoryStore::default());
    let mut state = persister.load(&reg, DEFAULT_LAYOUT_NAME);

    state.set_note(
        "NumpadEnter",
        Layer::Ctrl,
        Note::new("Run", NoteStatus::Fixed),
        "Enter",
    );
    state.set_layer(Layer::Ctrl);
    persister.save(&state); // suppressed
    persister.save(&state);

    let restored = persister.load(&reg, DEFAULT_LAYOUT_NAME);
    assert_eq!(restored, state);
}

#[test]
fn test_load_reconciles_against_stored_board() {
    // The snapshot was saved under the compact board; loading with the full
    // board as the session default must still reconcile against compact,
    // so the stray F1 entry stays dropped.
    let raw = r#"{
        "profiles": {
            "laptop": {
                "name": "Laptop", "layoutName": "compact",
                "keyData": { "F1": { "notes": { "base": { "text": "Help" } } },
                             "KeyA": { "notes": { "base": { "text": "Select all", "status": "used" } } } }
            }
        },
        "currentProfileId": "laptop",
        "currentLayer": "base"
    }"#;
    let mut store = MemoryStore::default();
    store.set(STORAGE_KEY, raw).unwrap();

    let mut persister = Persister::new(store);
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);
    let data = &state.current_profile().key_data;

    assert_eq!(state.current_profile().layout_name, "compact");
    assert!(data.get("F1").is_none());
    assert_eq!(data.note("KeyA", Layer::Base).unwrap().text, "Select all");
}

#[test]
fn test_load_legacy_snapshot_upgrades() {
    let raw = r#"{"keyData": {"KeyB": {"notes": {"shift": {"text": "Bold", "status": "used"}}}}}"#;
    let mut store = MemoryStore::default();
    store.set(STORAGE_KEY, raw).unwrap();

    let mut persister = Persister::new(store);
    let state = persister.load(&registry(), DEFAULT_LAYOUT_NAME);

    assert_eq!(state.current_profile_id, "default");
    assert_eq!(state.current_profile().name, "Imported");
    assert_eq!(
        state
            .current_profile()
            .key_data
            .note("KeyB", Layer::Shift)
            .unwrap()
            .text,
        "Bold"
    );
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("nested").join("store"));

    assert_eq!(store.get(STORAGE_KEY), None);
    store.set(STORAGE_KEY, "{\"x\": 1}").unwrap();
    assert_eq!(store.get(STORAGE_KEY).as_deref(), Some("{\"x\": 1}"));
}
