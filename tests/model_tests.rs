use keynotes::document::{KeyDataDoc, KeyEntryDoc, NoteDoc};
use keynotes::layer::Layer;
use keynotes::layout::{Cell, KnownLayout, Layout};
use keynotes::model::{KeyData, Note, NoteStatus};
use rstest::rstest;
use std::collections::BTreeMap;

fn layout_of(ids: &[&str]) -> Layout {
    Layout {
        rows: vec![ids.iter().map(|id| Cell::key(id, id)).collect()],
    }
}

fn note_doc(text: &str, status: &str) -> NoteDoc {
    NoteDoc {
        text: Some(text.to_string()),
        status: Some(status.to_string()),
    }
}

fn entry_doc(label: Option<&str>, notes: &[(&str, NoteDoc)]) -> KeyEntryDoc {
    KeyEntryDoc {
        label: label.map(str::to_string),
        notes: notes
            .iter()
            .map(|(layer, n)| (layer.to_string(), n.clone()))
            .collect(),
    }
}

// --- empty_for ---

#[rstest]
#[case(KnownLayout::Full)]
#[case(KnownLayout::Tkl)]
#[case(KnownLayout::Compact)]
fn test_empty_for_covers_every_builtin_board(#[case] board: KnownLayout) {
    let layout = board.layout();
    let data = KeyData::empty_for(&layout);

    let ids = layout.annotatable_ids();
    assert_eq!(data.len(), ids.len());
    for id in ids {
        let entry = data.get(id).unwrap();
        assert_eq!(entry.notes.len(), 8, "{} is missing layers", id);
        for layer in Layer::all() {
            assert_eq!(entry.note(layer), &Note::default());
        }
    }
}

#[test]
fn test_empty_for_dedups_merged_keys() {
    // NumpadAdd and NumpadEnter each occupy two rows of the full board.
    let layout = KnownLayout::Full.layout();
    let data = KeyData::empty_for(&layout);
    assert!(data.get("NumpadAdd").is_some());

    let cells_with_add = layout
        .cells()
        .filter(|c| c.id() == Some("NumpadAdd"))
        .count();
    assert_eq!(cells_with_add, 2);
    assert_eq!(
        data.entries.keys().filter(|k| *k == "NumpadAdd").count(),
        1
    );
}

// --- reconcile ---

#[test]
fn test_reconcile_drops_ids_absent_from_layout() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert(
        "Gone".to_string(),
        entry_doc(Some("Gone"), &[("base", note_doc("old", "used"))]),
    );
    source.insert(
        "KeyA".to_string(),
        entry_doc(Some("A"), &[("base", note_doc("kept", "used"))]),
    );

    let layout = layout_of(&["KeyA", "KeyB"]);
    let merged = KeyData::reconcile(Some(&source), &layout);

    assert!(merged.get("Gone").is_none());
    assert_eq!(merged.note("KeyA", Layer::Base).unwrap().text, "kept");
    assert_eq!(merged.note("KeyB", Layer::Base).unwrap(), &Note::default());
}

#[test]
fn test_reconcile_fills_missing_layers() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert(
        "KeyA".to_string(),
        entry_doc(Some("A"), &[("ctrlShift", note_doc("only one", "fixed"))]),
    );

    let layout = layout_of(&["KeyA"]);
    let merged = KeyData::reconcile(Some(&source), &layout);
    let entry = merged.get("KeyA").unwrap();

    assert_eq!(entry.notes.len(), 8);
    assert_eq!(entry.note(Layer::CtrlShift).text, "only one");
    assert_eq!(entry.note(Layer::CtrlShift).status, NoteStatus::Fixed);
    assert_eq!(entry.note(Layer::Base), &Note::default());
}

#[test]
fn test_reconcile_coerces_unknown_status_to_free() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert(
        "KeyA".to_string(),
        entry_doc(None, &[("base", note_doc("hand edited", "banana"))]),
    );

    let layout = layout_of(&["KeyA"]);
    let merged = KeyData::reconcile(Some(&source), &layout);
    let note = merged.note("KeyA", Layer::Base).unwrap();

    assert_eq!(note.text, "hand edited");
    assert_eq!(note.status, NoteStatus::Free);
}

#[test]
fn test_reconcile_defaults_missing_fields() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert(
        "KeyA".to_string(),
        entry_doc(
            None,
            &[(
                "base",
                NoteDoc {
                    text: None,
                    status: None,
                },
            )],
        ),
    );

    let layout = layout_of(&["KeyA"]);
    let merged = KeyData::reconcile(Some(&source), &layout);
    assert_eq!(merged.note("KeyA", Layer::Base).unwrap(), &Note::default());
}

#[test]
fn test_reconcile_ignores_unknown_layer_ids() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert(
        "KeyA".to_string(),
        entry_doc(Some("A"), &[("hyper", note_doc("bogus layer", "used"))]),
    );

    let layout = layout_of(&["KeyA"]);
    let merged = KeyData::reconcile(Some(&source), &layout);
    let entry = merged.get("KeyA").unwrap();

    assert_eq!(entry.notes.len(), 8);
    for layer in Layer::all() {
        assert_eq!(entry.note(layer), &Note::default());
    }
}

#[test]
fn test_reconcile_prefers_layout_label() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert("KeyA".to_string(), entry_doc(Some("Stale Label"), &[]));

    let layout = Layout {
        rows: vec![vec![Cell::key("KeyA", "A")]],
    };
    let merged = KeyData::reconcile(Some(&source), &layout);
    assert_eq!(merged.get("KeyA").unwrap().label, "A");
}

#[test]
fn test_reconcile_is_idempotent_on_builtin_board() {
    let mut source: KeyDataDoc = BTreeMap::new();
    source.insert(
        "KeyQ".to_string(),
        entry_doc(Some("Q"), &[("alt", note_doc("quit", "used"))]),
    );

    let layout = KnownLayout::Compact.layout();
    let once = KeyData::reconcile(Some(&source), &layout);
    let twice = once.rekeyed_for(&layout);
    assert_eq!(once, twice);
}

// --- set/clear scenario (the worked example) ---

#[test]
fn test_set_then_clear_leaves_other_layers_alone() {
    let layout = layout_of(&["KeyA"]);
    let mut data = KeyData::empty_for(&layout);

    data.set_note("KeyA", Layer::Base, Note::new("Copy", NoteStatus::Used), "A");
    data.set_note(
        "KeyA",
        Layer::Shift,
        Note::new("Copy line", NoteStatus::Used),
        "A",
    );

    data.clear_note("KeyA", Layer::Base);

    assert_eq!(data.note("KeyA", Layer::Base).unwrap(), &Note::default());
    assert_eq!(data.note("KeyA", Layer::Shift).unwrap().text, "Copy line");
}

#[test]
fn test_multiline_note_first_line() {
    let note = Note::new("Copy\nwith the selection extended", NoteStatus::Used);
    assert_eq!(note.first_line(), "Copy");
}
