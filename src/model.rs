use crate::document::KeyDataDoc;
use crate::layer::Layer;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// Usage status of one key under one layer. Unknown strings from external
/// data are coerced to `Free` during reconciliation, never rejected.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum NoteStatus {
    #[default]
    Free,
    Used,
    Fixed,
    Other,
}

impl NoteStatus {
    pub fn parse_or_free(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Free)
    }
}

/// The annotation for one key under one layer. Multi-line text is allowed;
/// the first line is the primary label in the grid views.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub status: NoteStatus,
}

impl Note {
    pub fn new(text: &str, status: NoteStatus) -> Self {
        Self {
            text: text.to_string(),
            status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.status == NoteStatus::Free
    }

    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}

/// One annotatable key: a fallback display label plus exactly one note per
/// layer once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub label: String,
    pub notes: BTreeMap<Layer, Note>,
}

impl KeyEntry {
    pub fn empty(label: &str) -> Self {
        let notes = Layer::all().map(|layer| (layer, Note::default())).collect();
        Self {
            label: label.to_string(),
            notes,
        }
    }

    pub fn note(&self, layer: Layer) -> &Note {
        // Normalized entries hold all 8 layers; the default covers entries
        // built up incrementally through set_note on a fresh key.
        static EMPTY_NOTE: Note = Note {
            text: String::new(),
            status: NoteStatus::Free,
        };
        self.notes.get(&layer).unwrap_or(&EMPTY_NOTE)
    }
}

/// Per-key annotation data for one profile, keyed by layout key id.
/// After normalization the key set equals the layout's annotatable id set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyData {
    pub entries: BTreeMap<String, KeyEntry>,
}

impl KeyData {
    /// One empty entry per distinct annotatable id in the layout, each with
    /// a default note for every layer. Deterministic and idempotent.
    pub fn empty_for(layout: &Layout) -> Self {
        let mut entries = BTreeMap::new();
        for cell in layout.cells() {
            if let crate::layout::Cell::Key { id, label, .. } = cell {
                entries
                    .entry(id.clone())
                    .or_insert_with(|| KeyEntry::empty(label));
            }
        }
        Self { entries }
    }

    /// Repairs data of unknown or stale shape against a target layout.
    ///
    /// The target layout fixes the exact key set: source entries for ids
    /// absent from the layout are dropped, ids missing from the source get
    /// empty entries. Per layer, a well-formed source note wins over the
    /// empty default; missing text becomes `""` and missing or unrecognized
    /// status becomes `free`. Labels prefer the layout's own label, then
    /// the source label, then the raw id. Never fails: a `None` source
    /// yields `empty_for(layout)`.
    pub fn reconcile(source: Option<&KeyDataDoc>, layout: &Layout) -> Self {
        let mut merged = Self::empty_for(layout);
        let Some(source) = source else {
            return merged;
        };

        for (key_id, entry) in merged.entries.iter_mut() {
            let Some(src) = source.get(key_id) else {
                continue;
            };
            if entry.label.is_empty() {
                entry.label = src
                    .label
                    .clone()
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| key_id.clone());
            }
            for layer in Layer::all() {
                if let Some(note) = src.notes.get(&layer.to_string()) {
                    let status = note
                        .status
                        .as_deref()
                        .map(NoteStatus::parse_or_free)
                        .unwrap_or_default();
                    let text = note.text.clone().unwrap_or_default();
                    entry.notes.insert(layer, Note { text, status });
                }
            }
        }
        merged
    }

    /// Re-keys already-normalized data against a different layout: the same
    /// merge as `reconcile`, but from in-memory data instead of a document.
    /// Notes on ids shared by both layouts carry over unchanged.
    pub fn rekeyed_for(&self, layout: &Layout) -> Self {
        let mut merged = Self::empty_for(layout);
        for (key_id, entry) in merged.entries.iter_mut() {
            let Some(src) = self.entries.get(key_id) else {
                continue;
            };
            if entry.label.is_empty() {
                entry.label = if src.label.is_empty() {
                    key_id.clone()
                } else {
                    src.label.clone()
                };
            }
            for layer in Layer::all() {
                entry.notes.insert(layer, src.note(layer).clone());
            }
        }
        merged
    }

    pub fn get(&self, key_id: &str) -> Option<&KeyEntry> {
        self.entries.get(key_id)
    }

    pub fn note(&self, key_id: &str, layer: Layer) -> Option<&Note> {
        self.get(key_id).map(|entry| entry.note(layer))
    }

    /// Upserts one note, creating the key entry if the id is unknown to
    /// the current data (e.g. a merged key freshly introduced by a custom
    /// layout).
    pub fn set_note(&mut self, key_id: &str, layer: Layer, note: Note, fallback_label: &str) {
        let entry = self
            .entries
            .entry(key_id.to_string())
            .or_insert_with(|| KeyEntry::empty(fallback_label));
        entry.notes.insert(layer, note);
    }

    pub fn clear_note(&mut self, key_id: &str, layer: Layer) {
        if let Some(entry) = self.entries.get_mut(key_id) {
            entry.notes.insert(layer, Note::default());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
