//! Wire shapes for the persisted snapshot and the export document.
//!
//! Everything is optional or defaulted: snapshots may be hand-edited, come
//! from an older format, or have been saved under a layout that no longer
//! exists. Parsing never rejects a field-level problem; `KeyData::reconcile`
//! substitutes defaults instead.

use crate::layer::Layer;
use crate::layout::LayoutRegistry;
use crate::model::KeyData;
use crate::session::{Profile, SessionState};
use crate::{KnResult, KeynotesError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEntryDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub notes: BTreeMap<String, NoteDoc>,
}

pub type KeyDataDoc = BTreeMap<String, KeyEntryDoc>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_name: Option<String>,
    pub key_data: KeyDataDoc,
}

/// The full snapshot. The current shape carries `profiles`; the legacy
/// single-profile shape carries a bare `keyData`. A document with neither
/// is malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<BTreeMap<String, ProfileDoc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_data: Option<KeyDataDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_layer: Option<String>,
}

impl SessionDoc {
    pub fn from_state(state: &SessionState) -> Self {
        let profiles = state
            .profiles
            .iter()
            .map(|(id, profile)| {
                let key_data = profile
                    .key_data
                    .entries
                    .iter()
                    .map(|(key_id, entry)| {
                        let notes = entry
                            .notes
                            .iter()
                            .map(|(layer, note)| {
                                (
                                    layer.to_string(),
                                    NoteDoc {
                                        text: Some(note.text.clone()),
                                        status: Some(note.status.to_string()),
                                    },
                                )
                            })
                            .collect();
                        (
                            key_id.clone(),
                            KeyEntryDoc {
                                label: Some(entry.label.clone()),
                                notes,
                            },
                        )
                    })
                    .collect();
                (
                    id.clone(),
                    ProfileDoc {
                        name: Some(profile.name.clone()),
                        layout_name: Some(profile.layout_name.clone()),
                        key_data,
                    },
                )
            })
            .collect();

        Self {
            profiles: Some(profiles),
            key_data: None,
            layout_name: None,
            current_profile_id: Some(state.current_profile_id.clone()),
            current_layer: Some(state.current_layer.to_string()),
        }
    }

    /// Rebuilds a valid session from a lenient document.
    ///
    /// Every profile's key data is reconciled against its own stored layout
    /// name, resolved through the registry with the caller's default as the
    /// fallback. Stored current ids are validated: an unknown profile id
    /// falls back to the first profile, an unknown layer to `base`.
    pub fn into_state(
        self,
        registry: &LayoutRegistry,
        default_layout_name: &str,
    ) -> KnResult<SessionState> {
        if let Some(profile_docs) = self.profiles {
            let mut profiles = BTreeMap::new();
            for (id, doc) in profile_docs {
                let layout_name = doc
                    .layout_name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| default_layout_name.to_string());
                let layout = registry.resolve_or_default(&layout_name);
                let profile = Profile {
                    id: id.clone(),
                    name: doc.name.filter(|n| !n.is_empty()).unwrap_or_else(|| id.clone()),
                    layout_name,
                    key_data: KeyData::reconcile(Some(&doc.key_data), layout),
                };
                profiles.insert(id, profile);
            }
            if profiles.is_empty() {
                return Ok(SessionState::fresh(registry, default_layout_name));
            }

            let current_profile_id = self
                .current_profile_id
                .filter(|id| profiles.contains_key(id))
                .or_else(|| profiles.keys().next().cloned())
                .unwrap_or_else(|| "default".to_string());

            return Ok(SessionState {
                profiles,
                current_profile_id,
                current_layer: parse_layer(self.current_layer.as_deref()),
            });
        }

        if let Some(key_data) = self.key_data {
            let layout_name = self
                .layout_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| default_layout_name.to_string());
            let layout = registry.resolve_or_default(&layout_name);
            let profile = Profile {
                id: "default".to_string(),
                name: "Imported".to_string(),
                layout_name,
                key_data: KeyData::reconcile(Some(&key_data), layout),
            };
            let mut profiles = BTreeMap::new();
            profiles.insert(profile.id.clone(), profile);
            return Ok(SessionState {
                profiles,
                current_profile_id: "default".to_string(),
                current_layer: parse_layer(self.current_layer.as_deref()),
            });
        }

        Err(KeynotesError::Format(
            "document has neither a 'profiles' mapping nor a 'keyData' field".to_string(),
        ))
    }
}

fn parse_layer(raw: Option<&str>) -> Layer {
    raw.map(Layer::parse_or_base).unwrap_or_default()
}

/// Serializes the whole session to the downloadable export document.
/// `import_document` reconstructs an equivalent session from it.
pub fn export_document(state: &SessionState) -> KnResult<String> {
    Ok(serde_json::to_string_pretty(&SessionDoc::from_state(state))?)
}

/// Parses a user-supplied export document. Fails with a format error when
/// the document carries neither shape; the caller's in-memory state is
/// untouched on failure.
pub fn import_document(
    raw: &str,
    registry: &LayoutRegistry,
    default_layout_name: &str,
) -> KnResult<SessionState> {
    let doc: SessionDoc = serde_json::from_str(raw)?;
    doc.into_state(registry, default_layout_name)
}
