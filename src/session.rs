use crate::layer::Layer;
use crate::layout::{Layout, LayoutRegistry};
use crate::model::{KeyData, Note, NoteStatus};
use crate::{KnResult, KeynotesError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named, independently-kept set of key annotations plus the board it
/// prefers to be rendered on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub layout_name: String,
    pub key_data: KeyData,
}

/// The whole application state: all profiles plus the current selection.
/// At least one profile always exists, `current_profile_id` always names a
/// profile in the map, and the map's sorted-by-id order is the explicit
/// "first profile" order used by fallbacks.
///
/// Every transition goes through the methods below; callers own the single
/// mutable slot and re-render after each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub profiles: BTreeMap<String, Profile>,
    pub current_profile_id: String,
    pub current_layer: Layer,
}

impl SessionState {
    /// A brand-new session: one "Default" profile with empty key data for
    /// the default board, base layer selected.
    pub fn fresh(registry: &LayoutRegistry, default_layout_name: &str) -> Self {
        let layout = registry.resolve_or_default(default_layout_name);
        let profile = Profile {
            id: "default".to_string(),
            name: "Default".to_string(),
            layout_name: default_layout_name.to_string(),
            key_data: KeyData::empty_for(layout),
        };
        let mut profiles = BTreeMap::new();
        profiles.insert(profile.id.clone(), profile);
        Self {
            profiles,
            current_profile_id: "default".to_string(),
            current_layer: Layer::Base,
        }
    }

    pub fn current_profile(&self) -> &Profile {
        self.profiles
            .get(&self.current_profile_id)
            .unwrap_or_else(|| panic!("current profile id is not in the profile map"))
    }

    pub fn current_profile_mut(&mut self) -> &mut Profile {
        self.profiles
            .get_mut(&self.current_profile_id)
            .unwrap_or_else(|| panic!("current profile id is not in the profile map"))
    }

    pub fn set_layer(&mut self, layer: Layer) {
        self.current_layer = layer;
    }

    /// Creates a profile with empty key data for `layout` and makes it
    /// current. The id is a slug of the name plus a short disambiguator,
    /// regenerated until unique.
    pub fn create_profile(&mut self, name: &str, layout_name: &str, layout: &Layout) -> String {
        let base = slugify(name);
        let mut id = format!("{}-{:06x}", base, fastrand::u32(..0x0100_0000));
        while self.profiles.contains_key(&id) {
            id = format!("{}-{:06x}", base, fastrand::u32(..0x0100_0000));
        }
        let profile = Profile {
            id: id.clone(),
            name: name.trim().to_string(),
            layout_name: layout_name.to_string(),
            key_data: KeyData::empty_for(layout),
        };
        self.profiles.insert(id.clone(), profile);
        self.current_profile_id = id.clone();
        id
    }

    /// Renames the current profile in place; the id never changes. A blank
    /// name is ignored.
    pub fn rename_profile(&mut self, new_name: &str) {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return;
        }
        self.current_profile_mut().name = trimmed.to_string();
    }

    /// Removes the current profile and selects the first remaining one.
    /// Deleting the last profile is refused.
    pub fn delete_profile(&mut self) -> KnResult<()> {
        if self.profiles.len() <= 1 {
            return Err(KeynotesError::Precondition(
                "at least one profile must remain".to_string(),
            ));
        }
        self.profiles.remove(&self.current_profile_id);
        self.current_profile_id = self
            .profiles
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| panic!("profile map emptied by delete"));
        Ok(())
    }

    /// Makes `profile_id` current and hands back its preferred layout name
    /// so the caller can switch the rendered board. Unknown ids are a
    /// silent no-op.
    pub fn switch_profile(&mut self, profile_id: &str) -> Option<String> {
        let layout_name = self.profiles.get(profile_id)?.layout_name.clone();
        self.current_profile_id = profile_id.to_string();
        Some(layout_name)
    }

    /// Switches the current profile to a new board, re-keying its data.
    /// Notes on ids shared by both boards survive; notes on ids the new
    /// board lacks are gone. Callers confirm with the user first.
    pub fn change_layout(&mut self, new_layout_name: &str, new_layout: &Layout) {
        let profile = self.current_profile_mut();
        profile.key_data = profile.key_data.rekeyed_for(new_layout);
        profile.layout_name = new_layout_name.to_string();
    }

    pub fn set_note(
        &mut self,
        key_id: &str,
        layer: Layer,
        note: Note,
        fallback_label: &str,
    ) {
        self.current_profile_mut()
            .key_data
            .set_note(key_id, layer, note, fallback_label);
    }

    pub fn clear_note(&mut self, key_id: &str, layer: Layer) {
        self.current_profile_mut().key_data.clear_note(key_id, layer);
    }

    /// Wipes every note of the current profile. Callers confirm first.
    pub fn reset_profile(&mut self, layout: &Layout) {
        self.current_profile_mut().key_data = KeyData::empty_for(layout);
    }
}

/// The editing-intent heuristic: typing non-whitespace text into a note
/// whose status is exactly `free` promotes it to `used`. Any other prior
/// status is left alone. This sits beside the mutations on purpose;
/// `set_note` itself never changes a status the caller did not ask for.
pub fn status_after_edit(prior: &Note, new_text: &str) -> NoteStatus {
    if prior.status == NoteStatus::Free && !new_text.trim().is_empty() {
        NoteStatus::Used
    } else {
        prior.status
    }
}

/// URL/DOM-safe slug: lowercase alphanumeric runs joined by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "profile".to_string()
    } else {
        slug
    }
}
