use crate::{KnResult, KeynotesError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// One grid cell of a rendered keyboard: either a real key cap or a gap.
/// A key id may repeat across rows (e.g. a numpad plus spanning two rows);
/// all cells sharing an id resolve to the same annotation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Key {
        id: String,
        label: String,
        #[serde(default = "default_width")]
        width: f32,
    },
    Gap {
        #[serde(default = "default_width")]
        width: f32,
    },
}

fn default_width() -> f32 {
    1.0
}

impl Cell {
    pub fn key(id: &str, label: &str) -> Self {
        Self::wide(id, label, 1.0)
    }

    pub fn wide(id: &str, label: &str, width: f32) -> Self {
        Cell::Key {
            id: id.to_string(),
            label: label.to_string(),
            width,
        }
    }

    pub fn gap(width: f32) -> Self {
        Cell::Gap { width }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Cell::Key { id, .. } => Some(id),
            Cell::Gap { .. } => None,
        }
    }
}

/// An ordered grid of cells. Layouts come from the built-in catalog or,
/// for custom boards, from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub rows: Vec<Vec<Cell>>,
}

impl Layout {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KnResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Distinct annotatable key ids in layout order. Merged keys (same id
    /// in several cells) appear once.
    pub fn annotatable_ids(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for cell in self.cells() {
            if let Some(id) = cell.id() {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
        seen
    }

    pub fn label_for(&self, key_id: &str) -> Option<&str> {
        self.cells().find_map(|c| match c {
            Cell::Key { id, label, .. } if id == key_id => Some(label.as_str()),
            _ => None,
        })
    }
}

pub const DEFAULT_LAYOUT_NAME: &str = "full";

/// The built-in board catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum KnownLayout {
    Full,
    Tkl,
    Compact,
}

impl KnownLayout {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Full => "Full (104-key with numpad)",
            Self::Tkl => "Tenkeyless",
            Self::Compact => "Compact (60%)",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Self::Full => full_layout(),
            Self::Tkl => tkl_layout(),
            Self::Compact => compact_layout(),
        }
    }
}

/// Resolves layout names to layouts. Starts from the built-in catalog;
/// file-loaded layouts can be registered on top.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: BTreeMap<String, Layout>,
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LayoutRegistry {
    pub fn builtin() -> Self {
        let mut layouts = BTreeMap::new();
        for known in KnownLayout::iter() {
            layouts.insert(known.to_string(), known.layout());
        }
        Self { layouts }
    }

    pub fn register(&mut self, name: &str, layout: Layout) {
        self.layouts.insert(name.to_string(), layout);
    }

    pub fn resolve(&self, name: &str) -> Option<&Layout> {
        self.layouts.get(name)
    }

    /// Unknown names fall back to the default board rather than failing;
    /// stored layout names may refer to a board that no longer exists.
    pub fn resolve_or_default(&self, name: &str) -> &Layout {
        self.resolve(name)
            .or_else(|| self.resolve(DEFAULT_LAYOUT_NAME))
            .unwrap_or_else(|| panic!("registry is missing the default layout"))
    }

    pub fn require(&self, name: &str) -> KnResult<&Layout> {
        self.resolve(name)
            .ok_or_else(|| KeynotesError::UnknownLayout(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }
}

fn letter_row(ids: &str) -> Vec<Cell> {
    ids.chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            Cell::key(&format!("Key{}", upper), &upper.to_string())
        })
        .collect()
}

fn digit_row() -> Vec<Cell> {
    let mut row = vec![Cell::key("Backquote", "`")];
    for d in "1234567890".chars() {
        row.push(Cell::key(&format!("Digit{}", d), &d.to_string()));
    }
    row.push(Cell::key("Minus", "-"));
    row.push(Cell::key("Equal", "="));
    row.push(Cell::wide("Backspace", "Backspace", 2.0));
    row
}

fn main_block() -> (Vec<Cell>, Vec<Cell>, Vec<Cell>, Vec<Cell>) {
    let mut top = vec![Cell::wide("Tab", "Tab", 1.5)];
    top.extend(letter_row("qwertyuiop"));
    top.push(Cell::key("BracketLeft", "["));
    top.push(Cell::key("BracketRight", "]"));
    top.push(Cell::wide("Backslash", "\\", 1.5));

    let mut home = vec![Cell::wide("CapsLock", "Caps", 1.75)];
    home.extend(letter_row("asdfghjkl"));
    home.push(Cell::key("Semicolon", ";"));
    home.push(Cell::key("Quote", "'"));
    home.push(Cell::wide("Enter", "Enter", 2.25));

    let mut bottom = vec![Cell::wide("ShiftLeft", "Shift", 2.25)];
    bottom.extend(letter_row("zxcvbnm"));
    bottom.push(Cell::key("Comma", ","));
    bottom.push(Cell::key("Period", "."));
    bottom.push(Cell::key("Slash", "/"));
    bottom.push(Cell::wide("ShiftRight", "Shift", 2.75));

    let space = vec![
        Cell::wide("ControlLeft", "Ctrl", 1.25),
        Cell::wide("MetaLeft", "Meta", 1.25),
        Cell::wide("AltLeft", "Alt", 1.25),
        Cell::wide("Space", "Space", 6.25),
        Cell::wide("AltRight", "Alt", 1.25),
        Cell::wide("MetaRight", "Meta", 1.25),
        Cell::wide("ContextMenu", "Menu", 1.25),
        Cell::wide("ControlRight", "Ctrl", 1.25),
    ];

    (top, home, bottom, space)
}

fn function_row() -> Vec<Cell> {
    let mut row = vec![Cell::key("Escape", "Esc"), Cell::gap(1.0)];
    for f in 1..=12 {
        row.push(Cell::key(&format!("F{}", f), &format!("F{}", f)));
        if f == 4 || f == 8 {
            row.push(Cell::gap(0.5));
        }
    }
    row
}

fn arrow_rows() -> [Vec<Cell>; 2] {
    [
        vec![Cell::key("ArrowUp", "↑")],
        vec![
            Cell::key("ArrowLeft", "←"),
            Cell::key("ArrowDown", "↓"),
            Cell::key("ArrowRight", "→"),
        ],
    ]
}

/// Full board with numpad. NumpadAdd and NumpadEnter span two rows each,
/// so their ids repeat across rows.
fn full_layout() -> Layout {
    let (mut top, mut home, mut bottom, mut space) = main_block();

    let mut digits = digit_row();
    digits.push(Cell::gap(0.5));
    digits.push(Cell::key("NumLock", "Num"));
    digits.push(Cell::key("NumpadDivide", "/"));
    digits.push(Cell::key("NumpadMultiply", "*"));
    digits.push(Cell::key("NumpadSubtract", "-"));

    top.push(Cell::gap(0.5));
    top.push(Cell::key("Numpad7", "7"));
    top.push(Cell::key("Numpad8", "8"));
    top.push(Cell::key("Numpad9", "9"));
    top.push(Cell::key("NumpadAdd", "+"));

    home.push(Cell::gap(0.5));
    home.push(Cell::key("Numpad4", "4"));
    home.push(Cell::key("Numpad5", "5"));
    home.push(Cell::key("Numpad6", "6"));
    home.push(Cell::key("NumpadAdd", "+"));

    bottom.push(Cell::gap(0.5));
    bottom.push(Cell::key("Numpad1", "1"));
    bottom.push(Cell::key("Numpad2", "2"));
    bottom.push(Cell::key("Numpad3", "3"));
    bottom.push(Cell::key("NumpadEnter", "Enter"));

    space.push(Cell::gap(0.5));
    space.push(Cell::wide("Numpad0", "0", 2.0));
    space.push(Cell::key("NumpadDecimal", "."));
    space.push(Cell::key("NumpadEnter", "Enter"));

    Layout {
        rows: vec![function_row(), digits, top, home, bottom, space],
    }
}

fn tkl_layout() -> Layout {
    let (top, home, mut bottom, mut space) = main_block();

    let [up_row, lower_row] = arrow_rows();
    bottom.push(Cell::gap(1.5));
    bottom.extend(up_row);
    space.push(Cell::gap(0.5));
    space.extend(lower_row);

    Layout {
        rows: vec![function_row(), digit_row(), top, home, bottom, space],
    }
}

fn compact_layout() -> Layout {
    let (top, home, bottom, space) = main_block();
    Layout {
        rows: vec![digit_row(), top, home, bottom, space],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_builtins() {
        let registry = LayoutRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["compact", "full", "tkl"]);
        assert!(registry.resolve(DEFAULT_LAYOUT_NAME).is_some());
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let registry = LayoutRegistry::builtin();
        let fallback = registry.resolve_or_default("no-such-board");
        assert_eq!(fallback, registry.resolve("full").unwrap());
    }

    #[test]
    fn test_merged_numpad_keys_dedup() {
        let layout = KnownLayout::Full.layout();
        let ids = layout.annotatable_ids();
        assert_eq!(ids.iter().filter(|id| **id == "NumpadAdd").count(), 1);
        assert_eq!(ids.iter().filter(|id| **id == "NumpadEnter").count(), 1);
    }

    #[test]
    fn test_compact_has_no_function_row() {
        let layout = KnownLayout::Compact.layout();
        assert!(!layout.annotatable_ids().contains(&"F1"));
        assert!(layout.annotatable_ids().contains(&"KeyA"));
    }

    #[test]
    fn test_gaps_are_not_annotatable() {
        let layout = Layout {
            rows: vec![vec![Cell::key("KeyA", "A"), Cell::gap(1.0)]],
        };
        assert_eq!(layout.annotatable_ids(), vec!["KeyA"]);
    }
}
