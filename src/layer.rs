use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The fixed set of modifier states a key can be annotated under.
/// Order matters: it is the display order of the layer picker and the
/// mini overview, and the wire ids are camelCase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum Layer {
    Base,
    Shift,
    Ctrl,
    Alt,
    CtrlShift,
    AltShift,
    CtrlAlt,
    CtrlAltShift,
}

impl Layer {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Shift => "Shift",
            Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
            Self::CtrlShift => "Ctrl+Shift",
            Self::AltShift => "Alt+Shift",
            Self::CtrlAlt => "Ctrl+Alt",
            Self::CtrlAltShift => "Ctrl+Alt+Shift",
        }
    }

    /// Parses a wire id, falling back to `Base` for anything unrecognized.
    /// Persisted snapshots may be hand-edited; a bad layer id must not
    /// sink the whole document.
    pub fn parse_or_base(id: &str) -> Self {
        id.parse().unwrap_or(Self::Base)
    }

    pub fn all() -> impl Iterator<Item = Layer> {
        Layer::iter()
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::Base
    }
}
