//! Preset keys.
//!
//! Keys come from story parameters and are interned once, when the preset
//! map is built. Ids that arrive later from the toolbar menu are only
//! looked up: a key nobody configured never reaches the interner.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static PRESET_KEYS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned viewport preset key (`"mobile"`, `"tablet"`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresetId(Spur);

impl PresetId {
    /// Intern a configured preset key.
    pub fn intern(key: &str) -> Self {
        PresetId(PRESET_KEYS.get_or_intern(key))
    }

    /// The id of a key that has already been configured somewhere, if any.
    pub fn lookup(key: &str) -> Option<Self> {
        PRESET_KEYS.get(key).map(PresetId)
    }

    pub fn as_str(&self) -> &'static str {
        PRESET_KEYS.resolve(&self.0)
    }
}

impl fmt::Debug for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preset:{}", self.as_str())
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PresetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Deserializing is configuration, so it interns.
impl<'de> Deserialize<'de> for PresetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = Cow::<'de, str>::deserialize(deserializer)?;
        Ok(PresetId::intern(&key))
    }
}
