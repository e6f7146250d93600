//! Preset resolution: size → selection, and menu grouping.

use crate::constants::{CUSTOM_ID, RESET_ID};
use crate::id::PresetId;
use crate::model::{Category, PresetMap, Size, ViewportPreset};
use smallvec::SmallVec;
use std::fmt;

/// How the current size is classified for the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// No explicit size; the surface uses its natural size.
    Reset,
    /// Exactly matches a known preset.
    Preset(PresetId),
    /// A concrete size that matches no preset.
    Custom,
}

impl Selection {
    /// Parse a menu entry id. `None` for a key no preset was ever
    /// configured with.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            RESET_ID => Some(Selection::Reset),
            CUSTOM_ID => Some(Selection::Custom),
            key => PresetId::lookup(key).map(Selection::Preset),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Reset => RESET_ID,
            Selection::Custom => CUSTOM_ID,
            Selection::Preset(id) => id.as_str(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a size against presets, scanning in preset order.
pub fn resolve_selection(size: Option<Size>, presets: &PresetMap) -> Selection {
    let Some(size) = size else {
        return Selection::Reset;
    };
    presets
        .iter()
        .find(|p| p.size == size)
        .map_or(Selection::Custom, |p| Selection::Preset(p.id))
}

/// Presets bucketed by category, in menu order. Empty categories are omitted.
pub type PresetGroups<'a> = SmallVec<[(Category, SmallVec<[&'a ViewportPreset; 4]>); 4]>;

pub fn group_by_category(presets: &PresetMap) -> PresetGroups<'_> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let members: SmallVec<[&ViewportPreset; 4]> =
                presets.iter().filter(|p| p.category == category).collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn natural_size_is_reset() {
        assert_eq!(
            resolve_selection(None, &PresetMap::minimal()),
            Selection::Reset
        );
        assert_eq!(resolve_selection(None, &PresetMap::new(vec![])), Selection::Reset);
    }

    #[test]
    fn exact_match_only() {
        let presets = PresetMap::minimal();
        assert_eq!(
            resolve_selection(Some(Size::new(768, 1024)), &presets),
            Selection::Preset(PresetId::intern("tablet"))
        );
        assert_eq!(
            resolve_selection(Some(Size::new(770, 1024)), &presets),
            Selection::Custom
        );
        // Rotated tablet is not the tablet preset
        assert_eq!(
            resolve_selection(Some(Size::new(1024, 768)), &presets),
            Selection::Custom
        );
    }

    #[test]
    fn first_match_wins() {
        let dup = |id: &str| ViewportPreset {
            id: PresetId::intern(id),
            name: id.to_string(),
            size: Size::new(500, 500),
            category: Category::Other,
        };
        let presets = PresetMap::new(vec![dup("first"), dup("second")]);
        assert_eq!(
            resolve_selection(Some(Size::new(500, 500)), &presets),
            Selection::Preset(PresetId::intern("first"))
        );
    }

    #[test]
    fn selection_ids() {
        // Building the presets configures their keys
        let _ = PresetMap::minimal();
        assert_eq!(Selection::from_id("reset"), Some(Selection::Reset));
        assert_eq!(Selection::from_id("custom"), Some(Selection::Custom));
        assert_eq!(
            Selection::from_id("mobile").map(|s| s.as_str()),
            Some("mobile")
        );
    }

    #[test]
    fn unknown_menu_ids_are_not_interned() {
        assert_eq!(Selection::from_id("resolve-test-smartwatch"), None);
        assert_eq!(PresetId::lookup("resolve-test-smartwatch"), None);
    }

    #[test]
    fn grouping_follows_category_order() {
        let p = |id: &str, category| ViewportPreset {
            id: PresetId::intern(id),
            name: id.to_string(),
            size: Size::new(100, 100),
            category,
        };
        let presets = PresetMap::new(vec![
            p("wide", Category::Desktop),
            p("misc", Category::Other),
            p("phone", Category::Mobile),
            p("phone_xl", Category::Mobile),
        ]);
        let groups = group_by_category(&presets);
        let shape: Vec<(Category, Vec<&str>)> = groups
            .iter()
            .map(|(c, ps)| (*c, ps.iter().map(|p| p.id.as_str()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (Category::Mobile, vec!["phone", "phone_xl"]),
                (Category::Desktop, vec!["wide"]),
                (Category::Other, vec!["misc"]),
            ]
        );
    }
}
