//! Toolbar commands and the size transitions they cause.
//!
//! Commands that settle on a size (preset, reset, persist) commit through
//! `SizeSync::commit`, which writes the store and clears pending everywhere.
//! Rotate stays in the pending tier.

use crate::host::{PendingChannel, SizeStore};
use crate::sync::SizeSync;
use rz_core::{PresetMap, Selection};

/// Actions the toolbar can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    /// Menu pick: a preset id, `reset`, or `custom`.
    SelectPreset(Selection),
    /// Swap width and height of the effective size.
    Rotate,
    /// Back to the natural size.
    Reset,
    /// Write the pending size to the store.
    Persist,
}

impl ToolbarCommand {
    /// Resolve a bridge action name. `select` takes the menu entry id; an
    /// id no preset was configured with resolves to nothing.
    pub fn from_name(name: &str, arg: Option<&str>) -> Option<Self> {
        match name {
            "select" => arg
                .and_then(Selection::from_id)
                .map(ToolbarCommand::SelectPreset),
            "rotate" => Some(ToolbarCommand::Rotate),
            "reset" => Some(ToolbarCommand::Reset),
            "persist" => Some(ToolbarCommand::Persist),
            _ => None,
        }
    }
}

/// Apply `command`. Returns `true` if any size state changed.
pub fn execute<S: SizeStore, C: PendingChannel>(
    sync: &mut SizeSync<S, C>,
    presets: &PresetMap,
    command: ToolbarCommand,
) -> bool {
    match command {
        ToolbarCommand::SelectPreset(Selection::Reset) | ToolbarCommand::Reset => {
            sync.commit(None);
            true
        }
        ToolbarCommand::SelectPreset(Selection::Preset(id)) => match presets.get(id) {
            Some(preset) => {
                sync.commit(Some(preset.size));
                true
            }
            None => {
                log::debug!("unknown preset {id}; ignoring");
                false
            }
        },
        ToolbarCommand::SelectPreset(Selection::Custom) => {
            if !sync.has_pending() {
                return false;
            }
            sync.publish_pending(None);
            true
        }
        ToolbarCommand::Rotate => match sync.effective() {
            Some(size) => {
                sync.publish_pending(Some(size.rotated()));
                true
            }
            None => false,
        },
        ToolbarCommand::Persist => match sync.pending() {
            Some(size) => {
                sync.commit(Some(size));
                true
            }
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{LocalChannel, MemoryStore};
    use pretty_assertions::assert_eq;
    use rz_core::{PresetId, Size};

    fn sync() -> SizeSync<MemoryStore, LocalChannel> {
        SizeSync::new(MemoryStore::new(), LocalChannel::new())
    }

    fn select(id: &str) -> ToolbarCommand {
        let _ = PresetMap::minimal();
        ToolbarCommand::SelectPreset(Selection::from_id(id).unwrap())
    }

    #[test]
    fn select_known_preset_commits() {
        let mut s = sync();
        s.publish_pending(Some(Size::new(500, 500)));
        assert!(execute(&mut s, &PresetMap::minimal(), select("tablet")));
        assert_eq!(s.persisted(), Some(Size::new(768, 1024)));
        assert_eq!(s.pending(), None);
    }

    #[test]
    fn select_unknown_preset_is_noop() {
        let mut s = sync();
        s.store().save(Some(Size::new(360, 800)));
        s.publish_pending(Some(Size::new(400, 400)));
        // Configured by some other story, but not offered here
        let watch = ToolbarCommand::SelectPreset(Selection::Preset(PresetId::intern("watch")));
        assert!(!execute(&mut s, &PresetMap::minimal(), watch));
        assert_eq!(s.persisted(), Some(Size::new(360, 800)));
        assert_eq!(s.pending(), Some(Size::new(400, 400)));
    }

    #[test]
    fn select_custom_clears_pending_only() {
        let mut s = sync();
        s.store().save(Some(Size::new(360, 800)));
        s.publish_pending(Some(Size::new(400, 400)));
        assert!(execute(&mut s, &PresetMap::minimal(), select("custom")));
        assert_eq!(s.pending(), None);
        assert_eq!(s.persisted(), Some(Size::new(360, 800)));
        assert_eq!(s.store().writes(), 1);
    }

    #[test]
    fn select_reset_clears_both_tiers() {
        let mut s = sync();
        s.store().save(Some(Size::new(360, 800)));
        s.publish_pending(Some(Size::new(400, 400)));
        assert!(execute(&mut s, &PresetMap::minimal(), select("reset")));
        assert_eq!(s.effective(), None);
    }

    #[test]
    fn rotate_requires_a_size() {
        let mut s = sync();
        assert!(!execute(&mut s, &PresetMap::minimal(), ToolbarCommand::Rotate));
        assert!(s.channel().history().is_empty());
    }

    #[test]
    fn rotate_persisted_goes_pending() {
        let mut s = sync();
        s.store().save(Some(Size::new(360, 800)));
        execute(&mut s, &PresetMap::minimal(), ToolbarCommand::Rotate);
        assert_eq!(s.pending(), Some(Size::new(800, 360)));
        assert_eq!(s.persisted(), Some(Size::new(360, 800)));
    }

    #[test]
    fn persist_without_pending_is_noop() {
        let mut s = sync();
        assert!(!execute(&mut s, &PresetMap::minimal(), ToolbarCommand::Persist));
        assert_eq!(s.store().writes(), 0);
    }

    #[test]
    fn action_names() {
        let _ = PresetMap::minimal();
        assert_eq!(
            ToolbarCommand::from_name("select", Some("mobile")),
            Some(ToolbarCommand::SelectPreset(Selection::Preset(
                PresetId::intern("mobile")
            )))
        );
        assert_eq!(ToolbarCommand::from_name("select", None), None);
        assert_eq!(
            ToolbarCommand::from_name("select", Some("commands-test-smartwatch")),
            None
        );
        assert_eq!(PresetId::lookup("commands-test-smartwatch"), None);
        assert_eq!(
            ToolbarCommand::from_name("persist", None),
            Some(ToolbarCommand::Persist)
        );
        assert_eq!(ToolbarCommand::from_name("zoom", None), None);
    }
}
