//! Toolbar view model: the size button, its preset menu, and the
//! rotate / reset / persist affordances.
//!
//! The toolbar runs in its own context with its own `SizeSync`; it stays in
//! step with the frame through the shared store and the pending channel.

use crate::commands::{ToolbarCommand, execute};
use crate::host::{PendingChannel, SizeStore};
use crate::sync::SizeSync;
use rz_core::{
    Category, PresetId, PresetMap, ResizrParameters, Selection, Size, group_by_category,
    resolve_selection,
};
use serde::Serialize;
use smallvec::SmallVec;

/// View mode the tool is registered for.
pub const STORY_VIEW_MODE: &str = "story";

/// Which buttons are offered next to the size button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub rotate: bool,
    pub reset: bool,
    pub persist: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    /// Right-hand detail, `{w}x{h}` for presets.
    pub right: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    /// `None` for the trailing group holding the synthetic Custom entry.
    pub category: Option<Category>,
    pub entries: SmallVec<[MenuEntry; 4]>,
}

pub type Menu = SmallVec<[MenuGroup; 5]>;

pub struct Toolbar<S, C> {
    disabled: bool,
    presets: PresetMap,
    sync: SizeSync<S, C>,
}

impl<S: SizeStore, C: PendingChannel> Toolbar<S, C> {
    pub fn new(params: &ResizrParameters, store: S, channel: C) -> Self {
        Self {
            disabled: params.disable,
            presets: params.presets(),
            sync: SizeSync::new(store, channel),
        }
    }

    /// Swap in parameters for a newly selected story.
    pub fn set_params(&mut self, params: &ResizrParameters) {
        self.disabled = params.disable;
        self.presets = params.presets();
    }

    pub fn sync(&self) -> &SizeSync<S, C> {
        &self.sync
    }

    pub fn presets(&self) -> &PresetMap {
        &self.presets
    }

    /// Shown only for a single story canvas, and never when disabled.
    pub fn is_visible(&self, view_mode: &str, tab_id: Option<&str>) -> bool {
        !self.disabled && view_mode == STORY_VIEW_MODE && tab_id.is_none()
    }

    pub fn selection(&self) -> Selection {
        resolve_selection(self.sync.effective(), &self.presets)
    }

    /// Button pressed state.
    pub fn is_active(&self) -> bool {
        self.selection() != Selection::Reset
    }

    /// Button label: `None` at natural size.
    pub fn display_label(&self) -> Option<String> {
        self.sync.effective().map(|s| s.to_string())
    }

    pub fn affordances(&self) -> Affordances {
        let sized = self.sync.effective().is_some();
        Affordances {
            rotate: sized,
            reset: sized,
            persist: self.sync.has_pending(),
        }
    }

    pub fn menu(&self) -> Menu {
        let selection = self.selection();
        let mut menu: Menu = group_by_category(&self.presets)
            .into_iter()
            .map(|(category, presets)| MenuGroup {
                category: Some(category),
                entries: presets
                    .into_iter()
                    .map(|p| MenuEntry {
                        id: p.id.as_str().to_string(),
                        title: p.name.clone(),
                        right: Some(p.size.to_string()),
                        active: selection == Selection::Preset(p.id),
                    })
                    .collect(),
            })
            .collect();

        if selection == Selection::Custom {
            let mut entries = SmallVec::new();
            entries.push(MenuEntry {
                id: Selection::Custom.as_str().to_string(),
                title: "Custom".to_string(),
                right: self.display_label(),
                active: true,
            });
            menu.push(MenuGroup {
                category: None,
                entries,
            });
        }
        menu
    }

    /// Run a toolbar command. Returns `true` if the size state changed.
    pub fn run(&mut self, command: ToolbarCommand) -> bool {
        if self.disabled {
            return false;
        }
        execute(&mut self.sync, &self.presets, command)
    }

    /// Shortcut for a menu click.
    pub fn select(&mut self, id: &str) -> bool {
        match Selection::from_id(id) {
            Some(selection) => self.run(ToolbarCommand::SelectPreset(selection)),
            None => {
                log::debug!("unknown menu id {id:?}; ignoring");
                false
            }
        }
    }

    /// A pending size arrived over the channel.
    pub fn on_pending_size_changed(&mut self, size: Option<Size>) -> bool {
        self.sync.receive_pending(size)
    }

    /// Currently selected preset, if any.
    pub fn active_preset(&self) -> Option<PresetId> {
        match self.selection() {
            Selection::Preset(id) => Some(id),
            _ => None,
        }
    }
}
