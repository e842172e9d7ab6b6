//! Click-driven multi-selection over the displayed item list.
//!
//! Selection holds view-scoped [`ItemId`]s plus the anchor used for shift-click ranges. Ranges
//! are computed against the list in on-screen order, so filtering and sorting affect which
//! items a range covers.

use std::collections::BTreeSet;

use crate::model::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Modifier keys held during a click. `ctrl` also covers the platform meta key.
pub struct ClickModifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl ClickModifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
    };
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
    };
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        ctrl: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    selected: BTreeSet<ItemId>,
    anchor: Option<ItemId>,
}

impl Selection {
    pub fn contains(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.selected.iter()
    }

    pub fn anchor(&self) -> Option<&ItemId> {
        self.anchor.as_ref()
    }

    /// Drops the selected set but keeps the anchor.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drops both the selected set and the anchor.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    /// Replaces the selection with `id` and anchors on it.
    pub fn select_only(&mut self, id: ItemId) {
        self.selected.clear();
        self.selected.insert(id.clone());
        self.anchor = Some(id);
    }

    /// Applies a click on `clicked` to the selection.
    ///
    /// * shift with an anchor selects the inclusive range between anchor and `clicked` in
    ///   `displayed` order, unioned with the current set when ctrl is also held; the anchor is
    ///   kept
    /// * ctrl toggles `clicked` and re-anchors on it
    /// * a plain click selects only `clicked`
    ///
    /// A shift-click whose anchor or target is not in `displayed` falls back to a plain click.
    pub fn handle_item_click(
        &mut self,
        clicked: &ItemId,
        modifiers: ClickModifiers,
        displayed: &[ItemId],
    ) {
        if modifiers.shift {
            if let Some(anchor) = self.anchor.clone() {
                let anchor_index = displayed.iter().position(|id| *id == anchor);
                let clicked_index = displayed.iter().position(|id| id == clicked);
                let (Some(anchor_index), Some(clicked_index)) = (anchor_index, clicked_index)
                else {
                    self.select_only(clicked.clone());
                    return;
                };
                let start = anchor_index.min(clicked_index);
                let end = anchor_index.max(clicked_index);
                if !modifiers.ctrl {
                    self.selected.clear();
                }
                self.selected.extend(displayed[start..=end].iter().cloned());
                return;
            }
        }

        if modifiers.ctrl {
            if !self.selected.remove(clicked) {
                self.selected.insert(clicked.clone());
            }
            self.anchor = Some(clicked.clone());
            return;
        }

        self.select_only(clicked.clone());
    }

    /// Selects every displayed item without moving the anchor.
    pub fn select_all(&mut self, displayed: &[ItemId]) {
        self.selected = displayed.iter().cloned().collect();
    }
}
