//! Ordered menu tree with a revision counter.
//!
//! All operations go through one [`Mutex`]; a reader can never observe an
//! ordering entry without its item, or a tree paired with another revision.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::menu::{ItemProps, MenuItem, ids};

#[derive(Debug, Default, Clone)]
struct MenuTree {
    order: Vec<i32>,
    items: HashMap<i32, ItemProps>,
    revision: u32,
}

impl MenuTree {
    // Pins at `u32::MAX` rather than wrapping; the revision never goes back.
    fn bump(&mut self) -> u32 {
        self.revision = self.revision.saturating_add(1);
        self.revision
    }

    fn insert_static(&mut self, id: i32, props: ItemProps) -> u32 {
        if self.items.insert(id, props).is_none() {
            self.order.push(id);
        }
        self.bump()
    }

    fn insert_after(&mut self, id: i32, props: ItemProps, anchor: i32) -> u32 {
        // Re-inserting a live id moves it; the ordering never holds duplicates.
        if self.items.insert(id, props).is_some() {
            self.order.retain(|&v| v != id);
        }
        let pos = self
            .order
            .iter()
            .position(|&v| v == anchor)
            .map_or(0, |i| i + 1);
        self.order.insert(pos, id);
        self.bump()
    }

    fn clear_dynamic(&mut self) -> u32 {
        let items = &mut self.items;
        self.order.retain(|&id| {
            if ids::is_dynamic(id) {
                items.remove(&id);
                false
            } else {
                true
            }
        });
        self.bump()
    }
}

/// Owner of the menu tree.
///
/// Constructed once at startup and shared behind an `Arc` with the
/// reconciler and the bus objects.
#[derive(Debug, Default)]
pub struct MenuStore {
    inner: Mutex<MenuTree>,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section leaves the tree consistent, so a poisoned lock
    // still guards valid data.
    fn lock(&self) -> MutexGuard<'_, MenuTree> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or overwrites the item at `id`, appending it if new.
    ///
    /// Returns the new revision.
    pub fn insert_static(&self, id: i32, props: ItemProps) -> u32 {
        self.lock().insert_static(id, props)
    }

    /// Inserts `id` directly after `anchor`, or at the front when `anchor`
    /// is not in the tree.
    ///
    /// Returns the new revision.
    pub fn insert_after_anchor(&self, id: i32, props: ItemProps, anchor: i32) -> u32 {
        self.lock().insert_after(id, props, anchor)
    }

    /// Removes every dynamic item. The revision advances even when nothing
    /// was removed.
    pub fn clear_dynamic_range(&self) -> u32 {
        self.lock().clear_dynamic()
    }

    /// Clears the dynamic partition and inserts `entries` after `anchor`,
    /// under one lock acquisition.
    ///
    /// The entries end up in the given order. The revision advances once for
    /// the clear and once per inserted entry; the final value is returned.
    pub fn replace_dynamic(&self, anchor: i32, entries: Vec<MenuItem>) -> u32 {
        let mut tree = self.lock();
        let mut revision = tree.clear_dynamic();
        // Each insert lands right after the anchor, so go back to front.
        for entry in entries.into_iter().rev() {
            revision = tree.insert_after(entry.id, entry.props, anchor);
        }
        revision
    }

    /// Returns a consistent copy of the tree.
    pub fn snapshot(&self) -> MenuSnapshot {
        let tree = self.lock();
        MenuSnapshot {
            order: tree.order.clone(),
            items: tree.items.clone(),
            revision: tree.revision,
        }
    }

    pub fn revision(&self) -> u32 {
        self.lock().revision
    }
}

/// Immutable copy of the menu tree at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSnapshot {
    order: Vec<i32>,
    items: HashMap<i32, ItemProps>,
    revision: u32,
}

impl MenuSnapshot {
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Item identifiers in display order.
    pub fn order(&self) -> &[i32] {
        &self.order
    }

    pub fn get(&self, id: i32) -> Option<&ItemProps> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.items.contains_key(&id)
    }

    /// Items in display order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &ItemProps)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).map(|props| (*id, props)))
    }

    /// Identifiers of the dynamic partition, in display order.
    pub fn dynamic_ids(&self) -> Vec<i32> {
        self.order
            .iter()
            .copied()
            .filter(|&id| ids::is_dynamic(id))
            .collect()
    }

    /// Returns `true` if ordering and mapping reference exactly the same ids.
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.order.len());
        self.order.len() == self.items.len()
            && self
                .order
                .iter()
                .all(|id| self.items.contains_key(id) && seen.insert(*id))
    }
}
