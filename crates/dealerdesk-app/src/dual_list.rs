// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Two ordered, disjoint lists ("available" and "selected") with a single
//! focus cursor. Items move between the lists and reorder within one.
//!
//! Every command has a `try_*` form that reports why it could not run and an
//! interactive form that treats the same failures as no-ops. Neither form
//! touches the lists or the cursor when a precondition fails.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Stable identity for list items. Two items with equal keys are the same
/// logical item regardless of their other fields.
pub trait Keyed {
    type Key: Clone + Eq + fmt::Debug;

    fn key(&self) -> &Self::Key;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSide {
    Available,
    Selected,
}

impl ListSide {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Available => Self::Selected,
            Self::Selected => Self::Available,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Selected => "selected",
        }
    }
}

impl fmt::Display for ListSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Top, Self::Down, Self::Bottom];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("item is not in the {side} list")]
    NotInList { side: ListSide },
    #[error("item is in neither list")]
    UnknownItem,
    #[error("no item is focused")]
    EmptySelection,
}

#[derive(Debug, Clone)]
pub struct DualList<T: Keyed> {
    available: Vec<T>,
    selected: Vec<T>,
    cursor: Option<T::Key>,
}

impl<T: Keyed> Default for DualList<T> {
    fn default() -> Self {
        Self {
            available: Vec::new(),
            selected: Vec::new(),
            cursor: None,
        }
    }
}

impl<T: Keyed> DualList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lists(candidates: Vec<T>, persisted: Vec<T>) -> Self {
        let mut lists = Self::new();
        lists.populate(candidates, persisted);
        lists
    }

    /// Seed both lists. The persisted selection wins: candidates whose key is
    /// already selected are left out of the available list. Duplicate keys
    /// keep their first occurrence.
    pub fn populate(&mut self, candidates: Vec<T>, persisted: Vec<T>) {
        self.selected = unique_excluding(persisted, &[]);
        self.available = unique_excluding(candidates, &self.selected);
        self.cursor = None;
    }

    /// Swap in a freshly fetched candidate list, keeping the selection.
    pub fn replace_available(&mut self, candidates: Vec<T>) {
        self.available = unique_excluding(candidates, &self.selected);
        if let Some(key) = &self.cursor
            && self.locate(key).is_none()
        {
            self.cursor = None;
        }
    }

    pub fn reset(&mut self) {
        self.available.clear();
        self.selected.clear();
        self.cursor = None;
    }

    pub fn available(&self) -> &[T] {
        &self.available
    }

    pub fn selected(&self) -> &[T] {
        &self.selected
    }

    pub fn list(&self, side: ListSide) -> &[T] {
        match side {
            ListSide::Available => &self.available,
            ListSide::Selected => &self.selected,
        }
    }

    pub fn cursor(&self) -> Option<&T::Key> {
        self.cursor.as_ref()
    }

    pub fn cursor_item(&self) -> Option<&T> {
        let (side, index) = self.cursor_position()?;
        self.list(side).get(index)
    }

    pub fn cursor_position(&self) -> Option<(ListSide, usize)> {
        self.cursor.as_ref().and_then(|key| self.locate(key))
    }

    pub fn locate(&self, key: &T::Key) -> Option<(ListSide, usize)> {
        [ListSide::Available, ListSide::Selected]
            .into_iter()
            .find_map(|side| self.position(side, key).map(|index| (side, index)))
    }

    pub fn position(&self, side: ListSide, key: &T::Key) -> Option<usize> {
        self.list(side).iter().position(|item| item.key() == key)
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.locate(key).is_some()
    }

    pub fn try_move_item(
        &mut self,
        key: &T::Key,
        from: ListSide,
        to: ListSide,
    ) -> Result<(), TransferError> {
        let index = self
            .position(from, key)
            .ok_or(TransferError::NotInList { side: from })?;
        let item = self.list_mut(from).remove(index);
        self.list_mut(to).push(item);
        self.cursor = None;
        Ok(())
    }

    /// Interactive form of [`Self::try_move_item`]. Returns whether anything moved.
    pub fn move_item(&mut self, key: &T::Key, from: ListSide, to: ListSide) -> bool {
        let result = self.try_move_item(key, from, to);
        changed(result.map(|()| true), "move item")
    }

    /// Moves the focused item into `to`.
    pub fn try_move_cursor(&mut self, to: ListSide) -> Result<(), TransferError> {
        let key = self.cursor.clone().ok_or(TransferError::EmptySelection)?;
        let (from, _) = self.locate(&key).ok_or(TransferError::UnknownItem)?;
        if from == to {
            return Err(TransferError::NotInList {
                side: to.opposite(),
            });
        }
        self.try_move_item(&key, from, to)
    }

    pub fn move_cursor(&mut self, to: ListSide) -> bool {
        let result = self.try_move_cursor(to);
        changed(result.map(|()| true), "move focused item")
    }

    /// Appends all of `from` to `to` in order. The cursor stays on its item.
    /// Returns the number of items moved.
    pub fn move_all(&mut self, from: ListSide, to: ListSide) -> usize {
        if from == to {
            return 0;
        }
        let drained = std::mem::take(self.list_mut(from));
        let moved = drained.len();
        self.list_mut(to).extend(drained);
        moved
    }

    pub fn try_reorder(
        &mut self,
        side: ListSide,
        key: &T::Key,
        direction: Direction,
    ) -> Result<bool, TransferError> {
        let index = self
            .position(side, key)
            .ok_or(TransferError::NotInList { side })?;
        let list = self.list_mut(side);
        let last = list.len() - 1;

        let moved = match direction {
            Direction::Up if index > 0 => {
                list.swap(index, index - 1);
                true
            }
            Direction::Down if index < last => {
                list.swap(index, index + 1);
                true
            }
            Direction::Top if index > 0 => {
                let item = list.remove(index);
                list.insert(0, item);
                true
            }
            Direction::Bottom if index < last => {
                let item = list.remove(index);
                list.push(item);
                true
            }
            _ => false,
        };
        Ok(moved)
    }

    pub fn reorder(&mut self, side: ListSide, key: &T::Key, direction: Direction) -> bool {
        let result = self.try_reorder(side, key, direction);
        changed(result, "reorder")
    }

    /// Reorders the focused item within `side`.
    pub fn try_reorder_cursor(
        &mut self,
        side: ListSide,
        direction: Direction,
    ) -> Result<bool, TransferError> {
        let key = self.cursor.clone().ok_or(TransferError::EmptySelection)?;
        self.try_reorder(side, &key, direction)
    }

    pub fn reorder_cursor(&mut self, side: ListSide, direction: Direction) -> bool {
        let result = self.try_reorder_cursor(side, direction);
        changed(result, "reorder focused item")
    }

    pub fn try_set_cursor(&mut self, key: Option<T::Key>) -> Result<(), TransferError> {
        if let Some(key) = &key
            && !self.contains(key)
        {
            return Err(TransferError::UnknownItem);
        }
        self.cursor = key;
        Ok(())
    }

    pub fn set_cursor(&mut self, key: Option<T::Key>) -> bool {
        let previous = self.cursor.clone();
        let result = self.try_set_cursor(key);
        changed(result.map(|()| previous != self.cursor), "focus")
    }

    /// Sends the item to the other list, wherever it currently is.
    pub fn handle_double_click(&mut self, key: &T::Key) -> bool {
        match self.locate(key) {
            Some((side, _)) => self.move_item(key, side, side.opposite()),
            None => {
                debug!(?key, "double click on unknown item ignored");
                false
            }
        }
    }

    /// Up/Top need a focused item in `side` that is not first; Down/Bottom
    /// need one that is not last.
    pub fn can_reorder(&self, side: ListSide, direction: Direction) -> bool {
        let Some((cursor_side, index)) = self.cursor_position() else {
            return false;
        };
        if cursor_side != side {
            return false;
        }
        match direction {
            Direction::Up | Direction::Top => index > 0,
            Direction::Down | Direction::Bottom => index + 1 < self.list(side).len(),
        }
    }

    pub fn can_move_to(&self, to: ListSide) -> bool {
        self.cursor_position()
            .is_some_and(|(cursor_side, _)| cursor_side != to)
    }

    pub fn can_move_all(&self, from: ListSide) -> bool {
        !self.list(from).is_empty()
    }

    fn list_mut(&mut self, side: ListSide) -> &mut Vec<T> {
        match side {
            ListSide::Available => &mut self.available,
            ListSide::Selected => &mut self.selected,
        }
    }
}

fn changed(result: Result<bool, TransferError>, action: &'static str) -> bool {
    match result {
        Ok(moved) => moved,
        Err(error) => {
            debug!(%error, action, "list command ignored");
            false
        }
    }
}

fn unique_excluding<T: Keyed>(items: Vec<T>, excluded: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let key = item.key();
        let seen = excluded.iter().any(|other| other.key() == key)
            || out.iter().any(|other| other.key() == key);
        if !seen {
            out.push(item);
        }
    }
    out
}
