//! Fixed-capacity command history with a live slot.
//!
//! Slots are addressed by distance from the newest one: distance 0 is the live
//! slot holding the command currently being typed, distance 1 the previously
//! submitted command, and so on. Blank slots (never filled, or submitted
//! empty) are skipped while navigating.

use crate::error::ConfigError;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHistory {
    slots: VecDeque<String>,
}

impl CommandHistory {
    pub const DEFAULT_CAPACITY: usize = 50;

    /// History holding `capacity` slots, live slot included.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::Invalid(
                "history length must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            slots: std::iter::repeat_with(String::new).take(capacity).collect(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Start a new read: shift every slot toward the oldest end, discarding the
    /// oldest, and open an empty live slot.
    pub fn begin_cycle(&mut self) {
        self.slots.pop_front();
        self.slots.push_back(String::new());
    }

    pub fn live(&self) -> &str {
        self.entry(0).unwrap_or_default()
    }

    pub fn set_live(&mut self, text: &str) {
        if let Some(live) = self.slots.back_mut() {
            live.clear();
            live.push_str(text);
        }
    }

    /// Slot content at `distance` from the newest slot.
    pub fn entry(&self, distance: usize) -> Option<&str> {
        let index = self.slots.len().checked_sub(distance + 1)?;
        self.slots.get(index).map(String::as_str)
    }

    /// First non-blank slot older than `offset`.
    pub fn older(&self, offset: usize) -> Option<(usize, &str)> {
        (offset + 1..self.slots.len()).find_map(|distance| self.non_blank(distance))
    }

    /// First non-blank slot newer than `offset`, stopping before the live slot.
    pub fn newer(&self, offset: usize) -> Option<(usize, &str)> {
        (1..offset).rev().find_map(|distance| self.non_blank(distance))
    }

    fn non_blank(&self, distance: usize) -> Option<(usize, &str)> {
        self.entry(distance)
            .filter(|text| !text.trim().is_empty())
            .map(|text| (distance, text))
    }

    /// Non-blank slots, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .rev()
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self {
            slots: std::iter::repeat_with(String::new)
                .take(Self::DEFAULT_CAPACITY)
                .collect(),
        }
    }
}
