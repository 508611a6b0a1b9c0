// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label typeahead: resolve focus from recently typed characters.

use alloc::string::String;

use crate::{ItemKey, ListItem};

/// Accumulates typed characters and matches them against item labels.
///
/// Characters typed within `delay_ms` of each other extend the buffer;
/// a longer pause starts a fresh buffer. Matching is case-insensitive
/// prefix matching over the presented sequence:
///
/// - A fresh buffer searches *after* the active item first, so repeatedly
///   typing the same first letter cycles through matches.
/// - A continued buffer searches *at* the active item first, so refining a
///   match ("c", then "ch") keeps focus in place while it still matches.
/// - A character that yields no match restarts the buffer from that
///   character alone.
///
/// Timestamps are host-supplied milliseconds, as everywhere in Overstory;
/// only deltas are meaningful.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typeahead {
    /// Inactivity window after which the buffer resets, in milliseconds.
    pub delay_ms: u64,
    buffer: String,
    last_time_ms: u64,
}

impl Typeahead {
    /// Create an empty typeahead with the given inactivity window.
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            buffer: String::new(),
            last_time_ms: 0,
        }
    }

    /// The accumulated (lowercased) buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Discard the accumulated buffer.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed one typed character and look up the item focus should move to.
    ///
    /// Returns the key of the matched item (possibly the active item itself
    /// when a continued buffer still matches it), or `None` when nothing
    /// matches even after restarting from this character.
    pub fn search<K: ItemKey>(
        &mut self,
        items: &[ListItem<K>],
        active: Option<K>,
        skip_disabled: bool,
        ch: char,
        now_ms: u64,
    ) -> Option<K> {
        if now_ms.saturating_sub(self.last_time_ms) > self.delay_ms {
            self.buffer.clear();
        }
        self.last_time_ms = now_ms;

        let continued = !self.buffer.is_empty();
        self.buffer.extend(ch.to_lowercase());
        if let Some(found) = find(&self.buffer, items, active, skip_disabled, continued) {
            return Some(found);
        }

        // No match: restart from this character alone.
        self.buffer.clear();
        self.buffer.extend(ch.to_lowercase());
        let found = find(&self.buffer, items, active, skip_disabled, false);
        if found.is_none() {
            self.buffer.clear();
        }
        found
    }
}

/// Scan the snapshot for the next label with `buffer` as prefix.
///
/// `include_active` keeps the active item as the first candidate (continued
/// buffers); otherwise the scan starts just past it. The scan always circles
/// the whole sequence, independent of the owning list's wrap policy.
fn find<K: ItemKey>(
    buffer: &str,
    items: &[ListItem<K>],
    active: Option<K>,
    skip_disabled: bool,
    include_active: bool,
) -> Option<K> {
    if items.is_empty() {
        return None;
    }
    let active_pos = active.and_then(|a| items.iter().position(|it| it.id == a));
    let start = match active_pos {
        Some(p) if include_active => p,
        Some(p) => p + 1,
        None => 0,
    };

    for step in 0..items.len() {
        let item = &items[(start + step) % items.len()];
        if skip_disabled && item.disabled {
            continue;
        }
        if matches_prefix(&item.label, buffer) {
            return Some(item.id);
        }
    }
    None
}

fn matches_prefix(label: &str, buffer: &str) -> bool {
    let mut lowered = label.chars().flat_map(char::to_lowercase);
    buffer.chars().all(|b| lowered.next() == Some(b))
}
