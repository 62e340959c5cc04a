//! The open list shared by every search strategy.
//!
//! Entries are kept sorted with the best entry at the back of a deque, so
//! popping is O(1) and pushing is a binary search plus an O(n) insert. Among
//! entries the comparator considers equal, the one pushed last is popped
//! first. A list built with [`OpenList::fifo`] ignores ranking altogether and
//! behaves as a plain queue.

use crate::search::{Result, SearchError};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{self, Debug};

/// Orders two entries; [`Ordering::Less`] means the first is better.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

pub struct OpenList<T> {
    /// Worst entry at the front, best at the back.
    entries: VecDeque<T>,
    compare: Option<Comparator<T>>,
}

impl<T> OpenList<T> {
    pub fn new(compare: Comparator<T>) -> Self {
        Self {
            entries: VecDeque::new(),
            compare: Some(compare),
        }
    }

    /// First in, first out.
    pub fn fifo() -> Self {
        Self {
            entries: VecDeque::new(),
            compare: None,
        }
    }

    pub fn is_fifo(&self) -> bool {
        self.compare.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, entry: T) {
        match self.compare {
            None => self.entries.push_front(entry),
            Some(compare) => {
                let position = self
                    .entries
                    .partition_point(|existing| compare(existing, &entry) != Ordering::Less);
                self.entries.insert(position, entry);
            }
        }
    }

    pub fn peek_best(&self) -> Result<&T> {
        self.entries.back().ok_or(SearchError::EmptyCollection)
    }

    pub fn pop_best(&mut self) -> Result<T> {
        self.entries.pop_back().ok_or(SearchError::EmptyCollection)
    }

    /// Entries from best to worst, without touching the list.
    pub fn enumerate(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().rev()
    }
}

impl<T: PartialEq> OpenList<T> {
    /// Remove every entry equal to `entry`; a no-op if there is none.
    pub fn remove(&mut self, entry: &T) {
        self.entries.retain(|existing| existing != entry);
    }

    pub fn contains(&self, entry: &T) -> bool {
        self.entries.contains(entry)
    }
}

impl<T: Debug> Debug for OpenList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenList")
            .field("fifo", &self.is_fifo())
            .field("best_first", &self.enumerate().collect::<Vec<_>>())
            .finish()
    }
}
