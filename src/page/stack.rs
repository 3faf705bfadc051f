//! Ordered page bookkeeping. Index 0 is the bottom, the last index the top.

use super::Page;
use crate::error::{NavigatorError, Result};

/// Ordered collection of pages with strict bounds checking.
#[derive(Debug, Default)]
pub struct PageStack {
    pages: Vec<Page>,
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Snapshot of the pages, bottom first.
    pub fn to_vec(&self) -> Vec<Page> {
        self.pages.clone()
    }

    pub fn top(&self) -> Result<&Page> {
        self.pages.last().ok_or(NavigatorError::EmptyStack)
    }

    /// Map a possibly negative index into `0..len`.
    ///
    /// Negative indices count from the end and wrap modulo the length;
    /// non-negative indices are returned unchanged (and may be out of range).
    /// An empty stack normalizes every negative index to 0.
    pub fn normalize_index(&self, index: isize) -> usize {
        if index >= 0 {
            return index as usize;
        }
        let len = self.pages.len() as isize;
        if len == 0 {
            return 0;
        }
        (len + index).rem_euclid(len) as usize
    }

    pub fn at(&self, index: isize) -> Result<&Page> {
        let normalized = self.normalize_index(index);
        self.pages.get(normalized).ok_or(NavigatorError::Index {
            index,
            len: self.pages.len(),
        })
    }

    /// Index of the most recent page with the given name.
    pub fn last_index_of(&self, name: &str) -> Option<usize> {
        self.pages.iter().rposition(|page| page.name() == Some(name))
    }

    pub fn position(&self, page: &Page) -> Option<usize> {
        self.pages.iter().position(|p| p == page)
    }

    pub fn append(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Insert before the page at `index`; `index == len` appends.
    pub fn insert_at(&mut self, index: usize, page: Page) -> Result<()> {
        if index > self.pages.len() {
            return Err(NavigatorError::Index {
                index: index as isize,
                len: self.pages.len(),
            });
        }
        self.pages.insert(index, page);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Page> {
        if index >= self.pages.len() {
            return Err(NavigatorError::Index {
                index: index as isize,
                len: self.pages.len(),
            });
        }
        Ok(self.pages.remove(index))
    }

    /// Swap the page at `index` for `page`, returning the old one.
    pub fn replace_at(&mut self, index: usize, page: Page) -> Result<Page> {
        let len = self.pages.len();
        let slot = self.pages.get_mut(index).ok_or(NavigatorError::Index {
            index: index as isize,
            len,
        })?;
        Ok(std::mem::replace(slot, page))
    }

    /// Move the page at `index` to the top.
    pub fn move_to_top(&mut self, index: usize) -> Result<()> {
        let page = self.remove_at(index)?;
        self.pages.push(page);
        Ok(())
    }

    /// Remove every page below the top, returning them bottom first.
    pub fn drain_below_top(&mut self) -> Vec<Page> {
        let keep_from = self.pages.len().saturating_sub(1);
        self.pages.drain(..keep_from).collect()
    }

    /// Remove all pages, returning them bottom first.
    pub fn clear(&mut self) -> Vec<Page> {
        std::mem::take(&mut self.pages)
    }

    /// Recompute back-button flags: visible iff the page is not the bottom.
    pub fn sync_back_buttons(&self) {
        for (index, page) in self.pages.iter().enumerate() {
            page.set_back_button_visible(index > 0);
        }
    }
}
