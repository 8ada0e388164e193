// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pagination cursor shared by every list store.
//!
//! Every list endpoint returns `{list, total, pageNum, pageSize, pages,
//! hasNextPage}`; [`PageResponse`] is that wire shape and [`Page`] is the
//! cursor a store keeps between fetches. After a local mutation removes
//! items, [`Page::recompute`] restores the `pages == ceil(total/pageSize)`
//! invariant.

use serde::{Deserialize, Serialize};

/// Position in a server-side paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub pages: u32,
    pub has_next: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            total: 0,
            pages: 0,
            has_next: false,
        }
    }
}

impl Page {
    /// Recomputes `pages` and `has_next` from `total` and `page_size`.
    ///
    /// `pages = ceil(total / page_size)`; `has_next = page < pages`.
    pub fn recompute(&mut self) {
        self.pages = if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.page_size)) as u32
        };
        self.has_next = self.page < self.pages;
    }

    /// Decrements `total` by `removed` (saturating) and recomputes.
    pub fn remove(&mut self, removed: u64) {
        self.total = self.total.saturating_sub(removed);
        self.recompute();
    }
}

/// Wire shape of a paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
    pub pages: u32,
    pub has_next_page: bool,
}

impl<T> PageResponse<T> {
    /// Cursor for this response, taken verbatim from the server fields.
    pub fn page(&self) -> Page {
        Page {
            page: self.page_num,
            page_size: self.page_size,
            total: self.total,
            pages: self.pages,
            has_next: self.has_next_page,
        }
    }
}
