// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Paging of the node table.

use crate::error::TerminalsError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsPerPage {
    Count(usize),
    All,
}

impl Default for RowsPerPage {
    fn default() -> Self {
        RowsPerPage::Count(10)
    }
}

impl FromStr for RowsPerPage {
    type Err = TerminalsError;

    /// Accepts a positive count, `all`, or `-1` (the table's own "all" value)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "-1" {
            return Ok(RowsPerPage::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(RowsPerPage::Count(n)),
            _ => Err(TerminalsError::InvalidPageSize(s.to_string())),
        }
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowsPerPage::Count(n) => write!(f, "{}", n),
            RowsPerPage::All => f.write_str("all"),
        }
    }
}

/// Position of a page within the full list, 1-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub from: usize,
    pub to: usize,
    pub count: usize,
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows {}-{} of {}", self.from, self.to, self.count)
    }
}

/// Slice out the zero-based `page`. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, rows: RowsPerPage) -> (&[T], PageWindow) {
    let count = items.len();
    let (start, end) = match rows {
        RowsPerPage::All => (0, count),
        RowsPerPage::Count(n) => {
            let start = page.saturating_mul(n).min(count);
            (start, start.saturating_add(n).min(count))
        }
    };

    let from = if start < end { start + 1 } else { 0 };
    let window = PageWindow {
        from,
        to: end.max(start),
        count,
    };
    (&items[start..end], window)
}
