//! Offset pagination shared by every list query.

use serde::{Deserialize, Serialize};

/// Offset/limit window over an id-ordered listing.
///
/// `limit` is always clamped into `1..=Page::MAX_LIMIT`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    skip: u32,
    limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        let limit = limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        Self {
            skip: skip.unwrap_or(0),
            limit,
        }
    }

    pub fn skip(&self) -> u32 {
        self.skip
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply this window to an already-ordered iterator.
    pub fn apply<I: Iterator>(&self, iter: I) -> impl Iterator<Item = I::Item> {
        iter.skip(self.skip as usize).take(self.limit as usize)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
