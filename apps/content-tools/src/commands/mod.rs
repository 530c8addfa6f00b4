//! Maintenance commands. Each one walks every affected item, logs its
//! outcome and keeps going past per-item failures.

pub mod dates;
pub mod images;
pub mod posts;
pub mod slugs;

use std::fmt;

/// Per-item outcome counts of a command run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} skipped, {} failed",
            self.created, self.updated, self.skipped, self.failed
        )
    }
}
