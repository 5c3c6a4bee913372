//! Progress metrics derived from a quiz session.

use serde::{Deserialize, Serialize};

/// Snapshot of how far a session has come. Never stored; recomputed from the
/// session's queues on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Items in the pass.
    pub total: usize,
    /// Items not yet answered as known.
    pub remaining: usize,
    /// 1-based number of the question on screen, counting repeats. Zero
    /// before the first question is shown.
    pub question_number: usize,
}

impl Progress {
    pub fn new(total: usize, remaining: usize, question_number: usize) -> Self {
        debug_assert!(remaining <= total, "remaining {remaining} > total {total}");
        Self {
            total,
            remaining,
            question_number,
        }
    }

    /// Items answered as known in this pass.
    pub fn answered(&self) -> usize {
        self.total.saturating_sub(self.remaining)
    }

    /// Exact completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered() as f64 / self.total as f64
    }

    /// Completed percentage in `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }

    /// Percentage rounded for display.
    pub fn rounded_percent(&self) -> u32 {
        self.percent().round() as u32
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}
