//! Search limits and cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Resource settings for a forced-mate search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Split the root moves across the rayon thread pool
    pub parallel: bool,
    /// Wall-clock budget in milliseconds
    pub deadline_ms: Option<u64>,
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn deadline_ms(mut self, ms: u64) -> Self {
        self.deadline_ms = Some(ms);
        self
    }

    pub(crate) fn deadline_from(&self, start: Instant) -> Option<Instant> {
        self.deadline_ms
            .map(|ms| start + Duration::from_millis(ms))
    }
}

/// Shared flag that stops a running search.
///
/// Clones share the same flag, so one handle can be given to the search and
/// another kept by whoever may cancel it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
