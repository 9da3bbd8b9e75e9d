use spritekit_common::Rect;

use crate::backend::InvalidationSink;

/// Invalidation sink that records every request in arrival order.
///
/// Mostly useful in tests and for tracing what a mutation invalidated.
#[derive(Debug, Clone, Default)]
pub struct DamageLog {
    requests: Vec<Rect>,
}

impl DamageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[Rect] {
        &self.requests
    }

    /// Drain and return the recorded requests.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.requests)
    }
}

impl InvalidationSink for DamageLog {
    fn invalidate(&mut self, rect: Rect) {
        self.requests.push(rect);
    }
}

/// Invalidation sink that coalesces requests into one bounding rectangle,
/// the way a host merges damage before scheduling a repaint.
///
/// The result is a cover, not a minimal one.
#[derive(Debug, Clone, Default)]
pub struct DamageAccumulator {
    pending: Option<Rect>,
    count: usize,
}

impl DamageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests folded in since the last [`DamageAccumulator::take`].
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn pending(&self) -> Option<Rect> {
        self.pending
    }

    /// Return the merged damage and reset.
    pub fn take(&mut self) -> Option<Rect> {
        self.count = 0;
        self.pending.take()
    }
}

impl InvalidationSink for DamageAccumulator {
    fn invalidate(&mut self, rect: Rect) {
        self.count += 1;
        if rect.is_empty() {
            return;
        }
        self.pending = Some(match self.pending {
            Some(acc) => acc.union(&rect),
            None => rect,
        });
    }
}
