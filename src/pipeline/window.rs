//! Rolling sample window
//!
//! The window holds the most recent readings, oldest first. Its capacity is
//! not a fixed number: it follows the width of the terminal, so it is passed
//! in on every append and recomputed by the caller from fresh geometry.

use crate::types::{ChartMode, DisplayGeometry, Sample};
use std::collections::VecDeque;

/// Number of samples the window may hold for the given geometry and mode
///
/// Proportional to the usable chart columns, doubled in braille mode.
/// Degenerate geometry (width at or below the chart margin) gives 0.
pub fn capacity_for(geometry: DisplayGeometry, mode: ChartMode) -> usize {
    geometry.usable_width() as usize * mode.samples_per_cell()
}

/// Capacity-bounded FIFO of samples
#[derive(Debug, Clone, Default)]
pub struct RollingWindow {
    samples: VecDeque<Sample>,
}

impl RollingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to the back, then evict from the front until
    /// `len() <= capacity`
    pub fn append(&mut self, sample: Sample, capacity: usize) {
        self.samples.push_back(sample);
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    /// The most recent `min(len, displayable)` samples, oldest first
    pub fn visible_slice(&self, displayable: usize) -> Vec<Sample> {
        let skip = self.samples.len().saturating_sub(displayable);
        self.samples.iter().skip(skip).copied().collect()
    }

    /// The `n` most recent samples, newest first
    pub fn recent_list(&self, n: usize) -> Vec<Sample> {
        self.samples.iter().rev().take(n).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Minimum and maximum of a series, `None` when it is empty
pub fn bounds(series: &[Sample]) -> Option<(Sample, Sample)> {
    series.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
