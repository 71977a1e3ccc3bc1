//! Core data types for SerialVis-RS
//!
//! This module contains the small value types shared by the acquisition
//! pipeline, the configuration layer and the terminal frontend.
//!
//! # Main Types
//!
//! - [`Sample`] - A single parsed reading
//! - [`ChartMode`] - Rendering density (braille packs two samples per cell)
//! - [`DisplayGeometry`] - Terminal size in cells, re-queried on every draw
//! - [`AcquisitionStats`] - Counters reported when the acquisition loop stops

use serde::{Deserialize, Serialize};

/// A successfully parsed numeric reading
pub type Sample = f64;

/// Horizontal cells reserved around the chart plot area (borders and Y-axis labels)
pub const CHART_MARGIN: u16 = 8;

/// Rendering density for the line chart
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// High-resolution mode, two samples per terminal cell
    #[default]
    #[value(alias = "high-resolution")]
    #[serde(alias = "high-resolution")]
    Braille,
    /// Coarse mode, one sample per terminal cell
    #[value(alias = "coarse")]
    #[serde(alias = "coarse")]
    Dot,
}

impl ChartMode {
    /// Number of samples that map onto one horizontal terminal cell
    pub fn samples_per_cell(&self) -> usize {
        match self {
            ChartMode::Braille => 2,
            ChartMode::Dot => 1,
        }
    }
}

impl std::fmt::Display for ChartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartMode::Braille => write!(f, "braille"),
            ChartMode::Dot => write!(f, "dot"),
        }
    }
}

/// Size of the terminal surface in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayGeometry {
    pub width: u16,
    pub height: u16,
}

impl DisplayGeometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Plot columns left once the chart margin is removed from `width`
    ///
    /// Degenerate geometry (`width <= CHART_MARGIN`) yields 0.
    pub fn usable_width(&self) -> u16 {
        self.width.saturating_sub(CHART_MARGIN)
    }
}

/// Statistics about one acquisition run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionStats {
    /// Number of read calls issued to the transport
    pub reads: u64,
    /// Reads that returned no bytes (including read timeouts)
    pub empty_reads: u64,
    /// Total bytes received
    pub bytes_read: u64,
    /// Samples appended to the window
    pub samples: u64,
    /// Render calls made, including the initial layout-only draw
    pub draws: u64,
}
