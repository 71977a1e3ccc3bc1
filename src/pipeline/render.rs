//! Render trigger and the display contract
//!
//! The trigger turns the current window plus fresh display geometry into a
//! [`RenderFrame`] and hands it to a [`ChartDisplay`] exactly once per call.
//! It keeps no sample state of its own: every frame is rebuilt from the
//! window, so calling it twice in a row draws the same picture.

use crate::error::Result;
use crate::pipeline::window::RollingWindow;
use crate::types::{ChartMode, DisplayGeometry, Sample};

/// Columns of the 12-column grid given to the chart; the list gets the rest
pub const CHART_GRID_COLUMNS: u32 = 10;

/// Total columns of the layout grid
pub const GRID_COLUMNS: u32 = 12;

/// Rows taken by the list panel border
pub const LIST_BORDER_ROWS: u16 = 2;

/// Horizontal split of the terminal into chart and list panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelLayout {
    /// Width of the chart panel in cells
    pub chart_width: u16,
    /// Width of the list panel in cells
    pub list_width: u16,
    /// Height shared by both panels
    pub height: u16,
}

impl PanelLayout {
    /// Split the terminal 10:2 between chart and list
    pub fn split(geometry: DisplayGeometry) -> Self {
        let chart_width =
            (geometry.width as u32 * CHART_GRID_COLUMNS / GRID_COLUMNS) as u16;
        Self {
            chart_width,
            list_width: geometry.width - chart_width,
            height: geometry.height,
        }
    }

    /// Samples the chart can actually show
    ///
    /// Smaller than the window capacity, which is derived from the full
    /// terminal width.
    pub fn displayable_samples(&self, mode: ChartMode) -> usize {
        DisplayGeometry::new(self.chart_width, self.height).usable_width() as usize
            * mode.samples_per_cell()
    }

    /// Entries the list panel can show inside its border
    pub fn list_rows(&self) -> usize {
        self.height.saturating_sub(LIST_BORDER_ROWS) as usize
    }
}

/// Everything a display needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Panel sizes the frame was computed for
    pub layout: PanelLayout,
    /// Chart series, oldest first
    pub chart: Vec<Sample>,
    /// Side list, newest first
    pub recent: Vec<Sample>,
    /// Chart border label
    pub label: String,
    /// Rendering density
    pub mode: ChartMode,
}

impl RenderFrame {
    /// True when there is nothing to plot and only the panels are drawn
    pub fn is_layout_only(&self) -> bool {
        self.chart.is_empty() && self.recent.is_empty()
    }
}

/// Display collaborator used by the acquisition loop
///
/// Implemented by the terminal frontend and by test doubles.
#[cfg_attr(test, mockall::automock)]
pub trait ChartDisplay {
    /// Current size of the drawing surface; queried on every draw
    fn geometry(&mut self) -> Result<DisplayGeometry>;

    /// Draw one frame
    fn render(&mut self, frame: &RenderFrame) -> Result<()>;
}

/// Builds frames from the window and pushes them to the display
#[derive(Debug, Clone)]
pub struct RenderTrigger {
    mode: ChartMode,
    label: String,
}

impl RenderTrigger {
    pub fn new(mode: ChartMode, label: impl Into<String>) -> Self {
        Self {
            mode,
            label: label.into(),
        }
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    /// Compute the frame for `window` at `geometry`
    pub fn frame(&self, window: &RollingWindow, geometry: DisplayGeometry) -> RenderFrame {
        let layout = PanelLayout::split(geometry);
        RenderFrame {
            layout,
            chart: window.visible_slice(layout.displayable_samples(self.mode)),
            recent: window.recent_list(layout.list_rows()),
            label: self.label.clone(),
            mode: self.mode,
        }
    }

    /// Query geometry, build the frame and render it once
    pub fn draw<D: ChartDisplay + ?Sized>(
        &self,
        display: &mut D,
        window: &RollingWindow,
    ) -> Result<()> {
        let geometry = display.geometry()?;
        let frame = self.frame(window, geometry);
        tracing::trace!(
            width = geometry.width,
            height = geometry.height,
            chart = frame.chart.len(),
            recent = frame.recent.len(),
            "draw"
        );
        display.render(&frame)
    }
}
