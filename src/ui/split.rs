//! The resizable split divider between the editor and preview panes.
//!
//! A small idle/dragging state machine. Dragging maps the pointer column to
//! a left-pane width ratio; releasing the button anywhere ends the drag, so
//! a fast drag that leaves the divider column still terminates. Pressing
//! the divider twice within the multi-click window resets the ratio.

use super::{DIVIDER_COLS, MIN_PANE_COLS};

/// Ratio the divider returns to on double-click.
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// Maximum time between divider presses to count as a double-click.
const MULTI_CLICK_MS: u64 = 500;

/// Soft bounds applied whenever the ratio is turned into pane widths.
const SOFT_MIN_RATIO: f64 = 0.1;
const SOFT_MAX_RATIO: f64 = 0.9;

/// Left/right pane widths derived from the current ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneWidths {
    pub left: u16,
    pub right: u16,
}

/// Divider state for the two-pane layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPane {
    ratio: f64,
    dragging: bool,
    last_press_ms: Option<u64>,
}

impl Default for SplitPane {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitPane {
    pub const fn new() -> Self {
        Self {
            ratio: DEFAULT_SPLIT_RATIO,
            dragging: false,
            last_press_ms: None,
        }
    }

    /// The left pane's width fraction.
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mouse-down on the divider. Starts a drag; a second press within the
    /// multi-click window also resets the ratio to the default.
    pub fn press_divider(&mut self, now_ms: u64) {
        let double = self
            .last_press_ms
            .is_some_and(|prev| now_ms.saturating_sub(prev) <= MULTI_CLICK_MS);
        if double {
            self.ratio = DEFAULT_SPLIT_RATIO;
        }
        self.last_press_ms = Some(now_ms);
        self.dragging = true;
    }

    /// Mouse moved to `column` while dragging.
    ///
    /// `container_left` and `container_width` describe the split area in
    /// terminal cells. Out-of-bounds columns clamp to the hard drag bounds.
    pub fn drag_to(&mut self, column: u16, container_left: u16, container_width: u16) {
        if !self.dragging {
            return;
        }
        let total = f64::from(container_width.saturating_sub(DIVIDER_COLS));
        if total <= 0.0 {
            return;
        }
        let x = f64::from(column.saturating_sub(container_left));
        self.ratio = clamp_hard(x / total, total);
    }

    /// Mouse-up, anywhere in the terminal.
    pub const fn release(&mut self) {
        self.dragging = false;
    }

    /// Container width changed while idle: re-derive the ratio from the
    /// left pane's current cell width so the visual split is preserved.
    /// Resizes during a drag are ignored; the drag stays in control.
    pub fn container_resized(&mut self, left_cols: u16, container_width: u16) {
        if self.dragging {
            return;
        }
        let total = f64::from(container_width.saturating_sub(DIVIDER_COLS));
        if total <= 0.0 {
            return;
        }
        self.ratio = clamp_hard(f64::from(left_cols) / total, total);
    }

    /// Pane widths for the given container width, with the soft bounds
    /// applied. `left + right + DIVIDER_COLS == container_width`.
    pub fn pane_widths(&self, container_width: u16) -> PaneWidths {
        let total = container_width.saturating_sub(DIVIDER_COLS);
        let applied = self.ratio.clamp(SOFT_MIN_RATIO, SOFT_MAX_RATIO);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let left = ((f64::from(total) * applied).round() as u16).min(total);
        PaneWidths {
            left,
            right: total - left,
        }
    }
}

/// Hard drag bounds: neither pane narrower than `MIN_PANE_COLS`.
///
/// When the container is too small for two minimum panes the bounds cross;
/// fall back to an even split.
fn clamp_hard(ratio: f64, total: f64) -> f64 {
    let min = f64::from(MIN_PANE_COLS) / total;
    let max = 1.0 - min;
    if min > max {
        return DEFAULT_SPLIT_RATIO;
    }
    ratio.clamp(min, max)
}
