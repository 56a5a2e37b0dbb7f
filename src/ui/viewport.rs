//! Per-pane scroll state.
//!
//! Each pane owns a [`Viewport`] tracking its size, scroll offset and
//! content length. The scroll synchronizer reads and writes positions only
//! through the ratio methods.

use std::ops::Range;

/// The visible window over a pane's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a viewport at the top of the content.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    /// Current scroll offset in lines.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// The range of visible line indices, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset..end
    }

    /// Largest valid scroll offset.
    pub const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll by a signed number of lines, clamped at both ends.
    pub fn scroll_by(&mut self, delta: isize) {
        if delta < 0 {
            self.offset = self.offset.saturating_sub(delta.unsigned_abs());
        } else {
            self.offset = (self.offset + delta.unsigned_abs()).min(self.max_offset());
        }
    }

    /// Scroll down one page.
    #[allow(clippy::cast_possible_wrap)]
    pub fn page_down(&mut self) {
        self.scroll_by(self.height as isize);
    }

    /// Scroll up one page.
    #[allow(clippy::cast_possible_wrap)]
    pub fn page_up(&mut self) {
        self.scroll_by(-(self.height as isize));
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Vertical position as a ratio in `[0, 1]`.
    ///
    /// Defined as 0 whenever the content fits the viewport (max scroll 0),
    /// so short documents never divide by zero.
    pub fn scroll_ratio(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.offset as f64 / max as f64
        }
    }

    /// Move to the offset closest to the given ratio of max scroll.
    pub fn scroll_to_ratio(&mut self, ratio: f64) {
        let ratio = ratio.clamp(0.0, 1.0);
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            self.offset = (self.max_offset() as f64 * ratio).round() as usize;
        }
    }

    /// Scroll percentage (0-100) for the status bar.
    pub fn scroll_percent(&self) -> u8 {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            (self.scroll_ratio() * 100.0).round() as u8
        }
    }

    /// Scroll the minimum amount needed to bring `line` into view.
    ///
    /// Returns `true` when the offset moved (the caller treats that as a
    /// scroll for sync purposes).
    pub fn ensure_visible(&mut self, line: usize) -> bool {
        let height = self.height.max(1) as usize;
        let before = self.offset;
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
        self.offset != before
    }

    /// Resize the viewport, clamping the offset to the new bounds.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length (after an edit or reflow).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }
}
