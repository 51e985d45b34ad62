//! Near-bottom detection for scroll-driven loading.
//!
//! The host measures its viewport in whatever unit it renders in (pixels,
//! terminal rows) and reports it as [`ScrollMetrics`]. The list is "near the
//! bottom" when the visible window reaches within `threshold` units of the
//! end of the content.

/// Default distance from the end of the content that counts as near bottom.
pub const DEFAULT_NEAR_BOTTOM_THRESHOLD: u32 = 100;

/// Snapshot of a scrollable viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top of the content.
    pub scroll_top: u32,
    /// Visible height of the viewport.
    pub viewport_height: u32,
    /// Total height of the content.
    pub content_height: u32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: u32, viewport_height: u32, content_height: u32) -> Self {
        Self {
            scroll_top,
            viewport_height,
            content_height,
        }
    }

    /// `scroll_top + viewport_height >= content_height - threshold`.
    pub fn is_near_bottom(&self, threshold: u32) -> bool {
        let visible_end = u64::from(self.scroll_top) + u64::from(self.viewport_height);
        let trigger_at = u64::from(self.content_height.saturating_sub(threshold));
        visible_end >= trigger_at
    }

    /// Remaining distance below the visible window.
    pub fn remaining(&self) -> u32 {
        self.content_height
            .saturating_sub(self.scroll_top.saturating_add(self.viewport_height))
    }
}
