use std::time::Duration;

/// Distance from the bottom edge, in pixels, beyond which the view counts as
/// scrolled away.
pub const SCROLLED_AWAY_THRESHOLD_PX: u32 = 100;
/// Delay before snapping to the bottom so new content can lay out first.
pub const REPOSITION_DELAY: Duration = Duration::from_millis(100);

/// Geometry of the transcript view, in whatever unit the surface uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub offset: u32,
    pub content_height: u32,
    pub viewport_height: u32,
}

impl ScrollMetrics {
    pub fn distance_from_bottom(&self) -> u32 {
        self.content_height
            .saturating_sub(self.offset)
            .saturating_sub(self.viewport_height)
    }

    /// Offset that shows the last `viewport_height` units.
    pub fn bottom_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

/// Tracks whether the user has scrolled away from the tail and whether a
/// deferred snap to the bottom is owed.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    threshold: u32,
    scrolled_away: bool,
    pending_reposition: bool,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::with_threshold(SCROLLED_AWAY_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold,
            scrolled_away: false,
            pending_reposition: false,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_scrolled_away(&self) -> bool {
        self.scrolled_away
    }

    pub fn has_pending_reposition(&self) -> bool {
        self.pending_reposition
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        self.scrolled_away = metrics.distance_from_bottom() > self.threshold;
        self.scrolled_away
    }

    pub fn request_reposition(&mut self) {
        self.pending_reposition = true;
    }

    /// Consumes a pending reposition and returns the offset to jump to.
    pub fn apply_reposition(&mut self, metrics: ScrollMetrics) -> Option<u32> {
        if !self.pending_reposition {
            return None;
        }
        self.pending_reposition = false;
        let offset = metrics.bottom_offset();
        self.on_scroll(ScrollMetrics { offset, ..metrics });
        Some(offset)
    }

    pub fn reset(&mut self) {
        self.scrolled_away = false;
        self.pending_reposition = true;
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}
