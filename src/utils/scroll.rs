//! Scroll bookkeeping for the transcript pane.

/// Vertical scroll position of the transcript.
///
/// The renderer feeds the wrapped line count and viewport height into
/// [`update_bounds`](Self::update_bounds) every frame; the scroll ticker calls
/// [`scroll_to_bottom`](Self::scroll_to_bottom). Offsets count wrapped lines
/// and are not bounded by the terminal's `u16` coordinates; the renderer
/// slices the visible page out of the transcript itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    max_offset: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset.min(self.max_offset)
    }

    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset() == self.max_offset
    }

    /// Record the latest layout. Returns the new maximum offset.
    pub fn update_bounds(&mut self, total_lines: usize, viewport_height: u16) -> usize {
        self.max_offset = total_lines.saturating_sub(usize::from(viewport_height));
        self.offset = self.offset.min(self.max_offset);
        self.max_offset
    }

    /// Pin to the last page. Returns whether the offset moved.
    pub fn scroll_to_bottom(&mut self) -> bool {
        let moved = self.offset != self.max_offset;
        self.offset = self.max_offset;
        moved
    }
}
