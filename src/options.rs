use crate::VirtualizerError;

/// Per-query configuration: the viewport geometry and how much to overscan.
///
/// Cheap to copy; build a new one on every scroll/resize event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VirtualizeOptions {
    /// Viewport extent along the scroll axis. Must be greater than zero.
    pub viewport_size: u32,
    /// Scroll position of the viewport's leading edge.
    pub scroll_offset: u64,
    /// Extra entries included on each side of the visible range.
    pub overscan: usize,
}

impl VirtualizeOptions {
    pub const DEFAULT_OVERSCAN: usize = 5;

    pub fn new(viewport_size: u32) -> Self {
        Self {
            viewport_size,
            ..Self::default()
        }
    }

    pub fn with_scroll_offset(mut self, scroll_offset: u64) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), VirtualizerError> {
        if self.viewport_size == 0 {
            return Err(VirtualizerError::DegenerateViewport);
        }
        Ok(())
    }
}

impl Default for VirtualizeOptions {
    fn default() -> Self {
        Self {
            viewport_size: 0,
            scroll_offset: 0,
            overscan: Self::DEFAULT_OVERSCAN,
        }
    }
}
