/// Default entry id type.
pub type EntryKey = u64;

/// One entry of the virtualized sequence.
///
/// An entry is sized either by `fixed_size` (never stretched) or by `min_size` (a floor that
/// may be stretched up to `max_size` when the whole sequence fits in the viewport). An entry
/// with neither is rejected when the [`crate::Virtualizer`] is built.
///
/// `level` marks the entry as a sticky group header. A larger level is an *outer* group, a
/// smaller one is nested inside it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<K = EntryKey> {
    pub id: K,
    pub level: Option<u32>,
    pub min_size: Option<u32>,
    pub fixed_size: Option<u32>,
    pub max_size: Option<u32>,
    pub weight: Option<f32>,
}

impl<K> Entry<K> {
    /// An entry with an immutable size.
    pub fn fixed(id: K, size: u32) -> Self {
        Self {
            id,
            level: None,
            min_size: None,
            fixed_size: Some(size),
            max_size: None,
            weight: None,
        }
    }

    /// A stretchable entry with a minimum size.
    pub fn min(id: K, min_size: u32) -> Self {
        Self {
            id,
            level: None,
            min_size: Some(min_size),
            fixed_size: None,
            max_size: None,
            weight: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The size used for offsets and windowed output: `fixed_size`, else `min_size`.
    pub fn committed_size(&self) -> Option<u32> {
        self.fixed_size.or(self.min_size)
    }

    pub fn is_header(&self) -> bool {
        self.level.is_some()
    }

    /// Whether the entry takes part in space distribution.
    pub fn is_elastic(&self) -> bool {
        if self.fixed_size.is_some() {
            return false;
        }
        match (self.weight, self.max_size) {
            (Some(_), _) | (_, None) => true,
            (None, Some(max)) => max > self.min_size.unwrap_or(0),
        }
    }

    /// An elastic entry without `max_size`; these absorb any rounding remainder.
    pub fn is_unbounded(&self) -> bool {
        self.is_elastic() && self.max_size.is_none()
    }
}

/// Which algorithm a query runs for a given viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// All entries fit; leftover space is distributed and every entry is returned.
    Distribute,
    /// Content exceeds the viewport; only a window of entries is returned.
    Window,
}

/// A contiguous slice of entry indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
}

/// Clamp bounds and stacking offset of a pinned header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyPlacement {
    /// Offset below the header's pinned ancestors (sum of their sizes).
    pub relative_offset: u64,
    /// The header's natural offset; it never pins earlier than this.
    pub min_offset: u64,
    /// Where the next sibling group pushes the header out (or the end of content).
    pub max_offset: u64,
}

impl StickyPlacement {
    /// Position of the pinned header for a given scroll offset.
    pub fn pinned_offset(&self, scroll_offset: u64) -> u64 {
        scroll_offset
            .saturating_add(self.relative_offset)
            .min(self.max_offset)
            .max(self.min_offset)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem<K = EntryKey> {
    pub id: K,
    /// Position of the entry in the input sequence.
    pub index: usize,
    pub size: u32,
    /// Start offset in the scroll axis. Only set for windowed results.
    pub offset: Option<u64>,
    pub level: Option<u32>,
    /// Only set for headers in windowed results.
    pub sticky: Option<StickyPlacement>,
}

impl<K> VirtualItem<K> {
    pub fn end(&self) -> Option<u64> {
        self.offset.map(|start| start.saturating_add(self.size as u64))
    }

    /// Where to draw the item for `scroll_offset`: the pinned position for sticky headers,
    /// the natural offset otherwise.
    pub fn render_offset(&self, scroll_offset: u64) -> Option<u64> {
        match self.sticky {
            Some(sticky) => Some(sticky.pinned_offset(scroll_offset)),
            None => self.offset,
        }
    }
}
