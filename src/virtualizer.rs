use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::distribute::distribute_into;
use crate::key::{EntryId, IdMap};
use crate::window::{window_into, window_range};
use crate::{
    Entry, EntryKey, Mode, OffsetIndex, StickyTree, VirtualItem, VirtualRange, VirtualizeOptions,
    VirtualizerError,
};

/// A headless virtualization engine over a fixed entry sequence.
///
/// Construction validates the entries and builds the derived indexes (offset prefix sums and
/// the sticky group tree) once, in `O(n)`. Queries are stateless and take `&self`: each
/// [`Virtualizer::virtualize`] call costs `O(log n)` lookups plus the size of the output.
///
/// When the entry sequence changes, build a new `Virtualizer`; there is no incremental update.
///
/// With the `std` feature a `Virtualizer` is `Sync` and can be shared through an `Arc`;
/// without it the tree's caches are `OnceCell`s and it is `Send` only.
#[derive(Clone, Debug)]
pub struct Virtualizer<K = EntryKey> {
    entries: Arc<[Entry<K>]>,
    offsets: OffsetIndex,
    sticky: StickyTree<K>,
    index_by_id: IdMap<K, usize>,
}

impl<K: EntryId> Virtualizer<K> {
    /// Validates `entries` and builds the offset index and sticky group tree.
    ///
    /// Fails on the first entry without a size, with a duplicate id, with a non-positive
    /// weight, or with `max_size < min_size` on a stretchable entry.
    pub fn new(entries: impl Into<Arc<[Entry<K>]>>) -> Result<Self, VirtualizerError> {
        let entries: Arc<[Entry<K>]> = entries.into();
        let slice: &[Entry<K>] = &entries;
        let index_by_id = match validate(slice) {
            Ok(map) => map,
            Err(err) => {
                vwarn!(%err, "Virtualizer::new: rejected entries");
                return Err(err);
            }
        };
        let offsets = OffsetIndex::build(slice)?;
        let sticky = StickyTree::build(slice)?;
        vdebug!(
            count = entries.len(),
            total = offsets.total(),
            headers = sticky.len(),
            roots = sticky.roots().len(),
            "Virtualizer::new"
        );
        Ok(Self {
            entries,
            offsets,
            sticky,
            index_by_id,
        })
    }

    /// Position of the entry with `id` in the sequence.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Computes the items to render for `options`.
    ///
    /// - If the committed sizes fit in the viewport, every entry is returned in order, stretched
    ///   to fill it (no offsets).
    /// - Otherwise the overscanned window is returned with offsets, preceded by any sticky
    ///   headers (root first) whose rows scrolled above it. An offset past all content yields
    ///   an empty result.
    pub fn virtualize(
        &self,
        options: &VirtualizeOptions,
    ) -> Result<Vec<VirtualItem<K>>, VirtualizerError> {
        let mut out = Vec::new();
        self.virtualize_into(options, &mut out)?;
        Ok(out)
    }

    /// Like [`Virtualizer::virtualize`], reusing `out`'s allocation. `out` is cleared first.
    pub fn virtualize_into(
        &self,
        options: &VirtualizeOptions,
        out: &mut Vec<VirtualItem<K>>,
    ) -> Result<(), VirtualizerError> {
        out.clear();
        if let Err(err) = options.validate() {
            vwarn!(%err, "virtualize: rejected options");
            return Err(err);
        }

        match self.mode(options.viewport_size) {
            Mode::Distribute => {
                vtrace!(
                    viewport_size = options.viewport_size,
                    total = self.offsets.total(),
                    "virtualize: distribute"
                );
                distribute_into(self.entries(), &self.offsets, options.viewport_size, out);
            }
            Mode::Window => {
                let Some(range) = window_range(&self.offsets, options) else {
                    vtrace!(
                        scroll_offset = options.scroll_offset,
                        total = self.offsets.total(),
                        "virtualize: offset past content"
                    );
                    return Ok(());
                };
                vtrace!(
                    scroll_offset = options.scroll_offset,
                    viewport_size = options.viewport_size,
                    start = range.start_index,
                    end = range.end_index,
                    "virtualize: window"
                );
                window_into(self.entries(), &self.offsets, &self.sticky, range, out);
            }
        }
        Ok(())
    }

    /// The contiguous slice of entries a query for `options` covers, without pinned headers.
    ///
    /// In [`Mode::Distribute`] this is every entry; past the end of content it is empty.
    pub fn window_range(
        &self,
        options: &VirtualizeOptions,
    ) -> Result<VirtualRange, VirtualizerError> {
        options.validate()?;
        let count = self.entries.len();
        let range = match self.mode(options.viewport_size) {
            Mode::Distribute => VirtualRange {
                start_index: 0,
                end_index: count,
            },
            Mode::Window => window_range(&self.offsets, options).unwrap_or(VirtualRange {
                start_index: count,
                end_index: count,
            }),
        };
        Ok(range)
    }
}

impl<K> Virtualizer<K> {
    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn offset_index(&self) -> &OffsetIndex {
        &self.offsets
    }

    pub fn sticky_tree(&self) -> &StickyTree<K> {
        &self.sticky
    }

    /// Sum of committed sizes (`fixed_size`, else `min_size`).
    pub fn total_size(&self) -> u64 {
        self.offsets.total()
    }

    /// Whether a viewport of `viewport_size` shows all entries or a window of them.
    pub fn mode(&self, viewport_size: u32) -> Mode {
        if self.offsets.total() <= viewport_size as u64 {
            Mode::Distribute
        } else {
            Mode::Window
        }
    }

    /// The entry covering `offset` (the earlier one on a boundary).
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.offsets.locate(offset)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        self.offsets.start(index)
    }

    pub fn item_size(&self, index: usize) -> Option<u32> {
        self.offsets.size(index)
    }
}

/// One-shot query: builds a [`Virtualizer`] for `entries` and runs `options` against it.
///
/// Prefer keeping a [`Virtualizer`] around when querying the same entries repeatedly.
pub fn virtualize<K: EntryId>(
    options: &VirtualizeOptions,
    entries: impl Into<Arc<[Entry<K>]>>,
) -> Result<Vec<VirtualItem<K>>, VirtualizerError> {
    Virtualizer::<K>::new(entries)?.virtualize(options)
}

fn validate<K: EntryId>(entries: &[Entry<K>]) -> Result<IdMap<K, usize>, VirtualizerError> {
    let mut index_by_id = IdMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.committed_size().is_none() {
            return Err(VirtualizerError::MissingSize { index });
        }
        if let Some(weight) = entry.weight {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(VirtualizerError::InvalidWeight { index });
            }
        }
        if entry.fixed_size.is_none() {
            if let (Some(min_size), Some(max_size)) = (entry.min_size, entry.max_size) {
                if max_size < min_size {
                    return Err(VirtualizerError::InvalidSizeRange {
                        index,
                        min_size,
                        max_size,
                    });
                }
            }
        }
        if let Some(first) = index_by_id.insert(entry.id.clone(), index) {
            return Err(VirtualizerError::DuplicateId {
                first,
                duplicate: index,
            });
        }
    }
    Ok(index_by_id)
}
