use alloc::vec::Vec;

use crate::{Entry, VirtualizerError};

/// Prefix-sum table of committed entry sizes.
///
/// Built once per entry sequence in `O(n)`; lookups are `O(log n)` binary searches over the
/// monotonic start/end offsets. There is no in-place update: a changed sequence means a new
/// index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    starts: Vec<u64>,
    ends: Vec<u64>, // ends[i] == starts[i + 1]
}

impl OffsetIndex {
    /// Builds the index from each entry's `fixed_size`, falling back to `min_size`.
    pub fn build<K>(entries: &[Entry<K>]) -> Result<Self, VirtualizerError> {
        let mut starts = Vec::with_capacity(entries.len());
        let mut ends = Vec::with_capacity(entries.len());
        let mut total = 0u64;
        for (index, entry) in entries.iter().enumerate() {
            let size = entry
                .committed_size()
                .ok_or(VirtualizerError::MissingSize { index })?;
            starts.push(total);
            total = total.saturating_add(size as u64);
            ends.push(total);
        }
        Ok(Self { starts, ends })
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Sum of all committed sizes.
    pub fn total(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    pub fn start(&self, index: usize) -> Option<u64> {
        self.starts.get(index).copied()
    }

    pub fn end(&self, index: usize) -> Option<u64> {
        self.ends.get(index).copied()
    }

    pub fn size(&self, index: usize) -> Option<u32> {
        let size = self.end(index)? - self.start(index)?;
        u32::try_from(size).ok()
    }

    /// `(start, size)` of an entry known to be in range.
    pub(crate) fn span(&self, index: usize) -> (u64, u32) {
        let start = self.starts[index];
        let size = self.ends[index] - start;
        debug_assert!(size <= u32::MAX as u64, "span: size overflow at {index}");
        (start, size as u32)
    }

    /// Returns the first entry whose closed interval `[start, start + size]` contains `offset`.
    ///
    /// An offset sitting exactly on a boundary resolves to the earlier entry. Returns `None`
    /// when `offset` lies past the indexed span.
    pub fn locate(&self, offset: u64) -> Option<usize> {
        let index = self.ends.partition_point(|&end| end < offset);
        if index >= self.len() {
            return None;
        }
        // Every earlier entry ends before `offset`, so this one starts before it.
        debug_assert!(
            self.starts[index] <= offset,
            "locate: start past offset (i={index}, offset={offset})"
        );
        Some(index)
    }

    /// Returns the first entry starting at or after `position`.
    pub fn first_at_or_after(&self, position: u64) -> Option<usize> {
        let index = self.starts.partition_point(|&start| start < position);
        (index < self.len()).then_some(index)
    }
}
