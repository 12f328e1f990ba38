use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{
    Entry, NodeId, OffsetIndex, StickyPlacement, StickyTree, VirtualItem, VirtualRange,
    VirtualizeOptions,
};

/// Selects the entries intersecting `[scroll_offset, scroll_offset + viewport_size]`, widened
/// by `overscan` on both sides and clamped to the sequence.
///
/// Returns `None` when `scroll_offset` is past all content.
pub(crate) fn window_range(
    index: &OffsetIndex,
    options: &VirtualizeOptions,
) -> Option<VirtualRange> {
    let first_in_window = index.locate(options.scroll_offset)?;
    let last = index.len() - 1;

    let viewport_end = options
        .scroll_offset
        .saturating_add(options.viewport_size as u64);
    let last_in_window = match index.first_at_or_after(viewport_end) {
        Some(first_out) => first_out.saturating_sub(1),
        None => last,
    };

    Some(VirtualRange {
        start_index: first_in_window.saturating_sub(options.overscan),
        end_index: last_in_window.saturating_add(options.overscan).min(last) + 1,
    })
}

fn windowed_item<K: Clone>(entries: &[Entry<K>], index: &OffsetIndex, i: usize) -> VirtualItem<K> {
    let entry = &entries[i];
    let (start, size) = index.span(i);
    VirtualItem {
        id: entry.id.clone(),
        index: i,
        size,
        offset: Some(start),
        level: entry.level,
        sticky: None,
    }
}

/// Emits the window for `range`, preceded by the header chain that is still pinned above it.
///
/// The chain is the closest header before the window plus its ancestors, root first. Every
/// header in the output then gets its [`StickyPlacement`].
pub(crate) fn window_into<K: Clone>(
    entries: &[Entry<K>],
    index: &OffsetIndex,
    tree: &StickyTree<K>,
    range: VirtualRange,
    out: &mut Vec<VirtualItem<K>>,
) {
    let base = out.len();

    if let Some(header) = tree.last_header_before(range.start_index) {
        let chain = tree.ancestors_of(header);
        out.reserve(chain.len() + 1 + range.len());
        for node in chain.into_iter().chain(core::iter::once(header)) {
            out.push(windowed_item(entries, index, tree.node(node).entry_index()));
        }
        vtrace!(
            header = tree.node(header).entry_index(),
            depth = tree.depth(header),
            "window: pinned header chain"
        );
    } else {
        out.reserve(range.len());
    }

    for i in range.start_index..range.end_index {
        out.push(windowed_item(entries, index, i));
    }

    if !tree.is_empty() {
        resolve_sticky(index, tree, &mut out[base..]);
    }
}

/// Fills in clamp bounds and stacking offsets for every header in `items`.
///
/// Outer groups (larger levels) are resolved first so a nested header can stack below the
/// resolved position of its parent. A header whose parent is absent from `items` stacks at 0.
fn resolve_sticky<K>(index: &OffsetIndex, tree: &StickyTree<K>, items: &mut [VirtualItem<K>]) {
    let mut headers: Vec<(usize, NodeId, u32)> = items
        .iter()
        .enumerate()
        .filter_map(|(pos, item)| {
            let level = item.level?;
            let node = tree.node_for_entry(item.index)?;
            Some((pos, node, level))
        })
        .collect();
    headers.sort_by(|a, b| b.2.cmp(&a.2));

    let total = index.total();
    let mut stacked: BTreeMap<NodeId, u64> = BTreeMap::new();
    for (pos, node, _) in headers {
        let item = &mut items[pos];
        let size = item.size as u64;
        let (offset, _) = index.span(item.index);

        let boundary = tree
            .next_sibling(node)
            .map_or(total, |next| index.span(tree.node(next).entry_index()).0);
        let relative_offset = tree
            .parent(node)
            .and_then(|parent| stacked.get(&parent).copied())
            .unwrap_or(0);
        stacked.insert(node, relative_offset.saturating_add(size));

        let placement = StickyPlacement {
            relative_offset,
            min_offset: offset,
            max_offset: boundary.saturating_sub(size),
        };
        debug_assert!(
            placement.min_offset <= placement.max_offset,
            "sticky bounds inverted at entry {}",
            item.index
        );
        item.sticky = Some(placement);
    }
}
