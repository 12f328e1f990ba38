use alloc::vec::Vec;

use crate::{Entry, OffsetIndex, VirtualItem};

/// How effective weights are derived for elastic entries.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Proportion {
    /// Some elastic entry declares a weight; the rest fall back to the smallest declared one.
    Weight { fallback: f64 },
    /// No weights; use `max - min`, falling back to the smallest such range.
    Range { fallback: f64 },
}

impl Proportion {
    fn weight_of<K>(self, entry: &Entry<K>, min_size: u32) -> f64 {
        match self {
            Self::Weight { fallback } => entry.weight.map_or(fallback, f64::from),
            Self::Range { fallback } => match entry.max_size {
                Some(max) => f64::from(max.saturating_sub(min_size)),
                None => fallback,
            },
        }
    }
}

/// Half-up rounding for non-negative values, without needing `std` float intrinsics.
fn round_half_up(value: f64) -> u64 {
    debug_assert!(value >= 0.0, "round_half_up: negative input {value}");
    (value + 0.5) as u64
}

fn saturating_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Sizes every entry when the whole sequence fits in `viewport_size`.
///
/// The slack `viewport_size - total` goes to elastic entries in one proportional pass, each
/// capped at its `max_size`. Whatever the caps left over is split across the unbounded
/// entries, the last of which takes the rounding remainder, so the sizes add up to the
/// viewport exactly. Leftover from capped entries is never handed to other capped entries.
/// Without elastic entries, every entry keeps its committed size.
pub(crate) fn distribute_into<K: Clone>(
    entries: &[Entry<K>],
    index: &OffsetIndex,
    viewport_size: u32,
    out: &mut Vec<VirtualItem<K>>,
) {
    debug_assert_eq!(entries.len(), index.len(), "index built from other entries");
    debug_assert!(index.total() <= viewport_size as u64, "content exceeds viewport");

    let sizes: Vec<u32> = (0..index.len()).filter_map(|i| index.size(i)).collect();
    out.reserve(entries.len());

    let mut elastic = 0usize;
    let mut unbounded = 0usize;
    let mut min_weight: Option<f32> = None;
    let mut min_range: Option<u32> = None;
    for (entry, &min_size) in entries.iter().zip(&sizes) {
        if !entry.is_elastic() {
            continue;
        }
        elastic += 1;
        if let Some(w) = entry.weight {
            min_weight = Some(min_weight.map_or(w, |m| m.min(w)));
        }
        match entry.max_size {
            Some(max) => {
                let range = max.saturating_sub(min_size);
                min_range = Some(min_range.map_or(range, |m| m.min(range)));
            }
            None => unbounded += 1,
        }
    }

    if elastic == 0 {
        vtrace!(count = entries.len(), "distribute: no elastic entries");
        out.extend(sizes.iter().enumerate().map(|(i, &size)| sized_item(entries, i, size)));
        return;
    }

    let proportion = match min_weight {
        Some(w) => Proportion::Weight {
            fallback: f64::from(w),
        },
        None => Proportion::Range {
            fallback: f64::from(min_range.unwrap_or(1)),
        },
    };

    let slack = saturating_u32((viewport_size as u64).saturating_sub(index.total()));
    let total_weight: f64 = entries
        .iter()
        .zip(&sizes)
        .filter(|(entry, _)| entry.is_elastic())
        .map(|(entry, &min_size)| proportion.weight_of(entry, min_size))
        .sum();
    let unit = f64::from(slack) / total_weight;
    vtrace!(
        slack,
        elastic,
        unbounded,
        unit,
        weighted = matches!(proportion, Proportion::Weight { .. }),
        "distribute"
    );

    let mut remaining = slack;
    let mut final_sizes = sizes.clone();
    for (i, entry) in entries.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if !entry.is_elastic() {
            continue;
        }
        let min_size = sizes[i];
        let share = round_half_up(proportion.weight_of(entry, min_size) * unit).max(1);
        let mut extra = saturating_u32(share).min(remaining);
        if let Some(max) = entry.max_size {
            extra = extra.min(max.saturating_sub(min_size));
        }
        final_sizes[i] = min_size + extra;
        remaining -= extra;
    }

    if remaining > 0 && unbounded > 0 {
        let share = saturating_u32(round_half_up(f64::from(remaining) / unbounded as f64));
        let mut left = unbounded;
        for (i, entry) in entries.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            if !entry.is_unbounded() {
                continue;
            }
            left -= 1;
            let extra = if left == 0 {
                remaining
            } else {
                share.min(remaining)
            };
            final_sizes[i] += extra;
            remaining -= extra;
        }
    }
    debug_assert!(
        unbounded == 0 || remaining == 0,
        "distribute: {remaining} left with unbounded entries"
    );

    out.extend(
        final_sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| sized_item(entries, i, size)),
    );
}

fn sized_item<K: Clone>(entries: &[Entry<K>], i: usize, size: u32) -> VirtualItem<K> {
    let entry = &entries[i];
    VirtualItem {
        id: entry.id.clone(),
        index: i,
        size,
        offset: None,
        level: entry.level,
        sticky: None,
    }
}
