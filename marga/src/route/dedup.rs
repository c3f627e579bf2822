//! Near-coincident waypoint removal.
//!
//! Two passes over the original sequence:
//! 1. Build a keep mask: point `i + 1` is dropped when it lies closer than
//!    the threshold to point `i`. Pairs are always taken from the original
//!    sequence, so a dropped point still serves as the reference for its
//!    successor.
//! 2. Materialize every parallel sequence through the same mask.

use crate::core::LocalPoint;

/// Compute the keep mask for a sequence of local points.
///
/// `mask[0]` is always `true`. An empty input yields an empty mask.
pub fn keep_mask(points: &[LocalPoint], min_separation: f64) -> Vec<bool> {
    let mut mask = vec![true; points.len()];
    for (i, pair) in points.windows(2).enumerate() {
        if pair[0].distance(&pair[1]) < min_separation {
            mask[i + 1] = false;
        }
    }
    mask
}

/// Keep the elements of `items` whose mask entry is `true`, preserving order.
///
/// # Panics
/// Debug builds assert that `items` and `mask` have equal length.
pub fn apply_mask<T: Copy>(items: &[T], mask: &[bool]) -> Vec<T> {
    debug_assert_eq!(items.len(), mask.len());
    items
        .iter()
        .zip(mask)
        .filter_map(|(item, &keep)| keep.then_some(*item))
        .collect()
}

/// Number of `false` entries in a mask.
#[inline]
pub fn dropped_count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&keep| !keep).count()
}
