//! Slot bookkeeping shared by parameter declaration and argument validation.

/// Returns the lowest non-negative slot absent from `used`.
///
/// An empty set yields 0. Otherwise the answer is the first hole in
/// `0..=max(used) + 1`, so a fully packed set yields `max + 1`. The same
/// primitive picks the next free slot for an undeclared parameter and finds
/// the first missing argument when validating a merged list.
pub fn lowest_unused_slot<I>(used: I) -> usize
where
	I: IntoIterator<Item = usize>,
{
	let mut used: Vec<usize> = used.into_iter().collect();
	used.sort_unstable();
	used.dedup();
	used.iter()
		.enumerate()
		.find(|&(expected, &slot)| expected != slot)
		.map_or(used.len(), |(expected, _)| expected)
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use proptest::prelude::*;

	use super::*;

	#[test]
	fn empty_set_starts_at_zero() {
		assert_eq!(lowest_unused_slot([]), 0);
	}

	#[test]
	fn packed_set_continues_after_max() {
		assert_eq!(lowest_unused_slot([0, 1, 2]), 3);
	}

	#[test]
	fn finds_hole_below_max() {
		assert_eq!(lowest_unused_slot([0, 2]), 1);
		assert_eq!(lowest_unused_slot([1]), 0);
		assert_eq!(lowest_unused_slot([10]), 0);
	}

	#[test]
	fn ignores_order_and_duplicates() {
		assert_eq!(lowest_unused_slot([2, 0, 0, 1, 4]), 3);
	}

	proptest! {
		/// Agrees with a direct scan of `0..=max + 1`.
		#[test]
		fn prop_matches_range_scan(used in prop::collection::btree_set(0usize..64, 0..32)) {
			let expected = match used.iter().max() {
				None => 0,
				Some(&max) => (0..=max + 1).find(|s| !used.contains(s)).unwrap(),
			};
			prop_assert_eq!(lowest_unused_slot(used.iter().copied()), expected);
		}

		/// The result is never in the set and everything below it is.
		#[test]
		fn prop_result_is_first_hole(used in prop::collection::btree_set(0usize..64, 0..32)) {
			let slot = lowest_unused_slot(used.iter().copied());
			prop_assert!(!used.contains(&slot));
			let below: BTreeSet<usize> = (0..slot).collect();
			prop_assert!(below.is_subset(&used));
		}
	}
}
