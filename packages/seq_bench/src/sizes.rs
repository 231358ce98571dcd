use std::num::NonZero;

/// The ten container sizes one series is measured at.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use seq_bench::SizeList;
///
/// let scaled = SizeList::SMALL.scaled_down(NonZero::new(1000).unwrap());
///
/// assert_eq!(scaled.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SizeList {
    sizes: [usize; Self::LEN],
}

impl SizeList {
    /// Number of sizes in every list.
    pub const LEN: usize = 10;

    /// 100 000 to 1 000 000 elements.
    pub const LARGE: Self = Self::new([
        100_000, 200_000, 300_000, 400_000, 500_000, 600_000, 700_000, 800_000, 900_000,
        1_000_000,
    ]);

    /// 10 000 to 100 000 elements.
    pub const MEDIUM: Self = Self::new([
        10_000, 20_000, 30_000, 40_000, 50_000, 60_000, 70_000, 80_000, 90_000, 100_000,
    ]);

    /// 1 000 to 10 000 elements.
    pub const SMALL: Self = Self::new([
        1_000, 2_000, 3_000, 4_000, 5_000, 6_000, 7_000, 8_000, 9_000, 10_000,
    ]);

    /// Creates a size list.
    ///
    /// # Panics
    ///
    /// Panics if the sizes are not strictly increasing.
    #[must_use]
    pub const fn new(sizes: [usize; Self::LEN]) -> Self {
        let mut index = 1;

        while index < Self::LEN {
            #[expect(
                clippy::indexing_slicing,
                reason = "the loop bounds keep both indexes in range"
            )]
            let increasing = sizes[index.wrapping_sub(1)] < sizes[index];

            assert!(increasing, "sizes must be strictly increasing");

            index = index.wrapping_add(1);
        }

        Self { sizes }
    }

    /// Divides every size by `divisor`.
    ///
    /// The result is still strictly increasing: a size that would collapse onto its
    /// predecessor (or onto zero) is raised to one more than the predecessor.
    #[must_use]
    pub fn scaled_down(&self, divisor: NonZero<usize>) -> Self {
        let mut previous = 0_usize;

        let sizes = self.sizes.map(|size| {
            let scaled = (size / divisor).max(previous.saturating_add(1));
            previous = scaled;
            scaled
        });

        Self { sizes }
    }

    /// Iterates over the sizes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.sizes.iter().copied()
    }

    /// The sizes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.sizes
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn predefined_lists_have_expected_bounds() {
        assert_eq!(SizeList::LARGE.as_slice().first(), Some(&100_000));
        assert_eq!(SizeList::LARGE.as_slice().last(), Some(&1_000_000));
        assert_eq!(SizeList::MEDIUM.as_slice().first(), Some(&10_000));
        assert_eq!(SizeList::SMALL.as_slice().last(), Some(&10_000));
    }

    #[test]
    fn unit_scale_keeps_sizes() {
        assert_eq!(
            SizeList::MEDIUM.scaled_down(NonZero::new(1).unwrap()),
            SizeList::MEDIUM
        );
    }

    #[test]
    fn scaling_never_reaches_zero() {
        let scaled = SizeList::SMALL.scaled_down(NonZero::new(1_000_000).unwrap());

        assert_eq!(scaled.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn scaling_keeps_sizes_distinct() {
        let scaled = SizeList::MEDIUM.scaled_down(NonZero::new(25_000).unwrap());

        // 0, 0, 1, 1, 2, 2, 2, 3, 3, 4 before raising collapsed entries.
        assert_eq!(scaled.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        let scaled = SizeList::LARGE.scaled_down(NonZero::new(200_000).unwrap());
        assert_eq!(scaled.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        // Constructing through `new()` re-checks the ordering.
        _ = SizeList::new(SizeList::LARGE.scaled_down(NonZero::new(7).unwrap()).sizes);
    }

    #[test]
    #[should_panic]
    fn new_rejects_unordered_sizes() {
        _ = SizeList::new([1, 2, 3, 4, 5, 6, 7, 8, 10, 9]);
    }
}
