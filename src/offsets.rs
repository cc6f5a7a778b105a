use alloc::vec::Vec;

/// Lazily extended cache of cumulative item offsets.
///
/// `sums[i]` is the extent of items `[0, i)`, so `sums[0] == 0` always. The
/// prefix is filled monotonically left to right and thrown away wholesale
/// whenever any recorded size changes: a revision also moves the running
/// average, which shifts the estimated term of every unmeasured item, so no
/// cached suffix survives a change.
///
/// Separately tracks `exact`: the length of the leading run of items whose
/// extents are all measured. `exact` is about measurements, not about the
/// cache, and survives invalidation.
#[derive(Clone, Debug)]
pub(crate) struct OffsetCache {
    sums: Vec<u64>,
    exact: usize,
}

impl OffsetCache {
    pub(crate) fn new() -> Self {
        Self {
            sums: alloc::vec![0],
            exact: 0,
        }
    }

    /// Cumulative extent of items `[0, index)`. `term(i)` yields the measured
    /// extent of item `i`, if any; unmeasured items contribute `estimate`.
    pub(crate) fn offset_of(
        &mut self,
        index: usize,
        estimate: u32,
        term: impl Fn(usize) -> Option<u32>,
    ) -> u64 {
        if let Some(&hit) = self.sums.get(index) {
            return hit;
        }

        let mut offset = self.sums.last().copied().unwrap_or(0);
        for i in self.sums.len() - 1..index {
            offset = offset.saturating_add(u64::from(term(i).unwrap_or(estimate)));
            self.sums.push(offset);
        }
        offset
    }

    /// Drops every cached sum (the `sums[0] == 0` anchor stays).
    pub(crate) fn invalidate(&mut self) {
        self.sums.truncate(1);
    }

    /// Epoch boundary: drops the cache and the measured-prefix marker.
    pub(crate) fn clear(&mut self) {
        self.sums.truncate(1);
        self.exact = 0;
    }

    /// Extends the measured-only prefix as far as `measured` allows.
    pub(crate) fn advance_exact(&mut self, total: usize, measured: impl Fn(usize) -> bool) {
        while self.exact < total && measured(self.exact) {
            self.exact += 1;
        }
    }

    /// Highest index whose offset is composed entirely of measured terms.
    pub(crate) fn exact(&self) -> usize {
        self.exact
    }
}
