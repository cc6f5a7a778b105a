use crate::key::{ItemIdent, KeyMap};
use crate::types::Sizing;

/// Measured item extents, keyed by item identity.
///
/// Keeps a running total so the average never requires a rescan, and drives
/// the uniform/variable classification: the first recorded value seeds the
/// tentative [`Sizing::Uniform`] hypothesis, and any later differing value
/// flips the ledger to [`Sizing::Variable`] for good.
#[derive(Clone, Debug)]
pub(crate) struct SizeLedger<K> {
    sizes: KeyMap<K, u32>,
    total: u64,
    sizing: Sizing,
}

impl<K: ItemIdent> SizeLedger<K> {
    pub(crate) fn new() -> Self {
        Self {
            sizes: KeyMap::new(),
            total: 0,
            sizing: Sizing::Undetermined,
        }
    }

    /// Records a measured extent. Returns `true` when the stored value
    /// changed (first measurement for `id`, or a revision), which is the
    /// signal that cached cumulative offsets are stale.
    pub(crate) fn record(&mut self, id: K, size: u32) -> bool {
        match self.sizing {
            Sizing::Undetermined => self.sizing = Sizing::Uniform(size),
            // The fixed-size memo dies with the hypothesis.
            Sizing::Uniform(fixed) if fixed != size => self.sizing = Sizing::Variable,
            _ => {}
        }

        match self.sizes.insert(id, size) {
            Some(old) if old == size => false,
            Some(old) => {
                self.total = self
                    .total
                    .saturating_sub(u64::from(old))
                    .saturating_add(u64::from(size));
                true
            }
            None => {
                self.total = self.total.saturating_add(u64::from(size));
                true
            }
        }
    }

    /// Drops entries whose identity is no longer in the list, bounding the
    /// ledger to the current dataset. Classification is left alone: the
    /// uniform hypothesis is about the values seen, not about retention.
    pub(crate) fn purge(&mut self, keep: impl Fn(&K) -> bool) {
        self.sizes.retain(|id, _| keep(id));
        self.total = self.sizes.values().map(|&s| u64::from(s)).sum();
    }

    /// Expected extent of an unmeasured item: the fixed size under the
    /// uniform hypothesis, the running average once samples exist, otherwise
    /// the configured fallback.
    pub(crate) fn estimate(&self, fallback: u32) -> u32 {
        match self.sizing {
            Sizing::Uniform(fixed) => fixed,
            _ if !self.sizes.is_empty() => self.average(),
            _ => fallback,
        }
    }

    /// Running average, rounded half-up.
    fn average(&self) -> u32 {
        let count = self.sizes.len() as u64;
        ((self.total + count / 2) / count) as u32
    }

    pub(crate) fn get(&self, id: &K) -> Option<u32> {
        self.sizes.get(id).copied()
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        self.sizes.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.sizes.len()
    }

    pub(crate) fn sizing(&self) -> Sizing {
        self.sizing
    }

    pub(crate) fn clear(&mut self) {
        self.sizes.clear();
        self.total = 0;
        self.sizing = Sizing::Undetermined;
    }
}
