use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::ConfigError;
use crate::key::{ItemIdent, KeyMap};
use crate::ledger::SizeLedger;
use crate::offsets::OffsetCache;
use crate::{Range, ScrollDirection, Sizing, WindowerOptions};

/// A headless windowing engine for long scrollable lists.
///
/// The engine never touches UI objects: the caller reports scroll offsets
/// ([`Self::handle_scroll`]) and measured item extents ([`Self::record_size`]),
/// and the engine answers with an index range plus the spacer extents that
/// stand in for everything off screen ([`Self::get_range`]). The window holds
/// `window_len` items and only re-anchors once the scroll position drifts
/// more than `buffer_len` items past it, so continuous scrolling yields far
/// fewer recomputations than one per scroll event.
///
/// One instance is owned per list epoch; swap the dataset wholesale with
/// [`Self::reset`], and use the re-anchor operations for incremental list
/// growth or shrinkage.
pub struct Windower<K> {
    options: WindowerOptions<K>,
    index_of: KeyMap<K, usize>,
    ledger: SizeLedger<K>,
    offsets: OffsetCache,
    range: Range,
    scroll_offset: u64,
    direction: Option<ScrollDirection>,
}

impl<K: ItemIdent> Windower<K> {
    /// Creates an engine from validated options.
    ///
    /// Computes the initial range and fires `on_change` once (unless
    /// disabled), so the caller always observes a range before the first
    /// scroll event.
    pub fn new(options: WindowerOptions<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        let index_of = build_index(&options.item_ids)?;
        wdebug!(
            items = options.item_ids.len(),
            window_len = options.window_len,
            buffer_len = options.buffer_len,
            "Windower::new"
        );
        let mut w = Self {
            options,
            index_of,
            ledger: SizeLedger::new(),
            offsets: OffsetCache::new(),
            range: Range::default(),
            scroll_offset: 0,
            direction: None,
        };
        w.apply_initial_range();
        Ok(w)
    }

    pub fn options(&self) -> &WindowerOptions<K> {
        &self.options
    }

    /// Current window snapshot.
    pub fn get_range(&self) -> Range {
        self.range
    }

    pub fn item_count(&self) -> usize {
        self.options.item_ids.len()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    pub fn is_scrolling_toward_start(&self) -> bool {
        self.direction == Some(ScrollDirection::TowardStart)
    }

    pub fn is_scrolling_toward_end(&self) -> bool {
        self.direction == Some(ScrollDirection::TowardEnd)
    }

    /// Current size classification.
    pub fn sizing(&self) -> Sizing {
        self.ledger.sizing()
    }

    /// Measured extent of `id`, if one has been recorded.
    pub fn measured_size(&self, id: &K) -> Option<u32> {
        self.ledger.get(id)
    }

    /// Number of identities with a recorded extent.
    pub fn measured_len(&self) -> usize {
        self.ledger.len()
    }

    /// Records a measured extent for `id`.
    ///
    /// An identity absent from `item_ids` is ignored (logged when the
    /// `tracing` feature is on); a zero extent is clamped to 1 so cumulative
    /// offsets stay monotonic. Recording does not move the window: the next
    /// scroll or re-anchor picks up the new sizes.
    pub fn record_size(&mut self, id: K, size: u32) {
        if !self.index_of.contains_key(&id) {
            wwarn!(size, "record_size: unknown identity, ignoring");
            return;
        }
        let size = if size == 0 {
            wwarn!("record_size: zero extent clamped to 1");
            1
        } else {
            size
        };
        wtrace!(size, "record_size");

        if self.ledger.record(id, size) {
            // A changed size also moves the running average, so every cached
            // cumulative sum may be stale.
            self.offsets.invalidate();
        }
        let ids = &self.options.item_ids;
        let ledger = &self.ledger;
        self.offsets.advance_exact(ids.len(), |i| ledger.contains(&ids[i]));
    }

    /// Reacts to a reported scroll position.
    ///
    /// Classifies direction, then re-anchors the window only once the
    /// position has moved past the hysteresis margin. No-op while disabled.
    pub fn handle_scroll(&mut self, offset: u64) {
        if self.options.disabled {
            return;
        }
        let direction = if offset < self.scroll_offset {
            ScrollDirection::TowardStart
        } else {
            ScrollDirection::TowardEnd
        };
        self.direction = Some(direction);
        self.scroll_offset = offset;
        wtrace!(offset, ?direction, "handle_scroll");

        match direction {
            ScrollDirection::TowardStart => self.on_toward_start(),
            ScrollDirection::TowardEnd => self.on_toward_end(),
        }
    }

    fn on_toward_start(&mut self) {
        let overs = self.scroll_overs();
        // Still inside the already-rendered window.
        if overs > self.range.start {
            return;
        }
        let start = overs.saturating_sub(self.options.buffer_len);
        self.set_range(start, self.end_by_start(start));
    }

    fn on_toward_end(&mut self) {
        let overs = self.scroll_overs();
        // Not yet past the buffer margin.
        if overs < self.range.start.saturating_add(self.options.buffer_len) {
            return;
        }
        self.set_range(overs, self.end_by_start(overs));
    }

    /// Number of items fully scrolled past the current offset.
    fn scroll_overs(&mut self) -> usize {
        let offset = self
            .scroll_offset
            .saturating_sub(u64::from(self.options.leading_offset));
        if offset == 0 {
            return 0;
        }
        if let Sizing::Uniform(fixed) = self.ledger.sizing() {
            // fixed >= 1: recorded extents are clamped to be positive.
            return (offset / u64::from(fixed)) as usize;
        }
        self.locate(offset)
    }

    /// Largest index whose cumulative offset is <= `target`.
    ///
    /// Binary search over the index domain `[0, item_count]`; sound because
    /// `offset_of` is non-decreasing in the index.
    fn locate(&mut self, target: u64) -> usize {
        let mut low = 0usize;
        let mut high = self.item_count();

        while low <= high {
            let mid = low + (high - low) / 2;
            match self.offset_of(mid).cmp(&target) {
                Ordering::Equal => return mid,
                Ordering::Less => low = mid + 1,
                Ordering::Greater => {
                    // offset_of(0) == 0 <= target, so mid > 0 here.
                    let Some(h) = mid.checked_sub(1) else { break };
                    high = h;
                }
            }
        }

        low.saturating_sub(1)
    }

    /// Cumulative extent of items `[0, index)`; `offset_of(0) == 0`.
    ///
    /// Closed-form under the uniform hypothesis, cached summation otherwise.
    fn offset_of(&mut self, index: usize) -> u64 {
        let index = index.min(self.item_count());
        if let Sizing::Uniform(fixed) = self.ledger.sizing() {
            return u64::from(fixed).saturating_mul(index as u64);
        }
        let estimate = self.estimate();
        let ids = &self.options.item_ids;
        let ledger = &self.ledger;
        self.offsets.offset_of(index, estimate, |i| ledger.get(&ids[i]))
    }

    fn estimate(&self) -> u32 {
        self.ledger.estimate(self.options.estimate_size)
    }

    fn last_index(&self) -> Option<usize> {
        self.item_count().checked_sub(1)
    }

    fn end_by_start(&self, start: usize) -> usize {
        let Some(last) = self.last_index() else { return 0 };
        start
            .saturating_add(self.options.window_len)
            .saturating_sub(1)
            .min(last)
    }

    /// Repairs a broken candidate range so the window always holds exactly
    /// `window_len` items unless the whole list is shorter.
    fn corrected(&self, start: usize, end: usize) -> (usize, usize) {
        let Some(last) = self.last_index() else {
            return (0, 0);
        };
        let window = self.options.window_len;
        if self.item_count() <= window {
            return (0, last);
        }
        let end = end.min(last);
        if end < start || end - start < window - 1 {
            // Grow backward from end to restore the full window.
            ((end + 1).saturating_sub(window), end)
        } else {
            (start, end)
        }
    }

    /// Applies a corrected range; notifies only when the start moved. The end
    /// is always re-derivable from the start, so an unchanged start means an
    /// unchanged window.
    fn set_range(&mut self, start: usize, end: usize) {
        let (start, end) = self.corrected(start, end);
        if start == self.range.start {
            return;
        }
        self.apply_range(start, end);
    }

    fn apply_range(&mut self, start: usize, end: usize) {
        let pad_front = self.pad_front(start);
        let pad_behind = self.pad_behind(end);
        self.range = Range {
            start,
            end,
            pad_front,
            pad_behind,
        };
        wtrace!(start, end, pad_front, pad_behind, "apply_range");
        self.notify();
    }

    fn apply_initial_range(&mut self) {
        let (start, end) = self.corrected(0, self.end_by_start(0));
        self.apply_range(start, end);
    }

    fn pad_front(&mut self, start: usize) -> u64 {
        self.offset_of(start)
    }

    fn pad_behind(&mut self, end: usize) -> u64 {
        let Some(last) = self.last_index() else { return 0 };
        let trailing = last.saturating_sub(end) as u64;
        match self.ledger.sizing() {
            Sizing::Uniform(fixed) => u64::from(fixed).saturating_mul(trailing),
            _ if self.offsets.exact() >= last => {
                // Everything contributing is measured: exact spacer.
                self.offset_of(last).saturating_sub(self.offset_of(end))
            }
            _ => u64::from(self.estimate()).saturating_mul(trailing),
        }
    }

    fn notify(&self) {
        if self.options.disabled {
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(self.range);
        }
    }

    /// Scroll position that presents item `index` at the viewport's leading
    /// edge ("scroll to index"). The index is clamped to the list.
    pub fn get_offset_for_index(&mut self, index: usize) -> u64 {
        let index = index.min(self.last_index().unwrap_or(0));
        self.offset_of(index)
            .saturating_add(u64::from(self.options.leading_offset))
    }

    /// Extent of the whole scrollable content: leading offset, all items
    /// (measured or estimated), trailing offset.
    pub fn total_extent(&mut self) -> u64 {
        let items = self.offset_of(self.item_count());
        u64::from(self.options.leading_offset)
            .saturating_add(items)
            .saturating_add(u64::from(self.options.trailing_offset))
    }

    /// Replaces the whole configuration, validating it first and reconciling
    /// ledger/cache state when the item identities changed.
    ///
    /// Setters never move the window; call a re-anchor operation (or wait
    /// for the next scroll) to pick the new configuration up.
    pub fn set_options(&mut self, options: WindowerOptions<K>) -> Result<(), ConfigError> {
        options.validate()?;
        let ids_changed = options.item_ids != self.options.item_ids;
        let estimate_changed = options.estimate_size != self.options.estimate_size;
        if ids_changed {
            self.index_of = build_index(&options.item_ids)?;
        }
        self.options = options;
        wtrace!(
            items = self.options.item_ids.len(),
            window_len = self.options.window_len,
            "set_options"
        );
        if ids_changed {
            self.after_ids_changed();
        } else if estimate_changed {
            self.offsets.invalidate();
        }
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Self::set_options`].
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WindowerOptions<K>),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Replaces the item identity sequence, purging ledger entries that no
    /// longer belong to the list and invalidating cached offsets.
    pub fn set_item_ids(&mut self, item_ids: Vec<K>) -> Result<(), ConfigError> {
        self.index_of = build_index(&item_ids)?;
        self.options.item_ids = item_ids;
        self.after_ids_changed();
        Ok(())
    }

    fn after_ids_changed(&mut self) {
        let index_of = &self.index_of;
        self.ledger.purge(|id| index_of.contains_key(id));
        wdebug!(
            items = self.options.item_ids.len(),
            measured = self.ledger.len(),
            "item identities changed"
        );
        self.offsets.clear();
        let ids = &self.options.item_ids;
        let ledger = &self.ledger;
        self.offsets.advance_exact(ids.len(), |i| ledger.contains(&ids[i]));
    }

    pub fn set_window_len(&mut self, window_len: usize) -> Result<(), ConfigError> {
        if window_len == 0 {
            return Err(ConfigError::WindowLenZero);
        }
        self.options.window_len = window_len;
        Ok(())
    }

    pub fn set_buffer_len(&mut self, buffer_len: usize) {
        self.options.buffer_len = buffer_len;
    }

    pub fn set_estimate_size(&mut self, estimate_size: u32) -> Result<(), ConfigError> {
        if estimate_size == 0 {
            return Err(ConfigError::EstimateSizeZero);
        }
        if self.options.estimate_size != estimate_size {
            self.options.estimate_size = estimate_size;
            self.offsets.invalidate();
        }
        Ok(())
    }

    pub fn set_leading_offset(&mut self, leading_offset: u32) {
        self.options.leading_offset = leading_offset;
    }

    pub fn set_trailing_offset(&mut self, trailing_offset: u32) {
        self.options.trailing_offset = trailing_offset;
    }

    pub fn set_leading_buffer(&mut self, leading_buffer: usize) {
        self.options.leading_buffer = leading_buffer;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(Range) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Recomputes the window after the list grew or shrank in place.
    ///
    /// The end is re-derived from the current start, optionally nudged by
    /// `leading_buffer` in the last known scroll direction; the corrected
    /// range then re-anchors backward if the list shrank underneath it.
    pub fn re_anchor_after_list_change(&mut self) {
        if self.options.disabled {
            return;
        }
        let nudge = self.options.leading_buffer;
        let nudged = match self.direction {
            Some(ScrollDirection::TowardStart) => self.range.start.saturating_sub(nudge),
            Some(ScrollDirection::TowardEnd) => self.range.start.saturating_add(nudge),
            None => self.range.start,
        };
        self.set_range(self.range.start, self.end_by_start(nudged));
    }

    /// Recomputes the window after `window_len` or the leading offset
    /// changed.
    pub fn re_anchor_after_window_change(&mut self) {
        self.re_anchor_after_list_change();
    }

    /// Discards all ledger, cache, range and scroll state and reinitializes
    /// to epoch zero. Use for wholesale dataset replacement; incremental
    /// growth/shrinkage goes through the re-anchor operations instead.
    ///
    /// Re-fires `on_change` with the fresh initial range (unless disabled).
    pub fn reset(&mut self) {
        wdebug!("reset");
        self.ledger.clear();
        self.offsets.clear();
        self.scroll_offset = 0;
        self.direction = None;
        self.range = Range::default();
        self.apply_initial_range();
    }
}

fn build_index<K: ItemIdent>(ids: &[K]) -> Result<KeyMap<K, usize>, ConfigError> {
    let mut map = KeyMap::new();
    for (i, id) in ids.iter().enumerate() {
        if map.insert(id.clone(), i).is_some() {
            return Err(ConfigError::DuplicateItemId(i));
        }
    }
    Ok(map)
}

impl<K: ItemIdent> core::fmt::Debug for Windower<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Windower")
            .field("options", &self.options)
            .field("range", &self.range)
            .field("scroll_offset", &self.scroll_offset)
            .field("direction", &self.direction)
            .field("measured", &self.ledger.len())
            .finish_non_exhaustive()
    }
}
