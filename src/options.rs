use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::ConfigError;
use crate::types::Range;

/// A callback fired when the rendered window actually moves.
///
/// The engine invokes it with the new range snapshot, and only when the
/// window's start index changed (or at epoch boundaries: construction and
/// [`crate::Windower::reset`]).
pub type OnRangeChange = Arc<dyn Fn(Range) + Send + Sync>;

/// Configuration for [`crate::Windower`].
///
/// `K` is the item identity type; `item_ids` defines the index ↔ identity
/// mapping and must contain each identity at most once (validated at
/// construction).
pub struct WindowerOptions<K> {
    /// Number of items kept materialized at once. Must be positive.
    pub window_len: usize,
    /// Hysteresis margin, in items: how far the scroll position may drift
    /// past the window's anchor before the window re-centers.
    pub buffer_len: usize,
    /// Default assumed extent for an item that has not been measured yet.
    /// Must be positive.
    pub estimate_size: u32,
    /// Ordered sequence of unique item identities.
    pub item_ids: Vec<K>,
    /// Fixed extent rendered before the list (e.g. a header). Subtracted
    /// from reported scroll positions and added to scroll-to offsets.
    pub leading_offset: u32,
    /// Fixed extent rendered after the list (e.g. a footer). Participates in
    /// [`crate::Windower::total_extent`] only.
    pub trailing_offset: u32,
    /// Extra items the re-anchor operations nudge the window by, in the last
    /// known scroll direction.
    pub leading_buffer: usize,
    /// Suspends scroll handling, re-anchoring and notifications. Size
    /// recording still accumulates so a re-enabled engine has warm data.
    pub disabled: bool,
    /// Window-moved callback.
    pub on_change: Option<OnRangeChange>,
}

impl<K> WindowerOptions<K> {
    pub fn new(window_len: usize, estimate_size: u32, item_ids: Vec<K>) -> Self {
        Self {
            window_len,
            buffer_len: 0,
            estimate_size,
            item_ids,
            leading_offset: 0,
            trailing_offset: 0,
            leading_buffer: 0,
            disabled: false,
            on_change: None,
        }
    }

    pub fn with_buffer_len(mut self, buffer_len: usize) -> Self {
        self.buffer_len = buffer_len;
        self
    }

    pub fn with_leading_offset(mut self, leading_offset: u32) -> Self {
        self.leading_offset = leading_offset;
        self
    }

    pub fn with_trailing_offset(mut self, trailing_offset: u32) -> Self {
        self.trailing_offset = trailing_offset;
        self
    }

    pub fn with_leading_buffer(mut self, leading_buffer: usize) -> Self {
        self.leading_buffer = leading_buffer;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(Range) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// Scalar-field validation. Identity uniqueness is checked where the
    /// index map is built, in [`crate::Windower::new`] and the id setters.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.window_len == 0 {
            return Err(ConfigError::WindowLenZero);
        }
        if self.estimate_size == 0 {
            return Err(ConfigError::EstimateSizeZero);
        }
        Ok(())
    }
}

impl<K: Clone> Clone for WindowerOptions<K> {
    fn clone(&self) -> Self {
        Self {
            window_len: self.window_len,
            buffer_len: self.buffer_len,
            estimate_size: self.estimate_size,
            item_ids: self.item_ids.clone(),
            leading_offset: self.leading_offset,
            trailing_offset: self.trailing_offset,
            leading_buffer: self.leading_buffer,
            disabled: self.disabled,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> core::fmt::Debug for WindowerOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowerOptions")
            .field("window_len", &self.window_len)
            .field("buffer_len", &self.buffer_len)
            .field("estimate_size", &self.estimate_size)
            .field("item_count", &self.item_ids.len())
            .field("leading_offset", &self.leading_offset)
            .field("trailing_offset", &self.trailing_offset)
            .field("leading_buffer", &self.leading_buffer)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
