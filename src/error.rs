/// Configuration rejected at construction or on a configuration update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("window_len must be positive")]
    WindowLenZero,
    #[error("estimate_size must be positive")]
    EstimateSizeZero,
    /// `item_ids` contained the same identity twice; the second occurrence's
    /// index is reported. Duplicates break the index <-> identity mapping and
    /// corrupt offset lookups.
    #[error("duplicate item identity at index {0}")]
    DuplicateItemId(usize),
}
