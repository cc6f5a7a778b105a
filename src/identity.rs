use alloc::sync::Arc;
use alloc::vec::Vec;

/// How an item's unique identity is obtained.
///
/// The engine itself only consumes a pre-built identity sequence
/// ([`crate::WindowerOptions::item_ids`]); adapters use an extractor to
/// derive that sequence from their item data. Two concrete variants cover
/// the usual cases: [`FieldSelector`] for "key by this field" and [`KeyFn`]
/// for arbitrary logic.
pub trait IdentityExtractor<T> {
    type Id;

    fn identity_of(&self, item: &T) -> Self::Id;
}

/// Fixed field selector: identity is one of the item's own fields, named by
/// a plain accessor.
///
/// ```
/// use windower::{FieldSelector, IdentityExtractor};
///
/// struct Row { id: u64 }
/// let by_id = FieldSelector::new(|row: &Row| row.id);
/// assert_eq!(by_id.identity_of(&Row { id: 7 }), 7);
/// ```
pub struct FieldSelector<T, K>(fn(&T) -> K);

impl<T, K> FieldSelector<T, K> {
    pub fn new(accessor: fn(&T) -> K) -> Self {
        Self(accessor)
    }
}

impl<T, K> IdentityExtractor<T> for FieldSelector<T, K> {
    type Id = K;

    fn identity_of(&self, item: &T) -> K {
        (self.0)(item)
    }
}

impl<T, K> Clone for FieldSelector<T, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, K> Copy for FieldSelector<T, K> {}

impl<T, K> core::fmt::Debug for FieldSelector<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FieldSelector(..)")
    }
}

/// Custom identity function, for identities that need computation (composite
/// keys, normalization, lookups into side tables).
pub struct KeyFn<T, K>(Arc<dyn Fn(&T) -> K + Send + Sync>);

impl<T, K> KeyFn<T, K> {
    pub fn new(f: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl<T, K> IdentityExtractor<T> for KeyFn<T, K> {
    type Id = K;

    fn identity_of(&self, item: &T) -> K {
        (self.0)(item)
    }
}

impl<T, K> Clone for KeyFn<T, K> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T, K> core::fmt::Debug for KeyFn<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("KeyFn(..)")
    }
}

/// Collects the ordered identity sequence for `items`, ready to hand to
/// [`crate::WindowerOptions::new`].
pub fn collect_ids<T, E: IdentityExtractor<T>>(items: &[T], extractor: &E) -> Vec<E::Id> {
    items.iter().map(|item| extractor.identity_of(item)).collect()
}
