//! Lossless-join check for decompositions.

use alloc::collections::BTreeSet;
use core::hash::Hash;

use super::RelationSchema;

impl<A> RelationSchema<A>
where
    A: Ord + Hash + Clone,
{
    /// Returns `true` if some fragment contains a candidate key of the schema.
    ///
    /// This is a sufficient condition for a lossless join, not a chase: a
    /// decomposition in which no single fragment holds a whole key is
    /// reported as lossy even when its join happens to be lossless.
    #[must_use]
    pub fn is_lossless_decomposition(&self, fragments: &[BTreeSet<A>]) -> bool {
        let keys = self.candidate_keys();
        Self::is_lossless_decomposition_with_keys(&keys, fragments)
    }

    /// Like [`is_lossless_decomposition`](Self::is_lossless_decomposition),
    /// over candidate keys computed beforehand.
    #[must_use]
    pub fn is_lossless_decomposition_with_keys(
        keys: &[BTreeSet<A>],
        fragments: &[BTreeSet<A>],
    ) -> bool {
        let lossless = fragments
            .iter()
            .any(|fragment| keys.iter().any(|key| key.is_subset(fragment)));
        tracing::debug!(fragments = fragments.len(), lossless, "checked decomposition");
        lossless
    }
}
