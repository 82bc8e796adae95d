//! Membership filter capability
//!
//! The join is written once against this trait. The Bloom filter is the
//! production implementation; the exact set filter is a zero-error reference
//! used to compare results and benchmark the pruning stage.

use crate::domain::FilterConfig;
use crate::error::FilterError;

/// A set-membership structure that can be intersected with a same-shaped peer
pub trait MembershipFilter: Clone + Send + Sync + Sized {
    /// Short label used in logs and join stats
    const KIND: &'static str;

    /// Build an empty filter for the given configuration
    fn from_config(config: &FilterConfig) -> Result<Self, FilterError>;

    /// Configuration this filter was built from
    fn config(&self) -> &FilterConfig;

    /// Record a key
    fn insert(&mut self, key: &str);

    /// `false` means the key was never inserted; `true` means it probably was
    fn may_contain(&self, key: &str) -> bool;

    /// Intersect `other` into `self`
    ///
    /// After this call `may_contain(key)` is true only if it was true for
    /// both operands.
    fn combine_and(&mut self, other: &Self) -> Result<(), FilterError>;

    /// Estimated number of distinct keys held
    fn estimated_len(&self) -> f64;

    /// Insert every key of an iterator
    fn insert_all<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.insert(key);
        }
    }

    /// Non-destructive AND: both operands stay usable
    fn intersection(&self, other: &Self) -> Result<Self, FilterError> {
        let mut combined = self.clone();
        combined.combine_and(other)?;
        Ok(combined)
    }

}
