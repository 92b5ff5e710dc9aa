//! Cache invalidation shared by ordering containers.

/// Anything that memoizes a derived order should implement this.
pub trait InvalidateCache {
    /// Drop the memoized value so the next query recomputes it.
    fn invalidate_cache(&mut self);
}
