#[cfg(test)]
use mockall::automock;

/// Uniform index selection for picking pictures
#[cfg_attr(test, automock)]
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`; callers guarantee `len > 0`
    fn pick_index(&self, len: usize) -> usize;
}
