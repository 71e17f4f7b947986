use rand::Rng;

use crate::application::ports::RandomSource;

/// Thread-local OS-seeded CSPRNG from `rand`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn pick_index(&self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index called on an empty pool");
        rand::rng().random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_index_in_range() {
        let source = ThreadRandomSource;
        for len in 1..50 {
            assert!(source.pick_index(len) < len);
        }
        assert_eq!(source.pick_index(1), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty pool")]
    fn test_pick_index_rejects_empty_pool() {
        ThreadRandomSource.pick_index(0);
    }
}
