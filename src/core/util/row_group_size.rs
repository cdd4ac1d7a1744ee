use std::num::NonZeroUsize;

/// Rows per group for the CPU rasterizer: half the available threads, at least one.
#[must_use]
pub fn rows_per_group(available_threads: NonZeroUsize) -> NonZeroUsize {
    NonZeroUsize::new(available_threads.get() / 2).unwrap_or(NonZeroUsize::MIN)
}

#[must_use]
pub fn rows_per_group_for_this_machine() -> NonZeroUsize {
    let available = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
    rows_per_group(available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threads(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_single_thread_gives_one_row() {
        assert_eq!(rows_per_group(threads(1)).get(), 1);
    }

    #[test]
    fn test_half_of_available_threads() {
        assert_eq!(rows_per_group(threads(8)).get(), 4);
        assert_eq!(rows_per_group(threads(7)).get(), 3);
    }

    #[test]
    fn test_sanity_check() {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        assert_eq!(rows_per_group_for_this_machine().get(), (available / 2).max(1));
    }
}
