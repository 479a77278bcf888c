//! Chain-length diagnostics.

/// Shape of the collision chains at the time `FrequencyTable::metrics`
/// ran. Computed by a full bucket scan; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChainMetrics {
    /// Buckets holding at least one entry.
    pub non_empty_chains: usize,
    /// Entry count of the longest chain.
    pub max_chain_length: usize,
    /// Entries per non-empty chain. `0.0` when every bucket is empty.
    pub average_chain_length: f32,
}

impl ChainMetrics {
    pub(crate) fn from_chain_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut metrics = ChainMetrics::default();
        let mut entries = 0usize;
        for len in lengths.into_iter().filter(|&len| len > 0) {
            metrics.non_empty_chains += 1;
            metrics.max_chain_length = metrics.max_chain_length.max(len);
            entries += len;
        }
        if metrics.non_empty_chains > 0 {
            metrics.average_chain_length = entries as f32 / metrics.non_empty_chains as f32;
        }
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_empty_buckets_give_zero_average() {
        let m = ChainMetrics::from_chain_lengths([0, 0, 0]);
        assert_eq!(m, ChainMetrics::default());
        assert_eq!(m.average_chain_length, 0.0);
        assert!(!m.average_chain_length.is_nan());
    }

    #[test]
    fn averages_over_non_empty_chains_only() {
        let m = ChainMetrics::from_chain_lengths([1, 0, 2, 1, 0]);
        assert_eq!(m.non_empty_chains, 3);
        assert_eq!(m.max_chain_length, 2);
        assert!((m.average_chain_length - 4.0 / 3.0).abs() <= f32::EPSILON);
    }
}
