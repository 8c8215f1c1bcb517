use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `0..n` with a seeded RNG and cut it into (train, holdout).
/// `holdout_fraction` is clamped to [0, 1]; the same seed gives the same cut.
pub fn holdout_indices(n: usize, holdout_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let holdout = ((n as f64) * holdout_fraction.clamp(0.0, 1.0)).round() as usize;
    let train = indices.split_off(holdout.min(n));
    tracing::debug!("split {} rows into {} train / {} holdout", n, train.len(), indices.len());
    (train, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_and_coverage() {
        let (train, holdout) = holdout_indices(100, 0.2, 7);
        assert_eq!(train.len(), 80);
        assert_eq!(holdout.len(), 20);
        let mut all: Vec<usize> = train.iter().chain(holdout.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_split_is_reproducible() {
        assert_eq!(holdout_indices(50, 0.3, 42), holdout_indices(50, 0.3, 42));
    }

    #[test]
    fn degenerate_fractions() {
        let (train, holdout) = holdout_indices(10, 0.0, 1);
        assert_eq!((train.len(), holdout.len()), (10, 0));
        let (train, holdout) = holdout_indices(10, 5.0, 1);
        assert_eq!((train.len(), holdout.len()), (0, 10));
        let (train, holdout) = holdout_indices(0, 0.5, 1);
        assert!(train.is_empty() && holdout.is_empty());
    }
}
