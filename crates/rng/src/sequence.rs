// internal modules
use crate::source::RandomSource;

/// Deterministic random source that replays a fixed list of variates
///
/// Replaces the generator with a known stream so that sampling results can
/// be asserted exactly. The sequence cycles once exhausted, and the total
/// number of draws is tracked so tests can also assert how many variates an
/// operation consumed.
///
/// ```rust
/// # use mcdist_rng::{RandomSource, SequenceSource};
/// let mut stream = SequenceSource::new([0.25, 0.75]);
///
/// assert_eq!(stream.next(), 0.25);
/// assert_eq!(stream.next(), 0.75);
/// assert_eq!(stream.next(), 0.25); // wrapped around
/// assert_eq!(stream.draws(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    draws: usize,
}

impl SequenceSource {
    /// A source replaying `values` in order, cycling at the end
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or contains anything outside `[0, 1]`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "sequence source needs at least one variate");
        assert!(
            values.iter().all(|u| (0.0..=1.0).contains(u)),
            "sequence source variates must be uniform variates in [0, 1]"
        );
        Self { values, draws: 0 }
    }

    /// Total number of variates drawn so far
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Rewind to the start of the sequence
    pub fn reset(&mut self) {
        self.draws = 0;
    }
}

impl RandomSource for SequenceSource {
    fn next(&mut self) -> f64 {
        let value = self.values[self.draws % self.values.len()];
        self.draws += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_cycle_and_count() {
        let mut stream = SequenceSource::new([0.1, 0.2, 0.3]);
        let drawn: Vec<f64> = (0..5).map(|_| stream.next()).collect();
        assert_eq!(drawn, vec![0.1, 0.2, 0.3, 0.1, 0.2]);
        assert_eq!(stream.draws(), 5);
    }

    #[test]
    fn reset_rewinds_to_the_start() {
        let mut stream = SequenceSource::new([0.4, 0.6]);
        stream.next();
        stream.reset();
        assert_eq!(stream.next(), 0.4);
        assert_eq!(stream.draws(), 1);
    }

    #[test]
    #[should_panic]
    fn empty_sequences_are_rejected() {
        SequenceSource::new(Vec::new());
    }

    #[test]
    #[should_panic]
    fn non_uniform_variates_are_rejected() {
        SequenceSource::new([1.5]);
    }
}
